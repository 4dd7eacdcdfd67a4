use serde::{Deserialize, Serialize};

/// One ring of the listening depth gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListeningLevel {
    pub level: u8,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub characteristics: Vec<String>,
    #[serde(default)]
    pub systemic_impact: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListeningCaseStudy {
    pub id: String,
    pub title: String,
    pub level: u8,
    pub context: String,
    pub transformation: String,
    pub impact: String,
    pub quote: String,
    pub quote_author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentDimension {
    pub name: String,
    pub score: f64,
}

/// Self-assessment scores on the 1..=5 listening scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationAssessment {
    pub organization: String,
    #[serde(default)]
    pub dimensions: Vec<AssessmentDimension>,
}

impl OrganizationAssessment {
    pub fn mean_score(&self) -> Option<f64> {
        if self.dimensions.is_empty() {
            return None;
        }
        let sum: f64 = self.dimensions.iter().map(|d| d.score).sum();
        Some(sum / self.dimensions.len() as f64)
    }
}
