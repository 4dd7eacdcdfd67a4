use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    Quantitative,
    Qualitative,
    Narrative,
}

impl EvidenceKind {
    pub const ALL: [EvidenceKind; 3] = [
        EvidenceKind::Quantitative,
        EvidenceKind::Qualitative,
        EvidenceKind::Narrative,
    ];

    pub fn title(self) -> &'static str {
        match self {
            EvidenceKind::Quantitative => "Quantitative",
            EvidenceKind::Qualitative => "Qualitative",
            EvidenceKind::Narrative => "Narrative",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            EvidenceKind::Quantitative => "Numerical data, statistics, and measurable outcomes.",
            EvidenceKind::Qualitative => {
                "Themes, patterns, and context from interviews, focus groups, etc."
            }
            EvidenceKind::Narrative => "Stories, lived experience, and first-person accounts.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EvidenceKind::Quantitative => "quantitative",
            EvidenceKind::Qualitative => "qualitative",
            EvidenceKind::Narrative => "narrative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(rename = "type")]
    pub kind: EvidenceKind,
    pub name: String,
    pub description: String,
    pub impact: String,
    pub strength: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceCaseStudy {
    pub id: String,
    pub title: String,
    pub context: String,
    pub challenge: String,
    #[serde(default)]
    pub evidence_types: Vec<Evidence>,
    pub tension: String,
    pub resolution: String,
    pub outcome: String,
    pub quote: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationApproach {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub limitations: Vec<String>,
}
