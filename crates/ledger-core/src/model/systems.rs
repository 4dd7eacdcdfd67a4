use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeIntervention {
    pub id: String,
    pub name: String,
    pub description: String,
    pub impact_score: f64,
}

/// A dimension of systems change, scored 0..=100 before and after narrative work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemDimension {
    pub id: String,
    pub name: String,
    pub description: String,
    pub baseline_level: f64,
    pub transformed_level: f64,
    #[serde(default)]
    pub narrative_interventions: Vec<NarrativeIntervention>,
}

impl SystemDimension {
    pub fn level(&self, transformed: bool) -> f64 {
        if transformed {
            self.transformed_level
        } else {
            self.baseline_level
        }
    }

    pub fn intervention(&self, id: &str) -> Option<&NarrativeIntervention> {
        self.narrative_interventions.iter().find(|i| i.id == id)
    }
}

/// A cycle through dimensions. `connections` may repeat the first id to close the loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackLoop {
    pub id: String,
    pub name: String,
    pub description: String,
    pub connections: Vec<String>,
    pub reinforcing: bool,
}

impl FeedbackLoop {
    pub fn kind_label(&self) -> &'static str {
        if self.reinforcing {
            "Reinforcing Loop"
        } else {
            "Balancing Loop"
        }
    }
}
