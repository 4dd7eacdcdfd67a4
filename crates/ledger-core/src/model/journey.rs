use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Origin,
    Process,
    Application,
    Impact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyStage {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: StageKind,
    pub sovereignty_level: f64,
    pub description: String,
    #[serde(default)]
    pub tooltip: String,
}

/// A protection mechanism sitting between stage `position - 1` and stage `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: String,
    pub name: String,
    pub position: usize,
    pub description: String,
    pub effectiveness: f64,
}
