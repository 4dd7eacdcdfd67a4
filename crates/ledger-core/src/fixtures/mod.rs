//! Hand-authored data sets that ship with the visualizations.
//!
//! Every constructor returns a fresh value. Callers inject a [`Fixtures`] bundle into the layout
//! functions instead of reaching for shared globals, so tests can swap any table.

pub mod evidence;
pub mod journey;
pub mod listening;
pub mod proximity;
pub mod systems;
pub mod value_flow;

use crate::model::{
    Checkpoint, EvidenceCaseStudy, FeedbackLoop, FlowGraph, FlowModel, IntegrationApproach,
    JourneyStage, ListeningCaseStudy, ListeningLevel, OrganizationAssessment,
    ProximityConnection, ProximityEntities, ProximityIntervention, SystemDimension,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fixtures {
    pub traditional_flow: FlowGraph,
    pub equitable_flow: FlowGraph,
    pub listening_levels: Vec<ListeningLevel>,
    pub listening_case_studies: Vec<ListeningCaseStudy>,
    pub assessment: Option<OrganizationAssessment>,
    pub system_dimensions: Vec<SystemDimension>,
    pub feedback_loops: Vec<FeedbackLoop>,
    pub journey_stages: Vec<JourneyStage>,
    pub checkpoints: Vec<Checkpoint>,
    pub evidence_case_studies: Vec<EvidenceCaseStudy>,
    pub integration_approaches: Vec<IntegrationApproach>,
    pub proximity_entities: ProximityEntities,
    pub proximity_connections: Vec<ProximityConnection>,
    pub proximity_interventions: Vec<ProximityIntervention>,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            traditional_flow: value_flow::traditional(),
            equitable_flow: value_flow::equitable(),
            listening_levels: listening::levels(),
            listening_case_studies: listening::case_studies(),
            assessment: Some(listening::sample_assessment()),
            system_dimensions: systems::dimensions(),
            feedback_loops: systems::loops(),
            journey_stages: journey::stages(),
            checkpoints: journey::checkpoints(),
            evidence_case_studies: evidence::case_studies(),
            integration_approaches: evidence::approaches(),
            proximity_entities: proximity::entities(),
            proximity_connections: proximity::connections(),
            proximity_interventions: proximity::interventions(),
        }
    }
}

impl Fixtures {
    pub fn flow(&self, model: FlowModel) -> &FlowGraph {
        match model {
            FlowModel::Traditional => &self.traditional_flow,
            FlowModel::Equitable => &self.equitable_flow,
        }
    }

    pub fn dimension(&self, id: &str) -> Option<&SystemDimension> {
        self.system_dimensions.iter().find(|d| d.id == id)
    }

    pub fn feedback_loop(&self, id: &str) -> Option<&FeedbackLoop> {
        self.feedback_loops.iter().find(|l| l.id == id)
    }

    pub fn listening_level(&self, level: u8) -> Option<&ListeningLevel> {
        self.listening_levels.iter().find(|l| l.level == level)
    }

    /// First listening case study recorded at `level`.
    pub fn listening_case_study(&self, level: u8) -> Option<&ListeningCaseStudy> {
        self.listening_case_studies.iter().find(|cs| cs.level == level)
    }

    pub fn journey_stage(&self, id: &str) -> Option<&JourneyStage> {
        self.journey_stages.iter().find(|s| s.id == id)
    }

    pub fn checkpoint(&self, id: &str) -> Option<&Checkpoint> {
        self.checkpoints.iter().find(|c| c.id == id)
    }

    pub fn evidence_case_study(&self, id: &str) -> Option<&EvidenceCaseStudy> {
        self.evidence_case_studies.iter().find(|c| c.id == id)
    }

    pub fn integration_approach(&self, id: &str) -> Option<&IntegrationApproach> {
        self.integration_approaches.iter().find(|a| a.id == id)
    }

    pub fn proximity_intervention(&self, id: &str) -> Option<&ProximityIntervention> {
        self.proximity_interventions.iter().find(|i| i.id == id)
    }

    /// Parses a JSON override document. Missing sections keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses a YAML override document. Missing sections keep their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Loads overrides from disk, picking the format from the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let fixtures = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            other => {
                return Err(Error::InvalidValue {
                    field: "fixtures path".to_string(),
                    message: format!(
                        "unsupported extension {:?} for {}",
                        other.unwrap_or(""),
                        path.display()
                    ),
                });
            }
        };
        tracing::debug!(path = %path.display(), "loaded fixture overrides");
        Ok(fixtures)
    }
}
