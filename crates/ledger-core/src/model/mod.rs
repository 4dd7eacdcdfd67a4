//! Plain data records shared by every visualization.
//!
//! Field names follow the camelCase wire shape of the hand-authored data sets so that fixture
//! overrides can be written in JSON or YAML without a translation layer.

mod evidence;
mod flow;
mod journey;
mod listening;
mod proximity;
mod systems;

pub use evidence::{Evidence, EvidenceCaseStudy, EvidenceKind, IntegrationApproach};
pub use flow::{FlowCategory, FlowGraph, FlowLink, FlowModel, FlowNode};
pub use journey::{Checkpoint, JourneyStage, StageKind};
pub use listening::{
    AssessmentDimension, ListeningCaseStudy, ListeningLevel, OrganizationAssessment,
};
pub use proximity::{
    EntityCategory, ProximityConnection, ProximityEntities, ProximityEntity,
    ProximityIntervention, StrengthChange,
};
pub use systems::{FeedbackLoop, NarrativeIntervention, SystemDimension};
