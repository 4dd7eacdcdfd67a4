//! One-card-at-a-time view of each data set for narrow screens.

use crate::VisualizationKind;
use crate::util::fmt;
use ledger_core::Fixtures;
use ledger_core::model::{
    FlowGraph, IntegrationApproach, JourneyStage, ListeningLevel, SystemDimension,
};
use serde::Serialize;

/// Cards shown per list section, as on a phone.
const SECTION_LIMIT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stepper {
    pub step: usize,
    pub len: usize,
}

impl Stepper {
    pub fn new(len: usize) -> Self {
        Self { step: 0, len }
    }

    /// Advances one card; returns whether the step changed.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.step += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.step -= 1;
        true
    }

    pub fn is_first(&self) -> bool {
        self.step == 0
    }

    pub fn is_last(&self) -> bool {
        self.step + 1 >= self.len
    }

    /// Progress dots, `true` for the current card.
    pub fn dots(&self) -> Vec<bool> {
        (0..self.len).map(|i| i == self.step).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSection {
    pub heading: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepCard {
    /// e.g. "Stage 2 of 6".
    pub counter: String,
    pub title: String,
    pub accent: Option<String>,
    pub body: Vec<String>,
    pub sections: Vec<CardSection>,
}

fn section(heading: &str, items: &[String]) -> CardSection {
    CardSection {
        heading: heading.to_string(),
        lines: items.iter().take(SECTION_LIMIT).cloned().collect(),
    }
}

pub fn flow_actor_card(graph: &FlowGraph, step: usize) -> Option<StepCard> {
    let node = graph.nodes.get(step)?;
    let mut body = vec![format!("Category: {}", node.category.as_str())];
    if let Some(link) = graph.first_link_touching(&node.id) {
        body.push(link.description.clone());
    }
    Some(StepCard {
        counter: format!("Actor {} of {}", step + 1, graph.nodes.len()),
        title: node.name.clone(),
        accent: None,
        body,
        sections: Vec::new(),
    })
}

pub fn level_card(levels: &[ListeningLevel], step: usize) -> Option<StepCard> {
    let level = levels.get(step)?;
    Some(StepCard {
        counter: format!("Level {} of {}", level.level, levels.len()),
        title: level.name.clone(),
        accent: Some(level.color.clone()),
        body: vec![
            level.description.clone(),
            format!("Systemic Impact: {}", level.systemic_impact),
        ],
        sections: vec![section("Key Characteristics", &level.characteristics)],
    })
}

pub fn dimension_card(dimensions: &[SystemDimension], step: usize) -> Option<StepCard> {
    let dim = dimensions.get(step)?;
    let sections = dim
        .narrative_interventions
        .first()
        .map(|i| CardSection {
            heading: "Key Intervention".to_string(),
            lines: vec![i.name.clone(), i.description.clone()],
        })
        .into_iter()
        .collect();
    Some(StepCard {
        counter: format!("Dimension {} of {}", step + 1, dimensions.len()),
        title: dim.name.clone(),
        accent: None,
        body: vec![
            dim.description.clone(),
            format!("Baseline Level: {}", fmt(dim.baseline_level)),
            format!("Transformed Level: {}", fmt(dim.transformed_level)),
        ],
        sections,
    })
}

pub fn stage_card(stages: &[JourneyStage], step: usize) -> Option<StepCard> {
    let stage = stages.get(step)?;
    Some(StepCard {
        counter: format!("Stage {} of {}", step + 1, stages.len()),
        title: stage.name.clone(),
        accent: None,
        body: vec![stage.description.clone(), stage.tooltip.clone()],
        sections: Vec::new(),
    })
}

pub fn approach_card(approaches: &[IntegrationApproach], step: usize) -> Option<StepCard> {
    let approach = approaches.get(step)?;
    Some(StepCard {
        counter: format!("Approach {} of {}", step + 1, approaches.len()),
        title: approach.name.clone(),
        accent: None,
        body: vec![approach.description.clone()],
        sections: vec![
            section("Strengths", &approach.strengths),
            section("Limitations", &approach.limitations),
        ],
    })
}

/// Number of cards for `kind`; zero for views without a step-through variant.
pub fn step_count(kind: VisualizationKind, fixtures: &Fixtures, model: ledger_core::model::FlowModel) -> usize {
    match kind {
        VisualizationKind::ValueFlow => fixtures.flow(model).nodes.len(),
        VisualizationKind::ListeningGauge => fixtures.listening_levels.len(),
        VisualizationKind::SystemsModel => fixtures.system_dimensions.len(),
        VisualizationKind::SovereigntyJourney => fixtures.journey_stages.len(),
        VisualizationKind::EvidenceExplorer => fixtures.integration_approaches.len(),
        VisualizationKind::ProximityMap => 0,
    }
}

pub fn step_card(
    kind: VisualizationKind,
    fixtures: &Fixtures,
    model: ledger_core::model::FlowModel,
    step: usize,
) -> Option<StepCard> {
    match kind {
        VisualizationKind::ValueFlow => flow_actor_card(fixtures.flow(model), step),
        VisualizationKind::ListeningGauge => level_card(&fixtures.listening_levels, step),
        VisualizationKind::SystemsModel => dimension_card(&fixtures.system_dimensions, step),
        VisualizationKind::SovereigntyJourney => stage_card(&fixtures.journey_stages, step),
        VisualizationKind::EvidenceExplorer => approach_card(&fixtures.integration_approaches, step),
        VisualizationKind::ProximityMap => None,
    }
}
