#![forbid(unsafe_code)]

//! Headless layout, scene graph and SVG output for the Empathy Ledger visualizations.
//!
//! Every view goes through the same pipeline: fixtures and config become a layout model, the
//! layout plus the current [`InteractionState`] becomes a [`Scene`], and the scene becomes SVG.

pub mod color;
pub mod curve;
pub mod evidence;
pub mod feedback;
pub mod gauge;
pub mod interaction;
pub mod journey;
pub mod model;
pub mod proximity;
pub mod radial;
pub mod sankey;
pub mod scene;
pub mod stepper;
pub mod svg;
pub mod text;
pub mod transition;
mod util;

pub use interaction::{Action, InteractionState, Tooltip, pointer_at, update};
pub use scene::{Binding, Scene};
pub use svg::{SvgRenderOptions, render_scene_svg};

use crate::feedback::DanglingPolicy;
use crate::model::{
    DimensionWheelLayout, EvidenceLayout, FlowLayout, GaugeLayout, JourneyLayout, ProximityLayout,
    SystemsLayout,
};
use crate::text::DeterministicTextMeasurer;
use ledger_core::{Fixtures, LedgerConfig};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid layout input: {message}")]
    InvalidModel { message: String },
    #[error(transparent)]
    Core(#[from] ledger_core::Error),
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualizationKind {
    ValueFlow,
    ListeningGauge,
    SystemsModel,
    SovereigntyJourney,
    EvidenceExplorer,
    ProximityMap,
}

impl VisualizationKind {
    pub const ALL: [VisualizationKind; 6] = [
        VisualizationKind::ValueFlow,
        VisualizationKind::ListeningGauge,
        VisualizationKind::SystemsModel,
        VisualizationKind::SovereigntyJourney,
        VisualizationKind::EvidenceExplorer,
        VisualizationKind::ProximityMap,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VisualizationKind::ValueFlow => "value-flow",
            VisualizationKind::ListeningGauge => "listening-gauge",
            VisualizationKind::SystemsModel => "systems-model",
            VisualizationKind::SovereigntyJourney => "sovereignty-journey",
            VisualizationKind::EvidenceExplorer => "evidence-explorer",
            VisualizationKind::ProximityMap => "proximity-map",
        }
    }
}

impl fmt::Display for VisualizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisualizationKind {
    type Err = Error;

    /// Accepts the kebab-case name or its first word (`flow`, `gauge`, `systems`, ...).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| {
                let name = k.as_str();
                name == s || name.split('-').next() == Some(s.as_str())
            })
            .or(match s.as_str() {
                "flow" | "sankey" => Some(VisualizationKind::ValueFlow),
                "gauge" => Some(VisualizationKind::ListeningGauge),
                "journey" => Some(VisualizationKind::SovereigntyJourney),
                "proximity" => Some(VisualizationKind::ProximityMap),
                _ => None,
            })
            .ok_or_else(|| Error::InvalidModel {
                message: format!("unknown visualization `{s}`"),
            })
    }
}

/// Layout model of one visualization, tagged by kind when serialized.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum VisualizationLayout {
    ValueFlow(FlowLayout),
    ListeningGauge(GaugeLayout),
    SystemsModel(SystemsLayout),
    SovereigntyJourney(JourneyLayout),
    EvidenceExplorer(EvidenceLayout),
    ProximityMap(ProximityLayout),
}

fn dimension_wheel(fixtures: &Fixtures, config: &LedgerConfig, state: &InteractionState) -> DimensionWheelLayout {
    radial::layout_dimension_wheel(&fixtures.system_dimensions, config, state)
}

pub fn layout(
    kind: VisualizationKind,
    fixtures: &Fixtures,
    config: &LedgerConfig,
    state: &InteractionState,
) -> Result<VisualizationLayout> {
    let layout = match kind {
        VisualizationKind::ValueFlow => {
            VisualizationLayout::ValueFlow(sankey::layout_value_flow(fixtures, state.flow_model, config)?)
        }
        VisualizationKind::ListeningGauge => VisualizationLayout::ListeningGauge(gauge::layout_gauge(
            &fixtures.listening_levels,
            fixtures.assessment.as_ref(),
            config,
            state,
        )),
        VisualizationKind::SystemsModel => {
            let wheel = dimension_wheel(fixtures, config, state);
            let loops = feedback::layout_loops(
                &fixtures.feedback_loops,
                &wheel,
                DanglingPolicy::from_config(config),
            )?;
            VisualizationLayout::SystemsModel(SystemsLayout { wheel, loops })
        }
        VisualizationKind::SovereigntyJourney => VisualizationLayout::SovereigntyJourney(
            journey::layout_journey(&fixtures.journey_stages, &fixtures.checkpoints, config, state),
        ),
        VisualizationKind::EvidenceExplorer => VisualizationLayout::EvidenceExplorer(evidence::layout_evidence(
            &fixtures.evidence_case_studies,
            &fixtures.integration_approaches,
            config,
            state,
        )),
        VisualizationKind::ProximityMap => {
            let intervention = match state.proximity_intervention.as_deref() {
                Some(id) => {
                    let found = fixtures.proximity_intervention(id);
                    if found.is_none() {
                        tracing::warn!(intervention = %id, "unknown proximity intervention; showing the baseline network");
                    }
                    found
                }
                None => None,
            };
            VisualizationLayout::ProximityMap(proximity::layout_proximity(
                &fixtures.proximity_entities,
                &fixtures.proximity_connections,
                intervention,
                config,
                state,
            ))
        }
    };
    Ok(layout)
}

/// Scene for `kind` under `state`, with a tooltip panel for the hovered datum.
pub fn build_scene(
    kind: VisualizationKind,
    fixtures: &Fixtures,
    config: &LedgerConfig,
    state: &InteractionState,
) -> Result<Scene> {
    let mut scene = match layout(kind, fixtures, config, state)? {
        VisualizationLayout::ValueFlow(l) => scene::flow_scene(&l, fixtures.flow(state.flow_model), state),
        VisualizationLayout::ListeningGauge(l) => scene::gauge_scene(&l),
        VisualizationLayout::SystemsModel(l) => scene::systems_scene(&l, state),
        VisualizationLayout::SovereigntyJourney(l) => scene::journey_scene(&l, state),
        VisualizationLayout::EvidenceExplorer(l) => scene::evidence_scene(&l, fixtures, state),
        VisualizationLayout::ProximityMap(l) => scene::proximity_scene(&l, state),
    };

    // Checkpoints draw their own panel.
    let hovered_tooltip = state
        .hovered
        .as_ref()
        .filter(|b| !matches!(b, Binding::Checkpoint(_)))
        .and_then(|b| Tooltip::for_binding(b, state, fixtures));
    if let Some(tip) = hovered_tooltip {
        if let Some(layer) = scene::tooltip_layer(&scene, &tip, &DeterministicTextMeasurer::default()) {
            scene.layers.push(layer);
        }
    }

    tracing::debug!(
        kind = %kind,
        layers = scene.layers.len(),
        bound = scene.bound_nodes().len(),
        "built scene"
    );
    Ok(scene)
}

pub fn render_svg(
    kind: VisualizationKind,
    fixtures: &Fixtures,
    config: &LedgerConfig,
    state: &InteractionState,
    options: &SvgRenderOptions,
) -> Result<String> {
    let scene = build_scene(kind, fixtures, config, state)?;
    Ok(render_scene_svg(&scene, options))
}

pub fn layout_json(
    kind: VisualizationKind,
    fixtures: &Fixtures,
    config: &LedgerConfig,
    state: &InteractionState,
) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(layout(kind, fixtures, config, state)?)?)
}
