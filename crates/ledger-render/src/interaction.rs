//! Pointer and toggle state for every visualization, updated by a pure reducer.
//!
//! Hosts feed [`Action`]s into [`update`] and rebuild the scene whenever it returns `true`.
//! Highlights and tooltips are then a function of the state alone.

use crate::evidence::EvidenceView;
use crate::scene::{Binding, Scene};
use crate::util::fmt;
use ledger_core::Fixtures;
use ledger_core::model::{FlowGraph, FlowModel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionState {
    pub hovered: Option<Binding>,
    pub selected: Option<Binding>,
    pub flow_model: FlowModel,
    pub show_transformed: bool,
    pub compare_mode: bool,
    pub evidence_view: EvidenceView,
    /// Narrative intervention opened in the systems panel.
    pub active_intervention: Option<String>,
    /// Intervention applied to the proximity network.
    pub proximity_intervention: Option<String>,
}

impl InteractionState {
    pub fn is_hovered(&self, binding: &Binding) -> bool {
        self.hovered.as_ref() == Some(binding)
    }

    pub fn is_selected(&self, binding: &Binding) -> bool {
        self.selected.as_ref() == Some(binding)
    }

    pub fn is_active(&self, binding: &Binding) -> bool {
        self.is_hovered(binding) || self.is_selected(binding)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "camelCase")]
pub enum Action {
    PointerEnter(Binding),
    PointerLeave(Binding),
    Click(Binding),
    ClearSelection,
    SetFlowModel(FlowModel),
    ToggleTransformed,
    ToggleCompare,
    OpenEvidence(EvidenceView),
    CloseEvidence,
    SetIntervention(Option<String>),
    SetProximityIntervention(Option<String>),
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// Applies `action`; returns whether anything visible changed.
pub fn update(state: &mut InteractionState, action: Action) -> bool {
    match action {
        Action::PointerEnter(binding) => replace(&mut state.hovered, Some(binding)),
        Action::PointerLeave(binding) => {
            if state.is_hovered(&binding) {
                state.hovered = None;
                true
            } else {
                false
            }
        }
        Action::Click(Binding::Intervention(id)) => {
            let next = if state.active_intervention.as_deref() == Some(id.as_str()) {
                None
            } else {
                Some(id)
            };
            replace(&mut state.active_intervention, next)
        }
        Action::Click(Binding::CaseStudy(id)) => {
            replace(&mut state.evidence_view, EvidenceView::CaseStudy(id))
        }
        Action::Click(Binding::Approach(id)) => {
            replace(&mut state.evidence_view, EvidenceView::Approach(id))
        }
        Action::Click(binding) => {
            let next = if state.is_selected(&binding) {
                None
            } else {
                Some(binding)
            };
            if matches!(next, Some(Binding::Dimension(_))) || next.is_none() {
                state.active_intervention = None;
            }
            replace(&mut state.selected, next)
        }
        Action::ClearSelection => {
            state.active_intervention = None;
            replace(&mut state.selected, None)
        }
        Action::SetFlowModel(model) => {
            if state.flow_model == model {
                return false;
            }
            state.flow_model = model;
            // Link indices refer to the previous graph.
            if matches!(state.hovered, Some(Binding::FlowLink(_) | Binding::FlowNode(_))) {
                state.hovered = None;
            }
            if matches!(state.selected, Some(Binding::FlowLink(_) | Binding::FlowNode(_))) {
                state.selected = None;
            }
            true
        }
        Action::ToggleTransformed => {
            state.show_transformed = !state.show_transformed;
            true
        }
        Action::ToggleCompare => {
            state.compare_mode = !state.compare_mode;
            true
        }
        Action::OpenEvidence(view) => replace(&mut state.evidence_view, view),
        Action::CloseEvidence => replace(&mut state.evidence_view, EvidenceView::Overview),
        Action::SetIntervention(id) => replace(&mut state.active_intervention, id),
        Action::SetProximityIntervention(id) => replace(&mut state.proximity_intervention, id),
    }
}

/// Enter and leave actions for a pointer move to `(x, y)` over `scene`.
pub fn pointer_at(scene: &Scene, state: &InteractionState, x: f64, y: f64) -> Vec<Action> {
    let hit = scene.hit_test(x, y);
    if hit == state.hovered.as_ref() {
        return Vec::new();
    }
    let mut actions = Vec::with_capacity(2);
    if let Some(previous) = &state.hovered {
        actions.push(Action::PointerLeave(previous.clone()));
    }
    if let Some(binding) = hit {
        actions.push(Action::PointerEnter(binding.clone()));
    }
    actions
}

/// Text shown next to the hovered (or else selected) datum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub binding: Binding,
    pub title: String,
    pub lines: Vec<String>,
}

fn node_name<'a>(graph: &'a FlowGraph, id: &'a str) -> &'a str {
    graph.node(id).map(|n| n.name.as_str()).unwrap_or(id)
}

impl Tooltip {
    pub fn derive(state: &InteractionState, fixtures: &Fixtures) -> Option<Self> {
        let binding = state.hovered.as_ref().or(state.selected.as_ref())?;
        Self::for_binding(binding, state, fixtures)
    }

    pub fn for_binding(binding: &Binding, state: &InteractionState, fixtures: &Fixtures) -> Option<Self> {
        let (title, lines) = match binding {
            Binding::FlowLink(i) => {
                let graph = fixtures.flow(state.flow_model);
                let link = graph.links.get(*i)?;
                (
                    format!(
                        "{} → {}",
                        node_name(graph, &link.source),
                        node_name(graph, &link.target)
                    ),
                    vec![link.description.clone(), format!("Value: {}", fmt(link.value))],
                )
            }
            Binding::FlowNode(id) => {
                let node = fixtures.flow(state.flow_model).node(id)?;
                (node.name.clone(), vec![node.category.label().to_string()])
            }
            Binding::Loop(id) => {
                let l = fixtures.feedback_loop(id)?;
                (
                    l.name.clone(),
                    vec![l.description.clone(), l.kind_label().to_string()],
                )
            }
            Binding::Dimension(id) => {
                let d = fixtures.dimension(id)?;
                let label = if state.show_transformed {
                    "Transformed level"
                } else {
                    "Baseline level"
                };
                (
                    d.name.clone(),
                    vec![
                        d.description.clone(),
                        format!("{label}: {}%", fmt(d.level(state.show_transformed))),
                    ],
                )
            }
            Binding::Intervention(id) => {
                let i = fixtures
                    .system_dimensions
                    .iter()
                    .find_map(|d| d.intervention(id))?;
                (
                    i.name.clone(),
                    vec![i.description.clone(), format!("Impact: {}%", fmt(i.impact_score))],
                )
            }
            Binding::Level(level) => {
                let l = fixtures.listening_level(*level)?;
                let mut lines = vec![l.description.clone()];
                lines.extend(l.characteristics.iter().map(|c| format!("• {c}")));
                if !l.systemic_impact.is_empty() {
                    lines.push(format!("Systemic impact: {}", l.systemic_impact));
                }
                if let Some(cs) = fixtures.listening_case_study(*level) {
                    lines.push(format!("Case study: {}", cs.title));
                    lines.push(format!("\"{}\" ({})", cs.quote, cs.quote_author));
                }
                (format!("Level {}: {}", l.level, l.name), lines)
            }
            Binding::Stage(id) => {
                let s = fixtures.journey_stage(id)?;
                (
                    s.name.clone(),
                    vec![
                        s.description.clone(),
                        format!("Sovereignty level: {}%", fmt(s.sovereignty_level)),
                    ],
                )
            }
            Binding::Checkpoint(id) => {
                let c = fixtures.checkpoint(id)?;
                (c.name.clone(), vec![c.description.clone()])
            }
            Binding::EvidenceType(kind) => (
                format!("{} Evidence", kind.title()),
                vec![kind.summary().to_string()],
            ),
            Binding::CaseStudy(id) => {
                let cs = fixtures.evidence_case_study(id)?;
                (cs.title.clone(), vec![cs.context.clone()])
            }
            Binding::Approach(id) => {
                let a = fixtures.integration_approach(id)?;
                (a.name.clone(), vec![a.description.clone()])
            }
            Binding::Entity(id) => {
                let e = fixtures.proximity_entities.get(id)?;
                (e.name.clone(), vec![format!("Size: {}", fmt(e.size))])
            }
            Binding::Connection(i) => {
                let connections = effective_connections(state, fixtures);
                let c = connections.get(*i)?;
                let name = |id: &str| {
                    fixtures
                        .proximity_entities
                        .get(id)
                        .map(|e| e.name.clone())
                        .unwrap_or_else(|| id.to_string())
                };
                (
                    format!("{} → {}", name(&c.source), name(&c.target)),
                    vec![
                        format!("Strength: {}", fmt(c.strength)),
                        if c.direct { "Direct" } else { "Indirect" }.to_string(),
                    ],
                )
            }
        };
        Some(Self {
            binding: binding.clone(),
            title,
            lines: lines.into_iter().filter(|l| !l.is_empty()).collect(),
        })
    }
}

/// Proximity connections with the active intervention applied.
pub fn effective_connections(
    state: &InteractionState,
    fixtures: &Fixtures,
) -> Vec<ledger_core::model::ProximityConnection> {
    match state
        .proximity_intervention
        .as_deref()
        .and_then(|id| fixtures.proximity_intervention(id))
    {
        Some(int) => crate::proximity::apply_intervention(&fixtures.proximity_connections, int).0,
        None => fixtures.proximity_connections.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{HitArea, Layer, SceneNode, Shape, Style};

    fn dim(id: &str) -> Binding {
        Binding::Dimension(id.to_string())
    }

    #[test]
    fn leave_only_clears_the_matching_hover() {
        let mut s = InteractionState::default();
        assert!(update(&mut s, Action::PointerEnter(dim("a"))));
        assert!(!update(&mut s, Action::PointerEnter(dim("a"))));
        assert!(!update(&mut s, Action::PointerLeave(dim("b"))));
        assert_eq!(s.hovered, Some(dim("a")));
        assert!(update(&mut s, Action::PointerLeave(dim("a"))));
        assert_eq!(s.hovered, None);
    }

    #[test]
    fn clicking_an_intervention_toggles_it() {
        let mut s = InteractionState::default();
        update(&mut s, Action::Click(Binding::Intervention("i1".into())));
        assert_eq!(s.active_intervention.as_deref(), Some("i1"));
        update(&mut s, Action::Click(Binding::Intervention("i1".into())));
        assert_eq!(s.active_intervention, None);
    }

    #[test]
    fn clicking_a_selected_dimension_deselects_it() {
        let mut s = InteractionState::default();
        update(&mut s, Action::Click(dim("a")));
        update(&mut s, Action::SetIntervention(Some("i1".into())));
        assert_eq!(s.selected, Some(dim("a")));
        update(&mut s, Action::Click(dim("a")));
        assert_eq!(s.selected, None);
        assert_eq!(s.active_intervention, None);
    }

    #[test]
    fn markers_open_evidence_views() {
        let mut s = InteractionState::default();
        update(&mut s, Action::Click(Binding::CaseStudy("cs1".into())));
        assert_eq!(s.evidence_view, EvidenceView::CaseStudy("cs1".into()));
        assert!(update(&mut s, Action::CloseEvidence));
        assert!(s.evidence_view.is_overview());
        assert!(!update(&mut s, Action::CloseEvidence));
    }

    #[test]
    fn switching_flow_model_drops_flow_hover() {
        let mut s = InteractionState {
            hovered: Some(Binding::FlowLink(2)),
            ..InteractionState::default()
        };
        assert!(update(&mut s, Action::SetFlowModel(FlowModel::Traditional)));
        assert_eq!(s.hovered, None);
        assert!(!update(&mut s, Action::SetFlowModel(FlowModel::Traditional)));
    }

    #[test]
    fn pointer_motion_becomes_enter_and_leave() {
        let mut scene = Scene::new(100.0, 100.0, "t");
        let mut layer = Layer::new("nodes", 0);
        layer.push(
            SceneNode::new(Shape::circle(10.0, 10.0, 5.0), Style::default())
                .bind(dim("a"))
                .hit(HitArea::Circle {
                    cx: 10.0,
                    cy: 10.0,
                    r: 5.0,
                }),
        );
        scene.layers.push(layer);

        let mut s = InteractionState::default();
        let enter = pointer_at(&scene, &s, 10.0, 10.0);
        assert_eq!(enter, vec![Action::PointerEnter(dim("a"))]);
        for a in enter {
            update(&mut s, a);
        }
        assert!(pointer_at(&scene, &s, 11.0, 10.0).is_empty());
        assert_eq!(
            pointer_at(&scene, &s, 90.0, 90.0),
            vec![Action::PointerLeave(dim("a"))]
        );
    }

    #[test]
    fn link_tooltip_names_both_ends() {
        let fixtures = Fixtures::default();
        let state = InteractionState {
            hovered: Some(Binding::FlowLink(0)),
            ..InteractionState::default()
        };
        let tip = Tooltip::derive(&state, &fixtures).expect("tooltip");
        assert!(tip.title.contains(" → "), "{}", tip.title);
        assert!(tip.lines.iter().any(|l| l.starts_with("Value: ")));
    }

    #[test]
    fn loop_tooltip_names_its_kind() {
        let fixtures = Fixtures::default();
        let l = &fixtures.feedback_loops[0];
        let state = InteractionState {
            hovered: Some(Binding::Loop(l.id.clone())),
            ..InteractionState::default()
        };
        let tip = Tooltip::derive(&state, &fixtures).expect("tooltip");
        assert_eq!(tip.title, l.name);
        assert!(tip.lines.iter().any(|x| x == l.kind_label()));
    }

    #[test]
    fn dimension_tooltip_follows_the_toggle() {
        let fixtures = Fixtures::default();
        let d = &fixtures.system_dimensions[0];
        let mut state = InteractionState {
            hovered: Some(dim(&d.id)),
            ..InteractionState::default()
        };
        let base = Tooltip::derive(&state, &fixtures).expect("tooltip");
        state.show_transformed = true;
        let transformed = Tooltip::derive(&state, &fixtures).expect("tooltip");
        assert!(base.lines.iter().any(|l| l.starts_with("Baseline level")));
        assert!(transformed.lines.iter().any(|l| l.starts_with("Transformed level")));
    }

    #[test]
    fn unknown_ids_give_no_tooltip() {
        let state = InteractionState {
            hovered: Some(Binding::Stage("nowhere".into())),
            ..InteractionState::default()
        };
        assert!(Tooltip::derive(&state, &Fixtures::default()).is_none());
    }
}
