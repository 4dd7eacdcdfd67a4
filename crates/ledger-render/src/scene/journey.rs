use super::{Binding, HitArea, Layer, Scene, SceneNode, Shape, Style, TextAnchor, Transform};
use crate::color::{GREEN, GREY_600, GREY_800, INDIGO};
use crate::interaction::InteractionState;
use crate::model::JourneyLayout;
use crate::transition::HOVER_MS;

const TRADITIONAL_STROKE: &str = "#ff9999";
const TRADITIONAL_LABEL: &str = "#e55c5c";
const AXIS_STROKE: &str = "#9ca3af";

fn axes(layout: &JourneyLayout) -> Vec<SceneNode> {
    let (iw, ih) = (layout.inner_width, layout.inner_height);
    let line = |x1, y1, x2, y2| SceneNode::new(Shape::line(x1, y1, x2, y2), Style::default().stroke(AXIS_STROKE, 1.0));
    let mut out = vec![line(0.0, ih, iw, ih), line(0.0, 0.0, 0.0, ih)];
    for tick in &layout.x_ticks {
        out.push(line(tick.position, ih, tick.position, ih + 6.0));
        out.push(SceneNode::new(
            Shape::text(tick.position, ih + 18.0, tick.label.clone(), TextAnchor::Middle),
            Style::default().fill(GREY_600).font(10.0),
        ));
    }
    for tick in &layout.y_ticks {
        out.push(line(-6.0, tick.position, 0.0, tick.position));
        out.push(SceneNode::new(
            Shape::text(-9.0, tick.position, tick.label.clone(), TextAnchor::End),
            Style::default().fill(GREY_600).font(10.0).baseline("middle"),
        ));
    }
    out.push(SceneNode::new(
        Shape::group(
            Transform::default().rotated(-90.0),
            vec![SceneNode::new(
                Shape::text(-ih / 2.0, -40.0, "Narrative Sovereignty Level", TextAnchor::Middle),
                Style::default().fill(GREY_600).font(12.0),
            )],
        ),
        Style::default(),
    ));
    out
}

pub fn journey_scene(layout: &JourneyLayout, state: &InteractionState) -> Scene {
    let mut scene = Scene::new(layout.width, layout.height, "Narrative sovereignty journey");
    let (ox, oy) = (layout.margin.left, layout.margin.top);
    let shift = Transform::translate(ox, oy);
    let (iw, ih) = (layout.inner_width, layout.inner_height);

    let mut lines = Vec::new();
    if let Some(path) = &layout.traditional_path {
        lines.push(SceneNode::new(
            Shape::path(path.clone()),
            Style::default().fill("none").stroke(TRADITIONAL_STROKE, 3.0).dash("5,5"),
        ));
        lines.push(SceneNode::new(
            Shape::text(iw - 100.0, ih - 20.0, "Traditional Model", TextAnchor::Start),
            Style::default().fill(TRADITIONAL_LABEL).font(12.0),
        ));
    }
    lines.push(SceneNode::new(
        Shape::path(layout.main_path.clone()),
        Style::default().fill("none").stroke(INDIGO, 4.0),
    ));
    lines.push(SceneNode::new(
        Shape::text(iw - 100.0, ih - 40.0, "Empathy Ledger Model", TextAnchor::Start),
        Style::default().fill(INDIGO).font(12.0),
    ));

    let mut stages = Vec::with_capacity(layout.stages.len() * 2);
    for s in &layout.stages {
        stages.push(
            SceneNode::new(
                Shape::circle(s.x, s.y, s.radius),
                Style::default()
                    .class("journey-node")
                    .fill(&s.color)
                    .stroke("#ffffff", 2.0)
                    .transition(HOVER_MS),
            )
            .bind(Binding::Stage(s.id.clone()))
            .hit(HitArea::Circle {
                cx: s.x + ox,
                cy: s.y + oy,
                r: s.radius.max(crate::journey::STAGE_HOVER_RADIUS),
            }),
        );
        stages.push(SceneNode::new(
            Shape::text(s.x, s.y - 15.0, s.name.clone(), TextAnchor::Middle),
            Style::default().class("journey-label").fill(GREY_600).font(12.0).passive(),
        ));
    }

    let mut checkpoints = Vec::with_capacity(layout.checkpoints.len());
    let mut tooltip = Vec::new();
    for c in &layout.checkpoints {
        let binding = Binding::Checkpoint(c.id.clone());
        let hovered = state.is_hovered(&binding);
        checkpoints.push(
            SceneNode::new(
                Shape::circle(c.x, c.y, c.radius),
                Style::default()
                    .class("checkpoint")
                    .fill(&c.fill)
                    .stroke(GREEN, 2.0)
                    .transition(HOVER_MS),
            )
            .bind(binding)
            .hit(HitArea::Circle {
                cx: c.x + ox,
                cy: c.y + oy,
                r: c.radius.max(crate::journey::CHECKPOINT_HOVER_RADIUS),
            }),
        );
        if hovered {
            tooltip.push(SceneNode::new(
                Shape::Rect {
                    x: c.x - 100.0,
                    y: c.y - 60.0,
                    width: 200.0,
                    height: 50.0,
                    rx: 5.0,
                },
                Style::default()
                    .class("checkpoint-tooltip")
                    .fill("white")
                    .stroke(GREEN, 1.0)
                    .opacity(0.9)
                    .passive(),
            ));
            tooltip.push(SceneNode::new(
                Shape::text(c.x, c.y - 40.0, c.name.clone(), TextAnchor::Middle),
                Style::default().class("checkpoint-tooltip").fill(GREY_800).font(12.0).bold().passive(),
            ));
            tooltip.push(SceneNode::new(
                Shape::text(c.x, c.y - 25.0, c.description.clone(), TextAnchor::Middle),
                Style::default().class("checkpoint-tooltip").fill(GREY_600).font(10.0).passive(),
            ));
        }
    }

    for (name, priority, children) in [
        ("axes", -1, axes(layout)),
        ("lines", -1, lines),
        ("stages", 0, stages),
        ("checkpoints", 1, checkpoints),
        ("checkpoint-tooltip", -1, tooltip),
    ] {
        let mut layer = Layer::new(name, priority);
        layer.push(SceneNode::new(Shape::group(shift, children), Style::default()));
        scene.layers.push(layer);
    }
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::layout_journey;
    use ledger_core::{Fixtures, LedgerConfig};

    fn build(state: &InteractionState) -> (Scene, JourneyLayout) {
        let f = Fixtures::default();
        let layout = layout_journey(&f.journey_stages, &f.checkpoints, &LedgerConfig::default(), state);
        (journey_scene(&layout, state), layout)
    }

    fn layer_children<'a>(scene: &'a Scene, name: &str) -> &'a [SceneNode] {
        match scene.layer(name).map(|l| &l.nodes[0].shape) {
            Some(Shape::Group { children, .. }) => children,
            _ => &[],
        }
    }

    #[test]
    fn stages_and_checkpoints_are_hit_at_their_centres() {
        let (scene, layout) = build(&InteractionState::default());
        let s = &layout.stages[0];
        assert_eq!(
            scene.hit_test(s.x + layout.margin.left, s.y + layout.margin.top),
            Some(&Binding::Stage(s.id.clone()))
        );
        let c = &layout.checkpoints[0];
        assert_eq!(
            scene.hit_test(c.x + layout.margin.left, c.y + layout.margin.top),
            Some(&Binding::Checkpoint(c.id.clone()))
        );
    }

    #[test]
    fn tooltip_only_for_hovered_checkpoint() {
        let (plain, layout) = build(&InteractionState::default());
        assert!(layer_children(&plain, "checkpoint-tooltip").is_empty());
        let state = InteractionState {
            hovered: Some(Binding::Checkpoint(layout.checkpoints[0].id.clone())),
            ..InteractionState::default()
        };
        let (hovered, _) = build(&state);
        let tip = layer_children(&hovered, "checkpoint-tooltip");
        assert_eq!(tip.len(), 3);
        let Shape::Rect { width, height, .. } = tip[0].shape else {
            panic!("tooltip panel");
        };
        assert_eq!((width, height), (200.0, 50.0));
    }

    #[test]
    fn compare_mode_draws_the_dashed_line() {
        let state = InteractionState {
            compare_mode: true,
            ..InteractionState::default()
        };
        let (scene, _) = build(&state);
        assert!(
            layer_children(&scene, "lines")
                .iter()
                .any(|n| n.style.stroke_dasharray.as_deref() == Some("5,5"))
        );
    }
}
