use super::{Binding, HitArea, Layer, Scene, SceneNode, Shape, Style, TextAnchor, Transform};
use crate::color::{GREY_100, GREY_600, GREY_800};
use crate::feedback::ARROW_POINTS;
use crate::interaction::InteractionState;
use crate::model::{LayoutPoint, SystemsLayout};
use crate::transition::HOVER_MS;
use crate::util::fmt;

/// Loops are hit along the chords between their dimensions.
const LOOP_HIT_TOLERANCE: f64 = 4.0;

pub fn systems_scene(layout: &SystemsLayout, state: &InteractionState) -> Scene {
    let wheel = &layout.wheel;
    let mut scene = Scene::new(wheel.width, wheel.height, "Systems change dynamic model");
    let (ox, oy) = (wheel.margin.left, wheel.margin.top);
    let shift = Transform::translate(ox, oy);

    let mut dimensions = Vec::with_capacity(wheel.nodes.len());
    for node in &wheel.nodes {
        let binding = Binding::Dimension(node.id.clone());
        let stroke_width = if state.is_selected(&binding) { 4.0 } else { 2.0 };
        let children = vec![
            SceneNode::new(
                Shape::circle(0.0, 0.0, node.radius),
                Style::default()
                    .fill(&node.fill)
                    .stroke(GREY_600, stroke_width)
                    .transition(HOVER_MS),
            ),
            SceneNode::new(
                Shape::text_lines(0.0, -2.4, node.label_lines.clone(), 14.4, TextAnchor::Middle),
                Style::default().fill(GREY_800).font(12.0).bold().passive(),
            ),
            SceneNode::new(
                Shape::text(0.0, 38.0, format!("{}%", fmt(node.level)), TextAnchor::Middle),
                Style::default().class("level-indicator").fill(GREY_800).font(10.0).passive(),
            ),
        ];
        dimensions.push(
            SceneNode::new(
                Shape::group(Transform::translate(node.x, node.y), children),
                Style::default().class("dimension"),
            )
            .bind(binding)
            .hit(HitArea::Circle {
                cx: node.x + ox,
                cy: node.y + oy,
                r: node.radius,
            }),
        );
    }

    let center = vec![
        SceneNode::new(
            Shape::circle(wheel.cx, wheel.cy, wheel.center_radius),
            Style::default().fill(GREY_100).stroke(GREY_600, 2.0),
        ),
        SceneNode::new(
            Shape::text(wheel.cx, wheel.cy - 10.0, "Narrative", TextAnchor::Middle),
            Style::default().fill(GREY_800).font(14.0).bold().passive(),
        ),
        SceneNode::new(
            Shape::text(wheel.cx, wheel.cy + 10.0, "Exchange", TextAnchor::Middle),
            Style::default().fill(GREY_800).font(14.0).bold().passive(),
        ),
    ];

    let mut loops = Vec::new();
    for l in &layout.loops {
        let Some(path) = &l.path else {
            continue;
        };
        let binding = Binding::Loop(l.id.clone());
        let (width, opacity) = if state.is_active(&binding) {
            (5.0, 0.8)
        } else {
            (3.0, 0.6)
        };
        loops.push(
            SceneNode::new(
                Shape::path(path.clone()),
                Style::default()
                    .class("loop")
                    .fill("none")
                    .stroke(&l.color, width)
                    .dash("5,5")
                    .opacity(opacity)
                    .transition(HOVER_MS),
            )
            .bind(binding)
            .hit(HitArea::Polyline {
                points: l
                    .points
                    .iter()
                    .map(|p| LayoutPoint::new(p.x + ox, p.y + oy))
                    .collect(),
                tolerance: LOOP_HIT_TOLERANCE,
            }),
        );
        for arrow in &l.arrows {
            loops.push(SceneNode::new(
                Shape::group(
                    Transform::translate(arrow.x, arrow.y).rotated(arrow.angle_deg),
                    vec![SceneNode::new(
                        Shape::Polygon {
                            points: ARROW_POINTS.to_string(),
                        },
                        Style::default().fill(&l.color),
                    )],
                ),
                Style::default().passive(),
            ));
        }
    }

    for (name, priority, children) in [
        ("center", -1, center),
        ("dimensions", 0, dimensions),
        ("loops", 1, loops),
    ] {
        let mut layer = Layer::new(name, priority);
        layer.push(SceneNode::new(Shape::group(shift, children), Style::default()));
        scene.layers.push(layer);
    }
    scene
}
