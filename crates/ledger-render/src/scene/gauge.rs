use super::{Binding, HitArea, Layer, Scene, SceneNode, Shape, Style, TextAnchor};
use crate::model::GaugeLayout;
use crate::transition::LEVEL_FADE_MS;

/// Rings, needle and centre badge. The needle is drawn at its resting target; hosts animate it
/// with [`crate::gauge::NeedleState`].
pub fn gauge_scene(layout: &GaugeLayout) -> Scene {
    let mut scene = Scene::new(layout.size, layout.size, "Listening depth gauge");
    let c = layout.center;

    let mut rings = Layer::new("rings", 0);
    let mut labels = Layer::new("labels", -1);
    for ring in &layout.rings {
        rings.push(
            SceneNode::new(
                Shape::path(ring.path.clone()),
                Style::default()
                    .class("level")
                    .fill(&ring.color)
                    .opacity(ring.opacity)
                    .transition(LEVEL_FADE_MS),
            )
            .bind(Binding::Level(ring.level))
            .hit(HitArea::AnnulusSector {
                cx: c,
                cy: c,
                inner: ring.inner_radius,
                outer: ring.outer_radius,
                start: ring.start_angle,
                end: ring.end_angle,
            }),
        );

        let mut style = Style::default().fill("#fff").font(18.0).passive();
        if ring.level == layout.average_level {
            style = style.bold();
        }
        labels.push(SceneNode::new(
            Shape::text(ring.label.x, ring.label.y, ring.level.to_string(), TextAnchor::Middle),
            style,
        ));
    }

    let mut needle = Layer::new("needle", -1);
    needle.push(SceneNode::new(
        Shape::line(c, c, layout.needle_end.x, layout.needle_end.y),
        Style::default().class("needle").stroke("#222", 6.0).linecap("round"),
    ));
    needle.push(SceneNode::new(
        Shape::circle(c, c, layout.badge_radius),
        Style::default().fill("#fff").stroke("#e5e7eb", 3.0),
    ));
    needle.push(SceneNode::new(
        Shape::text(c, c + 8.0, layout.average_level.to_string(), TextAnchor::Middle),
        Style::default().fill("#222").font(32.0).bold(),
    ));

    scene.layers.extend([rings, labels, needle]);
    scene
}
