use super::{Binding, HitArea, Layer, Scene, SceneNode, Shape, Style, TextAnchor, Transform};
use crate::color::{GREEN, GREY_500, GREY_600, GREY_800};
use crate::interaction::InteractionState;
use crate::model::{LayoutPoint, ProximityLayout};
use crate::transition::HOVER_MS;
use crate::util::fmt;
use ledger_core::model::EntityCategory;

const COLUMN_TITLES: [(EntityCategory, &str); 3] = [
    (EntityCategory::Foundation, "Foundations"),
    (EntityCategory::Intermediary, "Intermediaries"),
    (EntityCategory::Community, "Communities"),
];

pub fn proximity_scene(layout: &ProximityLayout, state: &InteractionState) -> Scene {
    let mut scene = Scene::new(layout.width, layout.height, "Proximity cartography");
    let (ox, oy) = (layout.margin.left, layout.margin.top);

    let mut connections = Vec::with_capacity(layout.connections.len());
    for c in &layout.connections {
        let mut style = Style::default()
            .class("connection")
            .stroke(if c.transformed { GREEN } else { GREY_500 }, c.stroke_width)
            .opacity(c.opacity)
            .linecap("round")
            .transition(HOVER_MS);
        if !c.direct {
            style = style.dash("4,4");
        }
        connections.push(
            SceneNode::new(Shape::line(c.x1, c.y1, c.x2, c.y2), style)
                .bind(Binding::Connection(c.index))
                .hit(HitArea::Polyline {
                    points: vec![
                        LayoutPoint::new(c.x1 + ox, c.y1 + oy),
                        LayoutPoint::new(c.x2 + ox, c.y2 + oy),
                    ],
                    tolerance: (c.stroke_width / 2.0).max(3.0),
                }),
        );
    }

    let mut entities = Vec::with_capacity(layout.entities.len() * 2);
    for e in &layout.entities {
        let binding = Binding::Entity(e.id.clone());
        let active = state.is_active(&binding);
        entities.push(
            SceneNode::new(
                Shape::circle(e.x, e.y, e.radius),
                Style::default()
                    .class("entity")
                    .fill(&e.color)
                    .stroke("#ffffff", if active { 4.0 } else { 2.0 })
                    .transition(HOVER_MS),
            )
            .bind(binding)
            .hit(HitArea::Circle {
                cx: e.x + ox,
                cy: e.y + oy,
                r: e.radius,
            }),
        );
        entities.push(SceneNode::new(
            Shape::text(e.x, e.y + e.radius + 14.0, e.name.clone(), TextAnchor::Middle),
            Style::default().fill(GREY_800).font(11.0).passive(),
        ));
    }

    let mut labels = Vec::new();
    for (category, title) in COLUMN_TITLES {
        if let Some(x) = layout.entities.iter().find(|e| e.category == category).map(|e| e.x) {
            labels.push(SceneNode::new(
                Shape::text(x, -10.0, title, TextAnchor::Middle),
                Style::default().fill(GREY_600).font(13.0).bold(),
            ));
        }
    }
    let distance = match layout.mean_distance {
        Some(d) => format!("Average distance to communities: {} hops", fmt(d)),
        None => "No community is reachable".to_string(),
    };
    labels.push(SceneNode::new(
        Shape::text(layout.inner_width / 2.0, layout.inner_height + 25.0, distance, TextAnchor::Middle),
        Style::default().class("mean-distance").fill(GREY_600).font(12.0),
    ));

    let shift = Transform::translate(ox, oy);
    for (name, priority, children) in [("connections", 0, connections), ("entities", 1, entities), ("labels", -1, labels)] {
        let mut layer = Layer::new(name, priority);
        layer.push(SceneNode::new(Shape::group(shift, children), Style::default()));
        scene.layers.push(layer);
    }
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proximity::layout_proximity;
    use ledger_core::{Fixtures, LedgerConfig};

    fn build(intervention: Option<&str>) -> (Scene, ProximityLayout) {
        let f = Fixtures::default();
        let state = InteractionState::default();
        let layout = layout_proximity(
            &f.proximity_entities,
            &f.proximity_connections,
            intervention.and_then(|id| f.proximity_intervention(id)),
            &LedgerConfig::default(),
            &state,
        );
        (proximity_scene(&layout, &state), layout)
    }

    #[test]
    fn entity_beats_the_connections_that_end_on_it() {
        let (scene, layout) = build(None);
        let e = &layout.entities[0];
        assert_eq!(
            scene.hit_test(e.x + layout.margin.left, e.y + layout.margin.top),
            Some(&Binding::Entity(e.id.clone()))
        );
    }

    #[test]
    fn connection_midpoint_hits_a_connection() {
        let (scene, layout) = build(None);
        // f1 -> i1; the f1 -> c1 midpoint lands on i1 itself.
        let c = &layout.connections[2];
        let hit = scene.hit_test(
            (c.x1 + c.x2) / 2.0 + layout.margin.left,
            (c.y1 + c.y2) / 2.0 + layout.margin.top,
        );
        assert!(matches!(hit, Some(Binding::Connection(_))), "{hit:?}");
    }

    #[test]
    fn intervention_links_are_highlighted() {
        let (scene, _) = build(Some("int1"));
        let Some(Shape::Group { children, .. }) = scene.layer("connections").map(|l| &l.nodes[0].shape) else {
            panic!("connections group");
        };
        assert!(children.iter().any(|n| n.style.stroke.as_deref() == Some(GREEN)));
    }
}
