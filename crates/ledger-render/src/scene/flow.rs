use super::{Binding, HitArea, Layer, Scene, SceneNode, Shape, Style, TextAnchor, Transform, sample_cubic};
use crate::color::{GREY_600, flow_category_color};
use crate::interaction::InteractionState;
use crate::model::{FlowLayout, LayoutPoint};
use crate::sankey::link_color;
use crate::transition::HOVER_MS;
use ledger_core::model::FlowGraph;

const LINK_SAMPLES: usize = 16;

pub fn flow_scene(layout: &FlowLayout, graph: &FlowGraph, state: &InteractionState) -> Scene {
    let title = match layout.model {
        Some(model) => format!("Value flow: {}", model.title()),
        None => "Value flow".to_string(),
    };
    let mut scene = Scene::new(layout.width, layout.height, &title);
    let (ox, oy) = (layout.margin.left, layout.margin.top);
    let shift = Transform::translate(ox, oy);

    let mut links = Vec::with_capacity(layout.links.len());
    for link in &layout.links {
        let (Some(source), Some(target)) = (layout.node(&link.source), layout.node(&link.target))
        else {
            continue;
        };
        let binding = Binding::FlowLink(link.index);
        let active = state.is_active(&binding);
        let (stroke_width, opacity) = if active {
            (link.width + 2.0, 1.0)
        } else {
            (link.width.max(1.0), 0.7)
        };
        let x0 = source.x1 + ox;
        let x1 = target.x0 + ox;
        let mx = (x0 + x1) / 2.0;
        let points = sample_cubic(
            LayoutPoint::new(x0, link.y0 + oy),
            LayoutPoint::new(mx, link.y0 + oy),
            LayoutPoint::new(mx, link.y1 + oy),
            LayoutPoint::new(x1, link.y1 + oy),
            LINK_SAMPLES,
        );
        links.push(
            SceneNode::new(
                Shape::path(link.path.clone()),
                Style::default()
                    .class("link")
                    .fill("none")
                    .stroke(link_color(graph, layout.model, &link.source, &link.target), stroke_width)
                    .opacity(opacity)
                    .transition(HOVER_MS),
            )
            .bind(binding)
            .hit(HitArea::Polyline {
                points,
                tolerance: (link.width / 2.0).max(3.0),
            }),
        );
    }

    let mut nodes = Vec::with_capacity(layout.nodes.len());
    let mut labels = Vec::with_capacity(layout.nodes.len());
    for node in &layout.nodes {
        let binding = Binding::FlowNode(node.id.clone());
        let active = state.is_active(&binding);
        let (w, h) = (node.x1 - node.x0, node.y1 - node.y0);
        nodes.push(
            SceneNode::new(
                Shape::rect(node.x0, node.y0, w, h),
                Style::default()
                    .class("node")
                    .fill(flow_category_color(node.category))
                    .stroke("#000", if active { 2.0 } else { 0.5 })
                    .transition(HOVER_MS),
            )
            .bind(binding)
            .hit(HitArea::Rect {
                x: node.x0 + ox,
                y: node.y0 + oy,
                width: w,
                height: h,
            }),
        );

        let left_half = node.x0 < layout.inner_width / 2.0;
        let (x, anchor) = if left_half {
            (node.x1 + 6.0, TextAnchor::Start)
        } else {
            (node.x0 - 6.0, TextAnchor::End)
        };
        labels.push(SceneNode::new(
            Shape::text(x, (node.y0 + node.y1) / 2.0, node.name.clone(), anchor),
            Style::default()
                .fill(GREY_600)
                .font(10.0)
                .baseline("middle")
                .passive(),
        ));
    }

    for (name, priority, children) in [("links", 1, links), ("nodes", 0, nodes), ("labels", -1, labels)] {
        let mut layer = Layer::new(name, priority);
        layer.push(SceneNode::new(Shape::group(shift, children), Style::default()));
        scene.layers.push(layer);
    }
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sankey::layout_value_flow;
    use ledger_core::model::FlowModel;
    use ledger_core::{Fixtures, LedgerConfig};

    fn scene_for(state: &InteractionState) -> (Scene, FlowLayout) {
        let fixtures = Fixtures::default();
        let layout =
            layout_value_flow(&fixtures, FlowModel::Equitable, &LedgerConfig::default()).expect("layout");
        (flow_scene(&layout, fixtures.flow(FlowModel::Equitable), state), layout)
    }

    #[test]
    fn node_centres_hit_their_node() {
        let (scene, layout) = scene_for(&InteractionState::default());
        for node in layout.nodes.iter().filter(|n| n.y1 - n.y0 > 2.0) {
            let x = (node.x0 + node.x1) / 2.0 + layout.margin.left;
            let y = (node.y0 + node.y1) / 2.0 + layout.margin.top;
            // A link may overlap the node edge, never its centre column.
            let hit = scene.hit_test(x, y);
            assert!(
                matches!(hit, Some(Binding::FlowNode(id)) if *id == node.id)
                    || matches!(hit, Some(Binding::FlowLink(_))),
                "{} -> {hit:?}",
                node.id
            );
        }
    }

    #[test]
    fn link_midpoint_hits_the_link() {
        let (scene, layout) = scene_for(&InteractionState::default());
        let link = &layout.links[0];
        let source = layout.node(&link.source).expect("source");
        let target = layout.node(&link.target).expect("target");
        let x = (source.x1 + target.x0) / 2.0 + layout.margin.left;
        let y = (link.y0 + link.y1) / 2.0 + layout.margin.top;
        assert!(matches!(scene.hit_test(x, y), Some(Binding::FlowLink(_))));
    }

    #[test]
    fn hovered_link_is_thicker_and_opaque() {
        let state = InteractionState {
            hovered: Some(Binding::FlowLink(0)),
            ..InteractionState::default()
        };
        let (scene, layout) = scene_for(&state);
        let Some(Shape::Group { children, .. }) = scene.layer("links").map(|l| &l.nodes[0].shape) else {
            panic!("links group");
        };
        let hovered = children
            .iter()
            .find(|n| n.binding == Some(Binding::FlowLink(0)))
            .expect("link 0");
        let width = layout.links.iter().find(|l| l.index == 0).expect("layout link 0").width;
        assert_eq!(hovered.style.opacity, Some(1.0));
        assert_eq!(hovered.style.stroke_width, Some(width + 2.0));
    }
}
