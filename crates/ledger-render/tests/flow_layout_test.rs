use ledger_core::LedgerConfig;
use ledger_core::model::{FlowCategory, FlowGraph, FlowLink, FlowNode};
use ledger_render::sankey::layout_flow;
use proptest::prelude::*;

fn node(id: &str) -> FlowNode {
    FlowNode {
        id: id.to_string(),
        name: id.to_uppercase(),
        category: FlowCategory::Institution,
    }
}

fn link(source: &str, target: &str, value: f64) -> FlowLink {
    FlowLink {
        source: source.to_string(),
        target: target.to_string(),
        value,
        description: String::new(),
    }
}

/// Random DAGs: links only run from a lower to a higher index.
fn dag_strategy() -> impl Strategy<Value = FlowGraph> {
    (2usize..10).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, 0.0f64..200.0), 1..(n * 3)).prop_map(move |raw| FlowGraph {
            nodes: (0..n).map(|i| node(&format!("n{i}"))).collect(),
            links: raw
                .into_iter()
                .filter(|(a, b, _)| a < b)
                .map(|(a, b, v)| link(&format!("n{a}"), &format!("n{b}"), v))
                .collect(),
        })
    })
}

proptest! {
    #[test]
    fn rectangles_stay_in_bounds_apart_and_hold_their_outgoing_links(graph in dag_strategy()) {
        let layout = layout_flow(&graph, &LedgerConfig::default()).expect("acyclic layout");
        for n in &layout.nodes {
            prop_assert!(n.x1 - n.x0 >= 0.0);
            prop_assert!(n.y1 - n.y0 >= 0.0);
            let outgoing: f64 = layout
                .links
                .iter()
                .filter(|l| l.source == n.id)
                .map(|l| l.width)
                .sum();
            prop_assert!(outgoing <= (n.y1 - n.y0) + 1e-6, "{} out {} > {}", n.id, outgoing, n.y1 - n.y0);
            prop_assert!(n.y0 >= -1e-6 && n.y1 <= layout.inner_height + 1e-6, "{} spans {}..{}", n.id, n.y0, n.y1);
        }
        for (i, a) in layout.nodes.iter().enumerate() {
            for b in layout.nodes.iter().skip(i + 1).filter(|b| b.layer == a.layer) {
                let overlap = a.y1.min(b.y1) - a.y0.max(b.y0);
                prop_assert!(overlap <= 1e-6, "{} and {} overlap by {}", a.id, b.id, overlap);
            }
        }
        for l in &layout.links {
            prop_assert!(l.width >= 0.0);
            prop_assert!((l.width - l.value * layout.ky).abs() < 1e-6);
        }
    }

    #[test]
    fn layout_is_deterministic(graph in dag_strategy()) {
        let cfg = LedgerConfig::default();
        let a = serde_json::to_string(&layout_flow(&graph, &cfg).expect("layout")).expect("json");
        let b = serde_json::to_string(&layout_flow(&graph, &cfg).expect("layout")).expect("json");
        prop_assert_eq!(a, b);
    }
}

#[test]
fn fan_out_places_source_left_and_children_in_the_next_column() {
    let graph = FlowGraph {
        nodes: vec![node("a"), node("b"), node("c")],
        links: vec![link("a", "b", 50.0), link("a", "c", 50.0)],
    };
    let layout = layout_flow(&graph, &LedgerConfig::default()).expect("layout");

    let a = layout.node("a").expect("a");
    let b = layout.node("b").expect("b");
    let c = layout.node("c").expect("c");
    assert_eq!(a.layer, 0);
    assert_eq!((b.layer, c.layer), (1, 1));
    assert_eq!(b.x0, c.x0);
    assert!(a.x1 <= b.x0);

    let widths: Vec<f64> = layout.links.iter().map(|l| l.width).collect();
    assert_eq!(widths.len(), 2);
    assert!((widths[0] - widths[1]).abs() < 1e-9);
    assert!((widths[0] - 50.0 * layout.ky).abs() < 1e-9);
}

#[test]
fn every_fixture_graph_lays_out() {
    let fixtures = ledger_core::Fixtures::default();
    for graph in [&fixtures.traditional_flow, &fixtures.equitable_flow] {
        let layout = layout_flow(graph, &LedgerConfig::default()).expect("layout");
        assert_eq!(layout.nodes.len(), graph.nodes.len());
        assert!(layout.links.iter().all(|l| l.path.starts_with('M')));
    }
}
