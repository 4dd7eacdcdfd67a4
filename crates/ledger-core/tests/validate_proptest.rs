use ledger_core::model::{FlowCategory, FlowGraph, FlowLink, FlowNode};
use ledger_core::{Error, validate_flow, value_totals};
use proptest::prelude::*;

/// Random DAGs: edges only go from a lower to a higher index.
fn dag_strategy() -> impl Strategy<Value = FlowGraph> {
    (2usize..12).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n, 0.0f64..100.0), 0..(n * 3));
        edges.prop_map(move |raw| {
            let nodes = (0..n)
                .map(|i| FlowNode {
                    id: format!("n{i}"),
                    name: format!("Node {i}"),
                    category: FlowCategory::Value,
                })
                .collect();
            let links = raw
                .into_iter()
                .filter(|(a, b, _)| a < b)
                .map(|(a, b, v)| FlowLink {
                    source: format!("n{a}"),
                    target: format!("n{b}"),
                    value: v,
                    description: String::new(),
                })
                .collect();
            FlowGraph { nodes, links }
        })
    })
}

proptest! {
    #[test]
    fn forward_only_graphs_validate(graph in dag_strategy()) {
        prop_assert!(validate_flow(&graph).is_ok());
    }

    #[test]
    fn adding_a_back_edge_to_a_path_is_a_cycle(graph in dag_strategy()) {
        let mut graph = graph;
        let n = graph.nodes.len();
        for i in 0..n - 1 {
            graph.links.push(FlowLink {
                source: format!("n{i}"),
                target: format!("n{}", i + 1),
                value: 1.0,
                description: String::new(),
            });
        }
        graph.links.push(FlowLink {
            source: format!("n{}", n - 1),
            target: "n0".to_string(),
            value: 1.0,
            description: String::new(),
        });
        let is_cycle = matches!(validate_flow(&graph), Err(Error::CyclicFlow { .. }));
        prop_assert!(is_cycle);
    }

    #[test]
    fn return_percentage_is_never_negative(graph in dag_strategy()) {
        let totals = value_totals(&graph, "n0", "n1");
        prop_assert!(totals.percentage_return >= 0);
        prop_assert!(totals.total_from_origin >= 0.0);
    }
}
