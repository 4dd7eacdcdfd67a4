use crate::fixtures::Fixtures;
use crate::model::{FlowGraph, FlowModel};
use serde::{Deserialize, Serialize};

/// How much of the value generated at an origin node comes back to a return node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueTotals {
    pub total_from_origin: f64,
    pub total_to_return: f64,
    /// Rounded to a whole percent; `0` when the origin generates nothing.
    pub percentage_return: i64,
}

pub fn value_totals(graph: &FlowGraph, origin: &str, return_node: &str) -> ValueTotals {
    let total_to_return: f64 = graph
        .links
        .iter()
        .filter(|l| l.target == return_node)
        .map(|l| l.value)
        .sum();
    let total_from_origin: f64 = graph
        .links
        .iter()
        .filter(|l| l.source == origin)
        .map(|l| l.value)
        .sum();
    let percentage_return = if total_from_origin > 0.0 {
        (total_to_return / total_from_origin * 100.0).round() as i64
    } else {
        0
    };
    ValueTotals {
        total_from_origin,
        total_to_return,
        percentage_return,
    }
}

impl FlowModel {
    pub fn totals(self, fixtures: &Fixtures) -> ValueTotals {
        value_totals(
            fixtures.flow(self),
            FlowModel::ORIGIN_NODE,
            self.return_node(),
        )
    }
}
