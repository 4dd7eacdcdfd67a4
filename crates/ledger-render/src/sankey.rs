use crate::Result;
use crate::curve::link_horizontal_path_d;
use crate::model::{FlowLayout, FlowLinkLayout, FlowNodeLayout};
use ledger_core::model::{FlowGraph, FlowModel};
use ledger_core::{Fixtures, LedgerConfig, Margin, validate_flow};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
struct Node {
    index: usize,
    source_links: Vec<usize>,
    target_links: Vec<usize>,
    value: f64,
    depth: usize,
    height: usize,
    layer: usize,
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
}

impl Node {
    fn shift(&mut self, dy: f64) {
        self.y0 += dy;
        self.y1 += dy;
    }
}

#[derive(Debug, Clone)]
struct Link {
    index: usize,
    source: usize,
    target: usize,
    value: f64,
    width: f64,
    y0: f64,
    y1: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAlign {
    Left,
    Right,
    Justify,
    Center,
}

impl NodeAlign {
    fn from_config(cfg: &LedgerConfig) -> Self {
        match cfg.str_at(&["flow", "nodeAlignment"], "left") {
            "right" => NodeAlign::Right,
            "justify" => NodeAlign::Justify,
            "center" => NodeAlign::Center,
            _ => NodeAlign::Left,
        }
    }

    /// Column for `node` out of `count`, clamped into range.
    fn column(self, node: &Node, nodes: &[Node], links: &[Link], count: usize) -> usize {
        let last = count.saturating_sub(1) as i64;
        let raw = match self {
            NodeAlign::Left => node.depth as i64,
            NodeAlign::Right => last - node.height as i64,
            NodeAlign::Justify if node.source_links.is_empty() => last,
            NodeAlign::Justify => node.depth as i64,
            NodeAlign::Center if !node.target_links.is_empty() => node.depth as i64,
            NodeAlign::Center => node
                .source_links
                .iter()
                .map(|&li| nodes[links[li].target].depth as i64 - 1)
                .min()
                .unwrap_or(0),
        };
        raw.clamp(0, last) as usize
    }
}

/// Direction of a relaxation pass. Each node is pulled toward the links it receives in that
/// direction: incoming links going forward, outgoing links going backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    Forward,
    Backward,
}

impl Sweep {
    fn pulling(self, node: &Node) -> &[usize] {
        match self {
            Sweep::Forward => &node.target_links,
            Sweep::Backward => &node.source_links,
        }
    }

    fn pushing(self, node: &Node) -> &[usize] {
        match self {
            Sweep::Forward => &node.source_links,
            Sweep::Backward => &node.target_links,
        }
    }

    /// End of a pulling link that sits on the already-placed side.
    fn far_end(self, link: &Link) -> usize {
        match self {
            Sweep::Forward => link.source,
            Sweep::Backward => link.target,
        }
    }

    fn near_end(self, link: &Link) -> usize {
        match self {
            Sweep::Forward => link.target,
            Sweep::Backward => link.source,
        }
    }

    /// Column indices in visiting order; the first column forward and the last backward stay put.
    fn columns(self, count: usize) -> Vec<usize> {
        match self {
            Sweep::Forward => (1..count).collect(),
            Sweep::Backward => (0..count.saturating_sub(1)).rev().collect(),
        }
    }
}

fn f64_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Lays out the value-flow data set for `model`, tagging the result with it.
pub fn layout_value_flow(
    fixtures: &Fixtures,
    model: FlowModel,
    config: &LedgerConfig,
) -> Result<FlowLayout> {
    let mut layout = layout_flow(fixtures.flow(model), config)?;
    layout.model = Some(model);
    Ok(layout)
}

/// Positions nodes in columns and stacks links so that every link's width is `value * ky`.
///
/// The graph is validated first; a cycle fails with [`ledger_core::Error::CyclicFlow`].
pub fn layout_flow(graph: &FlowGraph, config: &LedgerConfig) -> Result<FlowLayout> {
    validate_flow(graph)?;

    let width = config.f64_at(&["flow", "width"], 900.0);
    let height = config.f64_at(&["flow", "height"], 600.0);
    let margin = Margin::from_config(config, "flow", 0.0);
    let inner_width = (width - margin.left - margin.right).max(0.0);
    let inner_height = (height - margin.top - margin.bottom).max(0.0);

    let dx = config.f64_at(&["flow", "nodeWidth"], 20.0).max(0.0);
    let dy = config.f64_at(&["flow", "nodePadding"], 10.0).max(0.0);
    let iterations = config.usize_at(&["flow", "iterations"], 6);
    let align = NodeAlign::from_config(config);

    let mut nodes: Vec<Node> = (0..graph.nodes.len())
        .map(|index| Node {
            index,
            ..Node::default()
        })
        .collect();

    // Endpoints were resolved by `validate_flow`.
    let node_by_id: FxHashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();
    let mut links: Vec<Link> = graph
        .links
        .iter()
        .enumerate()
        .map(|(index, l)| Link {
            index,
            source: node_by_id[l.source.as_str()],
            target: node_by_id[l.target.as_str()],
            value: l.value,
            width: 0.0,
            y0: 0.0,
            y1: 0.0,
        })
        .collect();
    for l in &links {
        nodes[l.source].source_links.push(l.index);
        nodes[l.target].target_links.push(l.index);
    }

    for n in &mut nodes {
        let out_sum: f64 = n.source_links.iter().map(|&li| links[li].value).sum();
        let in_sum: f64 = n.target_links.iter().map(|&li| links[li].value).sum();
        n.value = out_sum.max(in_sum);
    }

    assign_depths_and_heights(&mut nodes, &links);

    let column_count = nodes.iter().map(|n| n.depth).max().unwrap_or(0) + 1;
    let kx = if column_count <= 1 {
        0.0
    } else {
        ((inner_width - dx) / (column_count as f64 - 1.0)).max(0.0)
    };

    let mut columns: Vec<Vec<usize>> = vec![Vec::new(); column_count];
    for i in 0..nodes.len() {
        let layer = align.column(&nodes[i], &nodes, &links, column_count);
        let node = &mut nodes[i];
        node.layer = layer;
        node.x0 = layer as f64 * kx;
        node.x1 = node.x0 + dx;
        columns[layer].push(i);
    }

    let max_len = columns.iter().map(Vec::len).max().unwrap_or(0);
    let py = if max_len <= 1 {
        dy
    } else {
        dy.min(inner_height / (max_len as f64 - 1.0))
    };

    // One vertical scale for the whole diagram, set by the tightest column.
    let ky = columns
        .iter()
        .filter_map(|col| {
            let total: f64 = col.iter().map(|&ni| nodes[ni].value).sum();
            (!col.is_empty() && total > 0.0).then(|| (inner_height - (col.len() as f64 - 1.0) * py) / total)
        })
        .fold(f64::INFINITY, f64::min);
    let ky = if ky.is_finite() && ky >= 0.0 { ky } else { 0.0 };

    for l in &mut links {
        l.width = l.value * ky;
    }
    for col in &columns {
        stack_column(&mut nodes, col, ky, py, inner_height);
        reorder_links(&mut nodes, &links, col);
    }

    let extent = (0.0, inner_height);
    for i in 0..iterations {
        let alpha = 0.99_f64.powi(i as i32);
        let beta = (1.0 - alpha).max((i as f64 + 1.0) / iterations as f64);
        for sweep in [Sweep::Backward, Sweep::Forward] {
            relax(&mut nodes, &links, &mut columns, sweep, py, alpha, beta, extent);
        }
    }

    for node in &nodes {
        let mut y = node.y0;
        for &li in &node.source_links {
            links[li].y0 = y + links[li].width / 2.0;
            y += links[li].width;
        }
        let mut y = node.y0;
        for &li in &node.target_links {
            links[li].y1 = y + links[li].width / 2.0;
            y += links[li].width;
        }
    }

    let layout_nodes: Vec<FlowNodeLayout> = nodes
        .iter()
        .map(|n| {
            let src = &graph.nodes[n.index];
            FlowNodeLayout {
                id: src.id.clone(),
                name: src.name.clone(),
                category: src.category,
                index: n.index,
                depth: n.depth,
                height: n.height,
                layer: n.layer,
                value: n.value,
                x0: n.x0,
                x1: n.x1,
                y0: n.y0,
                y1: n.y1,
            }
        })
        .collect();

    let layout_links: Vec<FlowLinkLayout> = links
        .iter()
        .map(|l| {
            let src = &graph.links[l.index];
            FlowLinkLayout {
                index: l.index,
                source: src.source.clone(),
                target: src.target.clone(),
                value: l.value,
                description: src.description.clone(),
                width: l.width,
                y0: l.y0,
                y1: l.y1,
                path: link_horizontal_path_d(nodes[l.source].x1, l.y0, nodes[l.target].x0, l.y1),
            }
        })
        .collect();

    Ok(FlowLayout {
        model: None,
        width,
        height,
        margin,
        inner_width,
        inner_height,
        node_width: dx,
        node_padding: py,
        ky,
        nodes: layout_nodes,
        links: layout_links,
    })
}

/// Kahn order over the links. Every node appears because the graph is acyclic.
fn topological_order(nodes: &[Node], links: &[Link]) -> Vec<usize> {
    let mut pending: Vec<usize> = nodes.iter().map(|n| n.target_links.len()).collect();
    let mut ready: VecDeque<usize> = (0..nodes.len()).filter(|&i| pending[i] == 0).collect();
    let mut order = Vec::with_capacity(nodes.len());
    while let Some(i) = ready.pop_front() {
        order.push(i);
        for &li in &nodes[i].source_links {
            let t = links[li].target;
            pending[t] -= 1;
            if pending[t] == 0 {
                ready.push_back(t);
            }
        }
    }
    order
}

/// `depth` is the longest path from a source, `height` the longest path to a sink.
fn assign_depths_and_heights(nodes: &mut [Node], links: &[Link]) {
    let order = topological_order(nodes, links);
    for &i in &order {
        let depth = nodes[i]
            .target_links
            .iter()
            .map(|&li| nodes[links[li].source].depth + 1)
            .max()
            .unwrap_or(0);
        nodes[i].depth = depth;
    }
    for &i in order.iter().rev() {
        let height = nodes[i]
            .source_links
            .iter()
            .map(|&li| nodes[links[li].target].height + 1)
            .max()
            .unwrap_or(0);
        nodes[i].height = height;
    }
}

/// Stacks a column top-down, then spreads the leftover height evenly between its nodes.
fn stack_column(nodes: &mut [Node], column: &[usize], ky: f64, py: f64, inner_height: f64) {
    let mut y = 0.0;
    for &ni in column {
        let node = &mut nodes[ni];
        node.y0 = y;
        node.y1 = y + node.value * ky;
        y = node.y1 + py;
    }
    let gap = (inner_height - y + py) / (column.len() as f64 + 1.0);
    for (i, &ni) in column.iter().enumerate() {
        nodes[ni].shift(gap * (i as f64 + 1.0));
    }
}

fn sort_links_by_end_y0(node_y0: &[f64], links: &[Link], indices: &mut [usize], end: fn(&Link) -> usize) {
    indices.sort_by(|&a, &b| {
        f64_cmp(node_y0[end(&links[a])], node_y0[end(&links[b])])
            .then_with(|| links[a].index.cmp(&links[b].index))
    });
}

fn sort_node_links(nodes: &mut [Node], links: &[Link], node_y0: &[f64], ni: usize) {
    sort_links_by_end_y0(node_y0, links, &mut nodes[ni].source_links, |l| l.target);
    sort_links_by_end_y0(node_y0, links, &mut nodes[ni].target_links, |l| l.source);
}

fn reorder_links(nodes: &mut [Node], links: &[Link], column: &[usize]) {
    let node_y0: Vec<f64> = nodes.iter().map(|n| n.y0).collect();
    for &ni in column {
        sort_node_links(nodes, links, &node_y0, ni);
    }
}

/// Re-sorts the link stacks of every neighbour after `moved` changed position.
fn reorder_neighbour_links(nodes: &mut [Node], links: &[Link], moved: usize) {
    let node_y0: Vec<f64> = nodes.iter().map(|n| n.y0).collect();
    for li in nodes[moved].target_links.clone() {
        let source = links[li].source;
        sort_links_by_end_y0(&node_y0, links, &mut nodes[source].source_links, |l| l.target);
    }
    for li in nodes[moved].source_links.clone() {
        let target = links[li].target;
        sort_links_by_end_y0(&node_y0, links, &mut nodes[target].target_links, |l| l.source);
    }
}

/// Top `to` would need for the link from `from` to meet it flat, given both link stacks.
fn aligned_top(nodes: &[Node], links: &[Link], py: f64, sweep: Sweep, from: usize, to: usize) -> f64 {
    let fanned = sweep.pushing(&nodes[from]);
    let mut y = nodes[from].y0 - (fanned.len() as f64 - 1.0) * py / 2.0;
    for &li in fanned {
        if sweep.near_end(&links[li]) == to {
            break;
        }
        y += links[li].width + py;
    }
    for &li in sweep.pulling(&nodes[to]) {
        if sweep.far_end(&links[li]) == from {
            break;
        }
        y -= links[li].width;
    }
    y
}

#[allow(clippy::too_many_arguments)]
fn relax(
    nodes: &mut [Node],
    links: &[Link],
    columns: &mut [Vec<usize>],
    sweep: Sweep,
    py: f64,
    alpha: f64,
    beta: f64,
    extent: (f64, f64),
) {
    for c in sweep.columns(columns.len()) {
        for &ni in &columns[c] {
            let (mut y, mut w) = (0.0, 0.0);
            for &li in sweep.pulling(&nodes[ni]) {
                let link = &links[li];
                let span = nodes[link.target].layer as f64 - nodes[link.source].layer as f64;
                let v = link.value * span;
                y += aligned_top(nodes, links, py, sweep, sweep.far_end(link), ni) * v;
                w += v;
            }
            if w > 0.0 {
                let dy = (y / w - nodes[ni].y0) * alpha;
                nodes[ni].shift(dy);
                reorder_neighbour_links(nodes, links, ni);
            }
        }
        columns[c].sort_by(|&a, &b| f64_cmp(nodes[a].y0, nodes[b].y0).then_with(|| a.cmp(&b)));
        resolve_collisions(nodes, &columns[c], py, extent, beta);
    }
}

/// Moves nodes down until each starts `py` below the one above, beginning at `y`.
fn push_down(nodes: &mut [Node], column: &[usize], py: f64, mut y: f64, alpha: f64) {
    for &ni in column {
        let dy = (y - nodes[ni].y0) * alpha;
        if dy > 1e-6 {
            nodes[ni].shift(dy);
        }
        y = nodes[ni].y1 + py;
    }
}

/// Mirror of [`push_down`], walking upward from `y`.
fn push_up(nodes: &mut [Node], column: &[usize], py: f64, mut y: f64, alpha: f64) {
    for &ni in column.iter().rev() {
        let dy = (nodes[ni].y1 - y) * alpha;
        if dy > 1e-6 {
            nodes[ni].shift(-dy);
        }
        y = nodes[ni].y0 - py;
    }
}

/// Spreads overlapping nodes out from the middle one, then pulls the column inside `extent`.
fn resolve_collisions(nodes: &mut [Node], column: &[usize], py: f64, extent: (f64, f64), alpha: f64) {
    let mid = column.len() / 2;
    let Some(&subject) = column.get(mid) else {
        return;
    };
    let (top, bottom) = (nodes[subject].y0 - py, nodes[subject].y1 + py);
    push_up(nodes, &column[..mid], py, top, alpha);
    push_down(nodes, &column[mid + 1..], py, bottom, alpha);
    push_up(nodes, column, py, extent.1, alpha);
    push_down(nodes, column, py, extent.0, alpha);
}

/// Stroke colour for a link under the given model.
pub fn link_color(graph: &FlowGraph, model: Option<FlowModel>, source: &str, target: &str) -> &'static str {
    use ledger_core::model::FlowCategory;

    if let Some(FlowModel::Equitable) = model {
        let from_institution = graph
            .node(source)
            .is_some_and(|n| n.category == FlowCategory::Institution);
        if target == FlowModel::Equitable.return_node() && from_institution {
            return crate::color::PINK;
        }
    }
    if source == FlowModel::ORIGIN_NODE || target == FlowModel::ORIGIN_NODE {
        return crate::color::GREEN;
    }
    crate::color::GREY_300
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use ledger_core::model::{FlowCategory, FlowLink, FlowNode};

    fn graph(nodes: &[&str], links: &[(&str, &str, f64)]) -> FlowGraph {
        FlowGraph {
            nodes: nodes
                .iter()
                .map(|id| FlowNode {
                    id: id.to_string(),
                    name: id.to_string(),
                    category: FlowCategory::Value,
                })
                .collect(),
            links: links
                .iter()
                .map(|(s, t, v)| FlowLink {
                    source: s.to_string(),
                    target: t.to_string(),
                    value: *v,
                    description: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn two_branch_fan_out() {
        let g = graph(&["a", "b", "c"], &[("a", "b", 50.0), ("a", "c", 50.0)]);
        let layout = layout_flow(&g, &LedgerConfig::default()).expect("layout");
        let a = layout.node("a").expect("a");
        let b = layout.node("b").expect("b");
        let c = layout.node("c").expect("c");
        assert_eq!(a.layer, 0);
        assert_eq!((b.layer, c.layer), (1, 1));
        assert_eq!(b.x0, c.x0);
        assert_eq!(layout.links[0].width, layout.links[1].width);
        assert!((layout.links[0].width - 50.0 * layout.ky).abs() < 1e-9);
    }

    #[test]
    fn depth_and_height_follow_the_longest_path() {
        let g = graph(
            &["a", "b", "c", "d", "e"],
            &[("a", "b", 5.0), ("b", "c", 5.0), ("a", "c", 5.0), ("a", "d", 5.0), ("e", "c", 5.0)],
        );
        let layout = layout_flow(&g, &LedgerConfig::default()).expect("layout");
        let depth_height = |id: &str| {
            let n = layout.node(id).expect(id);
            (n.depth, n.height)
        };
        assert_eq!(depth_height("a"), (0, 2));
        assert_eq!(depth_height("b"), (1, 1));
        assert_eq!(depth_height("c"), (2, 0));
        assert_eq!(depth_height("d"), (1, 0));
        assert_eq!(depth_height("e"), (0, 1));
    }

    #[test]
    fn right_and_center_alignment_pull_sources_toward_their_targets() {
        let g = graph(
            &["a", "b", "c", "d", "e"],
            &[("a", "b", 5.0), ("b", "c", 5.0), ("a", "c", 5.0), ("a", "d", 5.0), ("e", "c", 5.0)],
        );
        let layer_of = |align: &str, id: &str| {
            let cfg = LedgerConfig::with_overrides(&serde_json::json!({"flow": {"nodeAlignment": align}}));
            layout_flow(&g, &cfg).expect("layout").node(id).expect(id).layer
        };
        assert_eq!(layer_of("right", "d"), 2);
        assert_eq!(layer_of("right", "e"), 1);
        assert_eq!(layer_of("center", "d"), 1);
        assert_eq!(layer_of("center", "e"), 1);
        assert_eq!(layer_of("left", "e"), 0);
    }

    #[test]
    fn columns_span_the_inner_width() {
        let layout = layout_flow(&Fixtures::default().traditional_flow, &LedgerConfig::default())
            .expect("layout");
        let max_x1 = layout.nodes.iter().map(|n| n.x1).fold(0.0, f64::max);
        assert!((max_x1 - layout.inner_width).abs() < 1e-9);
        assert_eq!(layout.inner_width, 840.0);
        assert_eq!(layout.inner_height, 550.0);
    }

    #[test]
    fn isolated_node_has_zero_height() {
        let g = graph(&["a", "b", "lonely"], &[("a", "b", 10.0)]);
        let layout = layout_flow(&g, &LedgerConfig::default()).expect("layout");
        let lonely = layout.node("lonely").expect("lonely");
        assert_eq!(lonely.y1 - lonely.y0, 0.0);
    }

    #[test]
    fn zero_valued_graph_does_not_panic() {
        let g = graph(&["a", "b"], &[("a", "b", 0.0)]);
        let layout = layout_flow(&g, &LedgerConfig::default()).expect("layout");
        assert_eq!(layout.ky, 0.0);
        assert!(layout.nodes.iter().all(|n| n.y1 == n.y0));
    }

    #[test]
    fn cycle_is_rejected_before_layout() {
        let g = graph(&["a", "b"], &[("a", "b", 1.0), ("b", "a", 1.0)]);
        assert!(matches!(
            layout_flow(&g, &LedgerConfig::default()),
            Err(Error::Core(ledger_core::Error::CyclicFlow { .. }))
        ));
    }

    #[test]
    fn justify_moves_sinks_to_last_column() {
        let g = graph(&["a", "b", "c", "d"], &[("a", "b", 5.0), ("b", "c", 5.0), ("a", "d", 5.0)]);
        let cfg = LedgerConfig::with_overrides(&serde_json::json!({"flow": {"nodeAlignment": "justify"}}));
        let layout = layout_flow(&g, &cfg).expect("layout");
        assert_eq!(layout.node("d").expect("d").layer, 2);
        let left = layout_flow(&g, &LedgerConfig::default()).expect("layout");
        assert_eq!(left.node("d").expect("d").layer, 1);
    }

    #[test]
    fn reciprocal_links_are_pink_only_in_the_equitable_model() {
        let fixtures = Fixtures::default();
        let g = &fixtures.equitable_flow;
        let back = g
            .links
            .iter()
            .find(|l| l.target == "storyteller_benefit")
            .expect("return link");
        assert_eq!(
            link_color(g, Some(FlowModel::Equitable), &back.source, &back.target),
            crate::color::PINK
        );
        assert_ne!(
            link_color(g, Some(FlowModel::Traditional), &back.source, &back.target),
            crate::color::PINK
        );
        assert_eq!(
            link_color(g, None, "storytellers", "financial"),
            crate::color::GREEN
        );
    }
}
