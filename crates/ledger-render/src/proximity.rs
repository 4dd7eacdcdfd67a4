//! Proximity cartography: how many hops separate funders from the communities they fund.

use crate::interaction::InteractionState;
use crate::model::{ConnectionLayout, EntityLayout, ProximityLayout};
use crate::scene::Binding;
use ledger_core::model::{ProximityConnection, ProximityEntities, ProximityEntity, ProximityIntervention};
use ledger_core::{LedgerConfig, Margin};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Column of each category, as a fraction of the inner width.
const COLUMN_X: [f64; 3] = [1.0 / 6.0, 0.5, 5.0 / 6.0];

pub fn entity_radius(size: f64) -> f64 {
    size.max(0.0).sqrt() * 3.0
}

pub fn stroke_width(strength: f64) -> f64 {
    1.0 + 4.0 * strength.clamp(0.0, 1.0)
}

pub fn connection_opacity(strength: f64) -> f64 {
    strength.clamp(0.0, 1.0).max(0.15)
}

/// Connections after an intervention: matching pairs take the new strength, the rest are added
/// as direct links. Returns the indices that changed or were added.
pub fn apply_intervention(
    connections: &[ProximityConnection],
    intervention: &ProximityIntervention,
) -> (Vec<ProximityConnection>, FxHashSet<usize>) {
    let mut out = connections.to_vec();
    let mut touched = FxHashSet::default();
    for change in &intervention.transformations {
        let existing = out
            .iter()
            .position(|c| c.source == change.source && c.target == change.target);
        match existing {
            Some(i) => {
                out[i].strength = change.new_strength;
                touched.insert(i);
            }
            None => {
                touched.insert(out.len());
                out.push(ProximityConnection {
                    source: change.source.clone(),
                    target: change.target.clone(),
                    strength: change.new_strength,
                    direct: true,
                });
            }
        }
    }
    (out, touched)
}

/// Average number of hops from each foundation to each community it can reach, following
/// connections in either direction. `None` when no community is reachable.
pub fn mean_distance(entities: &ProximityEntities, connections: &[ProximityConnection]) -> Option<f64> {
    let mut adjacency: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    for c in connections {
        adjacency.entry(c.source.as_str()).or_default().push(c.target.as_str());
        adjacency.entry(c.target.as_str()).or_default().push(c.source.as_str());
    }
    let communities: FxHashSet<&str> = entities.communities.iter().map(|e| e.id.as_str()).collect();

    let mut total = 0usize;
    let mut count = 0usize;
    for foundation in &entities.foundations {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut queue = VecDeque::new();
        seen.insert(foundation.id.as_str());
        queue.push_back((foundation.id.as_str(), 0usize));
        while let Some((node, hops)) = queue.pop_front() {
            if communities.contains(node) {
                total += hops;
                count += 1;
            }
            for &next in adjacency.get(node).map(Vec::as_slice).unwrap_or_default() {
                if seen.insert(next) {
                    queue.push_back((next, hops + 1));
                }
            }
        }
    }
    (count > 0).then(|| total as f64 / count as f64)
}

fn column_layouts(
    column: &[ProximityEntity],
    x: f64,
    inner_height: f64,
) -> impl Iterator<Item = EntityLayout> + '_ {
    let n = column.len();
    column.iter().enumerate().map(move |(i, e)| EntityLayout {
        id: e.id.clone(),
        name: e.name.clone(),
        category: e.category,
        x,
        y: inner_height * (i as f64 + 1.0) / (n as f64 + 1.0),
        radius: entity_radius(e.size),
        color: if e.color.is_empty() {
            crate::color::entity_fallback_color(e.category).to_string()
        } else {
            e.color.clone()
        },
    })
}

pub fn layout_proximity(
    entities: &ProximityEntities,
    connections: &[ProximityConnection],
    intervention: Option<&ProximityIntervention>,
    config: &LedgerConfig,
    state: &InteractionState,
) -> ProximityLayout {
    let width = config.f64_at(&["proximity", "width"], 800.0);
    let height = config.f64_at(&["proximity", "height"], 600.0);
    let margin = Margin::from_config(config, "proximity", 40.0);
    let inner_width = (width - margin.left - margin.right).max(0.0);
    let inner_height = (height - margin.top - margin.bottom).max(0.0);

    let entity_layouts: Vec<EntityLayout> = column_layouts(&entities.foundations, inner_width * COLUMN_X[0], inner_height)
        .chain(column_layouts(&entities.intermediaries, inner_width * COLUMN_X[1], inner_height))
        .chain(column_layouts(&entities.communities, inner_width * COLUMN_X[2], inner_height))
        .collect();

    let (effective, touched) = match intervention {
        Some(i) => apply_intervention(connections, i),
        None => (connections.to_vec(), FxHashSet::default()),
    };

    let position: FxHashMap<&str, (f64, f64)> = entity_layouts
        .iter()
        .map(|e| (e.id.as_str(), (e.x, e.y)))
        .collect();
    let connection_layouts = effective
        .iter()
        .enumerate()
        .filter_map(|(index, c)| {
            let (x1, y1) = *position.get(c.source.as_str())?;
            let (x2, y2) = *position.get(c.target.as_str())?;
            let active = state.is_hovered(&Binding::Connection(index));
            Some(ConnectionLayout {
                index,
                source: c.source.clone(),
                target: c.target.clone(),
                strength: c.strength,
                direct: c.direct,
                x1,
                y1,
                x2,
                y2,
                stroke_width: stroke_width(c.strength) + if active { 2.0 } else { 0.0 },
                opacity: if active { 1.0 } else { connection_opacity(c.strength) },
                transformed: touched.contains(&index),
            })
        })
        .collect();

    ProximityLayout {
        width,
        height,
        margin,
        inner_width,
        inner_height,
        intervention: intervention.map(|i| i.id.clone()),
        entities: entity_layouts,
        connections: connection_layouts,
        mean_distance: mean_distance(entities, &effective),
    }
}
