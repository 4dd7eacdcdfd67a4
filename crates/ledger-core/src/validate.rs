//! Referential and structural checks over fixture data.

use crate::fixtures::Fixtures;
use crate::model::{
    Checkpoint, FeedbackLoop, FlowGraph, JourneyStage, ListeningLevel, ProximityConnection,
    ProximityEntities, ProximityIntervention, SystemDimension,
};
use crate::{Error, Result};
use rustc_hash::{FxHashMap, FxHashSet};

/// Checks ids, link endpoints, link values and acyclicity, in that order.
pub fn validate_flow(graph: &FlowGraph) -> Result<()> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, n) in graph.nodes.iter().enumerate() {
        if index.insert(n.id.as_str(), i).is_some() {
            return Err(Error::DuplicateId {
                kind: "flow node",
                id: n.id.clone(),
            });
        }
    }

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); graph.nodes.len()];
    for l in &graph.links {
        let source = *index.get(l.source.as_str()).ok_or_else(|| Error::UnknownNode {
            kind: "flow link source",
            id: l.source.clone(),
        })?;
        let target = *index.get(l.target.as_str()).ok_or_else(|| Error::UnknownNode {
            kind: "flow link target",
            id: l.target.clone(),
        })?;
        if !l.value.is_finite() || l.value < 0.0 {
            return Err(Error::InvalidValue {
                field: format!("link {} -> {}", l.source, l.target),
                message: format!("value must be finite and non-negative, got {}", l.value),
            });
        }
        adjacency[source].push(target);
    }

    if let Some(node) = find_cycle(&adjacency) {
        return Err(Error::CyclicFlow {
            node: graph.nodes[node].id.clone(),
        });
    }
    Ok(())
}

/// Returns a node that lies on a directed cycle, if any.
fn find_cycle(adjacency: &[Vec<usize>]) -> Option<usize> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unseen,
        Active,
        Done,
    }

    let mut marks = vec![Mark::Unseen; adjacency.len()];
    let mut stack: Vec<(usize, usize)> = Vec::new();
    for root in 0..adjacency.len() {
        if marks[root] != Mark::Unseen {
            continue;
        }
        marks[root] = Mark::Active;
        stack.push((root, 0));
        while let Some(top) = stack.last_mut() {
            let (node, edge) = *top;
            top.1 += 1;
            if let Some(&child) = adjacency[node].get(edge) {
                match marks[child] {
                    Mark::Active => return Some(child),
                    Mark::Unseen => {
                        marks[child] = Mark::Active;
                        stack.push((child, 0));
                    }
                    Mark::Done => {}
                }
            } else {
                marks[node] = Mark::Done;
                stack.pop();
            }
        }
    }
    None
}

pub fn validate_levels(levels: &[ListeningLevel]) -> Result<()> {
    let mut seen = FxHashSet::default();
    for l in levels {
        if !(1..=5).contains(&l.level) {
            return Err(Error::InvalidValue {
                field: format!("listening level {}", l.name),
                message: format!("level must be within 1..=5, got {}", l.level),
            });
        }
        if !seen.insert(l.level) {
            return Err(Error::DuplicateId {
                kind: "listening level",
                id: l.level.to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_loops(dimensions: &[SystemDimension], loops: &[FeedbackLoop]) -> Result<()> {
    let ids: FxHashSet<&str> = dimensions.iter().map(|d| d.id.as_str()).collect();
    for l in loops {
        for c in &l.connections {
            if !ids.contains(c.as_str()) {
                return Err(Error::UnknownDimension {
                    loop_id: l.id.clone(),
                    dimension: c.clone(),
                });
            }
        }
    }
    Ok(())
}

pub fn validate_checkpoints(stages: &[JourneyStage], checkpoints: &[Checkpoint]) -> Result<()> {
    for c in checkpoints {
        if c.position == 0 || c.position >= stages.len() {
            return Err(Error::InvalidValue {
                field: format!("checkpoint {}", c.id),
                message: format!(
                    "position {} does not sit between two of {} stages",
                    c.position,
                    stages.len()
                ),
            });
        }
    }
    Ok(())
}

pub fn validate_proximity(
    entities: &ProximityEntities,
    connections: &[ProximityConnection],
    interventions: &[ProximityIntervention],
) -> Result<()> {
    let mut ids = FxHashSet::default();
    for e in entities.iter() {
        if !ids.insert(e.id.as_str()) {
            return Err(Error::DuplicateId {
                kind: "proximity entity",
                id: e.id.clone(),
            });
        }
    }
    let check = |kind: &'static str, id: &str| -> Result<()> {
        if ids.contains(id) {
            Ok(())
        } else {
            Err(Error::UnknownNode {
                kind,
                id: id.to_string(),
            })
        }
    };
    for c in connections {
        check("proximity connection", &c.source)?;
        check("proximity connection", &c.target)?;
    }
    for i in interventions {
        for t in &i.transformations {
            check("intervention transformation", &t.source)?;
            check("intervention transformation", &t.target)?;
        }
    }
    Ok(())
}

/// Runs every check against a full fixture bundle.
pub fn validate_fixtures(fixtures: &Fixtures) -> Result<()> {
    validate_flow(&fixtures.traditional_flow)?;
    validate_flow(&fixtures.equitable_flow)?;
    validate_levels(&fixtures.listening_levels)?;
    validate_loops(&fixtures.system_dimensions, &fixtures.feedback_loops)?;
    validate_checkpoints(&fixtures.journey_stages, &fixtures.checkpoints)?;
    validate_proximity(
        &fixtures.proximity_entities,
        &fixtures.proximity_connections,
        &fixtures.proximity_interventions,
    )?;
    Ok(())
}
