use crate::color::loop_color;
use crate::curve::curve_cardinal_path_d;
use crate::model::{ArrowLayout, DimensionWheelLayout, LayoutPoint, LoopLayout};
use crate::Result;
use ledger_core::Error as CoreError;
use ledger_core::model::FeedbackLoop;
use serde::{Deserialize, Serialize};

pub const LOOP_TENSION: f64 = 0.8;
pub const ARROW_POINTS: &str = "0,-5 10,0 0,5";
/// Fraction of each segment at which its arrowhead sits.
pub const ARROW_AT: f64 = 0.75;

/// What to do when a loop names a dimension that is not on the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DanglingPolicy {
    Strict,
    Lenient,
}

impl Default for DanglingPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            DanglingPolicy::Strict
        } else {
            DanglingPolicy::Lenient
        }
    }
}

impl DanglingPolicy {
    pub fn from_config(cfg: &ledger_core::LedgerConfig) -> Self {
        match cfg.str_at(&["systems", "danglingPolicy"], "") {
            "strict" => DanglingPolicy::Strict,
            "lenient" => DanglingPolicy::Lenient,
            _ => DanglingPolicy::default(),
        }
    }
}

pub fn arrows_for(points: &[LayoutPoint]) -> Vec<ArrowLayout> {
    points
        .windows(2)
        .map(|pair| {
            let (p1, p2) = (pair[0], pair[1]);
            let dx = p2.x - p1.x;
            let dy = p2.y - p1.y;
            ArrowLayout {
                x: p1.x + dx * ARROW_AT,
                y: p1.y + dy * ARROW_AT,
                angle_deg: dy.atan2(dx).to_degrees(),
            }
        })
        .collect()
}

pub fn layout_loop(
    feedback_loop: &FeedbackLoop,
    wheel: &DimensionWheelLayout,
    policy: DanglingPolicy,
) -> Result<LoopLayout> {
    let mut points = Vec::with_capacity(feedback_loop.connections.len());
    for id in &feedback_loop.connections {
        match wheel.node(id) {
            Some(node) => points.push(LayoutPoint::new(node.x, node.y)),
            None => match policy {
                DanglingPolicy::Strict => {
                    return Err(CoreError::UnknownDimension {
                        loop_id: feedback_loop.id.clone(),
                        dimension: id.clone(),
                    }
                    .into());
                }
                DanglingPolicy::Lenient => {
                    tracing::warn!(
                        loop_id = %feedback_loop.id,
                        dimension = %id,
                        "feedback loop references an unknown dimension; skipping it"
                    );
                }
            },
        }
    }

    let (path, arrows) = if points.len() > 1 {
        (
            Some(curve_cardinal_path_d(&points, LOOP_TENSION)),
            arrows_for(&points),
        )
    } else {
        (None, Vec::new())
    };

    Ok(LoopLayout {
        id: feedback_loop.id.clone(),
        name: feedback_loop.name.clone(),
        reinforcing: feedback_loop.reinforcing,
        color: loop_color(feedback_loop.reinforcing).to_string(),
        points,
        path,
        arrows,
    })
}

pub fn layout_loops(
    loops: &[FeedbackLoop],
    wheel: &DimensionWheelLayout,
    policy: DanglingPolicy,
) -> Result<Vec<LoopLayout>> {
    loops.iter().map(|l| layout_loop(l, wheel, policy)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::InteractionState;
    use crate::radial::layout_dimension_wheel;
    use ledger_core::{Fixtures, LedgerConfig};

    fn wheel(fixtures: &Fixtures) -> DimensionWheelLayout {
        layout_dimension_wheel(
            &fixtures.system_dimensions,
            &LedgerConfig::default(),
            &InteractionState::default(),
        )
    }

    fn broken_loop(fixtures: &Fixtures) -> FeedbackLoop {
        let mut l = fixtures.feedback_loops[0].clone();
        l.connections.insert(1, "missing_dimension".to_string());
        l
    }

    #[test]
    fn every_default_loop_has_a_path_and_arrows() {
        let fixtures = Fixtures::default();
        let w = wheel(&fixtures);
        let loops = layout_loops(&fixtures.feedback_loops, &w, DanglingPolicy::Strict).expect("loops");
        for (layout, source) in loops.iter().zip(&fixtures.feedback_loops) {
            assert!(layout.path.is_some());
            assert_eq!(layout.arrows.len(), source.connections.len() - 1);
        }
    }

    #[test]
    fn strict_policy_reports_the_missing_dimension() {
        let fixtures = Fixtures::default();
        let err = layout_loop(&broken_loop(&fixtures), &wheel(&fixtures), DanglingPolicy::Strict)
            .expect_err("dangling id");
        assert!(err.to_string().contains("missing_dimension"), "{err}");
    }

    #[test]
    fn lenient_policy_skips_the_missing_dimension() {
        let fixtures = Fixtures::default();
        let l = broken_loop(&fixtures);
        let layout = layout_loop(&l, &wheel(&fixtures), DanglingPolicy::Lenient).expect("lenient");
        assert_eq!(layout.points.len(), l.connections.len() - 1);
    }

    #[test]
    fn single_point_draws_nothing() {
        let fixtures = Fixtures::default();
        let mut l = fixtures.feedback_loops[0].clone();
        l.connections.truncate(1);
        let layout = layout_loop(&l, &wheel(&fixtures), DanglingPolicy::Strict).expect("layout");
        assert!(layout.path.is_none());
        assert!(layout.arrows.is_empty());
    }

    #[test]
    fn arrows_sit_three_quarters_along_and_face_forward() {
        let arrows = arrows_for(&[LayoutPoint::new(0.0, 0.0), LayoutPoint::new(0.0, 100.0)]);
        assert_eq!(arrows[0].x, 0.0);
        assert_eq!(arrows[0].y, 75.0);
        assert_eq!(arrows[0].angle_deg, 90.0);
    }
}
