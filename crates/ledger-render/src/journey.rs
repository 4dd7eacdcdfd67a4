use crate::color::{Rgb, stage_color};
use crate::curve::curve_monotone_x_path_d;
use crate::interaction::InteractionState;
use crate::model::{AxisTick, CheckpointLayout, JourneyLayout, JourneyStageLayout, LayoutPoint};
use crate::scene::Binding;
use ledger_core::model::{Checkpoint, JourneyStage};
use ledger_core::{LedgerConfig, Margin};

pub const STAGE_RADIUS: f64 = 8.0;
pub const STAGE_HOVER_RADIUS: f64 = 12.0;
pub const CHECKPOINT_RADIUS: f64 = 6.0;
pub const CHECKPOINT_HOVER_RADIUS: f64 = 10.0;
pub const CHECKPOINT_LIFT: f64 = 30.0;

/// Evenly spaced positions with half a step of padding at each end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointScale {
    pub start: f64,
    pub step: f64,
}

impl PointScale {
    pub fn new(n: usize, width: f64, padding: f64) -> Self {
        let span = (n as f64 - 1.0 + 2.0 * padding).max(1.0);
        let step = width / span;
        let start = (width - step * (n.saturating_sub(1)) as f64) / 2.0;
        Self { start, step }
    }

    pub fn position(&self, i: usize) -> f64 {
        self.start + self.step * i as f64
    }
}

/// Level shown for the comparison line.
pub fn traditional_level(level: f64) -> f64 {
    (level - 40.0).max(5.0)
}

pub fn layout_journey(
    stages: &[JourneyStage],
    checkpoints: &[Checkpoint],
    config: &LedgerConfig,
    state: &InteractionState,
) -> JourneyLayout {
    let width = config.f64_at(&["journey", "width"], 800.0);
    let height = config.f64_at(&["journey", "height"], 500.0);
    let margin = Margin::from_config(config, "journey", 50.0);
    let inner_width = (width - margin.left - margin.right).max(0.0);
    let inner_height = (height - margin.top - margin.bottom).max(0.0);

    let xs = PointScale::new(stages.len(), inner_width, 0.5);
    let y = |level: f64| inner_height * (1.0 - level / 100.0);

    let stage_layouts: Vec<JourneyStageLayout> = stages
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let hovered = state.is_hovered(&Binding::Stage(s.id.clone()));
            JourneyStageLayout {
                id: s.id.clone(),
                name: s.name.clone(),
                kind: s.kind,
                level: s.sovereignty_level,
                x: xs.position(i),
                y: y(s.sovereignty_level),
                color: stage_color(s.kind).to_string(),
                radius: if hovered { STAGE_HOVER_RADIUS } else { STAGE_RADIUS },
            }
        })
        .collect();

    let main_points: Vec<LayoutPoint> = stage_layouts
        .iter()
        .map(|s| LayoutPoint::new(s.x, s.y))
        .collect();

    let traditional_points: Vec<LayoutPoint> = if state.compare_mode {
        stage_layouts
            .iter()
            .map(|s| LayoutPoint::new(s.x, y(traditional_level(s.level))))
            .collect()
    } else {
        Vec::new()
    };
    let traditional_path = state
        .compare_mode
        .then(|| curve_monotone_x_path_d(&traditional_points));

    let green = Rgb::new(16, 185, 129);
    let checkpoint_layouts = checkpoints
        .iter()
        .filter_map(|c| {
            let start = c.position.checked_sub(1)?;
            let (a, b) = (stage_layouts.get(start)?, stage_layouts.get(c.position)?);
            let hovered = state.is_hovered(&Binding::Checkpoint(c.id.clone()));
            Some(CheckpointLayout {
                id: c.id.clone(),
                name: c.name.clone(),
                description: c.description.clone(),
                x: (a.x + b.x) / 2.0,
                y: (a.y + b.y) / 2.0 - CHECKPOINT_LIFT,
                fill: green.rgba(c.effectiveness / 100.0),
                radius: if hovered {
                    CHECKPOINT_HOVER_RADIUS
                } else {
                    CHECKPOINT_RADIUS
                },
                effectiveness: c.effectiveness,
            })
        })
        .collect();

    let x_ticks = stage_layouts
        .iter()
        .map(|s| AxisTick {
            position: s.x,
            label: s.id.clone(),
        })
        .collect();
    let y_ticks = (0..=5)
        .map(|i| {
            let v = (i * 20) as f64;
            AxisTick {
                position: y(v),
                label: format!("{}%", i * 20),
            }
        })
        .collect();

    JourneyLayout {
        width,
        height,
        margin,
        inner_width,
        inner_height,
        main_path: curve_monotone_x_path_d(&main_points),
        stages: stage_layouts,
        traditional_points,
        traditional_path,
        checkpoints: checkpoint_layouts,
        x_ticks,
        y_ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::Fixtures;

    #[test]
    fn point_scale_pads_half_a_step() {
        let s = PointScale::new(4, 800.0, 0.5);
        assert_eq!(s.step, 200.0);
        assert_eq!(s.position(0), 100.0);
        assert_eq!(s.position(3), 700.0);
        let single = PointScale::new(1, 800.0, 0.5);
        assert_eq!(single.position(0), 400.0);
    }

    #[test]
    fn traditional_level_is_floored_at_five() {
        assert_eq!(traditional_level(90.0), 50.0);
        assert_eq!(traditional_level(20.0), 5.0);
    }

    #[test]
    fn checkpoints_sit_between_their_stages() {
        let f = Fixtures::default();
        let layout = layout_journey(
            &f.journey_stages,
            &f.checkpoints,
            &LedgerConfig::default(),
            &InteractionState::default(),
        );
        assert_eq!(layout.checkpoints.len(), f.checkpoints.len());
        let c = &f.checkpoints[0];
        let cl = &layout.checkpoints[0];
        let (a, b) = (&layout.stages[c.position - 1], &layout.stages[c.position]);
        assert_eq!(cl.x, (a.x + b.x) / 2.0);
        assert_eq!(cl.y, (a.y + b.y) / 2.0 - 30.0);
        assert!(cl.fill.starts_with("rgba(16, 185, 129, "));
    }

    #[test]
    fn out_of_range_checkpoint_is_skipped() {
        let f = Fixtures::default();
        let mut cps = f.checkpoints.clone();
        cps[0].position = 0;
        cps[1].position = f.journey_stages.len();
        let layout = layout_journey(
            &f.journey_stages,
            &cps,
            &LedgerConfig::default(),
            &InteractionState::default(),
        );
        assert_eq!(layout.checkpoints.len(), cps.len() - 2);
    }

    #[test]
    fn compare_mode_adds_the_dashed_line() {
        let f = Fixtures::default();
        let cfg = LedgerConfig::default();
        let plain = layout_journey(&f.journey_stages, &[], &cfg, &InteractionState::default());
        assert!(plain.traditional_path.is_none());
        let state = InteractionState {
            compare_mode: true,
            ..InteractionState::default()
        };
        let cmp = layout_journey(&f.journey_stages, &[], &cfg, &state);
        assert!(cmp.traditional_path.is_some());
        assert_eq!(cmp.traditional_points.len(), f.journey_stages.len());
    }

    #[test]
    fn y_axis_ticks_every_twenty_percent() {
        let f = Fixtures::default();
        let layout = layout_journey(
            &f.journey_stages,
            &[],
            &LedgerConfig::default(),
            &InteractionState::default(),
        );
        let labels: Vec<_> = layout.y_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["0%", "20%", "40%", "60%", "80%", "100%"]);
        assert_eq!(layout.y_ticks[0].position, 400.0);
    }
}
