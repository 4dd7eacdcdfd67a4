//! Listening depth gauge: concentric half rings with a needle at the assessed level.

use crate::curve::{annulus_sector_path_d, polar};
use crate::interaction::InteractionState;
use crate::model::{GaugeLayout, GaugeRingLayout, LayoutPoint};
use crate::scene::Binding;
use crate::transition::{NEEDLE_MS, Spring, SpringAnimation};
use ledger_core::LedgerConfig;
use ledger_core::fixtures::Fixtures;
use ledger_core::model::{ListeningCaseStudy, ListeningLevel, OrganizationAssessment};
use std::f64::consts::PI;

pub const DEFAULT_LEVEL: u8 = 3;

/// Rounded mean of the assessment scores, clamped to `1..=5`; `3` without data.
pub fn average_level(assessment: Option<&OrganizationAssessment>) -> u8 {
    assessment
        .and_then(OrganizationAssessment::mean_score)
        .filter(|m| m.is_finite())
        .map(|m| m.round().clamp(1.0, 5.0) as u8)
        .unwrap_or(DEFAULT_LEVEL)
}

/// Needle angle in degrees for a level on the 1..=5 scale.
pub fn needle_angle_deg(level: f64) -> f64 {
    180.0 + (level.clamp(1.0, 5.0) - 1.0) / 4.0 * 180.0
}

/// Needle angle in degrees for a 0..=100 percentage.
pub fn needle_angle_for_percent(percent: f64) -> f64 {
    180.0 + percent.clamp(0.0, 100.0) / 100.0 * 180.0
}

pub fn ring_opacity(level: u8, average: u8, state: &InteractionState) -> f64 {
    let binding = Binding::Level(level);
    if state.is_hovered(&binding) || state.is_selected(&binding) {
        0.95
    } else if average >= level {
        0.7
    } else {
        0.25
    }
}

/// Level whose details are on show: the selection wins over the hover.
pub fn focused_level(state: &InteractionState) -> Option<u8> {
    [state.selected.as_ref(), state.hovered.as_ref()]
        .into_iter()
        .flatten()
        .find_map(|b| match b {
            Binding::Level(l) => Some(*l),
            _ => None,
        })
}

pub fn case_study_for<'a>(fixtures: &'a Fixtures, state: &InteractionState) -> Option<&'a ListeningCaseStudy> {
    focused_level(state).and_then(|level| fixtures.listening_case_study(level))
}

const SETTLE_EPSILON: f64 = 0.01;

/// The needle's angle over time. A new target retargets the spring from wherever the needle is,
/// so changing the assessment mid-swing never jumps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeedleState {
    animation: SpringAnimation,
}

impl NeedleState {
    /// Released from the resting 180° toward `target_deg` at `now_ms`.
    pub fn new(target_deg: f64, now_ms: f64) -> Self {
        Self {
            animation: SpringAnimation::new(Spring::default(), 180.0, target_deg, now_ms),
        }
    }

    pub fn for_assessment(assessment: Option<&OrganizationAssessment>, now_ms: f64) -> Self {
        Self::new(needle_angle_deg(average_level(assessment) as f64), now_ms)
    }

    pub fn target_deg(&self) -> f64 {
        self.animation.to
    }

    /// Returns whether the target changed.
    pub fn set_target(&mut self, now_ms: f64, target_deg: f64) -> bool {
        if target_deg == self.animation.to {
            return false;
        }
        self.animation.retarget(now_ms, target_deg);
        true
    }

    pub fn set_assessment(&mut self, now_ms: f64, assessment: Option<&OrganizationAssessment>) -> bool {
        self.set_target(now_ms, needle_angle_deg(average_level(assessment) as f64))
    }

    pub fn angle_at(&self, now_ms: f64) -> f64 {
        self.animation.value_at(now_ms)
    }

    /// True for at least the nominal needle duration after the last retarget, then until the
    /// spring comes to rest.
    pub fn is_animating(&self, now_ms: f64) -> bool {
        now_ms - self.animation.start_ms < NEEDLE_MS || !self.animation.is_settled(now_ms, SETTLE_EPSILON)
    }
}

pub fn layout_gauge(
    levels: &[ListeningLevel],
    assessment: Option<&OrganizationAssessment>,
    config: &LedgerConfig,
    state: &InteractionState,
) -> GaugeLayout {
    let size = config.f64_at(&["gauge", "size"], 400.0);
    let ring_width = config.f64_at(&["gauge", "ringWidth"], 32.0);
    let center = size / 2.0;
    let average = average_level(assessment);
    let n = levels.len();

    let rings = levels
        .iter()
        .enumerate()
        .map(|(i, level)| {
            let inner = (center - (n - i) as f64 * ring_width).max(0.0);
            let outer = inner + ring_width;
            let label_angle = PI + PI / n as f64 * i as f64;
            let (lx, ly) = polar(center, center, outer - ring_width / 2.0, label_angle);
            GaugeRingLayout {
                level: level.level,
                name: level.name.clone(),
                color: level.color.clone(),
                inner_radius: inner,
                outer_radius: outer,
                start_angle: PI,
                end_angle: 2.0 * PI,
                path: annulus_sector_path_d(center, center, inner, outer, PI, 2.0 * PI),
                label: LayoutPoint::new(lx, ly - 10.0),
                opacity: ring_opacity(level.level, average, state),
            }
        })
        .collect();

    let needle_angle = needle_angle_deg(average as f64);
    let needle_length = center - ring_width * 1.2;
    let (nx, ny) = polar(center, center, needle_length, needle_angle.to_radians());

    GaugeLayout {
        size,
        center,
        ring_width,
        average_level: average,
        needle_angle_deg: needle_angle,
        needle_length,
        needle_end: LayoutPoint::new(nx, ny),
        badge_radius: ring_width * 0.7,
        rings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::model::AssessmentDimension;

    fn assessment(scores: &[f64]) -> OrganizationAssessment {
        OrganizationAssessment {
            organization: "Test".to_string(),
            dimensions: scores
                .iter()
                .map(|&score| AssessmentDimension {
                    name: "d".to_string(),
                    score,
                })
                .collect(),
        }
    }

    #[test]
    fn average_defaults_to_three() {
        assert_eq!(average_level(None), 3);
        assert_eq!(average_level(Some(&assessment(&[]))), 3);
    }

    #[test]
    fn average_rounds_and_clamps() {
        assert_eq!(average_level(Some(&assessment(&[2.0, 3.0]))), 3);
        assert_eq!(average_level(Some(&assessment(&[4.4, 4.4]))), 4);
        assert_eq!(average_level(Some(&assessment(&[9.0]))), 5);
        assert_eq!(average_level(Some(&assessment(&[-2.0]))), 1);
    }

    #[test]
    fn needle_spans_the_upper_half() {
        assert_eq!(needle_angle_deg(1.0), 180.0);
        assert_eq!(needle_angle_deg(3.0), 270.0);
        assert_eq!(needle_angle_deg(5.0), 360.0);
        assert_eq!(needle_angle_for_percent(50.0), 270.0);
    }

    #[test]
    fn rings_nest_outward_by_level() {
        let fixtures = Fixtures::default();
        let g = layout_gauge(
            &fixtures.listening_levels,
            fixtures.assessment.as_ref(),
            &LedgerConfig::default(),
            &InteractionState::default(),
        );
        assert_eq!(g.rings.len(), 5);
        assert_eq!(g.rings[0].inner_radius, 40.0);
        assert_eq!(g.rings[4].outer_radius, 200.0);
        assert_eq!(g.needle_length, 200.0 - 32.0 * 1.2);
        for pair in g.rings.windows(2) {
            assert_eq!(pair[0].outer_radius, pair[1].inner_radius);
        }
    }

    #[test]
    fn hovered_ring_is_brightest() {
        let state = InteractionState {
            hovered: Some(Binding::Level(5)),
            ..InteractionState::default()
        };
        assert_eq!(ring_opacity(5, 3, &state), 0.95);
        assert_eq!(ring_opacity(2, 3, &state), 0.7);
        assert_eq!(ring_opacity(4, 3, &state), 0.25);
    }

    #[test]
    fn selection_beats_hover_for_case_studies() {
        let fixtures = Fixtures::default();
        let state = InteractionState {
            hovered: Some(Binding::Level(1)),
            selected: Some(Binding::Level(4)),
            ..InteractionState::default()
        };
        assert_eq!(focused_level(&state), Some(4));
        if let Some(cs) = case_study_for(&fixtures, &state) {
            assert_eq!(cs.level, 4);
        }
    }

    #[test]
    fn needle_swings_from_rest_and_settles() {
        let needle = NeedleState::new(315.0, 0.0);
        assert_eq!(needle.angle_at(0.0), 180.0);
        assert!(needle.angle_at(400.0) > 180.0);
        assert!(needle.is_animating(NEEDLE_MS - 1.0));
        assert!((needle.angle_at(5000.0) - 315.0).abs() < SETTLE_EPSILON);
        assert!(!needle.is_animating(5000.0));
    }

    #[test]
    fn needle_keeps_animating_while_overshooting() {
        let needle = NeedleState::new(360.0, 0.0);
        let at_nominal_end = needle.angle_at(NEEDLE_MS);
        assert!((at_nominal_end - 360.0).abs() > SETTLE_EPSILON, "{at_nominal_end}");
        assert!(needle.is_animating(NEEDLE_MS));
    }

    #[test]
    fn new_assessment_retargets_without_a_jump() {
        let mut needle = NeedleState::for_assessment(Some(&assessment(&[2.0])), 0.0);
        assert_eq!(needle.target_deg(), 225.0);
        let mid = needle.angle_at(150.0);
        assert!(mid > 180.0 && mid < 260.0, "{mid}");

        assert!(needle.set_assessment(150.0, Some(&assessment(&[4.0]))));
        assert_eq!(needle.target_deg(), 315.0);
        assert!((needle.angle_at(150.0) - mid).abs() < 1e-9);
        let mut prev = mid;
        for step in 1..=20 {
            let angle = needle.angle_at(150.0 + step as f64 * 5.0);
            assert!((angle - prev).abs() < 10.0, "step {step}: {prev} -> {angle}");
            prev = angle;
        }
        assert!((needle.angle_at(6000.0) - 315.0).abs() < SETTLE_EPSILON);
    }

    #[test]
    fn same_assessment_does_not_restart_the_swing() {
        let a = assessment(&[3.0]);
        let mut needle = NeedleState::for_assessment(Some(&a), 0.0);
        assert!(!needle.set_assessment(300.0, Some(&a)));
        assert_eq!(needle, NeedleState::for_assessment(Some(&a), 0.0));
    }
}
