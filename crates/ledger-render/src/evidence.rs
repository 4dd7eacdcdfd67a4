//! Ensemble evidence explorer: three overlapping evidence types with case-study and approach
//! markers around them.

use crate::color::evidence_color;
use crate::interaction::InteractionState;
use crate::model::{EvidenceCircleLayout, EvidenceLayout, MarkerLayout};
use crate::scene::Binding;
use ledger_core::model::{EvidenceCaseStudy, EvidenceKind, IntegrationApproach};
use ledger_core::{Fixtures, LedgerConfig, Margin};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const APPROACH_SPACING: f64 = 100.0;
pub const CASE_MARKER_RADIUS: f64 = 25.0;

/// Which panel of the explorer is open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", content = "id", rename_all = "camelCase")]
pub enum EvidenceView {
    #[default]
    Overview,
    CaseStudy(String),
    Approach(String),
}

impl EvidenceView {
    pub fn is_overview(&self) -> bool {
        matches!(self, EvidenceView::Overview)
    }

    pub fn case_study<'a>(&self, fixtures: &'a Fixtures) -> Option<&'a EvidenceCaseStudy> {
        match self {
            EvidenceView::CaseStudy(id) => fixtures.evidence_case_study(id),
            _ => None,
        }
    }

    pub fn approach<'a>(&self, fixtures: &'a Fixtures) -> Option<&'a IntegrationApproach> {
        match self {
            EvidenceView::Approach(id) => fixtures.integration_approach(id),
            _ => None,
        }
    }
}

fn circle_center(kind: EvidenceKind, cx: f64, cy: f64, r: f64) -> (f64, f64) {
    match kind {
        EvidenceKind::Quantitative => (cx - r * 0.75, cy - r * 0.5),
        EvidenceKind::Qualitative => (cx + r * 0.75, cy - r * 0.5),
        EvidenceKind::Narrative => (cx, cy + r),
    }
}

/// Dashed lens in the middle of the three circles.
fn intersection_path(cx: f64, cy: f64, r: f64) -> String {
    use crate::util::fmt;
    format!(
        "M{},{}C{},{},{},{},{},{}C{},{},{},{},{},{}Z",
        fmt(cx - r * 0.2),
        fmt(cy - r * 0.2),
        fmt(cx - r * 0.3),
        fmt(cy - r * 0.3),
        fmt(cx + r * 0.3),
        fmt(cy - r * 0.3),
        fmt(cx + r * 0.2),
        fmt(cy - r * 0.2),
        fmt(cx + r * 0.3),
        fmt(cy),
        fmt(cx),
        fmt(cy + r * 0.3),
        fmt(cx - r * 0.2),
        fmt(cy - r * 0.2),
    )
}

pub fn layout_evidence(
    case_studies: &[EvidenceCaseStudy],
    approaches: &[IntegrationApproach],
    config: &LedgerConfig,
    state: &InteractionState,
) -> EvidenceLayout {
    let width = config.f64_at(&["evidence", "width"], 800.0);
    let height = config.f64_at(&["evidence", "height"], 500.0);
    let margin = Margin::from_config(config, "evidence", 40.0);
    let inner_width = (width - margin.left - margin.right).max(0.0);
    let inner_height = (height - margin.top - margin.bottom).max(0.0);
    let cx = inner_width / 2.0;
    let cy = inner_height / 2.0;
    let radius = inner_width.min(inner_height) * 0.25;

    let circles = EvidenceKind::ALL
        .iter()
        .map(|&kind| {
            let (x, y) = circle_center(kind, cx, cy, radius);
            let hovered = state.is_hovered(&Binding::EvidenceType(kind));
            let color = evidence_color(kind);
            EvidenceCircleLayout {
                kind,
                x,
                y,
                radius: radius * if hovered { 0.75 } else { 0.6 },
                color: color.to_string(),
                fill: format!("{color}30"),
            }
        })
        .collect();

    let n = case_studies.len();
    let case_markers = case_studies
        .iter()
        .enumerate()
        .map(|(i, cs)| {
            let angle = i as f64 / n as f64 * PI * 2.0;
            MarkerLayout {
                id: cs.id.clone(),
                title: cs.title.clone(),
                label: format!("Case {}", i + 1),
                x: cx + angle.cos() * radius * 1.2,
                y: cy + angle.sin() * radius * 1.2,
            }
        })
        .collect();

    let m = approaches.len();
    let approach_markers = approaches
        .iter()
        .enumerate()
        .map(|(i, a)| MarkerLayout {
            id: a.id.clone(),
            title: a.name.clone(),
            label: format!("Approach {}", i + 1),
            x: cx - (m as f64 - 1.0) * APPROACH_SPACING / 2.0 + i as f64 * APPROACH_SPACING,
            y: cy + radius * 1.8,
        })
        .collect();

    EvidenceLayout {
        width,
        height,
        margin,
        cx,
        cy,
        radius,
        circles,
        intersection_path: intersection_path(cx, cy, radius),
        case_studies: case_markers,
        approaches: approach_markers,
    }
}
