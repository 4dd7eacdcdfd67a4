use super::{Binding, HitArea, Layer, Scene, SceneNode, Shape, Style, TextAnchor, Transform};
use crate::color::{GREY_100, GREY_50, GREY_600, GREY_800, INDIGO, VIOLET, evidence_color};
use crate::evidence::{CASE_MARKER_RADIUS, EvidenceView};
use crate::interaction::InteractionState;
use crate::model::EvidenceLayout;
use crate::text::{DeterministicTextMeasurer, TextStyle, wrap_text};
use crate::transition::EVIDENCE_HOVER_MS;
use ledger_core::Fixtures;

const APPROACH_BOX: (f64, f64) = (90.0, 50.0);
const DETAIL_FONT: f64 = 13.0;
const DETAIL_LINE_HEIGHT: f64 = 18.0;

/// The three-circle overview, or a text panel for the open case study or approach.
pub fn evidence_scene(layout: &EvidenceLayout, fixtures: &Fixtures, state: &InteractionState) -> Scene {
    match &state.evidence_view {
        EvidenceView::Overview => overview_scene(layout, state),
        view => detail_scene(layout, fixtures, view).unwrap_or_else(|| overview_scene(layout, state)),
    }
}

fn overview_scene(layout: &EvidenceLayout, state: &InteractionState) -> Scene {
    let mut scene = Scene::new(layout.width, layout.height, "Ensemble evidence explorer");
    let (ox, oy) = (layout.margin.left, layout.margin.top);
    let (cx, cy) = (layout.cx, layout.cy);

    let mut types = Vec::with_capacity(layout.circles.len());
    for circle in &layout.circles {
        let binding = Binding::EvidenceType(circle.kind);
        let hovered = state.is_hovered(&binding);
        let children = vec![
            SceneNode::new(
                Shape::circle(0.0, 0.0, circle.radius),
                Style::default()
                    .fill(&circle.fill)
                    .stroke(&circle.color, if hovered { 3.0 } else { 2.0 })
                    .transition(EVIDENCE_HOVER_MS),
            ),
            SceneNode::new(
                Shape::text(0.0, 0.0, circle.kind.title(), TextAnchor::Middle),
                Style::default().fill(evidence_color(circle.kind)).font(16.0).bold().passive(),
            ),
        ];
        types.push(
            SceneNode::new(
                Shape::group(Transform::translate(circle.x, circle.y), children),
                Style::default().class("evidence-type").transition(EVIDENCE_HOVER_MS),
            )
            .bind(binding)
            .hit(HitArea::Circle {
                cx: circle.x + ox,
                cy: circle.y + oy,
                r: circle.radius,
            }),
        );
    }

    let center = vec![
        SceneNode::new(
            Shape::path(layout.intersection_path.clone()),
            Style::default().fill(GREY_100).stroke(GREY_600, 2.0).dash("5,5"),
        ),
        SceneNode::new(
            Shape::text(cx, cy, "Ensemble", TextAnchor::Middle),
            Style::default().fill(GREY_600).font(14.0).bold().passive(),
        ),
        SceneNode::new(
            Shape::text(cx, cy + 20.0, "Evidence", TextAnchor::Middle),
            Style::default().fill(GREY_600).font(14.0).bold().passive(),
        ),
    ];

    let label_style = || {
        Style::default()
            .fill(GREY_600)
            .font(10.0)
            .bold()
            .baseline("middle")
            .passive()
    };
    let mut markers = Vec::new();
    for m in &layout.case_studies {
        markers.push(
            SceneNode::new(
                Shape::group(
                    Transform::translate(m.x, m.y),
                    vec![
                        SceneNode::new(
                            Shape::circle(0.0, 0.0, CASE_MARKER_RADIUS),
                            Style::default().fill(GREY_50).stroke(INDIGO, 2.0),
                        ),
                        SceneNode::new(Shape::text(0.0, 0.0, m.label.clone(), TextAnchor::Middle), label_style()),
                    ],
                ),
                Style::default().class("case-study-marker"),
            )
            .bind(Binding::CaseStudy(m.id.clone()))
            .hit(HitArea::Circle {
                cx: m.x + ox,
                cy: m.y + oy,
                r: CASE_MARKER_RADIUS,
            }),
        );
    }
    let (bw, bh) = APPROACH_BOX;
    for m in &layout.approaches {
        markers.push(
            SceneNode::new(
                Shape::group(
                    Transform::translate(m.x, m.y),
                    vec![
                        SceneNode::new(
                            Shape::Rect {
                                x: -bw / 2.0,
                                y: -bh / 2.0,
                                width: bw,
                                height: bh,
                                rx: 8.0,
                            },
                            Style::default().fill(GREY_50).stroke(VIOLET, 2.0),
                        ),
                        SceneNode::new(Shape::text(0.0, 0.0, m.label.clone(), TextAnchor::Middle), label_style()),
                    ],
                ),
                Style::default().class("approach-marker"),
            )
            .bind(Binding::Approach(m.id.clone()))
            .hit(HitArea::Rect {
                x: m.x - bw / 2.0 + ox,
                y: m.y - bh / 2.0 + oy,
                width: bw,
                height: bh,
            }),
        );
    }

    let shift = Transform::translate(ox, oy);
    for (name, priority, children) in [("types", 0, types), ("center", -1, center), ("markers", 1, markers)] {
        let mut layer = Layer::new(name, priority);
        layer.push(SceneNode::new(Shape::group(shift, children), Style::default()));
        scene.layers.push(layer);
    }
    scene
}

fn detail_scene(layout: &EvidenceLayout, fixtures: &Fixtures, view: &EvidenceView) -> Option<Scene> {
    let (title, paragraphs): (String, Vec<String>) = match view {
        EvidenceView::Overview => return None,
        EvidenceView::CaseStudy(_) => {
            let cs = view.case_study(fixtures)?;
            let mut p = vec![
                format!("Context: {}", cs.context),
                format!("Challenge: {}", cs.challenge),
            ];
            p.extend(
                cs.evidence_types
                    .iter()
                    .map(|e| format!("{} ({}): {}", e.kind.title(), e.name, e.description)),
            );
            p.push(format!("Tension: {}", cs.tension));
            p.push(format!("Resolution: {}", cs.resolution));
            p.push(format!("Outcome: {}", cs.outcome));
            p.push(format!("\"{}\"", cs.quote));
            (cs.title.clone(), p)
        }
        EvidenceView::Approach(_) => {
            let a = view.approach(fixtures)?;
            let mut p = vec![a.description.clone()];
            p.extend(a.steps.iter().enumerate().map(|(i, s)| format!("{}. {s}", i + 1)));
            p.extend(a.strengths.iter().map(|s| format!("+ {s}")));
            p.extend(a.limitations.iter().map(|s| format!("- {s}")));
            (a.name.clone(), p)
        }
    };

    let mut scene = Scene::new(layout.width, layout.height, &title);
    let measurer = DeterministicTextMeasurer::default();
    let style = TextStyle::sized(DETAIL_FONT);
    let max_width = layout.width - layout.margin.left - layout.margin.right;
    let lines: Vec<String> = paragraphs
        .iter()
        .flat_map(|p| wrap_text(&measurer, p, &style, max_width))
        .collect();

    let mut layer = Layer::new("detail", 0);
    layer.push(SceneNode::new(
        Shape::text(layout.margin.left, layout.margin.top, title, TextAnchor::Start),
        Style::default().fill(GREY_800).font(18.0).bold(),
    ));
    layer.push(SceneNode::new(
        Shape::text_lines(
            layout.margin.left,
            layout.margin.top + 30.0,
            lines,
            DETAIL_LINE_HEIGHT,
            TextAnchor::Start,
        ),
        Style::default().fill(GREY_600).font(DETAIL_FONT),
    ));
    scene.layers.push(layer);
    Some(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::layout_evidence;
    use ledger_core::LedgerConfig;
    use ledger_core::model::EvidenceKind;

    fn build(state: &InteractionState) -> (Scene, EvidenceLayout) {
        let f = Fixtures::default();
        let layout = layout_evidence(
            &f.evidence_case_studies,
            &f.integration_approaches,
            &LedgerConfig::default(),
            state,
        );
        (evidence_scene(&layout, &f, state), layout)
    }

    #[test]
    fn markers_are_clickable_targets() {
        let (scene, layout) = build(&InteractionState::default());
        let (ox, oy) = (layout.margin.left, layout.margin.top);
        let a = &layout.approaches[0];
        assert_eq!(scene.hit_test(a.x + ox, a.y + oy), Some(&Binding::Approach(a.id.clone())));
        let c = &layout.case_studies[0];
        assert_eq!(scene.hit_test(c.x + ox, c.y + oy), Some(&Binding::CaseStudy(c.id.clone())));
    }

    #[test]
    fn narrative_circle_is_hit_below_the_centre() {
        let (scene, layout) = build(&InteractionState::default());
        let n = &layout.circles[2];
        let hit = scene.hit_test(n.x + layout.margin.left, n.y + layout.margin.top + n.radius * 0.5);
        assert_eq!(hit, Some(&Binding::EvidenceType(EvidenceKind::Narrative)));
    }

    #[test]
    fn open_case_study_renders_a_wrapped_panel() {
        let f = Fixtures::default();
        let state = InteractionState {
            evidence_view: EvidenceView::CaseStudy(f.evidence_case_studies[0].id.clone()),
            ..InteractionState::default()
        };
        let (scene, _) = build(&state);
        assert_eq!(scene.title, f.evidence_case_studies[0].title);
        let detail = scene.layer("detail").expect("detail layer");
        let Shape::Text { lines, .. } = &detail.nodes[1].shape else {
            panic!("body text");
        };
        assert!(lines.len() > 5);
    }

    #[test]
    fn unknown_view_falls_back_to_overview() {
        let state = InteractionState {
            evidence_view: EvidenceView::Approach("missing".into()),
            ..InteractionState::default()
        };
        let (scene, _) = build(&state);
        assert!(scene.layer("types").is_some());
    }
}
