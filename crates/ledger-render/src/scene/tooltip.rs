use super::{Layer, Scene, SceneNode, Shape, Style, TextAnchor};
use crate::color::{GREY_600, GREY_800};
use crate::interaction::Tooltip;
use crate::text::{TextMeasurer, TextStyle, wrap_text};

const MAX_TEXT_WIDTH: f64 = 240.0;
const PADDING: f64 = 10.0;
const GAP: f64 = 8.0;
const TITLE_SIZE: f64 = 13.0;
const BODY_SIZE: f64 = 11.0;
const LINE_HEIGHT: f64 = 15.0;

/// Panel for `tooltip` next to its datum, sized with `measurer`. `None` when the datum is not
/// in the scene.
pub fn tooltip_layer(scene: &Scene, tooltip: &Tooltip, measurer: &dyn TextMeasurer) -> Option<Layer> {
    let anchor = scene.find(&tooltip.binding)?.hit.as_ref()?.anchor();

    let title_style = TextStyle::sized(TITLE_SIZE).bold();
    let body_style = TextStyle::sized(BODY_SIZE);
    let title_lines = wrap_text(measurer, &tooltip.title, &title_style, MAX_TEXT_WIDTH);
    let body_lines: Vec<String> = tooltip
        .lines
        .iter()
        .flat_map(|l| wrap_text(measurer, l, &body_style, MAX_TEXT_WIDTH))
        .collect();

    let text_width = title_lines
        .iter()
        .map(|l| measurer.measure(l, &title_style).width)
        .chain(body_lines.iter().map(|l| measurer.measure(l, &body_style).width))
        .fold(0.0_f64, f64::max);
    let width = text_width + PADDING * 2.0;
    let title_height = title_lines.len() as f64 * LINE_HEIGHT;
    let height = title_height + body_lines.len() as f64 * LINE_HEIGHT + PADDING * 2.0;

    let x = (anchor.x - width / 2.0).clamp(4.0, (scene.width - width - 4.0).max(4.0));
    let above = anchor.y - GAP - height;
    let y = if above >= 4.0 { above } else { anchor.y + GAP };

    let mut layer = Layer::new("tooltip", i32::MIN);
    layer.push(SceneNode::new(
        Shape::Rect {
            x,
            y,
            width,
            height,
            rx: 6.0,
        },
        Style::default()
            .class("tooltip")
            .fill("white")
            .stroke("#e5e7eb", 1.0)
            .opacity(0.95)
            .passive(),
    ));
    let text_x = x + PADDING;
    let first_baseline = y + PADDING + TITLE_SIZE;
    layer.push(SceneNode::new(
        Shape::text_lines(text_x, first_baseline, title_lines, LINE_HEIGHT, TextAnchor::Start),
        Style::default().fill(GREY_800).font(TITLE_SIZE).bold().passive(),
    ));
    if !body_lines.is_empty() {
        layer.push(SceneNode::new(
            Shape::text_lines(
                text_x,
                first_baseline + title_height,
                body_lines,
                LINE_HEIGHT,
                TextAnchor::Start,
            ),
            Style::default().fill(GREY_600).font(BODY_SIZE).passive(),
        ));
    }
    Some(layer)
}
