//! Deterministic SVG output for a [`Scene`].

use crate::scene::{Scene, SceneNode, Shape, Style};
use crate::transition::HOVER_MS;
use crate::util::{escape_xml, escape_xml_into, fmt, fmt_into};
use ledger_core::LedgerConfig;
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root element id.
    pub diagram_id: Option<String>,
    /// Overrides the scene title as the root `aria-label`.
    pub aria_label: Option<String>,
    pub font_family: String,
    /// Root background colour; `None` leaves it transparent.
    pub background: Option<String>,
    /// When true, bound nodes carry a CSS transition hint for hosts that restyle in place.
    pub include_transitions: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            aria_label: None,
            font_family: "ui-sans-serif, system-ui, sans-serif".to_string(),
            background: Some("white".to_string()),
            include_transitions: true,
        }
    }
}

impl SvgRenderOptions {
    pub fn from_config(config: &LedgerConfig) -> Self {
        let defaults = Self::default();
        Self {
            font_family: config
                .str_at(&["svg", "fontFamily"], &defaults.font_family)
                .to_string(),
            background: match config.get(&["svg", "background"]) {
                Some(serde_json::Value::Null) => None,
                Some(v) => v.as_str().map(str::to_string).or(defaults.background.clone()),
                None => defaults.background.clone(),
            },
            include_transitions: config.bool_at(&["svg", "transitions"], true),
            ..defaults
        }
    }
}

pub fn render_scene_svg(scene: &Scene, options: &SvgRenderOptions) -> String {
    let mut out = String::new();
    let width = fmt(scene.width.max(1.0));
    let height = fmt(scene.height.max(1.0));
    let label = options.aria_label.as_deref().unwrap_or(&scene.title);

    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
    if let Some(id) = &options.diagram_id {
        let _ = write!(&mut out, r#" id="{}""#, escape_xml(id));
    }
    let _ = write!(
        &mut out,
        r#" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="{label}" font-family="{font}""#,
        w = width,
        h = height,
        label = escape_xml(label),
        font = escape_xml(&options.font_family),
    );
    if let Some(bg) = &options.background {
        let _ = write!(&mut out, r#" style="background-color: {};""#, escape_xml(bg));
    }
    out.push('>');
    let _ = write!(&mut out, "<title>{}</title>", escape_xml(&scene.title));

    for layer in &scene.layers {
        let _ = write!(&mut out, r#"<g class="{}">"#, escape_xml(&layer.name));
        for node in &layer.nodes {
            render_node(&mut out, node, options);
        }
        out.push_str("</g>");
    }
    out.push_str("</svg>");
    out
}

fn attr_num(out: &mut String, name: &str, v: f64) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    fmt_into(out, v);
    out.push('"');
}

fn attr_str(out: &mut String, name: &str, v: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_xml_into(out, v);
    out.push('"');
}

fn render_style(out: &mut String, style: &Style) {
    if let Some(v) = &style.class {
        attr_str(out, "class", v);
    }
    if let Some(v) = &style.fill {
        attr_str(out, "fill", v);
    }
    if let Some(v) = &style.stroke {
        attr_str(out, "stroke", v);
    }
    if let Some(v) = style.stroke_width {
        attr_num(out, "stroke-width", v);
    }
    if let Some(v) = &style.stroke_dasharray {
        attr_str(out, "stroke-dasharray", v);
    }
    if let Some(v) = &style.stroke_linecap {
        attr_str(out, "stroke-linecap", v);
    }
    if let Some(v) = style.opacity {
        attr_num(out, "opacity", v);
    }
    if let Some(v) = style.font_size {
        attr_num(out, "font-size", v);
    }
    if let Some(v) = &style.font_weight {
        attr_str(out, "font-weight", v);
    }
    if let Some(v) = &style.dominant_baseline {
        attr_str(out, "dominant-baseline", v);
    }
    if style.pointer_events_none {
        out.push_str(r#" pointer-events="none""#);
    }
}

fn render_common(out: &mut String, node: &SceneNode, options: &SvgRenderOptions) {
    render_style(out, &node.style);
    if let Some(binding) = &node.binding {
        attr_str(out, "data-bind", &binding.to_string());
        if options.include_transitions {
            let ms = node.style.transition_ms.unwrap_or(HOVER_MS);
            out.push_str(r#" style="transition:all "#);
            fmt_into(out, ms);
            out.push_str(r#"ms ease-in-out;cursor:pointer""#);
        } else {
            out.push_str(r#" style="cursor:pointer""#);
        }
    }
}

fn render_node(out: &mut String, node: &SceneNode, options: &SvgRenderOptions) {
    match &node.shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
            rx,
        } => {
            out.push_str("<rect");
            attr_num(out, "x", *x);
            attr_num(out, "y", *y);
            attr_num(out, "width", width.max(0.0));
            attr_num(out, "height", height.max(0.0));
            if *rx > 0.0 {
                attr_num(out, "rx", *rx);
            }
            render_common(out, node, options);
            out.push_str("/>");
        }
        Shape::Circle { cx, cy, r } => {
            out.push_str("<circle");
            attr_num(out, "cx", *cx);
            attr_num(out, "cy", *cy);
            attr_num(out, "r", r.max(0.0));
            render_common(out, node, options);
            out.push_str("/>");
        }
        Shape::Line { x1, y1, x2, y2 } => {
            out.push_str("<line");
            attr_num(out, "x1", *x1);
            attr_num(out, "y1", *y1);
            attr_num(out, "x2", *x2);
            attr_num(out, "y2", *y2);
            render_common(out, node, options);
            out.push_str("/>");
        }
        Shape::Path { d } => {
            out.push_str("<path");
            attr_str(out, "d", d);
            render_common(out, node, options);
            out.push_str("/>");
        }
        Shape::Polygon { points } => {
            out.push_str("<polygon");
            attr_str(out, "points", points);
            render_common(out, node, options);
            out.push_str("/>");
        }
        Shape::Text {
            x,
            y,
            lines,
            line_height,
            anchor,
        } => {
            out.push_str("<text");
            attr_num(out, "x", *x);
            attr_num(out, "y", *y);
            attr_str(out, "text-anchor", anchor.as_str());
            render_common(out, node, options);
            out.push('>');
            if let [single] = lines.as_slice() {
                escape_xml_into(out, single);
            } else {
                for (i, line) in lines.iter().enumerate() {
                    out.push_str("<tspan");
                    attr_num(out, "x", *x);
                    attr_num(out, "dy", if i == 0 { 0.0 } else { *line_height });
                    out.push('>');
                    escape_xml_into(out, line);
                    out.push_str("</tspan>");
                }
            }
            out.push_str("</text>");
        }
        Shape::Group {
            transform,
            children,
        } => {
            out.push_str("<g");
            if !transform.is_identity() {
                let mut t = String::from("translate(");
                fmt_into(&mut t, transform.translate.0);
                t.push(',');
                fmt_into(&mut t, transform.translate.1);
                t.push(')');
                if transform.rotate != 0.0 {
                    t.push_str(" rotate(");
                    fmt_into(&mut t, transform.rotate);
                    t.push(')');
                }
                attr_str(out, "transform", &t);
            }
            render_common(out, node, options);
            out.push('>');
            for child in children {
                render_node(out, child, options);
            }
            out.push_str("</g>");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Binding, Layer, TextAnchor, Transform};

    fn sample() -> Scene {
        let mut scene = Scene::new(120.0, 80.0, "A & B");
        let mut layer = Layer::new("nodes", 0);
        layer.push(
            SceneNode::new(
                Shape::circle(10.0, 10.123456, 4.0),
                Style::default().fill("#10b981").transition(200.0),
            )
            .bind(Binding::Stage("s1".into())),
        );
        layer.push(SceneNode::new(
            Shape::text_lines(5.0, 5.0, vec!["one".into(), "<two>".into()], 14.0, TextAnchor::Middle),
            Style::default().font(12.0).passive(),
        ));
        layer.push(SceneNode::new(
            Shape::group(
                Transform::translate(3.0, 4.0).rotated(90.0),
                vec![SceneNode::new(Shape::line(0.0, 0.0, 1.0, 1.0), Style::default())],
            ),
            Style::default(),
        ));
        scene.layers.push(layer);
        scene
    }

    #[test]
    fn root_carries_aria_label_and_title() {
        let svg = render_scene_svg(&sample(), &SvgRenderOptions::default());
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="120" height="80""#));
        assert!(svg.contains(r#"role="img" aria-label="A &amp; B""#));
        assert!(svg.contains("<title>A &amp; B</title>"));
        assert!(svg.ends_with("</g></svg>"));
    }

    #[test]
    fn bound_nodes_carry_binding_and_transition() {
        let svg = render_scene_svg(&sample(), &SvgRenderOptions::default());
        assert!(svg.contains(
            r##"<circle cx="10" cy="10.123" r="4" fill="#10b981" data-bind="stage:s1" style="transition:all 200ms ease-in-out;cursor:pointer"/>"##
        ));
        let plain = render_scene_svg(
            &sample(),
            &SvgRenderOptions {
                include_transitions: false,
                ..SvgRenderOptions::default()
            },
        );
        assert!(plain.contains(r#"data-bind="stage:s1" style="cursor:pointer""#));
    }

    #[test]
    fn multi_line_text_uses_tspans() {
        let svg = render_scene_svg(&sample(), &SvgRenderOptions::default());
        assert!(svg.contains(r#"<tspan x="5" dy="0">one</tspan><tspan x="5" dy="14">&lt;two&gt;</tspan>"#));
        assert!(svg.contains(r#"<g transform="translate(3,4) rotate(90)">"#));
    }

    #[test]
    fn background_can_be_disabled_from_config() {
        let cfg = LedgerConfig::with_overrides(&serde_json::json!({ "svg": { "background": null } }));
        let options = SvgRenderOptions::from_config(&cfg);
        assert_eq!(options.background, None);
        let svg = render_scene_svg(&sample(), &options);
        assert!(!svg.contains("background-color"));
    }
}
