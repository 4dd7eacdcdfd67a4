//! Retained scene graph shared by every visualization.
//!
//! A scene is plain data: shapes with styles, an optional datum binding and an optional hit
//! area. Hosts route pointer input through [`Scene::hit_test`] instead of attaching handlers to
//! drawn elements, and the SVG writer turns the same scene into markup.

mod binding;
mod evidence;
mod flow;
mod gauge;
mod journey;
mod proximity;
mod systems;
mod tooltip;

pub use binding::{Binding, ParseBindingError};
pub use evidence::evidence_scene;
pub use flow::flow_scene;
pub use gauge::gauge_scene;
pub use journey::journey_scene;
pub use proximity::proximity_scene;
pub use systems::systems_scene;
pub use tooltip::tooltip_layer;

use crate::model::LayoutPoint;
use serde::Serialize;
use std::cmp::Reverse;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Transform {
    pub translate: (f64, f64),
    /// Degrees, applied after the translation.
    pub rotate: f64,
}

impl Transform {
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            translate: (x, y),
            rotate: 0.0,
        }
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotate = degrees;
        self
    }

    pub fn is_identity(&self) -> bool {
        self.translate == (0.0, 0.0) && self.rotate == 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Path {
        d: String,
    },
    Polygon {
        points: String,
    },
    Text {
        x: f64,
        y: f64,
        lines: Vec<String>,
        line_height: f64,
        anchor: TextAnchor,
    },
    Group {
        transform: Transform,
        children: Vec<SceneNode>,
    },
}

impl Shape {
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Shape::Rect {
            x,
            y,
            width,
            height,
            rx: 0.0,
        }
    }

    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Shape::Circle { cx, cy, r }
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Shape::Line { x1, y1, x2, y2 }
    }

    pub fn path(d: impl Into<String>) -> Self {
        Shape::Path { d: d.into() }
    }

    pub fn text(x: f64, y: f64, text: impl Into<String>, anchor: TextAnchor) -> Self {
        Shape::Text {
            x,
            y,
            lines: vec![text.into()],
            line_height: 0.0,
            anchor,
        }
    }

    pub fn text_lines(x: f64, y: f64, lines: Vec<String>, line_height: f64, anchor: TextAnchor) -> Self {
        Shape::Text {
            x,
            y,
            lines,
            line_height,
            anchor,
        }
    }

    pub fn group(transform: Transform, children: Vec<SceneNode>) -> Self {
        Shape::Group {
            transform,
            children,
        }
    }
}

/// Presentation attributes. Unset fields are omitted from the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub class: Option<String>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub stroke_dasharray: Option<String>,
    pub stroke_linecap: Option<String>,
    pub opacity: Option<f64>,
    pub font_size: Option<f64>,
    pub font_weight: Option<String>,
    pub dominant_baseline: Option<String>,
    /// Hint for hosts that animate attribute changes.
    pub transition_ms: Option<f64>,
    pub pointer_events_none: bool,
}

impl Style {
    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn fill(mut self, fill: &str) -> Self {
        self.fill = Some(fill.to_string());
        self
    }

    pub fn stroke(mut self, stroke: &str, width: f64) -> Self {
        self.stroke = Some(stroke.to_string());
        self.stroke_width = Some(width);
        self
    }

    pub fn dash(mut self, pattern: &str) -> Self {
        self.stroke_dasharray = Some(pattern.to_string());
        self
    }

    pub fn linecap(mut self, cap: &str) -> Self {
        self.stroke_linecap = Some(cap.to_string());
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn font(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn bold(mut self) -> Self {
        self.font_weight = Some("bold".to_string());
        self
    }

    pub fn baseline(mut self, baseline: &str) -> Self {
        self.dominant_baseline = Some(baseline.to_string());
        self
    }

    pub fn transition(mut self, ms: f64) -> Self {
        self.transition_ms = Some(ms);
        self
    }

    pub fn passive(mut self) -> Self {
        self.pointer_events_none = true;
        self
    }
}

/// Region that reacts to the pointer, in scene coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HitArea {
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Angles in radians, swept from `start` toward increasing angle until `end`.
    AnnulusSector {
        cx: f64,
        cy: f64,
        inner: f64,
        outer: f64,
        start: f64,
        end: f64,
    },
    Polyline {
        points: Vec<LayoutPoint>,
        tolerance: f64,
    },
}

impl HitArea {
    /// Point a tooltip attaches to: the top of a circle or rect, the middle of an annulus
    /// sector's outer arc, or the middle vertex of a polyline.
    pub fn anchor(&self) -> LayoutPoint {
        match self {
            HitArea::Circle { cx, cy, r } => LayoutPoint::new(*cx, cy - r),
            HitArea::Rect { x, y, width, .. } => LayoutPoint::new(x + width / 2.0, *y),
            HitArea::AnnulusSector {
                cx,
                cy,
                outer,
                start,
                end,
                ..
            } => {
                let mid = (start + end) / 2.0;
                LayoutPoint::new(cx + outer * mid.cos(), cy + outer * mid.sin())
            }
            HitArea::Polyline { points, .. } => points
                .get(points.len() / 2)
                .copied()
                .unwrap_or(LayoutPoint::new(0.0, 0.0)),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            HitArea::Circle { cx, cy, r } => (x - cx).hypot(y - cy) <= *r,
            HitArea::Rect {
                x: rx,
                y: ry,
                width,
                height,
            } => x >= *rx && x <= rx + width && y >= *ry && y <= ry + height,
            HitArea::AnnulusSector {
                cx,
                cy,
                inner,
                outer,
                start,
                end,
            } => {
                let r = (x - cx).hypot(y - cy);
                if r < *inner || r > *outer {
                    return false;
                }
                angle_within(normalize_angle((y - cy).atan2(x - cx)), *start, *end)
            }
            HitArea::Polyline { points, tolerance } => points
                .windows(2)
                .any(|s| segment_distance(x, y, s[0], s[1]) <= *tolerance),
        }
    }
}

fn normalize_angle(a: f64) -> f64 {
    a.rem_euclid(std::f64::consts::TAU)
}

fn angle_within(a: f64, start: f64, end: f64) -> bool {
    let start_n = normalize_angle(start);
    let sweep = end - start;
    if sweep >= std::f64::consts::TAU {
        return true;
    }
    let delta = (a - start_n).rem_euclid(std::f64::consts::TAU);
    delta <= sweep + 1e-12
}

fn segment_distance(x: f64, y: f64, a: LayoutPoint, b: LayoutPoint) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    let t = if len2 == 0.0 {
        0.0
    } else {
        (((x - a.x) * dx + (y - a.y) * dy) / len2).clamp(0.0, 1.0)
    };
    (x - (a.x + t * dx)).hypot(y - (a.y + t * dy))
}

/// Points along a cubic Bézier, endpoints included.
pub fn sample_cubic(p0: LayoutPoint, c1: LayoutPoint, c2: LayoutPoint, p1: LayoutPoint, steps: usize) -> Vec<LayoutPoint> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let mt = 1.0 - t;
            let a = mt * mt * mt;
            let b = 3.0 * mt * mt * t;
            let c = 3.0 * mt * t * t;
            let d = t * t * t;
            LayoutPoint::new(
                a * p0.x + b * c1.x + c * c2.x + d * p1.x,
                a * p0.y + b * c1.y + c * c2.y + d * p1.y,
            )
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub shape: Shape,
    pub style: Style,
    pub binding: Option<Binding>,
    pub hit: Option<HitArea>,
}

impl SceneNode {
    pub fn new(shape: Shape, style: Style) -> Self {
        Self {
            shape,
            style,
            binding: None,
            hit: None,
        }
    }

    pub fn bind(mut self, binding: Binding) -> Self {
        self.binding = Some(binding);
        self
    }

    pub fn hit(mut self, hit: HitArea) -> Self {
        self.hit = Some(hit);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub name: String,
    pub nodes: Vec<SceneNode>,
    /// Higher priorities win hit tests regardless of paint order.
    pub hit_priority: i32,
}

impl Layer {
    pub fn new(name: &str, hit_priority: i32) -> Self {
        Self {
            name: name.to_string(),
            nodes: Vec::new(),
            hit_priority,
        }
    }

    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub title: String,
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn new(width: f64, height: f64, title: &str) -> Self {
        Self {
            width,
            height,
            title: title.to_string(),
            layers: Vec::new(),
        }
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Binding under the point. Layers are tried by descending priority and, within a
    /// priority, from the top of the paint order down.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&Binding> {
        let mut order: Vec<usize> = (0..self.layers.len()).collect();
        order.sort_by_key(|&i| (Reverse(self.layers[i].hit_priority), Reverse(i)));
        order
            .into_iter()
            .find_map(|i| hit_nodes(&self.layers[i].nodes, x, y))
    }

    /// First node bound to `binding`, depth first in paint order.
    pub fn find(&self, binding: &Binding) -> Option<&SceneNode> {
        self.bound_nodes()
            .into_iter()
            .find(|n| n.binding.as_ref() == Some(binding))
    }

    /// Every bound node, depth first in paint order.
    pub fn bound_nodes(&self) -> Vec<&SceneNode> {
        fn walk<'a>(nodes: &'a [SceneNode], out: &mut Vec<&'a SceneNode>) {
            for n in nodes {
                if n.binding.is_some() {
                    out.push(n);
                }
                if let Shape::Group { children, .. } = &n.shape {
                    walk(children, out);
                }
            }
        }
        let mut out = Vec::new();
        for layer in &self.layers {
            walk(&layer.nodes, &mut out);
        }
        out
    }
}

fn hit_nodes(nodes: &[SceneNode], x: f64, y: f64) -> Option<&Binding> {
    nodes.iter().rev().find_map(|n| {
        if let Shape::Group { children, .. } = &n.shape {
            if let Some(b) = hit_nodes(children, x, y) {
                return Some(b);
            }
        }
        match (&n.hit, &n.binding) {
            (Some(hit), Some(binding)) if hit.contains(x, y) => Some(binding),
            _ => None,
        }
    })
}
