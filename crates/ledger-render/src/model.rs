//! Serializable layout output for every visualization.
//!
//! Coordinates are in the inner drawing area unless a struct says otherwise; the scene builders
//! translate by the margin.

use ledger_core::Margin;
use ledger_core::model::{EntityCategory, EvidenceKind, FlowCategory, FlowModel, StageKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

impl LayoutPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &LayoutPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowNodeLayout {
    pub id: String,
    pub name: String,
    pub category: FlowCategory,
    pub index: usize,
    pub depth: usize,
    pub height: usize,
    pub layer: usize,
    pub value: f64,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowLinkLayout {
    pub index: usize,
    pub source: String,
    pub target: String,
    pub value: f64,
    pub description: String,
    pub width: f64,
    pub y0: f64,
    pub y1: f64,
    /// Horizontal cubic from the source's right edge to the target's left edge.
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowLayout {
    pub model: Option<FlowModel>,
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub inner_width: f64,
    pub inner_height: f64,
    pub node_width: f64,
    pub node_padding: f64,
    /// Pixels per unit of value, shared by node heights and link widths.
    pub ky: f64,
    pub nodes: Vec<FlowNodeLayout>,
    pub links: Vec<FlowLinkLayout>,
}

impl FlowLayout {
    pub fn node(&self, id: &str) -> Option<&FlowNodeLayout> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelNodeLayout {
    pub id: String,
    pub name: String,
    pub level: f64,
    pub fill: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub angle: f64,
    pub label_lines: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionWheelLayout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub center_radius: f64,
    pub show_transformed: bool,
    pub nodes: Vec<WheelNodeLayout>,
}

impl DimensionWheelLayout {
    pub fn node(&self, id: &str) -> Option<&WheelNodeLayout> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrowLayout {
    pub x: f64,
    pub y: f64,
    pub angle_deg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopLayout {
    pub id: String,
    pub name: String,
    pub reinforcing: bool,
    pub color: String,
    pub points: Vec<LayoutPoint>,
    /// `None` when fewer than two dimensions resolved.
    pub path: Option<String>,
    pub arrows: Vec<ArrowLayout>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemsLayout {
    pub wheel: DimensionWheelLayout,
    pub loops: Vec<LoopLayout>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaugeRingLayout {
    pub level: u8,
    pub name: String,
    pub color: String,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Radians, SVG orientation (y down).
    pub start_angle: f64,
    pub end_angle: f64,
    pub path: String,
    pub label: LayoutPoint,
    pub opacity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaugeLayout {
    pub size: f64,
    pub center: f64,
    pub ring_width: f64,
    pub average_level: u8,
    pub needle_angle_deg: f64,
    pub needle_length: f64,
    pub needle_end: LayoutPoint,
    pub badge_radius: f64,
    pub rings: Vec<GaugeRingLayout>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyStageLayout {
    pub id: String,
    pub name: String,
    pub kind: StageKind,
    pub level: f64,
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointLayout {
    pub id: String,
    pub name: String,
    pub description: String,
    pub x: f64,
    pub y: f64,
    pub fill: String,
    pub radius: f64,
    pub effectiveness: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyLayout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub inner_width: f64,
    pub inner_height: f64,
    pub stages: Vec<JourneyStageLayout>,
    pub main_path: String,
    /// Dashed comparison line, present in compare mode.
    pub traditional_points: Vec<LayoutPoint>,
    pub traditional_path: Option<String>,
    pub checkpoints: Vec<CheckpointLayout>,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceCircleLayout {
    pub kind: EvidenceKind,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: String,
    pub fill: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerLayout {
    pub id: String,
    pub title: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceLayout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub circles: Vec<EvidenceCircleLayout>,
    pub intersection_path: String,
    pub case_studies: Vec<MarkerLayout>,
    pub approaches: Vec<MarkerLayout>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityLayout {
    pub id: String,
    pub name: String,
    pub category: EntityCategory,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionLayout {
    pub index: usize,
    pub source: String,
    pub target: String,
    pub strength: f64,
    pub direct: bool,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub opacity: f64,
    /// Added or changed by the active intervention.
    pub transformed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximityLayout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub inner_width: f64,
    pub inner_height: f64,
    pub intervention: Option<String>,
    pub entities: Vec<EntityLayout>,
    pub connections: Vec<ConnectionLayout>,
    pub mean_distance: Option<f64>,
}
