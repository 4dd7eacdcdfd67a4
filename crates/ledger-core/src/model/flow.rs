use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowCategory {
    People,
    Institution,
    Value,
}

impl FlowCategory {
    pub fn label(self) -> &'static str {
        match self {
            FlowCategory::People => "People & Communities",
            FlowCategory::Institution => "Institutions & Organizations",
            FlowCategory::Value => "Value Types",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlowCategory::People => "people",
            FlowCategory::Institution => "institution",
            FlowCategory::Value => "value",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    pub name: String,
    pub category: FlowCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLink {
    pub source: String,
    pub target: String,
    pub value: f64,
    #[serde(default)]
    pub description: String,
}

/// A directed, weighted value-flow graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub links: Vec<FlowLink>,
}

impl FlowGraph {
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// First link touching `id`, either direction.
    pub fn first_link_touching(&self, id: &str) -> Option<&FlowLink> {
        self.links
            .iter()
            .find(|l| l.source == id || l.target == id)
    }
}

/// Which value-flow data set is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlowModel {
    Traditional,
    #[default]
    #[serde(alias = "empathyLedger")]
    Equitable,
}

impl FlowModel {
    pub const ORIGIN_NODE: &'static str = "storytellers";

    /// Node that value is expected to flow back into.
    pub fn return_node(self) -> &'static str {
        match self {
            FlowModel::Traditional => "storytellers",
            FlowModel::Equitable => "storyteller_benefit",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FlowModel::Traditional => "Traditional Model",
            FlowModel::Equitable => "Empathy Ledger Model",
        }
    }
}

impl std::str::FromStr for FlowModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "traditional" => Ok(Self::Traditional),
            "equitable" | "empathyledger" | "empathy-ledger" => Ok(Self::Equitable),
            other => Err(format!("unknown flow model: {other}")),
        }
    }
}
