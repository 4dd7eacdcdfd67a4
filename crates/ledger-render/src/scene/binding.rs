use ledger_core::model::EvidenceKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The datum a scene node stands for. Written as `kind:id` in SVG and on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "kebab-case")]
pub enum Binding {
    FlowNode(String),
    FlowLink(usize),
    Level(u8),
    Dimension(String),
    Intervention(String),
    Loop(String),
    Stage(String),
    Checkpoint(String),
    EvidenceType(EvidenceKind),
    CaseStudy(String),
    Approach(String),
    Entity(String),
    Connection(usize),
}

impl Binding {
    pub fn kind(&self) -> &'static str {
        match self {
            Binding::FlowNode(_) => "flow-node",
            Binding::FlowLink(_) => "flow-link",
            Binding::Level(_) => "level",
            Binding::Dimension(_) => "dimension",
            Binding::Intervention(_) => "intervention",
            Binding::Loop(_) => "loop",
            Binding::Stage(_) => "stage",
            Binding::Checkpoint(_) => "checkpoint",
            Binding::EvidenceType(_) => "evidence-type",
            Binding::CaseStudy(_) => "case-study",
            Binding::Approach(_) => "approach",
            Binding::Entity(_) => "entity",
            Binding::Connection(_) => "connection",
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        match self {
            Binding::FlowLink(i) | Binding::Connection(i) => write!(f, "{kind}:{i}"),
            Binding::Level(l) => write!(f, "{kind}:{l}"),
            Binding::EvidenceType(k) => write!(f, "{kind}:{}", k.as_str()),
            Binding::FlowNode(id)
            | Binding::Dimension(id)
            | Binding::Intervention(id)
            | Binding::Loop(id)
            | Binding::Stage(id)
            | Binding::Checkpoint(id)
            | Binding::CaseStudy(id)
            | Binding::Approach(id)
            | Binding::Entity(id) => write!(f, "{kind}:{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid binding `{input}`: {reason}")]
pub struct ParseBindingError {
    pub input: String,
    pub reason: &'static str,
}

impl FromStr for Binding {
    type Err = ParseBindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| ParseBindingError {
            input: s.to_string(),
            reason,
        };
        let (kind, id) = s.split_once(':').ok_or_else(|| err("expected kind:id"))?;
        if id.is_empty() {
            return Err(err("empty id"));
        }
        let index = || id.parse::<usize>().map_err(|_| err("expected a numeric index"));
        Ok(match kind {
            "flow-node" => Binding::FlowNode(id.to_string()),
            "flow-link" => Binding::FlowLink(index()?),
            "level" => Binding::Level(id.parse().map_err(|_| err("expected a level number"))?),
            "dimension" => Binding::Dimension(id.to_string()),
            "intervention" => Binding::Intervention(id.to_string()),
            "loop" => Binding::Loop(id.to_string()),
            "stage" => Binding::Stage(id.to_string()),
            "checkpoint" => Binding::Checkpoint(id.to_string()),
            "evidence-type" => Binding::EvidenceType(
                EvidenceKind::ALL
                    .into_iter()
                    .find(|k| k.as_str() == id)
                    .ok_or_else(|| err("unknown evidence type"))?,
            ),
            "case-study" => Binding::CaseStudy(id.to_string()),
            "approach" => Binding::Approach(id.to_string()),
            "entity" => Binding::Entity(id.to_string()),
            "connection" => Binding::Connection(index()?),
            _ => return Err(err("unknown kind")),
        })
    }
}
