//! Airtable records as they arrive on the wire.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One attached file. Only `url` is required; Airtable sends the rest for most uploads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// A cell value. Airtable field types are not declared in the payload, so the shape decides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Attachments(Vec<Attachment>),
    List(Vec<FieldValue>),
    Object(IndexMap<String, serde_json::Value>),
}

impl FieldValue {
    /// Non-empty text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    pub fn attachments(&self) -> Option<&[Attachment]> {
        match self {
            FieldValue::Attachments(a) => Some(a),
            _ => None,
        }
    }

    /// Strings of a multi-select. A single string becomes a one-item list.
    pub fn text_list(&self) -> Option<Vec<String>> {
        match self {
            FieldValue::Text(s) if !s.is_empty() => Some(vec![s.clone()]),
            FieldValue::List(items) => Some(
                items
                    .iter()
                    .filter_map(|v| v.as_text().map(str::to_string))
                    .collect(),
            ),
            // `[]` deserializes as an empty attachment list.
            FieldValue::Attachments(a) if a.is_empty() => Some(Vec::new()),
            _ => None,
        }
    }

    /// Strings of a list field only; a bare string gives `None`.
    pub fn strict_text_list(&self) -> Option<Vec<String>> {
        match self {
            FieldValue::Text(_) => None,
            other => other.text_list(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: IndexMap<String, FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
}

impl Record {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(FieldValue::as_text)
    }

    pub fn first_attachment_url(&self, name: &str) -> Option<&str> {
        self.field(name)?
            .attachments()?
            .first()
            .map(|a| a.url.as_str())
    }

    pub fn text_list(&self, name: &str) -> Option<Vec<String>> {
        self.field(name).and_then(FieldValue::text_list)
    }
}
