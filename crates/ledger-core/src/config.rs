use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Effective layout configuration.
///
/// Holds the built-in defaults for every visualization, deep-merged with any caller overrides.
/// Lookups take a key path and a fallback so callers never have to care whether a section was
/// supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig(Value);

impl Default for LedgerConfig {
    fn default() -> Self {
        Self(Self::defaults())
    }
}

impl LedgerConfig {
    pub fn defaults() -> Value {
        json!({
            "flow": {
                "width": 900.0,
                "height": 600.0,
                "margin": { "top": 20.0, "right": 30.0, "bottom": 30.0, "left": 30.0 },
                "nodeWidth": 20.0,
                "nodePadding": 10.0,
                "nodeAlignment": "left",
                "iterations": 6
            },
            "wheel": {
                "width": 900.0,
                "height": 600.0,
                "margin": 40.0,
                "radiusFactor": 0.4,
                "nodeRadius": 45.0,
                "hoverRadius": 50.0,
                "centerRadius": 60.0
            },
            "gauge": {
                "size": 400.0,
                "ringWidth": 32.0
            },
            "journey": {
                "width": 800.0,
                "height": 500.0,
                "margin": 50.0
            },
            "evidence": {
                "width": 800.0,
                "height": 500.0,
                "margin": 40.0
            },
            "proximity": {
                "width": 800.0,
                "height": 600.0,
                "margin": 40.0
            },
            "svg": {
                "fontFamily": "ui-sans-serif, system-ui, sans-serif"
            }
        })
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Defaults deep-merged with `overrides`.
    pub fn with_overrides(overrides: &Value) -> Self {
        let mut cfg = Self::default();
        cfg.deep_merge(overrides);
        cfg
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        let mut cur = &self.0;
        for key in path {
            cur = cur.as_object()?.get(*key)?;
        }
        Some(cur)
    }

    pub fn f64_at(&self, path: &[&str], fallback: f64) -> f64 {
        self.get(path)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
            .unwrap_or(fallback)
    }

    pub fn usize_at(&self, path: &[&str], fallback: usize) -> usize {
        self.get(path)
            .and_then(Value::as_u64)
            .map(|v| v as usize)
            .unwrap_or(fallback)
    }

    pub fn str_at<'a>(&'a self, path: &[&str], fallback: &'a str) -> &'a str {
        self.get(path).and_then(Value::as_str).unwrap_or(fallback)
    }

    pub fn bool_at(&self, path: &[&str], fallback: bool) -> bool {
        self.get(path).and_then(Value::as_bool).unwrap_or(fallback)
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

/// Space reserved around the inner drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    /// Reads either a single number or a `{top,right,bottom,left}` object.
    pub fn from_config(cfg: &LedgerConfig, section: &str, fallback: f64) -> Self {
        match cfg.get(&[section, "margin"]) {
            Some(Value::Object(_)) => Self {
                top: cfg.f64_at(&[section, "margin", "top"], fallback),
                right: cfg.f64_at(&[section, "margin", "right"], fallback),
                bottom: cfg.f64_at(&[section, "margin", "bottom"], fallback),
                left: cfg.f64_at(&[section, "margin", "left"], fallback),
            },
            Some(v) => Self::uniform(v.as_f64().unwrap_or(fallback)),
            None => Self::uniform(fallback),
        }
    }
}
