//! Dimension catalog primitives
//!
//! A dimension is one independent axis of variation (platform, size, format,
//! intent, topic) contributing to the combinatorial expansion. Values are
//! declarative data only; all behavior lives in the expansion engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The closed set of axes a blueprint may vary over.
///
/// Keeping this an enum (rather than free-form strings) means a template key
/// typo is a compile error at the blueprint definition site, not a broken
/// placeholder discovered at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionAxis {
    Platform,
    Size,
    Format,
    Intent,
    Topic,
}

impl DimensionAxis {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Platform => "platform",
            Self::Size => "size",
            Self::Format => "format",
            Self::Intent => "intent",
            Self::Topic => "topic",
        }
    }

    /// Template key carrying the human-readable label of the chosen value.
    pub fn label_key(self) -> String {
        format!("{}_label", self.as_str())
    }
}

impl std::fmt::Display for DimensionAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable value on an axis.
///
/// `config` is an opaque payload consumed by cluster resolution and
/// downstream rendering (e.g. pixel dimensions for an image format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionValue {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, serde_json::Value>,
}

impl DimensionValue {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            variations: Vec::new(),
            config: BTreeMap::new(),
        }
    }

    pub fn with_variations(mut self, variations: &[&str]) -> Self {
        self.variations = variations.iter().map(|v| (*v).to_string()).collect();
        self
    }

    pub fn with_config(mut self, key: &str, value: serde_json::Value) -> Self {
        self.config.insert(key.to_string(), value);
        self
    }
}

/// All values of one axis, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionArray {
    pub axis: DimensionAxis,
    pub values: Vec<DimensionValue>,
}

impl DimensionArray {
    pub fn new(axis: DimensionAxis, values: Vec<DimensionValue>) -> Self {
        Self { axis, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
