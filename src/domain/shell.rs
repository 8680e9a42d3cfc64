//! Generated shell
//!
//! The fully materialized candidate catalog record derived from one combo.
//! A shell is born in memory; it becomes a persisted row only if the sync
//! pipeline decides to insert it. After persistence its status may be
//! advanced by admin actions that mutate the row directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::blueprint::{LinkRules, SearchIntent};
use crate::domain::combo::CartesianCombo;
use crate::domain::dimension::DimensionAxis;

/// Lifecycle of a persisted shell: `draft -> ready -> indexed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellStatus {
    Draft,
    Ready,
    Indexed,
}

impl ShellStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Ready => "ready",
            Self::Indexed => "indexed",
        }
    }

    pub fn parse(value: &str) -> anyhow::Result<Self> {
        match value {
            "draft" => Ok(Self::Draft),
            "ready" => Ok(Self::Ready),
            "indexed" => Ok(Self::Indexed),
            other => anyhow::bail!("unknown shell status: {other}"),
        }
    }
}

/// Label snapshot of the dimension values a shell was generated from, one
/// known optional field per axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl DimensionSnapshot {
    pub fn set(&mut self, axis: DimensionAxis, label: impl Into<String>) {
        let slot = match axis {
            DimensionAxis::Platform => &mut self.platform,
            DimensionAxis::Size => &mut self.size,
            DimensionAxis::Format => &mut self.format,
            DimensionAxis::Intent => &mut self.intent,
            DimensionAxis::Topic => &mut self.topic,
        };
        *slot = Some(label.into());
    }

    pub fn get(&self, axis: DimensionAxis) -> Option<&str> {
        let slot = match axis {
            DimensionAxis::Platform => &self.platform,
            DimensionAxis::Size => &self.size,
            DimensionAxis::Format => &self.format,
            DimensionAxis::Intent => &self.intent,
            DimensionAxis::Topic => &self.topic,
        };
        slot.as_deref()
    }
}

impl From<&CartesianCombo> for DimensionSnapshot {
    fn from(combo: &CartesianCombo) -> Self {
        let mut snapshot = Self::default();
        for (axis, value) in &combo.dimensions {
            snapshot.set(*axis, value.label.clone());
        }
        snapshot
    }
}

/// Candidate catalog record for one generated page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedShell {
    pub slug: String,
    pub name: String,
    pub engine_type: String,
    pub segment: String,
    pub priority: u8,
    pub is_indexed: bool,
    pub in_directory: bool,
    pub cluster_slug: Option<String>,
    pub primary_keyword: String,
    pub secondary_keywords: Vec<String>,
    pub search_intent: SearchIntent,
    pub h1: String,
    pub meta_description: String,
    pub intro_copy: String,
    pub link_rules: LinkRules,
    pub dimensions: DimensionSnapshot,
    pub created_at: DateTime<Utc>,
    pub status: ShellStatus,
}

/// Storage-side catalog counts for operator reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total: u64,
    pub draft: u64,
    pub ready: u64,
    pub indexed: u64,
    pub clusters: u64,
}
