//! Blueprint definition
//!
//! A blueprint couples a set of dimension arrays with string templates, a
//! cluster-resolution strategy, link rules and default metadata. One
//! blueprint corresponds to one generatable family of catalog pages. It is
//! registered once at startup and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::domain::cluster::ClusterResolver;
use crate::domain::dimension::DimensionArray;
use crate::domain::template::SlugTransform;

/// Dominant search intent assumed for every page of the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchIntent {
    Informational,
    Commercial,
    Transactional,
    Navigational,
}

impl SearchIntent {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Informational => "informational",
            Self::Commercial => "commercial",
            Self::Transactional => "transactional",
            Self::Navigational => "navigational",
        }
    }

    pub fn parse(value: &str) -> anyhow::Result<Self> {
        match value {
            "informational" => Ok(Self::Informational),
            "commercial" => Ok(Self::Commercial),
            "transactional" => Ok(Self::Transactional),
            "navigational" => Ok(Self::Navigational),
            other => anyhow::bail!("unknown search intent: {other}"),
        }
    }
}

/// Internal-linking rules applied to every shell of the family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkRules {
    /// Upper bound on related-tool links rendered on the page.
    pub max_related: u8,
    /// Link to other shells in the same cluster.
    pub cluster_siblings: bool,
    /// Allow links across engine families.
    pub cross_engine: bool,
}

impl Default for LinkRules {
    fn default() -> Self {
        Self {
            max_related: 6,
            cluster_siblings: true,
            cross_engine: false,
        }
    }
}

/// Default metadata stamped onto every shell the blueprint generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintDefaults {
    /// 1 (lowest) to 10 (highest) directory/sitemap priority.
    pub priority: u8,
    pub is_indexed: bool,
    pub in_directory: bool,
    pub search_intent: SearchIntent,
}

impl Default for BlueprintDefaults {
    fn default() -> Self {
        Self {
            priority: 5,
            is_indexed: true,
            in_directory: true,
            search_intent: SearchIntent::Informational,
        }
    }
}

/// Slug derivation: a template, optionally overridden by a named transform.
/// The transform takes precedence when present; sanitation applies to both
/// paths unconditionally.
#[derive(Clone)]
pub struct SlugPattern {
    pub template: String,
    pub transform: Option<Arc<dyn SlugTransform>>,
}

impl SlugPattern {
    pub fn template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            transform: None,
        }
    }

    pub fn with_transform(mut self, transform: Arc<dyn SlugTransform>) -> Self {
        self.transform = Some(transform);
        self
    }
}

impl fmt::Debug for SlugPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlugPattern")
            .field("template", &self.template)
            .field("has_transform", &self.transform.is_some())
            .finish()
    }
}

#[derive(Clone)]
pub struct Blueprint {
    pub id: String,
    pub engine_id: String,
    pub segment: String,
    pub slug_pattern: SlugPattern,
    pub title_pattern: String,
    pub keyword_pattern: String,
    pub description_pattern: String,
    pub dimensions: Vec<DimensionArray>,
    pub cluster_resolver: Arc<dyn ClusterResolver>,
    pub link_rules: LinkRules,
    pub defaults: BlueprintDefaults,
    pub input_type: String,
    pub output_type: String,
}

impl Blueprint {
    /// Expected number of combos: the product of all axis sizes, zero when
    /// no dimensions are declared.
    pub fn expected_combo_count(&self) -> usize {
        if self.dimensions.is_empty() {
            return 0;
        }
        self.dimensions.iter().map(DimensionArray::len).product()
    }
}

impl fmt::Debug for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blueprint")
            .field("id", &self.id)
            .field("engine_id", &self.engine_id)
            .field("segment", &self.segment)
            .field("dimensions", &self.dimensions.len())
            .finish_non_exhaustive()
    }
}
