//! Cluster resolution strategies
//!
//! A cluster is an optional grouping label assigned to a shell, used by
//! downstream content and internal-link organization. Resolvers are named
//! strategies registered alongside each blueprint so blueprints stay
//! inspectable and the strategies unit-testable in isolation.

use crate::domain::combo::CartesianCombo;
use crate::domain::dimension::DimensionAxis;
use crate::domain::template::slugify;

pub trait ClusterResolver: Send + Sync {
    /// Returns the cluster slug for this combo, or `None` for uncategorized.
    fn resolve(&self, combo: &CartesianCombo) -> Option<String>;
}

/// Clusters by the chosen value of one axis, e.g. every Instagram shell
/// lands in `instagram-images`.
pub struct AxisCluster {
    axis: DimensionAxis,
    suffix: String,
}

impl AxisCluster {
    pub fn new(axis: DimensionAxis, suffix: impl Into<String>) -> Self {
        Self {
            axis,
            suffix: suffix.into(),
        }
    }
}

impl ClusterResolver for AxisCluster {
    fn resolve(&self, combo: &CartesianCombo) -> Option<String> {
        let value = combo.value_for(self.axis)?;
        if self.suffix.is_empty() {
            Some(slugify(&value.id))
        } else {
            Some(slugify(&format!("{} {}", value.id, self.suffix)))
        }
    }
}

/// Assigns every combo of the blueprint to one fixed cluster.
pub struct FixedCluster(pub String);

impl ClusterResolver for FixedCluster {
    fn resolve(&self, _combo: &CartesianCombo) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Leaves every shell uncategorized.
pub struct Unclustered;

impl ClusterResolver for Unclustered {
    fn resolve(&self, _combo: &CartesianCombo) -> Option<String> {
        None
    }
}
