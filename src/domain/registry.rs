//! Blueprint registry
//!
//! Write-once-per-id map from blueprint id to definition, populated at
//! startup by configuration. Registration validates the blueprint's
//! structural invariants eagerly so a bad definition fails at startup, not
//! mid-expansion.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

use crate::domain::blueprint::Blueprint;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("blueprint already registered: {0}")]
    Duplicate(String),
    #[error("blueprint {blueprint}: duplicate dimension axis {axis}")]
    DuplicateAxis { blueprint: String, axis: String },
    #[error("blueprint {blueprint}: duplicate value id {value} on axis {axis}")]
    DuplicateValue {
        blueprint: String,
        axis: String,
        value: String,
    },
}

#[derive(Default)]
pub struct BlueprintRegistry {
    blueprints: RwLock<HashMap<String, Arc<Blueprint>>>,
}

impl BlueprintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, blueprint: Blueprint) -> Result<(), RegistryError> {
        validate(&blueprint)?;
        let mut blueprints = self
            .blueprints
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if blueprints.contains_key(&blueprint.id) {
            return Err(RegistryError::Duplicate(blueprint.id));
        }
        blueprints.insert(blueprint.id.clone(), Arc::new(blueprint));
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Arc<Blueprint>> {
        self.blueprints
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// All registered blueprints, sorted by id for deterministic iteration.
    pub fn all(&self) -> Vec<Arc<Blueprint>> {
        let mut blueprints: Vec<Arc<Blueprint>> = self
            .blueprints
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        blueprints.sort_by(|a, b| a.id.cmp(&b.id));
        blueprints
    }

    pub fn by_engine(&self, engine_id: &str) -> Vec<Arc<Blueprint>> {
        self.all()
            .into_iter()
            .filter(|blueprint| blueprint.engine_id == engine_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.blueprints
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate(blueprint: &Blueprint) -> Result<(), RegistryError> {
    let mut seen_axes = HashSet::new();
    for array in &blueprint.dimensions {
        if !seen_axes.insert(array.axis) {
            return Err(RegistryError::DuplicateAxis {
                blueprint: blueprint.id.clone(),
                axis: array.axis.to_string(),
            });
        }
        let mut seen_values = HashSet::new();
        for value in &array.values {
            if !seen_values.insert(value.id.as_str()) {
                return Err(RegistryError::DuplicateValue {
                    blueprint: blueprint.id.clone(),
                    axis: array.axis.to_string(),
                    value: value.id.clone(),
                });
            }
        }
    }
    Ok(())
}
