//! Cartesian combo
//!
//! One concrete selection of one value per dimension axis, the unit the
//! expansion engine produces. Combos are ephemeral: they are derived
//! deterministically from a blueprint and never persisted.

use crate::domain::dimension::{DimensionAxis, DimensionValue};
use crate::domain::template::TemplateContext;

#[derive(Debug, Clone, PartialEq)]
pub struct CartesianCombo {
    /// Selected value per axis, in blueprint declaration order.
    pub dimensions: Vec<(DimensionAxis, DimensionValue)>,
    pub slug: String,
    pub name: String,
    pub primary_keyword: String,
    pub description: String,
    pub engine_id: String,
    pub segment: String,
}

impl CartesianCombo {
    pub fn value_for(&self, axis: DimensionAxis) -> Option<&DimensionValue> {
        self.dimensions
            .iter()
            .find(|(a, _)| *a == axis)
            .map(|(_, value)| value)
    }

    /// Rebuild the substitution context this combo was templated from.
    pub fn template_context(&self) -> TemplateContext {
        let selection: Vec<(DimensionAxis, &DimensionValue)> = self
            .dimensions
            .iter()
            .map(|(axis, value)| (*axis, value))
            .collect();
        TemplateContext::from_selection(&selection)
    }
}
