//! Pagematrix - Programmatic keyword-matrix content catalog engine
//!
//! Expands declarative keyword-matrix blueprints (a base concept plus
//! orthogonal modifier dimensions) into uniquely addressable page shells,
//! reconciles them against a persistent catalog without duplicating
//! existing entries, and serves the catalog through a TTL-bounded
//! in-process cache.

// Module declarations
pub mod application;
pub mod catalog;
pub mod domain;
pub mod infrastructure;

// Re-export the operator-facing surface
pub use application::cache::CatalogCache;
pub use application::expansion::{combo_to_shell, generate_all_shells, generate_combos};
pub use application::sync::{ExpansionResult, SyncPipeline};
pub use catalog::register_builtin_blueprints;
pub use domain::registry::BlueprintRegistry;
