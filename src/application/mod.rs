//! Application layer - Catalog use cases
//!
//! Coordinates the pure expansion engine with storage: the dedup/sync
//! pipeline and the read-side registry cache.

pub mod cache;
pub mod expansion;
pub mod sync;

// Re-export commonly used items
pub use cache::CatalogCache;
pub use expansion::{combo_to_shell, generate_all_shells, generate_combos};
pub use sync::{ExpansionResult, SyncPipeline};
