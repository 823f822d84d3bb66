// ============================================================================
// Engine Module
// Midpoint search and the ranker entry point
// ============================================================================

mod ranker;

pub mod factory;
pub mod midpoint;

pub use factory::{create_from_config, RankerBuilder};
pub use midpoint::between;
pub use ranker::Ranker;
