// ============================================================================
// Domain Models Module
// Buckets, ranks and the configuration that shapes their key space
// ============================================================================

pub mod bucket;
pub mod config;
pub mod rank;

pub use bucket::Bucket;
pub use config::{Precision, RankConfig, RankOptions, MAX_ORDER_LIMIT};
pub use rank::Rank;
