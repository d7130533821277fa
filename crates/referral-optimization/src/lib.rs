pub mod common;
pub mod growth;
pub mod search;

/// Re-export common types
pub use common::*;
pub use growth::{daily_growth, GrowthSimulator};
pub use search::BonusOptimizer;
