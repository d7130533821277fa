//! Referral graph storage
//!
//! This module implements the referral forest with:
//! - Users created implicitly on first reference, never deleted
//! - Directed referrer -> candidate edges, never removed or mutated
//! - Validation that keeps the structure a forest after every insert

pub mod store;
pub mod types;

// Re-export main types
pub use store::{BulkInsertReport, GraphError, GraphResult, ReferralGraph, SharedReferralGraph};
pub use types::{ReferralEdge, UserId};
