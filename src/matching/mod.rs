//! The matching engine: pairwise scoring and the two-pass reconciliation loop

pub mod engine;
pub mod score;
pub mod similarity;

pub use engine::*;
pub use score::*;
