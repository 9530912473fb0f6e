//! Engine construction parameters

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Tuning parameters for the reconciliation engine.
///
/// All parameters have working defaults. Values are normalized (clamped
/// into their valid ranges) when the engine is constructed, so building an
/// engine never fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Minimum weighted score for an otherwise-unmatched document to
    /// surface as a suggestion (0-100)
    pub name_threshold: u32,
    /// Maximum absolute amount difference still treated as an exact amount
    /// match, in the same currency unit as the input amounts
    pub amount_tolerance: BigDecimal,
    /// Maximum date distance, in days, eligible for partial date credit
    pub date_range_days: u32,
}

impl MatcherConfig {
    /// Create a config with explicit values
    pub fn new(name_threshold: u32, amount_tolerance: BigDecimal, date_range_days: u32) -> Self {
        Self {
            name_threshold,
            amount_tolerance,
            date_range_days,
        }
    }

    /// Clamp every parameter into its valid range
    pub fn normalized(self) -> Self {
        Self {
            name_threshold: self.name_threshold.min(100),
            amount_tolerance: self.amount_tolerance.abs(),
            date_range_days: self.date_range_days,
        }
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            name_threshold: 80,
            // 0.01 in the input currency unit
            amount_tolerance: BigDecimal::new(1.into(), 2),
            date_range_days: 3,
        }
    }
}
