//! Pairwise document/transaction scoring
//!
//! One score per factor, each 0-100, combined into a weighted total. A
//! factor that cannot be compared (missing field, unparsable value) scores
//! 0 and contributes nothing; the other factors still can.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;

use crate::config::MatcherConfig;
use crate::document;
use crate::matching::similarity;
use crate::types::{
    AmountComparison, BankTransaction, DateComparison, NameComparison, PairScore, ScoreDetails,
};
use crate::vendor::normalize_vendor_name;

// A correct vendor name is the strongest settlement signal; amounts can
// legitimately shift by fees or partial payments; posting dates drift with
// batching delays.
const NAME_WEIGHT: f64 = 0.50;
const AMOUNT_WEIGHT: f64 = 0.35;
const DATE_WEIGHT: f64 = 0.15;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Score one document/transaction pair.
pub fn score_pair(
    config: &MatcherConfig,
    document: &Value,
    transaction: &BankTransaction,
) -> PairScore {
    let mut scores = PairScore {
        name_score: 0,
        amount_score: 0,
        date_score: 0,
        total_score: 0,
        details: ScoreDetails::default(),
    };

    if let Some(vendor) = document::extract_vendor_name(document) {
        if !transaction.description.is_empty() {
            let similarity = fuzzy_name_score(&vendor, &transaction.description);
            scores.name_score = similarity;
            scores.details.name = Some(NameComparison {
                document_vendor: vendor,
                transaction_description: transaction.description.clone(),
                similarity,
            });
        }
    }

    if let (Some(document_amount), Some(transaction_amount)) = (
        document::extract_amount(document),
        decimal_from_f64(transaction.amount),
    ) {
        // Debits are negative on statements; compare magnitudes.
        let transaction_magnitude = transaction_amount.abs();
        let amount_score = match_amounts(config, &document_amount, &transaction_magnitude);
        let difference = (&document_amount - &transaction_magnitude).abs();
        scores.amount_score = amount_score;
        scores.details.amount = Some(AmountComparison {
            document_amount,
            transaction_amount: transaction_magnitude,
            difference,
            exact: amount_score == 100,
        });
    }

    if let Some(document_date) = document::extract_date(document) {
        if !transaction.date.is_empty() {
            let date_score = match_dates(config, &document_date, &transaction.date);
            let days_difference = days_between(&document_date, &transaction.date);
            scores.date_score = date_score;
            scores.details.date = Some(DateComparison {
                document_date,
                transaction_date: transaction.date.clone(),
                days_difference,
                exact: date_score == 100,
            });
        }
    }

    scores.total_score = weighted_total(scores.name_score, scores.amount_score, scores.date_score);
    scores
}

/// Highest of the four similarity measures over normalized names.
///
/// Each measure is blind to a different legitimate variation (reordering,
/// truncation, extra boilerplate words); the best one speaks for the pair.
/// A side that normalizes to the empty string scores 0.
pub fn fuzzy_name_score(vendor: &str, description: &str) -> u32 {
    let a = normalize_vendor_name(vendor);
    let b = normalize_vendor_name(description);
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    similarity::ratio(&a, &b)
        .max(similarity::partial_ratio(&a, &b))
        .max(similarity::token_sort_ratio(&a, &b))
        .max(similarity::token_set_ratio(&a, &b))
}

/// Tiered amount score: 100 within the exact tolerance, then 80 within 1%,
/// 50 within 5%, else 0. The tiers keep a correct-but-slightly-off amount
/// ahead of a wrong one in the weighted sum.
fn match_amounts(
    config: &MatcherConfig,
    document_amount: &BigDecimal,
    transaction_magnitude: &BigDecimal,
) -> u32 {
    let difference = (document_amount - transaction_magnitude).abs();
    if difference <= config.amount_tolerance {
        return 100;
    }

    let larger = document_amount.max(transaction_magnitude);
    if larger <= &BigDecimal::from(0) {
        return 0;
    }
    let percent_diff = &difference * BigDecimal::from(100) / larger;
    if percent_diff <= BigDecimal::from(1) {
        80
    } else if percent_diff <= BigDecimal::from(5) {
        50
    } else {
        0
    }
}

/// Date score: 100 on the same day, linear 20-point-per-day decay floored
/// at 50 inside the configured window, 0 outside it or when either date is
/// unparsable.
fn match_dates(config: &MatcherConfig, document_date: &str, transaction_date: &str) -> u32 {
    let Some(diff_days) = days_between(document_date, transaction_date) else {
        return 0;
    };
    if diff_days == 0 {
        100
    } else if diff_days <= i64::from(config.date_range_days) {
        (100 - diff_days * 20).max(50) as u32
    } else {
        0
    }
}

/// Absolute day distance; `None` when either side is not a valid
/// YYYY-MM-DD date.
fn days_between(a: &str, b: &str) -> Option<i64> {
    let parse = |text: &str| {
        NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map_err(|error| debug!(date = text, %error, "unparsable date in comparison"))
            .ok()
    };
    let first = parse(a)?;
    let second = parse(b)?;
    Some((first - second).num_days().abs())
}

fn weighted_total(name: u32, amount: u32, date: u32) -> u32 {
    (f64::from(name) * NAME_WEIGHT
        + f64::from(amount) * AMOUNT_WEIGHT
        + f64::from(date) * DATE_WEIGHT)
        .round() as u32
}

/// Convert a float amount through its shortest round-trip decimal form, so
/// 100.01 compares as exactly 100.01 rather than its binary expansion.
pub(crate) fn decimal_from_f64(value: f64) -> Option<BigDecimal> {
    if !value.is_finite() {
        return None;
    }
    BigDecimal::from_str(&value.to_string()).ok()
}
