//! Core types and data structures for the reconciliation system

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A parsed financial document as produced by the upstream extraction
/// pipeline.
///
/// Documents are arbitrary nested JSON; the engine reads known field paths
/// defensively (see the `document` module) and never assumes a shape.
pub type Document = Value;

/// A single bank-statement transaction as produced by the upstream
/// statement parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankTransaction {
    /// Identifier assigned by the statement parser (e.g. "bank_tx_0")
    pub transaction_id: String,
    /// Raw description line from the statement
    #[serde(default)]
    pub description: String,
    /// Signed amount; debits are negative. Matching compares magnitudes.
    pub amount: f64,
    /// Posting date in YYYY-MM-DD format
    #[serde(default)]
    pub date: String,
}

impl BankTransaction {
    /// Create a new bank transaction
    pub fn new(
        transaction_id: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        date: impl Into<String>,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            description: description.into(),
            amount,
            date: date.into(),
        }
    }
}

/// How a match was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Claimed by the engine without review
    Automatic,
    /// Surfaced for review, nothing claimed
    Suggested,
    /// Scored on demand for a user-chosen pair
    Manual,
}

/// Confidence tier attached to a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Automatic match scoring 95 or above
    High,
    /// Automatic match below 95
    Medium,
    /// Suggestion awaiting review
    Low,
    /// Pair chosen by a user through `manual_match`
    UserVerified,
}

/// Raw inputs behind a name sub-score, preserved for audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameComparison {
    /// Vendor name extracted from the document
    pub document_vendor: String,
    /// Description line from the transaction
    pub transaction_description: String,
    /// Best similarity across the four measures (0-100)
    pub similarity: u32,
}

/// Raw inputs behind an amount sub-score, preserved for audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountComparison {
    /// Amount extracted from the document
    pub document_amount: BigDecimal,
    /// Transaction amount with the sign discarded
    pub transaction_amount: BigDecimal,
    /// Absolute difference between the two
    pub difference: BigDecimal,
    /// Whether the difference fell within the exact-match tolerance
    pub exact: bool,
}

/// Raw inputs behind a date sub-score, preserved for audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateComparison {
    /// Date extracted from the document
    pub document_date: String,
    /// Posting date from the transaction
    pub transaction_date: String,
    /// Absolute distance in days; `None` when either date failed to parse
    pub days_difference: Option<i64>,
    /// Whether the dates are the same day
    pub exact: bool,
}

/// The inputs each sub-score compared. A factor that could not be compared
/// (missing field on either side) is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<NameComparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<AmountComparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateComparison>,
}

/// Full scoring breakdown for one document/transaction pair.
///
/// Each sub-score is 0-100 and the total is the weighted sum
/// `round(0.50 * name + 0.35 * amount + 0.15 * date)`. The details carry
/// the raw values compared so a reviewer can see why a score was assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairScore {
    pub name_score: u32,
    pub amount_score: u32,
    pub date_score: u32,
    pub total_score: u32,
    pub details: ScoreDetails,
}

/// One reconciled document/transaction pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// The document, passed through unmodified
    pub document: Document,
    /// The transaction it was paired with
    pub transaction: BankTransaction,
    /// Weighted total score for the pair
    pub score: u32,
    /// Full scoring breakdown
    pub score_details: PairScore,
    /// How the match was produced
    pub match_type: MatchType,
    /// Confidence tier
    pub confidence: Confidence,
}

/// A candidate document offered for a still-unmatched transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossibleMatch {
    pub document: Document,
    pub score: u32,
    pub details: PairScore,
}

/// A transaction nothing claimed, with its ranked candidate documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmatchedTransaction {
    pub transaction: BankTransaction,
    /// Up to three candidates scoring at least 50, best first
    pub possible_matches: Vec<PossibleMatch>,
}

/// Aggregate counts for one reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    pub total_documents: usize,
    pub total_transactions: usize,
    pub matched_count: usize,
    pub unmatched_documents_count: usize,
    pub unmatched_transactions_count: usize,
    pub suggested_matches_count: usize,
    /// Matched documents as a percentage of all documents, rounded to two
    /// decimal places; 0 when there are no documents
    pub reconciliation_rate: f64,
}

/// Complete result of one `reconcile` call.
///
/// Every input document lands in exactly one of `matched` or
/// `unmatched_documents` (documents that only produced a suggestion stay in
/// `unmatched_documents`), and every input transaction lands in exactly one
/// of `matched` or `unmatched_transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub matched: Vec<MatchRecord>,
    pub suggested_matches: Vec<MatchRecord>,
    pub unmatched_documents: Vec<Document>,
    pub unmatched_transactions: Vec<UnmatchedTransaction>,
    pub summary: ReconciliationSummary,
}

/// Errors that can occur around the reconciliation core.
///
/// Missing or malformed domain data is never an error; it simply yields a
/// zero sub-score. These variants cover caller-contract violations at the
/// JSON boundary and storage-layer failures.
#[derive(Debug, thiserror::Error)]
pub enum ReconciliationError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Match not found: {0}")]
    MatchNotFound(String),
}

/// Result type for reconciliation operations
pub type EngineResult<T> = Result<T, ReconciliationError>;
