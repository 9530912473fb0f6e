//! Two-pass reconciliation engine
//!
//! Pass 1 walks documents in input order: each one scans the transactions
//! nothing has claimed yet, keeps its best-scoring pair, and either claims
//! it (automatic match) or surfaces it for review (suggestion, nothing
//! claimed). Pass 2 sweeps up whatever remains, attaching ranked candidate
//! documents to each unclaimed transaction.
//!
//! The assignment is greedy, not globally optimal: a document early in the
//! input can claim a transaction a later document would have matched
//! better. Suggestions and per-transaction candidates give a reviewer the
//! path to correct those cases.

use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

use crate::config::MatcherConfig;
use crate::document;
use crate::matching::score;
use crate::types::{
    BankTransaction, Confidence, Document, EngineResult, MatchRecord, MatchType, PairScore,
    PossibleMatch, ReconciliationError, ReconciliationResult, ReconciliationSummary,
    UnmatchedTransaction,
};

/// Default weighted-score threshold for claiming a match without review
pub const DEFAULT_AUTO_MATCH_THRESHOLD: u32 = 90;

/// Automatic matches at or above this score are high confidence
const HIGH_CONFIDENCE_THRESHOLD: u32 = 95;

/// Minimum score for a document to appear among an unmatched transaction's
/// candidates
const CANDIDATE_SCORE_FLOOR: u32 = 50;

/// Candidate documents listed per unmatched transaction
const MAX_POSSIBLE_MATCHES: usize = 3;

/// Engine for reconciling documents with bank-statement transactions.
///
/// Holds only its immutable configuration; every `reconcile` call is a
/// pure function of its inputs, so one engine can serve concurrent callers
/// without coordination.
pub struct ReconciliationEngine {
    config: MatcherConfig,
}

impl ReconciliationEngine {
    /// Create an engine. The configuration is normalized (clamped into
    /// valid ranges), never rejected.
    pub fn new(config: MatcherConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    /// The normalized configuration in effect
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Reconcile documents against transactions with the default automatic
    /// threshold of 90.
    pub fn reconcile(
        &self,
        documents: &[Document],
        transactions: &[BankTransaction],
    ) -> ReconciliationResult {
        self.reconcile_with_threshold(documents, transactions, DEFAULT_AUTO_MATCH_THRESHOLD)
    }

    /// Reconcile documents against transactions.
    ///
    /// Every document lands in exactly one of `matched` or
    /// `unmatched_documents`; every transaction in exactly one of `matched`
    /// or `unmatched_transactions`. Documents that only produced a
    /// suggestion appear in `suggested_matches` *and* stay in
    /// `unmatched_documents`, since nothing was claimed for them.
    pub fn reconcile_with_threshold(
        &self,
        documents: &[Document],
        transactions: &[BankTransaction],
        auto_match_threshold: u32,
    ) -> ReconciliationResult {
        let auto_match_threshold = auto_match_threshold.min(100);

        let mut matched = Vec::new();
        let mut suggested_matches = Vec::new();
        let mut claimed_transactions: HashSet<String> = HashSet::new();
        let mut claimed_documents: HashSet<String> = HashSet::new();

        // Pass 1: best unclaimed transaction per document, in input order.
        for (index, doc) in documents.iter().enumerate() {
            let mut best: Option<(usize, PairScore)> = None;

            for (tx_index, tx) in transactions.iter().enumerate() {
                if claimed_transactions.contains(&tx.transaction_id) {
                    continue;
                }
                let pair = score::score_pair(&self.config, doc, tx);
                if pair.total_score == 0 {
                    continue;
                }
                // Strict comparison: the first transaction seen wins ties.
                let better = best
                    .as_ref()
                    .is_none_or(|(_, current)| pair.total_score > current.total_score);
                if better {
                    best = Some((tx_index, pair));
                }
            }

            let Some((tx_index, pair)) = best else {
                continue;
            };

            if pair.total_score >= auto_match_threshold {
                let transaction = &transactions[tx_index];
                claimed_transactions.insert(transaction.transaction_id.clone());
                claimed_documents.insert(document::document_key(doc, index));

                let confidence = if pair.total_score >= HIGH_CONFIDENCE_THRESHOLD {
                    Confidence::High
                } else {
                    Confidence::Medium
                };
                matched.push(MatchRecord {
                    document: doc.clone(),
                    transaction: transaction.clone(),
                    score: pair.total_score,
                    score_details: pair,
                    match_type: MatchType::Automatic,
                    confidence,
                });
            } else if pair.total_score >= self.config.name_threshold {
                // Suggested only: the transaction stays available to other
                // documents and to the candidate search below.
                suggested_matches.push(MatchRecord {
                    document: doc.clone(),
                    transaction: transactions[tx_index].clone(),
                    score: pair.total_score,
                    score_details: pair,
                    match_type: MatchType::Suggested,
                    confidence: Confidence::Low,
                });
            }
        }

        // Pass 2: sweep unclaimed documents and transactions.
        let unmatched_documents: Vec<Document> = documents
            .iter()
            .enumerate()
            .filter(|(index, doc)| {
                !claimed_documents.contains(&document::document_key(doc, *index))
            })
            .map(|(_, doc)| doc.clone())
            .collect();

        let unmatched_transactions: Vec<UnmatchedTransaction> = transactions
            .iter()
            .filter(|tx| !claimed_transactions.contains(&tx.transaction_id))
            .map(|tx| UnmatchedTransaction {
                transaction: tx.clone(),
                possible_matches: self.possible_matches_for(tx, documents, &claimed_documents),
            })
            .collect();

        let total_documents = documents.len();
        let summary = ReconciliationSummary {
            total_documents,
            total_transactions: transactions.len(),
            matched_count: matched.len(),
            unmatched_documents_count: unmatched_documents.len(),
            unmatched_transactions_count: unmatched_transactions.len(),
            suggested_matches_count: suggested_matches.len(),
            reconciliation_rate: reconciliation_rate(matched.len(), total_documents),
        };

        debug!(
            total_documents,
            total_transactions = transactions.len(),
            matched = matched.len(),
            suggested = suggested_matches.len(),
            "reconciliation pass complete"
        );

        ReconciliationResult {
            matched,
            suggested_matches,
            unmatched_documents,
            unmatched_transactions,
            summary,
        }
    }

    /// Reconcile JSON payloads as they arrive from upstream collaborators.
    ///
    /// The only failure mode is a caller-contract violation: either payload
    /// not being an array, or a transaction row that does not deserialize.
    /// Incomplete domain data inside the rows never fails.
    pub fn reconcile_json(
        &self,
        documents: &Value,
        transactions: &Value,
    ) -> EngineResult<ReconciliationResult> {
        let documents = documents.as_array().ok_or_else(|| {
            ReconciliationError::InvalidInput("documents must be an array".to_string())
        })?;
        let transactions = transactions.as_array().ok_or_else(|| {
            ReconciliationError::InvalidInput("bank_transactions must be an array".to_string())
        })?;
        let transactions: Vec<BankTransaction> = transactions
            .iter()
            .map(|tx| {
                serde_json::from_value(tx.clone()).map_err(|error| {
                    ReconciliationError::InvalidInput(format!(
                        "bank transaction does not match the expected shape: {error}"
                    ))
                })
            })
            .collect::<EngineResult<_>>()?;
        Ok(self.reconcile(documents, &transactions))
    }

    /// Score a caller-chosen pair for human confirmation. Performs no
    /// claiming or bookkeeping; repeated calls are side-effect free.
    pub fn manual_match(&self, document: &Document, transaction: &BankTransaction) -> MatchRecord {
        let pair = score::score_pair(&self.config, document, transaction);
        MatchRecord {
            document: document.clone(),
            transaction: transaction.clone(),
            score: pair.total_score,
            score_details: pair,
            match_type: MatchType::Manual,
            confidence: Confidence::UserVerified,
        }
    }

    /// Score one pair without deciding anything, for audit displays
    pub fn score_pair(&self, document: &Document, transaction: &BankTransaction) -> PairScore {
        score::score_pair(&self.config, document, transaction)
    }

    /// Ranked candidate documents for a transaction nothing claimed.
    /// Documents claimed by an automatic match are excluded;
    /// suggestion-only documents stay eligible.
    fn possible_matches_for(
        &self,
        transaction: &BankTransaction,
        documents: &[Document],
        claimed_documents: &HashSet<String>,
    ) -> Vec<PossibleMatch> {
        let mut candidates: Vec<PossibleMatch> = documents
            .iter()
            .enumerate()
            .filter(|(index, doc)| {
                !claimed_documents.contains(&document::document_key(doc, *index))
            })
            .filter_map(|(_, doc)| {
                let pair = score::score_pair(&self.config, doc, transaction);
                (pair.total_score >= CANDIDATE_SCORE_FLOOR).then(|| PossibleMatch {
                    document: doc.clone(),
                    score: pair.total_score,
                    details: pair,
                })
            })
            .collect();

        // Stable sort keeps input order among equal scores.
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(MAX_POSSIBLE_MATCHES);
        candidates
    }
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

fn reconciliation_rate(matched: usize, total_documents: usize) -> f64 {
    if total_documents == 0 {
        return 0.0;
    }
    let rate = matched as f64 / total_documents as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invoice(id: &str, vendor: &str, amount: f64, date: &str) -> Value {
        json!({
            "document_id": id,
            "documentMetadata": { "source": { "name": vendor }, "documentDate": date },
            "financialData": { "totalAmount": amount }
        })
    }

    fn tx(id: &str, description: &str, amount: f64, date: &str) -> BankTransaction {
        BankTransaction::new(id, description, amount, date)
    }

    #[test]
    fn exact_match_is_automatic_and_high_confidence() {
        let engine = ReconciliationEngine::default();
        let documents = vec![invoice("d1", "Acme Corp", 100.0, "2024-01-15")];
        let transactions = vec![tx("t1", "Acme Corp", -100.0, "2024-01-15")];

        let result = engine.reconcile(&documents, &transactions);
        assert_eq!(result.matched.len(), 1);
        let record = &result.matched[0];
        assert_eq!(record.score, 100);
        assert_eq!(record.match_type, MatchType::Automatic);
        assert_eq!(record.confidence, Confidence::High);
        assert!(result.unmatched_documents.is_empty());
        assert!(result.unmatched_transactions.is_empty());
        assert_eq!(result.summary.reconciliation_rate, 100.0);
    }

    #[test]
    fn medium_confidence_below_95() {
        let engine = ReconciliationEngine::default();
        // Name and amount agree exactly, date two days off:
        // 50 + 35 + 0.15 * 60 = 94
        let documents = vec![invoice("d1", "Acme Corp", 100.0, "2024-01-15")];
        let transactions = vec![tx("t1", "Acme Corp", -100.0, "2024-01-17")];

        let result = engine.reconcile(&documents, &transactions);
        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].score, 94);
        assert_eq!(result.matched[0].confidence, Confidence::Medium);
    }

    #[test]
    fn moderate_score_is_suggested_without_claiming() {
        let engine = ReconciliationEngine::default();
        // Name and date exact, amount 3% off: 50 + 17.5 + 15 rounds to 83,
        // inside the suggestion band [80, 90).
        let documents = vec![invoice("d1", "Acme Corp", 100.0, "2024-01-15")];
        let transactions = vec![tx("t1", "Acme Corp", -103.0, "2024-01-15")];

        let result = engine.reconcile(&documents, &transactions);
        assert!(result.matched.is_empty());
        assert_eq!(result.suggested_matches.len(), 1);
        let suggestion = &result.suggested_matches[0];
        assert_eq!(suggestion.score, 83);
        assert_eq!(suggestion.match_type, MatchType::Suggested);
        assert_eq!(suggestion.confidence, Confidence::Low);

        // Nothing was claimed: the document counts as unmatched and the
        // transaction keeps its candidate list.
        assert_eq!(result.unmatched_documents.len(), 1);
        assert_eq!(result.unmatched_transactions.len(), 1);
        assert_eq!(result.unmatched_transactions[0].possible_matches.len(), 1);
    }

    #[test]
    fn greedy_first_document_claims_contested_transaction() {
        let engine = ReconciliationEngine::default();
        let documents = vec![
            invoice("d1", "Acme Corp", 100.0, "2024-01-16"),
            invoice("d2", "Acme Corp", 100.0, "2024-01-15"),
        ];
        // Perfect for d2, one day off for d1; d1 is processed first and
        // claims it anyway.
        let transactions = vec![tx("t1", "Acme Corp", -100.0, "2024-01-15")];

        let result = engine.reconcile(&documents, &transactions);
        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].document["document_id"], "d1");
        assert_eq!(result.unmatched_documents.len(), 1);
        assert_eq!(result.unmatched_documents[0]["document_id"], "d2");
    }

    #[test]
    fn tie_keeps_first_transaction_in_scan_order() {
        let engine = ReconciliationEngine::default();
        let documents = vec![invoice("d1", "Acme Corp", 100.0, "2024-01-15")];
        let transactions = vec![
            tx("t1", "Acme Corp", -100.0, "2024-01-15"),
            tx("t2", "Acme Corp", -100.0, "2024-01-15"),
        ];

        let result = engine.reconcile(&documents, &transactions);
        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].transaction.transaction_id, "t1");
        assert_eq!(result.unmatched_transactions.len(), 1);
        assert_eq!(
            result.unmatched_transactions[0].transaction.transaction_id,
            "t2"
        );
    }

    #[test]
    fn partition_invariant_holds() {
        let engine = ReconciliationEngine::default();
        let documents = vec![
            invoice("d1", "Acme Corp", 100.0, "2024-01-15"),
            invoice("d2", "Globex LLC", 2500.0, "2024-01-20"),
            invoice("d3", "Initech Ltd", 75.5, "2024-02-01"),
        ];
        let transactions = vec![
            tx("t1", "ACME CORP", -100.0, "2024-01-15"),
            tx("t2", "WIRE GLOBEX", -2500.0, "2024-01-22"),
            tx("t3", "UNRELATED VENDOR", -999.0, "2024-03-15"),
        ];

        let result = engine.reconcile(&documents, &transactions);

        let matched_docs = result.matched.len();
        let unmatched_docs = result.unmatched_documents.len();
        assert_eq!(matched_docs + unmatched_docs, documents.len());

        let matched_txs = result.matched.len();
        let unmatched_txs = result.unmatched_transactions.len();
        assert_eq!(matched_txs + unmatched_txs, transactions.len());

        assert_eq!(result.summary.total_documents, 3);
        assert_eq!(result.summary.total_transactions, 3);
        assert_eq!(result.summary.matched_count, matched_docs);
        assert_eq!(result.summary.unmatched_documents_count, unmatched_docs);
        assert_eq!(result.summary.unmatched_transactions_count, unmatched_txs);
    }

    #[test]
    fn candidates_are_ranked_and_capped_at_three() {
        let engine = ReconciliationEngine::default();
        // Five documents score at least 50 against the one transaction
        // through name similarity and amount proximity, but none reaches
        // the automatic threshold (the date is months off). Amount tiers:
        // d1/d2 within 1% (score 78), d3/d4 within 5% (68), d5 beyond (50).
        let documents = vec![
            invoice("d1", "Acme Corp", 100.5, "2024-03-15"),
            invoice("d2", "Acme Corp", 101.0, "2024-03-15"),
            invoice("d3", "Acme Corp", 103.0, "2024-03-15"),
            invoice("d4", "Acme Corp", 104.0, "2024-03-15"),
            invoice("d5", "Acme Corp", 110.0, "2024-03-15"),
        ];
        let transactions = vec![tx("t1", "ACME CORP", -100.0, "2024-01-15")];

        let result = engine.reconcile(&documents, &transactions);
        assert!(result.matched.is_empty());
        assert_eq!(result.unmatched_transactions.len(), 1);

        let candidates = &result.unmatched_transactions[0].possible_matches;
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].score, 78);
        assert_eq!(candidates[1].score, 78);
        assert_eq!(candidates[2].score, 68);
        // Equal scores keep input order.
        assert_eq!(candidates[0].document["document_id"], "d1");
        assert_eq!(candidates[1].document["document_id"], "d2");
        assert_eq!(candidates[2].document["document_id"], "d3");
    }

    #[test]
    fn empty_inputs_produce_empty_result() {
        let engine = ReconciliationEngine::default();
        let result = engine.reconcile(&[], &[]);
        assert!(result.matched.is_empty());
        assert!(result.suggested_matches.is_empty());
        assert!(result.unmatched_documents.is_empty());
        assert!(result.unmatched_transactions.is_empty());
        assert_eq!(result.summary.reconciliation_rate, 0.0);
    }

    #[test]
    fn documents_without_any_fields_stay_unmatched() {
        let engine = ReconciliationEngine::default();
        let documents = vec![json!({ "unrelated": true })];
        let transactions = vec![tx("t1", "Acme", -10.0, "2024-01-01")];

        let result = engine.reconcile(&documents, &transactions);
        assert!(result.matched.is_empty());
        assert_eq!(result.unmatched_documents.len(), 1);
        assert_eq!(result.unmatched_transactions.len(), 1);
        assert!(result.unmatched_transactions[0].possible_matches.is_empty());
    }

    #[test]
    fn determinism_across_calls() {
        let engine = ReconciliationEngine::default();
        let documents = vec![
            invoice("d1", "Acme Corp", 100.0, "2024-01-15"),
            invoice("d2", "Globex LLC", 2500.0, "2024-01-20"),
        ];
        let transactions = vec![
            tx("t1", "ACME CORP", -100.0, "2024-01-15"),
            tx("t2", "CHK GLOBEX 000123", -2500.0, "2024-01-21"),
        ];

        let first = engine.reconcile(&documents, &transactions);
        let second = engine.reconcile(&documents, &transactions);
        assert_eq!(first, second);
    }

    #[test]
    fn manual_match_scores_without_claiming() {
        let engine = ReconciliationEngine::default();
        let document = invoice("d1", "Acme Corp", 100.0, "2024-01-15");
        let transaction = tx("t1", "Acme Corp", -100.0, "2024-01-15");

        let record = engine.manual_match(&document, &transaction);
        assert_eq!(record.match_type, MatchType::Manual);
        assert_eq!(record.confidence, Confidence::UserVerified);
        assert_eq!(record.score, 100);

        // Repeating the call yields the same record; nothing was recorded.
        assert_eq!(engine.manual_match(&document, &transaction), record);
    }

    #[test]
    fn reconcile_json_rejects_non_arrays() {
        let engine = ReconciliationEngine::default();
        let err = engine
            .reconcile_json(&json!({ "not": "a list" }), &json!([]))
            .unwrap_err();
        assert!(matches!(err, ReconciliationError::InvalidInput(_)));

        let err = engine
            .reconcile_json(&json!([]), &json!("nope"))
            .unwrap_err();
        assert!(matches!(err, ReconciliationError::InvalidInput(_)));
    }

    #[test]
    fn reconcile_json_rejects_malformed_transaction_rows() {
        let engine = ReconciliationEngine::default();
        let err = engine
            .reconcile_json(&json!([]), &json!([{ "description": "missing id and amount" }]))
            .unwrap_err();
        assert!(matches!(err, ReconciliationError::InvalidInput(_)));
    }

    #[test]
    fn reconcile_json_accepts_well_shaped_payloads() {
        let engine = ReconciliationEngine::default();
        let documents = json!([{
            "document_id": "d1",
            "companyName": "Acme Corp",
            "totalAmount": "$1,250.00",
            "documentDate": "2024-01-15"
        }]);
        let transactions = json!([{
            "transaction_id": "t1",
            "description": "ACME CORP",
            "amount": -1250.0,
            "date": "2024-01-15"
        }]);

        let result = engine.reconcile_json(&documents, &transactions).unwrap();
        assert_eq!(result.matched.len(), 1);
    }
}
