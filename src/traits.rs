//! Traits for collaborator seams
//!
//! The engine itself is a pure function of its inputs; persisting its
//! output is an external concern. `MatchStorage` is the contract a
//! persistence layer implements to keep one row per match record, with the
//! user-confirmation lifecycle the review UI drives.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::{EngineResult, MatchRecord};

/// A persisted match row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMatch {
    /// Storage-assigned identifier
    pub id: String,
    /// The match as the engine produced it
    pub record: MatchRecord,
    /// Whether a user has confirmed the match
    pub user_confirmed: bool,
    /// When the user confirmed it, if they have
    pub confirmed_at: Option<NaiveDateTime>,
    /// When the row was created
    pub created_at: NaiveDateTime,
}

/// Storage abstraction for reconciliation results.
///
/// This trait lets the reconciliation core hand its matches to any backend
/// (PostgreSQL, SQLite, in-memory, etc.) without knowing how rows are kept.
#[async_trait]
pub trait MatchStorage: Send + Sync {
    /// Persist a match record, returning the stored row
    async fn save_match(&mut self, record: &MatchRecord) -> EngineResult<StoredMatch>;

    /// Get a stored match by ID
    async fn get_match(&self, match_id: &str) -> EngineResult<Option<StoredMatch>>;

    /// List all stored matches
    async fn list_matches(&self) -> EngineResult<Vec<StoredMatch>>;

    /// Mark a stored match as user-confirmed
    async fn confirm_match(&mut self, match_id: &str) -> EngineResult<StoredMatch>;

    /// Delete a stored match
    async fn delete_match(&mut self, match_id: &str) -> EngineResult<()>;

    /// Transaction IDs already consumed by a stored match, for filtering
    /// them out of later reconciliation runs
    async fn reconciled_transaction_ids(&self) -> EngineResult<Vec<String>>;
}
