//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::traits::{MatchStorage, StoredMatch};
use crate::types::{EngineResult, MatchRecord, ReconciliationError};

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    matches: Arc<RwLock<HashMap<String, StoredMatch>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            matches: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.matches.write().unwrap().clear();
    }
}

#[async_trait]
impl MatchStorage for MemoryStorage {
    async fn save_match(&mut self, record: &MatchRecord) -> EngineResult<StoredMatch> {
        let stored = StoredMatch {
            id: Uuid::new_v4().to_string(),
            record: record.clone(),
            user_confirmed: false,
            confirmed_at: None,
            created_at: chrono::Utc::now().naive_utc(),
        };
        self.matches
            .write()
            .unwrap()
            .insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn get_match(&self, match_id: &str) -> EngineResult<Option<StoredMatch>> {
        Ok(self.matches.read().unwrap().get(match_id).cloned())
    }

    async fn list_matches(&self) -> EngineResult<Vec<StoredMatch>> {
        let mut matches: Vec<StoredMatch> =
            self.matches.read().unwrap().values().cloned().collect();
        matches.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(matches)
    }

    async fn confirm_match(&mut self, match_id: &str) -> EngineResult<StoredMatch> {
        let mut matches = self.matches.write().unwrap();
        let stored = matches
            .get_mut(match_id)
            .ok_or_else(|| ReconciliationError::MatchNotFound(match_id.to_string()))?;
        stored.user_confirmed = true;
        stored.confirmed_at = Some(chrono::Utc::now().naive_utc());
        Ok(stored.clone())
    }

    async fn delete_match(&mut self, match_id: &str) -> EngineResult<()> {
        self.matches
            .write()
            .unwrap()
            .remove(match_id)
            .map(|_| ())
            .ok_or_else(|| ReconciliationError::MatchNotFound(match_id.to_string()))
    }

    async fn reconciled_transaction_ids(&self) -> EngineResult<Vec<String>> {
        let mut ids: Vec<String> = self
            .matches
            .read()
            .unwrap()
            .values()
            .map(|stored| stored.record.transaction.transaction_id.clone())
            .collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}
