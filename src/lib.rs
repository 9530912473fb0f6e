//! # Reconciliation Core
//!
//! A reconciliation engine that decides, for each parsed financial document
//! (invoice or receipt), which bank-statement transaction most plausibly
//! represents its settlement — with an explicit confidence tier and an
//! auditable score breakdown.
//!
//! ## Features
//!
//! - **Multi-factor scoring**: weighted vendor-name (50%), amount (35%) and
//!   date (15%) sub-scores, each 0-100
//! - **Fuzzy name matching**: four similarity measures over normalized
//!   names; payment-rail prefixes, reference numbers and legal-entity
//!   suffixes are stripped first
//! - **Two-pass matching**: automatic claims above a threshold, suggestions
//!   for review below it, ranked candidates for whatever remains
//! - **Defensive extraction**: documents are arbitrary nested JSON from an
//!   upstream extractor; missing fields cost score instead of raising
//! - **Known-vendor categorization**: deterministic merchant lookup table
//! - **Storage abstraction**: persistence-agnostic trait for match rows
//!
//! ## Quick Start
//!
//! ```rust
//! use reconciliation_core::{BankTransaction, MatcherConfig, ReconciliationEngine};
//! use serde_json::json;
//!
//! let engine = ReconciliationEngine::new(MatcherConfig::default());
//!
//! let documents = vec![json!({
//!     "document_id": "inv-001",
//!     "documentMetadata": { "source": { "name": "Acme Corp" }, "documentDate": "2024-01-15" },
//!     "financialData": { "totalAmount": 100.0 }
//! })];
//! let transactions = vec![BankTransaction::new(
//!     "bank_tx_0",
//!     "ACME CORPORATION",
//!     -100.0,
//!     "2024-01-15",
//! )];
//!
//! let result = engine.reconcile(&documents, &transactions);
//! assert_eq!(result.matched.len(), 1);
//! assert_eq!(result.summary.reconciliation_rate, 100.0);
//! ```

pub mod config;
pub mod document;
pub mod matching;
pub mod traits;
pub mod types;
pub mod utils;
pub mod vendor;

// Re-export commonly used types
pub use config::MatcherConfig;
pub use matching::*;
pub use traits::*;
pub use types::*;
pub use vendor::*;
