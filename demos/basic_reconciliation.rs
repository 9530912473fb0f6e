//! Basic reconciliation example

use reconciliation_core::utils::MemoryStorage;
use reconciliation_core::{
    BankTransaction, MatchStorage, MatcherConfig, ReconciliationEngine,
};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("🧾 Reconciliation Core - Basic Example\n");

    // 1. Documents as the upstream extraction pipeline produces them
    let documents = vec![
        json!({
            "document_id": "inv-1001",
            "documentMetadata": { "source": { "name": "Acme Corp" }, "documentDate": "2024-01-15" },
            "financialData": { "totalAmount": 1250.00 }
        }),
        json!({
            "document_id": "inv-1002",
            "partyInformation": { "vendor": { "name": "Office Depot Inc." } },
            "totalAmount": "$89.99",
            "documentDate": "2024-01-18"
        }),
        json!({
            "document_id": "inv-1003",
            "companyName": "Initech Ltd",
            "totalAmount": 320.00,
            "documentDate": "2024-02-02"
        }),
    ];

    // 2. Transactions as the bank-statement parser produces them
    let transactions = vec![
        BankTransaction::new("bank_tx_0", "ACME CORP", -1250.00, "2024-01-15"),
        BankTransaction::new("bank_tx_1", "POS OFFICE DEPOT #2231", -89.99, "2024-01-19"),
        BankTransaction::new("bank_tx_2", "SQ *LOCAL COFFEE 00123456", -14.50, "2024-01-25"),
    ];

    // 3. Reconcile
    println!("🔍 Reconciling {} documents against {} transactions...\n", documents.len(), transactions.len());
    let engine = ReconciliationEngine::new(MatcherConfig::default());
    let result = engine.reconcile(&documents, &transactions);

    for record in &result.matched {
        println!(
            "  ✓ {} ↔ {} (score {}, {:?})",
            record.document["document_id"],
            record.transaction.transaction_id,
            record.score,
            record.confidence
        );
        if let Some(name) = &record.score_details.details.name {
            println!(
                "      name: \"{}\" vs \"{}\" → {}",
                name.document_vendor, name.transaction_description, name.similarity
            );
        }
    }

    for suggestion in &result.suggested_matches {
        println!(
            "  ? suggested: {} ↔ {} (score {})",
            suggestion.document["document_id"],
            suggestion.transaction.transaction_id,
            suggestion.score
        );
    }

    for document in &result.unmatched_documents {
        println!("  ✗ unmatched document: {}", document["document_id"]);
    }
    for unmatched in &result.unmatched_transactions {
        println!(
            "  ✗ unmatched transaction: {} ({} candidates)",
            unmatched.transaction.transaction_id,
            unmatched.possible_matches.len()
        );
    }

    println!(
        "\n📊 Summary: {}/{} matched ({}%)",
        result.summary.matched_count,
        result.summary.total_documents,
        result.summary.reconciliation_rate
    );

    // 4. Persist the matches the way a downstream layer would
    let mut storage = MemoryStorage::new();
    for record in &result.matched {
        storage.save_match(record).await?;
    }
    let stored = storage.list_matches().await?;
    println!("💾 Stored {} match rows", stored.len());

    // 5. A reviewer confirms the first match
    if let Some(first) = stored.first() {
        let confirmed = storage.confirm_match(&first.id).await?;
        println!("👍 Confirmed match {}", confirmed.id);
    }

    Ok(())
}
