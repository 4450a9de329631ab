//! Transaction command handlers

use super::CommandContext;
use crate::domain::TransactionKind;
use crate::models::{NewTransaction, Transaction};
use crate::services::AssetService;

pub async fn cmd_transaction_list(
    ctx: &CommandContext,
    kind: TransactionKind,
) -> anyhow::Result<()> {
    let service = AssetService::new(ctx.client()?);
    let transactions = service.transactions(kind).await?;

    let label = kind.tabel_ref().label();
    if transactions.is_empty() {
        println!("No {label} records.");
        return Ok(());
    }

    println!("{label} ({} total)", transactions.len());
    println!("{:-<80}", "");

    for tx in &transactions {
        let status = tx
            .approval_status
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        println!(
            "#{:<6} {:<18} {:<10} {}",
            tx.id.as_str(),
            tx.aset_id.as_str(),
            status,
            tx.lokasi.as_deref().unwrap_or("-")
        );

        let details: Vec<String> = Transaction::summary_keys(kind)
            .iter()
            .filter_map(|key| tx.field(key).map(|v| format!("{key}: {v}")))
            .collect();
        if !details.is_empty() {
            println!("  {}", details.join(" | "));
        }
    }

    Ok(())
}

pub async fn cmd_transaction_submit(
    ctx: &CommandContext,
    transaction: NewTransaction,
) -> anyhow::Result<()> {
    let service = AssetService::new(ctx.client()?);
    service.submit(&transaction).await?;

    println!(
        "✓ {} for {} submitted; awaiting approval.",
        transaction.kind().tabel_ref().label(),
        transaction.aset_id
    );
    Ok(())
}
