//! Approval review command handlers

use super::CommandContext;
use crate::domain::{RecordId, TabelRef};
use crate::services::{ApprovalOutcome, ApprovalService, DefaultApprovalService};

pub async fn cmd_approval_list(ctx: &CommandContext) -> anyhow::Result<()> {
    let service = DefaultApprovalService::new(ctx.admin_client()?);
    let groups = service.list_pending_grouped().await?;

    if groups.is_empty() {
        println!("No pending approvals.");
        return Ok(());
    }

    let total: usize = groups.values().map(Vec::len).sum();
    println!("Pending approvals ({total} total)");

    for (tabel_ref, records) in &groups {
        println!();
        println!("{} ({})", tabel_ref.label(), records.len());
        println!("{:-<70}", "");
        for record in records {
            println!(
                "  {} {:<6} aset {:<18} by {:<12} {}",
                tabel_ref.as_str(),
                record.record_id.as_str(),
                record.aset_id.as_ref().map_or("-", |a| a.as_str()),
                record.created_by.as_deref().unwrap_or("-"),
                record.created_at.as_deref().unwrap_or("")
            );
        }
    }

    println!();
    println!("Review with: asetrack approval show <type> <id>");
    Ok(())
}

pub async fn cmd_approval_show(
    ctx: &CommandContext,
    tabel_ref: TabelRef,
    record_id: &RecordId,
) -> anyhow::Result<()> {
    let service = DefaultApprovalService::new(ctx.admin_client()?);
    let detail = service.detail(tabel_ref, record_id).await?;

    println!("{} #{}", tabel_ref.label(), record_id);
    println!("{:-<60}", "");

    let mut keys: Vec<&String> = detail.fields.keys().collect();
    keys.sort();
    for key in keys {
        let value = match &detail.fields[key] {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => "-".to_string(),
            other => other.to_string(),
        };
        println!("{key:<20} {value}");
    }
    Ok(())
}

pub async fn cmd_approve(
    ctx: &CommandContext,
    tabel_ref: TabelRef,
    record_id: &RecordId,
) -> anyhow::Result<()> {
    let service = DefaultApprovalService::new(ctx.admin_client()?);
    let outcome = service.approve(tabel_ref, record_id).await?;

    println!("✓ Approved {} #{}", tabel_ref.label(), record_id);
    print_warnings(&outcome);
    Ok(())
}

pub async fn cmd_reject(
    ctx: &CommandContext,
    tabel_ref: TabelRef,
    record_id: &RecordId,
    reason: &str,
) -> anyhow::Result<()> {
    let service = DefaultApprovalService::new(ctx.admin_client()?);
    let outcome = service.reject(tabel_ref, record_id, reason).await?;

    println!("✓ Rejected {} #{}", tabel_ref.label(), record_id);
    print_warnings(&outcome);
    Ok(())
}

fn print_warnings(outcome: &ApprovalOutcome) {
    for warning in outcome.warnings() {
        println!("  ! {warning}");
    }
}
