//! Notification command handlers

use super::CommandContext;
use crate::domain::{NotificationId, NotificationKind};
use crate::services::NotificationFeed;

pub async fn cmd_notification_list(ctx: &CommandContext, only_unread: bool) -> anyhow::Result<()> {
    let feed = NotificationFeed::new(ctx.client()?);
    let notifications = feed.list(only_unread).await?;

    if notifications.is_empty() {
        println!("No notifications.");
        return Ok(());
    }

    for n in &notifications {
        let marker = if n.is_read { " " } else { "•" };
        let tag = match n.kind {
            NotificationKind::Approval => "approval",
            NotificationKind::Approved => "approved",
            NotificationKind::Rejected => "rejected",
            NotificationKind::Other => "info",
        };
        println!(
            "{marker} [{:>4}] {:<9} {}",
            n.id.as_str(),
            tag,
            n.message.as_deref().unwrap_or("")
        );
        if let Some(created_at) = &n.created_at {
            println!("         {created_at}");
        }
    }

    println!();
    println!("Legend: • unread");
    Ok(())
}

pub async fn cmd_notification_count(ctx: &CommandContext) -> anyhow::Result<()> {
    let feed = NotificationFeed::new(ctx.client()?);
    println!("{}", feed.unread_count().await?);
    Ok(())
}

pub async fn cmd_notification_read(ctx: &CommandContext, id: &NotificationId) -> anyhow::Result<()> {
    let feed = NotificationFeed::new(ctx.client()?);
    feed.mark_read(id).await?;
    println!("✓ Notification {id} marked as read.");
    Ok(())
}

pub async fn cmd_notification_read_all(ctx: &CommandContext) -> anyhow::Result<()> {
    let feed = NotificationFeed::new(ctx.client()?);
    feed.mark_all_read().await?;
    println!("✓ All notifications marked as read.");
    Ok(())
}

pub async fn cmd_notification_delete(
    ctx: &CommandContext,
    id: &NotificationId,
) -> anyhow::Result<()> {
    let feed = NotificationFeed::new(ctx.client()?);
    feed.delete(id).await?;
    println!("✓ Notification {id} deleted.");
    Ok(())
}
