//! User administration command handlers

use super::CommandContext;
use crate::models::NewUser;
use crate::services::UserService;

pub async fn cmd_user_list(ctx: &CommandContext) -> anyhow::Result<()> {
    let service = UserService::new(ctx.admin_client()?);
    let users = service.list().await?;

    if users.is_empty() {
        println!("No users.");
        return Ok(());
    }

    println!("Users ({} total)", users.len());
    println!("{:-<70}", "");
    for user in &users {
        println!(
            "{:<16} {:<24} {:<6} {}",
            user.username,
            user.nama.as_deref().unwrap_or("-"),
            user.role,
            user.beban.join(",")
        );
    }
    Ok(())
}

pub async fn cmd_user_create(ctx: &CommandContext, user: NewUser) -> anyhow::Result<()> {
    let service = UserService::new(ctx.admin_client()?);
    service.create(&user).await?;
    println!("✓ User {} created ({}).", user.username, user.role);
    Ok(())
}

pub async fn cmd_user_beban(
    ctx: &CommandContext,
    username: &str,
    beban: &[String],
) -> anyhow::Result<()> {
    let service = UserService::new(ctx.admin_client()?);
    let sent = service.set_beban(username, beban).await?;
    println!("✓ Beban for {username}: {}", sent.join(", "));
    Ok(())
}

pub async fn cmd_user_password(
    ctx: &CommandContext,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    let service = UserService::new(ctx.admin_client()?);
    service.reset_password(username, password).await?;
    println!("✓ Password for {username} reset.");
    Ok(())
}
