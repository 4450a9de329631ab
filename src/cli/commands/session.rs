//! Login, logout and whoami command handlers

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, bail};

use super::CommandContext;
use crate::services::UserService;

/// Uses the given password, or prompts on stderr and reads one line from
/// stdin.
pub fn password_or_prompt(password: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    std::io::stderr().flush()?;
    read_password(std::io::stdin().lock())
}

fn read_password(mut input: impl BufRead) -> anyhow::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read password")?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        bail!("No password given");
    }
    Ok(password.to_string())
}

pub async fn cmd_login(ctx: &CommandContext, username: &str, password: &str) -> anyhow::Result<()> {
    let client = Arc::new(ctx.anonymous_client()?);
    let session = UserService::new(client)
        .login(username, password)
        .await
        .context("Login failed")?;

    ctx.store().save(&session)?;

    println!("✓ Logged in as {} ({})", session.username, session.role);
    if !session.beban.is_empty() {
        println!("  Beban: {}", session.beban.join(", "));
    }
    Ok(())
}

pub fn cmd_logout(ctx: &CommandContext) -> anyhow::Result<()> {
    if ctx.store().clear()? {
        println!("✓ Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub fn cmd_whoami(ctx: &CommandContext) -> anyhow::Result<()> {
    let session = ctx.session()?;

    println!("User:    {}", session.username);
    println!("Role:    {}", session.role);
    if let Some(id) = &session.id {
        println!("ID:      {id}");
    }
    let beban = if session.beban.is_empty() {
        "-".to_string()
    } else {
        session.beban.join(", ")
    };
    println!("Beban:   {beban}");
    println!("Backend: {}", ctx.config().backend.base_url);
    println!("Session: {}", ctx.store().path().display());
    Ok(())
}
