//! User CLI commands: create, show.

use anyhow::{Result, anyhow};
use console::style;

use imgshare_core::repository::user::UserRepository;
use imgshare_types::user::NewUser;

use crate::state::AppState;

pub async fn create_user(state: &AppState, username: String, email: String, json: bool) -> Result<()> {
    let user = state
        .user_repo
        .create(&NewUser { username, email })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} User {} created",
        style("✓").green().bold(),
        style(&user.username).cyan()
    );
    println!(
        "  Post as this user with: {}",
        style(format!("imgshare --user {} post create --title <title>", user.username)).yellow()
    );
    println!();
    Ok(())
}

pub async fn show_user(state: &AppState, username: &str, json: bool) -> Result<()> {
    let user = state
        .user_repo
        .find_by_username(username)
        .await?
        .ok_or_else(|| anyhow!("username not found with username {username}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    println!();
    println!("  {}  {}", style("Username:").bold(), style(&user.username).cyan());
    println!("  {}  {}", style("Email:").bold(), user.email);
    println!("  {}  {}", style("ID:").bold(), style(user.id).dim());
    println!(
        "  {}  {}",
        style("Joined:").bold(),
        style(user.created_at.to_rfc3339()).dim()
    );
    println!();
    Ok(())
}
