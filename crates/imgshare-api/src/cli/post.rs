//! Post CLI commands: create, list, mine, show, like, update, delete.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use imgshare_types::post::{CreatePostRequest, Post, PostId, UpdatePostRequest};
use imgshare_types::principal::Principal;

use crate::state::AppState;

pub async fn create_post(
    state: &AppState,
    principal: &Principal,
    title: String,
    caption: String,
    location: String,
    json: bool,
) -> Result<()> {
    let request = CreatePostRequest {
        title,
        caption,
        location,
    };
    let post = state.post_service.create_post(request, principal).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Post {} created",
        style("✓").green().bold(),
        style(format!("#{}", post.id)).cyan()
    );
    print_post_details(&post);
    Ok(())
}

/// List every post in a table, newest first.
pub async fn list_posts(state: &AppState, json: bool) -> Result<()> {
    let posts = state.post_service.get_all_posts().await?;
    print_posts(&posts, json)
}

/// List the principal's own posts, newest first.
pub async fn my_posts(state: &AppState, principal: &Principal, json: bool) -> Result<()> {
    let posts = state.post_service.get_all_posts_for_user(principal).await?;
    print_posts(&posts, json)
}

pub async fn show_post(state: &AppState, principal: &Principal, id: i64, json: bool) -> Result<()> {
    let post = state
        .post_service
        .get_post_by_id(&PostId(id), principal)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    println!();
    print_post_details(&post);
    Ok(())
}

/// Toggle the principal's like on a post.
pub async fn like_post(state: &AppState, principal: &Principal, id: i64, json: bool) -> Result<()> {
    let post = state
        .post_service
        .like_post(&PostId(id), principal.name())
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    let verb = if post.liked_users.contains(principal.name()) {
        "Liked"
    } else {
        "Unliked"
    };
    println!();
    println!(
        "  {} {} post {} ({} like{})",
        style("♥").red().bold(),
        verb,
        style(format!("#{}", post.id)).cyan(),
        post.likes,
        if post.likes == 1 { "" } else { "s" }
    );
    println!();
    Ok(())
}

/// Edit a post. Fields not given keep their current value.
pub async fn update_post(
    state: &AppState,
    principal: &Principal,
    id: i64,
    title: Option<String>,
    caption: Option<String>,
    location: Option<String>,
    json: bool,
) -> Result<()> {
    let current = state
        .post_service
        .get_post_by_id(&PostId(id), principal)
        .await?;

    let request = UpdatePostRequest {
        id: current.id,
        title: title.unwrap_or(current.title),
        caption: caption.unwrap_or(current.caption),
        location: location.unwrap_or(current.location),
    };
    let post = state.post_service.update_post(request, principal).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Post {} updated",
        style("✓").green().bold(),
        style(format!("#{}", post.id)).cyan()
    );
    print_post_details(&post);
    Ok(())
}

pub async fn delete_post(state: &AppState, principal: &Principal, id: i64, json: bool) -> Result<()> {
    state
        .post_service
        .delete_post(&PostId(id), principal)
        .await?;

    if json {
        println!("{}", serde_json::json!({ "deleted": id }));
        return Ok(());
    }

    println!();
    println!(
        "  {} Post {} deleted",
        style("✓").green().bold(),
        style(format!("#{id}")).cyan()
    );
    println!();
    Ok(())
}

fn print_posts(posts: &[Post], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(posts)?);
        return Ok(());
    }

    if posts.is_empty() {
        println!();
        println!(
            "  {} No posts yet. Create one with: {}",
            style("i").blue().bold(),
            style("imgshare post create --title <title>").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Caption").fg(Color::White),
        Cell::new("Location").fg(Color::White),
        Cell::new("Likes").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for post in posts {
        table.add_row(vec![
            Cell::new(post.id).fg(Color::DarkGrey),
            Cell::new(&post.title).fg(Color::Cyan),
            Cell::new(truncate(&post.caption, 50)),
            Cell::new(&post.location),
            Cell::new(post.likes).fg(if post.likes > 0 { Color::Red } else { Color::DarkGrey }),
            Cell::new(post.created_at.format("%Y-%m-%d %H:%M")).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} post{}",
        style(posts.len()).bold(),
        if posts.len() == 1 { "" } else { "s" }
    );
    println!();
    Ok(())
}

fn print_post_details(post: &Post) {
    println!();
    println!("  {}  {}", style("Title:").bold(), style(&post.title).cyan());
    println!("  {}  {}", style("Caption:").bold(), post.caption);
    println!("  {}  {}", style("Location:").bold(), post.location);
    println!("  {}  {}", style("Likes:").bold(), post.likes);
    if !post.liked_users.is_empty() {
        let names: Vec<&str> = post.liked_users.iter().map(String::as_str).collect();
        println!("  {}  {}", style("Liked by:").bold(), names.join(", "));
    }
    println!(
        "  {}  {}",
        style("Created:").bold(),
        style(post.created_at.to_rfc3339()).dim()
    );
    println!();
}

/// Shorten to at most `max` characters, marking the cut with "...".
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 50), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("ééééé", 4), "é...");
    }
}
