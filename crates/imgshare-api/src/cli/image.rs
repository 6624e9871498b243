//! Image CLI commands: attach, show.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use imgshare_types::post::PostId;
use imgshare_types::principal::Principal;

use crate::state::AppState;

/// Read `file` and attach it to one of the principal's posts.
pub async fn attach_image(
    state: &AppState,
    principal: &Principal,
    post_id: i64,
    file: &Path,
    json: bool,
) -> Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let size = bytes.len();

    let image = state
        .image_service
        .upload_image_to_post(&PostId(post_id), &name, bytes, principal)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&image)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Attached {} ({} bytes) to post {}",
        style("✓").green().bold(),
        style(&image.name).cyan(),
        size,
        style(format!("#{post_id}")).cyan()
    );
    println!();
    Ok(())
}

/// Show the image on a post, optionally writing its bytes to `out`.
pub async fn show_image(state: &AppState, post_id: i64, out: Option<&Path>, json: bool) -> Result<()> {
    let image = state
        .image_service
        .get_image_for_post(&PostId(post_id))
        .await?;

    if let Some(out) = out {
        tokio::fs::write(out, &image.image_bytes)
            .await
            .with_context(|| format!("failed to write {}", out.display()))?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&image)?);
        return Ok(());
    }

    println!();
    println!("  {}  {}", style("Name:").bold(), style(&image.name).cyan());
    println!("  {}  {} bytes", style("Size:").bold(), image.image_bytes.len());
    if let Some(out) = out {
        println!("  {}  {}", style("Saved to:").bold(), out.display());
    }
    println!();
    Ok(())
}
