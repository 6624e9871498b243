//! imgshare CLI entry point.
//!
//! Binary name: `imgshare`
//!
//! Parses CLI arguments, loads configuration, initializes tracing, the
//! database, and services, then dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use imgshare_infra::config::{load_global_config, resolve_data_dir};
use imgshare_observe::tracing_setup;

use cli::{Cli, Commands, ImageCommand, PostCommand, UserCommand};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir();
    tokio::fs::create_dir_all(&data_dir).await?;
    let config = load_global_config(&data_dir).await;

    // Verbosity flags override the configured filter
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => config.log_filter.as_str(),
        1 => "debug",
        _ => "trace",
    };
    tracing_setup::init_tracing(filter, config.enable_otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli, &data_dir, &config).await;

    tracing_setup::shutdown_tracing();
    result
}

async fn run(
    cli: Cli,
    data_dir: &std::path::Path,
    config: &imgshare_types::config::GlobalConfig,
) -> anyhow::Result<()> {
    let state = AppState::init(data_dir, config).await?;
    let user = cli.user.as_deref();
    let json = cli.json;

    match cli.command {
        Commands::User { action } => match action {
            UserCommand::Create { username, email } => {
                cli::user::create_user(&state, username, email, json).await?;
            }
            UserCommand::Show { username } => {
                cli::user::show_user(&state, &username, json).await?;
            }
        },

        Commands::Post { action } => match action {
            PostCommand::Create {
                title,
                caption,
                location,
            } => {
                let principal = cli::principal::resolve(user)?;
                cli::post::create_post(&state, &principal, title, caption, location, json)
                    .await?;
            }
            PostCommand::List => {
                cli::post::list_posts(&state, json).await?;
            }
            PostCommand::Mine => {
                let principal = cli::principal::resolve(user)?;
                cli::post::my_posts(&state, &principal, json).await?;
            }
            PostCommand::Show { id } => {
                let principal = cli::principal::resolve(user)?;
                cli::post::show_post(&state, &principal, id, json).await?;
            }
            PostCommand::Like { id } => {
                let principal = cli::principal::resolve(user)?;
                cli::post::like_post(&state, &principal, id, json).await?;
            }
            PostCommand::Update {
                id,
                title,
                caption,
                location,
            } => {
                let principal = cli::principal::resolve(user)?;
                cli::post::update_post(&state, &principal, id, title, caption, location, json)
                    .await?;
            }
            PostCommand::Delete { id } => {
                let principal = cli::principal::resolve(user)?;
                cli::post::delete_post(&state, &principal, id, json).await?;
            }
        },

        Commands::Image { action } => match action {
            ImageCommand::Attach { post_id, file } => {
                let principal = cli::principal::resolve(user)?;
                cli::image::attach_image(&state, &principal, post_id, &file, json).await?;
            }
            ImageCommand::Show { post_id, out } => {
                cli::image::show_image(&state, post_id, out.as_deref(), json).await?;
            }
        },
    }

    Ok(())
}
