//! CLI command definitions for the `imgshare` binary.
//!
//! Uses clap derive macros for argument parsing. Commands follow a
//! noun-verb pattern (e.g., `imgshare post create`, `imgshare post like 3`).

pub mod image;
pub mod post;
pub mod principal;
pub mod user;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Share posts and images.
#[derive(Parser)]
#[command(name = "imgshare", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Act as this user (the authenticated principal).
    #[arg(short, long, global = true, env = "IMGSHARE_USER")]
    pub user: Option<String>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage user accounts.
    User {
        #[command(subcommand)]
        action: UserCommand,
    },

    /// Create, list, like, edit, and delete posts.
    Post {
        #[command(subcommand)]
        action: PostCommand,
    },

    /// Attach and view post images.
    Image {
        #[command(subcommand)]
        action: ImageCommand,
    },
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// Register a new user.
    Create {
        username: String,
        email: String,
    },

    /// Show a user's profile.
    Show {
        username: String,
    },
}

#[derive(Subcommand)]
pub enum PostCommand {
    /// Create a post as the current user.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        caption: String,
        #[arg(long, default_value = "")]
        location: String,
    },

    /// List every post, newest first.
    #[command(alias = "ls")]
    List,

    /// List the current user's posts, newest first.
    Mine,

    /// Show one of the current user's posts.
    Show {
        id: i64,
    },

    /// Like a post, or remove the like if already given.
    Like {
        id: i64,
    },

    /// Edit title, caption, or location of one of the current user's posts.
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        caption: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },

    /// Delete one of the current user's posts and its image.
    #[command(alias = "rm")]
    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ImageCommand {
    /// Attach an image file to one of the current user's posts.
    Attach {
        post_id: i64,
        file: PathBuf,
    },

    /// Show the image attached to a post.
    Show {
        post_id: i64,
        /// Write the image bytes to this file.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_post_create_with_user() {
        let cli = Cli::try_parse_from([
            "imgshare", "--user", "alice", "post", "create", "--title", "T", "--caption", "C",
        ])
        .unwrap();

        assert_eq!(cli.user.as_deref(), Some("alice"));
        match cli.command {
            Commands::Post {
                action: PostCommand::Create {
                    title,
                    caption,
                    location,
                },
            } => {
                assert_eq!(title, "T");
                assert_eq!(caption, "C");
                assert_eq!(location, "");
            }
            _ => panic!("expected post create"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["imgshare", "post", "like", "7", "--json", "-u", "bob"])
            .unwrap();

        assert!(cli.json);
        assert_eq!(cli.user.as_deref(), Some("bob"));
        assert!(matches!(
            cli.command,
            Commands::Post {
                action: PostCommand::Like { id: 7 }
            }
        ));
    }

    #[test]
    fn test_parse_update_fields_are_optional() {
        let cli = Cli::try_parse_from(["imgshare", "post", "update", "3", "--title", "New"])
            .unwrap();

        match cli.command {
            Commands::Post {
                action:
                    PostCommand::Update {
                        id,
                        title,
                        caption,
                        location,
                    },
            } => {
                assert_eq!(id, 3);
                assert_eq!(title.as_deref(), Some("New"));
                assert!(caption.is_none());
                assert!(location.is_none());
            }
            _ => panic!("expected post update"),
        }
    }

    #[test]
    fn test_parse_rejects_non_numeric_post_id() {
        assert!(Cli::try_parse_from(["imgshare", "post", "show", "abc"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
