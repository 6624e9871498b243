//! Resolves the request principal for CLI commands.
//!
//! The CLI has no login step; the caller names the user with `--user` or
//! `IMGSHARE_USER`, and that name is trusted as the authenticated identity.

use anyhow::{Result, bail};
use imgshare_types::principal::Principal;

/// Build the principal for commands that act on behalf of a user.
pub fn resolve(user: Option<&str>) -> Result<Principal> {
    match user.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(Principal::new(name)),
        _ => bail!("no user given; pass --user <name> or set IMGSHARE_USER"),
    }
}
