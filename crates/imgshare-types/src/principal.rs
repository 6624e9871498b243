use serde::{Deserialize, Serialize};

/// The authenticated caller of a request.
///
/// Produced by whatever authenticates the request (the CLI's `--user` flag
/// in this workspace) and consumed by the services, which resolve it to a
/// stored `User` by username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    name: String,
}

impl Principal {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The username this principal was authenticated as.
    pub fn name(&self) -> &str {
        &self.name
    }
}
