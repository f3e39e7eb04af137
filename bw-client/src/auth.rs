use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Response of the `/token` endpoint
#[derive(Clone, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

/// Body for registering a new account
#[derive(Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub invite_code: String,
}

/// The account behind the current token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
}

/// The bearer token, kept in a single file. This is the only client-side state.
#[derive(Clone, Debug)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored token, or `None` when logged out.
    pub fn token(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(token) => Some(token.trim().to_owned()).filter(|t| !t.is_empty()),
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!("Could not read token file {}: {e}", self.path.display());
                }
                None
            }
        }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        std::fs::write(&self.path, token)
            .with_context(|| format!("Writing token file {}", self.path.display()))
    }

    /// Forget the token. Clearing an already empty store is fine.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Removing token file {}", self.path.display()))
            }
        }
    }
}
