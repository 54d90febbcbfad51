use axum::http::HeaderMap;
use blueprint_core::config::{Config, DEFAULT_OWNER};
use blueprint_core::store::FileStore;
use std::path::PathBuf;

/// Header carrying the caller's owner identity.
pub const OWNER_HEADER: &str = "x-blueprint-owner";

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: FileStore,
    pub default_owner: String,
}

impl AppState {
    /// Reads `default_owner` from the config when the root is initialized.
    pub fn new(root: PathBuf) -> Self {
        let default_owner = match Config::load(&root) {
            Ok(cfg) => cfg.default_owner,
            Err(e) => {
                tracing::debug!(error = %e, "no usable config, using built-in default owner");
                DEFAULT_OWNER.to_string()
            }
        };
        Self::with_owner(root, default_owner)
    }

    pub fn with_owner(root: PathBuf, default_owner: impl Into<String>) -> Self {
        Self {
            store: FileStore::new(root),
            default_owner: default_owner.into(),
        }
    }

    /// The request's owner: the owner header when present and non-empty,
    /// else the configured default.
    pub fn owner(&self, headers: &HeaderMap) -> String {
        headers
            .get(OWNER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.default_owner.clone())
    }
}
