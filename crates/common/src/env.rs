//! Environment/runtime helpers
//!
//! Startup sanity checks on the store location. Nothing here creates files or
//! directories; the store opens (and creates) its own file.

use std::path::Path;

use anyhow::anyhow;
use tracing::{info, warn};

/// Report on the store file before it is opened. Fails only when the parent
/// path exists but is not a directory.
pub async fn check_store_path(users_file: &Path) -> anyhow::Result<()> {
    if let Some(dir) = users_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        match tokio::fs::metadata(dir).await {
            Ok(meta) if !meta.is_dir() => {
                return Err(anyhow!("{} exists and is not a directory", dir.display()));
            }
            Ok(_) => {}
            Err(_) => info!(dir = %dir.display(), "data directory missing; it will be created"),
        }
    }
    if tokio::fs::metadata(users_file).await.is_err() {
        warn!(path = %users_file.display(), "user store not found; an empty one will be created");
    } else {
        info!(path = %users_file.display(), "using existing user store");
    }
    Ok(())
}
