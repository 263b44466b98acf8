//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

/// Check the store location before the store is opened.
pub async fn ensure_env(users_file: &std::path::Path) -> anyhow::Result<()> {
    common::env::check_store_path(users_file).await
}
