//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Ensure the upload directory exists; warn when the public assets directory is missing.
pub async fn ensure_env(public_dir: &str, upload_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(public_dir).await.is_err() {
        warn!(%public_dir, "public assets directory not found; ad images served from it may 404");
    }
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {upload_dir}: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::ensure_env;

    #[tokio::test]
    async fn creates_missing_upload_dir() -> anyhow::Result<()> {
        let base = std::env::temp_dir().join(format!("adboard-env-{}", std::process::id()));
        let uploads = base.join("uploads");
        ensure_env("/nonexistent-public-dir", uploads.to_str().unwrap_or_default()).await?;
        assert!(tokio::fs::metadata(&uploads).await?.is_dir());
        tokio::fs::remove_dir_all(&base).await?;
        Ok(())
    }
}
