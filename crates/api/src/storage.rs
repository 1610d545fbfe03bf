//! Local filesystem store for uploaded product images.
//!
//! Files land under `{media_root}/products/` with a timestamp-plus-random
//! name and are served back through the `/media` static route.

use std::path::{Path, PathBuf};

use abcpos_core::error::CoreError;
use rand::Rng;
use serde::Serialize;

use crate::error::AppError;

/// Maximum accepted upload size: 5 MiB.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// URL prefix under which stored files are served.
pub const PUBLIC_PREFIX: &str = "/media";

/// Map an accepted image content type to its file extension. Anything not
/// listed here is rejected.
fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// A stored file: its serving URL and its path relative to the store root.
#[derive(Debug, Clone, Serialize)]
pub struct StoredImage {
    pub url: String,
    pub path: String,
}

/// Writes and deletes uploaded files under a configured root directory.
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate and persist a product image upload.
    ///
    /// Rejects unsupported content types and files over [`MAX_UPLOAD_BYTES`].
    pub async fn save_product_image(
        &self,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredImage, AppError> {
        let ext = extension_for(content_type).ok_or_else(|| {
            CoreError::Validation(format!(
                "Unsupported image type '{content_type}'. Allowed: jpeg, png, gif, webp"
            ))
        })?;

        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(CoreError::Validation(format!(
                "File too large: {} bytes (max {MAX_UPLOAD_BYTES})",
                bytes.len()
            ))
            .into());
        }

        let millis = chrono::Utc::now().timestamp_millis();
        let suffix: u32 = rand::rng().random_range(0..1_000_000);
        let relative = format!("products/{millis}-{suffix}.{ext}");

        let full = self.root.join(&relative);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, bytes).await?;

        Ok(StoredImage {
            url: format!("{PUBLIC_PREFIX}/{relative}"),
            path: relative,
        })
    }

    /// Delete a stored file by its relative path or its serving URL.
    ///
    /// Returns `false` if the file did not exist.
    pub async fn delete(&self, path_or_url: &str) -> Result<bool, AppError> {
        let marker = format!("{PUBLIC_PREFIX}/");
        let relative = match path_or_url.find(&marker) {
            Some(idx) => &path_or_url[idx + marker.len()..],
            None => path_or_url.trim_start_matches('/'),
        };

        if relative.is_empty() || relative.split('/').any(|segment| segment == "..") {
            return Err(CoreError::Validation("Invalid file path".into()).into());
        }

        let full = self.root.join(relative);
        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, MediaStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MediaStore::new(dir.path().to_path_buf());
        (dir, store)
    }

    #[tokio::test]
    async fn saves_and_deletes_by_relative_path() {
        let (_dir, store) = store();

        let stored = store
            .save_product_image("image/png", b"not-really-a-png")
            .await
            .expect("save should succeed");

        assert!(stored.url.starts_with("/media/products/"));
        assert!(stored.path.starts_with("products/"));
        assert!(stored.path.ends_with(".png"));
        assert!(store.root().join(&stored.path).exists());

        let deleted = store.delete(&stored.path).await.expect("delete");
        assert!(deleted);
        assert!(!store.root().join(&stored.path).exists());
    }

    #[tokio::test]
    async fn deletes_by_full_url() {
        let (_dir, store) = store();

        let stored = store
            .save_product_image("image/webp", b"webp-bytes")
            .await
            .expect("save should succeed");

        let url = format!("http://localhost:3000{}", stored.url);
        let deleted = store.delete(&url).await.expect("delete");
        assert!(deleted);
    }

    #[tokio::test]
    async fn delete_of_missing_file_returns_false() {
        let (_dir, store) = store();
        let deleted = store.delete("products/nope.png").await.expect("delete");
        assert!(!deleted);
    }

    #[tokio::test]
    async fn rejects_unsupported_content_type() {
        let (_dir, store) = store();
        let result = store.save_product_image("image/svg+xml", b"<svg/>").await;
        assert!(result.is_err(), "svg uploads must be rejected");
    }

    #[tokio::test]
    async fn rejects_oversized_file() {
        let (_dir, store) = store();
        let big = vec![0u8; MAX_UPLOAD_BYTES + 1];
        let result = store.save_product_image("image/jpeg", &big).await;
        assert!(result.is_err(), "files over the limit must be rejected");
    }

    #[tokio::test]
    async fn rejects_path_traversal() {
        let (_dir, store) = store();
        let result = store.delete("products/../../etc/passwd").await;
        assert!(result.is_err(), "traversal segments must be rejected");
    }
}
