//! Local storage for profile images, served under `/uploads`.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::errors::AppError;

/// URL prefix the upload directory is mounted at.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// File extension for an accepted image content type.
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Local image store rooted at a directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
    max_bytes: usize,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate and write an uploaded image. Returns its public path.
    pub async fn save_profile_image(
        &self,
        user_id: Uuid,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        let ext = image_extension(content_type).ok_or_else(|| {
            AppError::Validation("Only png, jpeg, gif and webp images are accepted".to_string())
        })?;
        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        if bytes.len() > self.max_bytes {
            return Err(AppError::Validation(format!(
                "Image exceeds the {} byte limit",
                self.max_bytes
            )));
        }

        let file_name = format!("{user_id}-{}.{ext}", Uuid::now_v7());
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to prepare upload dir: {e}")))?;
        tokio::fs::write(self.root.join(&file_name), bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store image: {e}")))?;

        tracing::info!(user_id = %user_id, file = %file_name, size = bytes.len(), "Profile image stored");
        Ok(format!("{PUBLIC_PREFIX}/{file_name}"))
    }

    /// Remove a previously stored image. Paths outside the store and
    /// missing files are ignored.
    pub async fn remove(&self, public_path: &str) {
        let Some(file_name) = public_path
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            return;
        };
        if file_name.is_empty() || file_name.contains('/') || file_name.contains("..") {
            return;
        }

        if let Err(e) = tokio::fs::remove_file(self.root.join(file_name)).await {
            tracing::warn!(file = %file_name, error = %e, "Failed to remove stored image");
        }
    }
}
