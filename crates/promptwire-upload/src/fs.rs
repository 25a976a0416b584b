//! Filesystem storage backend
//!
//! Objects land at `{base_path}/{path}`; the locator is that full path.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use crate::error::UploadError;
use crate::uploader::{Uploader, validate_object_name};

/// Filesystem-based uploader
#[derive(Debug, Clone)]
pub struct FsUploader {
    base_path: PathBuf,
}

impl FsUploader {
    /// Create an uploader writing under `base_path`
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Directory objects are written under
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl Uploader for FsUploader {
    fn name(&self) -> &'static str {
        "filesystem"
    }

    async fn upload(&self, path: &str, value: &Value) -> Result<String, UploadError> {
        validate_object_name(path)?;

        let target = self.base_path.join(path);
        let body = serde_json::to_vec(value)?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&target, &body).await?;

        tracing::debug!(path = %target.display(), size = body.len(), "payload written");

        Ok(target.display().to_string())
    }
}
