//! Storage backends for reference-mode GenAI telemetry
//!
//! In reference mode message content is written to external storage and the
//! telemetry event carries only a locator. Backends are selected from a
//! destination URI and shared through a write-once cell.

#![allow(clippy::must_use_candidate)]

mod cell;
mod destination;
mod error;
pub mod fs;
pub mod gcs;
mod uploader;

use std::fmt;
use std::sync::Arc;

use promptwire_config::UploadConfig;
use serde_json::Value;

pub use cell::UploaderCell;
pub use destination::{DestinationOptions, GOOGLE_OAUTH_ACCESS_TOKEN_ENV, from_destination};
pub use error::UploadError;
pub use fs::FsUploader;
pub use gcs::GcsUploader;
pub use uploader::{Uploader, validate_object_name};

/// Locator recorded when content could not be stored
pub const DISCARD_LOCATOR: &str = "/dev/null";

/// Environment variable naming the default destination
pub const UPLOAD_BASE_PATH_ENV: &str = "OTEL_INSTRUMENTATION_GENAI_UPLOAD_BASE_PATH";

static GLOBAL: UploaderCell = UploaderCell::new();

/// Process-wide uploader cell
pub fn global() -> &'static UploaderCell {
    &GLOBAL
}

/// Process-wide backend, constructed from [`UPLOAD_BASE_PATH_ENV`] on first use
pub fn global_uploader() -> Option<Arc<dyn Uploader>> {
    GLOBAL.get_or_init_with(
        || {
            std::env::var(UPLOAD_BASE_PATH_ENV)
                .ok()
                .filter(|destination| !destination.trim().is_empty())
        },
        DestinationOptions::from_env,
    )
}

/// Install the process-wide backend
///
/// Returns `false` if a backend was already decided.
pub fn set_uploader(uploader: Arc<dyn Uploader>) -> bool {
    GLOBAL.set(uploader)
}

/// Install the process-wide backend from `[upload]` configuration
///
/// Returns `Ok(false)` when no destination is configured or a backend was
/// already decided.
///
/// # Errors
///
/// Returns an error if the configured destination cannot be turned into a
/// backend
pub fn install(config: &UploadConfig) -> Result<bool, UploadError> {
    let Some(ref base_path) = config.base_path else {
        return Ok(false);
    };

    let uploader = from_destination(base_path, &DestinationOptions::from_config(config))?;
    let installed = GLOBAL.set(uploader);
    if !installed {
        tracing::debug!(destination = %base_path, "storage backend already decided, keeping it");
    }

    Ok(installed)
}

/// Which backend an emitter writes reference-mode content to
#[derive(Clone, Default)]
pub enum StorageHandle {
    /// A backend owned by the caller
    Injected(Arc<dyn Uploader>),
    /// The process-wide backend
    #[default]
    Global,
}

impl StorageHandle {
    /// Resolve to a backend, if any is available
    pub fn resolve(&self) -> Option<Arc<dyn Uploader>> {
        match self {
            Self::Injected(uploader) => Some(Arc::clone(uploader)),
            Self::Global => global_uploader(),
        }
    }
}

impl From<Arc<dyn Uploader>> for StorageHandle {
    fn from(uploader: Arc<dyn Uploader>) -> Self {
        Self::Injected(uploader)
    }
}

impl fmt::Debug for StorageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Injected(uploader) => f.debug_tuple("Injected").field(&uploader.name()).finish(),
            Self::Global => f.write_str("Global"),
        }
    }
}

/// Store `value` under `filename` and return its locator
///
/// Never fails: without a backend, or when the write fails, the content is
/// dropped and [`DISCARD_LOCATOR`] is returned. The write runs with
/// instrumentation suppressed so the backend's own I/O is not traced.
pub async fn upload_to_storage(storage: &StorageHandle, filename: &str, value: &Value) -> String {
    let Some(uploader) = storage.resolve() else {
        tracing::debug!(filename, "no storage backend, discarding content");
        return DISCARD_LOCATOR.to_owned();
    };

    match promptwire_core::suppressed(uploader.upload(filename, value)).await {
        Ok(locator) => locator,
        Err(e) => {
            tracing::warn!(error = %e, backend = uploader.name(), filename, "failed to upload content");
            DISCARD_LOCATOR.to_owned()
        }
    }
}
