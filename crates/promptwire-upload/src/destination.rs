use std::path::PathBuf;
use std::sync::Arc;

use promptwire_config::UploadConfig;
use secrecy::SecretString;
use url::Url;

use crate::error::UploadError;
use crate::fs::FsUploader;
use crate::gcs::GcsUploader;
use crate::uploader::Uploader;

/// Environment variable holding an OAuth2 token for Cloud Storage
pub const GOOGLE_OAUTH_ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Backend settings that do not fit in a destination URI
#[derive(Debug, Clone, Default)]
pub struct DestinationOptions {
    /// Cloud Storage API endpoint override
    pub gcs_endpoint: Option<Url>,
    /// Cloud Storage bearer token
    pub gcs_access_token: Option<SecretString>,
}

impl DestinationOptions {
    /// Options from the environment only
    pub fn from_env() -> Self {
        Self {
            gcs_endpoint: None,
            gcs_access_token: token_from_env(),
        }
    }

    /// Options from `[upload.gcs]`, with the token falling back to the environment
    pub fn from_config(config: &UploadConfig) -> Self {
        let gcs = config.gcs.as_ref();
        Self {
            gcs_endpoint: gcs.and_then(|g| g.endpoint.clone()),
            gcs_access_token: gcs.and_then(|g| g.access_token.clone()).or_else(token_from_env),
        }
    }
}

fn token_from_env() -> Option<SecretString> {
    std::env::var(GOOGLE_OAUTH_ACCESS_TOKEN_ENV)
        .ok()
        .filter(|token| !token.is_empty())
        .map(SecretString::from)
}

/// Build a backend from a destination URI
///
/// A plain path or `file://` URI selects the filesystem backend and
/// `gs://bucket/prefix` selects Cloud Storage.
///
/// # Errors
///
/// Returns [`UploadError::UnsupportedScheme`] for any other scheme, and
/// [`UploadError::InvalidDestination`] for malformed URIs
pub fn from_destination(destination: &str, options: &DestinationOptions) -> Result<Arc<dyn Uploader>, UploadError> {
    let destination = destination.trim();
    let invalid = |reason: String| UploadError::InvalidDestination {
        destination: destination.to_owned(),
        reason,
    };

    if destination.is_empty() {
        return Err(invalid("destination is empty".to_owned()));
    }

    if !destination.contains("://") {
        return Ok(Arc::new(FsUploader::new(PathBuf::from(destination))));
    }

    let url = Url::parse(destination).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| invalid("not a local file URI".to_owned()))?;
            Ok(Arc::new(FsUploader::new(path)))
        }
        "gs" => {
            let bucket = url.host_str().unwrap_or_default();
            let uploader = GcsUploader::new(
                bucket,
                url.path(),
                options.gcs_endpoint.clone(),
                options.gcs_access_token.clone(),
            )?;
            Ok(Arc::new(uploader))
        }
        other => Err(UploadError::UnsupportedScheme(other.to_owned())),
    }
}
