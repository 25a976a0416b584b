//! Google Cloud Storage backend
//!
//! Uses the JSON API media upload:
//! `POST {endpoint}/upload/storage/v1/b/{bucket}/o?uploadType=media&name={object}`.
//! Objects are named `{prefix}/{path}`; the locator is `gs://{bucket}/{object}`.

use std::fmt;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

use crate::error::UploadError;
use crate::uploader::{Uploader, validate_object_name};

/// Public Cloud Storage endpoint
pub const DEFAULT_GCS_ENDPOINT: &str = "https://storage.googleapis.com";

/// Cloud Storage uploader
#[derive(Clone)]
pub struct GcsUploader {
    http: reqwest::Client,
    endpoint: Url,
    bucket: String,
    prefix: String,
    access_token: Option<SecretString>,
}

impl GcsUploader {
    /// Create an uploader for `gs://{bucket}/{prefix}`
    ///
    /// Without an `endpoint` the public Cloud Storage API is used. Without an
    /// `access_token` requests are sent unauthenticated, which only works for
    /// emulators and public-write buckets.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket is empty, the endpoint cannot carry a
    /// path, or the HTTP client cannot be built
    pub fn new(
        bucket: impl Into<String>,
        prefix: &str,
        endpoint: Option<Url>,
        access_token: Option<SecretString>,
    ) -> Result<Self, UploadError> {
        let bucket = bucket.into();
        if bucket.is_empty() {
            return Err(UploadError::InvalidDestination {
                destination: format!("gs:///{prefix}"),
                reason: "missing bucket name".to_owned(),
            });
        }

        let endpoint = match endpoint {
            Some(url) => url,
            None => Url::parse(DEFAULT_GCS_ENDPOINT).map_err(|e| UploadError::InvalidDestination {
                destination: DEFAULT_GCS_ENDPOINT.to_owned(),
                reason: e.to_string(),
            })?,
        };
        if endpoint.cannot_be_a_base() {
            return Err(UploadError::InvalidDestination {
                destination: endpoint.to_string(),
                reason: "endpoint must be an http(s) URL".to_owned(),
            });
        }

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            endpoint,
            bucket,
            prefix: prefix.trim_matches('/').to_owned(),
            access_token,
        })
    }

    /// Bucket objects are written to
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn object_name(&self, path: &str) -> String {
        if self.prefix.is_empty() {
            path.to_owned()
        } else {
            format!("{}/{path}", self.prefix)
        }
    }

    fn upload_url(&self, object: &str) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["upload", "storage", "v1", "b", &self.bucket, "o"]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("uploadType", "media")
            .append_pair("name", object);
        url
    }
}

impl fmt::Debug for GcsUploader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GcsUploader")
            .field("endpoint", &self.endpoint.as_str())
            .field("bucket", &self.bucket)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Uploader for GcsUploader {
    fn name(&self) -> &'static str {
        "gcs"
    }

    async fn upload(&self, path: &str, value: &Value) -> Result<String, UploadError> {
        validate_object_name(path)?;

        let object = self.object_name(path);
        let body = serde_json::to_vec(value)?;

        let mut request = self
            .http
            .post(self.upload_url(&object))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(ref token) = self.access_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;

        if response.status().is_success() {
            tracing::debug!(bucket = %self.bucket, object = %object, "payload uploaded");
            Ok(format!("gs://{}/{object}", self.bucket))
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(UploadError::Status { status, body })
        }
    }
}
