use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Reference-mode storage configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadConfig {
    /// Destination URI: a plain path, `file://...` or `gs://bucket/prefix`
    #[serde(default)]
    pub base_path: Option<String>,
    /// Google Cloud Storage settings
    #[serde(default)]
    pub gcs: Option<GcsConfig>,
}

/// Google Cloud Storage settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GcsConfig {
    /// JSON API endpoint override
    #[serde(default)]
    pub endpoint: Option<Url>,
    /// OAuth2 bearer token
    #[serde(default)]
    pub access_token: Option<SecretString>,
}
