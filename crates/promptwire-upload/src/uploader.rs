use async_trait::async_trait;
use serde_json::Value;

use crate::error::UploadError;

/// Storage backend for reference-mode payloads
///
/// Implementations write one JSON document per call and return a locator
/// string a telemetry consumer can use to fetch it again.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Write `value` as JSON under the relative object name `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid, encoding fails, or the
    /// backend rejects the write
    async fn upload(&self, path: &str, value: &Value) -> Result<String, UploadError>;
}

/// Reject object names that are empty or could escape the destination
///
/// # Errors
///
/// Returns [`UploadError::InvalidPath`] for absolute names, `.`/`..` or empty
/// segments, and backslashes
pub fn validate_object_name(path: &str) -> Result<(), UploadError> {
    let valid = !path.is_empty()
        && !path.starts_with('/')
        && !path.contains('\\')
        && path.split('/').all(|segment| !matches!(segment, "" | "." | ".."));

    if valid {
        Ok(())
    } else {
        Err(UploadError::InvalidPath(path.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_nested_names() {
        assert!(validate_object_name("resp-1_input.json").is_ok());
        assert!(validate_object_name("2025/06/resp-1_output.json").is_ok());
    }

    #[test]
    fn rejects_escaping_names() {
        for name in ["", "/etc/passwd", "../up.json", "a/../b.json", "a//b.json", "./a.json", "a\\b.json"] {
            assert!(validate_object_name(name).is_err(), "{name}");
        }
    }
}
