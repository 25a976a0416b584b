use std::path::Path;

use url::Url;

use crate::{Config, ContentMode};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// resolved, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if a placeholder cannot be resolved, TOML parsing
    /// fails, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the upload destination is malformed or uses an
    /// unsupported scheme
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_upload_destination()?;
        self.warn_on_unused_reference_mode();
        Ok(())
    }

    fn validate_upload_destination(&self) -> anyhow::Result<()> {
        let Some(ref base_path) = self.upload.base_path else {
            return Ok(());
        };

        if base_path.trim().is_empty() {
            anyhow::bail!("upload.base_path must not be empty when set");
        }

        // Plain filesystem paths carry no scheme
        if !base_path.contains("://") {
            return Ok(());
        }

        let url = Url::parse(base_path).map_err(|e| anyhow::anyhow!("invalid upload.base_path '{base_path}': {e}"))?;

        match url.scheme() {
            "file" => Ok(()),
            "gs" if url.host_str().is_some_and(|bucket| !bucket.is_empty()) => Ok(()),
            "gs" => anyhow::bail!("upload.base_path '{base_path}' is missing a bucket name"),
            other => anyhow::bail!("unsupported upload.base_path scheme '{other}', expected a path, file:// or gs://"),
        }
    }

    fn warn_on_unused_reference_mode(&self) {
        if self.capture.mode == ContentMode::Reference && self.upload.base_path.is_none() {
            tracing::warn!(
                "capture.mode is 'reference' but upload.base_path is unset, \
                 falling back to OTEL_INSTRUMENTATION_GENAI_UPLOAD_BASE_PATH"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use crate::{CandidateMappingMode, Config, ContentMode};

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();

        assert!(!config.capture.message_content);
        assert_eq!(config.capture.mode, ContentMode::Inline);
        assert_eq!(config.capture.candidate_mapping, CandidateMappingMode::KeepEmpty);
        assert!(config.upload.base_path.is_none());
        assert!(config.telemetry.is_none());
    }

    #[test]
    fn full_config() {
        let raw = r#"
            [capture]
            message_content = true
            mode = "reference"
            candidate_mapping = "skip_empty"

            [upload]
            base_path = "gs://traces/genai"

            [upload.gcs]
            endpoint = "http://127.0.0.1:4443"
            access_token = "token-123"

            [telemetry]
            scope_name = "checkout-agent"
            log_filter = "promptwire=debug"
            json_logs = true
        "#;

        let config = Config::from_toml(raw).unwrap();

        assert!(config.capture.message_content);
        assert_eq!(config.capture.mode, ContentMode::Reference);
        assert_eq!(config.capture.candidate_mapping, CandidateMappingMode::SkipEmpty);
        assert_eq!(config.upload.base_path.as_deref(), Some("gs://traces/genai"));

        let gcs = config.upload.gcs.unwrap();
        assert_eq!(gcs.endpoint.unwrap().as_str(), "http://127.0.0.1:4443/");
        assert_eq!(gcs.access_token.unwrap().expose_secret(), "token-123");

        let telemetry = config.telemetry.unwrap();
        assert_eq!(telemetry.scope_name, "checkout-agent");
        assert_eq!(telemetry.log_filter.as_deref(), Some("promptwire=debug"));
        assert!(telemetry.json_logs);
    }

    #[test]
    fn telemetry_scope_defaults() {
        let config = Config::from_toml("[telemetry]\njson_logs = false\n").unwrap();
        assert_eq!(config.telemetry.unwrap().scope_name, "promptwire");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::from_toml("[capture]\nmesage_content = true\n").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Config::from_toml("[capture]\nmode = \"sideways\"\n").is_err());
    }

    #[test]
    fn plain_and_file_destinations_are_valid() {
        for base_path in ["/var/lib/genai", "relative/dir", "file:///var/lib/genai"] {
            let raw = format!("[upload]\nbase_path = \"{base_path}\"\n");
            assert!(Config::from_toml(&raw).is_ok(), "{base_path}");
        }
    }

    #[test]
    fn unsupported_scheme_fails_validation() {
        let err = Config::from_toml("[upload]\nbase_path = \"s3://bucket/prefix\"\n").unwrap_err();
        assert!(err.to_string().contains("unsupported upload.base_path scheme 's3'"));
    }

    #[test]
    fn gs_destination_needs_a_bucket() {
        let err = Config::from_toml("[upload]\nbase_path = \"gs:///prefix\"\n").unwrap_err();
        assert!(err.to_string().contains("bucket"));
    }

    #[test]
    fn empty_destination_fails_validation() {
        assert!(Config::from_toml("[upload]\nbase_path = \"\"\n").is_err());
    }

    #[test]
    fn destination_from_environment() {
        temp_env::with_var("PW_TEST_UPLOAD", Some("gs://env-bucket/p"), || {
            let config = Config::from_toml("[upload]\nbase_path = \"{{ env.PW_TEST_UPLOAD }}\"\n").unwrap();
            assert_eq!(config.upload.base_path.as_deref(), Some("gs://env-bucket/p"));
        });
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[capture]\nmessage_content = true").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(config.capture.message_content);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
