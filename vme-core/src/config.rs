// ============================================================================
// vme-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Object Store Configuration and Defaults
//
// This module defines the configuration consumed by the S3 client. Bucket,
// region, endpoint and TLS choice come from the caller (the CLI flags); access
// and secret keys come from the environment when not supplied explicitly.
//
// KEY COMPONENTS:
// - S3Config: Connection settings for one bucket
// - S3Credentials: Access/secret key pair with a redacting Debug impl
// - Default constants and environment variable names
//
// AI-ASSISTANT-INFO: Configuration structures and constants for vme-core

use crate::error::{CoreError, CoreResult};
use std::env;
use std::fmt;

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Region used when none is given.
pub const DEFAULT_S3_REGION: &str = "us-east-1";

/// Environment variable holding the object store access key.
pub const ACCESS_KEY_ENV: &str = "VME_S3_ACCESS_KEY";

/// Environment variable holding the object store secret key.
pub const SECRET_KEY_ENV: &str = "VME_S3_SECRET_KEY";

// ============================================================================
// CREDENTIALS
// ============================================================================

/// Access/secret key pair for the object store.
///
/// The `Debug` output never includes the secret key.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct S3Credentials {
    pub access_key: String,
    pub secret_key: String,
}

impl S3Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Reads both keys from `VME_S3_ACCESS_KEY` and `VME_S3_SECRET_KEY`.
    /// Unset variables yield empty strings.
    pub fn from_env() -> Self {
        Self {
            access_key: env::var(ACCESS_KEY_ENV).unwrap_or_default(),
            secret_key: env::var(SECRET_KEY_ENV).unwrap_or_default(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.access_key.is_empty() && !self.secret_key.is_empty()
    }
}

impl fmt::Debug for S3Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// S3 CONFIGURATION
// ============================================================================

/// Connection settings for a single S3-compatible bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint (MinIO and other S3-compatible services). `None`
    /// targets AWS itself.
    pub endpoint: Option<String>,
    /// Scheme for an endpoint given without one.
    pub use_ssl: bool,
    pub credentials: S3Credentials,
}

impl S3Config {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: DEFAULT_S3_REGION.to_string(),
            endpoint: None,
            use_ssl: true,
            credentials: S3Credentials::default(),
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Sets the endpoint; an empty string means no custom endpoint.
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.endpoint = endpoint.filter(|e| !e.trim().is_empty());
        self
    }

    pub fn with_ssl(mut self, use_ssl: bool) -> Self {
        self.use_ssl = use_ssl;
        self
    }

    pub fn with_credentials(mut self, credentials: S3Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Fills in any credential not already set from the environment.
    pub fn with_env_credentials(mut self) -> Self {
        let from_env = S3Credentials::from_env();
        if self.credentials.access_key.is_empty() {
            self.credentials.access_key = from_env.access_key;
        }
        if self.credentials.secret_key.is_empty() {
            self.credentials.secret_key = from_env.secret_key;
        }
        self
    }

    /// Checks everything the client needs before any network call.
    pub fn validate(&self) -> CoreResult<()> {
        if self.bucket.trim().is_empty() {
            return Err(CoreError::InvalidInput("S3 bucket name must not be empty".into()));
        }
        if self.region.trim().is_empty() {
            return Err(CoreError::InvalidInput("S3 region must not be empty".into()));
        }
        if !self.credentials.is_complete() {
            return Err(CoreError::InvalidInput(format!(
                "S3 access key and secret key must be set via {ACCESS_KEY_ENV} and {SECRET_KEY_ENV} environment variables"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = S3Config::new("media");
        assert_eq!(config.region, "us-east-1");
        assert!(config.use_ssl);
        assert!(config.endpoint.is_none());
        assert!(!config.credentials.is_complete());
    }

    #[test]
    fn test_empty_endpoint_is_none() {
        let config = S3Config::new("media").with_endpoint(Some("  ".to_string()));
        assert!(config.endpoint.is_none());
        let config = S3Config::new("media").with_endpoint(Some("http://localhost:9000".into()));
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_validate() {
        let config = S3Config::new("media");
        assert!(matches!(config.validate(), Err(CoreError::InvalidInput(_))));

        let config = config.with_credentials(S3Credentials::new("ak", "sk"));
        assert!(config.validate().is_ok());

        let config = S3Config::new("")
            .with_credentials(S3Credentials::new("ak", "sk"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_credentials_win_over_env() {
        let config = S3Config::new("media")
            .with_credentials(S3Credentials::new("explicit-ak", "explicit-sk"))
            .with_env_credentials();
        assert_eq!(config.credentials.access_key, "explicit-ak");
        assert_eq!(config.credentials.secret_key, "explicit-sk");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = S3Credentials::new("AKIDEXAMPLE", "super-secret-value");
        let rendered = format!("{:?}", S3Config::new("media").with_credentials(creds));
        assert!(rendered.contains("AKIDEXAMPLE"));
        assert!(!rendered.contains("super-secret-value"));
    }
}
