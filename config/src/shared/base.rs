use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// TLS is enabled but no trusted root certificates are provided.
    #[error("Invalid TLS config: `trusted_root_certs` must be set when `enabled` is true")]
    MissingTrustedRootCerts,

    /// One or more required settings are missing or empty.
    #[error("missing required settings: {}", .0.join(", "))]
    MissingSettings(Vec<String>),
}
