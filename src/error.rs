//! Error types for nestwatch.

/// Result type alias for nestwatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for nestwatch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Detection directory is missing or not a directory.
    #[error("detection directory not found: {path}")]
    DetectionDirNotFound {
        /// Configured detection directory.
        path: std::path::PathBuf,
    },

    /// Failed to list the detection directory.
    #[error("failed to read detection directory '{path}'")]
    DetectionDirRead {
        /// Detection directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a detection file.
    #[error("failed to read detection file '{path}'")]
    DetectionFileRead {
        /// Path to the detection file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Detection file is not valid JSON or has wrongly typed fields.
    #[error("failed to parse detection file '{path}'")]
    DetectionParseFailed {
        /// Path to the detection file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Detection file parsed but cannot be mapped to an image record.
    #[error("invalid detection file '{path}': {message}")]
    InvalidDetectionFormat {
        /// Path to the detection file.
        path: std::path::PathBuf,
        /// Description of the format error.
        message: String,
    },

    /// No site has the requested identifier.
    #[error("site not found: {id}")]
    SiteNotFound {
        /// Requested site identifier.
        id: String,
    },

    /// No detection file has the requested image identifier.
    #[error("detection file not found: {image_id}")]
    DetectionNotFound {
        /// Requested image identifier.
        image_id: String,
    },

    /// Invalid latitude value.
    #[error("invalid latitude: {value} (must be -90.0 to 90.0)")]
    InvalidLatitude {
        /// Invalid latitude value.
        value: f64,
    },

    /// Invalid longitude value.
    #[error("invalid longitude: {value} (must be -180.0 to 180.0)")]
    InvalidLongitude {
        /// Invalid longitude value.
        value: f64,
    },

    /// Failed to bind the HTTP listener.
    #[error("failed to bind HTTP server to '{addr}'")]
    ServerBind {
        /// Requested bind address.
        addr: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Fetching from a remote nestwatch server failed.
    #[error("failed to fetch '{url}'")]
    RemoteFetch {
        /// Requested URL.
        url: String,
        /// Underlying transport, status or decoding error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to serialize command output.
    #[error("failed to serialize output")]
    OutputSerialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Validation found problems in the detection directory.
    #[error("{count} detection file problem(s) found")]
    ValidationFailed {
        /// Number of problems reported.
        count: usize,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Render the error and its source chain on one line.
    pub fn chain_message(&self) -> String {
        use std::error::Error as _;

        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}
