//! Error types for YatraIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// YatraIO error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Hardware did not answer within the configured round-trip budget.
    /// Fatal and reported: a partially completed command leaves an unknown
    /// true distance traveled, so it must never be retried automatically.
    #[error("communication timeout")]
    Timeout,

    /// Device setup failed (invalid handle, port could not be resolved)
    #[error("initialization failed: {0}")]
    InitializationFailed(String),

    /// Calibration curve rejected at construction
    #[error("calibration error: {0}")]
    Calibration(String),

    /// A hardware response did not match the request that produced it
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// An operation was requested while another is in flight
    #[error("controller busy: {0}")]
    Busy(&'static str),

    /// Mapping-layer error
    #[error("map error: {0}")]
    Map(#[from] disha_map::MapError),

    /// Config file parse error
    #[error("config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Config file write error
    #[error("config write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
