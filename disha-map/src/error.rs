//! Error types for disha-map.

/// Result type alias
pub type Result<T> = std::result::Result<T, MapError>;

/// Mapping errors. All variants are caller errors: fail fast, no retry.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// Angle and radius slices passed to a batch transform differ in length
    #[error("dimension mismatch: {angles} angles vs {radii} radii")]
    DimensionMismatch {
        /// Number of angles supplied
        angles: usize,
        /// Number of radii supplied
        radii: usize,
    },

    /// A scan batch captured under an older orientation was offered to the scanner
    #[error("stale scan batch: generation {batch}, scanner at {current}")]
    StaleGeneration {
        /// Generation the batch was captured under
        batch: u64,
        /// Generation the scanner is currently at
        current: u64,
    },

    /// IR and sonar channels of one batch differ in sample count
    #[error("misaligned scan channels: {ir} IR samples vs {sonar} sonar samples")]
    MisalignedChannels {
        /// IR sample count
        ir: usize,
        /// Sonar sample count
        sonar: usize,
    },
}
