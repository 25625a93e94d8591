//! Error types for cover searches and cell expansion.

use thiserror::Error;

/// Errors produced by cover searches, expansion, and the codec adapter.
///
/// All failures are deterministic given the same inputs; there are no
/// transient failure sources and retries are never meaningful.
#[derive(Debug, Error)]
pub enum CoverError {
    /// Precision is zero, exceeds the codec maximum of 12, or an expansion
    /// deficit overflowed `32^deficit`.
    #[error("invalid precision {0}: expected 1..=12")]
    InvalidPrecision(usize),

    /// Polygon is empty, has zero area, or lies outside the valid
    /// longitude/latitude range.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Underlying geohash codec failure.
    #[error("geohash codec error: {0}")]
    Codec(#[from] geohash::GeohashError),
}

pub type Result<T> = std::result::Result<T, CoverError>;
