//! Polygon ⇄ geohash cell cover conversion for spatial indexing.
//!
//! ```rust
//! use geocover::{CoverMode, cells_to_polygon, cover};
//! use geo::polygon;
//!
//! let poly = polygon![
//!     (x: 0.0, y: 0.0),
//!     (x: 1.0, y: 0.0),
//!     (x: 1.0, y: 1.0),
//!     (x: 0.0, y: 1.0),
//!     (x: 0.0, y: 0.0),
//! ];
//!
//! let cells = cover(&poly, 4, CoverMode::InnerAndBoundary)?;
//! let reconstructed = cells_to_polygon(&cells)?;
//! # let _ = reconstructed;
//! # Ok::<(), geocover::CoverError>(())
//! ```

pub mod cell;
pub mod cover;
pub mod error;
pub mod expand;
pub mod reduce;
pub mod validation;

pub use cover::{CoverMode, cover, cover_exhaustive};
pub use error::{CoverError, Result};
pub use expand::CellExpansion;
pub use reduce::cells_to_polygon;

pub use geo::{MultiPolygon, Point, Polygon, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{CoverError, Result};

    pub use crate::{CellExpansion, CoverMode, cells_to_polygon, cover, cover_exhaustive};

    pub use geo::{MultiPolygon, Point, Polygon, Rect};
}
