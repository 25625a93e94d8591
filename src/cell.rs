//! Adapter over the geohash codec.
//!
//! The searches and the expander only ever touch the codec through this
//! module: cell identifier to rectangle, coordinate to cell identifier,
//! and grid neighbors. The base-32 alphabet lives here and nowhere else.

use crate::error::Result;
use geo::{Point, Polygon, Rect};
use geohash::{self, Direction};

/// The 32-symbol geohash alphabet, in ASCII order.
///
/// A cell identifier of length `L` names one of exactly 32 children of the
/// identifier formed by its first `L - 1` symbols. Because the table is in
/// ASCII order, lexicographic order of equal-length identifiers equals
/// numeric base-32 order.
pub const GEOHASH_ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Maximum identifier length the codec supports.
pub const MAX_PRECISION: usize = 12;

const DIRECTIONS: [Direction; 8] = [
    Direction::N,
    Direction::NE,
    Direction::E,
    Direction::SE,
    Direction::S,
    Direction::SW,
    Direction::W,
    Direction::NW,
];

/// Decode a cell identifier into its bounding rectangle.
///
/// # Examples
///
/// ```rust
/// let rect = geocover::cell::cell_rect("s00").unwrap();
/// assert!(rect.min().x >= 0.0 && rect.max().x <= 1.5);
/// ```
pub fn cell_rect(cell: &str) -> Result<Rect> {
    Ok(geohash::decode_bbox(cell)?)
}

/// Decode a cell identifier into its bounding rectangle as a polygon,
/// ready for containment and intersection tests.
pub fn cell_polygon(cell: &str) -> Result<Polygon> {
    Ok(cell_rect(cell)?.to_polygon())
}

/// Encode a point to the cell identifier of the given precision.
pub fn encode_cell(point: Point, precision: usize) -> Result<String> {
    Ok(geohash::encode(point.into(), precision)?)
}

/// The grid-adjacent cell identifiers of a cell, at the same length.
///
/// Normally all 8 neighbors are returned. At grid seams (pole rows) the
/// codec may fail for a direction; that direction is skipped rather than
/// propagated, since a partial neighborhood only narrows the search
/// frontier and the visited set already guards against seam asymmetry.
pub fn cell_neighbors(cell: &str) -> Vec<String> {
    DIRECTIONS
        .iter()
        .filter_map(|direction| geohash::neighbor(cell, *direction).ok())
        .collect()
}

/// Append one alphabet symbol to a cell identifier, yielding one of its
/// 32 children.
pub fn child_cell(cell: &str, symbol: u8) -> String {
    let mut child = String::with_capacity(cell.len() + 1);
    child.push_str(cell);
    child.push(symbol as char);
    child
}
