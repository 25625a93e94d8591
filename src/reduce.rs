//! Reduction of a cell cover back into a polygon.

use crate::cell;
use crate::error::Result;
use geo::{BooleanOps, MultiPolygon};

/// Union the rectangles of a set of cell identifiers into one geometry.
///
/// The inverse of the cover searches, useful for validation and
/// round-tripping. Accepts identifiers of any (mixed) length, performs no
/// classification, and returns a [`MultiPolygon`] since a sparse cover can
/// union into disjoint parts. An empty input yields an empty
/// `MultiPolygon`.
///
/// # Examples
///
/// ```rust
/// use geocover::cells_to_polygon;
/// use geo::Area;
///
/// let merged = cells_to_polygon(["s00", "s01"])?;
/// assert!(merged.unsigned_area() > 0.0);
///
/// let empty = cells_to_polygon(Vec::<String>::new())?;
/// assert!(empty.0.is_empty());
/// # Ok::<(), geocover::CoverError>(())
/// ```
pub fn cells_to_polygon<I, S>(cells: I) -> Result<MultiPolygon>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut merged = MultiPolygon::new(Vec::new());
    for cell_id in cells {
        let rect = cell::cell_polygon(cell_id.as_ref())?;
        merged = merged.union(&rect);
    }
    Ok(merged)
}
