//! Polygon-to-cell cover searches.
//!
//! Two searches over the geohash grid, neither of which materializes it:
//!
//! - [`cover_exhaustive`]: breadth-first flood fill at the target
//!   precision, seeded from the polygon centroid's cell and expanded
//!   through grid neighbors.
//! - [`cover`]: hierarchical refinement, where a coarse flood fill picks
//!   seed cells and only cells straddling the polygon boundary are
//!   subdivided, one level at a time. This is the production entry point;
//!   it reaches the same expanded cover with far fewer classification
//!   tests.

use crate::cell;
use crate::error::{CoverError, Result};
use crate::expand::CellExpansion;
use crate::validation::{validate_polygon, validate_precision};
use geo::{Area, BoundingRect, Centroid, Contains, Intersects, Polygon};
use log::{debug, warn};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Coarsest grid level the hierarchical search seeds from.
const SEED_LEVEL: usize = 2;

/// Which cells qualify for a cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum CoverMode {
    /// Only cells fully inside the polygon.
    #[default]
    Inner,
    /// Cells fully inside plus cells intersecting the polygon boundary.
    InnerAndBoundary,
}

/// Compute the cell cover of a polygon by hierarchical refinement.
///
/// A coarse flood fill (starting at grid level 2, deepening until it finds
/// anything) selects seed cells, then a subdivision queue refines only the
/// cells that straddle the polygon's envelope boundary. Cells fully inside
/// the envelope are accepted at whatever length they were reached at; the
/// returned [`CellExpansion`] lazily pads them out to `precision`-length
/// identifiers.
///
/// Envelope containment is the acceptance test by construction: it is the
/// cheap superset check that lets whole coarse cells be accepted without
/// decoding their descendants. For polygons that fill their envelope
/// (axis-aligned rectangles) the result matches [`cover_exhaustive`]
/// exactly.
///
/// # Errors
///
/// [`CoverError::InvalidPrecision`] if `precision` is outside `1..=12`;
/// [`CoverError::DegenerateGeometry`] if the polygon is empty, has zero
/// area, or lies outside the valid longitude/latitude range.
///
/// # Examples
///
/// ```rust
/// use geocover::{CoverMode, cover};
/// use geo::polygon;
///
/// let poly = polygon![
///     (x: 0.0, y: 0.0),
///     (x: 1.0, y: 0.0),
///     (x: 1.0, y: 1.0),
///     (x: 0.0, y: 1.0),
///     (x: 0.0, y: 0.0),
/// ];
///
/// let cells = cover(&poly, 4, CoverMode::InnerAndBoundary)?;
/// assert!(!cells.is_empty());
/// assert!(cells.iter().all(|cell| cell.len() == 4));
/// # Ok::<(), geocover::CoverError>(())
/// ```
pub fn cover(polygon: &Polygon, precision: usize, mode: CoverMode) -> Result<CellExpansion> {
    validate_precision(precision)?;
    validate_polygon(polygon)?;

    let envelope = envelope_of(polygon)?;

    // Seed from a coarse grid so large polygons start from a handful of
    // cells; deepen until something intersects (thin or tiny polygons can
    // slip between coarse cell centroids entirely).
    let mut seed_level = SEED_LEVEL.min(precision);
    let mut seeds = flood_fill(polygon, seed_level, CoverMode::InnerAndBoundary)?;
    while seeds.is_empty() && seed_level < precision {
        seed_level += 1;
        seeds = flood_fill(polygon, seed_level, CoverMode::InnerAndBoundary)?;
    }
    debug!(
        "hierarchical cover: {} seed cells at level {}",
        seeds.len(),
        seed_level
    );

    let mut inner: FxHashSet<String> = FxHashSet::default();
    let mut frontier: VecDeque<String> = seeds.into_iter().collect();

    while let Some(candidate) = frontier.pop_front() {
        let rect = cell::cell_polygon(&candidate)?;

        if envelope.contains(&rect) {
            // Fully inner; accepted at its current length and expanded later.
            inner.insert(candidate);
        } else if envelope.intersects(&rect) {
            if candidate.len() < precision {
                for &symbol in cell::GEOHASH_ALPHABET {
                    frontier.push_back(cell::child_cell(&candidate, symbol));
                }
            } else if mode == CoverMode::InnerAndBoundary {
                inner.insert(candidate);
            }
        }
        // No envelope overlap: discard.
    }

    CellExpansion::new(inner, precision)
}

/// Compute the cell cover of a polygon by exhaustive flood fill at the
/// target precision.
///
/// Seeds a FIFO queue with the cell of the polygon's centroid and expands
/// through grid neighbors, classifying every visited cell against the
/// polygon. Useful directly at coarse precisions and as a validation
/// reference for [`cover`].
///
/// Only cells reachable from the centroid's cell through a chain of
/// qualifying neighbors are discovered. If the polygon has disjoint
/// components and the centroid's component is not grid-adjacent to the
/// others, the unreachable components are missed; a diagnostic warning is
/// logged when the classified area falls short of the polygon's area. This
/// is a known correctness boundary of the flood fill, not an error.
///
/// # Errors
///
/// Same taxonomy as [`cover`].
///
/// # Examples
///
/// ```rust
/// use geocover::{CoverMode, cover_exhaustive};
/// use geo::polygon;
///
/// let poly = polygon![
///     (x: 0.0, y: 0.0),
///     (x: 1.0, y: 0.0),
///     (x: 1.0, y: 1.0),
///     (x: 0.0, y: 1.0),
///     (x: 0.0, y: 0.0),
/// ];
///
/// let cells = cover_exhaustive(&poly, 3, CoverMode::InnerAndBoundary)?;
/// assert!(!cells.is_empty());
/// # Ok::<(), geocover::CoverError>(())
/// ```
pub fn cover_exhaustive(
    polygon: &Polygon,
    precision: usize,
    mode: CoverMode,
) -> Result<FxHashSet<String>> {
    validate_precision(precision)?;
    validate_polygon(polygon)?;
    flood_fill(polygon, precision, mode)
}

/// Breadth-first neighbor expansion from the centroid's cell.
///
/// Classification is two-tiered: the envelope test decides whether a cell
/// qualifies (and therefore whether its neighbors join the frontier), the
/// polygon test decides whether it is recorded as inner. In `Inner` mode
/// outer cells still expand, since inner cells can lie beyond a
/// boundary-straddling ring.
fn flood_fill(polygon: &Polygon, precision: usize, mode: CoverMode) -> Result<FxHashSet<String>> {
    let envelope = envelope_of(polygon)?;
    let centroid = polygon.centroid().ok_or_else(|| {
        CoverError::DegenerateGeometry("polygon has no centroid".to_string())
    })?;

    let mut inner: FxHashSet<String> = FxHashSet::default();
    let mut outer: FxHashSet<String> = FxHashSet::default();
    let mut frontier: VecDeque<String> = VecDeque::new();
    frontier.push_back(cell::encode_cell(centroid, precision)?);

    while let Some(candidate) = frontier.pop_front() {
        if inner.contains(&candidate) || outer.contains(&candidate) {
            continue;
        }

        let rect = cell::cell_polygon(&candidate)?;

        let qualifies = match mode {
            CoverMode::Inner => envelope.contains(&rect),
            CoverMode::InnerAndBoundary => envelope.intersects(&rect),
        };
        if !qualifies {
            continue;
        }

        let is_inner = match mode {
            CoverMode::Inner => polygon.contains(&rect),
            CoverMode::InnerAndBoundary => polygon.intersects(&rect),
        };
        if is_inner {
            inner.insert(candidate.clone());
        } else {
            outer.insert(candidate.clone());
        }

        for neighbor in cell::cell_neighbors(&candidate) {
            if !inner.contains(&neighbor) && !outer.contains(&neighbor) {
                frontier.push_back(neighbor);
            }
        }
    }

    if mode == CoverMode::InnerAndBoundary {
        warn_on_unreachable_components(polygon, &inner, &outer)?;
    }

    Ok(inner)
}

fn envelope_of(polygon: &Polygon) -> Result<Polygon> {
    polygon
        .bounding_rect()
        .map(|rect| rect.to_polygon())
        .ok_or_else(|| CoverError::DegenerateGeometry("polygon has no envelope".to_string()))
}

/// Diagnostic for the centroid-reachability caveat, checked only in
/// `InnerAndBoundary` mode: there the classified cells are disjoint and
/// cover everything the search reached, so a summed area smaller than the
/// polygon's means some component was never reached from the centroid's
/// cell. (In `Inner` mode the classified set excludes boundary cells and
/// routinely measures below the polygon area.)
fn warn_on_unreachable_components(
    polygon: &Polygon,
    inner: &FxHashSet<String>,
    outer: &FxHashSet<String>,
) -> Result<()> {
    if !log::log_enabled!(log::Level::Warn) {
        return Ok(());
    }

    let mut classified_area = 0.0;
    for cell_id in inner.iter().chain(outer.iter()) {
        classified_area += cell::cell_rect(cell_id)?.unsigned_area();
    }

    let polygon_area = polygon.unsigned_area();
    if classified_area < polygon_area {
        warn!(
            "flood fill classified {:.6} deg^2 of a {:.6} deg^2 polygon; \
             components not grid-adjacent to the centroid's cell were likely missed",
            classified_area, polygon_area
        );
    }

    Ok(())
}
