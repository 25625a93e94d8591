//! Input validation for cover searches.
//!
//! Failures here are reported before any search state is built, so an
//! invalid call never produces a partial result.

use crate::cell::MAX_PRECISION;
use crate::error::{CoverError, Result};
use geo::{Area, Point, Polygon};

/// Validates a target precision against the codec's supported range.
///
/// # Examples
///
/// ```
/// use geocover::validation::validate_precision;
///
/// assert!(validate_precision(6).is_ok());
/// assert!(validate_precision(0).is_err());
/// assert!(validate_precision(13).is_err());
/// ```
pub fn validate_precision(precision: usize) -> Result<()> {
    if precision == 0 || precision > MAX_PRECISION {
        return Err(CoverError::InvalidPrecision(precision));
    }
    Ok(())
}

/// Validates that a polygon is coverable: non-empty, non-zero area, and
/// within the valid longitude/latitude range.
///
/// A polygon outside the coordinate range is reported as degenerate rather
/// than silently producing an empty cover, since no grid cell can ever
/// qualify against it.
///
/// # Examples
///
/// ```
/// use geocover::validation::validate_polygon;
/// use geo::polygon;
///
/// let poly = polygon![
///     (x: -80.0, y: 35.0),
///     (x: -70.0, y: 35.0),
///     (x: -70.0, y: 45.0),
///     (x: -80.0, y: 35.0),
/// ];
/// assert!(validate_polygon(&poly).is_ok());
///
/// let out_of_range = polygon![
///     (x: 200.0, y: 35.0),
///     (x: 210.0, y: 35.0),
///     (x: 210.0, y: 45.0),
///     (x: 200.0, y: 35.0),
/// ];
/// assert!(validate_polygon(&out_of_range).is_err());
/// ```
pub fn validate_polygon(polygon: &Polygon) -> Result<()> {
    if polygon.exterior().0.is_empty() {
        return Err(CoverError::DegenerateGeometry(
            "polygon has no exterior ring".to_string(),
        ));
    }

    for coord in polygon.exterior().coords() {
        validate_coordinate(&Point::from(*coord))?;
    }
    for interior in polygon.interiors() {
        for coord in interior.coords() {
            validate_coordinate(&Point::from(*coord))?;
        }
    }

    if polygon.unsigned_area() == 0.0 {
        return Err(CoverError::DegenerateGeometry(
            "polygon has zero area".to_string(),
        ));
    }

    Ok(())
}

fn validate_coordinate(point: &Point) -> Result<()> {
    let (x, y) = (point.x(), point.y());

    if !x.is_finite() || !y.is_finite() {
        return Err(CoverError::DegenerateGeometry(format!(
            "non-finite coordinate ({}, {})",
            x, y
        )));
    }

    if !(-180.0..=180.0).contains(&x) {
        return Err(CoverError::DegenerateGeometry(format!(
            "longitude out of range [-180.0, 180.0]: {}",
            x
        )));
    }

    if !(-90.0..=90.0).contains(&y) {
        return Err(CoverError::DegenerateGeometry(format!(
            "latitude out of range [-90.0, 90.0]: {}",
            y
        )));
    }

    Ok(())
}
