use geo::{Area, BooleanOps, Contains, polygon};
use geocover::{CoverMode, cells_to_polygon, cover, cover_exhaustive};
use rustc_hash::FxHashSet;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn unit_square() -> geo::Polygon {
    polygon![
        (x: 0.0, y: 0.0),
        (x: 1.0, y: 0.0),
        (x: 1.0, y: 1.0),
        (x: 0.0, y: 1.0),
        (x: 0.0, y: 0.0),
    ]
}

#[test]
fn test_unit_square_precision_3_coverage() {
    init_logging();
    let poly = unit_square();

    let cells = cover(&poly, 3, CoverMode::InnerAndBoundary).unwrap();
    assert!(cells.iter().all(|cell| cell.len() == 3));

    // Reference vector for the geohash codec: the square sits inside "s00"
    // (the grid aligns on the equator and prime meridian), and the cells
    // west, south, and southwest of it touch the square's edges and corner.
    let mut sorted: Vec<String> = cells.iter().collect();
    sorted.sort_unstable();
    assert_eq!(sorted, ["7zz", "ebp", "kpb", "s00"]);

    // The unioned cover must blanket at least 90% of the polygon. Cells at
    // precision 3 near the equator are ~1.4 degrees wide, far coarser than
    // the square, so the cover overshoots but may not undershoot.
    let merged = cells_to_polygon(&cells).unwrap();
    let covered = merged.intersection(&poly).unsigned_area();
    assert!(covered >= 0.9 * poly.unsigned_area());
}

#[test]
fn test_round_trip_containment() {
    init_logging();
    // For an axis-aligned rectangle the envelope equals the polygon, so
    // every inner-mode cell must decode to a rectangle inside it.
    let poly = unit_square();

    let cells = cover(&poly, 5, CoverMode::Inner).unwrap();
    assert!(!cells.is_empty());

    for cell in cells.iter() {
        let rect = geocover::cell::cell_polygon(&cell).unwrap();
        assert!(poly.contains(&rect), "cell {} escapes the polygon", cell);
    }

    let merged = cells_to_polygon(&cells).unwrap();
    assert!(poly.contains(&merged));
}

#[test]
fn test_hierarchical_equals_exhaustive() {
    init_logging();
    let poly = unit_square();

    for mode in [CoverMode::Inner, CoverMode::InnerAndBoundary] {
        let hierarchical: FxHashSet<String> = cover(&poly, 4, mode).unwrap().iter().collect();
        let exhaustive = cover_exhaustive(&poly, 4, mode).unwrap();
        assert_eq!(hierarchical, exhaustive, "mode {:?} diverged", mode);
    }
}

#[test]
fn test_monotonicity_of_modes() {
    init_logging();
    let poly = unit_square();

    let inner: FxHashSet<String> = cover(&poly, 4, CoverMode::Inner).unwrap().iter().collect();
    let both: FxHashSet<String> = cover(&poly, 4, CoverMode::InnerAndBoundary)
        .unwrap()
        .iter()
        .collect();

    assert!(inner.is_subset(&both));
}

#[test]
fn test_area_converges_with_precision() {
    init_logging();
    let poly = unit_square();
    let target = poly.unsigned_area();

    let mut previous_excess = f64::INFINITY;
    for precision in [3, 4, 5] {
        let cells = cover(&poly, precision, CoverMode::InnerAndBoundary).unwrap();
        let merged = cells_to_polygon(&cells).unwrap();
        let excess = merged.unsigned_area() - target;

        assert!(excess >= -1e-9, "cover undershoots at precision {}", precision);
        assert!(
            excess < previous_excess,
            "no convergence at precision {}",
            precision
        );
        previous_excess = excess;
    }
    assert!(previous_excess < 0.2);
}

#[test]
fn test_expansion_counts_match_prefix_deficits() {
    init_logging();
    let poly = polygon![
        (x: 0.0, y: 0.0),
        (x: 20.0, y: 0.0),
        (x: 20.0, y: 20.0),
        (x: 0.0, y: 20.0),
        (x: 0.0, y: 0.0),
    ];

    let expansion = cover(&poly, 5, CoverMode::Inner).unwrap();

    let expected: u64 = expansion
        .compact()
        .iter()
        .map(|cell| 32u64.pow((5 - cell.len()) as u32))
        .sum();
    assert_eq!(expansion.expanded_len(), expected);
    assert_eq!(expansion.iter().count() as u64, expected);
}

#[test]
fn test_expansion_is_restartable() {
    init_logging();
    let poly = unit_square();
    let cells = cover(&poly, 4, CoverMode::InnerAndBoundary).unwrap();

    let first: Vec<String> = cells.iter().collect();
    let second: Vec<String> = cells.iter().collect();
    assert_eq!(first, second);
}

#[test]
fn test_invalid_precision_produces_no_partial_result() {
    init_logging();
    let poly = unit_square();

    for precision in [0, 13, 100] {
        assert!(cover(&poly, precision, CoverMode::Inner).is_err());
        assert!(cover_exhaustive(&poly, precision, CoverMode::Inner).is_err());
    }
}

#[test]
fn test_reduced_inner_cover_is_connected() {
    init_logging();
    // The inner cells of a rectangle form a contiguous grid block, so the
    // reduced polygon is a single part whose area is the sum of the cells.
    let poly = unit_square();
    let cells: FxHashSet<String> = cover(&poly, 4, CoverMode::Inner).unwrap().iter().collect();
    assert!(!cells.is_empty());

    let cell_area: f64 = cells
        .iter()
        .map(|cell| geocover::cell::cell_rect(cell).unwrap().unsigned_area())
        .sum();

    let merged = cells_to_polygon(&cells).unwrap();
    assert_eq!(merged.0.len(), 1, "inner cover of a rectangle is connected");
    assert!((merged.unsigned_area() - cell_area).abs() < 1e-6 * cell_area);
}
