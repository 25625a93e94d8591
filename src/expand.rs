//! Lazy completion of mixed-length cell sets to a fixed target precision.
//!
//! The hierarchical search accepts cells at whatever length the envelope
//! test allows, so its raw result mixes lengths. [`CellExpansion`] pads
//! every identifier out to the target precision by enumerating descendant
//! suffixes over the base-32 alphabet, without materializing the full set
//! up front.

use crate::cell::{GEOHASH_ALPHABET, MAX_PRECISION};
use crate::error::{CoverError, Result};
use crate::validation::validate_precision;

/// A finite, deterministic, re-enumerable sequence of cell identifiers,
/// each of exactly the target precision.
///
/// An input identifier of length `h < precision` expands to `32^(precision
/// - h)` descendants, enumerated in numeric base-32 order (suffixes are
/// left-padded with the alphabet's zero symbol `'0'`). An identifier
/// already at the target precision is yielded unchanged; a longer one is
/// truncated to the target precision. Input identifiers are sorted at
/// construction, so iteration order is a pure function of the input set.
///
/// No deduplication is performed: overlapping prefixes in the input are a
/// caller error and will produce duplicate identifiers.
///
/// # Examples
///
/// ```rust
/// use geocover::CellExpansion;
///
/// let expansion = CellExpansion::new(vec!["s0".to_string()], 3)?;
/// assert_eq!(expansion.expanded_len(), 32);
///
/// let cells: Vec<String> = expansion.iter().collect();
/// assert_eq!(cells[0], "s00");
/// assert_eq!(cells[31], "s0z");
/// # Ok::<(), geocover::CoverError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellExpansion {
    cells: Vec<String>,
    precision: usize,
    expanded_len: u64,
}

impl CellExpansion {
    /// Build an expansion of `cells` to `precision`-length identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`CoverError::InvalidPrecision`] if `precision` is outside
    /// `1..=12` or the total descendant count overflows.
    pub fn new<I>(cells: I, precision: usize) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        validate_precision(precision)?;

        let mut cells: Vec<String> = cells
            .into_iter()
            .map(|mut cell| {
                if cell.len() > precision {
                    cell.truncate(precision);
                }
                cell
            })
            .collect();
        cells.sort_unstable();

        let mut expanded_len: u64 = 0;
        for cell in &cells {
            let deficit = (precision - cell.len()) as u32;
            let count = 32u64
                .checked_pow(deficit)
                .ok_or(CoverError::InvalidPrecision(precision))?;
            expanded_len = expanded_len
                .checked_add(count)
                .ok_or(CoverError::InvalidPrecision(precision))?;
        }

        Ok(Self {
            cells,
            precision,
            expanded_len,
        })
    }

    /// The target precision every yielded identifier has.
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// The mixed-length identifiers backing this expansion, sorted.
    pub fn compact(&self) -> &[String] {
        &self.cells
    }

    /// Total number of identifiers the expansion yields.
    pub fn expanded_len(&self) -> u64 {
        self.expanded_len
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over the expanded identifiers without consuming the
    /// expansion. The sequence can be re-enumerated any number of times.
    pub fn iter(&self) -> Cells<'_> {
        Cells {
            cells: self.cells.iter(),
            precision: self.precision,
            current: None,
        }
    }
}

impl<'a> IntoIterator for &'a CellExpansion {
    type Item = String;
    type IntoIter = Cells<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for CellExpansion {
    type Item = String;
    type IntoIter = IntoCells;

    fn into_iter(self) -> Self::IntoIter {
        IntoCells {
            cells: self.cells.into_iter(),
            precision: self.precision,
            current: None,
        }
    }
}

/// In-progress enumeration of one input identifier's descendants.
#[derive(Debug, Clone)]
struct Descendants {
    next: u64,
    total: u64,
}

/// Borrowing iterator over expanded identifiers. See [`CellExpansion`].
#[derive(Debug, Clone)]
pub struct Cells<'a> {
    cells: std::slice::Iter<'a, String>,
    precision: usize,
    current: Option<(&'a str, Descendants)>,
}

impl Iterator for Cells<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some((prefix, mut state)) = self.current.take() {
                if state.next < state.total {
                    let index = state.next;
                    state.next += 1;
                    let expanded = descendant(prefix, index, self.precision);
                    self.current = Some((prefix, state));
                    return Some(expanded);
                }
            }

            let cell = self.cells.next()?;
            if cell.len() == self.precision {
                return Some(cell.clone());
            }
            let deficit = (self.precision - cell.len()) as u32;
            self.current = Some((
                cell.as_str(),
                Descendants {
                    next: 0,
                    total: 32u64.pow(deficit),
                },
            ));
        }
    }
}

/// Owning iterator over expanded identifiers. See [`CellExpansion`].
#[derive(Debug)]
pub struct IntoCells {
    cells: std::vec::IntoIter<String>,
    precision: usize,
    current: Option<(String, Descendants)>,
}

impl Iterator for IntoCells {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some((prefix, mut state)) = self.current.take() {
                if state.next < state.total {
                    let index = state.next;
                    state.next += 1;
                    let expanded = descendant(&prefix, index, self.precision);
                    self.current = Some((prefix, state));
                    return Some(expanded);
                }
            }

            let cell = self.cells.next()?;
            if cell.len() == self.precision {
                return Some(cell);
            }
            let deficit = (self.precision - cell.len()) as u32;
            self.current = Some((
                cell,
                Descendants {
                    next: 0,
                    total: 32u64.pow(deficit),
                },
            ));
        }
    }
}

/// The `index`-th descendant of `prefix` at the target precision: the
/// base-32 numeral of `index`, left-padded with `'0'` to the deficit width.
fn descendant(prefix: &str, index: u64, precision: usize) -> String {
    let deficit = precision - prefix.len();
    let mut suffix = [GEOHASH_ALPHABET[0]; MAX_PRECISION];
    let mut n = index;
    let mut pos = deficit;
    while n > 0 {
        pos -= 1;
        suffix[pos] = GEOHASH_ALPHABET[(n % 32) as usize];
        n /= 32;
    }

    let mut out = String::with_capacity(precision);
    out.push_str(prefix);
    for &symbol in &suffix[..deficit] {
        out.push(symbol as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_precision_input_is_unchanged() {
        let cells = vec!["s00".to_string(), "s01".to_string()];
        let expansion = CellExpansion::new(cells.clone(), 3).unwrap();

        let expanded: Vec<String> = expansion.iter().collect();
        assert_eq!(expanded, cells);
        assert_eq!(expansion.expanded_len(), 2);
    }

    #[test]
    fn test_single_level_expansion() {
        let expansion = CellExpansion::new(vec!["s".to_string()], 2).unwrap();
        let expanded: Vec<String> = expansion.iter().collect();

        assert_eq!(expanded.len(), 32);
        assert_eq!(expanded[0], "s0");
        assert_eq!(expanded[9], "s9");
        assert_eq!(expanded[10], "sb"); // alphabet skips a, i, l, o
        assert_eq!(expanded[31], "sz");
    }

    #[test]
    fn test_two_level_expansion_counts() {
        let expansion = CellExpansion::new(vec!["s".to_string()], 3).unwrap();
        assert_eq!(expansion.expanded_len(), 1024);

        let expanded: Vec<String> = expansion.iter().collect();
        assert_eq!(expanded.len(), 1024);
        assert_eq!(expanded[0], "s00");
        assert_eq!(expanded[1], "s01");
        assert_eq!(expanded[32], "s10");
        assert_eq!(expanded[1023], "szz");
        assert!(expanded.iter().all(|cell| cell.starts_with('s')));
    }

    #[test]
    fn test_mixed_lengths_enumerate_per_prefix() {
        let cells = vec!["t1".to_string(), "s".to_string()];
        let expansion = CellExpansion::new(cells, 2).unwrap();
        assert_eq!(expansion.expanded_len(), 33);

        let expanded: Vec<String> = expansion.iter().collect();
        assert_eq!(expanded.len(), 33);
        // Input is sorted at construction, so "s" descendants come first.
        assert_eq!(expanded[0], "s0");
        assert_eq!(expanded[32], "t1");
    }

    #[test]
    fn test_longer_input_is_truncated() {
        let expansion = CellExpansion::new(vec!["s00b".to_string()], 3).unwrap();
        let expanded: Vec<String> = expansion.iter().collect();
        assert_eq!(expanded, vec!["s00".to_string()]);
    }

    #[test]
    fn test_re_enumeration_is_identical() {
        let expansion = CellExpansion::new(vec!["s0".to_string()], 3).unwrap();
        let first: Vec<String> = expansion.iter().collect();
        let second: Vec<String> = expansion.iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_owned_and_borrowed_iteration_agree() {
        let expansion = CellExpansion::new(vec!["s0".to_string()], 3).unwrap();
        let borrowed: Vec<String> = expansion.iter().collect();
        let owned: Vec<String> = expansion.into_iter().collect();
        assert_eq!(borrowed, owned);
    }

    #[test]
    fn test_invalid_precision_rejected() {
        assert!(CellExpansion::new(vec!["s".to_string()], 0).is_err());
        assert!(CellExpansion::new(vec!["s".to_string()], 13).is_err());
    }

    #[test]
    fn test_empty_input() {
        let expansion = CellExpansion::new(Vec::new(), 5).unwrap();
        assert!(expansion.is_empty());
        assert_eq!(expansion.expanded_len(), 0);
        assert_eq!(expansion.iter().count(), 0);
    }
}
