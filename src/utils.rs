//! Utility structs and methods
use std::cmp::Ordering::Less;

/// Iterator of all one-way pairwise combinations of `0..len`
///
/// Pairs are yielded in lexicographic order, the first index
/// is always smaller than the second one.
///
/// # Examples
/// ```
/// use cotrans::utils::IndexPairs;
///
/// let mut c = IndexPairs::new(3);
///
/// assert_eq!(c.next(), Some((0, 1)));
/// assert_eq!(c.next(), Some((0, 2)));
/// assert_eq!(c.next(), Some((1, 2)));
/// assert!(c.next().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct IndexPairs {
    len: usize,
    idx1: usize,
    idx2: usize,
}

impl IndexPairs {
    /// Creates a new iterator over all pairs of `len` items
    pub fn new(len: usize) -> Self {
        Self {
            len,
            idx1: 0,
            idx2: 1,
        }
    }

    /// Creates a new iterator over all pairs whose first index is `row`
    pub(crate) fn row(len: usize, row: usize) -> impl Iterator<Item = (usize, usize)> {
        (row.saturating_add(1).min(len)..len).map(move |idx2| (row, idx2))
    }
}

impl Iterator for IndexPairs {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<Self::Item> {
        match (self.idx1 < self.len, self.idx2.cmp(&self.len)) {
            (true, Less) => {
                self.idx2 += 1;
                Some((self.idx1, self.idx2 - 1))
            }
            (true, _) => {
                self.idx1 += 1;
                self.idx2 = self.idx1 + 1;
                self.next()
            }
            _ => None,
        }
    }
}

/// Returns the number of unordered pairs of `n` items
///
/// ```
/// use cotrans::utils::pair_count;
///
/// assert_eq!(pair_count(0), 0);
/// assert_eq!(pair_count(1), 0);
/// assert_eq!(pair_count(4), 6);
/// ```
pub fn pair_count(n: usize) -> u64 {
    let n = n as u64;
    n * n.saturating_sub(1) / 2
}
