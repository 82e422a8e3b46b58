use smallvec::SmallVec;

/// Most genes only change a handful of times along the tree
const INLINE_POSITIONS: usize = 8;

/// A sorted set of organism column indices
///
/// Each index can occur only once in the set.
///
/// [`Positions`] hold the tree positions at which a gene gains or loses
/// presence, see [`TransitionSet`](`crate::TransitionSet`).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Positions {
    ids: SmallVec<[usize; INLINE_POSITIONS]>,
}

impl Positions {
    /// Constructs a new, empty [`Positions`] set
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the set contains no position
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of positions in the set
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds a new position to the set
    ///
    /// Returns whether the position was newly inserted. That is:
    ///
    /// - If the set did not previously contain this position, true is returned.
    /// - If the set already contained this position, false is returned.
    pub fn insert(&mut self, id: usize) -> bool {
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id);
                true
            }
        }
    }

    /// Returns `true` if the set contains the position
    pub fn contains(&self, id: usize) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    /// Returns an Iterator of the positions in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.ids.iter().copied()
    }

    /// Returns the number of positions present in both sets
    ///
    /// Walks both sorted sets once, without allocating.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cotrans::transition::Positions;
    ///
    /// let a: Positions = [1, 4, 7].into_iter().collect();
    /// let b: Positions = [2, 4, 7, 9].into_iter().collect();
    /// assert_eq!(a.intersection_len(&b), 2);
    /// ```
    pub fn intersection_len(&self, other: &Positions) -> usize {
        let mut count = 0;
        let mut lhs = self.ids.iter().peekable();
        let mut rhs = other.ids.iter().peekable();
        while let (Some(l), Some(r)) = (lhs.peek(), rhs.peek()) {
            match l.cmp(r) {
                std::cmp::Ordering::Less => {
                    lhs.next();
                }
                std::cmp::Ordering::Greater => {
                    rhs.next();
                }
                std::cmp::Ordering::Equal => {
                    count += 1;
                    lhs.next();
                    rhs.next();
                }
            }
        }
        count
    }

    /// Returns the number of positions present in at least one of the sets
    pub fn union_len(&self, other: &Positions) -> usize {
        self.len() + other.len() - self.intersection_len(other)
    }
}

impl FromIterator<usize> for Positions {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut positions = Positions::new();
        for id in iter {
            positions.insert(id);
        }
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_order() {
        let mut positions = Positions::new();
        assert!(positions.insert(5));
        assert!(positions.insert(1));
        assert!(positions.insert(3));
        assert!(!positions.insert(3));
        assert_eq!(positions.iter().collect::<Vec<_>>(), vec![1, 3, 5]);
        assert_eq!(positions.len(), 3);
    }

    #[test]
    fn contains() {
        let positions: Positions = [2, 8].into_iter().collect();
        assert!(positions.contains(2));
        assert!(positions.contains(8));
        assert!(!positions.contains(5));
        assert!(!Positions::new().contains(0));
    }

    #[test]
    fn union() {
        let a: Positions = [1, 2, 3].into_iter().collect();
        let b: Positions = [2, 4].into_iter().collect();
        assert_eq!(a.union_len(&b), 4);
        assert_eq!(b.union_len(&a), 4);
    }

    #[test]
    fn intersection() {
        let a: Positions = [1, 2, 3].into_iter().collect();
        let b: Positions = [2, 4, 5, 1].into_iter().collect();
        assert_eq!(a.intersection_len(&b), 2);
        assert_eq!(b.intersection_len(&a), 2);
    }

    #[test]
    fn empty_sets() {
        let a: Positions = [1, 2, 3].into_iter().collect();
        let empty = Positions::new();
        assert_eq!(a.intersection_len(&empty), 0);
        assert_eq!(empty.union_len(&a), 3);
        assert_eq!(empty.union_len(&empty), 0);
    }

    #[test]
    fn spilled_to_heap() {
        let a: Positions = (0..40).step_by(2).collect();
        let b: Positions = (0..40).step_by(3).collect();
        // common multiples of 6 below 40
        assert_eq!(a.intersection_len(&b), 7);
        assert_eq!(a.union_len(&b), 27);
    }
}
