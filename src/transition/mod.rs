//! Presence transitions of genes along the tree
//!
//! Each gene row of a [`PresenceMatrix`] is converted into a [`TransitionSet`]:
//! the organism positions where the gene was gained (`rising`) or lost (`falling`)
//! compared to the preceding organism.
//!
//! # Examples
//!
//! ```rust
//! use cotrans::{ConsecutivePolicy, PresenceMatrix, Transitions};
//!
//! let mut matrix = PresenceMatrix::new(5);
//! matrix.push_row("A", [0.0, 0.0, 2.0, 2.0, 0.0].into_iter().map(Some).collect()).unwrap();
//! matrix.push_row("B", [0.0, 2.0, 2.0, 0.0, 0.0].into_iter().map(Some).collect()).unwrap();
//!
//! let transitions = Transitions::extract(&matrix, ConsecutivePolicy::Collapse, 1.0);
//!
//! let a = transitions.get(0).unwrap();
//! assert_eq!(a.rising().iter().collect::<Vec<_>>(), vec![2]);
//! assert_eq!(a.falling().iter().collect::<Vec<_>>(), vec![4]);
//!
//! let b = transitions.get(1).unwrap();
//! assert_eq!(b.rising().iter().collect::<Vec<_>>(), vec![1]);
//! assert_eq!(b.falling().iter().collect::<Vec<_>>(), vec![3]);
//! ```
use tracing::debug;

use crate::matrix::Cell;
use crate::PresenceMatrix;

mod positions;
mod state;

pub use positions::Positions;
pub use state::{classify_row, collapse, State};

/// Handling of two directly adjacent transitions in opposite directions,
/// e.g. a gene that is present in only a single organism (`0 2 0`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ConsecutivePolicy {
    /// Only the first of two adjacent opposite transitions is counted
    #[default]
    Collapse,
    /// Every transition is counted
    Count,
}

impl ConsecutivePolicy {
    /// Returns the policy matching the `count_consecutive` command line flag
    pub fn from_count_consecutive(count_consecutive: bool) -> Self {
        if count_consecutive {
            ConsecutivePolicy::Count
        } else {
            ConsecutivePolicy::Collapse
        }
    }
}

/// The gain (`rising`) and loss (`falling`) positions of a single gene
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransitionSet {
    rising: Positions,
    falling: Positions,
}

impl TransitionSet {
    /// Derives the [`TransitionSet`] of a single gene row
    pub fn from_row(row: &[Cell], policy: ConsecutivePolicy, step: f64) -> Self {
        let mut states = classify_row(row, step);
        if policy == ConsecutivePolicy::Collapse {
            collapse(&mut states);
        }
        Self::from_states(&states)
    }

    /// Builds a [`TransitionSet`] from an already classified state sequence
    pub fn from_states(states: &[State]) -> Self {
        let mut set = TransitionSet::default();
        for (idx, state) in states.iter().enumerate() {
            match state {
                State::Rising => set.rising.insert(idx),
                State::Falling => set.falling.insert(idx),
                State::Steady => false,
            };
        }
        set
    }

    /// Positions at which the gene became present
    pub fn rising(&self) -> &Positions {
        &self.rising
    }

    /// Positions at which the gene became absent
    pub fn falling(&self) -> &Positions {
        &self.falling
    }

    /// Returns the number of distinct positions with any transition
    pub fn total(&self) -> usize {
        self.rising.union_len(&self.falling)
    }

    /// Returns `true` if the gene never changes
    pub fn is_empty(&self) -> bool {
        self.rising.is_empty() && self.falling.is_empty()
    }
}

/// The [`TransitionSet`]s of all genes of a [`PresenceMatrix`], in row order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transitions {
    sets: Vec<TransitionSet>,
}

impl Transitions {
    /// Derives the transitions of every gene of the matrix
    pub fn extract(matrix: &PresenceMatrix, policy: ConsecutivePolicy, step: f64) -> Self {
        let sets: Vec<TransitionSet> = matrix
            .rows()
            .map(|(_, row)| TransitionSet::from_row(row, policy, step))
            .collect();
        debug!(
            "Extracted transitions of {} genes ({} without any transition)",
            sets.len(),
            sets.iter().filter(|set| set.is_empty()).count()
        );
        Self { sets }
    }

    /// Returns the [`TransitionSet`] of the gene at row index `gene`
    pub fn get(&self, gene: usize) -> Option<&TransitionSet> {
        self.sets.get(gene)
    }

    /// Returns the number of genes
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns `true` if there are no genes
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Iterates the [`TransitionSet`]s in row order
    pub fn iter(&self) -> std::slice::Iter<'_, TransitionSet> {
        self.sets.iter()
    }
}

impl<'a> IntoIterator for &'a Transitions {
    type Item = &'a TransitionSet;
    type IntoIter = std::slice::Iter<'a, TransitionSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
