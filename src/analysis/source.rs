use std::marker::PhantomData;

use smallvec::SmallVec;

use crate::output::Mode;
use crate::utils::IndexPairs;
use crate::{CandidatePair, PresenceMatrix};

/// Gene keys of a candidate pair that are not present in the matrix
pub type MissingGenes<'a> = SmallVec<[&'a str; 2]>;

/// Result of resolving a pair to matrix row indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Both genes are present, with their row indices
    Found(usize, usize),
    /// At least one gene is not present
    Missing(MissingGenes<'a>),
}

/// A source of gene pairs to score
///
/// There are two sources:
/// - [`AllPairs`] enumerates every pair of the matrix
/// - [`Candidates`] resolves externally supplied [`CandidatePair`]s
pub trait PairSource<'a>: Iterator<Item = Lookup<'a>> {
    /// Returns the [`Mode`] that this source represents
    fn mode(&self) -> Mode;
}

/// Enumerates all unordered pairs of matrix rows, in lexicographic order
#[derive(Debug, Clone)]
pub struct AllPairs<'a> {
    inner: IndexPairs,
    phantom: PhantomData<&'a PresenceMatrix>,
}

impl<'a> AllPairs<'a> {
    /// Constructs a new [`AllPairs`] source for all genes of `matrix`
    pub fn new(matrix: &'a PresenceMatrix) -> Self {
        Self {
            inner: IndexPairs::new(matrix.gene_count()),
            phantom: PhantomData,
        }
    }
}

impl<'a> Iterator for AllPairs<'a> {
    type Item = Lookup<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(a, b)| Lookup::Found(a, b))
    }
}

impl<'a> PairSource<'a> for AllPairs<'a> {
    fn mode(&self) -> Mode {
        Mode::Exhaustive
    }
}

/// Resolves [`CandidatePair`]s to matrix rows, in input order
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    matrix: &'a PresenceMatrix,
    pairs: std::slice::Iter<'a, CandidatePair>,
}

impl<'a> Candidates<'a> {
    /// Constructs a new [`Candidates`] source
    pub fn new(matrix: &'a PresenceMatrix, pairs: &'a [CandidatePair]) -> Self {
        Self {
            matrix,
            pairs: pairs.iter(),
        }
    }

    fn resolve(&self, pair: &'a CandidatePair) -> Lookup<'a> {
        let a = self.matrix.gene_index(pair.gene_a());
        let b = self.matrix.gene_index(pair.gene_b());
        match (a, b) {
            (Some(a), Some(b)) => Lookup::Found(a, b),
            _ => {
                let mut missing = MissingGenes::new();
                if a.is_none() {
                    missing.push(pair.gene_a());
                }
                if b.is_none() {
                    missing.push(pair.gene_b());
                }
                Lookup::Missing(missing)
            }
        }
    }
}

impl<'a> Iterator for Candidates<'a> {
    type Item = Lookup<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        let pair = self.pairs.next()?;
        Some(self.resolve(pair))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pairs.size_hint()
    }
}

impl<'a> PairSource<'a> for Candidates<'a> {
    fn mode(&self) -> Mode {
        Mode::Validation
    }
}
