//! Concordance of the transitions of two genes
//!
//! Two genes are *concordant* at a tree position if both are gained or
//! both are lost at that position. They are *discordant* if one is gained
//! while the other one is lost.
//!
//! ```rust
//! use cotrans::{ConsecutivePolicy, Concordance, TransitionSet};
//!
//! let values = |v: [f64; 5]| v.into_iter().map(Some).collect::<Vec<_>>();
//! let a = TransitionSet::from_row(&values([0.0, 2.0, 2.0, 0.0, 0.0]), ConsecutivePolicy::Collapse, 1.0);
//! let b = TransitionSet::from_row(&values([0.0, 2.0, 2.0, 2.0, 0.0]), ConsecutivePolicy::Collapse, 1.0);
//! let c = TransitionSet::from_row(&values([2.0, 0.0, 0.0, 2.0, 2.0]), ConsecutivePolicy::Collapse, 1.0);
//!
//! let ab = Concordance::between(&a, &b);
//! assert_eq!((ab.concordant(), ab.discordant(), ab.net()), (1, 0, 1));
//!
//! let ac = Concordance::between(&a, &c);
//! assert_eq!((ac.concordant(), ac.discordant(), ac.net()), (0, 2, -2));
//! ```
use std::fmt::Display;

use crate::TransitionSet;

/// The number of concordant and discordant transitions of a gene pair
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Concordance {
    concordant: usize,
    discordant: usize,
}

impl Concordance {
    /// Compares the transitions of two genes
    ///
    /// The comparison is symmetric, `between(a, b) == between(b, a)`
    pub fn between(a: &TransitionSet, b: &TransitionSet) -> Self {
        Self {
            concordant: a.rising().intersection_len(b.rising())
                + a.falling().intersection_len(b.falling()),
            discordant: a.falling().intersection_len(b.rising())
                + a.rising().intersection_len(b.falling()),
        }
    }

    /// Positions at which both genes change in the same direction
    pub fn concordant(&self) -> usize {
        self.concordant
    }

    /// Positions at which the genes change in opposite directions
    pub fn discordant(&self) -> usize {
        self.discordant
    }

    /// The net co-evolution score `k`: concordant minus discordant
    pub fn net(&self) -> i64 {
        self.concordant as i64 - self.discordant as i64
    }

    /// Returns `true` if the absolute net score reaches `threshold`
    pub fn passes(&self, threshold: u32) -> bool {
        self.net().unsigned_abs() >= u64::from(threshold)
    }
}

/// A scored gene pair, one row of the output table
///
/// ```text
/// G1      G2      orgs    t1      t2      c       d       k
/// OG1     OG7     120     9       11      5       0       5
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredPair<'a> {
    gene_a: &'a str,
    gene_b: &'a str,
    organisms: usize,
    transitions_a: usize,
    transitions_b: usize,
    concordance: Concordance,
}

impl<'a> ScoredPair<'a> {
    /// Scores two genes with their keys and [`TransitionSet`]s
    pub fn new(
        gene_a: (&'a str, &TransitionSet),
        gene_b: (&'a str, &TransitionSet),
        organisms: usize,
    ) -> Self {
        Self {
            gene_a: gene_a.0,
            gene_b: gene_b.0,
            organisms,
            transitions_a: gene_a.1.total(),
            transitions_b: gene_b.1.total(),
            concordance: Concordance::between(gene_a.1, gene_b.1),
        }
    }

    /// Key of the first gene
    pub fn gene_a(&self) -> &'a str {
        self.gene_a
    }

    /// Key of the second gene
    pub fn gene_b(&self) -> &'a str {
        self.gene_b
    }

    /// Number of organisms of the matrix
    pub fn organisms(&self) -> usize {
        self.organisms
    }

    /// Total number of transitions of the first gene
    pub fn transitions_a(&self) -> usize {
        self.transitions_a
    }

    /// Total number of transitions of the second gene
    pub fn transitions_b(&self) -> usize {
        self.transitions_b
    }

    /// The [`Concordance`] of both genes
    pub fn concordance(&self) -> Concordance {
        self.concordance
    }

    /// The net co-evolution score `k`
    pub fn net(&self) -> i64 {
        self.concordance.net()
    }
}

impl Display for ScoredPair<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.gene_a,
            self.gene_b,
            self.organisms,
            self.transitions_a,
            self.transitions_b,
            self.concordance.concordant,
            self.concordance.discordant,
            self.concordance.net()
        )
    }
}
