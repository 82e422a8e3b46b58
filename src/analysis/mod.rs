//! Scoring gene pairs for phylogenetic co-evolution
use std::io::Write;
use std::path::Path;

use tracing::{info, trace, warn};

use crate::output::{Mode, PairWriter, Summary};
use crate::parser::presence;
use crate::utils::{pair_count, IndexPairs};
use crate::{CandidatePair, Config, CotransResult, PresenceMatrix, ScoredPair};
use crate::{TransitionSet, Transitions};

mod parallel;
mod source;

pub use source::{AllPairs, Candidates, Lookup, MissingGenes, PairSource};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// `Analysis` holds a presence matrix together with the transitions of all genes
///
/// The transitions are derived once, when the [`Analysis`] is created, and
/// never change afterwards. All gene pairs are scored from these transitions.
///
/// # Examples
///
/// ```
/// use cotrans::{Analysis, Config};
///
/// let config = Config::builder().min_transitions(2).build().unwrap();
/// let analysis = Analysis::from_file("tests/data/matrix.tsv", config).unwrap();
///
/// for pair in analysis.all_pairs().accepted() {
///     println!("{pair}");
/// }
///
/// let pair = analysis.score_by_key("OG1", "OG2").unwrap();
/// assert_eq!(pair.net(), 3);
/// ```
///
/// # Modes
///
/// An [`Analysis`] supports two ways of selecting gene pairs, both feed the
/// same scoring:
///
/// ```mermaid
/// flowchart LR
///     M[PresenceMatrix] --> T[Transitions]
///     T --> S{PairSource}
///     S -->|AllPairs| E[Exhaustive: all i < j]
///     S -->|Candidates| V[Validation: lookup by key]
///     V -->|missing gene| W[warning]
///     E --> C[Concordance]
///     V --> C
///     C -->|abs k >= threshold| O[PairWriter]
/// ```
///
/// - **Exhaustive** ([`Analysis::all_pairs`]): every pair of genes,
///   filtered with [`Config::min_transitions`]
/// - **Validation** ([`Analysis::candidates`]): externally supplied
///   [`CandidatePair`]s, filtered with [`Config::min_score`]
#[derive(Debug, Clone)]
pub struct Analysis {
    matrix: PresenceMatrix,
    transitions: Transitions,
    config: Config,
}

impl Analysis {
    /// Constructs a new [`Analysis`] and derives the transitions of all genes
    pub fn new(matrix: PresenceMatrix, config: Config) -> Self {
        let transitions = Transitions::extract(&matrix, config.policy(), config.step());
        info!("done transitions");
        Self {
            matrix,
            transitions,
            config,
        }
    }

    /// Reads the presence matrix from a file and constructs the [`Analysis`]
    ///
    /// # Errors
    ///
    /// See [`presence::from_file`]
    pub fn from_file<P: AsRef<Path>>(path: P, config: Config) -> CotransResult<Self> {
        Ok(Self::new(presence::from_file(path)?, config))
    }

    /// Returns the [`PresenceMatrix`]
    pub fn matrix(&self) -> &PresenceMatrix {
        &self.matrix
    }

    /// Returns the [`Transitions`] of all genes
    pub fn transitions(&self) -> &Transitions {
        &self.transitions
    }

    /// Returns the [`Config`]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the [`TransitionSet`] of the gene with the given key
    pub fn transition_set(&self, key: &str) -> Option<&TransitionSet> {
        self.matrix
            .gene_index(key)
            .and_then(|idx| self.transitions.get(idx))
    }

    /// Scores the genes at row indices `gene_a` and `gene_b`
    ///
    /// Returns `None` if either index is out of bounds. No threshold is applied.
    pub fn score(&self, gene_a: usize, gene_b: usize) -> Option<ScoredPair<'_>> {
        Some(ScoredPair::new(
            (self.matrix.gene_key(gene_a)?, self.transitions.get(gene_a)?),
            (self.matrix.gene_key(gene_b)?, self.transitions.get(gene_b)?),
            self.matrix.organism_count(),
        ))
    }

    /// Scores two genes, identified by their keys
    ///
    /// Returns `None` if either gene is not present. No threshold is applied.
    pub fn score_by_key(&self, gene_a: &str, gene_b: &str) -> Option<ScoredPair<'_>> {
        self.score(
            self.matrix.gene_index(gene_a)?,
            self.matrix.gene_index(gene_b)?,
        )
    }

    /// Scores every unordered pair of genes, in row order
    pub fn all_pairs(&self) -> Outcomes<'_, AllPairs<'_>> {
        Outcomes::new(self, AllPairs::new(&self.matrix))
    }

    /// Scores the given candidate pairs, in input order
    pub fn candidates<'a>(&'a self, pairs: &'a [CandidatePair]) -> Outcomes<'a, Candidates<'a>> {
        Outcomes::new(self, Candidates::new(&self.matrix, pairs))
    }

    /// Returns the score threshold of the given [`Mode`]
    pub fn threshold(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Exhaustive => self.config.min_transitions(),
            Mode::Validation => self.config.min_score(),
        }
    }

    /// Accepted pairs of a single matrix row `gene` with all following rows
    fn row_pairs(&self, gene: usize) -> impl Iterator<Item = ScoredPair<'_>> {
        let threshold = self.threshold(Mode::Exhaustive);
        IndexPairs::row(self.matrix.gene_count(), gene)
            .filter_map(move |(a, b)| self.score(a, b))
            .filter(move |pair| pair.concordance().passes(threshold))
    }

    /// Scores all gene pairs and writes the accepted ones, including a header
    ///
    /// Uses parallel scoring if [`Config::threads`] is not `1`. The output
    /// is identical in both cases.
    ///
    /// # Errors
    ///
    /// - [`CotransError::Io`](`crate::CotransError::Io`): Writing failed
    /// - [`CotransError::ThreadPool`](`crate::CotransError::ThreadPool`): The worker threads could not be started
    pub fn write_all_pairs<W: Write>(&self, writer: &mut PairWriter<W>) -> CotransResult<Summary> {
        writer.write_header()?;
        let emitted = if self.config.threads() == 1 {
            write_outcomes(self.all_pairs(), writer)?.0
        } else {
            parallel::write_all_pairs(self, writer)?
        };
        writer.flush()?;
        info!("done concordance");
        Ok(Summary::new(
            Mode::Exhaustive,
            pair_count(self.matrix.gene_count()),
            emitted,
            0,
        ))
    }

    /// Scores all candidate pairs and writes the accepted ones, including a header
    ///
    /// Candidates with genes that are not present in the matrix are reported
    /// as a warning and skipped.
    ///
    /// # Errors
    ///
    /// - [`CotransError::Io`](`crate::CotransError::Io`): Writing failed
    pub fn write_candidates<W: Write>(
        &self,
        pairs: &[CandidatePair],
        writer: &mut PairWriter<W>,
    ) -> CotransResult<Summary> {
        writer.write_header()?;
        let (emitted, missing) = write_outcomes(self.candidates(pairs), writer)?;
        writer.flush()?;
        info!("done concordance");
        Ok(Summary::new(
            Mode::Validation,
            pairs.len() as u64,
            emitted,
            missing,
        ))
    }
}

/// Writes all accepted pairs and returns the number of written and missing pairs
fn write_outcomes<'a, S: PairSource<'a>, W: Write>(
    outcomes: Outcomes<'a, S>,
    writer: &mut PairWriter<W>,
) -> CotransResult<(u64, u64)> {
    let mut emitted = 0u64;
    let mut missing = 0u64;
    for outcome in outcomes {
        match outcome {
            Outcome::Accepted(pair) => {
                writer.write_pair(&pair)?;
                emitted += 1;
            }
            Outcome::Rejected(pair) => {
                trace!("Rejecting {} - {}: k = {}", pair.gene_a(), pair.gene_b(), pair.net());
            }
            Outcome::Missing(genes) => {
                warn!("{} missing", genes.join(", "));
                missing += 1;
            }
        }
    }
    Ok((emitted, missing))
}

/// The result of scoring a single pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// The pair passed the threshold
    Accepted(ScoredPair<'a>),
    /// The absolute net score is below the threshold
    Rejected(ScoredPair<'a>),
    /// At least one gene is not present in the matrix
    Missing(MissingGenes<'a>),
}

/// Scores the pairs of a [`PairSource`]
///
/// This struct is returned by [`Analysis::all_pairs`] and [`Analysis::candidates`]
pub struct Outcomes<'a, S> {
    analysis: &'a Analysis,
    source: S,
    threshold: u32,
}

impl<'a, S: PairSource<'a>> Outcomes<'a, S> {
    fn new(analysis: &'a Analysis, source: S) -> Self {
        let threshold = analysis.threshold(source.mode());
        Self {
            analysis,
            source,
            threshold,
        }
    }

    /// Returns only the pairs that pass the threshold
    pub fn accepted(self) -> impl Iterator<Item = ScoredPair<'a>> {
        self.filter_map(|outcome| match outcome {
            Outcome::Accepted(pair) => Some(pair),
            _ => None,
        })
    }
}

impl<'a, S: PairSource<'a>> Iterator for Outcomes<'a, S> {
    type Item = Outcome<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        match self.source.next()? {
            Lookup::Found(a, b) => {
                // indices come from the matrix, so both genes exist
                let pair = self.analysis.score(a, b)?;
                if pair.concordance().passes(self.threshold) {
                    Some(Outcome::Accepted(pair))
                } else {
                    Some(Outcome::Rejected(pair))
                }
            }
            Lookup::Missing(genes) => Some(Outcome::Missing(genes)),
        }
    }
}
