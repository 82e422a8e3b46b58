//! Tab-separated output of scored gene pairs
use std::fmt::Display;
use std::io::Write;

use crate::{CotransResult, ScoredPair};

/// Column names shared by both modes, following the two gene columns
const SCORE_COLUMNS: [&str; 6] = ["orgs", "t1", "t2", "c", "d", "k"];

/// The two ways to select gene pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every pair of genes of the matrix
    Exhaustive,
    /// Candidate pairs from an external source
    Validation,
}

impl Mode {
    /// Returns the names of the two gene columns
    fn gene_columns(&self) -> [&'static str; 2] {
        match self {
            Mode::Exhaustive => ["Orthogroup1", "Orthogroup2"],
            Mode::Validation => ["G1", "G2"],
        }
    }

    /// Returns the tab-separated header line, without line break
    ///
    /// ```rust
    /// use cotrans::output::Mode;
    ///
    /// assert_eq!(Mode::Validation.header(), "G1\tG2\torgs\tt1\tt2\tc\td\tk");
    /// ```
    pub fn header(&self) -> String {
        let mut cols = self.gene_columns().to_vec();
        cols.extend(SCORE_COLUMNS);
        cols.join("\t")
    }
}

/// Writes [`ScoredPair`]s as rows of a table
///
/// Every row is written immediately to the inner writer. Wrap the
/// writer into a [`BufWriter`](`std::io::BufWriter`) if needed.
pub struct PairWriter<W: Write> {
    inner: W,
    mode: Mode,
    rows: u64,
}

impl<W: Write> PairWriter<W> {
    /// Constructs a new [`PairWriter`]
    pub fn new(inner: W, mode: Mode) -> Self {
        Self {
            inner,
            mode,
            rows: 0,
        }
    }

    /// Writes the header line
    pub fn write_header(&mut self) -> CotransResult<()> {
        writeln!(self.inner, "{}", self.mode.header())?;
        Ok(())
    }

    /// Writes a single row
    pub fn write_pair(&mut self, pair: &ScoredPair<'_>) -> CotransResult<()> {
        writeln!(self.inner, "{pair}")?;
        self.rows += 1;
        Ok(())
    }

    /// Returns the number of rows written so far, excluding the header
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Returns the [`Mode`] of the table
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Flushes the inner writer
    pub fn flush(&mut self) -> CotransResult<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Returns the inner writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Counts of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    mode: Mode,
    pairs: u64,
    emitted: u64,
    missing: u64,
}

impl Summary {
    pub(crate) fn new(mode: Mode, pairs: u64, emitted: u64, missing: u64) -> Self {
        Self {
            mode,
            pairs,
            emitted,
            missing,
        }
    }

    /// All possible pairs (exhaustive) or all candidate pairs (validation)
    pub fn pairs(&self) -> u64 {
        self.pairs
    }

    /// Pairs that passed the score threshold and were written
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Candidate pairs that were skipped because a gene is not in the matrix
    pub fn missing(&self) -> u64 {
        self.missing
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mode {
            Mode::Exhaustive => write!(f, "Gene pairs: {}; >cutoff: {}", self.pairs, self.emitted),
            Mode::Validation => write!(
                f,
                "Candidate pairs: {}; scored: {}; missing: {}",
                self.pairs, self.emitted, self.missing
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::{State, TransitionSet};

    #[test]
    fn headers() {
        assert_eq!(
            Mode::Exhaustive.header(),
            "Orthogroup1\tOrthogroup2\torgs\tt1\tt2\tc\td\tk"
        );
        assert_eq!(Mode::Validation.header(), "G1\tG2\torgs\tt1\tt2\tc\td\tk");
    }

    #[test]
    fn write_rows() {
        let states: Vec<State> = [0, 1, 0, -1].into_iter().map(State::from).collect();
        let set = TransitionSet::from_states(&states);
        let pair = ScoredPair::new(("A", &set), ("B", &set), 4);

        let mut writer = PairWriter::new(Vec::new(), Mode::Validation);
        writer.write_header().unwrap();
        writer.write_pair(&pair).unwrap();
        assert_eq!(writer.rows(), 1);

        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(out, "G1\tG2\torgs\tt1\tt2\tc\td\tk\nA\tB\t4\t2\t2\t2\t0\t2\n");
    }

    #[test]
    fn summaries() {
        let summary = Summary::new(Mode::Exhaustive, 10, 3, 0);
        assert_eq!(summary.to_string(), "Gene pairs: 10; >cutoff: 3");
        let summary = Summary::new(Mode::Validation, 5, 3, 2);
        assert_eq!(
            summary.to_string(),
            "Candidate pairs: 5; scored: 3; missing: 2"
        );
    }
}
