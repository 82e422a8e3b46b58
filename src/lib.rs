#![doc = include_str!("../README.md")]
use thiserror::Error;

pub mod analysis;
pub mod config;
pub mod matrix;
pub mod output;
pub mod parser;
pub mod score;
pub mod transition;
pub mod utils;

pub use analysis::Analysis;
pub use config::Config;
pub use matrix::PresenceMatrix;
pub use parser::candidates::CandidatePair;
pub use score::{Concordance, ScoredPair};
pub use transition::{ConsecutivePolicy, TransitionSet, Transitions};

/// Default minimum absolute net score of a gene pair in exhaustive mode
pub const DEFAULT_MIN_TRANSITIONS: u32 = 4;

/// Default minimum absolute net score of a candidate pair in validation mode
///
/// Same as [`DEFAULT_MIN_TRANSITIONS`]. Use `0` to accept every scored candidate pair
pub const DEFAULT_MIN_SCORE: u32 = DEFAULT_MIN_TRANSITIONS;

/// Default step size. A difference between two adjacent organisms
/// must be strictly larger than this value to count as a transition
pub const DEFAULT_STEP: f64 = 1.0;

/// Starts a comment in all input tables, the rest of the line is ignored
pub const COMMENT_MARKER: char = '#';

/// Default header names of the two gene columns of a candidate pair table
pub const DEFAULT_CANDIDATE_COLUMNS: (&str, &str) = ("og1", "og2");

/// Number of matrix rows that are scored together in parallel mode
const BLOCK_ROWS: usize = 64;

/// Main Error type for this crate
#[derive(Error, Debug)]
pub enum CotransError {
    /// Failed to open a file
    #[error("unable to open file {0}")]
    CannotOpenFile(String),
    /// The input data is not in the expected format
    #[error("invalid input data: {0}")]
    InvalidInput(String),
    /// A matrix cell contains neither a number nor a missing marker
    #[error("line {line}: `{value}` is not a number")]
    NotANumber {
        /// 1-based line number of the input file
        line: usize,
        /// The offending cell content
        value: String,
    },
    /// A matrix row has a different number of columns than the first row
    #[error("line {line}: expected {expected} values, found {found}")]
    RaggedRow {
        /// 1-based line number of the input file
        line: usize,
        /// Number of organisms of the matrix
        expected: usize,
        /// Number of values in the offending row
        found: usize,
    },
    /// A gene key appears in more than one matrix row
    #[error("gene {0} is present more than once")]
    DuplicateGene(String),
    /// A required column is missing from the header of a table
    #[error("column {0} is missing from the header")]
    MissingColumn(String),
    /// An invalid configuration value was provided
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The worker pool for parallel scoring could not be created
    #[error("unable to create thread pool: {0}")]
    ThreadPool(String),
    /// Reading input or writing output failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shortcut for `Result<T, CotransError>`
pub type CotransResult<T> = Result<T, CotransError>;
