//! cotrans command line interface
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cotrans::output::{Mode, PairWriter, Summary};
use cotrans::parser::candidates;
use cotrans::{Analysis, Config, CotransError, CotransResult};
use cotrans::{DEFAULT_CANDIDATE_COLUMNS, DEFAULT_MIN_SCORE, DEFAULT_MIN_TRANSITIONS, DEFAULT_STEP};

/// Phylogenetic co-evolution of orthogroups from presence/absence transitions
#[derive(Parser, Debug)]
#[command(name = "cotrans", version, about, long_about = None)]
struct Cli {
    /// Print debug information to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every pair of genes of the matrix
    All {
        /// Tab-separated file with gene occurrence (genes by rows, organisms in tree order)
        matrix: PathBuf,

        /// Minimum absolute net score of a gene pair
        #[arg(short, long, default_value_t = DEFAULT_MIN_TRANSITIONS)]
        min_transitions: u32,

        /// Number of worker threads, 0 uses all CPUs
        #[arg(short, long, default_value_t = 1, env = "COTRANS_THREADS")]
        threads: usize,

        #[command(flatten)]
        transitions: TransitionArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Score candidate gene pairs from a validation dataset
    Validate {
        /// Tab-separated file with gene occurrence (genes by rows, organisms in tree order)
        matrix: PathBuf,

        /// Tab-separated validation dataset with a header row
        pairs: PathBuf,

        /// Minimum absolute net score of a candidate pair, 0 writes every scored pair
        #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
        min_score: u32,

        /// Header name of the first gene column
        #[arg(long, default_value = DEFAULT_CANDIDATE_COLUMNS.0)]
        col1: String,

        /// Header name of the second gene column
        #[arg(long, default_value = DEFAULT_CANDIDATE_COLUMNS.1)]
        col2: String,

        #[command(flatten)]
        transitions: TransitionArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct TransitionArgs {
    /// Do not penalize consecutive transitions (e.g. 101)
    #[arg(short, long)]
    count_consecutive: bool,

    /// A difference between neighbouring organisms must be larger than this to count as transition
    #[arg(long, default_value_t = DEFAULT_STEP)]
    step: f64,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Write the table to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl OutputArgs {
    fn writer(&self, mode: Mode) -> CotransResult<PairWriter<BufWriter<Box<dyn Write>>>> {
        let inner: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(File::create(path).map_err(|_| {
                CotransError::CannotOpenFile(path.display().to_string())
            })?),
            None => Box::new(io::stdout().lock()),
        };
        Ok(PairWriter::new(BufWriter::new(inner), mode))
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // ignore errors, the CLI works without logging
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Fails early if an input file does not exist
fn check_input(path: &Path) -> CotransResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CotransError::CannotOpenFile(path.display().to_string()))
    }
}

fn config(transitions: &TransitionArgs) -> cotrans::config::ConfigBuilder {
    Config::builder()
        .count_consecutive(transitions.count_consecutive)
        .step(transitions.step)
}

fn run(command: &Commands) -> CotransResult<Summary> {
    match command {
        Commands::All {
            matrix,
            min_transitions,
            threads,
            transitions,
            output,
        } => {
            check_input(matrix)?;
            let config = config(transitions)
                .min_transitions(*min_transitions)
                .threads(*threads)
                .build()?;
            debug!("{:?}", config);

            let analysis = Analysis::from_file(matrix, config)?;
            let mut writer = output.writer(Mode::Exhaustive)?;
            analysis.write_all_pairs(&mut writer)
        }
        Commands::Validate {
            matrix,
            pairs,
            min_score,
            col1,
            col2,
            transitions,
            output,
        } => {
            check_input(matrix)?;
            check_input(pairs)?;
            let config = config(transitions).min_score(*min_score).build()?;
            debug!("{:?}", config);

            let analysis = Analysis::from_file(matrix, config)?;
            let candidates = candidates::from_file(pairs, (col1.as_str(), col2.as_str()))?;
            debug!("Parsed {} candidate pairs", candidates.len());

            let mut writer = output.writer(Mode::Validation)?;
            analysis.write_candidates(&candidates, &mut writer)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli.command) {
        Ok(summary) => eprintln!("{summary}"),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}
