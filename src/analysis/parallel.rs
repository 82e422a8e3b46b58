//! Exhaustive scoring on a rayon thread pool
//!
//! The matrix rows are processed in blocks. All pairs of the rows of one block
//! are scored in parallel, then written in row order before the next block
//! starts. This keeps the output identical to the sequential run and limits
//! memory to the accepted pairs of a single block.
use std::io::Write;

use rayon::prelude::*;
use tracing::debug;

use super::Analysis;
use crate::output::PairWriter;
use crate::{CotransError, CotransResult, ScoredPair, BLOCK_ROWS};

/// Writes all accepted pairs and returns the number of written pairs
pub(super) fn write_all_pairs<W: Write>(
    analysis: &Analysis,
    writer: &mut PairWriter<W>,
) -> CotransResult<u64> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(analysis.config().threads())
        .build()
        .map_err(|err| CotransError::ThreadPool(err.to_string()))?;

    let genes = analysis.matrix().gene_count();
    let block_size = BLOCK_ROWS * pool.current_num_threads();
    debug!(
        "Scoring {} genes on {} threads in blocks of {} rows",
        genes,
        pool.current_num_threads(),
        block_size
    );

    let mut emitted = 0u64;
    for start in (0..genes).step_by(block_size) {
        let end = (start + block_size).min(genes);
        let block: Vec<Vec<ScoredPair<'_>>> = pool.install(|| {
            (start..end)
                .into_par_iter()
                .map(|gene| analysis.row_pairs(gene).collect())
                .collect()
        });
        for pair in block.iter().flatten() {
            writer.write_pair(pair)?;
            emitted += 1;
        }
    }
    Ok(emitted)
}
