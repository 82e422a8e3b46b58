//! Parsing the input tables
//!
//! Both tables are plain text files with one record per line. Everything after
//! a [`COMMENT_MARKER`](`crate::COMMENT_MARKER`) is ignored, as are blank lines.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::{CotransError, CotransResult, COMMENT_MARKER};

/// Opens `path` for buffered reading
fn open<P: AsRef<Path>>(path: P) -> CotransResult<BufReader<File>> {
    let filename = path.as_ref().display().to_string();
    let file = File::open(path).map_err(|_| CotransError::CannotOpenFile(filename))?;
    Ok(BufReader::new(file))
}

/// Removes a trailing comment, including the whitespace before it
fn strip_comment(line: &str) -> &str {
    match line.split_once(COMMENT_MARKER) {
        Some((data, _)) => data.trim_end(),
        None => line,
    }
}

/// Returns `true` for lines that don't contain data
fn skip_line(line: &str) -> bool {
    line.trim().is_empty()
}

/// Module to parse the gene by organism presence matrix
///
/// # Example
///
/// ```text
/// # orthogroup copy numbers, organisms in tree order
/// 1001at2759  0   0   2   2   0
/// 1002at2759  0   2   2   0   NA
/// ```
pub mod presence {
    use super::*;
    use crate::matrix::Cell;
    use crate::PresenceMatrix;
    use tracing::debug;

    /// Cell contents that mark a missing value
    const MISSING_MARKERS: [&str; 6] = ["", "NA", "NaN", "nan", "N/A", "-"];

    /// A single row of the matrix
    struct ParsedRow<'a> {
        gene: &'a str,
        values: Vec<Cell>,
    }

    /// Splits a line into its cells
    ///
    /// Lines containing a tab are split at every tab, to keep empty cells.
    /// All other lines are split at any whitespace.
    fn split(line: &str) -> Vec<&str> {
        let line = line.trim_end_matches(['\n', '\r']);
        if line.contains('\t') {
            line.split('\t').map(str::trim).collect()
        } else {
            line.split_whitespace().collect()
        }
    }

    /// Parses a single cell, either a number or a missing marker
    fn parse_value(value: &str, line: usize) -> CotransResult<Cell> {
        if MISSING_MARKERS.contains(&value) {
            return Ok(None);
        }
        match value.parse::<f64>() {
            Ok(v) if v.is_nan() => Ok(None),
            Ok(v) => Ok(Some(v)),
            Err(_) => Err(CotransError::NotANumber {
                line,
                value: value.to_string(),
            }),
        }
    }

    /// Parses a single line of the matrix file
    ///
    /// `line_number` is only used for error messages
    fn parse_line(line: &str, line_number: usize) -> CotransResult<ParsedRow<'_>> {
        let mut cols = split(line).into_iter();

        // Column 1 is the gene key
        let Some(gene) = cols.next().filter(|gene| !gene.is_empty()) else {
            return Err(CotransError::InvalidInput(format!(
                "line {line_number}: missing gene identifier"
            )));
        };

        let values = cols
            .map(|value| parse_value(value, line_number))
            .collect::<CotransResult<Vec<Cell>>>()?;

        Ok(ParsedRow { gene, values })
    }

    /// Reads a complete presence matrix
    ///
    /// The number of organisms is defined by the first data row, every
    /// following row must have the same number of values.
    ///
    /// # Errors
    ///
    /// - [`CotransError::NotANumber`]: A cell is not numeric
    /// - [`CotransError::RaggedRow`]: A row has a different number of values
    /// - [`CotransError::DuplicateGene`]: A gene key is used more than once
    /// - [`CotransError::InvalidInput`]: A row has no gene key or no values at all
    pub fn read<R: BufRead>(reader: R) -> CotransResult<PresenceMatrix> {
        let mut matrix: Option<PresenceMatrix> = None;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = idx + 1;
            let data = strip_comment(&line);
            if skip_line(data) {
                continue;
            }
            let row = parse_line(data, line_number)?;

            let matrix = matrix.get_or_insert_with(|| PresenceMatrix::new(row.values.len()));
            if matrix.organism_count() == 0 {
                return Err(CotransError::InvalidInput(format!(
                    "line {line_number}: gene {} has no values",
                    row.gene
                )));
            }
            if row.values.len() != matrix.organism_count() {
                return Err(CotransError::RaggedRow {
                    line: line_number,
                    expected: matrix.organism_count(),
                    found: row.values.len(),
                });
            }
            matrix.push_row(row.gene, row.values)?;
        }

        let matrix = matrix.unwrap_or_default();
        debug!(
            "Parsed matrix with {} genes and {} organisms",
            matrix.gene_count(),
            matrix.organism_count()
        );
        Ok(matrix)
    }

    /// Reads a presence matrix from a file
    ///
    /// # Errors
    ///
    /// - [`CotransError::CannotOpenFile`]: The file is not present or can't be opened
    /// - all errors of [`read`]
    pub fn from_file<P: AsRef<Path>>(path: P) -> CotransResult<PresenceMatrix> {
        read(open(path)?)
    }

    #[cfg(test)]
    mod test_matrix_parsing {
        use super::*;

        #[test]
        fn test_parse_tab_line() {
            let row = parse_line("OG1\t0\t1\t2.5\n", 1).expect("valid line");
            assert_eq!(row.gene, "OG1");
            assert_eq!(row.values, vec![Some(0.0), Some(1.0), Some(2.5)]);
        }

        #[test]
        fn test_parse_whitespace_line() {
            let row = parse_line("OG1   0 1    2", 1).expect("valid line");
            assert_eq!(row.gene, "OG1");
            assert_eq!(row.values, vec![Some(0.0), Some(1.0), Some(2.0)]);
        }

        #[test]
        fn test_parse_missing_values() {
            let row = parse_line("OG1\t0\t\tNA\tnan\t-\t3\r\n", 1).expect("valid line");
            assert_eq!(row.values, vec![Some(0.0), None, None, None, None, Some(3.0)]);
        }

        #[test]
        fn test_parse_invalid_value() {
            let res = parse_line("OG1\t0\tfoo\t1", 7);
            assert!(matches!(
                res,
                Err(CotransError::NotANumber { line: 7, value }) if value == "foo"
            ));
        }

        #[test]
        fn test_parse_missing_gene() {
            assert!(parse_line("\t0\t1", 1).is_err());
        }

        #[test]
        fn test_read_matrix() {
            let x = "# comment\nOG1\t0\t2\t0\n\nOG2\t1\t1\t4\n#OG3\t1\t1\t1\n".as_bytes();
            let matrix = read(BufReader::new(x)).expect("valid matrix");
            assert_eq!(matrix.dim(), (2, 3));
            assert_eq!(matrix.gene_index("OG2"), Some(1));
            assert_eq!(matrix.value_at(1, 2), Some(4.0));
            assert!(matrix.gene_index("#OG3").is_none());
        }

        #[test]
        fn test_read_inline_comments() {
            let x = "OG1\t0\t2 # note\nOG2\t1\t1\t# note\nOG3\t0\t\n".as_bytes();
            let matrix = read(BufReader::new(x)).expect("valid matrix");
            assert_eq!(matrix.dim(), (3, 2));
            assert_eq!(matrix.row(0), Some(&[Some(0.0), Some(2.0)][..]));
            assert_eq!(matrix.row(1), Some(&[Some(1.0), Some(1.0)][..]));
            assert_eq!(matrix.row(2), Some(&[Some(0.0), None][..]));
        }

        #[test]
        fn test_read_empty() {
            let x = "# nothing here\n".as_bytes();
            let matrix = read(BufReader::new(x)).expect("valid, but empty matrix");
            assert!(matrix.is_empty());
        }

        #[test]
        fn test_read_ragged() {
            let x = "OG1\t0\t2\t0\nOG2\t1\t1\n".as_bytes();
            let res = read(BufReader::new(x));
            assert!(matches!(
                res,
                Err(CotransError::RaggedRow {
                    line: 2,
                    expected: 3,
                    found: 2
                })
            ));
        }

        #[test]
        fn test_read_duplicate() {
            let x = "OG1\t0\t2\nOG2\t1\t1\nOG1\t0\t0\n".as_bytes();
            let res = read(BufReader::new(x));
            assert!(matches!(res, Err(CotransError::DuplicateGene(key)) if key == "OG1"));
        }

        #[test]
        fn test_read_without_values() {
            let x = "OG1\nOG2\n".as_bytes();
            assert!(read(BufReader::new(x)).is_err());
        }

        #[test]
        fn test_missing_file() {
            let res = from_file("tests/data/does_not_exist.tsv");
            assert!(matches!(res, Err(CotransError::CannotOpenFile(_))));
        }
    }
}

/// Module to parse candidate gene pairs
///
/// The table needs a header row. The two gene columns are identified
/// by their names, all other columns are ignored.
///
/// # Example
///
/// ```text
/// og1         og2         source
/// 1001at2759  1042at2759  string
/// 1001at2759  1187at2759  string
/// ```
pub mod candidates {
    use super::*;

    /// An unordered pair of gene keys, supplied from an external source
    ///
    /// The genes are not necessarily present in the matrix
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct CandidatePair {
        gene_a: String,
        gene_b: String,
    }

    impl CandidatePair {
        /// Constructs a new [`CandidatePair`]
        pub fn new<A: Into<String>, B: Into<String>>(gene_a: A, gene_b: B) -> Self {
            Self {
                gene_a: gene_a.into(),
                gene_b: gene_b.into(),
            }
        }

        /// Key of the first gene
        pub fn gene_a(&self) -> &str {
            &self.gene_a
        }

        /// Key of the second gene
        pub fn gene_b(&self) -> &str {
            &self.gene_b
        }
    }

    /// Position of the two gene columns within a row
    #[derive(Debug, PartialEq)]
    struct Header {
        col_a: usize,
        col_b: usize,
    }

    impl Header {
        fn parse(line: &str, names: (&str, &str)) -> CotransResult<Self> {
            let position = |name: &str| {
                line.split('\t')
                    .map(str::trim)
                    .position(|col| col == name)
                    .ok_or_else(|| CotransError::MissingColumn(name.to_string()))
            };
            Ok(Self {
                col_a: position(names.0)?,
                col_b: position(names.1)?,
            })
        }

        /// Parses a single data row into a [`CandidatePair`]
        fn pair(&self, line: &str, line_number: usize) -> CotransResult<CandidatePair> {
            let cols: Vec<&str> = line.split('\t').map(str::trim).collect();
            match (cols.get(self.col_a), cols.get(self.col_b)) {
                (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => {
                    Ok(CandidatePair::new(*a, *b))
                }
                _ => Err(CotransError::InvalidInput(format!(
                    "line {line_number}: missing gene identifier"
                ))),
            }
        }
    }

    /// Reads all candidate pairs, in input order
    ///
    /// `columns` are the header names of the two gene columns
    ///
    /// # Errors
    ///
    /// - [`CotransError::MissingColumn`]: The header does not contain both columns
    /// - [`CotransError::InvalidInput`]: The table has no header, or a row misses a gene key
    pub fn read<R: BufRead>(reader: R, columns: (&str, &str)) -> CotransResult<Vec<CandidatePair>> {
        let mut header: Option<Header> = None;
        let mut pairs = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let data = strip_comment(&line);
            if skip_line(data) {
                continue;
            }
            match &header {
                Some(header) => pairs.push(header.pair(data, idx + 1)?),
                None => header = Some(Header::parse(data, columns)?),
            }
        }

        if header.is_none() {
            return Err(CotransError::InvalidInput(
                "candidate pair table must contain a header".to_string(),
            ));
        }
        Ok(pairs)
    }

    /// Reads all candidate pairs from a file
    ///
    /// # Errors
    ///
    /// - [`CotransError::CannotOpenFile`]: The file is not present or can't be opened
    /// - all errors of [`read`]
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        columns: (&str, &str),
    ) -> CotransResult<Vec<CandidatePair>> {
        read(open(path)?, columns)
    }

}
