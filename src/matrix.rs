//! A tree-ordered presence matrix of genes and organisms
//!
//! Imagine the following table of orthogroup copy-numbers
//!
//! | Gene  | org 0 | org 1 | org 2 | org 3 |
//! |:----- | -----:| -----:| -----:| -----:|
//! | **A** |     0 |     2 |     2 |     0 |
//! | **B** |     1 |     1 |    NA |     3 |
//!
//! The order of the organisms follows a traversal of a phylogenetic tree,
//! adjacent columns are evolutionary neighbours. The order is fixed
//! when the matrix is created and never changes.
//!
//! ```rust
//! use cotrans::PresenceMatrix;
//!
//! let mut matrix = PresenceMatrix::new(4);
//! matrix.push_row("A", vec![Some(0.0), Some(2.0), Some(2.0), Some(0.0)]).unwrap();
//! matrix.push_row("B", vec![Some(1.0), Some(1.0), None, Some(3.0)]).unwrap();
//!
//! assert_eq!(matrix.dim(), (2, 4));
//! assert_eq!(matrix.value_at(0, 1), Some(2.0));
//! assert_eq!(matrix.value_at(1, 2), None);
//! assert_eq!(matrix.gene_index("B"), Some(1));
//! ```
use std::collections::HashMap;
use std::fmt::Debug;

use crate::{CotransError, CotransResult};

/// A cell of the matrix. `None` represents a missing value
pub type Cell = Option<f64>;

/// Genes (rows) by organisms (columns) matrix of presence or copy-number values
///
/// Every gene is identified by a unique key, e.g. the orthogroup ID.
/// The values are stored in a single continuous vector, row by row.
#[derive(Default, Clone)]
pub struct PresenceMatrix {
    genes: Vec<String>,
    index: HashMap<String, usize>,
    organisms: usize,
    data: Vec<Cell>,
}

impl PresenceMatrix {
    /// Constructs a new, empty [`PresenceMatrix`] for `organisms` columns
    pub fn new(organisms: usize) -> Self {
        Self {
            organisms,
            ..Default::default()
        }
    }

    /// Appends a new gene row to the matrix and returns its row index
    ///
    /// # Errors
    ///
    /// - [`CotransError::DuplicateGene`]: The gene key is already present
    /// - [`CotransError::RaggedRow`]: The number of values does not match the
    ///   number of organisms (the reported line is the 1-based row number)
    pub fn push_row(&mut self, key: &str, values: Vec<Cell>) -> CotransResult<usize> {
        if values.len() != self.organisms {
            return Err(CotransError::RaggedRow {
                line: self.genes.len() + 1,
                expected: self.organisms,
                found: values.len(),
            });
        }
        if self.index.contains_key(key) {
            return Err(CotransError::DuplicateGene(key.to_string()));
        }
        let idx = self.genes.len();
        self.index.insert(key.to_string(), idx);
        self.genes.push(key.to_string());
        self.data.extend(values);
        Ok(idx)
    }

    /// Returns the number of genes (rows)
    pub fn gene_count(&self) -> usize {
        self.genes.len()
    }

    /// Returns the number of organisms (columns)
    pub fn organism_count(&self) -> usize {
        self.organisms
    }

    /// Returns a Tuple with number of genes and number of organisms
    pub fn dim(&self) -> (usize, usize) {
        (self.gene_count(), self.organism_count())
    }

    /// Returns `true` if the matrix does not contain any gene
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Returns the value of `gene` in the organism column `col`
    ///
    /// Returns `None` if the value is missing or if either index is out of bounds
    pub fn value_at(&self, gene: usize, col: usize) -> Cell {
        if col >= self.organisms {
            return None;
        }
        self.row(gene).and_then(|row| row[col])
    }

    /// Returns all values of the gene at row index `gene`
    pub fn row(&self, gene: usize) -> Option<&[Cell]> {
        if gene >= self.genes.len() {
            return None;
        }
        let start = gene * self.organisms;
        Some(&self.data[start..start + self.organisms])
    }

    /// Returns the row index of the gene with the given key
    pub fn gene_index(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Returns the key of the gene at row index `gene`
    pub fn gene_key(&self, gene: usize) -> Option<&str> {
        self.genes.get(gene).map(String::as_str)
    }

    /// Iterates all gene keys in row order
    pub fn genes(&self) -> impl Iterator<Item = &str> {
        self.genes.iter().map(String::as_str)
    }

    /// Iterates all rows of the matrix
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cotrans::PresenceMatrix;
    ///
    /// let mut matrix = PresenceMatrix::new(2);
    /// matrix.push_row("A", vec![Some(0.0), Some(1.0)]).unwrap();
    /// matrix.push_row("B", vec![Some(1.0), None]).unwrap();
    ///
    /// let mut rows = matrix.rows();
    /// assert_eq!(rows.next(), Some(("A", &[Some(0.0), Some(1.0)][..])));
    /// assert_eq!(rows.next(), Some(("B", &[Some(1.0), None][..])));
    /// assert!(rows.next().is_none());
    /// ```
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            matrix: self,
            idx: 0,
        }
    }
}

impl Debug for PresenceMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (key, row) in self.rows() {
            let v: Vec<String> = row
                .iter()
                .map(|v| match v {
                    Some(v) => format!("{v}"),
                    None => "NA".to_string(),
                })
                .collect();
            writeln!(f, "{key}: [{}]", v.join(", "))?;
        }
        Ok(())
    }
}

/// Iterates the rows of a [`PresenceMatrix`], yielding the gene key and values
///
/// This struct is returned by [`PresenceMatrix::rows`]
pub struct Rows<'a> {
    matrix: &'a PresenceMatrix,
    idx: usize,
}

impl<'a> Iterator for Rows<'a> {
    type Item = (&'a str, &'a [Cell]);
    fn next(&mut self) -> Option<Self::Item> {
        let key = self.matrix.gene_key(self.idx)?;
        let row = self.matrix.row(self.idx)?;
        self.idx += 1;
        Some((key, row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.matrix.gene_count().saturating_sub(self.idx);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}

#[cfg(test)]
mod test {
    use super::*;

    fn example() -> PresenceMatrix {
        let mut m = PresenceMatrix::new(3);
        m.push_row("OG1", vec![Some(0.0), Some(1.0), Some(2.0)])
            .unwrap();
        m.push_row("OG2", vec![Some(3.0), None, Some(5.0)]).unwrap();
        m
    }

    #[test]
    fn dimensions() {
        let m = example();
        assert_eq!(m.gene_count(), 2);
        assert_eq!(m.organism_count(), 3);
        assert!(!m.is_empty());
        assert!(PresenceMatrix::new(3).is_empty());
    }

    #[test]
    fn values() {
        let m = example();
        assert_eq!(m.value_at(0, 0), Some(0.0));
        assert_eq!(m.value_at(0, 2), Some(2.0));
        assert_eq!(m.value_at(1, 0), Some(3.0));
        assert_eq!(m.value_at(1, 1), None);
        assert_eq!(m.value_at(1, 3), None);
        assert_eq!(m.value_at(2, 0), None);
    }

    #[test]
    fn rows_keep_insert_order() {
        let m = example();
        let keys: Vec<&str> = m.rows().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["OG1", "OG2"]);
        assert_eq!(m.rows().len(), 2);
        assert_eq!(m.row(1), Some(&[Some(3.0), None, Some(5.0)][..]));
        assert!(m.row(2).is_none());
    }

    #[test]
    fn lookup() {
        let m = example();
        assert_eq!(m.gene_index("OG2"), Some(1));
        assert_eq!(m.gene_key(0), Some("OG1"));
        assert!(m.gene_index("OG3").is_none());
        assert!(m.gene_key(2).is_none());
    }

    #[test]
    fn duplicate_gene() {
        let mut m = example();
        let res = m.push_row("OG1", vec![None, None, None]);
        assert!(matches!(res, Err(CotransError::DuplicateGene(key)) if key == "OG1"));
        assert_eq!(m.gene_count(), 2);
    }

    #[test]
    fn ragged_row() {
        let mut m = example();
        let res = m.push_row("OG3", vec![None, None]);
        assert!(matches!(
            res,
            Err(CotransError::RaggedRow {
                expected: 3,
                found: 2,
                ..
            })
        ));
        assert!(m.gene_index("OG3").is_none());
    }

    #[test]
    fn zero_organisms() {
        let mut m = PresenceMatrix::new(0);
        m.push_row("OG1", vec![]).unwrap();
        assert_eq!(m.row(0), Some(&[][..]));
        assert_eq!(m.rows().count(), 1);
    }
}
