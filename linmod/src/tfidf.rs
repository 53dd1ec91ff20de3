//! Tf-idf weighting of count vectors.

use crate::errors::Result;
use crate::pipeline::{SparseRow, Stage};

/// Multiplies each count by `idf[column]` and L2-normalizes the row in place.
pub(crate) fn weight_row(idf: &[f64], row: &mut SparseRow) {
    for (col, value) in row.iter_mut() {
        *value *= idf[*col as usize];
    }
    let norm = row.iter().map(|&(_, v)| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, value) in row.iter_mut() {
            *value /= norm;
        }
    }
}

/// Reweights term counts by smoothed inverse document frequency.
///
/// The idf of a term seen in `df` of `n` documents is
/// `ln((1 + n) / (1 + df)) + 1`; rows are L2-normalized after weighting.
pub struct TfidfTransformer {
    idf: Vec<f64>,
}

impl TfidfTransformer {
    pub fn new() -> Self {
        Self { idf: Vec::new() }
    }

    /// The fitted idf vector, aligned with vocabulary columns.
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub(crate) fn into_idf(self) -> Vec<f64> {
        self.idf
    }

    /// Applies the fitted weights to a single sparse row in place.
    pub fn transform_row(&self, row: &mut SparseRow) {
        weight_row(&self.idf, row);
    }
}

impl Default for TfidfTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for TfidfTransformer {
    type Input = SparseRow;
    type Output = SparseRow;

    fn fit_transform(&mut self, rows: Vec<SparseRow>) -> Result<Vec<SparseRow>> {
        let n_features = rows
            .iter()
            .flat_map(|row| row.iter())
            .map(|&(col, _)| col as usize + 1)
            .max()
            .unwrap_or(0);
        let mut df = vec![0u64; n_features];
        for row in &rows {
            for &(col, _) in row {
                df[col as usize] += 1;
            }
        }
        let n_docs = rows.len() as f64;
        self.idf = df
            .iter()
            .map(|&count| ((1.0 + n_docs) / (1.0 + count as f64)).ln() + 1.0)
            .collect();

        let mut rows = rows;
        for row in &mut rows {
            self.transform_row(row);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(expected: f64, actual: f64) {
        assert!(
            (expected - actual).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_tfidf_fit_idf_values() {
        let mut t = TfidfTransformer::new();
        t.fit_transform(vec![vec![(0, 1.0), (1, 1.0)], vec![(1, 2.0)]])
            .unwrap();

        // Column 0 appears in 1 of 2 documents, column 1 in both.
        assert_close((3.0f64 / 2.0).ln() + 1.0, t.idf()[0]);
        assert_close(1.0, t.idf()[1]);
    }

    #[test]
    fn test_tfidf_rows_are_l2_normalized() {
        let mut t = TfidfTransformer::new();
        let rows = t
            .fit_transform(vec![vec![(0, 3.0), (1, 4.0)], vec![(0, 1.0), (1, 1.0)]])
            .unwrap();

        for row in &rows {
            let norm = row.iter().map(|&(_, v)| v * v).sum::<f64>().sqrt();
            assert_close(1.0, norm);
        }
    }

    #[test]
    fn test_tfidf_transform_row_empty() {
        let mut t = TfidfTransformer::new();
        t.fit_transform(vec![vec![(0, 1.0)], vec![(0, 2.0)]]).unwrap();

        let mut row = vec![];
        t.transform_row(&mut row);
        assert!(row.is_empty());
    }

    #[test]
    fn test_tfidf_weighting_downweights_common_terms() {
        let mut t = TfidfTransformer::new();
        let rows = t
            .fit_transform(vec![
                vec![(0, 1.0), (1, 1.0)],
                vec![(1, 1.0)],
                vec![(1, 1.0)],
            ])
            .unwrap();

        // Equal counts, but the rare column 0 outweighs the common column 1.
        let rare = rows[0][0].1;
        let common = rows[0][1].1;
        assert!(rare > common);
    }
}
