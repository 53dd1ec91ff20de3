//! Multinomial naive Bayes classification.

use hashbrown::HashMap;

use crate::errors::{LinmodError, Result};
use crate::pipeline::SparseRow;

// Lidstone smoothing constant.
const ALPHA: f64 = 1.0;

/// A multinomial naive Bayes classifier over sparse feature rows.
///
/// Fitting produces, per class, a log-probability vector over feature columns
/// and a log-prior scalar. Classes are the distinct labels observed, ordered
/// ascending; all per-class tables follow that order.
pub struct MultinomialNb {
    alpha: f64,
    classes: Vec<i64>,
    feature_log_prob: Vec<Vec<f64>>,
    class_log_prior: Vec<f64>,
}

impl MultinomialNb {
    pub fn new() -> Self {
        Self {
            alpha: ALPHA,
            classes: Vec::new(),
            feature_log_prob: Vec::new(),
            class_log_prior: Vec::new(),
        }
    }

    /// Fits the classifier on feature rows and index-aligned labels.
    ///
    /// # Arguments
    ///
    /// * `rows` - Sparse feature rows over `n_features` columns.
    /// * `labels` - A class label per row.
    /// * `n_features` - Width of the feature space.
    ///
    /// # Errors
    ///
    /// Returns an error if `rows` and `labels` differ in length or if fewer
    /// than two distinct classes appear.
    pub fn fit(&mut self, rows: &[SparseRow], labels: &[i64], n_features: usize) -> Result<()> {
        if rows.len() != labels.len() {
            return Err(LinmodError::invalid_argument(
                "labels",
                format!("{} labels for {} rows", labels.len(), rows.len()),
            ));
        }
        let mut classes = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();
        if classes.len() < 2 {
            return Err(LinmodError::invalid_argument(
                "labels",
                "at least two distinct classes are required",
            ));
        }

        let class_ids: HashMap<i64, usize> = classes
            .iter()
            .enumerate()
            .map(|(id, &label)| (label, id))
            .collect();
        let mut feature_count = vec![vec![0.0; n_features]; classes.len()];
        let mut class_count = vec![0.0f64; classes.len()];
        for (row, label) in rows.iter().zip(labels) {
            let id = class_ids[label];
            class_count[id] += 1.0;
            for &(col, value) in row {
                feature_count[id][col as usize] += value;
            }
        }

        let n_docs = labels.len() as f64;
        self.class_log_prior = class_count.iter().map(|&n| (n / n_docs).ln()).collect();
        self.feature_log_prob = feature_count
            .iter()
            .map(|counts| {
                let total = counts.iter().sum::<f64>() + self.alpha * n_features as f64;
                counts.iter().map(|&n| ((n + self.alpha) / total).ln()).collect()
            })
            .collect();
        self.classes = classes;
        Ok(())
    }

    /// The distinct labels observed during fitting, ascending.
    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    /// Per-class feature log-probabilities, indexed `[class][column]`.
    pub fn feature_log_prob(&self) -> &[Vec<f64>] {
        &self.feature_log_prob
    }

    /// Per-class log-priors.
    pub fn class_log_prior(&self) -> &[f64] {
        &self.class_log_prior
    }

    pub(crate) fn into_parts(self) -> (Vec<Vec<f64>>, Vec<f64>) {
        (self.feature_log_prob, self.class_log_prior)
    }
}

impl Default for MultinomialNb {
    fn default() -> Self {
        Self::new()
    }
}
