//! Document scoring with a trained model.

use hashbrown::HashMap;

use crate::errors::Result;
use crate::model::Model;
use crate::pipeline::SparseRow;
use crate::tfidf::weight_row;
use crate::vectorizer::CountVectorizer;

/// Scorer.
///
/// Wraps a [`Model`] and computes per-class log likelihoods for raw
/// documents: the document's n-gram terms are looked up in the model
/// vocabulary (unknown terms are discarded), counted, weighted by idf,
/// cosine-normalized, and linearly combined with the per-class weights and
/// biases.
///
/// # Examples
///
/// ```no_run
/// use std::fs::File;
/// use std::io::BufReader;
///
/// use linmod::{Model, Scorer};
///
/// let mut f = BufReader::new(File::open("model.json.gz").unwrap());
/// let model = Model::read(&mut f).unwrap();
/// let scorer = Scorer::new(model).unwrap();
///
/// let scores = scorer.class_log_likelihoods("good product");
/// println!("{scores:?}");
/// ```
pub struct Scorer {
    model: Model,
    vectorizer: CountVectorizer,
}

impl Scorer {
    /// Creates a scorer for a model.
    ///
    /// # Errors
    ///
    /// If the model's n-gram range is invalid, an error variant will be
    /// returned.
    pub fn new(model: Model) -> Result<Self> {
        let (min_n, max_n) = model.ngram_range();
        let vectorizer = CountVectorizer::new(min_n, max_n)?;
        Ok(Self { model, vectorizer })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Computes log likelihoods for the document to belong to each of the
    /// model's classes, in weight-row order.
    pub fn class_log_likelihoods(&self, document: &str) -> Vec<f64> {
        let mut counts: HashMap<u32, f64> = HashMap::new();
        for term in self.vectorizer.terms(document) {
            if let Some(&col) = self.model.vocabulary.get(&term) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }
        let mut row: SparseRow = counts.into_iter().collect();
        row.sort_unstable_by_key(|&(col, _)| col);
        weight_row(&self.model.idf, &mut row);

        self.model
            .biases
            .iter()
            .zip(&self.model.weights)
            .map(|(&bias, weights)| {
                bias + row
                    .iter()
                    .map(|&(col, value)| weights[col as usize] * value)
                    .sum::<f64>()
            })
            .collect()
    }
}
