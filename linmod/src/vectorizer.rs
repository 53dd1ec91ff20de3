//! Bag-of-n-grams count vectorization.

use hashbrown::HashMap;
use regex::Regex;

use crate::errors::{LinmodError, Result};
use crate::pipeline::{SparseRow, Stage};
use crate::trainer::Indexer;

// Word tokens are lowercased runs of two or more word characters.
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Converts documents into sparse n-gram count vectors.
///
/// Fitting builds a vocabulary over the corpus and assigns each term a column
/// index. Columns are assigned in lexicographic term order, so training on
/// the same corpus always yields the same layout.
pub struct CountVectorizer {
    ngram_range: (u32, u32),
    token_pattern: Regex,
    vocabulary: HashMap<String, u32>,
}

impl CountVectorizer {
    /// Creates a vectorizer extracting n-grams of every order in
    /// `[min_n, max_n]`.
    ///
    /// # Errors
    ///
    /// Returns an error unless `1 <= min_n <= max_n`.
    pub fn new(min_n: u32, max_n: u32) -> Result<Self> {
        if min_n < 1 {
            return Err(LinmodError::invalid_argument(
                "ngram_range",
                "the minimum n-gram order must be at least 1",
            ));
        }
        if max_n < min_n {
            return Err(LinmodError::invalid_argument(
                "ngram_range",
                format!("the maximum n-gram order ({max_n}) must be >= the minimum ({min_n})"),
            ));
        }
        let token_pattern = Regex::new(TOKEN_PATTERN)
            .map_err(|e| LinmodError::invalid_argument("token_pattern", e.to_string()))?;
        Ok(Self {
            ngram_range: (min_n, max_n),
            token_pattern,
            vocabulary: HashMap::new(),
        })
    }

    pub fn ngram_range(&self) -> (u32, u32) {
        self.ngram_range
    }

    /// The fitted vocabulary as a term-to-column mapping.
    pub fn vocabulary(&self) -> &HashMap<String, u32> {
        &self.vocabulary
    }

    pub(crate) fn into_vocabulary(self) -> HashMap<String, u32> {
        self.vocabulary
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let text = text.to_lowercase();
        self.token_pattern
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Extracts the document's n-gram terms for every configured order.
    ///
    /// Terms of order n are n consecutive tokens joined by a single space.
    pub(crate) fn terms(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenize(text);
        let (min_n, max_n) = self.ngram_range;
        let mut terms = vec![];
        for n in min_n..=max_n {
            let n = n as usize;
            if tokens.len() < n {
                break;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

impl Stage for CountVectorizer {
    type Input = String;
    type Output = SparseRow;

    fn fit_transform(&mut self, documents: Vec<String>) -> Result<Vec<SparseRow>> {
        if documents.is_empty() {
            return Err(LinmodError::invalid_argument(
                "documents",
                "the corpus contains no documents",
            ));
        }

        let mut term_ids = Indexer::new();
        let mut rows = Vec::with_capacity(documents.len());
        for document in &documents {
            let mut counts: HashMap<u32, f64> = HashMap::new();
            for term in self.terms(document) {
                let id = u32::try_from(term_ids.get_id(term.as_str()))?;
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
            rows.push(counts.into_iter().collect::<SparseRow>());
        }
        if term_ids.is_empty() {
            return Err(LinmodError::invalid_argument(
                "documents",
                "empty vocabulary; no document produced any token",
            ));
        }

        // Reassign columns in lexicographic term order.
        let keys = term_ids.keys();
        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_unstable_by(|&a, &b| keys[a].cmp(&keys[b]));
        let mut remap = vec![0u32; keys.len()];
        for (new_id, &old_id) in order.iter().enumerate() {
            remap[old_id] = u32::try_from(new_id)?;
        }
        self.vocabulary = keys
            .iter()
            .enumerate()
            .map(|(old_id, term)| (term.clone(), remap[old_id]))
            .collect();
        for row in &mut rows {
            for (col, _) in row.iter_mut() {
                *col = remap[*col as usize];
            }
            row.sort_unstable_by_key(|&(col, _)| col);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectorizer_new_zero_min() {
        let v = CountVectorizer::new(0, 2);

        assert!(v.is_err());
        assert_eq!(
            "InvalidArgumentError: ngram_range: the minimum n-gram order must be at least 1",
            &v.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_vectorizer_new_inverted_range() {
        let v = CountVectorizer::new(2, 1);

        assert!(v.is_err());
        assert_eq!(
            "InvalidArgumentError: ngram_range: the maximum n-gram order (1) must be >= the minimum (2)",
            &v.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_vectorizer_terms_unigram_bigram() {
        let v = CountVectorizer::new(1, 2).unwrap();

        assert_eq!(
            vec!["good", "product", "good product"],
            v.terms("good product")
        );
    }

    #[test]
    fn test_vectorizer_terms_lowercases() {
        let v = CountVectorizer::new(1, 1).unwrap();

        assert_eq!(vec!["good", "good"], v.terms("Good GOOD!"));
    }

    #[test]
    fn test_vectorizer_terms_drops_single_char_tokens() {
        let v = CountVectorizer::new(1, 1).unwrap();

        assert_eq!(vec!["ok"], v.terms("a I ok"));
    }

    #[test]
    fn test_vectorizer_fit_transform() {
        let mut v = CountVectorizer::new(1, 2).unwrap();
        let rows = v
            .fit_transform(vec!["good product".to_string(), "bad product".to_string()])
            .unwrap();

        let vocab = v.vocabulary();
        assert_eq!(5, vocab.len());
        assert_eq!(0, vocab["bad"]);
        assert_eq!(1, vocab["bad product"]);
        assert_eq!(2, vocab["good"]);
        assert_eq!(3, vocab["good product"]);
        assert_eq!(4, vocab["product"]);

        assert_eq!(
            vec![
                vec![(2, 1.0), (3, 1.0), (4, 1.0)],
                vec![(0, 1.0), (1, 1.0), (4, 1.0)],
            ],
            rows
        );
    }

    #[test]
    fn test_vectorizer_fit_transform_counts_repeats() {
        let mut v = CountVectorizer::new(1, 1).unwrap();
        let rows = v
            .fit_transform(vec!["good good bad".to_string(), "bad".to_string()])
            .unwrap();

        assert_eq!(vec![vec![(0, 1.0), (1, 2.0)], vec![(0, 1.0)]], rows);
    }

    #[test]
    fn test_vectorizer_fit_transform_empty_corpus() {
        let mut v = CountVectorizer::new(1, 2).unwrap();
        let rows = v.fit_transform(vec![]);

        assert!(rows.is_err());
        assert_eq!(
            "InvalidArgumentError: documents: the corpus contains no documents",
            &rows.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_vectorizer_fit_transform_empty_vocabulary() {
        let mut v = CountVectorizer::new(1, 2).unwrap();
        let rows = v.fit_transform(vec!["!!".to_string(), "?".to_string()]);

        assert!(rows.is_err());
        assert_eq!(
            "InvalidArgumentError: documents: empty vocabulary; no document produced any token",
            &rows.err().unwrap().to_string()
        );
    }
}
