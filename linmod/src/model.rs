//! Model data and serialization.

use std::fmt;
use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::errors::{LinmodError, Result};

/// Learned parameters of a linear n-gram model.
///
/// The vocabulary provides integer column indexes into the idf table and the
/// rows of the weight matrix; weights and biases can be linearly combined
/// with a document's tf-idf scores to calculate class log likelihoods.
///
/// The serialized form is a gzip-compressed JSON object with exactly five
/// keys (`vocabulary`, `ngrams`, `idf`, `weights`, `biases`); this layout is
/// a fixed contract with downstream scoring tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub(crate) vocabulary: HashMap<String, u32>,
    pub(crate) ngrams: (u32, u32),
    pub(crate) idf: Vec<f64>,
    pub(crate) weights: Vec<Vec<f64>>,
    pub(crate) biases: Vec<f64>,
}

impl Model {
    pub(crate) fn new(
        vocabulary: HashMap<String, u32>,
        ngrams: (u32, u32),
        idf: Vec<f64>,
        weights: Vec<Vec<f64>>,
        biases: Vec<f64>,
    ) -> Self {
        Self {
            vocabulary,
            ngrams,
            idf,
            weights,
            biases,
        }
    }

    /// Exports the model data.
    ///
    /// The model is written as 2-space-indented JSON through gzip
    /// compression.
    ///
    /// # Arguments
    ///
    /// * `wtr` - Byte-oriented sink object.
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W>(&self, wtr: &mut W) -> Result<()>
    where
        W: Write,
    {
        let mut encoder = GzEncoder::new(wtr, Compression::default());
        serde_json::to_writer_pretty(&mut encoder, self)?;
        encoder.finish()?;
        Ok(())
    }

    /// Creates a model from a reader over gzip-compressed JSON.
    ///
    /// # Arguments
    ///
    /// * `rdr` - A data source.
    ///
    /// # Returns
    ///
    /// A model data read from `rdr`.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error it will be returned as is; a model
    /// whose tables are misaligned is rejected.
    pub fn read<R>(rdr: &mut R) -> Result<Self>
    where
        R: Read,
    {
        let model: Self = serde_json::from_reader(GzDecoder::new(rdr))?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngrams;
        if min_n < 1 || max_n < min_n {
            return Err(LinmodError::invalid_model(format!(
                "invalid ngram range [{min_n}, {max_n}]"
            )));
        }
        if self.weights.len() != self.biases.len() {
            return Err(LinmodError::invalid_model(format!(
                "{} weight rows for {} biases",
                self.weights.len(),
                self.biases.len()
            )));
        }
        if self.idf.len() != self.vocabulary.len() {
            return Err(LinmodError::invalid_model(format!(
                "{} idf entries for {} vocabulary terms",
                self.idf.len(),
                self.vocabulary.len()
            )));
        }
        for row in &self.weights {
            if row.len() != self.idf.len() {
                return Err(LinmodError::invalid_model(format!(
                    "weight row of length {} for {} features",
                    row.len(),
                    self.idf.len()
                )));
            }
        }
        for (term, &col) in &self.vocabulary {
            if col as usize >= self.idf.len() {
                return Err(LinmodError::invalid_model(format!(
                    "vocabulary term {term:?} has out-of-range column {col}"
                )));
            }
        }
        Ok(())
    }

    /// Number of classes.
    pub fn classes(&self) -> usize {
        self.biases.len()
    }

    /// Number of vocabulary features.
    pub fn features(&self) -> usize {
        self.idf.len()
    }

    pub fn ngram_range(&self) -> (u32, u32) {
        self.ngrams
    }

    pub fn vocabulary(&self) -> &HashMap<String, u32> {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Model<{} features, {} classes, ngrams [{}, {}]>",
            self.features(),
            self.classes(),
            self.ngrams.0,
            self.ngrams.1
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    fn toy_model() -> Model {
        let mut vocabulary = HashMap::new();
        vocabulary.insert("bad".to_string(), 0);
        vocabulary.insert("good".to_string(), 1);
        Model::new(
            vocabulary,
            (1, 2),
            vec![1.0, 1.0],
            vec![vec![-0.2, -2.0], vec![-2.0, -0.3]],
            vec![-0.7, -0.7],
        )
    }

    fn decompress(bytes: &[u8]) -> String {
        let mut text = String::new();
        GzDecoder::new(bytes).read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn test_model_write_read_round_trip() {
        let model = toy_model();
        let mut buf = vec![];
        model.write(&mut buf).unwrap();

        let read = Model::read(&mut buf.as_slice()).unwrap();
        assert_eq!(model, read);
    }

    #[test]
    fn test_model_write_emits_exactly_five_keys() {
        let mut buf = vec![];
        toy_model().write(&mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_str(&decompress(&buf)).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(vec!["biases", "idf", "ngrams", "vocabulary", "weights"], keys);
        assert_eq!(serde_json::json!([1, 2]), object["ngrams"]);
    }

    #[test]
    fn test_model_write_indents_with_two_spaces() {
        let mut buf = vec![];
        toy_model().write(&mut buf).unwrap();

        let text = decompress(&buf);
        assert!(text.starts_with("{\n  \""), "unexpected layout: {text:?}");
    }

    #[test]
    fn test_model_read_rejects_misaligned_tables() {
        let mut model = toy_model();
        model.idf.push(1.0);
        let mut buf = vec![];
        model.write(&mut buf).unwrap();

        let read = Model::read(&mut buf.as_slice());
        assert!(read.is_err());
        assert_eq!(
            "InvalidModelError: 3 idf entries for 2 vocabulary terms",
            &read.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_model_read_rejects_short_weight_row() {
        let mut model = toy_model();
        model.weights[1].pop();
        let mut buf = vec![];
        model.write(&mut buf).unwrap();

        let read = Model::read(&mut buf.as_slice());
        assert!(read.is_err());
        assert_eq!(
            "InvalidModelError: weight row of length 1 for 2 features",
            &read.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_model_display() {
        assert_eq!(
            "Model<2 features, 2 classes, ngrams [1, 2]>",
            &toy_model().to_string()
        );
    }
}
