//! Labeled corpus parsing.

use std::io::BufRead;

use crate::errors::{LinmodError, Result};

/// A labeled training corpus.
///
/// Labels and documents are parallel vectors: `labels[i]` is the class id of
/// `documents[i]`. Labels are arbitrary integers and need not be contiguous
/// or zero-based.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Corpus {
    labels: Vec<i64>,
    documents: Vec<String>,
}

impl Corpus {
    /// Reads a corpus from a line-oriented source.
    ///
    /// Each line must have the form `<integer label><TAB><document text>`.
    /// Only the first tab separates the label from the document; the document
    /// text is kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if a line has no tab, if a label is not a valid
    /// integer, or if the source is not valid UTF-8.
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: BufRead,
    {
        let mut labels = vec![];
        let mut documents = vec![];
        for (i, line) in rdr.lines().enumerate() {
            let line = line?;
            let (label, document) = line.split_once('\t').ok_or_else(|| {
                LinmodError::invalid_corpus(i + 1, "missing tab separator")
            })?;
            let label = label.parse().map_err(|_| {
                LinmodError::invalid_corpus(i + 1, format!("invalid label `{label}`"))
            })?;
            labels.push(label);
            documents.push(document.to_string());
        }
        Ok(Self { labels, documents })
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[i64] {
        &self.labels
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub(crate) fn into_parts(self) -> (Vec<i64>, Vec<String>) {
        (self.labels, self.documents)
    }
}
