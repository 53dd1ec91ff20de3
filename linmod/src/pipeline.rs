//! The fit/transform seam shared by pipeline stages.

use crate::errors::Result;

/// A sparse feature row: `(column, value)` pairs sorted by column.
pub type SparseRow = Vec<(u32, f64)>;

/// A pipeline stage that learns its parameters from a batch of inputs while
/// mapping them to outputs.
///
/// The training pipeline chains a [`CountVectorizer`](crate::CountVectorizer)
/// into a [`TfidfTransformer`](crate::TfidfTransformer); the classifier
/// terminates the chain with a plain `fit`.
pub trait Stage {
    type Input;
    type Output;

    /// Fits the stage on `input` and returns the transformed batch.
    ///
    /// # Errors
    ///
    /// If the batch cannot be fitted, an error variant will be returned.
    fn fit_transform(&mut self, input: Vec<Self::Input>) -> Result<Vec<Self::Output>>;
}
