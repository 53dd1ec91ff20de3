//! # Linmod
//!
//! Linmod trains linear n-gram text classifiers. A training corpus of
//! `<label>\t<document>` lines is fitted with a three-stage pipeline
//! (bag-of-n-grams count vectorization, tf-idf weighting, multinomial naive
//! Bayes), and the learned parameters are serialized as gzip-compressed JSON
//! for downstream scoring tools.
//!
//! ## Examples
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! use linmod::{Corpus, Trainer};
//!
//! let f = BufReader::new(File::open("corpus.txt").unwrap());
//! let corpus = Corpus::from_reader(f).unwrap();
//! let model = Trainer::new().unwrap().train(corpus).unwrap();
//!
//! let mut f = File::create("model.json.gz").unwrap();
//! model.write(&mut f).unwrap();
//! ```
//!
//! Scoring uses [`Scorer`]; see [`Model::read`].

mod bayes;
mod corpus;
mod errors;
mod model;
mod pipeline;
mod scorer;
mod tfidf;
mod trainer;
mod vectorizer;

pub use bayes::MultinomialNb;
pub use corpus::Corpus;
pub use errors::{LinmodError, Result};
pub use model::Model;
pub use pipeline::{SparseRow, Stage};
pub use scorer::Scorer;
pub use tfidf::TfidfTransformer;
pub use trainer::Trainer;
pub use vectorizer::CountVectorizer;
