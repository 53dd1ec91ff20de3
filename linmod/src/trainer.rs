//! Model training.

use std::borrow::Borrow;
use std::hash::Hash;

use hashbrown::HashMap;

use crate::corpus::Corpus;
use crate::errors::Result;
use crate::model::Model;
use crate::pipeline::Stage;
use crate::tfidf::TfidfTransformer;
use crate::bayes::MultinomialNb;
use crate::vectorizer::CountVectorizer;

pub struct Indexer<K> {
    ids: HashMap<K, usize>,
    keys: Vec<K>,
}

impl<K> Indexer<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            keys: vec![],
        }
    }

    pub fn get_id<Q: ?Sized>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ToOwned<Owned = K> + Eq + Hash,
    {
        if let Some(&id) = self.ids.get(key) {
            id
        } else {
            let id = self.ids.len();
            self.keys.push(key.to_owned());
            self.ids.insert(key.to_owned(), id);
            id
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }
}

impl<K> Default for Indexer<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Trainer.
///
/// Fits the three-stage pipeline (count vectorizer, tf-idf transform,
/// multinomial naive Bayes) over a labeled corpus and produces a [`Model`].
///
/// # Examples
///
/// ```no_run
/// use std::fs::File;
/// use std::io::BufReader;
///
/// use linmod::{Corpus, Trainer};
///
/// let f = BufReader::new(File::open("corpus.txt").unwrap());
/// let corpus = Corpus::from_reader(f).unwrap();
///
/// let model = Trainer::new().unwrap().train(corpus).unwrap();
/// let mut f = File::create("model.json.gz").unwrap();
/// model.write(&mut f).unwrap();
/// ```
pub struct Trainer {
    vectorizer: CountVectorizer,
    transformer: TfidfTransformer,
    classifier: MultinomialNb,
}

impl Trainer {
    /// Creates a trainer with the default unigram-and-bigram configuration.
    ///
    /// # Errors
    ///
    /// If the vectorizer cannot be constructed, an error variant will be
    /// returned.
    pub fn new() -> Result<Self> {
        Self::with_ngram_range(1, 2)
    }

    /// Creates a trainer extracting n-grams of every order in
    /// `[min_n, max_n]`.
    ///
    /// # Errors
    ///
    /// Returns an error unless `1 <= min_n <= max_n`.
    pub fn with_ngram_range(min_n: u32, max_n: u32) -> Result<Self> {
        Ok(Self {
            vectorizer: CountVectorizer::new(min_n, max_n)?,
            transformer: TfidfTransformer::new(),
            classifier: MultinomialNb::new(),
        })
    }

    /// Fits the pipeline on `corpus` and returns the learned model.
    ///
    /// # Errors
    ///
    /// Returns an error if the corpus is empty, yields an empty vocabulary,
    /// or contains fewer than two distinct classes.
    pub fn train(self, corpus: Corpus) -> Result<Model> {
        let Self {
            mut vectorizer,
            mut transformer,
            mut classifier,
        } = self;

        let (labels, documents) = corpus.into_parts();
        let counts = vectorizer.fit_transform(documents)?;
        let weighted = transformer.fit_transform(counts)?;
        classifier.fit(&weighted, &labels, vectorizer.vocabulary().len())?;

        let ngrams = vectorizer.ngram_range();
        let (weights, biases) = classifier.into_parts();
        Ok(Model::new(
            vectorizer.into_vocabulary(),
            ngrams,
            transformer.into_idf(),
            weights,
            biases,
        ))
    }
}
