//! TF-IDF (Term Frequency-Inverse Document Frequency) vectorizer.
//!
//! Converts the free-text cuisine labels into numerical feature vectors for
//! the similarity index. Tokens are lowercased, split on non-alphanumeric
//! boundaries, and filtered against a stop-word list before weighting.

use regex::Regex;
use std::collections::{HashMap, HashSet};

// Common English stop words excluded from the vocabulary.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "her",
    "was", "one", "our", "out", "this", "that", "with", "have", "from",
    "they", "been", "were", "said", "each", "which", "she", "how", "their",
    "will", "when", "make", "like", "him", "into", "time", "has", "look",
];

/// TF-IDF vectorizer over a text column.
///
/// This implementation:
/// - Lowercases and tokenizes on non-alphanumeric boundaries
/// - Drops tokens of length <= 2 and common stop words
/// - Optionally caps the vocabulary at the top N tokens by corpus frequency
/// - Applies TF-IDF weighting and L2 normalization
#[derive(Debug)]
pub struct TfidfVectorizer {
    /// Token to feature index mapping
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each feature
    idf: Vec<f64>,
    /// Maximum number of features to keep (0 = unlimited)
    max_features: usize,
    token_pattern: Regex,
}

impl TfidfVectorizer {
    /// Create a new vectorizer keeping at most `max_features` tokens
    /// (`0` keeps every token seen during fitting).
    pub fn new(max_features: usize) -> Self {
        TfidfVectorizer {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            max_features,
            token_pattern: Regex::new(r"[a-z0-9]+").unwrap(),
        }
    }

    /// Number of features in the fitted vocabulary.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let stop_words: HashSet<&str> = STOP_WORDS.iter().copied().collect();
        let lowercase = text.to_lowercase();
        self.token_pattern
            .find_iter(&lowercase)
            .map(|m| m.as_str().to_string())
            .filter(|token| token.len() > 2 && !stop_words.contains(token.as_str()))
            .collect()
    }

    /// Fit the vectorizer on a collection of documents, building the
    /// vocabulary and the IDF table.
    pub fn fit(&mut self, documents: &[String]) {
        let mut doc_count: HashMap<String, usize> = HashMap::new();
        let mut corpus_count: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = self.tokenize(doc);
            let unique: HashSet<&String> = tokens.iter().collect();
            for token in unique {
                *doc_count.entry(token.clone()).or_insert(0) += 1;
            }
            for token in &tokens {
                *corpus_count.entry(token.clone()).or_insert(0) += 1;
            }
        }

        // Rank by corpus frequency; token text breaks ties so a refit over
        // the same corpus always yields the same vocabulary order.
        let mut ranked: Vec<(&String, &usize)> = corpus_count.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        let keep = if self.max_features == 0 {
            ranked.len()
        } else {
            self.max_features
        };
        self.vocabulary = ranked
            .iter()
            .take(keep)
            .enumerate()
            .map(|(idx, (token, _))| ((*token).clone(), idx))
            .collect();

        self.idf = vec![0.0; self.vocabulary.len()];
        let n_docs = documents.len() as f64;
        for (token, &idx) in &self.vocabulary {
            let df = *doc_count.get(token).unwrap_or(&1) as f64;
            self.idf[idx] = (n_docs / df).ln();
        }
    }

    /// Transform a document into an L2-normalized TF-IDF vector.
    ///
    /// A document with no in-vocabulary tokens maps to the zero vector.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut tf = vec![0.0; self.vocabulary.len()];
        for token in self.tokenize(document) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                tf[idx] += 1.0;
            }
        }

        let total: f64 = tf.iter().sum();
        if total > 0.0 {
            for value in &mut tf {
                *value /= total;
            }
        }

        let mut tfidf: Vec<f64> = tf
            .iter()
            .zip(self.idf.iter())
            .map(|(&t, &i)| t * i)
            .collect();

        let norm = tfidf.iter().map(|&x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut tfidf {
                *value /= norm;
            }
        }

        tfidf
    }

    /// Fit on the corpus and return one vector per document, in order.
    pub fn fit_transform(&mut self, documents: &[String]) -> Vec<Vec<f64>> {
        self.fit(documents);
        documents.iter().map(|doc| self.transform(doc)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_identical_documents_get_identical_vectors() {
        let corpus = docs(&["Italian, Pizza", "Italian, Pizza", "Sushi"]);
        let mut vectorizer = TfidfVectorizer::new(0);
        let vectors = vectorizer.fit_transform(&corpus);
        assert_eq!(vectors[0], vectors[1]);
        assert_ne!(vectors[0], vectors[2]);
    }

    #[test]
    fn test_vectors_are_l2_normalized() {
        let corpus = docs(&["North Indian, Chinese", "Chinese", "Bakery"]);
        let mut vectorizer = TfidfVectorizer::new(0);
        for vector in vectorizer.fit_transform(&corpus) {
            let norm: f64 = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
            assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_stop_words_and_short_tokens_excluded() {
        let corpus = docs(&["the and for BBQ", "of in at"]);
        let mut vectorizer = TfidfVectorizer::new(0);
        vectorizer.fit(&corpus);
        // only "bbq" survives the filters
        assert_eq!(vectorizer.vocabulary_len(), 1);
    }

    #[test]
    fn test_max_features_caps_vocabulary() {
        let corpus = docs(&["alpha beta gamma delta", "alpha beta", "alpha"]);
        let mut vectorizer = TfidfVectorizer::new(2);
        vectorizer.fit(&corpus);
        assert_eq!(vectorizer.vocabulary_len(), 2);
    }

    #[test]
    fn test_out_of_vocabulary_document_is_zero_vector() {
        let corpus = docs(&["Italian", "Chinese"]);
        let mut vectorizer = TfidfVectorizer::new(0);
        vectorizer.fit(&corpus);
        let vector = vectorizer.transform("Lebanese");
        assert!(vector.iter().all(|&x| x == 0.0));
    }
}
