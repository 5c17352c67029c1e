//! Cuisine similarity index and nearest-neighbor queries.
//!
//! The index is built once, at engine construction, from the cuisine text
//! column: one TF-IDF vector per row, then an all-pairs cosine matrix over
//! those vectors. Quadratic in the row count, which is fine at the few
//! thousand rows this engine targets; bigger corpora are out of scope.

use crate::data::Restaurant;
use crate::error::EngineError;
use crate::tfidf::TfidfVectorizer;
use ndarray::Array2;
use serde::Serialize;

/// A recommended row, projected to the fields the dashboard displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub name: String,
    pub cuisines: String,
    pub aggregate_rating: f64,
    pub city: String,
}

/// All-pairs cosine similarity over TF-IDF cuisine vectors.
///
/// Immutable once built; queries only read it, so any number of concurrent
/// readers are safe.
pub struct CuisineIndex {
    matrix: Array2<f64>,
}

impl CuisineIndex {
    /// Vectorize every row's cuisine text and compute the cosine matrix.
    pub fn build(records: &[Restaurant], max_features: usize) -> Self {
        let documents: Vec<String> = records.iter().map(|r| r.cuisines.clone()).collect();
        let mut vectorizer = TfidfVectorizer::new(max_features);
        let vectors = vectorizer.fit_transform(&documents);

        let n = vectors.len();
        let mut matrix = Array2::zeros((n, n));
        for i in 0..n {
            for j in i..n {
                // vectors are L2-normalized, so the dot product is the cosine
                let score: f64 = vectors[i]
                    .iter()
                    .zip(vectors[j].iter())
                    .map(|(a, b)| a * b)
                    .sum();
                matrix[[i, j]] = score;
                matrix[[j, i]] = score;
            }
        }

        CuisineIndex { matrix }
    }

    /// Number of rows covered by the index.
    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    /// True when the index covers no rows.
    pub fn is_empty(&self) -> bool {
        self.matrix.nrows() == 0
    }

    /// Top `top_n` rows most similar to the first row named `name`.
    ///
    /// The query row itself is excluded. Rows are ordered by descending
    /// similarity; equal scores keep their table order. An unknown name is
    /// a typed [`EngineError::RestaurantNotFound`] — distinct from a found
    /// row with zero similar neighbors, which is an `Ok` with fewer (or
    /// zero) entries.
    pub fn recommend(
        &self,
        records: &[Restaurant],
        name: &str,
        top_n: usize,
    ) -> Result<Vec<Recommendation>, EngineError> {
        if self.matrix.nrows() != records.len() {
            return Err(EngineError::IndexOutOfSync {
                matrix: self.matrix.nrows(),
                table: records.len(),
            });
        }

        let query = records
            .iter()
            .position(|r| r.name == name)
            .ok_or_else(|| EngineError::RestaurantNotFound(name.to_string()))?;

        let mut ranked: Vec<(usize, f64)> = self
            .matrix
            .row(query)
            .iter()
            .copied()
            .enumerate()
            .filter(|&(i, _)| i != query)
            .collect();
        // stable sort: ties keep original table order
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        Ok(ranked
            .into_iter()
            .take(top_n)
            .map(|(i, _)| {
                let r = &records[i];
                Recommendation {
                    name: r.name.clone(),
                    cuisines: r.cuisines.clone(),
                    aggregate_rating: r.aggregate_rating,
                    city: r.city.clone(),
                }
            })
            .collect())
    }
}
