//! Facade owning the clean table, the model slot and the similarity index.
//!
//! Construction normalizes the raw table and eagerly builds the cuisine
//! index; the rating model stays empty until an explicit training call.
//! Nothing else holds a reference to any of the three — the presentation
//! layer goes through this type for every interaction.

use crate::config::EngineConfig;
use crate::data::{self, RawRecord, Restaurant};
use crate::error::EngineError;
use crate::forest::RandomForest;
use crate::predictor::{self, TrainReport};
use crate::similarity::{CuisineIndex, Recommendation};
use std::collections::HashSet;
use std::path::Path;

/// Headline numbers for the dashboard's overview panel.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    pub rows: usize,
    pub mean_rating: f64,
    pub cities: usize,
    pub total_votes: f64,
}

/// Analytics engine over a single restaurant table.
pub struct RestaurantEngine {
    records: Vec<Restaurant>,
    index: CuisineIndex,
    /// Replaced only after a fit fully succeeds; a failed training run
    /// leaves the previous model serving predictions.
    model: Option<RandomForest>,
    config: EngineConfig,
}

impl RestaurantEngine {
    /// Normalize the raw table and build the similarity index.
    pub fn new(raw: &[RawRecord], config: EngineConfig) -> Self {
        let records = data::normalize(raw);
        let index = CuisineIndex::build(&records, config.recommender.max_features);
        RestaurantEngine {
            records,
            index,
            model: None,
            config,
        }
    }

    /// Load, normalize and index a dataset file in one step.
    pub fn from_csv<P: AsRef<Path>>(path: P, config: EngineConfig) -> Result<Self, EngineError> {
        let raw = data::load_csv(path)?;
        Ok(RestaurantEngine::new(&raw, config))
    }

    /// The normalized table, in load order.
    pub fn records(&self) -> &[Restaurant] {
        &self.records
    }

    /// Whether a rating model is currently available.
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Train (or retrain) the rating model and report its held-out score.
    pub fn train_rating_model(&mut self) -> Result<TrainReport, EngineError> {
        let (forest, report) = predictor::train(&self.records, &self.config)?;
        self.model = Some(forest);
        Ok(report)
    }

    /// Estimate a rating for the given feature values. Returns `0.0` until
    /// the first successful training call.
    pub fn predict_rating(&self, price_range: f64, votes: f64, avg_cost: f64) -> f64 {
        predictor::predict(self.model.as_ref(), price_range, votes, avg_cost)
    }

    /// Top `top_n` restaurants with the most similar cuisine text.
    pub fn recommend(&self, name: &str, top_n: usize) -> Result<Vec<Recommendation>, EngineError> {
        self.index.recommend(&self.records, name, top_n)
    }

    /// Overview numbers: row count, mean rating, distinct cities, votes.
    pub fn summary(&self) -> TableSummary {
        let rows = self.records.len();
        let mean_rating = if rows == 0 {
            0.0
        } else {
            self.records.iter().map(|r| r.aggregate_rating).sum::<f64>() / rows as f64
        };
        let cities: HashSet<&str> = self.records.iter().map(|r| r.city.as_str()).collect();
        TableSummary {
            rows,
            mean_rating,
            cities: cities.len(),
            total_votes: self.records.iter().map(|r| r.votes).sum(),
        }
    }

    /// Plottable coordinates: every row except those sitting at (0, 0),
    /// which is where unknown locations end up after normalization.
    pub fn map_points(&self) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .filter(|r| r.latitude != 0.0 && r.longitude != 0.0)
            .map(|r| (r.latitude, r.longitude))
            .collect()
    }
}
