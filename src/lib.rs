//! # resto-engine — restaurant dataset analytics
//!
//! The analytics core behind a restaurant-data dashboard: it normalizes a
//! heterogeneous CSV export into a typed table, fits a random-forest model
//! predicting aggregate ratings, and answers cuisine-similarity queries
//! over a TF-IDF cosine index.
//!
//! The presentation layer (pages, charts, maps) is a consumer of this
//! crate, not part of it: it hands user-selected values to
//! [`RestaurantEngine::predict_rating`], a selected name to
//! [`RestaurantEngine::recommend`], and renders whatever comes back.
//!
//! ## Quick start
//!
//! ```no_run
//! use resto_engine::{EngineConfig, RestaurantEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let mut engine = RestaurantEngine::from_csv("Dataset.csv", config)?;
//!
//!     let report = engine.train_rating_model()?;
//!     println!("R2 on held-out rows: {:.3}", report.r2);
//!
//!     let rating = engine.predict_rating(2.0, 150.0, 600.0);
//!     println!("estimated rating: {:.1}", rating);
//!
//!     for similar in engine.recommend("Ooma", 5)? {
//!         println!("{} ({})", similar.name, similar.cuisines);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Behavior guarantees
//!
//! - Normalization never fails: unparseable numeric cells become `0.0`,
//!   blank cuisine cells become `"Other"`.
//! - Training is deterministic: the split shuffle and every bootstrap draw
//!   run off the configured seed, so retraining an unchanged table
//!   reproduces the score and history sample exactly.
//! - Predicting before the first training call returns `0.0` instead of
//!   erroring.
//! - An unknown name in a recommendation query is a typed
//!   [`EngineError::RestaurantNotFound`], distinct from an empty result.
//!
//! ## Module structure
//!
//! - [`data`] - CSV ingestion and normalization
//! - [`tfidf`] - TF-IDF vectorizer over the cuisine column
//! - [`similarity`] - all-pairs cosine index and neighbor queries
//! - [`forest`] - bagged regression trees
//! - [`predictor`] - train/test split, scoring, single predictions
//! - [`engine`] - the facade owning table, model slot and index
//! - [`config`] - TOML configuration
//! - [`cli`] - console consumer

pub mod cli;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod forest;
pub mod predictor;
pub mod similarity;
pub mod tfidf;

pub use config::EngineConfig;
pub use data::{load_csv, normalize, RawRecord, Restaurant};
pub use engine::{RestaurantEngine, TableSummary};
pub use error::EngineError;
pub use forest::RandomForest;
pub use predictor::{HistoryPoint, TrainReport};
pub use similarity::{CuisineIndex, Recommendation};
pub use tfidf::TfidfVectorizer;
