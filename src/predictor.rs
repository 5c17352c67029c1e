//! Rating model training and single-row prediction.
//!
//! The feature set is fixed: `[Price range, Votes, Average Cost for two]`,
//! targeting `Aggregate rating`. Training shuffles the table with a seeded
//! RNG, fits a random forest on the first `train_split` share of rows and
//! scores it on the remainder, so the same seed over the same table yields
//! the same split, the same forest, the same score and the same history
//! sample every run.

use crate::config::EngineConfig;
use crate::data::Restaurant;
use crate::error::EngineError;
use crate::forest::RandomForest;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

/// One held-out row paired with the model's prediction for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub actual: f64,
    pub predicted: f64,
}

/// Outcome of a training run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainReport {
    /// Coefficient of determination (R²) on the held-out partition
    pub r2: f64,
    pub train_rows: usize,
    pub test_rows: usize,
    /// Leading held-out rows as (actual, predicted) pairs, for charting
    pub history: Vec<HistoryPoint>,
}

fn feature_row(restaurant: &Restaurant) -> Vec<f64> {
    vec![
        restaurant.price_range,
        restaurant.votes,
        restaurant.average_cost_for_two,
    ]
}

/// Fit a rating model on the clean table.
///
/// Returns the fitted forest together with its report. Fails with
/// [`EngineError::InsufficientData`] when the table cannot support a
/// non-degenerate 80/20 split or the held-out targets carry no variance —
/// a score computed in either situation would be meaningless.
pub fn train(
    records: &[Restaurant],
    config: &EngineConfig,
) -> Result<(RandomForest, TrainReport), EngineError> {
    let mut indices: Vec<usize> = (0..records.len()).collect();
    let mut rng = StdRng::seed_from_u64(config.model.seed);
    indices.shuffle(&mut rng);

    let split = ((records.len() as f64) * config.data.train_split) as usize;
    let (train_idx, test_idx) = indices.split_at(split.min(indices.len()));
    if train_idx.is_empty() || test_idx.is_empty() {
        return Err(EngineError::InsufficientData {
            rows: records.len(),
        });
    }

    let train_features: Vec<Vec<f64>> = train_idx
        .iter()
        .map(|&i| feature_row(&records[i]))
        .collect();
    let train_targets: Vec<f64> = train_idx.iter().map(|&i| records[i].aggregate_rating).collect();

    let forest = RandomForest::fit(
        &train_features,
        &train_targets,
        config.model.n_trees,
        config.model.seed,
    );

    let test_targets: Vec<f64> = test_idx.iter().map(|&i| records[i].aggregate_rating).collect();
    let test_predictions: Vec<f64> = test_idx
        .iter()
        .map(|&i| forest.predict(&feature_row(&records[i])))
        .collect();

    let r2 = r_squared(&test_targets, &test_predictions).ok_or(
        EngineError::InsufficientData {
            rows: records.len(),
        },
    )?;

    let history = test_targets
        .iter()
        .zip(test_predictions.iter())
        .take(config.model.history_len)
        .map(|(&actual, &predicted)| HistoryPoint { actual, predicted })
        .collect();

    let report = TrainReport {
        r2,
        train_rows: train_idx.len(),
        test_rows: test_idx.len(),
        history,
    };
    Ok((forest, report))
}

/// Predict a rating for a single feature vector.
///
/// Without a trained model this returns `0.0` — the presentation layer may
/// call it before the first training action and must never crash on that.
pub fn predict(model: Option<&RandomForest>, price_range: f64, votes: f64, avg_cost: f64) -> f64 {
    match model {
        Some(forest) => forest.predict(&[price_range, votes, avg_cost]),
        None => 0.0,
    }
}

/// R² of `predicted` against `actual`; `None` when the actuals have no
/// variance (the statistic is undefined there).
fn r_squared(actual: &[f64], predicted: &[f64]) -> Option<f64> {
    let n = actual.len() as f64;
    let mean = actual.iter().sum::<f64>() / n;
    let ss_tot: f64 = actual.iter().map(|&y| (y - mean) * (y - mean)).sum();
    if ss_tot == 0.0 {
        return None;
    }
    let ss_res: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(&y, &p)| (y - p) * (y - p))
        .sum();
    Some(1.0 - ss_res / ss_tot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_table(rows: usize) -> Vec<Restaurant> {
        (0..rows)
            .map(|i| {
                let price = (i % 4 + 1) as f64;
                let votes = (10 * i) as f64;
                let cost = 200.0 + 30.0 * i as f64;
                // rating rises with price tier and popularity, capped at 5
                let rating = (2.0 + 0.4 * price + 0.002 * votes).min(5.0);
                Restaurant {
                    name: format!("R{}", i),
                    cuisines: "Continental".to_string(),
                    city: "Metro".to_string(),
                    aggregate_rating: rating,
                    votes,
                    average_cost_for_two: cost,
                    price_range: price,
                    latitude: 0.0,
                    longitude: 0.0,
                }
            })
            .collect()
    }

    #[test]
    fn test_training_is_deterministic() {
        let table = synthetic_table(60);
        let config = EngineConfig::default();
        let (_, first) = train(&table, &config).unwrap();
        let (_, second) = train(&table, &config).unwrap();
        assert_eq!(first.r2, second.r2);
        assert_eq!(first.history, second.history);
    }

    #[test]
    fn test_split_ratio_and_history_len() {
        let table = synthetic_table(100);
        let config = EngineConfig::default();
        let (_, report) = train(&table, &config).unwrap();
        assert_eq!(report.train_rows, 80);
        assert_eq!(report.test_rows, 20);
        assert_eq!(report.history.len(), 15);
    }

    #[test]
    fn test_fit_tracks_the_signal() {
        let table = synthetic_table(80);
        let config = EngineConfig::default();
        let (_, report) = train(&table, &config).unwrap();
        assert!(report.r2 > 0.5, "r2 = {}", report.r2);
    }

    #[test]
    fn test_too_few_rows_is_insufficient_data() {
        let table = synthetic_table(1);
        let config = EngineConfig::default();
        match train(&table, &config) {
            Err(EngineError::InsufficientData { rows }) => assert_eq!(rows, 1),
            other => panic!("expected InsufficientData, got {:?}", other.map(|(_, r)| r)),
        }
    }

    #[test]
    fn test_zero_variance_targets_are_insufficient() {
        let mut table = synthetic_table(20);
        for restaurant in &mut table {
            restaurant.aggregate_rating = 3.0;
        }
        assert!(matches!(
            train(&table, &EngineConfig::default()),
            Err(EngineError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_predict_without_model_is_zero() {
        assert_eq!(predict(None, 2.0, 100.0, 500.0), 0.0);
    }

    #[test]
    fn test_predict_with_model_uses_it() {
        let table = synthetic_table(60);
        let (forest, _) = train(&table, &EngineConfig::default()).unwrap();
        let estimate = predict(Some(&forest), 3.0, 200.0, 500.0);
        assert!(estimate > 0.0 && estimate <= 5.0);
    }

    #[test]
    fn test_history_pairs_come_from_the_test_partition() {
        let table = synthetic_table(50);
        let (_, report) = train(&table, &EngineConfig::default()).unwrap();
        // 50 rows split 80/20 leaves 10 held-out rows, fewer than history_len
        assert_eq!(report.history.len(), 10);
        for point in &report.history {
            assert!(point.actual >= 2.0 && point.actual <= 5.0);
        }
    }
}
