//! Command-line interface over the analytics engine.
//!
//! A thin console consumer standing in for the dashboard: it loads the
//! configured dataset, constructs the engine and runs one command per
//! invocation. Nothing here is needed by library users.

use crate::config::EngineConfig;
use crate::engine::RestaurantEngine;
use crate::error::EngineError;
use std::error::Error;
use std::time::Instant;

/// Print command-line usage information.
pub fn print_usage() {
    println!("Usage:");
    println!("  resto-engine [COMMAND] [OPTIONS]\n");
    println!("Commands:");
    println!("  overview                 Dataset headline numbers");
    println!("  train [--json]           Fit the rating model, report the held-out R2");
    println!("  predict PRICE VOTES COST Fit the model, then estimate a rating");
    println!("  recommend NAME [N]       Top N restaurants with similar cuisines");
    println!("  help                     Show this help\n");
    println!("Configuration is read from config.toml (defaults are used when absent).");
}

/// Main entry point for the CLI.
///
/// # Arguments
///
/// * `args` - Command-line arguments (including program name)
pub fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let config = EngineConfig::load("config.toml").unwrap_or_else(|e| {
        eprintln!("Warning: could not load config.toml: {}", e);
        eprintln!("Using default configuration\n");
        EngineConfig::default()
    });

    let command = args.get(1).map(String::as_str).unwrap_or("overview");
    match command {
        "overview" => cmd_overview(&config),
        "train" => cmd_train(&config, args.iter().any(|a| a == "--json")),
        "predict" => {
            if args.len() < 5 {
                println!("Error: predict needs PRICE VOTES COST\n");
                print_usage();
                return Ok(());
            }
            let price: f64 = args[2].parse()?;
            let votes: f64 = args[3].parse()?;
            let cost: f64 = args[4].parse()?;
            cmd_predict(&config, price, votes, cost)
        }
        "recommend" => {
            if args.len() < 3 {
                println!("Error: recommend needs a restaurant NAME\n");
                print_usage();
                return Ok(());
            }
            let top_n = match args.get(3) {
                Some(n) => n.parse()?,
                None => config.recommender.top_n,
            };
            cmd_recommend(&config, &args[2], top_n)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            println!("Unknown command: {}\n", command);
            print_usage();
            Ok(())
        }
    }
}

fn load_engine(config: &EngineConfig) -> Result<RestaurantEngine, EngineError> {
    println!("Loading {}...", config.data.csv_path);
    let start = Instant::now();
    let engine = RestaurantEngine::from_csv(&config.data.csv_path, config.clone())?;
    println!(
        "  Loaded {} rows ({:.2}s)\n",
        engine.records().len(),
        start.elapsed().as_secs_f64()
    );
    Ok(engine)
}

fn cmd_overview(config: &EngineConfig) -> Result<(), Box<dyn Error>> {
    let engine = load_engine(config)?;
    let summary = engine.summary();
    println!("Overview");
    println!("  Records:       {}", summary.rows);
    println!("  Avg rating:    {:.2}", summary.mean_rating);
    println!("  Cities:        {}", summary.cities);
    println!("  Total votes:   {}", summary.total_votes as u64);
    println!("  Mappable rows: {}", engine.map_points().len());
    Ok(())
}

fn cmd_train(config: &EngineConfig, as_json: bool) -> Result<(), Box<dyn Error>> {
    let mut engine = load_engine(config)?;

    println!("Training rating model ({} trees)...", config.model.n_trees);
    let start = Instant::now();
    let report = engine.train_rating_model()?;
    println!("  Done ({:.2}s)\n", start.elapsed().as_secs_f64());

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "R2 score: {:.4}  (train: {} rows, test: {} rows)\n",
        report.r2, report.train_rows, report.test_rows
    );
    println!("Prediction history (held-out rows):");
    println!("+--------+-----------+");
    println!("| Actual | Predicted |");
    println!("+--------+-----------+");
    for point in &report.history {
        println!("| {:>6.2} | {:>9.2} |", point.actual, point.predicted);
    }
    println!("+--------+-----------+");
    Ok(())
}

fn cmd_predict(config: &EngineConfig, price: f64, votes: f64, cost: f64) -> Result<(), Box<dyn Error>> {
    let mut engine = load_engine(config)?;

    println!("Training rating model ({} trees)...", config.model.n_trees);
    let report = engine.train_rating_model()?;
    println!("  R2 score: {:.4}\n", report.r2);

    let estimate = engine.predict_rating(price, votes, cost);
    println!(
        "Estimated rating for price range {}, {} votes, cost {}: {:.1}",
        price, votes, cost, estimate
    );
    Ok(())
}

fn cmd_recommend(config: &EngineConfig, name: &str, top_n: usize) -> Result<(), Box<dyn Error>> {
    let engine = load_engine(config)?;

    let recommendations = match engine.recommend(name, top_n) {
        Ok(recommendations) => recommendations,
        Err(EngineError::RestaurantNotFound(name)) => {
            println!("No restaurant named {:?} in the dataset.", name);
            return Ok(());
        }
        Err(other) => return Err(other.into()),
    };

    if recommendations.is_empty() {
        println!("{:?} found, but the table holds no other rows.", name);
        return Ok(());
    }

    println!("Restaurants similar to {:?}:", name);
    println!("+--------------------------------+--------------------------+--------+-----------------+");
    println!("| Restaurant                     | Cuisines                 | Rating | City            |");
    println!("+--------------------------------+--------------------------+--------+-----------------+");
    for r in &recommendations {
        println!(
            "| {:<30.30} | {:<24.24} | {:>6.1} | {:<15.15} |",
            r.name, r.cuisines, r.aggregate_rating, r.city
        );
    }
    println!("+--------------------------------+--------------------------+--------+-----------------+");
    Ok(())
}
