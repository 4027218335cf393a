//! Traffic Accident Severity Predictor
//!
//! A machine learning-based tool for predicting the traffic-impact
//! severity of an accident at a chosen map coordinate.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;

/// Traffic Accident Severity Predictor
#[derive(Parser)]
#[command(name = "accident-severity")]
#[command(about = "ML-based accident severity predictor for map coordinates")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict accident severity for a coordinate
    Predict {
        /// Latitude in degrees; when omitted, "lat lon" lines are read
        /// from stdin in a loop
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude in degrees
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// Train the severity classifier from a prepared dataset
    Train {
        /// Path to the prepared dataset CSV (label column "Severity")
        #[arg(short, long)]
        dataset: PathBuf,

        /// Path to the hyperparameter CSV
        #[arg(short, long, default_value = "model_parameters.csv")]
        params: PathBuf,

        /// Fraction of the dataset used for training
        #[arg(long, default_value = "0.8")]
        train_fraction: f32,

        /// Artifact id to store the fitted model under
        /// (defaults to the configured model artifact id)
        #[arg(long)]
        artifact_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env();

    match cli.command {
        Commands::Predict { lat, lon } => {
            commands::predict::run(&config, lat.zip(lon)).await?;
        }
        Commands::Train {
            dataset,
            params,
            train_fraction,
            artifact_id,
        } => {
            commands::train::run(&config, &dataset, &params, train_fraction, artifact_id).await?;
        }
    }

    Ok(())
}
