//! Treasury Pipeline - Main Entry Point
//!
//! Runs the four processing pipelines over their input files and writes
//! timestamped history records for positions, risk, GUI prices, streamed
//! quotes, executions and inquiries.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use treasury_pipeline::adapters::generator::generate_inputs;
use treasury_pipeline::common::clock::SystemClock;
use treasury_pipeline::config::load_config;
use treasury_pipeline::pipeline::{
    run_inquiries_pipeline, run_market_data_pipeline, run_prices_pipeline,
    run_trades_pipeline, OutputSinks,
};
use treasury_pipeline::reference::ProductReference;

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Generate randomized input files before running
    #[arg(long)]
    generate: bool,

    /// Number of records per generated input file
    #[arg(long, default_value_t = 60)]
    generate_count: usize,

    /// Seed for deterministic input generation
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting treasury pipeline run");
    info!("Configuration file: {}", args.config);

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let config = load_config(Some(&args.config))?;
    let reference = ProductReference::treasuries();

    if args.generate {
        generate_inputs(&config, args.generate_count, args.seed)?;
    }

    // Every output file opens before any input is read
    let (sinks, writer_handles) = OutputSinks::open(&config).await?;

    let trades = {
        let config = config.clone();
        let reference = reference.clone();
        let sinks = sinks.clone();
        tokio::spawn(async move { run_trades_pipeline(&config, &reference, &sinks).await })
    };
    let prices = {
        let config = config.clone();
        let reference = reference.clone();
        let sinks = sinks.clone();
        tokio::spawn(async move {
            run_prices_pipeline(&config, &reference, &sinks, SystemClock).await
        })
    };
    let market_data = {
        let config = config.clone();
        let reference = reference.clone();
        let sinks = sinks.clone();
        tokio::spawn(
            async move { run_market_data_pipeline(&config, &reference, &sinks).await },
        )
    };
    let inquiries = {
        let config = config.clone();
        let reference = reference.clone();
        let sinks = sinks.clone();
        tokio::spawn(
            async move { run_inquiries_pipeline(&config, &reference, &sinks).await },
        )
    };

    let mut skipped = 0;
    for handle in [trades, prices, market_data, inquiries] {
        let stats = handle.await??;
        skipped += stats.skipped;
    }
    if skipped > 0 {
        info!(skipped, "some input records were skipped; see warnings above");
    }

    // Dropping the last sink clones lets the writer tasks flush and exit
    drop(sinks);
    for handle in writer_handles {
        handle.await?;
    }

    info!("All pipelines finished");
    Ok(())
}
