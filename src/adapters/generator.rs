//! Sample input generation
//!
//! Writes randomized input files in the formats the readers decode, so a
//! full run can be exercised without captured market data. Prices are
//! emitted in fractional notation ("99-16", "100-08+"); roughly a third of
//! the generated order books are locked (bid equals ask) so the crossing
//! rule has something to execute.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::common::errors::Result;
use crate::config::AppConfig;
use crate::reference::treasury_tickers;

const SIDES: [&str; 2] = ["BUY", "SELL"];

fn fractional(whole: u32, ticks: u32, plus: bool) -> String {
    let suffix = if plus { "+" } else { "" };
    format!("{whole}-{ticks:02}{suffix}")
}

fn random_fractional(rng: &mut StdRng) -> String {
    fractional(
        rng.gen_range(99..=100),
        rng.gen_range(0..=31),
        rng.gen_bool(0.3),
    )
}

fn random_ticker<'a>(rng: &mut StdRng, tickers: &'a [&'a str]) -> &'a str {
    tickers[rng.gen_range(0..tickers.len())]
}

fn open_writer(path: &str) -> Result<BufWriter<File>> {
    if let Some(parent) = Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

fn write_trades(path: &str, count: usize, books: &[String], rng: &mut StdRng) -> Result<()> {
    let tickers = treasury_tickers();
    let mut out = open_writer(path)?;
    for i in 1..=count {
        let ticker = random_ticker(rng, &tickers);
        let book = &books[rng.gen_range(0..books.len())];
        let quantity = rng.gen_range(1..=5) * 1_000_000;
        let side = SIDES[rng.gen_range(0..SIDES.len())];
        writeln!(
            out,
            "{ticker},TradeId{i},{book},{quantity},{},{side}",
            random_fractional(rng)
        )?;
    }
    out.flush()?;
    Ok(())
}

fn write_prices(path: &str, count: usize, rng: &mut StdRng) -> Result<()> {
    let tickers = treasury_tickers();
    let mut out = open_writer(path)?;
    for _ in 0..count {
        let ticker = random_ticker(rng, &tickers);
        let whole = rng.gen_range(99..=100);
        let bid_ticks = rng.gen_range(0..=29);
        let ask_ticks = rng.gen_range(bid_ticks + 1..=31);
        writeln!(
            out,
            "{ticker},{},{}",
            fractional(whole, bid_ticks, rng.gen_bool(0.3)),
            fractional(whole, ask_ticks, rng.gen_bool(0.3))
        )?;
    }
    out.flush()?;
    Ok(())
}

fn write_market_data(path: &str, count: usize, rng: &mut StdRng) -> Result<()> {
    let tickers = treasury_tickers();
    let mut out = open_writer(path)?;
    for _ in 0..count {
        let ticker = random_ticker(rng, &tickers);
        let whole = rng.gen_range(99..=100);
        let locked = rng.gen_bool(1.0 / 3.0);
        let top: u32 = rng.gen_range(2..=28);
        let mut line = ticker.to_string();
        for level in 0..5u32 {
            let bid = top.saturating_sub(level);
            let ask = if locked { top } else { top + 1 } + level;
            line.push(',');
            line.push_str(&fractional(whole, bid, false));
            line.push(',');
            line.push_str(&fractional(whole, ask.min(31), false));
        }
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

fn write_inquiries(path: &str, count: usize, rng: &mut StdRng) -> Result<()> {
    let tickers = treasury_tickers();
    let mut out = open_writer(path)?;
    for i in 1..=count {
        let ticker = random_ticker(rng, &tickers);
        let side = SIDES[rng.gen_range(0..SIDES.len())];
        writeln!(out, "INQ{i},{ticker},{side}")?;
    }
    out.flush()?;
    Ok(())
}

/// Generate all four input files at the configured paths
pub fn generate_inputs(config: &AppConfig, count: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    write_trades(&config.inputs.trades, count, &config.books, &mut rng)?;
    write_prices(&config.inputs.prices, count, &mut rng)?;
    write_market_data(&config.inputs.marketdata, count, &mut rng)?;
    write_inquiries(&config.inputs.inquiries, count, &mut rng)?;
    info!(count, "sample input files generated");
    Ok(())
}
