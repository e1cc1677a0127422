//! Configuration types

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Trading books positions are kept across
    #[serde(default = "default_books")]
    pub books: Vec<String>,
    /// Book that trades synthesized from executions are allocated to
    #[serde(default = "default_book")]
    pub default_book: String,
    /// PV01 sensitivity per unit of quantity
    #[serde(default = "default_pv01_per_unit")]
    pub pv01_per_unit: Decimal,
    /// Minimum gap between GUI publishes in milliseconds
    #[serde(default = "default_gui_throttle_ms")]
    pub gui_throttle_ms: i64,
    /// Visible and hidden size on each streamed quote leg
    #[serde(default = "default_quote_size")]
    pub quote_size: i64,
    /// Order book level size multiplier: level N holds N times this size
    #[serde(default = "default_level_size_base")]
    pub level_size_base: i64,
    /// Bid/offer spread at or below which the algo crosses the market
    #[serde(default = "default_spread_tolerance")]
    pub spread_tolerance: Decimal,
    /// Ratio of an execution order's size kept hidden
    #[serde(default = "default_hidden_ratio")]
    pub hidden_ratio: Decimal,
    /// Venue executions are routed to
    #[serde(default = "default_venue")]
    pub venue: String,
    /// Price quoted back on every inquiry
    #[serde(default = "default_quote_price")]
    pub quote_price: Decimal,
    /// Quantity assigned to inbound inquiries
    #[serde(default = "default_inquiry_quantity")]
    pub inquiry_quantity: i64,
    /// Input file locations
    #[serde(default)]
    pub inputs: InputFiles,
    /// Output file locations
    #[serde(default)]
    pub outputs: OutputFiles,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            books: default_books(),
            default_book: default_book(),
            pv01_per_unit: default_pv01_per_unit(),
            gui_throttle_ms: default_gui_throttle_ms(),
            quote_size: default_quote_size(),
            level_size_base: default_level_size_base(),
            spread_tolerance: default_spread_tolerance(),
            hidden_ratio: default_hidden_ratio(),
            venue: default_venue(),
            quote_price: default_quote_price(),
            inquiry_quantity: default_inquiry_quantity(),
            inputs: InputFiles::default(),
            outputs: OutputFiles::default(),
        }
    }
}

/// Input record files, one pipeline each
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputFiles {
    #[serde(default = "default_trades_file")]
    pub trades: String,
    #[serde(default = "default_prices_file")]
    pub prices: String,
    #[serde(default = "default_marketdata_file")]
    pub marketdata: String,
    #[serde(default = "default_inquiries_file")]
    pub inquiries: String,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            trades: default_trades_file(),
            prices: default_prices_file(),
            marketdata: default_marketdata_file(),
            inquiries: default_inquiries_file(),
        }
    }
}

/// Append-only output files written by the historical recorders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputFiles {
    #[serde(default = "default_positions_out")]
    pub positions: String,
    #[serde(default = "default_risk_out")]
    pub risk: String,
    #[serde(default = "default_gui_out")]
    pub gui: String,
    #[serde(default = "default_streaming_out")]
    pub streaming: String,
    #[serde(default = "default_executions_out")]
    pub executions: String,
    #[serde(default = "default_inquiries_out")]
    pub inquiries: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            positions: default_positions_out(),
            risk: default_risk_out(),
            gui: default_gui_out(),
            streaming: default_streaming_out(),
            executions: default_executions_out(),
            inquiries: default_inquiries_out(),
        }
    }
}

fn default_books() -> Vec<String> {
    vec!["TRSY1".to_string(), "TRSY2".to_string(), "TRSY3".to_string()]
}

fn default_book() -> String {
    "TRSY1".to_string()
}

fn default_pv01_per_unit() -> Decimal {
    dec!(0.02)
}

fn default_gui_throttle_ms() -> i64 {
    300
}

fn default_quote_size() -> i64 {
    1_000_000
}

fn default_level_size_base() -> i64 {
    1_000_000
}

fn default_spread_tolerance() -> Decimal {
    // Tightest observed 1/128 granularity passes, anything wider does not
    Decimal::ONE / dec!(127)
}

fn default_hidden_ratio() -> Decimal {
    dec!(0.9)
}

fn default_venue() -> String {
    "CME".to_string()
}

fn default_quote_price() -> Decimal {
    dec!(100)
}

fn default_inquiry_quantity() -> i64 {
    1_000_000
}

fn default_trades_file() -> String {
    "data/trades.txt".to_string()
}

fn default_prices_file() -> String {
    "data/prices.txt".to_string()
}

fn default_marketdata_file() -> String {
    "data/marketdata.txt".to_string()
}

fn default_inquiries_file() -> String {
    "data/inquiries.txt".to_string()
}

fn default_positions_out() -> String {
    "output/positions.txt".to_string()
}

fn default_risk_out() -> String {
    "output/risk.txt".to_string()
}

fn default_gui_out() -> String {
    "output/gui.txt".to_string()
}

fn default_streaming_out() -> String {
    "output/streaming.txt".to_string()
}

fn default_executions_out() -> String {
    "output/executions.txt".to_string()
}

fn default_inquiries_out() -> String {
    "output/allinquiries.txt".to_string()
}
