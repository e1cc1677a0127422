//! Inbound file adapters
//!
//! Each reader decodes one line-oriented, comma-separated input format into
//! typed events and hands them to a service's inbound entry point.
//! Malformed lines and unknown tickers are skipped, not fatal; each run
//! reports how many lines were skipped so silent data loss stays visible.

use rust_decimal_macros::dec;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::common::errors::{Result, ServiceError};
use crate::common::types::{
    Inquiry, InquiryState, Order, OrderBook, Price, PricingSide, Side, Trade,
};
use crate::reference::ProductReference;
use crate::services::inquiry::InquiryService;
use crate::services::market_data::MarketDataService;
use crate::services::pricing::PricingService;
use crate::services::trade_booking::TradeBookingService;

use super::fractional::decode_fractional;

/// Per-run adapter accounting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines read from the input file
    pub lines: u64,
    /// Lines skipped as malformed or referencing unknown products
    pub skipped: u64,
}

impl ParseStats {
    fn skip(&mut self, line_no: u64, reason: &ServiceError) {
        self.skipped += 1;
        warn!(line = line_no, %reason, "record skipped");
    }
}

fn parse_side(token: &str) -> Result<Side> {
    match token {
        "BUY" => Ok(Side::Buy),
        "SELL" => Ok(Side::Sell),
        other => Err(ServiceError::MalformedRecord(format!("bad side: {other}"))),
    }
}

/// Decode `ticker,tradeId,book,quantity,fractionalPrice,side`
fn decode_trade(line: &str, reference: &ProductReference) -> Result<Trade> {
    let tokens: Vec<&str> = line.split(',').collect();
    if tokens.len() < 6 {
        return Err(ServiceError::MalformedRecord(format!(
            "trade needs 6 fields, got {}",
            tokens.len()
        )));
    }
    let product = reference.get(tokens[0])?.clone();
    let quantity: i64 = tokens[3]
        .parse()
        .map_err(|_| ServiceError::MalformedRecord(format!("bad quantity: {}", tokens[3])))?;
    if quantity <= 0 {
        return Err(ServiceError::MalformedRecord(format!(
            "quantity must be positive: {quantity}"
        )));
    }
    Ok(Trade {
        product,
        trade_id: tokens[1].to_string(),
        book: tokens[2].to_string(),
        price: decode_fractional(tokens[4])?,
        quantity,
        side: parse_side(tokens[5])?,
    })
}

/// Decode `ticker,bidFractional,askFractional` into a mid/spread price
fn decode_price(line: &str, reference: &ProductReference) -> Result<Price> {
    let tokens: Vec<&str> = line.split(',').collect();
    if tokens.len() < 3 {
        return Err(ServiceError::MalformedRecord(format!(
            "price needs 3 fields, got {}",
            tokens.len()
        )));
    }
    let product = reference.get(tokens[0])?.clone();
    let bid = decode_fractional(tokens[1])?;
    let ask = decode_fractional(tokens[2])?;
    Ok(Price {
        product,
        mid: (bid + ask) / dec!(2),
        spread: ask - bid,
    })
}

/// Decode `ticker,bid1,ask1,...,bid5,ask5` into a five-level book
///
/// Level N carries N times the configured base size.
fn decode_order_book(
    line: &str,
    reference: &ProductReference,
    level_size_base: i64,
) -> Result<OrderBook> {
    let tokens: Vec<&str> = line.split(',').collect();
    if tokens.len() < 11 {
        return Err(ServiceError::MalformedRecord(format!(
            "market data needs 11 fields, got {}",
            tokens.len()
        )));
    }
    let product = reference.get(tokens[0])?.clone();
    let mut bids = Vec::with_capacity(5);
    let mut offers = Vec::with_capacity(5);
    for level in 0..5 {
        let bid = decode_fractional(tokens[1 + 2 * level])?;
        let ask = decode_fractional(tokens[2 + 2 * level])?;
        let size = level_size_base * (level as i64 + 1);
        bids.push(Order::new(bid, size, PricingSide::Bid));
        offers.push(Order::new(ask, size, PricingSide::Offer));
    }
    Ok(OrderBook::new(product, bids, offers))
}

/// Decode `inquiryId,ticker,side` into a fresh RECEIVED inquiry
fn decode_inquiry(line: &str, reference: &ProductReference, quantity: i64) -> Result<Inquiry> {
    let tokens: Vec<&str> = line.split(',').collect();
    if tokens.len() < 3 {
        return Err(ServiceError::MalformedRecord(format!(
            "inquiry needs 3 fields, got {}",
            tokens.len()
        )));
    }
    let product = reference.get(tokens[1])?.clone();
    Ok(Inquiry {
        inquiry_id: tokens[0].to_string(),
        product,
        side: parse_side(tokens[2])?,
        quantity,
        price: None,
        state: InquiryState::Received,
    })
}

async fn open_lines(path: &str) -> Result<tokio::io::Lines<BufReader<File>>> {
    let file = File::open(path).await?;
    Ok(BufReader::new(file).lines())
}

/// Feed the trades file into trade booking
pub async fn read_trades(
    path: &str,
    reference: &ProductReference,
    booking: &mut TradeBookingService,
) -> Result<ParseStats> {
    let mut lines = open_lines(path).await?;
    let mut stats = ParseStats::default();
    while let Some(line) = lines.next_line().await? {
        if line.is_empty() {
            continue;
        }
        stats.lines += 1;
        match decode_trade(&line, reference) {
            Ok(trade) => booking.on_message(trade),
            Err(e) => stats.skip(stats.lines, &e),
        }
    }
    info!(path, lines = stats.lines, skipped = stats.skipped, "trades read");
    Ok(stats)
}

/// Feed the prices file into the pricing service
pub async fn read_prices(
    path: &str,
    reference: &ProductReference,
    pricing: &mut PricingService,
) -> Result<ParseStats> {
    let mut lines = open_lines(path).await?;
    let mut stats = ParseStats::default();
    while let Some(line) = lines.next_line().await? {
        if line.is_empty() {
            continue;
        }
        stats.lines += 1;
        match decode_price(&line, reference) {
            Ok(price) => pricing.on_message(price),
            Err(e) => stats.skip(stats.lines, &e),
        }
    }
    info!(path, lines = stats.lines, skipped = stats.skipped, "prices read");
    Ok(stats)
}

/// Feed the market data file into the market data service
pub async fn read_market_data(
    path: &str,
    reference: &ProductReference,
    level_size_base: i64,
    market_data: &mut MarketDataService,
) -> Result<ParseStats> {
    let mut lines = open_lines(path).await?;
    let mut stats = ParseStats::default();
    while let Some(line) = lines.next_line().await? {
        if line.is_empty() {
            continue;
        }
        stats.lines += 1;
        match decode_order_book(&line, reference, level_size_base) {
            Ok(book) => market_data.on_order_book(book),
            Err(e) => stats.skip(stats.lines, &e),
        }
    }
    info!(path, lines = stats.lines, skipped = stats.skipped, "order books read");
    Ok(stats)
}

/// Feed the inquiries file into the inquiry service
pub async fn read_inquiries(
    path: &str,
    reference: &ProductReference,
    quantity: i64,
    inquiries: &mut InquiryService,
) -> Result<ParseStats> {
    let mut lines = open_lines(path).await?;
    let mut stats = ParseStats::default();
    while let Some(line) = lines.next_line().await? {
        if line.is_empty() {
            continue;
        }
        stats.lines += 1;
        match decode_inquiry(&line, reference, quantity) {
            Ok(inquiry) => inquiries.on_message(inquiry),
            Err(e) => stats.skip(stats.lines, &e),
        }
    }
    info!(path, lines = stats.lines, skipped = stats.skipped, "inquiries read");
    Ok(stats)
}
