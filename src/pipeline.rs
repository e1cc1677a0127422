//! Pipeline assembly
//!
//! Wires services and bridging listeners into the four processing chains
//! and drives each one from its input file. Within a chain, dispatch is
//! synchronous and in registration order; the chains themselves run as
//! independent tasks and only meet at the record sinks.

use tokio::task::JoinHandle;
use tracing::info;

use crate::adapters::readers::{
    read_inquiries, read_market_data, read_prices, read_trades, ParseStats,
};
use crate::adapters::recorder::{spawn_sink_writer, RecordSink};
use crate::common::clock::Clock;
use crate::common::errors::Result;
use crate::common::types::Venue;
use crate::config::AppConfig;
use crate::reference::ProductReference;
use crate::services::algo_execution::{AlgoExecutionListener, AlgoExecutionService};
use crate::services::algo_streaming::{AlgoStreamingListener, AlgoStreamingService};
use crate::services::execution::{ExecutionListener, ExecutionService};
use crate::services::gui::{GuiListener, GuiService};
use crate::services::history::{HistoricalService, HistoryListener};
use crate::services::inquiry::InquiryService;
use crate::services::market_data::MarketDataService;
use crate::services::position::{PositionListener, PositionService};
use crate::services::pricing::PricingService;
use crate::services::risk::{RiskListener, RiskService};
use crate::services::streaming::{StreamingListener, StreamingService};
use crate::services::trade_booking::{ExecutionToTradeListener, TradeBookingService};

/// One cloneable sink per output file
#[derive(Clone)]
pub struct OutputSinks {
    pub positions: RecordSink,
    pub risk: RecordSink,
    pub gui: RecordSink,
    pub streaming: RecordSink,
    pub executions: RecordSink,
    pub inquiries: RecordSink,
}

impl OutputSinks {
    /// Open every output file up front, failing the run if any cannot be
    /// created. Returns the writer task handles to await after the last
    /// sink clone is dropped.
    pub async fn open(config: &AppConfig) -> Result<(Self, Vec<JoinHandle<()>>)> {
        let (positions, h1) = spawn_sink_writer(&config.outputs.positions).await?;
        let (risk, h2) = spawn_sink_writer(&config.outputs.risk).await?;
        let (gui, h3) = spawn_sink_writer(&config.outputs.gui).await?;
        let (streaming, h4) = spawn_sink_writer(&config.outputs.streaming).await?;
        let (executions, h5) = spawn_sink_writer(&config.outputs.executions).await?;
        let (inquiries, h6) = spawn_sink_writer(&config.outputs.inquiries).await?;
        let sinks = Self {
            positions,
            risk,
            gui,
            streaming,
            executions,
            inquiries,
        };
        Ok((sinks, vec![h1, h2, h3, h4, h5, h6]))
    }
}

/// Position and risk chain shared by the trades and market-data pipelines
///
/// Position updates are recorded before risk is recomputed, so the
/// positions file never runs ahead of the risk file for the same trade.
fn position_chain(
    config: &AppConfig,
    reference: &ProductReference,
    positions_sink: RecordSink,
    risk_sink: RecordSink,
) -> PositionListener {
    let mut risk = RiskService::new(config.pv01_per_unit);
    risk.add_listener(Box::new(HistoryListener::new(HistoricalService::new(
        risk_sink,
    ))));

    let mut positions = PositionService::new(reference, &config.books);
    positions.add_listener(Box::new(HistoryListener::new(HistoricalService::new(
        positions_sink,
    ))));
    positions.add_listener(Box::new(RiskListener::new(risk)));

    PositionListener::new(positions)
}

/// Trades file -> booking -> positions -> risk -> history
pub async fn run_trades_pipeline(
    config: &AppConfig,
    reference: &ProductReference,
    sinks: &OutputSinks,
) -> Result<ParseStats> {
    let mut booking = TradeBookingService::new();
    booking.add_listener(Box::new(position_chain(
        config,
        reference,
        sinks.positions.clone(),
        sinks.risk.clone(),
    )));

    let stats = read_trades(&config.inputs.trades, reference, &mut booking).await?;
    info!(lines = stats.lines, skipped = stats.skipped, "trades pipeline finished");
    Ok(stats)
}

/// Prices file -> pricing -> { gui throttle, streaming -> history }
///
/// The clock drives the GUI throttle window; production passes
/// [`SystemClock`](crate::common::clock::SystemClock), tests inject their own.
pub async fn run_prices_pipeline<C: Clock + 'static>(
    config: &AppConfig,
    reference: &ProductReference,
    sinks: &OutputSinks,
    clock: C,
) -> Result<ParseStats> {
    let mut streaming = StreamingService::new();
    streaming.add_listener(Box::new(HistoryListener::new(HistoricalService::new(
        sinks.streaming.clone(),
    ))));

    let mut algo_streaming = AlgoStreamingService::new(config.quote_size);
    algo_streaming.add_listener(Box::new(StreamingListener::new(streaming)));

    let gui = GuiService::new(clock, config.gui_throttle_ms, sinks.gui.clone());

    let mut pricing = PricingService::new();
    pricing.add_listener(Box::new(GuiListener::new(gui)));
    pricing.add_listener(Box::new(AlgoStreamingListener::new(algo_streaming)));

    let stats = read_prices(&config.inputs.prices, reference, &mut pricing).await?;
    info!(lines = stats.lines, skipped = stats.skipped, "prices pipeline finished");
    Ok(stats)
}

/// Market data file -> crossing decision -> execution -> { history, booked
/// trade -> positions -> risk -> history }
pub async fn run_market_data_pipeline(
    config: &AppConfig,
    reference: &ProductReference,
    sinks: &OutputSinks,
) -> Result<ParseStats> {
    let venue: Venue = config.venue.parse()?;

    let mut booking = TradeBookingService::new();
    booking.add_listener(Box::new(position_chain(
        config,
        reference,
        sinks.positions.clone(),
        sinks.risk.clone(),
    )));

    let mut execution = ExecutionService::new();
    execution.add_listener(Box::new(HistoryListener::new(HistoricalService::new(
        sinks.executions.clone(),
    ))));
    execution.add_listener(Box::new(ExecutionToTradeListener::new(
        booking,
        config.default_book.clone(),
    )));

    let mut algo =
        AlgoExecutionService::new(config.spread_tolerance, config.hidden_ratio);
    algo.add_listener(Box::new(ExecutionListener::new(execution, venue)));

    let mut market_data = MarketDataService::new();
    market_data.add_listener(Box::new(AlgoExecutionListener::new(algo)));

    let stats = read_market_data(
        &config.inputs.marketdata,
        reference,
        config.level_size_base,
        &mut market_data,
    )
    .await?;
    info!(lines = stats.lines, skipped = stats.skipped, "market data pipeline finished");
    Ok(stats)
}

/// Inquiries file -> state machine -> history
pub async fn run_inquiries_pipeline(
    config: &AppConfig,
    reference: &ProductReference,
    sinks: &OutputSinks,
) -> Result<ParseStats> {
    let mut inquiries = InquiryService::new(config.quote_price);
    inquiries.add_listener(Box::new(HistoryListener::new(HistoricalService::new(
        sinks.inquiries.clone(),
    ))));

    let stats = read_inquiries(
        &config.inputs.inquiries,
        reference,
        config.inquiry_quantity,
        &mut inquiries,
    )
    .await?;
    info!(lines = stats.lines, skipped = stats.skipped, "inquiries pipeline finished");
    Ok(stats)
}
