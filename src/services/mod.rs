//! Domain services
//!
//! Each service exclusively owns one keyed state store and applies one
//! transformation or decision rule per incoming event, publishing the
//! result to its listeners. The bridging listener for a service lives next
//! to the service it forwards into.

pub mod algo_execution;
pub mod algo_streaming;
pub mod execution;
pub mod gui;
pub mod history;
pub mod inquiry;
pub mod market_data;
pub mod position;
pub mod pricing;
pub mod risk;
pub mod streaming;
pub mod trade_booking;

pub use algo_execution::{AlgoExecutionListener, AlgoExecutionService};
pub use algo_streaming::{AlgoStreamingListener, AlgoStreamingService};
pub use execution::{ExecutionListener, ExecutionService};
pub use gui::{GuiListener, GuiService};
pub use history::{HistoricalService, HistoryListener, RecordFormat};
pub use inquiry::InquiryService;
pub use market_data::MarketDataService;
pub use position::{PositionListener, PositionService};
pub use pricing::PricingService;
pub use risk::{RiskListener, RiskService};
pub use streaming::{StreamingListener, StreamingService};
pub use trade_booking::{ExecutionToTradeListener, TradeBookingService};
