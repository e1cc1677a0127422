//! Treasury Pipeline Library
//!
//! A Rust library for processing treasury trading flows: trade booking,
//! position and risk keeping, price streaming with GUI throttling,
//! market-data-driven execution and inquiry handling, with every pipeline
//! recording its output to append-only history files.

pub mod adapters;
pub mod common;
pub mod config;
pub mod pipeline;
pub mod reference;
pub mod services;

// Re-export commonly used types
pub use common::errors::{Result, ServiceError};
pub use common::types::{
    BidOffer, BucketedSector, ExecutionOrder, Inquiry, InquiryState, Order, OrderBook,
    OrderType, Position, Price, PriceStream, PriceStreamOrder, PricingSide, Product, Pv01,
    Side, Trade, Venue,
};
pub use config::types::AppConfig;
pub use reference::ProductReference;

// Pipeline assembly
pub use adapters::readers::ParseStats;
pub use pipeline::{
    run_inquiries_pipeline, run_market_data_pipeline, run_prices_pipeline,
    run_trades_pipeline, OutputSinks,
};
