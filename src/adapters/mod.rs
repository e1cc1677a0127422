//! File adapters at the edges of the pipelines
//!
//! Readers decode the line-oriented input files into typed events, the
//! recorder drains formatted records to the output files, and the generator
//! produces randomized sample inputs.

pub mod fractional;
pub mod generator;
pub mod readers;
pub mod recorder;

pub use fractional::decode_fractional;
pub use generator::generate_inputs;
pub use readers::{
    read_inquiries, read_market_data, read_prices, read_trades, ParseStats,
};
pub use recorder::{spawn_sink_writer, RecordSink};
