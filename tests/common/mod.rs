//! Shared test fixtures

use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use tempfile::TempDir;
use treasury_pipeline::common::clock::Clock;
use treasury_pipeline::config::AppConfig;

/// A config rooted in a throwaway directory for inputs and outputs
pub struct TestEnv {
    pub dir: TempDir,
    pub config: AppConfig,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        let mut config = AppConfig::default();
        config.inputs.trades = path(root, "data/trades.txt");
        config.inputs.prices = path(root, "data/prices.txt");
        config.inputs.marketdata = path(root, "data/marketdata.txt");
        config.inputs.inquiries = path(root, "data/inquiries.txt");
        config.outputs.positions = path(root, "output/positions.txt");
        config.outputs.risk = path(root, "output/risk.txt");
        config.outputs.gui = path(root, "output/gui.txt");
        config.outputs.streaming = path(root, "output/streaming.txt");
        config.outputs.executions = path(root, "output/executions.txt");
        config.outputs.inquiries = path(root, "output/allinquiries.txt");
        Self { dir, config }
    }

    /// Write one of the input files
    pub fn write_input(&self, input_path: &str, contents: &str) {
        let target = Path::new(input_path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).expect("input dir");
        }
        std::fs::write(target, contents).expect("input file");
    }

    /// Read one of the output files after the writers have stopped
    pub fn read_output(&self, output_path: &str) -> Vec<String> {
        std::fs::read_to_string(output_path)
            .expect("output file")
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn path(root: &Path, rel: &str) -> String {
    root.join(rel).display().to_string()
}

/// Strip the leading epoch-millis timestamp from a record line
pub fn without_timestamp(line: &str) -> &str {
    let (ts, rest) = line.split_once(',').expect("timestamped record");
    assert!(ts.parse::<i64>().expect("numeric timestamp") > 0);
    rest
}

/// Clock advanced by hand from the test body
#[derive(Clone)]
pub struct ManualClock(pub Arc<AtomicI64>);

impl ManualClock {
    pub fn at(millis: i64) -> Self {
        Self(Arc::new(AtomicI64::new(millis)))
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}
