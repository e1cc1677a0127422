//! GUI service
//!
//! Rate-limits price forwarding to the GUI sink: a price goes out only if
//! at least the configured window (default 300 ms) has elapsed since the
//! previous publish. Updates inside the window are dropped, not queued.
//! The first price after startup always goes out.

use tracing::warn;

use crate::adapters::recorder::RecordSink;
use crate::common::clock::Clock;
use crate::common::traits::ServiceListener;
use crate::common::types::Price;
use crate::services::history::RecordFormat;

pub struct GuiService<C: Clock> {
    clock: C,
    throttle_ms: i64,
    last_publish_ms: Option<i64>,
    sink: RecordSink,
}

impl<C: Clock> GuiService<C> {
    pub fn new(clock: C, throttle_ms: i64, sink: RecordSink) -> Self {
        Self {
            clock,
            throttle_ms,
            last_publish_ms: None,
            sink,
        }
    }

    /// Forward the price to the sink if the throttle window has passed
    ///
    /// Returns whether the price was forwarded.
    pub fn provide_price(&mut self, price: &Price) -> bool {
        let now = self.clock.now_millis();
        let open = match self.last_publish_ms {
            Some(last) => now - last >= self.throttle_ms,
            None => true,
        };
        if !open {
            return false;
        }
        self.last_publish_ms = Some(now);
        let line = format!("{},{}", now, price.record_fields());
        if let Err(e) = self.sink.send_line(line) {
            warn!(?e, "gui record dropped");
        }
        true
    }
}

/// Bridges published prices into the GUI throttle
pub struct GuiListener<C: Clock> {
    service: GuiService<C>,
}

impl<C: Clock> GuiListener<C> {
    pub fn new(service: GuiService<C>) -> Self {
        Self { service }
    }
}

impl<C: Clock> ServiceListener<Price> for GuiListener<C> {
    fn process_add(&mut self, price: &Price) {
        self.service.provide_price(price);
    }
}
