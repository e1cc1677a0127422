//! Streaming service
//!
//! Keyed pass-through for derived price streams on their way to the
//! streaming history sink.

use std::collections::HashMap;

use crate::common::errors::{Result, ServiceError};
use crate::common::traits::{ListenerSet, ServiceListener};
use crate::common::types::PriceStream;

pub struct StreamingService {
    streams: HashMap<String, PriceStream>,
    listeners: ListenerSet<PriceStream>,
}

impl StreamingService {
    pub fn new() -> Self {
        Self {
            streams: HashMap::new(),
            listeners: ListenerSet::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<PriceStream>>) {
        self.listeners.add(listener);
    }

    pub fn get(&self, ticker: &str) -> Result<&PriceStream> {
        self.streams
            .get(ticker)
            .ok_or_else(|| ServiceError::NotFound(ticker.to_string()))
    }

    /// Store the stream, then republish it
    pub fn publish_price(&mut self, stream: &PriceStream) {
        self.streams
            .insert(stream.product.ticker.clone(), stream.clone());
        self.listeners.notify(stream);
    }
}

impl Default for StreamingService {
    fn default() -> Self {
        Self::new()
    }
}

/// Bridges derived quotes into the streaming service
pub struct StreamingListener {
    service: StreamingService,
}

impl StreamingListener {
    pub fn new(service: StreamingService) -> Self {
        Self { service }
    }
}

impl ServiceListener<PriceStream> for StreamingListener {
    fn process_add(&mut self, stream: &PriceStream) {
        self.service.publish_price(stream);
    }
}
