//! Execution service
//!
//! Accepts execution orders from the algo decision together with a venue,
//! stores them per product, and republishes so downstream listeners can
//! record the execution and book the resulting trade.

use std::collections::HashMap;

use tracing::debug;

use crate::common::errors::{Result, ServiceError};
use crate::common::traits::{ListenerSet, ServiceListener};
use crate::common::types::{ExecutionOrder, Venue};

pub struct ExecutionService {
    orders: HashMap<String, ExecutionOrder>,
    listeners: ListenerSet<ExecutionOrder>,
}

impl ExecutionService {
    pub fn new() -> Self {
        Self {
            orders: HashMap::new(),
            listeners: ListenerSet::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<ExecutionOrder>>) {
        self.listeners.add(listener);
    }

    /// Latest executed order for a product
    pub fn get(&self, ticker: &str) -> Result<&ExecutionOrder> {
        self.orders
            .get(ticker)
            .ok_or_else(|| ServiceError::NotFound(ticker.to_string()))
    }

    /// Route the order to a venue, store it, then republish it
    pub fn execute_order(&mut self, order: &ExecutionOrder, venue: Venue) {
        debug!(order_id = %order.order_id, %venue, "order executed");
        self.orders
            .insert(order.product.ticker.clone(), order.clone());
        self.listeners.notify(order);
    }
}

impl Default for ExecutionService {
    fn default() -> Self {
        Self::new()
    }
}

/// Bridges emitted algo orders into the execution service
pub struct ExecutionListener {
    service: ExecutionService,
    venue: Venue,
}

impl ExecutionListener {
    pub fn new(service: ExecutionService, venue: Venue) -> Self {
        Self { service, venue }
    }
}

impl ServiceListener<ExecutionOrder> for ExecutionListener {
    fn process_add(&mut self, order: &ExecutionOrder) {
        self.service.execute_order(order, self.venue);
    }
}
