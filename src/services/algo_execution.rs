//! Algo execution service
//!
//! Decides, per incoming order book, whether the market is tight enough to
//! cross: an execution order is emitted iff best offer minus best bid is at
//! or below the configured tolerance (default 1/127, so only the tightest
//! 1/128 books trade). The order side alternates through an explicit
//! per-service sequence counter, and the order takes the contra side's best
//! price with the own side's best quantity: a buy order takes the best
//! offer's price and the best bid's quantity, and vice versa.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::common::errors::{Result, ServiceError};
use crate::common::traits::{ListenerSet, ServiceListener};
use crate::common::types::{ExecutionOrder, OrderBook, OrderType, PricingSide};

pub struct AlgoExecutionService {
    executions: HashMap<String, ExecutionOrder>,
    spread_tolerance: Decimal,
    hidden_ratio: Decimal,
    /// Monotonic order sequence; parity picks the side
    sequence: u64,
    listeners: ListenerSet<ExecutionOrder>,
}

impl AlgoExecutionService {
    pub fn new(spread_tolerance: Decimal, hidden_ratio: Decimal) -> Self {
        Self {
            executions: HashMap::new(),
            spread_tolerance,
            hidden_ratio,
            sequence: 0,
            listeners: ListenerSet::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<ExecutionOrder>>) {
        self.listeners.add(listener);
    }

    /// Latest emitted order for a product
    pub fn get(&self, ticker: &str) -> Result<&ExecutionOrder> {
        self.executions
            .get(ticker)
            .ok_or_else(|| ServiceError::NotFound(ticker.to_string()))
    }

    /// Apply the crossing rule to a new book
    ///
    /// Returns the emitted order, or `None` when the spread is too wide.
    pub fn on_order_book(&mut self, book: &OrderBook) -> Result<Option<ExecutionOrder>> {
        let ticker = &book.product.ticker;
        let best_bid = book
            .best_bid()
            .ok_or_else(|| ServiceError::DegenerateBook(ticker.clone()))?;
        let best_offer = book
            .best_offer()
            .ok_or_else(|| ServiceError::DegenerateBook(ticker.clone()))?;

        let spread = best_offer.price - best_bid.price;
        if spread > self.spread_tolerance {
            return Ok(None);
        }

        self.sequence += 1;
        let side = if self.sequence % 2 == 0 {
            PricingSide::Bid
        } else {
            PricingSide::Offer
        };
        let (price, visible_quantity) = match side {
            PricingSide::Bid => (best_offer.price, best_bid.quantity),
            PricingSide::Offer => (best_bid.price, best_offer.quantity),
        };
        let hidden_quantity = (Decimal::from(visible_quantity) * self.hidden_ratio)
            .floor()
            .to_i64()
            .unwrap_or(0);

        let order_id = self.sequence.to_string();
        let order = ExecutionOrder {
            product: book.product.clone(),
            side,
            order_id: order_id.clone(),
            order_type: OrderType::Market,
            price,
            visible_quantity,
            hidden_quantity,
            parent_order_id: order_id,
            is_child_order: false,
        };
        self.executions.insert(ticker.clone(), order.clone());
        self.listeners.notify(&order);
        Ok(Some(order))
    }
}

/// Bridges published order books into the crossing decision
pub struct AlgoExecutionListener {
    service: AlgoExecutionService,
}

impl AlgoExecutionListener {
    pub fn new(service: AlgoExecutionService) -> Self {
        Self { service }
    }
}

impl ServiceListener<OrderBook> for AlgoExecutionListener {
    fn process_add(&mut self, book: &OrderBook) {
        if let Err(e) = self.service.on_order_book(book) {
            tracing::warn!(ticker = %book.product.ticker, %e, "order book not executable");
        }
    }
}
