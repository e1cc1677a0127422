//! Trade booking service
//!
//! Entry point for booked trades, both those read from the trades file and
//! those synthesized from executions. Stores the latest trade per trade id
//! and republishes every booking to its listeners.

use std::collections::HashMap;

use crate::common::errors::{Result, ServiceError};
use crate::common::traits::{ListenerSet, ServiceListener};
use crate::common::types::{ExecutionOrder, Trade};

pub struct TradeBookingService {
    trades: HashMap<String, Trade>,
    listeners: ListenerSet<Trade>,
}

impl TradeBookingService {
    pub fn new() -> Self {
        Self {
            trades: HashMap::new(),
            listeners: ListenerSet::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<Trade>>) {
        self.listeners.add(listener);
    }

    /// Look up a booked trade by trade id
    pub fn get(&self, trade_id: &str) -> Result<&Trade> {
        self.trades
            .get(trade_id)
            .ok_or_else(|| ServiceError::NotFound(trade_id.to_string()))
    }

    /// Store the trade, then notify listeners
    pub fn book_trade(&mut self, trade: Trade) {
        self.trades.insert(trade.trade_id.clone(), trade.clone());
        self.listeners.notify(&trade);
    }

    /// Inbound entry point used by the trades adapter
    pub fn on_message(&mut self, trade: Trade) {
        self.book_trade(trade);
    }
}

impl Default for TradeBookingService {
    fn default() -> Self {
        Self::new()
    }
}

/// Transforms execution orders into booked trades
///
/// Closes the market-data loop: an emitted execution becomes a trade with
/// id `EXEC<orderId>`, the configured default book, the full order size
/// (visible plus hidden) and the order's price, booked on the trade side
/// matching the order's pricing side.
pub struct ExecutionToTradeListener {
    booking: TradeBookingService,
    default_book: String,
}

impl ExecutionToTradeListener {
    pub fn new(booking: TradeBookingService, default_book: String) -> Self {
        Self {
            booking,
            default_book,
        }
    }
}

impl ServiceListener<ExecutionOrder> for ExecutionToTradeListener {
    fn process_add(&mut self, order: &ExecutionOrder) {
        let trade = Trade {
            product: order.product.clone(),
            trade_id: format!("EXEC{}", order.order_id),
            book: self.default_book.clone(),
            price: order.price,
            quantity: order.visible_quantity + order.hidden_quantity,
            side: order.side.trade_side(),
        };
        self.booking.book_trade(trade);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::{OrderType, PricingSide, Product};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    fn product() -> Product {
        Product::new("B02y", dec!(0.02), NaiveDate::from_ymd_opt(2026, 12, 31).unwrap())
    }

    struct Collector(Arc<Mutex<Vec<Trade>>>);

    impl ServiceListener<Trade> for Collector {
        fn process_add(&mut self, data: &Trade) {
            self.0.lock().unwrap().push(data.clone());
        }
    }

    fn trade(id: &str) -> Trade {
        Trade {
            product: product(),
            trade_id: id.to_string(),
            book: "TRSY1".to_string(),
            price: dec!(99.5),
            quantity: 1_000_000,
            side: crate::common::types::Side::Buy,
        }
    }

    #[test]
    fn test_book_trade_stores_then_notifies() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut booking = TradeBookingService::new();
        booking.add_listener(Box::new(Collector(seen.clone())));

        booking.book_trade(trade("T1"));

        assert_eq!(booking.get("T1").unwrap().quantity, 1_000_000);
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert!(matches!(
            booking.get("T9").unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[test]
    fn test_execution_becomes_trade_with_full_size() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut booking = TradeBookingService::new();
        booking.add_listener(Box::new(Collector(seen.clone())));
        let mut listener = ExecutionToTradeListener::new(booking, "TRSY1".to_string());

        let order = ExecutionOrder {
            product: product(),
            side: PricingSide::Offer,
            order_id: "42".to_string(),
            order_type: OrderType::Market,
            price: dec!(99.5),
            visible_quantity: 1_000_000,
            hidden_quantity: 900_000,
            parent_order_id: "42".to_string(),
            is_child_order: false,
        };
        listener.process_add(&order);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let booked = &seen[0];
        assert_eq!(booked.trade_id, "EXEC42");
        assert_eq!(booked.book, "TRSY1");
        assert_eq!(booked.quantity, 1_900_000);
        assert_eq!(booked.price, dec!(99.5));
        assert_eq!(booked.side, crate::common::types::Side::Sell);
    }
}
