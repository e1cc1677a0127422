//! Position service
//!
//! Maintains a per-product position across the configured books, seeded
//! flat for every product in the reference table at startup. A trade for a
//! product outside the table is a recoverable error: nothing is mutated and
//! nothing is published.

use std::collections::HashMap;

use tracing::warn;

use crate::common::errors::{Result, ServiceError};
use crate::common::traits::{ListenerSet, ServiceListener};
use crate::common::types::{Position, Trade};
use crate::reference::ProductReference;

pub struct PositionService {
    positions: HashMap<String, Position>,
    listeners: ListenerSet<Position>,
}

impl PositionService {
    /// Seed a flat position per reference product over the given books
    pub fn new(reference: &ProductReference, books: &[String]) -> Self {
        let positions = reference
            .products()
            .map(|p| (p.ticker.clone(), Position::new(p.clone(), books)))
            .collect();
        Self {
            positions,
            listeners: ListenerSet::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<Position>>) {
        self.listeners.add(listener);
    }

    /// Current position for a product
    pub fn get(&self, ticker: &str) -> Result<&Position> {
        self.positions
            .get(ticker)
            .ok_or_else(|| ServiceError::NotFound(ticker.to_string()))
    }

    /// Apply a trade to the product's position, then publish it
    ///
    /// Positions are never created from a trade alone; the product must
    /// pre-exist from the reference table.
    pub fn add_trade(&mut self, trade: &Trade) -> Result<()> {
        let position = self
            .positions
            .get_mut(&trade.product.ticker)
            .ok_or_else(|| ServiceError::UnknownProduct(trade.product.ticker.clone()))?;
        position.apply(&trade.book, trade.quantity, trade.side)?;
        let updated = position.clone();
        self.listeners.notify(&updated);
        Ok(())
    }
}

/// Bridges booked trades into the position service
pub struct PositionListener {
    service: PositionService,
}

impl PositionListener {
    pub fn new(service: PositionService) -> Self {
        Self { service }
    }
}

impl ServiceListener<Trade> for PositionListener {
    fn process_add(&mut self, trade: &Trade) {
        if let Err(e) = self.service.add_trade(trade) {
            warn!(trade_id = %trade.trade_id, %e, "trade not applied");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::{Product, Side};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    struct Collector(Arc<Mutex<Vec<Position>>>);

    impl ServiceListener<Position> for Collector {
        fn process_add(&mut self, data: &Position) {
            self.0.lock().unwrap().push(data.clone());
        }
    }

    fn books() -> Vec<String> {
        vec!["TRSY1".to_string(), "TRSY2".to_string(), "TRSY3".to_string()]
    }

    fn trade(ticker: &str, book: &str, quantity: i64, side: Side) -> Trade {
        Trade {
            product: Product::new(
                ticker,
                dec!(0.02),
                NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            ),
            trade_id: "T1".to_string(),
            book: book.to_string(),
            price: dec!(99.5),
            quantity,
            side,
        }
    }

    #[test]
    fn test_buy_then_sell_nets_the_book() {
        let mut service = PositionService::new(&ProductReference::treasuries(), &books());
        let seen = Arc::new(Mutex::new(Vec::new()));
        service.add_listener(Box::new(Collector(seen.clone())));

        service
            .add_trade(&trade("B02y", "TRSY1", 1_000_000, Side::Buy))
            .unwrap();
        service
            .add_trade(&trade("B02y", "TRSY1", 400_000, Side::Sell))
            .unwrap();

        let position = service.get("B02y").unwrap();
        assert_eq!(position.quantity("TRSY1").unwrap(), 600_000);
        assert_eq!(position.aggregate(), 600_000);
        // Every mutation published
        assert_eq!(seen.lock().unwrap().len(), 2);
        assert_eq!(seen.lock().unwrap()[1].aggregate(), 600_000);
    }

    #[test]
    fn test_aggregate_spans_books() {
        let mut service = PositionService::new(&ProductReference::treasuries(), &books());
        service
            .add_trade(&trade("B10y", "TRSY1", 1_000_000, Side::Buy))
            .unwrap();
        service
            .add_trade(&trade("B10y", "TRSY2", 2_000_000, Side::Buy))
            .unwrap();
        service
            .add_trade(&trade("B10y", "TRSY3", 500_000, Side::Sell))
            .unwrap();

        assert_eq!(service.get("B10y").unwrap().aggregate(), 2_500_000);
    }

    #[test]
    fn test_unknown_product_mutates_nothing_and_stays_quiet() {
        let mut service = PositionService::new(&ProductReference::treasuries(), &books());
        let seen = Arc::new(Mutex::new(Vec::new()));
        service.add_listener(Box::new(Collector(seen.clone())));

        let err = service
            .add_trade(&trade("B99y", "TRSY1", 1_000_000, Side::Buy))
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnknownProduct(_)));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_book_mutates_nothing_and_stays_quiet() {
        let mut service = PositionService::new(&ProductReference::treasuries(), &books());
        let seen = Arc::new(Mutex::new(Vec::new()));
        service.add_listener(Box::new(Collector(seen.clone())));

        let err = service
            .add_trade(&trade("B02y", "TRSY9", 1_000_000, Side::Buy))
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnknownBook(_)));
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(service.get("B02y").unwrap().aggregate(), 0);
    }
}
