//! Market data service
//!
//! Holds the current order book per product. Each market-data record fully
//! replaces the previous book; there are no incremental updates.

use std::collections::HashMap;

use crate::common::errors::{Result, ServiceError};
use crate::common::traits::{ListenerSet, ServiceListener};
use crate::common::types::{BidOffer, OrderBook};

pub struct MarketDataService {
    books: HashMap<String, OrderBook>,
    listeners: ListenerSet<OrderBook>,
}

impl MarketDataService {
    pub fn new() -> Self {
        Self {
            books: HashMap::new(),
            listeners: ListenerSet::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<OrderBook>>) {
        self.listeners.add(listener);
    }

    /// Current book for a product
    pub fn get(&self, ticker: &str) -> Result<&OrderBook> {
        self.books
            .get(ticker)
            .ok_or_else(|| ServiceError::NotFound(ticker.to_string()))
    }

    /// Best bid and offer of the current book
    pub fn best_bid_offer(&self, ticker: &str) -> Result<BidOffer> {
        let book = self.get(ticker)?;
        let bid = book
            .best_bid()
            .ok_or_else(|| ServiceError::DegenerateBook(ticker.to_string()))?;
        let offer = book
            .best_offer()
            .ok_or_else(|| ServiceError::DegenerateBook(ticker.to_string()))?;
        Ok(BidOffer {
            bid: bid.clone(),
            offer: offer.clone(),
        })
    }

    /// Replace the product's book, then publish it
    pub fn on_order_book(&mut self, book: OrderBook) {
        self.books
            .insert(book.product.ticker.clone(), book.clone());
        self.listeners.notify(&book);
    }
}

impl Default for MarketDataService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::{Order, PricingSide, Product};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn book(bid: rust_decimal::Decimal, offer: rust_decimal::Decimal) -> OrderBook {
        OrderBook::new(
            Product::new(
                "B02y",
                dec!(0.02),
                NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            ),
            vec![Order::new(bid, 1_000_000, PricingSide::Bid)],
            vec![Order::new(offer, 1_000_000, PricingSide::Offer)],
        )
    }

    #[test]
    fn test_new_book_replaces_previous() {
        let mut service = MarketDataService::new();
        service.on_order_book(book(dec!(99.5), dec!(99.53125)));
        service.on_order_book(book(dec!(99.46875), dec!(99.5)));

        let current = service.get("B02y").unwrap();
        assert_eq!(current.best_bid().unwrap().price, dec!(99.46875));

        let top = service.best_bid_offer("B02y").unwrap();
        assert_eq!(top.bid.price, dec!(99.46875));
        assert_eq!(top.offer.price, dec!(99.5));
    }
}
