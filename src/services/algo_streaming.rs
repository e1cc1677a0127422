//! Algo streaming service
//!
//! Derives a deterministic two-sided quote from each price: bid at
//! mid - spread/2, offer at mid + spread/2, with a fixed visible and hidden
//! size on each leg. The quote supersedes the previous one for the product.

use std::collections::HashMap;

use rust_decimal_macros::dec;

use crate::common::errors::{Result, ServiceError};
use crate::common::traits::{ListenerSet, ServiceListener};
use crate::common::types::{Price, PriceStream, PriceStreamOrder, PricingSide};

pub struct AlgoStreamingService {
    streams: HashMap<String, PriceStream>,
    quote_size: i64,
    listeners: ListenerSet<PriceStream>,
}

impl AlgoStreamingService {
    pub fn new(quote_size: i64) -> Self {
        Self {
            streams: HashMap::new(),
            quote_size,
            listeners: ListenerSet::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<PriceStream>>) {
        self.listeners.add(listener);
    }

    /// Latest stream for a product
    pub fn get(&self, ticker: &str) -> Result<&PriceStream> {
        self.streams
            .get(ticker)
            .ok_or_else(|| ServiceError::NotFound(ticker.to_string()))
    }

    /// Derive the quote from a price, store it, then publish it
    pub fn publish_price(&mut self, price: &Price) {
        let half_spread = price.spread / dec!(2);
        let stream = PriceStream {
            product: price.product.clone(),
            bid: PriceStreamOrder {
                price: price.mid - half_spread,
                visible_quantity: self.quote_size,
                hidden_quantity: self.quote_size,
                side: PricingSide::Bid,
            },
            offer: PriceStreamOrder {
                price: price.mid + half_spread,
                visible_quantity: self.quote_size,
                hidden_quantity: self.quote_size,
                side: PricingSide::Offer,
            },
        };
        self.streams
            .insert(price.product.ticker.clone(), stream.clone());
        self.listeners.notify(&stream);
    }
}

/// Bridges published prices into the algo streaming service
pub struct AlgoStreamingListener {
    service: AlgoStreamingService,
}

impl AlgoStreamingListener {
    pub fn new(service: AlgoStreamingService) -> Self {
        Self { service }
    }
}

impl ServiceListener<Price> for AlgoStreamingListener {
    fn process_add(&mut self, price: &Price) {
        self.service.publish_price(price);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::Product;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    struct Collector(Arc<Mutex<Vec<PriceStream>>>);

    impl ServiceListener<PriceStream> for Collector {
        fn process_add(&mut self, data: &PriceStream) {
            self.0.lock().unwrap().push(data.clone());
        }
    }

    #[test]
    fn test_quote_brackets_the_mid() {
        let mut service = AlgoStreamingService::new(1_000_000);
        let seen = Arc::new(Mutex::new(Vec::new()));
        service.add_listener(Box::new(Collector(seen.clone())));

        let price = Price {
            product: Product::new(
                "B02y",
                dec!(0.02),
                NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            ),
            mid: dec!(99.5),
            spread: dec!(0.03125),
        };
        service.publish_price(&price);

        let stream = service.get("B02y").unwrap();
        assert_eq!(stream.bid.price, dec!(99.484375));
        assert_eq!(stream.offer.price, dec!(99.515625));
        assert!(stream.bid.price <= price.mid && price.mid <= stream.offer.price);
        assert_eq!(stream.bid.visible_quantity, 1_000_000);
        assert_eq!(stream.bid.hidden_quantity, 1_000_000);
        assert_eq!(stream.offer.visible_quantity, 1_000_000);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_zero_spread_collapses_to_mid() {
        let mut service = AlgoStreamingService::new(1_000_000);
        let price = Price {
            product: Product::new(
                "B02y",
                dec!(0.02),
                NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            ),
            mid: dec!(100),
            spread: dec!(0),
        };
        service.publish_price(&price);

        let stream = service.get("B02y").unwrap();
        assert_eq!(stream.bid.price, dec!(100));
        assert_eq!(stream.offer.price, dec!(100));
    }
}
