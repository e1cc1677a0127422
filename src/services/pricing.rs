//! Pricing service
//!
//! Keyed pass-through: each incoming price supersedes the stored price for
//! its product and is republished to all listeners (GUI throttle and algo
//! streaming downstream).

use std::collections::HashMap;

use crate::common::errors::{Result, ServiceError};
use crate::common::traits::{ListenerSet, ServiceListener};
use crate::common::types::Price;

pub struct PricingService {
    prices: HashMap<String, Price>,
    listeners: ListenerSet<Price>,
}

impl PricingService {
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
            listeners: ListenerSet::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<Price>>) {
        self.listeners.add(listener);
    }

    /// Latest price for a product
    pub fn get(&self, ticker: &str) -> Result<&Price> {
        self.prices
            .get(ticker)
            .ok_or_else(|| ServiceError::NotFound(ticker.to_string()))
    }

    /// Inbound entry point used by the prices adapter
    pub fn on_message(&mut self, price: Price) {
        self.prices
            .insert(price.product.ticker.clone(), price.clone());
        self.listeners.notify(&price);
    }
}

impl Default for PricingService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::Product;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    struct Collector(Arc<Mutex<Vec<Price>>>);

    impl ServiceListener<Price> for Collector {
        fn process_add(&mut self, data: &Price) {
            self.0.lock().unwrap().push(data.clone());
        }
    }

    fn price(mid: rust_decimal::Decimal) -> Price {
        Price {
            product: Product::new(
                "B02y",
                dec!(0.02),
                NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            ),
            mid,
            spread: dec!(0.03125),
        }
    }

    #[test]
    fn test_latest_price_supersedes_and_republishes() {
        let mut service = PricingService::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        service.add_listener(Box::new(Collector(seen.clone())));

        service.on_message(price(dec!(99.5)));
        service.on_message(price(dec!(99.53125)));

        assert_eq!(service.get("B02y").unwrap().mid, dec!(99.53125));
        assert_eq!(seen.lock().unwrap().len(), 2);
        assert!(matches!(
            service.get("B30y").unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }
}
