//! Static product reference table
//!
//! Seven on-the-run treasury tickers with their coupons and maturities.
//! Built once at startup; every service resolves tickers against it.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use crate::common::errors::{Result, ServiceError};
use crate::common::types::Product;

/// Immutable ticker-to-product lookup
#[derive(Debug, Clone)]
pub struct ProductReference {
    products: HashMap<String, Product>,
}

impl ProductReference {
    /// Build the standard treasury table
    pub fn treasuries() -> Self {
        let products = treasury_products()
            .into_iter()
            .map(|p| (p.ticker.clone(), p))
            .collect();
        Self { products }
    }

    /// Resolve a ticker to its product
    pub fn get(&self, ticker: &str) -> Result<&Product> {
        self.products
            .get(ticker)
            .ok_or_else(|| ServiceError::UnknownProduct(ticker.to_string()))
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.products.contains_key(ticker)
    }

    /// All products in the table, in unspecified order
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Standard set of treasury tickers
pub fn treasury_tickers() -> Vec<&'static str> {
    vec!["B02y", "B03y", "B05y", "B07y", "B10y", "B20y", "B30y"]
}

fn treasury_products() -> Vec<Product> {
    fn maturity(y: i32) -> NaiveDate {
        // Reference maturities all fall on year-end
        NaiveDate::from_ymd_opt(y, 12, 31).expect("valid reference maturity")
    }

    vec![
        Product::new("B02y", dec!(0.02), maturity(2026)),
        Product::new("B03y", dec!(0.025), maturity(2027)),
        Product::new("B05y", dec!(0.03), maturity(2029)),
        Product::new("B07y", dec!(0.035), maturity(2031)),
        Product::new("B10y", dec!(0.04), maturity(2034)),
        Product::new("B20y", dec!(0.045), maturity(2044)),
        Product::new("B30y", dec!(0.05), maturity(2054)),
    ]
}
