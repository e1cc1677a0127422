//! Risk service
//!
//! Recomputes PV01 risk on every position update: a configured per-unit
//! sensitivity times the position's aggregate quantity. Also vends bucketed
//! risk over a named sector, summing the latest value per product on demand.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::common::errors::{Result, ServiceError};
use crate::common::traits::{ListenerSet, ServiceListener};
use crate::common::types::{BucketedSector, Position, Pv01};

pub struct RiskService {
    risk: HashMap<String, Pv01>,
    pv01_per_unit: Decimal,
    listeners: ListenerSet<Pv01>,
}

impl RiskService {
    pub fn new(pv01_per_unit: Decimal) -> Self {
        Self {
            risk: HashMap::new(),
            pv01_per_unit,
            listeners: ListenerSet::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn ServiceListener<Pv01>>) {
        self.listeners.add(listener);
    }

    /// Latest PV01 for a product
    pub fn get(&self, ticker: &str) -> Result<&Pv01> {
        self.risk
            .get(ticker)
            .ok_or_else(|| ServiceError::NotFound(ticker.to_string()))
    }

    /// Recompute risk for an updated position, then publish it
    pub fn add_position(&mut self, position: &Position) {
        let pv01 = Pv01::new(
            position.product().clone(),
            self.pv01_per_unit,
            position.aggregate(),
        );
        self.risk
            .insert(position.product().ticker.clone(), pv01.clone());
        self.listeners.notify(&pv01);
    }

    /// Aggregate PV01 over a sector: the sum of the latest risk value for
    /// each product in the sector's list, re-evaluated on demand. Products
    /// with no risk yet contribute zero.
    pub fn bucketed_risk(&self, sector: &BucketedSector) -> Decimal {
        sector
            .tickers
            .iter()
            .filter_map(|t| self.risk.get(t))
            .map(|pv01| pv01.risk_value())
            .sum()
    }
}

/// Bridges position updates into the risk service
pub struct RiskListener {
    service: RiskService,
}

impl RiskListener {
    pub fn new(service: RiskService) -> Self {
        Self { service }
    }
}

impl ServiceListener<Position> for RiskListener {
    fn process_add(&mut self, position: &Position) {
        self.service.add_position(position);
    }
}
