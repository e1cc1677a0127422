//! Historical data recording
//!
//! Persists the most recent value for each (domain, key) pair by appending
//! a timestamped, comma-separated record to a sink. Write-only: repeated
//! identical publishes produce repeated entries, never deduplication.
//!
//! The recorder exposes the narrow persistence interface directly and is
//! attached to a publishing service through the generic [`HistoryListener`];
//! no cross-hierarchy casts are involved.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::warn;

use crate::adapters::recorder::RecordSink;
use crate::common::traits::ServiceListener;
use crate::common::types::{ExecutionOrder, Inquiry, Position, Price, PriceStream, Pv01};

/// A domain value that can be appended to a historical sink
pub trait RecordFormat {
    /// Comma-separated record fields, without the timestamp prefix
    fn record_fields(&self) -> String;
}

/// Strip trailing zeros so decimals print the way the legacy files did
fn fmt(value: Decimal) -> Decimal {
    value.normalize()
}

impl RecordFormat for Position {
    fn record_fields(&self) -> String {
        let mut fields = vec![self.product().ticker.clone()];
        fields.extend(self.book_quantities().map(|(_, q)| q.to_string()));
        fields.push(self.aggregate().to_string());
        fields.join(",")
    }
}

impl RecordFormat for Pv01 {
    fn record_fields(&self) -> String {
        format!("{},{}", self.product().ticker, fmt(self.risk_value()))
    }
}

impl RecordFormat for Price {
    fn record_fields(&self) -> String {
        format!("{},{},{}", self.product.ticker, fmt(self.mid), fmt(self.spread))
    }
}

impl RecordFormat for PriceStream {
    fn record_fields(&self) -> String {
        format!(
            "{},{},{}",
            self.product.ticker,
            fmt(self.bid.price),
            fmt(self.offer.price)
        )
    }
}

impl RecordFormat for ExecutionOrder {
    fn record_fields(&self) -> String {
        format!(
            "{},TID_{},{},{},{},{},{}",
            self.product.ticker,
            self.order_id,
            self.order_type,
            self.side.trade_side(),
            fmt(self.price),
            self.visible_quantity,
            self.hidden_quantity
        )
    }
}

impl RecordFormat for Inquiry {
    fn record_fields(&self) -> String {
        let price = self
            .price
            .map(|p| fmt(p).to_string())
            .unwrap_or_else(|| "-1".to_string());
        format!(
            "TID_{},{},{},{},{}",
            self.inquiry_id, self.product.ticker, self.side, price, self.state
        )
    }
}

/// Appends timestamped records for one domain to its sink
pub struct HistoricalService<V: RecordFormat> {
    sink: RecordSink,
    _marker: std::marker::PhantomData<V>,
}

impl<V: RecordFormat> HistoricalService<V> {
    pub fn new(sink: RecordSink) -> Self {
        Self {
            sink,
            _marker: std::marker::PhantomData,
        }
    }

    /// Append one record, prefixed with the current epoch millis
    pub fn persist(&self, data: &V) {
        let line = format!("{},{}", Utc::now().timestamp_millis(), data.record_fields());
        if let Err(e) = self.sink.send_line(line) {
            warn!(?e, "historical record dropped");
        }
    }
}

/// Bridges a publishing service to a historical recorder
pub struct HistoryListener<V: RecordFormat> {
    service: HistoricalService<V>,
}

impl<V: RecordFormat> HistoryListener<V> {
    pub fn new(service: HistoricalService<V>) -> Self {
        Self { service }
    }
}

impl<V: RecordFormat + Send> ServiceListener<V> for HistoryListener<V> {
    fn process_add(&mut self, data: &V) {
        self.service.persist(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::{InquiryState, OrderType, PricingSide, Product, Side};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn product() -> Product {
        Product::new("B02y", dec!(0.02), NaiveDate::from_ymd_opt(2026, 12, 31).unwrap())
    }

    #[test]
    fn test_position_record_lists_books_then_aggregate() {
        let books = vec!["TRSY1".to_string(), "TRSY2".to_string(), "TRSY3".to_string()];
        let mut position = Position::new(product(), &books);
        position.apply("TRSY1", 1_000_000, Side::Buy).unwrap();
        position.apply("TRSY3", 400_000, Side::Sell).unwrap();

        assert_eq!(position.record_fields(), "B02y,1000000,0,-400000,600000");
    }

    #[test]
    fn test_risk_record_carries_total_pv01() {
        let pv01 = Pv01::new(product(), dec!(0.02), 600_000);
        assert_eq!(pv01.record_fields(), "B02y,12000");
    }

    #[test]
    fn test_price_record_normalizes_decimals() {
        let price = Price {
            product: product(),
            mid: dec!(99.50),
            spread: dec!(0.03125),
        };
        assert_eq!(price.record_fields(), "B02y,99.5,0.03125");
    }

    #[test]
    fn test_execution_record_format() {
        let order = ExecutionOrder {
            product: product(),
            side: PricingSide::Bid,
            order_id: "7".to_string(),
            order_type: OrderType::Market,
            price: dec!(99.5),
            visible_quantity: 1_000_000,
            hidden_quantity: 900_000,
            parent_order_id: "7".to_string(),
            is_child_order: false,
        };
        assert_eq!(
            order.record_fields(),
            "B02y,TID_7,MarketOrder,BUY,99.5,1000000,900000"
        );
    }

    #[test]
    fn test_inquiry_record_prints_unset_price_as_sentinel() {
        let inquiry = Inquiry {
            inquiry_id: "INQ1".to_string(),
            product: product(),
            side: Side::Buy,
            quantity: 1_000_000,
            price: None,
            state: InquiryState::Received,
        };
        assert_eq!(inquiry.record_fields(), "TID_INQ1,B02y,BUY,-1,RECEIVED");
    }

    #[tokio::test]
    async fn test_history_listener_appends_through_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("risk.txt");
        let (sink, handle) = crate::adapters::recorder::spawn_sink_writer(path.to_str().unwrap())
            .await
            .unwrap();

        let mut listener = HistoryListener::new(HistoricalService::<Pv01>::new(sink));
        let pv01 = Pv01::new(product(), dec!(0.02), 600_000);
        listener.process_add(&pv01);
        listener.process_add(&pv01);
        drop(listener);
        handle.await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        // Repeated publishes are repeated, not deduplicated
        assert_eq!(lines.len(), 2);
        for line in lines {
            let (ts, rest) = line.split_once(',').unwrap();
            assert!(ts.parse::<i64>().unwrap() > 0);
            assert_eq!(rest, "B02y,12000");
        }
    }
}
