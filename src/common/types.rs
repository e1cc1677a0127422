//! Domain types shared across all services

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::{Result, ServiceError};

/// Trade side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Signed multiplier applied to a quantity booked on this side
    pub fn sign(&self) -> i64 {
        match self {
            Side::Buy => 1,
            Side::Sell => -1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Pricing side of a quote or book level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingSide {
    Bid,
    Offer,
}

impl PricingSide {
    /// The trade side an order on this pricing side represents
    pub fn trade_side(&self) -> Side {
        match self {
            PricingSide::Bid => Side::Buy,
            PricingSide::Offer => Side::Sell,
        }
    }
}

/// A fixed-income product from the reference table
///
/// Created at startup and immutable afterwards; services carry copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique ticker within the reference table
    pub ticker: String,
    /// Annual coupon rate
    pub coupon: Decimal,
    /// Maturity date
    pub maturity: NaiveDate,
}

impl Product {
    pub fn new(ticker: impl Into<String>, coupon: Decimal, maturity: NaiveDate) -> Self {
        Self {
            ticker: ticker.into(),
            coupon,
            maturity,
        }
    }
}

/// A booked trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub product: Product,
    /// Unique trade identifier
    pub trade_id: String,
    /// Book the trade is allocated to
    pub book: String,
    /// Execution price
    pub price: Decimal,
    /// Traded quantity, always positive; the side carries the sign
    pub quantity: i64,
    pub side: Side,
}

/// Per-product position across a fixed set of books
///
/// The book set is fixed at construction; the aggregate is recomputed on
/// demand from the per-book quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    product: Product,
    books: BTreeMap<String, i64>,
}

impl Position {
    /// Create a flat position over the given books
    pub fn new(product: Product, books: &[String]) -> Self {
        let books = books.iter().map(|b| (b.clone(), 0)).collect();
        Self { product, books }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Quantity held in one book
    pub fn quantity(&self, book: &str) -> Result<i64> {
        self.books
            .get(book)
            .copied()
            .ok_or_else(|| ServiceError::UnknownBook(book.to_string()))
    }

    /// Per-book quantities in book-name order
    pub fn book_quantities(&self) -> impl Iterator<Item = (&str, i64)> {
        self.books.iter().map(|(b, q)| (b.as_str(), *q))
    }

    /// Sum of all per-book quantities
    pub fn aggregate(&self) -> i64 {
        self.books.values().sum()
    }

    /// Apply a signed trade quantity to one book
    pub fn apply(&mut self, book: &str, quantity: i64, side: Side) -> Result<()> {
        let entry = self
            .books
            .get_mut(book)
            .ok_or_else(|| ServiceError::UnknownBook(book.to_string()))?;
        *entry += side.sign() * quantity;
        Ok(())
    }
}

/// PV01 risk for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pv01 {
    product: Product,
    /// PV01 sensitivity per unit of quantity
    pv01: Decimal,
    /// Quantity the risk value is associated with
    quantity: i64,
}

impl Pv01 {
    pub fn new(product: Product, pv01: Decimal, quantity: i64) -> Self {
        Self {
            product,
            pv01,
            quantity,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn pv01(&self) -> Decimal {
        self.pv01
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Total risk: per-unit PV01 times quantity
    pub fn risk_value(&self) -> Decimal {
        self.pv01 * Decimal::from(self.quantity)
    }
}

/// A named group of products over which risk is aggregated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketedSector {
    pub name: String,
    /// Tickers of the products in this bucket
    pub tickers: Vec<String>,
}

impl BucketedSector {
    pub fn new(name: impl Into<String>, tickers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            tickers,
        }
    }
}

/// A mid price with its bid/offer spread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub product: Product,
    pub mid: Decimal,
    /// Bid/offer spread around the mid, never negative
    pub spread: Decimal,
}

/// One leg of a two-sided price stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStreamOrder {
    pub price: Decimal,
    pub visible_quantity: i64,
    pub hidden_quantity: i64,
    pub side: PricingSide,
}

/// A two-sided streamed quote derived from a price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStream {
    pub product: Product,
    pub bid: PriceStreamOrder,
    pub offer: PriceStreamOrder,
}

/// A single order book level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub price: Decimal,
    pub quantity: i64,
    pub side: PricingSide,
}

impl Order {
    pub fn new(price: Decimal, quantity: i64, side: PricingSide) -> Self {
        Self {
            price,
            quantity,
            side,
        }
    }
}

/// Full order book for a product
///
/// Both stacks are sorted by price priority with the best level at index 0.
/// Each market-data record replaces the previous book for the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub product: Product,
    /// Bid levels, best (highest) price first
    pub bids: Vec<Order>,
    /// Offer levels, best (lowest) price first
    pub offers: Vec<Order>,
}

impl OrderBook {
    pub fn new(product: Product, bids: Vec<Order>, offers: Vec<Order>) -> Self {
        Self {
            product,
            bids,
            offers,
        }
    }

    /// Best (highest) bid level
    pub fn best_bid(&self) -> Option<&Order> {
        self.bids.first()
    }

    /// Best (lowest) offer level
    pub fn best_offer(&self) -> Option<&Order> {
        self.offers.first()
    }

    /// Spread between the best offer and the best bid
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_offer()) {
            (Some(bid), Some(offer)) => Some(offer.price - bid.price),
            _ => None,
        }
    }
}

/// Best bid and offer snapshot from an order book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidOffer {
    pub bid: Order,
    pub offer: Order,
}

/// Execution order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Fok,
    Ioc,
    Market,
    Limit,
    Stop,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::Fok => write!(f, "FOKOrder"),
            OrderType::Ioc => write!(f, "IOCOrder"),
            OrderType::Market => write!(f, "MarketOrder"),
            OrderType::Limit => write!(f, "LimitOrder"),
            OrderType::Stop => write!(f, "StopOrder"),
        }
    }
}

/// Execution venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Venue {
    Brokertec,
    Espeed,
    Cme,
}

impl std::fmt::Display for Venue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Venue::Brokertec => write!(f, "BROKERTEC"),
            Venue::Espeed => write!(f, "ESPEED"),
            Venue::Cme => write!(f, "CME"),
        }
    }
}

impl std::str::FromStr for Venue {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "BROKERTEC" => Ok(Venue::Brokertec),
            "ESPEED" => Ok(Venue::Espeed),
            "CME" => Ok(Venue::Cme),
            other => Err(ServiceError::Configuration(format!(
                "unknown venue: {other}"
            ))),
        }
    }
}

/// An order emitted by the algo execution decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOrder {
    pub product: Product,
    pub side: PricingSide,
    pub order_id: String,
    pub order_type: OrderType,
    pub price: Decimal,
    pub visible_quantity: i64,
    /// Portion of the size not displayed to the market
    pub hidden_quantity: i64,
    pub parent_order_id: String,
    pub is_child_order: bool,
}

/// Inquiry lifecycle state
///
/// RECEIVED -> QUOTED -> DONE, with REJECTED reachable from RECEIVED or
/// QUOTED. DONE and REJECTED are terminal; state never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InquiryState {
    Received,
    Quoted,
    Done,
    Rejected,
}

impl InquiryState {
    /// Position in the monotonic lifecycle, used to reject regressions
    pub fn rank(&self) -> u8 {
        match self {
            InquiryState::Received => 0,
            InquiryState::Quoted => 1,
            InquiryState::Done => 2,
            InquiryState::Rejected => 2,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, InquiryState::Done | InquiryState::Rejected)
    }
}

impl std::fmt::Display for InquiryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InquiryState::Received => write!(f, "RECEIVED"),
            InquiryState::Quoted => write!(f, "QUOTED"),
            InquiryState::Done => write!(f, "DONE"),
            InquiryState::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// A customer inquiry progressing through the quote state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    pub inquiry_id: String,
    pub product: Product,
    pub side: Side,
    pub quantity: i64,
    /// Quoted price; `None` until the service assigns one
    pub price: Option<Decimal>,
    pub state: InquiryState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product() -> Product {
        Product::new("B02y", dec!(0.02), NaiveDate::from_ymd_opt(2026, 12, 31).unwrap())
    }

    #[test]
    fn test_position_aggregate_sums_books() {
        let books = vec!["TRSY1".to_string(), "TRSY2".to_string(), "TRSY3".to_string()];
        let mut position = Position::new(product(), &books);

        position.apply("TRSY1", 1_000_000, Side::Buy).unwrap();
        position.apply("TRSY2", 400_000, Side::Sell).unwrap();
        position.apply("TRSY1", 200_000, Side::Buy).unwrap();

        assert_eq!(position.quantity("TRSY1").unwrap(), 1_200_000);
        assert_eq!(position.quantity("TRSY2").unwrap(), -400_000);
        assert_eq!(position.quantity("TRSY3").unwrap(), 0);
        assert_eq!(position.aggregate(), 800_000);
    }

    #[test]
    fn test_position_unknown_book_is_an_error() {
        let books = vec!["TRSY1".to_string()];
        let mut position = Position::new(product(), &books);

        let err = position.apply("TRSY9", 1, Side::Buy).unwrap_err();
        assert!(matches!(err, ServiceError::UnknownBook(_)));
        assert_eq!(position.aggregate(), 0);
    }

    #[test]
    fn test_order_book_best_levels_and_spread() {
        let book = OrderBook::new(
            product(),
            vec![
                Order::new(dec!(99.50), 1_000_000, PricingSide::Bid),
                Order::new(dec!(99.46875), 2_000_000, PricingSide::Bid),
            ],
            vec![
                Order::new(dec!(99.5078125), 1_000_000, PricingSide::Offer),
                Order::new(dec!(99.53125), 2_000_000, PricingSide::Offer),
            ],
        );

        assert_eq!(book.best_bid().unwrap().price, dec!(99.50));
        assert_eq!(book.best_offer().unwrap().price, dec!(99.5078125));
        assert_eq!(book.spread(), Some(dec!(0.0078125)));
    }

    #[test]
    fn test_empty_order_book_has_no_spread() {
        let book = OrderBook::new(product(), vec![], vec![]);
        assert!(book.best_bid().is_none());
        assert!(book.best_offer().is_none());
        assert!(book.spread().is_none());
    }

    #[test]
    fn test_pv01_risk_value() {
        let pv01 = Pv01::new(product(), dec!(0.02), 600_000);
        assert_eq!(pv01.risk_value(), dec!(12000.00));
    }

    #[test]
    fn test_inquiry_state_ordering() {
        assert!(InquiryState::Received.rank() < InquiryState::Quoted.rank());
        assert!(InquiryState::Quoted.rank() < InquiryState::Done.rank());
        assert!(InquiryState::Done.is_terminal());
        assert!(InquiryState::Rejected.is_terminal());
        assert!(!InquiryState::Quoted.is_terminal());
    }
}
