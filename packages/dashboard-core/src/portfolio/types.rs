//! Portfolio document types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Transaction direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Buy,
    Sell,
}

/// A single buy or sell in a holding's ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Trade date
    pub date: NaiveDate,
    /// Buy or Sell
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Number of shares
    pub quantity: f64,
    /// Price per share at execution
    pub price: f64,
    /// Brokerage fee for the trade
    #[serde(default)]
    pub fee: f64,
}

impl Transaction {
    /// Create a buy transaction.
    pub fn buy(date: NaiveDate, quantity: f64, price: f64, fee: f64) -> Self {
        Self {
            date,
            kind: TransactionKind::Buy,
            quantity,
            price,
            fee,
        }
    }

    /// Create a sell transaction.
    pub fn sell(date: NaiveDate, quantity: f64, price: f64, fee: f64) -> Self {
        Self {
            date,
            kind: TransactionKind::Sell,
            quantity,
            price,
            fee,
        }
    }

    pub fn is_buy(&self) -> bool {
        self.kind == TransactionKind::Buy
    }

    pub fn is_sell(&self) -> bool {
        self.kind == TransactionKind::Sell
    }

    /// Quantity with sign: positive for buys, negative for sells.
    pub fn signed_quantity(&self) -> f64 {
        match self.kind {
            TransactionKind::Buy => self.quantity,
            TransactionKind::Sell => -self.quantity,
        }
    }
}

/// A daily closing price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoricalPrice {
    pub date: NaiveDate,
    pub close: f64,
}

/// An asset held in the portfolio, described by its full transaction history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Holding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    /// Ticker symbol
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    /// Ledger of trades, assumed in date order
    pub transactions: Vec<Transaction>,
    /// Latest market price
    pub current_price: f64,
    /// Past closing prices, if the document carries them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub historical_prices: Vec<HistoricalPrice>,
}

impl Holding {
    /// Create a holding with no optional metadata.
    pub fn new(symbol: &str, transactions: Vec<Transaction>, current_price: f64) -> Self {
        Self {
            asset_id: None,
            symbol: symbol.to_string(),
            name: None,
            sector: None,
            transactions,
            current_price,
            historical_prices: Vec::new(),
        }
    }

    /// Closing price of the most recent historical entry.
    pub fn previous_close(&self) -> Option<f64> {
        self.historical_prices
            .iter()
            .max_by_key(|p| p.date)
            .map(|p| p.close)
    }
}

/// Portfolio-wide reference figures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Benchmarks {
    /// S&P 500 return used as the comparison bar (percent)
    pub sp500_return: f64,
    /// Risk-free rate (percent)
    pub risk_free_rate: f64,
    /// Volatility used as the Sharpe denominator
    pub volatility: f64,
}

/// An investor's holdings plus benchmarks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Portfolio {
    #[serde(default)]
    pub investor_id: String,
    pub holdings: Vec<Holding>,
    pub benchmarks: Benchmarks,
}
