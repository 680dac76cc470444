//! Per-holding profit and loss metrics.
//!
//! Every figure is recomputed from the full transaction ledger; nothing is
//! carried between calls.

use super::types::{Benchmarks, Holding, Portfolio, Transaction, TransactionKind};
use crate::types::{collect_by_id, Severity};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived metrics for a single holding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HoldingMetrics {
    /// Ticker symbol
    pub symbol: String,
    /// current_price * remaining_qty
    pub current_value: f64,
    /// Total spent on buys, fees included
    pub cost_basis: f64,
    /// Shares bought minus shares sold
    pub remaining_qty: f64,
    /// Quantity-weighted average buy price
    pub avg_buy_price: f64,
    /// Profit locked in by sells
    pub realized_pl: f64,
    /// Paper profit on the remaining shares
    pub unrealized_pl: f64,
    /// Total return percentage, `None` when the cost basis is zero
    pub total_return: Option<f64>,
    /// Sharpe ratio against the portfolio benchmarks
    pub sharpe_ratio: Option<f64>,
    /// Percentage change from the previous close, `None` when unknown
    pub daily_change: Option<f64>,
    /// Return compared to the S&P 500 benchmark
    pub vs_benchmark: Option<BenchmarkComparison>,
    /// More shares sold than bought
    pub oversold: bool,
}

/// How a holding's total return compares to the benchmark return.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkComparison {
    Outperform,
    InLine,
    Underperform,
}

impl BenchmarkComparison {
    pub fn severity(self) -> Severity {
        match self {
            BenchmarkComparison::Outperform => Severity::Success,
            BenchmarkComparison::InLine => Severity::Warning,
            BenchmarkComparison::Underperform => Severity::Danger,
        }
    }
}

/// Running share count after one transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositionPoint {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub quantity: f64,
    pub price: f64,
    /// Shares held after this transaction
    pub position: f64,
}

impl HoldingMetrics {
    /// Calculate metrics for a holding.
    ///
    /// The previous price for the daily change comes from the holding's own
    /// price history, see [`Holding::previous_close`].
    pub fn calculate(holding: &Holding, benchmarks: &Benchmarks) -> Self {
        Self::calculate_with_previous(holding, benchmarks, holding.previous_close())
    }

    /// Calculate metrics with an explicit previous price for the daily change.
    pub fn calculate_with_previous(
        holding: &Holding,
        benchmarks: &Benchmarks,
        previous_price: Option<f64>,
    ) -> Self {
        let txns = &holding.transactions;
        let remaining_qty = remaining_quantity(txns);
        let avg_buy_price = average_buy_price(txns);
        let cost_basis = total_cost_basis(txns);
        let realized_pl = realized_pl(txns);
        let unrealized_pl = unrealized_pl(holding);
        let current_value = if has_buys(txns) {
            holding.current_price * remaining_qty
        } else {
            0.0
        };

        let oversold = remaining_qty < 0.0;
        if oversold {
            tracing::warn!(
                symbol = %holding.symbol,
                remaining_qty,
                "Sold more shares than were bought"
            );
        }

        let total_return = total_return(realized_pl, unrealized_pl, cost_basis);
        let sharpe = if benchmarks.volatility == 0.0 {
            Some(0.0)
        } else {
            total_return
                .map(|r| sharpe_ratio(r, benchmarks.risk_free_rate, benchmarks.volatility))
        };

        Self {
            symbol: holding.symbol.clone(),
            current_value,
            cost_basis,
            remaining_qty,
            avg_buy_price,
            realized_pl,
            unrealized_pl,
            total_return,
            sharpe_ratio: sharpe,
            daily_change: daily_change(holding.current_price, previous_price),
            vs_benchmark: total_return.map(|r| benchmark_comparison(r, benchmarks.sp500_return)),
            oversold,
        }
    }

    /// Combined realized and unrealized P/L.
    pub fn total_pl(&self) -> f64 {
        self.realized_pl + self.unrealized_pl
    }
}

/// Calculate metrics for every holding, keyed by symbol.
pub fn evaluate_portfolio(portfolio: &Portfolio) -> BTreeMap<String, HoldingMetrics> {
    let metrics = collect_by_id(
        portfolio.holdings.iter().map(|h| {
            (
                h.symbol.clone(),
                HoldingMetrics::calculate(h, &portfolio.benchmarks),
            )
        }),
        "holding",
    );

    tracing::debug!(
        investor = %portfolio.investor_id,
        holdings = metrics.len(),
        "Evaluated portfolio"
    );
    metrics
}

/// Average price paid per share across all buys.
///
/// Returns 0 when there are no buys.
pub fn average_buy_price(transactions: &[Transaction]) -> f64 {
    let (cost, quantity) = transactions
        .iter()
        .filter(|t| t.is_buy())
        .fold((0.0, 0.0), |(cost, qty), t| {
            (cost + t.quantity * t.price, qty + t.quantity)
        });

    if quantity == 0.0 {
        0.0
    } else {
        cost / quantity
    }
}

fn has_buys(transactions: &[Transaction]) -> bool {
    transactions.iter().any(|t| t.is_buy() && t.quantity > 0.0)
}

/// Shares bought minus shares sold. Not floored at zero.
pub fn remaining_quantity(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(Transaction::signed_quantity).sum()
}

/// Total cost of all buys, fees included.
pub fn total_cost_basis(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.is_buy())
        .map(|t| t.quantity * t.price + t.fee)
        .sum()
}

/// Profit realized by sells against the all-buys average price, net of fees.
pub fn realized_pl(transactions: &[Transaction]) -> f64 {
    let avg_buy_price = average_buy_price(transactions);
    transactions
        .iter()
        .filter(|t| t.is_sell())
        .map(|t| (t.price - avg_buy_price) * t.quantity - t.fee)
        .sum()
}

/// Paper profit on the shares still held.
///
/// Zero when nothing was ever bought, even if the ledger holds sells.
pub fn unrealized_pl(holding: &Holding) -> f64 {
    if !has_buys(&holding.transactions) {
        return 0.0;
    }
    let remaining = remaining_quantity(&holding.transactions);
    let avg_buy_price = average_buy_price(&holding.transactions);
    holding.current_price * remaining - avg_buy_price * remaining
}

/// Total return percentage.
///
/// Returns `None` when the cost basis is zero.
pub fn total_return(realized_pl: f64, unrealized_pl: f64, cost_basis: f64) -> Option<f64> {
    if cost_basis == 0.0 {
        return None;
    }
    Some((realized_pl + unrealized_pl) / cost_basis * 100.0)
}

/// Calculate the Sharpe ratio of a single return figure.
///
/// # Arguments
///
/// * `return_value` - Total return (percent)
/// * `risk_free_rate` - Risk-free rate in the same unit
/// * `volatility` - Volatility in the same unit
///
/// # Returns
///
/// Excess return per unit of volatility, or 0 when volatility is 0.
pub fn sharpe_ratio(return_value: f64, risk_free_rate: f64, volatility: f64) -> f64 {
    if volatility == 0.0 {
        return 0.0;
    }
    (return_value - risk_free_rate) / volatility
}

/// Percentage change from `previous_price` to `current_price`.
pub fn daily_change(current_price: f64, previous_price: Option<f64>) -> Option<f64> {
    match previous_price {
        Some(prev) if prev != 0.0 => Some((current_price - prev) / prev * 100.0),
        _ => None,
    }
}

/// Compare a return to the benchmark return.
pub fn benchmark_comparison(total_return: f64, benchmark_return: f64) -> BenchmarkComparison {
    if total_return > benchmark_return {
        BenchmarkComparison::Outperform
    } else if total_return < benchmark_return {
        BenchmarkComparison::Underperform
    } else {
        BenchmarkComparison::InLine
    }
}

/// Share count after each transaction, in ledger order.
pub fn position_timeline(transactions: &[Transaction]) -> Vec<PositionPoint> {
    let mut position = 0.0;
    transactions
        .iter()
        .map(|t| {
            position += t.signed_quantity();
            PositionPoint {
                date: t.date,
                kind: t.kind,
                quantity: t.quantity,
                price: t.price,
                position,
            }
        })
        .collect()
}
