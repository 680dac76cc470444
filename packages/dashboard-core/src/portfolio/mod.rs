//! Portfolio metrics module.
//!
//! Derives cost basis, profit and loss, returns and the Sharpe ratio from a
//! holding's transaction ledger, plus portfolio-level weights.

mod metrics;
mod summary;
mod types;

pub use metrics::{
    average_buy_price, benchmark_comparison, daily_change, evaluate_portfolio, position_timeline,
    realized_pl, remaining_quantity, sharpe_ratio, total_cost_basis, total_return, unrealized_pl,
    BenchmarkComparison, HoldingMetrics, PositionPoint,
};
pub use summary::{high_conviction_holdings, PortfolioSummary};
pub use types::{Benchmarks, HistoricalPrice, Holding, Portfolio, Transaction, TransactionKind};
