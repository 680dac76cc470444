//! Portfolio-level aggregates over per-holding metrics.

use super::metrics::HoldingMetrics;
use crate::config::PortfolioConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Portfolio summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioSummary {
    /// Sum of current values across holdings
    pub total_value: f64,
    /// Sum of cost bases across holdings
    pub total_cost_basis: f64,
    /// Sum of realized and unrealized P/L across holdings
    pub total_pl: f64,
    /// Number of holdings
    pub holding_count: usize,
    /// Number of holdings with a positive total P/L
    pub holdings_in_profit: usize,
    /// Number of holdings with a negative total P/L
    pub holdings_in_loss: usize,
    /// Share of total value per symbol
    pub weights: BTreeMap<String, f64>,
    /// Symbols whose weight exceeds the high-conviction threshold
    pub high_conviction: Vec<String>,
}

impl PortfolioSummary {
    /// Summarize the metrics produced by [`super::evaluate_portfolio`].
    pub fn from_metrics(
        metrics: &BTreeMap<String, HoldingMetrics>,
        config: &PortfolioConfig,
    ) -> Self {
        let total_value: f64 = metrics.values().map(|m| m.current_value).sum();
        let weights = Self::position_weights(metrics);

        let high_conviction = weights
            .iter()
            .filter(|&(_, &w)| w > config.high_conviction_weight)
            .map(|(symbol, _)| symbol.clone())
            .collect();

        Self {
            total_value,
            total_cost_basis: metrics.values().map(|m| m.cost_basis).sum(),
            total_pl: metrics.values().map(HoldingMetrics::total_pl).sum(),
            holding_count: metrics.len(),
            holdings_in_profit: metrics.values().filter(|m| m.total_pl() > 0.0).count(),
            holdings_in_loss: metrics.values().filter(|m| m.total_pl() < 0.0).count(),
            weights,
            high_conviction,
        }
    }

    /// Calculate the weight of each holding in the portfolio.
    ///
    /// Empty when the total value is not positive.
    pub fn position_weights(metrics: &BTreeMap<String, HoldingMetrics>) -> BTreeMap<String, f64> {
        let total_value: f64 = metrics.values().map(|m| m.current_value).sum();
        if total_value <= 0.0 {
            return BTreeMap::new();
        }

        metrics
            .iter()
            .map(|(symbol, m)| (symbol.clone(), m.current_value / total_value))
            .collect()
    }
}

/// Keep only the high-conviction holdings.
pub fn high_conviction_holdings(
    metrics: &BTreeMap<String, HoldingMetrics>,
    config: &PortfolioConfig,
) -> BTreeMap<String, HoldingMetrics> {
    let summary = PortfolioSummary::from_metrics(metrics, config);
    metrics
        .iter()
        .filter(|(symbol, _)| summary.high_conviction.contains(symbol))
        .map(|(symbol, m)| (symbol.clone(), m.clone()))
        .collect()
}
