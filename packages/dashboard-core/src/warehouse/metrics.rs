//! Order totals, tax and profit margin.
//!
//! The bulk discount is applied to the running subtotal after every line that
//! leaves it above the threshold, so line order changes the result.

use super::types::{LineItem, Order, Shipping, Warehouse};
use crate::config::WarehouseConfig;
use crate::types::{collect_by_id, round_cents};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived metrics for one order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderMetrics {
    pub order_id: String,
    /// Units across all lines
    pub item_count: u64,
    /// Undiscounted value of all lines
    pub gross_value: f64,
    /// Discounted lines after bulk discounts
    pub subtotal: f64,
    pub tax: f64,
    pub grand_total: f64,
    /// Profit margin percentage, `None` when the grand total is zero
    pub profit_margin: Option<f64>,
    /// The bulk discount fired at least once
    pub bulk_discount_applied: bool,
    /// SKUs ordered in larger quantities than the warehouse holds
    #[serde(default)]
    pub low_inventory: Vec<String>,
}

impl OrderMetrics {
    /// Calculate metrics for an order.
    pub fn calculate(order: &Order, config: &WarehouseConfig) -> Self {
        let (subtotal, bulk_discount_applied) = discounted_subtotal(&order.items, config);
        let tax = tax(subtotal, &order.shipping);
        let grand_total = grand_total(subtotal, tax, &order.shipping);

        Self {
            order_id: order.order_id.clone(),
            item_count: order.items.iter().map(|i| u64::from(i.quantity)).sum(),
            gross_value: gross_value(&order.items),
            subtotal,
            tax,
            grand_total,
            profit_margin: profit_margin(grand_total, subtotal, config.cogs_ratio),
            bulk_discount_applied,
            low_inventory: Vec::new(),
        }
    }

    /// Flag lines the warehouse cannot fill from stock.
    pub fn with_inventory(mut self, order: &Order, inventory: &BTreeMap<String, u32>) -> Self {
        self.low_inventory = low_inventory_items(order, inventory);
        self
    }
}

/// Calculate metrics for every order, keyed by order id.
pub fn evaluate_warehouse(
    warehouse: &Warehouse,
    config: &WarehouseConfig,
) -> BTreeMap<String, OrderMetrics> {
    let metrics = collect_by_id(
        warehouse.orders.iter().map(|order| {
            let m = OrderMetrics::calculate(order, config)
                .with_inventory(order, &warehouse.inventory);
            (order.order_id.clone(), m)
        }),
        "order",
    );

    tracing::debug!(
        orders = metrics.len(),
        bulk = metrics.values().filter(|m| m.bulk_discount_applied).count(),
        "Evaluated warehouse"
    );
    metrics
}

/// Subtotal of discounted lines with the cumulative bulk discount.
///
/// Walks the lines in order. After adding each line, a running total above
/// the threshold is cut by the bulk rate, then rounded to cents.
///
/// # Returns
///
/// The subtotal and whether the bulk discount fired.
pub fn discounted_subtotal(items: &[LineItem], config: &WarehouseConfig) -> (f64, bool) {
    let mut total = 0.0;
    let mut applied = false;

    for item in items {
        total += item.line_total();
        if total > config.bulk_discount_threshold {
            total -= total * config.bulk_discount_rate;
            applied = true;
        }
        total = round_cents(total);
    }

    (total, applied)
}

/// Undiscounted value of all lines.
pub fn gross_value(items: &[LineItem]) -> f64 {
    items.iter().fold(0.0, |total, item| {
        round_cents(total + f64::from(item.quantity) * item.unit_price)
    })
}

/// Tax on the subtotal plus shipping.
pub fn tax(subtotal: f64, shipping: &Shipping) -> f64 {
    (subtotal + shipping.cost) * shipping.tax_rate / 100.0
}

/// Subtotal plus shipping and tax, minus the promo discount.
pub fn grand_total(subtotal: f64, tax: f64, shipping: &Shipping) -> f64 {
    subtotal + shipping.cost + tax - shipping.promo_discount()
}

/// Profit margin percentage with COGS as a fixed share of the subtotal.
pub fn profit_margin(grand_total: f64, subtotal: f64, cogs_ratio: f64) -> Option<f64> {
    if grand_total == 0.0 {
        return None;
    }
    let cogs = subtotal * cogs_ratio;
    Some((grand_total - cogs) / grand_total * 100.0)
}

/// SKUs whose stock is below the ordered quantity. Unknown SKUs have no stock.
pub fn low_inventory_items(order: &Order, inventory: &BTreeMap<String, u32>) -> Vec<String> {
    order
        .items
        .iter()
        .filter(|item| inventory.get(&item.sku).copied().unwrap_or(0) < item.quantity)
        .map(|item| item.sku.clone())
        .collect()
}
