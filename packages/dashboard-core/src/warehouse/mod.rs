//! Warehouse order module.
//!
//! Line-item discounts, the cumulative bulk discount, tax, grand total and
//! profit margin per order.

mod metrics;
mod types;

pub use metrics::{
    discounted_subtotal, evaluate_warehouse, grand_total, gross_value, low_inventory_items,
    profit_margin, tax, OrderMetrics,
};
pub use types::{LineItem, Order, Shipping, Warehouse};
