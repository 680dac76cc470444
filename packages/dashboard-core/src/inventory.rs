//! Inventory pricing and stock badges.

use crate::config::InventoryConfig;
use crate::discount::Discount;
use crate::types::{collect_by_id, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A color/price variant of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    pub color: String,
    /// List price
    pub price: f64,
    /// Units in stock
    pub stock: u32,
    #[serde(default)]
    pub discount: Option<Discount>,
}

impl Variant {
    pub fn new(color: &str, price: f64, stock: u32, discount: Option<Discount>) -> Self {
        Self {
            color: color.to_string(),
            price,
            stock,
            discount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub rating: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Reviews {
    pub average: f64,
    pub count: u32,
}

/// A catalog product with its variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryProduct {
    pub sku: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<Supplier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Reviews>,
    pub variants: Vec<Variant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// The inventory catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Inventory {
    pub products: Vec<InventoryProduct>,
}

/// Product-level stock badge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
}

/// Derived figures for one variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantMetrics {
    pub color: String,
    pub price: f64,
    pub discounted_price: f64,
    /// e.g. `20%` or `$5.00`; `None` without a discount
    pub discount_label: Option<String>,
    pub stock: u32,
    pub low_stock: bool,
    pub severity: Severity,
}

/// Derived figures for one product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryProductMetrics {
    pub sku: String,
    pub name: String,
    pub variant_count: usize,
    /// Units across all variants
    pub total_stock: u64,
    /// Low when any variant is low
    pub stock_status: StockStatus,
    pub variants: Vec<VariantMetrics>,
}

/// Price of a variant after its discount.
///
/// A percentage discount scales the price, a fixed discount subtracts from it,
/// and no discount leaves it unchanged.
pub fn discounted_price(variant: &Variant) -> f64 {
    Discount::apply_optional(variant.discount.as_ref(), variant.price)
}

/// Whether a variant is below the low-stock threshold.
pub fn is_low_stock(variant: &Variant, config: &InventoryConfig) -> bool {
    variant.stock < config.low_stock_threshold
}

impl VariantMetrics {
    pub fn calculate(variant: &Variant, config: &InventoryConfig) -> Self {
        let low_stock = is_low_stock(variant, config);
        Self {
            color: variant.color.clone(),
            price: variant.price,
            discounted_price: discounted_price(variant),
            discount_label: variant.discount.as_ref().map(Discount::label),
            stock: variant.stock,
            low_stock,
            severity: Severity::flag(low_stock),
        }
    }
}

impl InventoryProductMetrics {
    pub fn calculate(product: &InventoryProduct, config: &InventoryConfig) -> Self {
        let variants: Vec<VariantMetrics> = product
            .variants
            .iter()
            .map(|v| VariantMetrics::calculate(v, config))
            .collect();

        let stock_status = if variants.iter().any(|v| v.low_stock) {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        };

        Self {
            sku: product.sku.clone(),
            name: product.name.clone(),
            variant_count: variants.len(),
            total_stock: variants.iter().map(|v| u64::from(v.stock)).sum(),
            stock_status,
            variants,
        }
    }
}

/// Calculate metrics for every product, keyed by SKU.
pub fn evaluate_inventory(
    inventory: &Inventory,
    config: &InventoryConfig,
) -> BTreeMap<String, InventoryProductMetrics> {
    let metrics = collect_by_id(
        inventory
            .products
            .iter()
            .map(|p| (p.sku.clone(), InventoryProductMetrics::calculate(p, config))),
        "product",
    );

    tracing::debug!(
        products = metrics.len(),
        low_stock = metrics
            .values()
            .filter(|m| m.stock_status == StockStatus::LowStock)
            .count(),
        "Evaluated inventory"
    );
    metrics
}
