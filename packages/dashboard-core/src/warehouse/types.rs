//! Warehouse document types.

use crate::discount::Discount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One line of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// List price per unit
    pub unit_price: f64,
    /// Units ordered
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,
}

impl LineItem {
    pub fn new(sku: &str, unit_price: f64, quantity: u32) -> Self {
        Self {
            sku: sku.to_string(),
            name: None,
            unit_price,
            quantity,
            discount: None,
        }
    }

    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Unit price after the line discount.
    pub fn discounted_unit_price(&self) -> f64 {
        let price = Discount::apply_optional(self.discount.as_ref(), self.unit_price);
        if price < 0.0 {
            tracing::warn!(sku = %self.sku, price, "Discount pushes unit price below zero");
        }
        price
    }

    /// Quantity times the discounted unit price.
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.discounted_unit_price()
    }
}

/// Shipping terms of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Shipping {
    /// Shipping charge
    pub cost: f64,
    /// Tax rate in percent
    pub tax_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
    /// Amount taken off the total when a promo code is present
    #[serde(default)]
    pub discount_value: f64,
}

impl Shipping {
    /// Promo discount, zero without a promo code.
    pub fn promo_discount(&self) -> f64 {
        match self.promo_code.as_deref() {
            Some(code) if !code.trim().is_empty() => self.discount_value,
            _ => 0.0,
        }
    }
}

/// A customer order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Line items in entry order
    pub items: Vec<LineItem>,
    pub shipping: Shipping,
}

/// Orders plus units on hand per SKU.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Warehouse {
    pub orders: Vec<Order>,
    #[serde(default)]
    pub inventory: BTreeMap<String, u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discounted_unit_price() {
        let item = LineItem::new("SKU-1", 50.0, 2).with_discount(Discount::Percentage(10.0));
        assert_eq!(item.discounted_unit_price(), 45.0);
        assert_eq!(item.line_total(), 90.0);

        let item = LineItem::new("SKU-2", 50.0, 3).with_discount(Discount::Fixed(5.0));
        assert_eq!(item.line_total(), 135.0);

        let item = LineItem::new("SKU-3", 50.0, 3);
        assert_eq!(item.line_total(), 150.0);
    }

    #[test]
    fn test_promo_discount_requires_code() {
        let mut shipping = Shipping {
            cost: 10.0,
            tax_rate: 8.0,
            promo_code: None,
            discount_value: 15.0,
        };
        assert_eq!(shipping.promo_discount(), 0.0);

        shipping.promo_code = Some(String::new());
        assert_eq!(shipping.promo_discount(), 0.0);

        shipping.promo_code = Some("SPRING".to_string());
        assert_eq!(shipping.promo_discount(), 15.0);
    }

    #[test]
    fn test_deserialize_order() {
        let order: Order = serde_json::from_str(
            r#"{
                "order_id": "ORD-1",
                "date": "2024-04-02",
                "items": [
                    {"sku": "A", "unit_price": 20, "quantity": 2,
                     "discount": {"type": "fixed", "value": 2}},
                    {"sku": "B", "unit_price": 5, "quantity": 1}
                ],
                "shipping": {"cost": 7.5, "tax_rate": 6}
            }"#,
        )
        .unwrap();

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].discount, Some(Discount::Fixed(2.0)));
        assert!(order.items[1].discount.is_none());
        assert!(order.shipping.promo_code.is_none());
    }
}
