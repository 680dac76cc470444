//! Price discounts shared by the inventory and warehouse dashboards.

use serde::{Deserialize, Serialize};

/// A discount on a unit price.
///
/// Serialized as `{"type": "percentage" | "fixed", "value": <number>}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Discount {
    /// Percentage off the price, 0 to 100.
    Percentage(f64),
    /// Fixed amount off the price.
    Fixed(f64),
}

impl Discount {
    /// Apply the discount to a price.
    pub fn apply(&self, price: f64) -> f64 {
        match *self {
            Discount::Percentage(pct) => price * (1.0 - pct / 100.0),
            Discount::Fixed(amount) => price - amount,
        }
    }

    /// Apply an optional discount, passing the price through when absent.
    pub fn apply_optional(discount: Option<&Discount>, price: f64) -> f64 {
        discount.map_or(price, |d| d.apply(price))
    }

    /// Short label for display, e.g. `20%` or `$5.00`.
    pub fn label(&self) -> String {
        match *self {
            Discount::Percentage(pct) => format!("{}%", pct),
            Discount::Fixed(amount) => format!("${:.2}", amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percentage_discount() {
        assert_relative_eq!(Discount::Percentage(20.0).apply(100.0), 80.0);
        assert_relative_eq!(Discount::Percentage(15.0).apply(40.0), 34.0);
    }

    #[test]
    fn test_fixed_discount() {
        assert_eq!(Discount::Fixed(5.0).apply(50.0), 45.0);
    }

    #[test]
    fn test_no_discount_passthrough() {
        assert_eq!(Discount::apply_optional(None, 50.0), 50.0);
        assert_eq!(
            Discount::apply_optional(Some(&Discount::Fixed(10.0)), 50.0),
            40.0
        );
    }

    #[test]
    fn test_deserialize_tagged() {
        let pct: Discount = serde_json::from_str(r#"{"type":"percentage","value":20}"#).unwrap();
        assert_eq!(pct, Discount::Percentage(20.0));

        let fixed: Discount = serde_json::from_str(r#"{"type":"fixed","value":7.5}"#).unwrap();
        assert_eq!(fixed, Discount::Fixed(7.5));

        let unknown = serde_json::from_str::<Discount>(r#"{"type":"bogo","value":1}"#);
        assert!(unknown.is_err());
    }

    #[test]
    fn test_label() {
        assert_eq!(Discount::Percentage(20.0).label(), "20%");
        assert_eq!(Discount::Fixed(5.0).label(), "$5.00");
    }
}
