//! Factory document types.

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A raw material needed to build one unit of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Material {
    /// Key into the resource map
    pub material_id: String,
    /// Units consumed per product unit, before waste
    pub units_required: f64,
    /// Extra fraction lost to waste (0.1 = 10%)
    #[serde(default)]
    pub waste_factor: f64,
}

impl Material {
    pub fn new(material_id: &str, units_required: f64, waste_factor: f64) -> Self {
        Self {
            material_id: material_id.to_string(),
            units_required,
            waste_factor,
        }
    }

    /// Units consumed per product unit, waste included.
    pub fn units_per_product(&self) -> f64 {
        self.units_required * (1.0 + self.waste_factor)
    }
}

/// Labor needed to build one unit of a product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Labor {
    pub hours: f64,
    pub cost_per_hour: f64,
}

impl Labor {
    pub fn cost(&self) -> f64 {
        self.hours * self.cost_per_hour
    }
}

/// A product and its bill of materials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub product_id: String,
    pub materials: Vec<Material>,
    pub labor: Labor,
}

/// Stock on hand for one material.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    /// Units in stock
    pub stock: f64,
    /// Purchase cost per unit
    pub unit_cost: f64,
    /// Days needed to restock, possibly fractional
    pub lead_time: f64,
}

/// Resources keyed by material id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Resources(BTreeMap<String, Resource>);

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the resource for a material.
    pub fn insert(&mut self, material_id: &str, resource: Resource) -> Option<Resource> {
        self.0.insert(material_id.to_string(), resource)
    }

    /// Look up the resource for a material.
    ///
    /// Fails with [`Error::MaterialNotFound`] when the material has no resource.
    pub fn get(&self, material_id: &str) -> Result<&Resource> {
        self.0
            .get(material_id)
            .ok_or_else(|| Error::MaterialNotFound(material_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An order in the production backlog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactoryOrder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// Units ordered
    pub order_qty: f64,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl FactoryOrder {
    pub fn new(order_qty: f64, due_date: NaiveDate) -> Self {
        Self {
            order_id: None,
            product_id: None,
            order_qty,
            due_date,
            status: None,
            priority: None,
        }
    }
}

/// Products, stock and backlog of one factory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Factory {
    pub products: Vec<Product>,
    pub resources: Resources,
    pub orders: Vec<FactoryOrder>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_per_product() {
        let material = Material::new("steel", 4.0, 0.25);
        assert_eq!(material.units_per_product(), 5.0);
    }

    #[test]
    fn test_labor_cost() {
        let labor = Labor {
            hours: 2.5,
            cost_per_hour: 40.0,
        };
        assert_eq!(labor.cost(), 100.0);
    }

    #[test]
    fn test_resource_lookup_miss() {
        let mut resources = Resources::new();
        resources.insert(
            "steel",
            Resource {
                stock: 10.0,
                unit_cost: 3.0,
                lead_time: 5.0,
            },
        );

        assert!(resources.get("steel").is_ok());
        let missing = resources.get("copper");
        assert!(matches!(missing, Err(Error::MaterialNotFound(ref id)) if id == "copper"));
    }

    #[test]
    fn test_resources_deserialize_as_map() {
        let resources: Resources = serde_json::from_str(
            r#"{"M1": {"stock": 500, "unit_cost": 2.5, "lead_time": 7}}"#,
        )
        .unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources.get("M1").unwrap().lead_time, 7.0);
    }

    #[test]
    fn test_fractional_lead_time_parses() {
        let resources: Resources = serde_json::from_str(
            r#"{"M1": {"stock": 80, "unit_cost": 1.25, "lead_time": 3.5}}"#,
        )
        .unwrap();
        assert_eq!(resources.get("M1").unwrap().lead_time, 3.5);
    }
}
