//! Production planning metrics.
//!
//! Demand for a material aggregates every order in the backlog. Shortfalls
//! stay per material: different materials are counted in different units.

use super::types::{Factory, FactoryOrder, Material, Product, Resource, Resources};
use crate::config::FactoryConfig;
use crate::types::{collect_by_id, Severity};
use crate::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stock level of a material relative to backlog demand.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MaterialStatus {
    /// Comfortably above demand
    Sufficient,
    /// Roughly equal to demand
    Tight,
    /// Well below demand
    Short,
}

impl MaterialStatus {
    pub fn severity(self) -> Severity {
        match self {
            MaterialStatus::Sufficient => Severity::Success,
            MaterialStatus::Tight => Severity::Warning,
            MaterialStatus::Short => Severity::Danger,
        }
    }
}

/// Breakdown for one material of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialMetrics {
    pub material_id: String,
    /// Units per product, waste included
    pub units_per_product: f64,
    /// Units needed to fill the whole backlog
    pub demand: f64,
    /// Units in stock
    pub stock: f64,
    /// Units missing to fill the backlog
    pub shortfall: f64,
    pub status: MaterialStatus,
    /// Restocking would not arrive before some order is due
    pub needs_reorder: bool,
    /// Products this material alone allows, `None` if it does not constrain output
    pub max_units: Option<u64>,
}

/// Derived metrics for one product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductMetrics {
    pub product_id: String,
    /// Per-material breakdown, in bill-of-materials order
    pub materials: Vec<MaterialMetrics>,
    /// Material cost per unit
    pub material_cost: f64,
    /// Labor cost per unit
    pub labor_cost: f64,
    /// Material plus labor cost per unit
    pub production_cost: f64,
    /// Fixed-rate margin on the production cost
    pub margin: f64,
    /// Units producible from current stock, `None` when unbounded
    pub max_possible_production: Option<u64>,
}

impl ProductMetrics {
    /// Calculate metrics for a product against the factory's stock and backlog.
    ///
    /// # Arguments
    ///
    /// * `product` - Product and its bill of materials
    /// * `resources` - Stock per material
    /// * `orders` - Full order backlog
    /// * `today` - Reference date for reorder alerts
    /// * `config` - Margin rate and stock status factors
    ///
    /// # Errors
    ///
    /// Returns `MaterialNotFound` when a material has no resource.
    pub fn calculate(
        product: &Product,
        resources: &Resources,
        orders: &[FactoryOrder],
        today: NaiveDate,
        config: &FactoryConfig,
    ) -> Result<Self> {
        let mut materials = Vec::with_capacity(product.materials.len());
        for material in &product.materials {
            let resource = resources.get(&material.material_id).inspect_err(|_| {
                tracing::warn!(
                    product = %product.product_id,
                    material = %material.material_id,
                    "Material has no matching resource"
                );
            })?;
            materials.push(material_metrics(material, resource, orders, today, config));
        }

        let material_cost = material_cost(product, resources)?;
        let labor_cost = product.labor.cost();
        let production_cost = material_cost + labor_cost;

        Ok(Self {
            product_id: product.product_id.clone(),
            max_possible_production: materials.iter().filter_map(|m| m.max_units).min(),
            materials,
            material_cost,
            labor_cost,
            production_cost,
            margin: production_cost * config.margin_rate,
        })
    }

    /// Sum of shortfalls across all materials.
    ///
    /// Materials are counted in their own units, so this mixes units. Prefer
    /// the per-material figures in [`ProductMetrics::materials`].
    pub fn total_shortfall(&self) -> f64 {
        self.materials.iter().map(|m| m.shortfall).sum()
    }

    /// Whether any material falls short of backlog demand.
    pub fn has_shortfall(&self) -> bool {
        self.materials.iter().any(|m| m.shortfall > 0.0)
    }

    /// Whether any material needs to be reordered now.
    pub fn needs_reorder(&self) -> bool {
        self.materials.iter().any(|m| m.needs_reorder)
    }
}

/// Calculate metrics for every product, keyed by product id.
///
/// Fails on the first material without a resource.
pub fn evaluate_factory(
    factory: &Factory,
    today: NaiveDate,
    config: &FactoryConfig,
) -> Result<BTreeMap<String, ProductMetrics>> {
    let entries = factory
        .products
        .iter()
        .map(|p| {
            ProductMetrics::calculate(p, &factory.resources, &factory.orders, today, config)
                .map(|m| (p.product_id.clone(), m))
        })
        .collect::<Result<Vec<_>>>()?;
    let metrics = collect_by_id(entries, "product");

    tracing::debug!(
        products = metrics.len(),
        orders = factory.orders.len(),
        %today,
        "Evaluated factory"
    );
    Ok(metrics)
}

fn material_metrics(
    material: &Material,
    resource: &Resource,
    orders: &[FactoryOrder],
    today: NaiveDate,
    config: &FactoryConfig,
) -> MaterialMetrics {
    let demand = material_demand(material, orders);
    MaterialMetrics {
        material_id: material.material_id.clone(),
        units_per_product: material.units_per_product(),
        demand,
        stock: resource.stock,
        shortfall: material_shortfall(demand, resource.stock),
        status: material_status(resource.stock, demand, config),
        needs_reorder: needs_reorder(resource, orders, today),
        max_units: max_units(material, resource),
    }
}

/// Units of a material needed to fill every order in the backlog.
pub fn material_demand(material: &Material, orders: &[FactoryOrder]) -> f64 {
    orders
        .iter()
        .map(|o| o.order_qty * material.units_required * (1.0 + material.waste_factor))
        .sum()
}

/// Units missing after using all stock, never negative.
pub fn material_shortfall(demand: f64, stock: f64) -> f64 {
    (demand - stock).max(0.0)
}

/// Material cost per product unit, waste included.
pub fn material_cost(product: &Product, resources: &Resources) -> Result<f64> {
    product.materials.iter().try_fold(0.0, |acc, material| {
        let resource = resources.get(&material.material_id)?;
        Ok(acc + resource.unit_cost * material.units_per_product())
    })
}

/// Material plus labor cost per product unit.
pub fn production_cost(product: &Product, resources: &Resources) -> Result<f64> {
    Ok(material_cost(product, resources)? + product.labor.cost())
}

/// Units producible from stock, limited by the scarcest material.
///
/// Materials with no per-unit need do not limit output. Returns `None` when
/// nothing limits output.
pub fn max_possible_production(product: &Product, resources: &Resources) -> Result<Option<u64>> {
    let mut bottleneck: Option<u64> = None;
    for material in &product.materials {
        let resource = resources.get(&material.material_id)?;
        if let Some(units) = max_units(material, resource) {
            bottleneck = Some(bottleneck.map_or(units, |b| b.min(units)));
        }
    }
    Ok(bottleneck)
}

fn max_units(material: &Material, resource: &Resource) -> Option<u64> {
    let per_unit = material.units_per_product();
    if per_unit <= 0.0 {
        return None;
    }
    Some((resource.stock / per_unit).floor().max(0.0) as u64)
}

/// Classify stock against demand.
pub fn material_status(stock: f64, demand: f64, config: &FactoryConfig) -> MaterialStatus {
    if stock > demand * config.surplus_factor {
        MaterialStatus::Sufficient
    } else if stock >= demand * config.deficit_factor {
        MaterialStatus::Tight
    } else {
        MaterialStatus::Short
    }
}

/// Whole days from `today` until `due_date`; negative when overdue.
pub fn days_until_due(due_date: NaiveDate, today: NaiveDate) -> i64 {
    (due_date - today).num_days()
}

/// Whether restocking takes longer than the time left on any order.
pub fn needs_reorder(resource: &Resource, orders: &[FactoryOrder], today: NaiveDate) -> bool {
    orders
        .iter()
        .any(|o| resource.lead_time > days_until_due(o.due_date, today) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::Labor;
    use crate::Error;
    use approx::assert_relative_eq;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn resources() -> Resources {
        let mut resources = Resources::new();
        resources.insert(
            "A",
            Resource {
                stock: 100.0,
                unit_cost: 2.0,
                lead_time: 7.0,
            },
        );
        resources.insert(
            "B",
            Resource {
                stock: 42.0,
                unit_cost: 4.0,
                lead_time: 14.0,
            },
        );
        resources
    }

    fn product() -> Product {
        Product {
            product_id: "P-100".to_string(),
            materials: vec![Material::new("A", 5.0, 0.0), Material::new("B", 2.0, 0.5)],
            labor: Labor {
                hours: 2.0,
                cost_per_hour: 25.0,
            },
        }
    }

    fn orders() -> Vec<FactoryOrder> {
        vec![
            FactoryOrder::new(10.0, date(5, 10)),
            FactoryOrder::new(5.0, date(6, 30)),
        ]
    }

    #[test]
    fn test_single_material_bottleneck() {
        let mut resources = Resources::new();
        resources.insert(
            "M",
            Resource {
                stock: 100.0,
                unit_cost: 1.0,
                lead_time: 1.0,
            },
        );
        let product = Product {
            product_id: "single".to_string(),
            materials: vec![Material::new("M", 5.0, 0.0)],
            labor: Labor::default(),
        };

        assert_eq!(max_possible_production(&product, &resources).unwrap(), Some(20));
    }

    #[test]
    fn test_bottleneck_with_waste() {
        // A: 100 / 5 = 20, B: 42 / 3 = 14
        assert_eq!(max_possible_production(&product(), &resources()).unwrap(), Some(14));
    }

    #[test]
    fn test_no_materials_is_unbounded() {
        let product = Product {
            product_id: "service".to_string(),
            materials: Vec::new(),
            labor: Labor::default(),
        };
        assert_eq!(max_possible_production(&product, &Resources::new()).unwrap(), None);
    }

    #[test]
    fn test_material_demand_across_orders() {
        let orders = orders();
        assert_eq!(material_demand(&Material::new("A", 5.0, 0.0), &orders), 75.0);
        assert_eq!(material_demand(&Material::new("B", 2.0, 0.5), &orders), 45.0);
        assert_eq!(material_demand(&Material::new("B", 2.0, 0.5), &[]), 0.0);
    }

    #[test]
    fn test_material_shortfall_floored() {
        assert_eq!(material_shortfall(45.0, 42.0), 3.0);
        assert_eq!(material_shortfall(75.0, 100.0), 0.0);
    }

    #[test]
    fn test_production_cost() {
        // A: 2 * 5 = 10, B: 4 * 3 = 12, labor: 50
        assert_eq!(production_cost(&product(), &resources()).unwrap(), 72.0);
    }

    #[test]
    fn test_material_status() {
        let config = FactoryConfig::default();
        assert_eq!(material_status(100.0, 75.0, &config), MaterialStatus::Sufficient);
        assert_eq!(material_status(42.0, 45.0, &config), MaterialStatus::Tight);
        assert_eq!(material_status(10.0, 45.0, &config), MaterialStatus::Short);
        assert_eq!(MaterialStatus::Short.severity(), Severity::Danger);
    }

    #[test]
    fn test_needs_reorder() {
        let today = date(5, 1);
        let resources = resources();
        assert_eq!(days_until_due(date(5, 10), today), 9);
        assert_eq!(days_until_due(date(4, 28), today), -3);

        // Lead time 7 fits before the nearest due date, 14 does not
        assert!(!needs_reorder(resources.get("A").unwrap(), &orders(), today));
        assert!(needs_reorder(resources.get("B").unwrap(), &orders(), today));
    }

    #[test]
    fn test_fractional_lead_time() {
        let today = date(5, 1);
        let due_in_nine = vec![FactoryOrder::new(1.0, date(5, 10))];
        let resource = |lead_time| Resource {
            stock: 1.0,
            unit_cost: 1.0,
            lead_time,
        };

        assert!(!needs_reorder(&resource(9.0), &due_in_nine, today));
        assert!(needs_reorder(&resource(9.5), &due_in_nine, today));
    }

    #[test]
    fn test_product_metrics() {
        let metrics = ProductMetrics::calculate(
            &product(),
            &resources(),
            &orders(),
            date(5, 1),
            &FactoryConfig::default(),
        )
        .unwrap();

        assert_eq!(metrics.product_id, "P-100");
        assert_eq!(metrics.production_cost, 72.0);
        assert_eq!(metrics.margin, 18.0);
        assert_eq!(metrics.max_possible_production, Some(14));

        let b = &metrics.materials[1];
        assert_eq!(b.material_id, "B");
        assert_eq!(b.demand, 45.0);
        assert_eq!(b.shortfall, 3.0);
        assert_eq!(b.status, MaterialStatus::Tight);
        assert!(b.needs_reorder);

        assert!(metrics.has_shortfall());
        assert!(metrics.needs_reorder());
        assert_relative_eq!(metrics.total_shortfall(), 3.0);
    }

    #[test]
    fn test_missing_resource_fails() {
        let mut product = product();
        product.materials.push(Material::new("C", 1.0, 0.0));

        let result = ProductMetrics::calculate(
            &product,
            &resources(),
            &orders(),
            date(5, 1),
            &FactoryConfig::default(),
        );
        assert!(matches!(result, Err(Error::MaterialNotFound(ref id)) if id == "C"));
    }

    #[test]
    fn test_evaluate_factory() {
        let factory = Factory {
            products: vec![product()],
            resources: resources(),
            orders: orders(),
        };

        let metrics = evaluate_factory(&factory, date(5, 1), &FactoryConfig::default()).unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics["P-100"].max_possible_production, Some(14));
    }
}
