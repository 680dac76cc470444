//! Factory production module.
//!
//! Material shortfall, production cost, margin and bottleneck capacity for
//! each product, given stock on hand and the order backlog.

mod metrics;
mod types;

pub use metrics::{
    days_until_due, evaluate_factory, material_cost, material_demand, material_shortfall,
    material_status, max_possible_production, needs_reorder, production_cost, MaterialMetrics,
    MaterialStatus, ProductMetrics,
};
pub use types::{Factory, FactoryOrder, Labor, Material, Product, Resource, Resources};
