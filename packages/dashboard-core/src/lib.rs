//! Dashboard Core - Metrics layer for the admin dashboards.
//!
//! Each dashboard page loads one JSON document and derives a handful of
//! business metrics from it. This crate holds those calculations:
//!
//! - **Portfolio**: Cost basis, realized/unrealized P/L, total return, Sharpe ratio
//! - **Factory**: Material shortfall, production cost, margin, bottleneck capacity
//! - **Warehouse**: Line-item discounts, bulk discount, tax, profit margin
//! - **Inventory**: Discounted variant prices and stock badges
//! - **Organization**: Member counts and budget utilization
//! - **Academic**: Enrollment fill and course status
//!
//! Every calculator is a pure function of an already-loaded document.
//!
//! # Example
//!
//! ```rust
//! use dashboard_core::inventory::{discounted_price, Variant};
//! use dashboard_core::Discount;
//!
//! let variant = Variant::new("red", 100.0, 12, Some(Discount::Percentage(20.0)));
//! assert_eq!(discounted_price(&variant), 80.0);
//! ```

pub mod academic;
pub mod config;
pub mod discount;
pub mod document;
pub mod factory;
pub mod inventory;
pub mod organization;
pub mod portfolio;
pub mod types;
pub mod warehouse;

// Re-export commonly used types
pub use config::MetricsConfig;
pub use discount::Discount;
pub use document::{load_document, parse_document};
pub use types::{ApiResponse, Severity};

// Re-export main functionality
pub use academic::{evaluate_academic, CourseMetrics};
pub use factory::{evaluate_factory, ProductMetrics, Resources};
pub use inventory::{discounted_price, evaluate_inventory, InventoryProductMetrics};
pub use organization::{evaluate_organization, DepartmentMetrics};
pub use portfolio::{evaluate_portfolio, HoldingMetrics, PortfolioSummary};
pub use warehouse::{evaluate_warehouse, OrderMetrics};

/// Error types for dashboard-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Material not found: {0}")]
    MaterialNotFound(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for dashboard-core operations.
pub type Result<T> = std::result::Result<T, Error>;
