//! Tunable constants for the metric calculators.
//!
//! Defaults reproduce the numbers the dashboards were built with. A JSON file
//! can override any subset of them:
//!
//! ```json
//! { "warehouse": { "bulk_discount_threshold": 750.0 } }
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that points at the config file.
pub const CONFIG_ENV: &str = "DASHBOARD_CONFIG_FILE";

/// All calculator settings, grouped by dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricsConfig {
    pub portfolio: PortfolioConfig,
    pub factory: FactoryConfig,
    pub warehouse: WarehouseConfig,
    pub inventory: InventoryConfig,
    pub organization: OrganizationConfig,
    pub academic: AcademicConfig,
}

/// Portfolio summary settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Minimum portfolio weight (fraction) for a high-conviction holding
    pub high_conviction_weight: f64,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            high_conviction_weight: 0.05,
        }
    }
}

/// Factory production settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FactoryConfig {
    /// Margin as a fraction of production cost
    pub margin_rate: f64,
    /// Stock above demand times this factor is sufficient
    pub surplus_factor: f64,
    /// Stock below demand times this factor is short
    pub deficit_factor: f64,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            margin_rate: 0.25,
            surplus_factor: 1.1,
            deficit_factor: 0.9,
        }
    }
}

/// Warehouse order settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WarehouseConfig {
    /// Running subtotal above which the bulk discount kicks in
    pub bulk_discount_threshold: f64,
    /// Bulk discount as a fraction of the running subtotal
    pub bulk_discount_rate: f64,
    /// Cost of goods sold as a fraction of the subtotal
    pub cogs_ratio: f64,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            bulk_discount_threshold: 500.0,
            bulk_discount_rate: 0.05,
            cogs_ratio: 0.30,
        }
    }
}

/// Inventory settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InventoryConfig {
    /// Variants with fewer units than this are low on stock
    pub low_stock_threshold: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: 30,
        }
    }
}

/// Organization settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrganizationConfig {
    /// Budget that counts as 100% utilization
    pub budget_cap: f64,
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            budget_cap: 500_000.0,
        }
    }
}

/// Academic records settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AcademicConfig {
    /// Enrollment percentage at which a course is busy
    pub busy_percent: u32,
    /// Enrollment percentage at which a course is critical
    pub critical_percent: u32,
}

impl Default for AcademicConfig {
    fn default() -> Self {
        Self {
            busy_percent: 75,
            critical_percent: 90,
        }
    }
}

impl MetricsConfig {
    /// Get the default config file path.
    ///
    /// Default path: `<config dir>/dashboard/metrics.json`
    /// Can be overridden with the `DASHBOARD_CONFIG_FILE` environment variable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("dashboard/metrics.json"))
            .unwrap_or_else(|| PathBuf::from("metrics.json"))
    }

    /// Load the config from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path())
    }

    /// Load the config from a specific path.
    ///
    /// A missing file yields the defaults. The loaded config is validated.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded metrics config from {}", path.display());
        Ok(config)
    }

    /// Check that every value is within its meaningful range.
    pub fn validate(&self) -> Result<()> {
        check_fraction(
            "portfolio.high_conviction_weight",
            self.portfolio.high_conviction_weight,
        )?;
        check_fraction("warehouse.bulk_discount_rate", self.warehouse.bulk_discount_rate)?;
        check_fraction("warehouse.cogs_ratio", self.warehouse.cogs_ratio)?;
        check_non_negative(
            "warehouse.bulk_discount_threshold",
            self.warehouse.bulk_discount_threshold,
        )?;
        check_non_negative("factory.margin_rate", self.factory.margin_rate)?;
        check_non_negative("factory.surplus_factor", self.factory.surplus_factor)?;
        check_non_negative("factory.deficit_factor", self.factory.deficit_factor)?;

        if self.factory.deficit_factor > self.factory.surplus_factor {
            return Err(Error::InvalidConfig(format!(
                "factory.deficit_factor ({}) exceeds factory.surplus_factor ({})",
                self.factory.deficit_factor, self.factory.surplus_factor
            )));
        }

        if self.organization.budget_cap.is_nan() || self.organization.budget_cap <= 0.0 {
            return Err(Error::InvalidConfig(
                "organization.budget_cap must be positive".to_string(),
            ));
        }

        if self.academic.busy_percent > self.academic.critical_percent {
            return Err(Error::InvalidConfig(format!(
                "academic.busy_percent ({}) exceeds academic.critical_percent ({})",
                self.academic.busy_percent, self.academic.critical_percent
            )));
        }

        Ok(())
    }
}

fn check_fraction(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )))
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must not be negative, got {}",
            name, value
        )))
    }
}
