//! Loading the JSON documents behind each dashboard page.
//!
//! Every page reads one document whose top-level key names the domain, e.g.
//! `{"portfolio": {...}}`. A malformed document fails the whole load.

use crate::academic::AcademicRecords;
use crate::factory::Factory;
use crate::inventory::Inventory;
use crate::organization::Organization;
use crate::portfolio::Portfolio;
use crate::warehouse::Warehouse;
use crate::Result;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioDocument {
    pub portfolio: Portfolio,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactoryDocument {
    pub factory: Factory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<DashboardSettings>,
}

/// Page settings that ride along with the factory document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Reference date for due-date calculations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_date: Option<NaiveDate>,
}

impl FactoryDocument {
    /// The document's own current date, if it carries one.
    pub fn current_date(&self) -> Option<NaiveDate> {
        self.dashboard.as_ref().and_then(|d| d.current_date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseDocument {
    pub warehouse: Warehouse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryDocument {
    pub inventory: Inventory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationDocument {
    pub organization: Organization,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicDocument {
    pub academic_records: AcademicRecords,
}

/// Parse a document from a JSON string.
pub fn parse_document<T: DeserializeOwned>(content: &str) -> Result<T> {
    Ok(serde_json::from_str(content)?)
}

/// Load a document from a JSON file.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    let document = parse_document(&content)?;
    tracing::debug!("Loaded document from {}", path.display());
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetricsConfig;
    use crate::{
        evaluate_academic, evaluate_factory, evaluate_inventory, evaluate_organization,
        evaluate_portfolio, evaluate_warehouse, Error,
    };
    use tempfile::tempdir;

    const PORTFOLIO: &str = include_str!("../fixtures/portfolio.json");
    const FACTORY: &str = include_str!("../fixtures/factory.json");
    const WAREHOUSE: &str = include_str!("../fixtures/warehouse.json");
    const INVENTORY: &str = include_str!("../fixtures/inventory.json");
    const ORGANIZATION: &str = include_str!("../fixtures/organization.json");
    const ACADEMIC: &str = include_str!("../fixtures/academic.json");

    #[test]
    fn test_portfolio_fixture() {
        let doc: PortfolioDocument = parse_document(PORTFOLIO).unwrap();
        let metrics = evaluate_portfolio(&doc.portfolio);

        assert_eq!(metrics.len(), 3);
        let aapl = &metrics["AAPL"];
        assert_eq!(aapl.remaining_qty, 15.0);
        assert!(aapl.daily_change.is_some());
        // TSLA has no price history
        assert!(metrics["TSLA"].daily_change.is_none());
    }

    #[test]
    fn test_factory_fixture() {
        let doc: FactoryDocument = parse_document(FACTORY).unwrap();
        let today = doc.current_date().unwrap();
        assert_eq!(today, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());

        let metrics = evaluate_factory(&doc.factory, today, &MetricsConfig::default().factory)
            .unwrap();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics["P-CHAIR"].max_possible_production, Some(100));
    }

    #[test]
    fn test_warehouse_fixture() {
        let doc: WarehouseDocument = parse_document(WAREHOUSE).unwrap();
        let metrics = evaluate_warehouse(&doc.warehouse, &MetricsConfig::default().warehouse);

        assert_eq!(metrics.len(), 2);
        assert!(metrics["ORD-1001"].bulk_discount_applied);
        assert!(!metrics["ORD-1002"].bulk_discount_applied);
        assert_eq!(metrics["ORD-1002"].low_inventory, vec!["SKU-CABLE"]);
    }

    #[test]
    fn test_inventory_fixture() {
        let doc: InventoryDocument = parse_document(INVENTORY).unwrap();
        let metrics = evaluate_inventory(&doc.inventory, &MetricsConfig::default().inventory);
        assert_eq!(metrics["SKU-TEE"].variants[0].discounted_price, 16.0);
    }

    #[test]
    fn test_organization_fixture() {
        let doc: OrganizationDocument = parse_document(ORGANIZATION).unwrap();
        let metrics =
            evaluate_organization(&doc.organization, &MetricsConfig::default().organization);
        assert_eq!(metrics["D-ENG"].member_count, 3);
    }

    #[test]
    fn test_academic_fixture() {
        let doc: AcademicDocument = parse_document(ACADEMIC).unwrap();
        let metrics = evaluate_academic(&doc.academic_records, &MetricsConfig::default().academic);
        assert!(metrics["CS301"].is_full);
    }

    #[test]
    fn test_wrong_document_shape() {
        let result = parse_document::<FactoryDocument>(PORTFOLIO);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(&path, INVENTORY).unwrap();

        let doc: InventoryDocument = load_document(&path).unwrap();
        assert_eq!(doc.inventory.products.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_document::<InventoryDocument>(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
