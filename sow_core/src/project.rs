//! # Project Data Structures
//!
//! The `SowProject` struct is the root container for a SOW job. Projects
//! serialize to `.sow` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! SowProject
//! ├── meta: ProjectMetadata (version, estimator, job info, timestamps)
//! ├── settings: GlobalSettings (default ASCE edition, exposure, risk)
//! ├── takeoff: TakeoffData (the intake form payload)
//! └── items: HashMap<Uuid, CalculationItem> (saved calculations)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sow_core::project::SowProject;
//!
//! let project = SowProject::new("Dana Estimator", "25-104", "Harborview Logistics");
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("25-104"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::asce_factors::{AsceVersion, ExposureCategory, RiskCategory};
use crate::calculations::CalculationItem;
use crate::takeoff::TakeoffData;

/// Current schema version for .sow files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// This is the top-level struct that gets serialized to `.sow` files.
/// Calculations are stored in a flat UUID-keyed map for O(1) lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SowProject {
    /// Project metadata (version, estimator, job info)
    pub meta: ProjectMetadata,

    /// Global settings (default edition, exposure, risk category)
    pub settings: GlobalSettings,

    /// The takeoff form payload
    pub takeoff: TakeoffData,

    /// Saved calculation inputs, keyed by UUID
    pub items: HashMap<Uuid, CalculationItem>,
}

impl SowProject {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `estimator` - Name of the responsible estimator
    /// * `job_id` - Job/project number (e.g., "25-104")
    /// * `client` - Client name
    pub fn new(
        estimator: impl Into<String>,
        job_id: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        SowProject {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                estimator: estimator.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            takeoff: TakeoffData::default(),
            items: HashMap::new(),
        }
    }

    /// Add a calculation item to the project.
    ///
    /// Returns the UUID assigned to the item.
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation item by UUID.
    ///
    /// Returns the removed item if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get a calculation item by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Number of saved calculations.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl Default for SowProject {
    fn default() -> Self {
        SowProject::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible estimator
    pub estimator: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Last-modified timestamp
    pub modified: DateTime<Utc>,
}

/// Global project settings and defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GlobalSettings {
    /// Default ASCE edition when the jurisdiction leaves it open
    pub default_asce_version: AsceVersion,

    /// Default terrain exposure for wind calculations
    pub default_exposure: ExposureCategory,

    /// Default risk category
    pub default_risk_category: RiskCategory,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::zone_geometry::ZoneGeometryInput;

    #[test]
    fn test_new_project_metadata() {
        let project = SowProject::new("Dana Estimator", "25-104", "Harborview Logistics");
        assert_eq!(project.meta.estimator, "Dana Estimator");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.item_count(), 0);
    }

    #[test]
    fn test_add_remove_items() {
        let mut project = SowProject::new("E", "25-001", "C");
        let id = project.add_item(CalculationItem::ZoneGeometry(ZoneGeometryInput {
            square_footage: 20000.0,
            building_height: 30.0,
        }));

        assert_eq!(project.item_count(), 1);
        assert!(project.get_item(&id).is_some());

        let removed = project.remove_item(&id);
        assert!(removed.is_some());
        assert_eq!(project.item_count(), 0);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut project = SowProject::new("E", "25-001", "C");
        project.add_item(CalculationItem::ZoneGeometry(ZoneGeometryInput {
            square_footage: 20000.0,
            building_height: 30.0,
        }));

        let json = serde_json::to_string_pretty(&project).unwrap();
        let roundtrip: SowProject = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.item_count(), 1);
        assert_eq!(roundtrip.meta.job_id, "25-001");
    }
}
