//! # Takeoff Data Validation
//!
//! The takeoff form is the single intake surface for SOW generation. This
//! module defines the takeoff payload and validates it: field-level range
//! and format checks plus the business rules that correlate fields.
//!
//! Validation follows the error taxonomy: out-of-range fields are errors
//! (the workflow stops), while correlations that merely look suspicious
//! (HVHZ outside the Gulf/Atlantic coast, an unusually large roof) are
//! warnings the estimator can override.
//!
//! ## Example
//!
//! ```rust
//! use sow_core::takeoff::TakeoffData;
//!
//! let takeoff = TakeoffData {
//!     project_name: "Sunrise Distribution Center".to_string(),
//!     address: "4100 Commerce Pkwy, Tampa, FL 33605".to_string(),
//!     roof_area: 41300.0,
//!     ..Default::default()
//! };
//!
//! let report = takeoff.validate();
//! assert!(report.is_valid);
//! ```

use serde::{Deserialize, Serialize};

use crate::asce_factors::{AsceVersion, ExposureCategory};
use crate::errors::SowError;
use crate::roofing::{AttachmentMethod, DeckType, InsulationType, MembraneType, WorkType};

/// Building codes the intake form accepts
pub const ALLOWED_BUILDING_CODES: [&str; 4] = ["IBC2021", "IBC2018", "FBC2020", "FBC2023"];

/// States where an HVHZ designation is plausible (Gulf/Atlantic coast)
pub const HVHZ_PLAUSIBLE_STATES: [&str; 5] = ["FL", "TX", "LA", "MS", "AL"];

/// Takeoff form payload.
///
/// Required fields are non-optional; everything else arrives as the form
/// filled it in. Field names match the intake JSON contract (snake_case).
///
/// ## JSON Example
///
/// ```json
/// {
///   "project_name": "Sunrise Distribution Center",
///   "address": "4100 Commerce Pkwy, Tampa, FL 33605",
///   "roof_area": 41300,
///   "membrane_type": "TPO",
///   "fastening_pattern": "Mechanically Attached",
///   "deck_type": "Steel",
///   "building_height": 42,
///   "county": "Hillsborough",
///   "state": "FL"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TakeoffData {
    // === Required ===
    /// Project name (1-100 characters)
    pub project_name: String,

    /// Project street address (10-200 characters)
    pub address: String,

    /// Roof area in square feet (100 - 1,000,000)
    pub roof_area: f64,

    /// Membrane type
    #[serde(default)]
    pub membrane_type: MembraneType,

    /// Fastening pattern / attachment method
    #[serde(default)]
    pub fastening_pattern: AttachmentMethod,

    // === Optional ===
    /// Work scope (recover or tearoff)
    #[serde(default)]
    pub project_type: Option<WorkType>,

    /// Insulation type
    #[serde(default)]
    pub insulation_type: Option<InsulationType>,

    /// Insulation thickness in inches (0-12)
    #[serde(default)]
    pub insulation_thickness: Option<f64>,

    /// Deck type
    #[serde(default)]
    pub deck_type: Option<DeckType>,

    /// Building height in feet (8-500)
    #[serde(default)]
    pub building_height: Option<f64>,

    /// Terrain exposure category
    #[serde(default)]
    pub exposure_category: Option<ExposureCategory>,

    /// High Velocity Hurricane Zone flag (normally derived from the
    /// jurisdiction; a form value here is treated as an assertion)
    #[serde(default)]
    pub hvhz_zone: Option<bool>,

    /// County name
    #[serde(default)]
    pub county: Option<String>,

    /// Two-letter state code
    #[serde(default)]
    pub state: Option<String>,

    /// Building code (e.g., "IBC2021", "FBC2023")
    #[serde(default)]
    pub building_code: Option<String>,

    /// ASCE edition override
    #[serde(default)]
    pub asce_version: Option<AsceVersion>,

    /// Roof slope in degrees
    #[serde(default)]
    pub roof_slope: Option<f64>,

    /// Site elevation in feet
    #[serde(default)]
    pub elevation: Option<f64>,

    /// Basic wind speed override in mph
    #[serde(default)]
    pub wind_speed: Option<f64>,
}

/// Outcome of takeoff validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True when no errors were found (warnings do not block)
    pub is_valid: bool,

    /// Blocking errors, each naming the offending field
    pub errors: Vec<SowError>,

    /// Advisory findings the estimator can override
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Number of blocking errors
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of advisory warnings
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

impl TakeoffData {
    /// Validate the takeoff payload: field rules, then business rules.
    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        self.validate_fields(&mut errors);
        self.validate_business_rules(&mut errors, &mut warnings);

        ValidationReport {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    fn validate_fields(&self, errors: &mut Vec<SowError>) {
        let name_len = self.project_name.chars().count();
        if name_len == 0 {
            errors.push(SowError::missing_field("project_name"));
        } else if name_len > 100 {
            errors.push(SowError::invalid_input(
                "project_name",
                &self.project_name,
                "Maximum length is 100 characters",
            ));
        }

        let addr_len = self.address.chars().count();
        if addr_len < 10 {
            errors.push(SowError::invalid_input(
                "address",
                &self.address,
                "Minimum length is 10 characters",
            ));
        } else if addr_len > 200 {
            errors.push(SowError::invalid_input(
                "address",
                &self.address,
                "Maximum length is 200 characters",
            ));
        }

        if self.roof_area < 100.0 || self.roof_area > 1_000_000.0 {
            errors.push(SowError::invalid_input(
                "roof_area",
                self.roof_area.to_string(),
                "Roof area must be between 100 and 1,000,000 sqft",
            ));
        }

        if let Some(thickness) = self.insulation_thickness {
            if !(0.0..=12.0).contains(&thickness) {
                errors.push(SowError::invalid_input(
                    "insulation_thickness",
                    thickness.to_string(),
                    "Insulation thickness must be between 0 and 12 inches",
                ));
            }
        }

        if let Some(height) = self.building_height {
            if !(8.0..=500.0).contains(&height) {
                errors.push(SowError::invalid_input(
                    "building_height",
                    height.to_string(),
                    "Building height must be between 8 and 500 ft",
                ));
            }
        }

        if let Some(state) = &self.state {
            let valid = state.len() == 2 && state.chars().all(|c| c.is_ascii_uppercase());
            if !valid {
                errors.push(SowError::invalid_input(
                    "state",
                    state,
                    "State must be a two-letter uppercase code",
                ));
            }
        }

        if let Some(code) = &self.building_code {
            if !ALLOWED_BUILDING_CODES.contains(&code.as_str()) {
                errors.push(SowError::invalid_input(
                    "building_code",
                    code,
                    "Expected one of IBC2021, IBC2018, FBC2020, FBC2023",
                ));
            }
        }
    }

    fn validate_business_rules(&self, errors: &mut Vec<SowError>, warnings: &mut Vec<String>) {
        // HVHZ assertion outside the Gulf/Atlantic coast
        if self.hvhz_zone == Some(true) {
            let coastal = self
                .state
                .as_deref()
                .map(|s| HVHZ_PLAUSIBLE_STATES.contains(&s))
                .unwrap_or(false);
            if !coastal {
                warnings.push(
                    "HVHZ zone is typically only required in coastal states - verify designation"
                        .to_string(),
                );
            }
        }

        // Insulation thickness with no insulation
        if self.insulation_type == Some(InsulationType::None)
            && self.insulation_thickness.unwrap_or(0.0) > 0.0
        {
            errors.push(SowError::invalid_input(
                "insulation_thickness",
                self.insulation_thickness.unwrap_or(0.0).to_string(),
                "Insulation thickness cannot be > 0 when insulation type is 'None'",
            ));
        }

        // Tall building in sheltered exposure
        if self.building_height.unwrap_or(0.0) > 60.0
            && self.exposure_category == Some(ExposureCategory::B)
        {
            warnings.push(
                "Buildings over 60 ft rarely qualify for exposure B - verify terrain category"
                    .to_string(),
            );
        }

        // Roof area reasonableness
        if self.roof_area > 100_000.0 {
            warnings.push("Very large roof area - please verify measurement".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_takeoff() -> TakeoffData {
        TakeoffData {
            project_name: "Sunrise Distribution Center".to_string(),
            address: "4100 Commerce Pkwy, Tampa, FL 33605".to_string(),
            roof_area: 41300.0,
            membrane_type: MembraneType::Tpo,
            fastening_pattern: AttachmentMethod::MechanicallyAttached,
            deck_type: Some(DeckType::Steel),
            building_height: Some(42.0),
            county: Some("Hillsborough".to_string()),
            state: Some("FL".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_takeoff_passes() {
        let report = valid_takeoff().validate();
        assert!(report.is_valid);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn test_missing_name_and_short_address() {
        let mut takeoff = valid_takeoff();
        takeoff.project_name = String::new();
        takeoff.address = "short".to_string();
        let report = takeoff.validate();

        assert!(!report.is_valid);
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.errors[0].error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_roof_area_bounds() {
        let mut takeoff = valid_takeoff();
        takeoff.roof_area = 50.0;
        assert!(!takeoff.validate().is_valid);

        takeoff.roof_area = 2_000_000.0;
        assert!(!takeoff.validate().is_valid);
    }

    #[test]
    fn test_insulation_contradiction_is_error() {
        let mut takeoff = valid_takeoff();
        takeoff.insulation_type = Some(InsulationType::None);
        takeoff.insulation_thickness = Some(2.5);
        let report = takeoff.validate();

        assert!(!report.is_valid);
        assert!(report.errors[0].to_string().contains("insulation_thickness"));
    }

    #[test]
    fn test_hvhz_outside_coast_is_warning() {
        let mut takeoff = valid_takeoff();
        takeoff.state = Some("CO".to_string());
        takeoff.hvhz_zone = Some(true);
        let report = takeoff.validate();

        assert!(report.is_valid); // warning, not error
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_tall_building_exposure_b_warning() {
        let mut takeoff = valid_takeoff();
        takeoff.building_height = Some(75.0);
        takeoff.exposure_category = Some(ExposureCategory::B);
        let report = takeoff.validate();

        assert!(report.is_valid);
        assert!(report.warnings[0].contains("exposure B"));
    }

    #[test]
    fn test_large_roof_warning() {
        let mut takeoff = valid_takeoff();
        takeoff.roof_area = 250_000.0;
        let report = takeoff.validate();

        assert!(report.is_valid);
        assert!(report.warnings[0].contains("verify measurement"));
    }

    #[test]
    fn test_lowercase_state_rejected() {
        let mut takeoff = valid_takeoff();
        takeoff.state = Some("fl".to_string());
        assert!(!takeoff.validate().is_valid);
    }

    #[test]
    fn test_unknown_building_code_rejected() {
        let mut takeoff = valid_takeoff();
        takeoff.building_code = Some("IBC2009".to_string());
        assert!(!takeoff.validate().is_valid);
    }

    #[test]
    fn test_intake_json_roundtrip() {
        let json = r#"{
            "project_name": "Riverside Logistics Hub",
            "address": "900 Port Road, Savannah, GA 31401",
            "roof_area": 88000,
            "membrane_type": "TPO",
            "fastening_pattern": "Mechanically Attached",
            "deck_type": "Steel",
            "building_height": 38,
            "county": "Chatham",
            "state": "GA"
        }"#;
        let takeoff: TakeoffData = serde_json::from_str(json).unwrap();
        assert_eq!(takeoff.deck_type, Some(DeckType::Steel));
        assert!(takeoff.validate().is_valid);
    }
}
