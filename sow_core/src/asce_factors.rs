//! # ASCE 7 Wind Factors
//!
//! Factors and coefficients for components-and-cladding roof wind uplift
//! per ASCE 7 (editions 7-10, 7-16, 7-22).
//!
//! ## Overview
//!
//! Velocity pressure at mean roof height combines the exposure, topographic,
//! and directionality factors with the basic wind speed:
//!
//! ```text
//! qh = 0.00256 × Kh × Kzt × Kd × I × V²       (psf, V in mph)
//! p_zone = qh × GCp[zone] × slope adjustment   (psf, uplift negative)
//! ```
//!
//! ## Factor Summary
//!
//! | Factor | Description                  | Typical Values    |
//! |--------|------------------------------|-------------------|
//! | Kh     | Velocity pressure exposure   | 0.57 - 1.2        |
//! | Kzt    | Topographic                  | 1.0 - 1.2         |
//! | Kd     | Directionality (buildings)   | 0.85              |
//! | I      | Importance (risk category)   | 0.87 - 1.15       |
//! | GCp    | External pressure coefficient| -0.9 to -3.2      |
//!
//! ## Reference
//!
//! ASCE 7-16, Chapters 26 (general) and 30 (components and cladding)

use serde::{Deserialize, Serialize};

use crate::errors::{SowError, SowResult};

// ============================================================================
// ASCE Code Section References
// ============================================================================

/// ASCE 7 code section references for wind factors and pressure checks.
///
/// These constants provide traceable references to the Minimum Design Loads
/// standard (section numbers cited from the 7-16 edition).
pub mod asce_ref {
    // Velocity pressure chain
    /// Velocity pressure exposure coefficient Kh
    pub const KH: &str = "ASCE 7 Table 26.10-1";
    /// Topographic factor Kzt
    pub const KZT: &str = "ASCE 7 26.8";
    /// Directionality factor Kd
    pub const KD: &str = "ASCE 7 Table 26.6-1";
    /// Velocity pressure formula
    pub const QH_FORMULA: &str = "ASCE 7 Eq. 26.10-1";

    // Components and cladding
    /// Roof zone external pressure coefficients
    pub const GCP: &str = "ASCE 7 Fig. 30.3-2A";
    /// Corner/perimeter zone dimension 'a'
    pub const ZONE_DIMENSION: &str = "ASCE 7 Fig. 30.3-1";

    // Risk / importance
    /// Risk category definitions
    pub const RISK_CATEGORY: &str = "ASCE 7 Table 1.5-1";
}

/// Directionality factor Kd for buildings (main force-resisting and C&C)
pub const DIRECTIONALITY_FACTOR: f64 = 0.85;

/// ASCE minimum height for the Kh power law (ft); lower heights use Kh at 15 ft
pub const MIN_KH_HEIGHT_FT: f64 = 15.0;

// ============================================================================
// ASCE Edition
// ============================================================================

/// ASCE 7 edition governing coefficient selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AsceVersion {
    /// ASCE 7-10
    #[serde(rename = "7-10")]
    Asce710,

    /// ASCE 7-16 (most jurisdictions on the 2021 I-codes)
    #[default]
    #[serde(rename = "7-16")]
    Asce716,

    /// ASCE 7-22
    #[serde(rename = "7-22")]
    Asce722,
}

impl AsceVersion {
    /// All edition variants for UI selection
    pub const ALL: [AsceVersion; 3] = [
        AsceVersion::Asce710,
        AsceVersion::Asce716,
        AsceVersion::Asce722,
    ];

    /// Get the wire/string code (e.g., "7-16")
    pub fn code(&self) -> &'static str {
        match self {
            AsceVersion::Asce710 => "7-10",
            AsceVersion::Asce716 => "7-16",
            AsceVersion::Asce722 => "7-22",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> SowResult<Self> {
        match s.trim().replace([' ', '_'], "-").as_str() {
            "7-10" | "ASCE-7-10" | "710" => Ok(AsceVersion::Asce710),
            "7-16" | "ASCE-7-16" | "716" => Ok(AsceVersion::Asce716),
            "7-22" | "ASCE-7-22" | "722" => Ok(AsceVersion::Asce722),
            _ => Err(SowError::invalid_input(
                "asce_version",
                s,
                "Expected one of 7-10, 7-16, 7-22",
            )),
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            AsceVersion::Asce710 => "ASCE 7-10",
            AsceVersion::Asce716 => "ASCE 7-16",
            AsceVersion::Asce722 => "ASCE 7-22",
        }
    }
}

impl std::fmt::Display for AsceVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Exposure Category
// ============================================================================

/// Terrain exposure category per ASCE 7 26.7
///
/// Governs the velocity pressure exposure coefficient Kh through the
/// per-category power-law constants (alpha, zg, Kh at 15 ft).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ExposureCategory {
    /// Urban/suburban, wooded terrain
    B,

    /// Open terrain with scattered obstructions (default for most roofs)
    #[default]
    C,

    /// Flat, unobstructed areas and water surfaces
    D,
}

impl ExposureCategory {
    /// All exposure variants for UI selection
    pub const ALL: [ExposureCategory; 3] = [
        ExposureCategory::B,
        ExposureCategory::C,
        ExposureCategory::D,
    ];

    /// Power-law exponent alpha (ASCE 7 Table 26.11-1)
    pub fn alpha(&self) -> f64 {
        match self {
            ExposureCategory::B => 7.0,
            ExposureCategory::C => 9.5,
            ExposureCategory::D => 11.5,
        }
    }

    /// Gradient height zg in feet (ASCE 7 Table 26.11-1)
    pub fn zg_ft(&self) -> f64 {
        match self {
            ExposureCategory::B => 1200.0,
            ExposureCategory::C => 900.0,
            ExposureCategory::D => 700.0,
        }
    }

    /// Kh at the 15 ft reference height
    pub fn kh_15(&self) -> f64 {
        match self {
            ExposureCategory::B => 0.57,
            ExposureCategory::C => 0.85,
            ExposureCategory::D => 1.03,
        }
    }

    /// Velocity pressure exposure coefficient Kh at mean roof height.
    ///
    /// Power-law interpolation anchored at the 15 ft reference value:
    ///
    /// ```text
    /// Kh = Kh15 × (max(h, 15) / 15)^(2α / zg)
    /// ```
    ///
    /// Heights below 15 ft use the 15 ft value per the ASCE minimum.
    pub fn kh(&self, height_ft: f64) -> f64 {
        let h = height_ft.max(MIN_KH_HEIGHT_FT);
        let exponent = 2.0 * self.alpha() / self.zg_ft();
        self.kh_15() * (h / MIN_KH_HEIGHT_FT).powf(exponent)
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> SowResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "B" => Ok(ExposureCategory::B),
            "C" => Ok(ExposureCategory::C),
            "D" => Ok(ExposureCategory::D),
            _ => Err(SowError::invalid_input(
                "exposure_category",
                s,
                "Expected one of B, C, D",
            )),
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            ExposureCategory::B => "B (urban/suburban)",
            ExposureCategory::C => "C (open terrain)",
            ExposureCategory::D => "D (flat/unobstructed)",
        }
    }
}

impl std::fmt::Display for ExposureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Risk Category
// ============================================================================

/// Building risk category per ASCE 7 Table 1.5-1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RiskCategory {
    /// Low hazard to human life (agricultural, minor storage)
    I,

    /// Standard occupancy (default for commercial roofing work)
    #[default]
    II,

    /// Substantial hazard (schools, assembly)
    III,

    /// Essential facilities (hospitals, fire stations)
    IV,
}

impl RiskCategory {
    /// All risk category variants for UI selection
    pub const ALL: [RiskCategory; 4] = [
        RiskCategory::I,
        RiskCategory::II,
        RiskCategory::III,
        RiskCategory::IV,
    ];

    /// Importance factor I applied to velocity pressure
    pub fn importance_factor(&self) -> f64 {
        match self {
            RiskCategory::I => 0.87,
            RiskCategory::II => 1.0,
            RiskCategory::III => 1.15,
            RiskCategory::IV => 1.15,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            RiskCategory::I => "I (low hazard)",
            RiskCategory::II => "II (standard)",
            RiskCategory::III => "III (substantial hazard)",
            RiskCategory::IV => "IV (essential)",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Topographic Factor
// ============================================================================

/// Topographic factor Kzt as a step function of site elevation.
///
/// Simplified banding: not a substitute for a full speed-up analysis of
/// hills, ridges, or escarpments per ASCE 7 26.8.
///
/// | Elevation (ft)  | Kzt  |
/// |-----------------|------|
/// | below 1000      | 1.00 |
/// | 1000 - 2000     | 1.05 |
/// | 2000 - 3000     | 1.10 |
/// | 3000 and above  | 1.20 |
pub fn topographic_factor(elevation_ft: f64) -> f64 {
    if elevation_ft < 1000.0 {
        1.00
    } else if elevation_ft < 2000.0 {
        1.05
    } else if elevation_ft < 3000.0 {
        1.10
    } else {
        1.20
    }
}

// ============================================================================
// Roof Zones and Pressure Coefficients
// ============================================================================

/// Roof zone classification for components-and-cladding uplift.
///
/// Uplift severity increases from the field of the roof out to the corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoofZone {
    /// Zone 1' - interior field
    Zone1Field,
    /// Zone 1 - inner perimeter band
    Zone1Perimeter,
    /// Zone 2 - perimeter band
    Zone2Perimeter,
    /// Zone 3 - corners
    Zone3Corner,
}

impl RoofZone {
    /// All zones ordered from field to corner (increasing uplift severity)
    pub const ALL: [RoofZone; 4] = [
        RoofZone::Zone1Field,
        RoofZone::Zone1Perimeter,
        RoofZone::Zone2Perimeter,
        RoofZone::Zone3Corner,
    ];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            RoofZone::Zone1Field => "Zone 1' (field)",
            RoofZone::Zone1Perimeter => "Zone 1 (perimeter)",
            RoofZone::Zone2Perimeter => "Zone 2 (perimeter)",
            RoofZone::Zone3Corner => "Zone 3 (corner)",
        }
    }
}

impl std::fmt::Display for RoofZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Base external pressure coefficient GCp by edition and roof zone.
///
/// Values are for low-slope roofs (slope at or below 7 degrees); steeper
/// slopes apply [`slope_adjustment`] on top. Negative = uplift/suction.
///
/// 7-22 carries the 7-16 components-and-cladding roof coefficients forward;
/// 7-10 used the older three-zone map, so its inner-perimeter value is the
/// intermediate the original tables interpolated.
pub fn gcp(version: AsceVersion, zone: RoofZone) -> f64 {
    match version {
        AsceVersion::Asce710 => match zone {
            RoofZone::Zone1Field => -1.0,
            RoofZone::Zone1Perimeter => -1.4,
            RoofZone::Zone2Perimeter => -1.8,
            RoofZone::Zone3Corner => -2.8,
        },
        AsceVersion::Asce716 | AsceVersion::Asce722 => match zone {
            RoofZone::Zone1Field => -0.9,
            RoofZone::Zone1Perimeter => -1.7,
            RoofZone::Zone2Perimeter => -2.3,
            RoofZone::Zone3Corner => -3.2,
        },
    }
}

/// Slope threshold below which base table coefficients apply unmodified
pub const LOW_SLOPE_LIMIT_DEG: f64 = 7.0;

/// Multiplier applied to GCp for roof slopes above 7 degrees.
///
/// Linear derating, capped at 20 percent:
///
/// ```text
/// adjustment = 1.0 - min(0.20, slope_deg × 0.01)
/// ```
///
/// Placeholder pending engineering sign-off; this is not a normative ASCE
/// procedure.
// TODO: replace with figure-based GCp selection for sloped roofs (ASCE 7
// Fig. 30.3-2B/C) once the derating is reviewed.
pub fn slope_adjustment(slope_deg: f64) -> f64 {
    if slope_deg <= LOW_SLOPE_LIMIT_DEG {
        1.0
    } else {
        1.0 - (slope_deg * 0.01).min(0.20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kh_floor_at_15_ft() {
        for exposure in ExposureCategory::ALL {
            assert_eq!(exposure.kh(0.0), exposure.kh_15());
            assert_eq!(exposure.kh(10.0), exposure.kh_15());
            assert_eq!(exposure.kh(15.0), exposure.kh_15());
        }
    }

    #[test]
    fn test_kh_monotonic_in_height() {
        for exposure in ExposureCategory::ALL {
            let mut prev = exposure.kh(15.0);
            for h in [20.0, 30.0, 42.0, 60.0, 100.0, 250.0, 500.0] {
                let kh = exposure.kh(h);
                assert!(
                    kh >= prev,
                    "Kh must be non-decreasing: {:?} at {} ft gave {} < {}",
                    exposure,
                    h,
                    kh,
                    prev
                );
                prev = kh;
            }
        }
    }

    #[test]
    fn test_kh_formula_fixture() {
        // Exposure C at 30 ft: Kh = 0.85 * (30/15)^(2*9.5/900)
        let expected = 0.85 * 2.0_f64.powf(2.0 * 9.5 / 900.0);
        assert!((ExposureCategory::C.kh(30.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_topographic_bands() {
        assert_eq!(topographic_factor(0.0), 1.00);
        assert_eq!(topographic_factor(999.9), 1.00);
        assert_eq!(topographic_factor(1000.0), 1.05);
        assert_eq!(topographic_factor(2500.0), 1.10);
        assert_eq!(topographic_factor(3000.0), 1.20);
        assert_eq!(topographic_factor(8000.0), 1.20);
    }

    #[test]
    fn test_gcp_monotonic_field_to_corner() {
        for version in AsceVersion::ALL {
            let mut prev = 0.0;
            for zone in RoofZone::ALL {
                let coeff = gcp(version, zone).abs();
                assert!(
                    coeff >= prev,
                    "|GCp| must grow field to corner for {:?}",
                    version
                );
                prev = coeff;
            }
        }
    }

    #[test]
    fn test_low_slope_unmodified() {
        for slope in [0.0, 2.0, 5.0, 7.0] {
            assert_eq!(slope_adjustment(slope), 1.0);
        }
    }

    #[test]
    fn test_slope_adjustment_capped() {
        assert!((slope_adjustment(10.0) - 0.90).abs() < 1e-12);
        assert!((slope_adjustment(15.0) - 0.85).abs() < 1e-12);
        // 20% cap at and beyond 20 degrees
        assert!((slope_adjustment(20.0) - 0.80).abs() < 1e-12);
        assert!((slope_adjustment(45.0) - 0.80).abs() < 1e-12);
    }

    #[test]
    fn test_version_codes_roundtrip() {
        for version in AsceVersion::ALL {
            assert_eq!(AsceVersion::from_str_flexible(version.code()).unwrap(), version);
        }
        assert!(AsceVersion::from_str_flexible("7-98").is_err());
    }

    #[test]
    fn test_version_serde_literals() {
        let json = serde_json::to_string(&AsceVersion::Asce716).unwrap();
        assert_eq!(json, "\"7-16\"");
        let parsed: AsceVersion = serde_json::from_str("\"7-22\"").unwrap();
        assert_eq!(parsed, AsceVersion::Asce722);
    }

    #[test]
    fn test_exposure_parsing() {
        assert_eq!(
            ExposureCategory::from_str_flexible("c").unwrap(),
            ExposureCategory::C
        );
        assert!(ExposureCategory::from_str_flexible("E").is_err());
    }

    #[test]
    fn test_importance_factors() {
        assert_eq!(RiskCategory::II.importance_factor(), 1.0);
        assert_eq!(RiskCategory::I.importance_factor(), 0.87);
        assert_eq!(RiskCategory::IV.importance_factor(), 1.15);
    }
}
