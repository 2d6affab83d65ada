//! # Wind Uplift Pressure Calculation
//!
//! Computes zone-by-zone roof uplift pressures for components and cladding
//! per ASCE 7, from location, geometry, and edition inputs.
//!
//! ## Assumptions
//!
//! - Enclosed building, components-and-cladding roof zones
//! - Directionality factor Kd = 0.85 (buildings)
//! - Risk Category II (importance factor 1.0) unless overridden
//! - Topographic factor from the simplified elevation banding (not a
//!   substitute for a full ASCE 26.8 speed-up analysis)
//!
//! ## Example (LLM-friendly)
//!
//! ```rust
//! use sow_core::calculations::wind_pressure::{calculate, WindPressureInput};
//! use sow_core::asce_factors::ExposureCategory;
//! use sow_core::jurisdiction::resolve;
//!
//! let jurisdiction = resolve("Broward", "FL").record;
//!
//! let input = WindPressureInput {
//!     label: "Main Roof".to_string(),
//!     building_height: 42.0,
//!     exposure_category: ExposureCategory::C,
//!     roof_slope: 0.0,
//!     elevation: 10.0,
//!     jurisdiction,
//!     wind_speed: None,
//!     ..Default::default()
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!(result.zone_pressures.zone3_corner < 0.0); // uplift is negative
//! ```

use serde::{Deserialize, Serialize};

use crate::asce_factors::{
    gcp, slope_adjustment, topographic_factor, AsceVersion, ExposureCategory, RiskCategory,
    RoofZone, DIRECTIONALITY_FACTOR,
};
use crate::errors::{SowError, SowResult};
use crate::jurisdiction::JurisdictionRecord;
use crate::units::{Mph, Psf};

/// Velocity pressure constant for V in mph, qh in psf (ASCE 7 Eq. 26.10-1)
pub const VELOCITY_PRESSURE_CONSTANT: f64 = 0.00256;

/// Corner uplift magnitudes below this are implausibly low (psf)
pub const MIN_PLAUSIBLE_CORNER_PSF: f64 = 10.0;

/// Corner uplift magnitudes above this warrant review (psf)
pub const MAX_PLAUSIBLE_CORNER_PSF: f64 = 150.0;

/// Input parameters for the wind uplift calculation.
///
/// Part of the JSON interchange contract: field names serialize camelCase,
/// heights/elevations in feet, slope in degrees, wind speed in mph.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Main Roof",
///   "buildingHeight": 42.0,
///   "exposureCategory": "C",
///   "roofSlope": 0.0,
///   "elevation": 10.0,
///   "jurisdiction": {
///     "county": "Broward",
///     "state": "FL",
///     "codeCycle": "FBC 2023",
///     "asceVersion": "7-22",
///     "hvhz": true,
///     "basicWindSpeed": 170.0
///   },
///   "windSpeed": null,
///   "riskCategory": "II"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WindPressureInput {
    /// User label for this calculation (e.g., "Main Roof", "Penthouse")
    #[serde(default)]
    pub label: String,

    /// Mean roof height in feet
    pub building_height: f64,

    /// Terrain exposure category
    #[serde(default)]
    pub exposure_category: ExposureCategory,

    /// Roof slope in degrees (0 = flat/low-slope)
    #[serde(default)]
    pub roof_slope: f64,

    /// Site elevation above sea level in feet
    #[serde(default)]
    pub elevation: f64,

    /// Resolved jurisdiction supplying code cycle, ASCE edition, wind speed
    pub jurisdiction: JurisdictionRecord,

    /// Optional basic wind speed override in mph (takes precedence over
    /// the jurisdiction's mapped value)
    #[serde(default)]
    pub wind_speed: Option<f64>,

    /// Building risk category (II default)
    #[serde(default)]
    pub risk_category: RiskCategory,
}

impl WindPressureInput {
    /// Validate input parameters.
    ///
    /// Out-of-range physical inputs fail here with the offending field
    /// named; plausibility of the computed output is checked separately
    /// and reported as warnings on the result.
    pub fn validate(&self) -> SowResult<()> {
        if self.building_height <= 0.0 {
            return Err(SowError::invalid_input(
                "buildingHeight",
                self.building_height.to_string(),
                "Building height must be positive",
            ));
        }
        if self.building_height > 500.0 {
            return Err(SowError::invalid_input(
                "buildingHeight",
                self.building_height.to_string(),
                "Building height exceeds 500 ft - outside supported range",
            ));
        }
        if self.roof_slope < 0.0 || self.roof_slope > 45.0 {
            return Err(SowError::invalid_input(
                "roofSlope",
                self.roof_slope.to_string(),
                "Roof slope must be between 0 and 45 degrees",
            ));
        }
        if self.elevation < -300.0 || self.elevation > 15000.0 {
            return Err(SowError::invalid_input(
                "elevation",
                self.elevation.to_string(),
                "Elevation must be between -300 and 15000 ft",
            ));
        }
        if let Some(v) = self.wind_speed {
            if v <= 0.0 || v > 250.0 {
                return Err(SowError::invalid_input(
                    "windSpeed",
                    v.to_string(),
                    "Wind speed override must be between 0 and 250 mph",
                ));
            }
        }
        Ok(())
    }

    /// Basic wind speed used for the calculation: override if present,
    /// otherwise the jurisdiction's mapped value.
    pub fn effective_wind_speed(&self) -> Mph {
        Mph(self.wind_speed.unwrap_or(self.jurisdiction.basic_wind_speed))
    }
}

/// Zone-by-zone design pressures in psf.
///
/// Part of the JSON interchange contract (camelCase on the wire). Sign is
/// preserved from the GCp coefficients: negative = uplift/suction.
///
/// ## JSON Example
///
/// ```json
/// {
///   "zone1Field": -22.4,
///   "zone1Perimeter": -42.3,
///   "zone2Perimeter": -57.2,
///   "zone3Corner": -79.6
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonePressures {
    /// Zone 1' interior field pressure (psf)
    pub zone1_field: f64,

    /// Zone 1 inner perimeter pressure (psf)
    pub zone1_perimeter: f64,

    /// Zone 2 perimeter pressure (psf)
    pub zone2_perimeter: f64,

    /// Zone 3 corner pressure (psf)
    pub zone3_corner: f64,
}

impl ZonePressures {
    /// Pressures ordered field → corner
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.zone1_field,
            self.zone1_perimeter,
            self.zone2_perimeter,
            self.zone3_corner,
        ]
    }

    /// Pressure for a specific zone
    pub fn get(&self, zone: RoofZone) -> Psf {
        Psf(match zone {
            RoofZone::Zone1Field => self.zone1_field,
            RoofZone::Zone1Perimeter => self.zone1_perimeter,
            RoofZone::Zone2Perimeter => self.zone2_perimeter,
            RoofZone::Zone3Corner => self.zone3_corner,
        })
    }

    /// Check the field → corner magnitude ordering invariant.
    ///
    /// |zone1Field| ≤ |zone1Perimeter| ≤ |zone2Perimeter| ≤ |zone3Corner|.
    /// A violation indicates a data/formula error upstream.
    pub fn is_monotonic(&self) -> bool {
        let mags = self.as_array().map(f64::abs);
        mags.windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// Governing (largest-magnitude) uplift pressure, the Zone 3 corner
    pub fn governing_uplift(&self) -> Psf {
        Psf(self.zone3_corner)
    }
}

/// Factor breakdown retained for reporting and audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindPressureMetadata {
    /// Velocity pressure exposure coefficient
    pub kh: f64,
    /// Topographic factor
    pub kzt: f64,
    /// Directionality factor
    pub kd: f64,
    /// Importance factor from the risk category
    pub importance_factor: f64,
    /// Basic wind speed used (mph)
    pub wind_speed_mph: f64,
    /// True when an override replaced the jurisdiction's mapped speed
    pub wind_speed_overridden: bool,
    /// ASCE edition that supplied the coefficients
    pub asce_version: AsceVersion,
    /// Exposure category used
    pub exposure_category: ExposureCategory,
    /// GCp slope adjustment multiplier applied (1.0 for low slopes)
    pub slope_adjustment: f64,
}

/// Results from the wind uplift calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindPressureResult {
    /// Zone-by-zone design pressures (psf, uplift negative)
    pub zone_pressures: ZonePressures,

    /// Velocity pressure qh at mean roof height (psf)
    pub velocity_pressure_psf: f64,

    /// Factor breakdown for reporting
    pub metadata: WindPressureMetadata,

    /// Plausibility warnings; never fatal, the caller decides whether to
    /// block on them
    pub warnings: Vec<String>,
}

impl WindPressureResult {
    /// True when the plausibility validator attached warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Calculate zone uplift pressures.
///
/// This is a pure function suitable for LLM invocation. The closed-form
/// chain is:
///
/// 1. `Kh` from exposure and height (floored at 15 ft)
/// 2. `Kzt` from the elevation banding
/// 3. `Kd` = 0.85, `I` from risk category
/// 4. `qh = 0.00256 × Kh × Kzt × Kd × I × V²`
/// 5. `p_zone = qh × GCp[zone] × slope adjustment`
///
/// # Returns
///
/// * `Ok(WindPressureResult)` - pressures, factors, plausibility warnings
/// * `Err(SowError)` - structured error if inputs are out of range
///
/// # Example
///
/// ```rust
/// use sow_core::calculations::wind_pressure::{calculate, WindPressureInput};
/// use sow_core::asce_factors::ExposureCategory;
/// use sow_core::jurisdiction::resolve;
///
/// let input = WindPressureInput {
///     label: "Warehouse".to_string(),
///     building_height: 30.0,
///     exposure_category: ExposureCategory::C,
///     jurisdiction: resolve("Harris", "TX").record,
///     ..Default::default()
/// };
///
/// let result = calculate(&input).unwrap();
/// assert!(result.zone_pressures.is_monotonic());
/// ```
pub fn calculate(input: &WindPressureInput) -> SowResult<WindPressureResult> {
    input.validate()?;

    let version = input.jurisdiction.asce_version;
    let wind_speed = input.effective_wind_speed().value();

    let kh = input.exposure_category.kh(input.building_height);
    let kzt = topographic_factor(input.elevation);
    let kd = DIRECTIONALITY_FACTOR;
    let importance = input.risk_category.importance_factor();

    let qh = VELOCITY_PRESSURE_CONSTANT * kh * kzt * kd * importance * wind_speed * wind_speed;

    let adjustment = slope_adjustment(input.roof_slope);
    let pressure = |zone: RoofZone| qh * gcp(version, zone) * adjustment;

    let zone_pressures = ZonePressures {
        zone1_field: pressure(RoofZone::Zone1Field),
        zone1_perimeter: pressure(RoofZone::Zone1Perimeter),
        zone2_perimeter: pressure(RoofZone::Zone2Perimeter),
        zone3_corner: pressure(RoofZone::Zone3Corner),
    };

    let warnings = plausibility_warnings(&zone_pressures);

    Ok(WindPressureResult {
        zone_pressures,
        velocity_pressure_psf: qh,
        metadata: WindPressureMetadata {
            kh,
            kzt,
            kd,
            importance_factor: importance,
            wind_speed_mph: wind_speed,
            wind_speed_overridden: input.wind_speed.is_some(),
            asce_version: version,
            exposure_category: input.exposure_category,
            slope_adjustment: adjustment,
        },
        warnings,
    })
}

/// Plausibility checks on computed pressures. These attach warnings and
/// never reject the result; the caller decides whether to block.
fn plausibility_warnings(pressures: &ZonePressures) -> Vec<String> {
    let mut warnings = Vec::new();
    let corner = pressures.zone3_corner.abs();

    if corner <= MIN_PLAUSIBLE_CORNER_PSF {
        warnings.push(format!(
            "Corner uplift {:.1} psf is at or below {} psf - verify wind speed and exposure inputs",
            corner, MIN_PLAUSIBLE_CORNER_PSF
        ));
    }
    if corner > MAX_PLAUSIBLE_CORNER_PSF {
        warnings.push(format!(
            "Corner uplift {:.1} psf exceeds {} psf - review before specifying fastening",
            corner, MAX_PLAUSIBLE_CORNER_PSF
        ));
    }
    if !pressures.is_monotonic() {
        warnings.push(
            "Zone pressures are not monotonic field to corner - possible coefficient data error"
                .to_string(),
        );
    }

    warnings
}
