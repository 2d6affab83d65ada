//! # Roof Zone Geometry Estimate
//!
//! Estimates a rectangular footprint from total roof area and derives the
//! ASCE corner/perimeter zone dimensions and advisory area percentages.
//!
//! This is a simplified envelope estimate used to attach zone-area
//! percentages to the output, not to re-derive pressures. The footprint
//! assumes a fixed 1.2:1 aspect ratio when only square footage is known.
//!
//! ## Example
//!
//! ```rust
//! use sow_core::calculations::zone_geometry::{calculate, ZoneGeometryInput};
//!
//! let input = ZoneGeometryInput {
//!     square_footage: 41300.0,
//!     building_height: 42.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.zones.corner_dimension_ft - 16.8).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{SowError, SowResult};

/// Assumed length:width ratio when estimating a footprint from area alone
pub const ASPECT_RATIO: f64 = 1.2;

/// Corner zone dimension bounds in feet
pub const CORNER_DIMENSION_BOUNDS_FT: (f64, f64) = (3.0, 40.0);

/// Perimeter zone width bounds in feet
pub const PERIMETER_WIDTH_BOUNDS_FT: (f64, f64) = (6.0, 50.0);

/// Input parameters for the zone geometry estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZoneGeometryInput {
    /// Total roof area in square feet
    pub square_footage: f64,

    /// Mean roof height in feet
    pub building_height: f64,
}

impl ZoneGeometryInput {
    /// Validate input parameters.
    pub fn validate(&self) -> SowResult<()> {
        if self.square_footage < 100.0 {
            return Err(SowError::invalid_input(
                "square_footage",
                self.square_footage.to_string(),
                "Roof area must be at least 100 sqft",
            ));
        }
        if self.square_footage > 1_000_000.0 {
            return Err(SowError::invalid_input(
                "square_footage",
                self.square_footage.to_string(),
                "Roof area exceeds 1,000,000 sqft - outside supported range",
            ));
        }
        if self.building_height <= 0.0 {
            return Err(SowError::invalid_input(
                "building_height",
                self.building_height.to_string(),
                "Building height must be positive",
            ));
        }
        Ok(())
    }
}

/// Estimated rectangular footprint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BuildingFootprint {
    /// Estimated length in feet (the longer side)
    pub length_ft: f64,
    /// Estimated width in feet
    pub width_ft: f64,
    /// Total area in square feet
    pub area_sqft: f64,
}

/// Derived zone dimensions and advisory area split.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZoneDimensions {
    /// ASCE corner zone dimension 'a' in feet
    pub corner_dimension_ft: f64,

    /// Perimeter band width in feet
    pub perimeter_width_ft: f64,

    /// Combined area of the four corner squares (sqft)
    pub corner_area_sqft: f64,

    /// Perimeter band area excluding corners (sqft)
    pub perimeter_area_sqft: f64,

    /// Remaining interior field area (sqft)
    pub field_area_sqft: f64,

    /// Corner share of total area (percent)
    pub corner_percent: f64,

    /// Perimeter share of total area (percent)
    pub perimeter_percent: f64,

    /// Field share of total area (percent)
    pub field_percent: f64,
}

/// Results from the zone geometry estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZoneGeometryResult {
    /// Estimated footprint
    pub building: BuildingFootprint,

    /// Zone dimensions and area split
    pub zones: ZoneDimensions,
}

fn clamp(value: f64, bounds: (f64, f64)) -> f64 {
    value.max(bounds.0).min(bounds.1)
}

/// Estimate the footprint and ASCE zone dimensions.
///
/// Corner dimension: `clamp(min(0.1·min(L,W), 0.4·h), 3, 40)` ft.
/// Perimeter width: `clamp(min(0.2·min(L,W), 0.8·h), 6, 50)` ft.
pub fn calculate(input: &ZoneGeometryInput) -> SowResult<ZoneGeometryResult> {
    input.validate()?;

    let width = (input.square_footage / ASPECT_RATIO).sqrt();
    let length = ASPECT_RATIO * width;
    let least_dimension = width.min(length);

    let corner_dim = clamp(
        (0.1 * least_dimension).min(0.4 * input.building_height),
        CORNER_DIMENSION_BOUNDS_FT,
    );
    let perimeter_width = clamp(
        (0.2 * least_dimension).min(0.8 * input.building_height),
        PERIMETER_WIDTH_BOUNDS_FT,
    );

    let total = input.square_footage;
    let corner_area = (4.0 * corner_dim * corner_dim).min(total);
    // Perimeter band around the edge, less the band overlap and corners
    let band = 2.0 * (length + width) * perimeter_width - 4.0 * perimeter_width * perimeter_width;
    let perimeter_area = (band - corner_area).max(0.0).min(total - corner_area);
    let field_area = (total - corner_area - perimeter_area).max(0.0);

    let percent = |area: f64| 100.0 * area / total;

    Ok(ZoneGeometryResult {
        building: BuildingFootprint {
            length_ft: length,
            width_ft: width,
            area_sqft: total,
        },
        zones: ZoneDimensions {
            corner_dimension_ft: corner_dim,
            perimeter_width_ft: perimeter_width,
            corner_area_sqft: corner_area,
            perimeter_area_sqft: perimeter_area,
            field_area_sqft: field_area,
            corner_percent: percent(corner_area),
            perimeter_percent: percent(perimeter_area),
            field_percent: percent(field_area),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_41300_sqft_at_42_ft() {
        let input = ZoneGeometryInput {
            square_footage: 41300.0,
            building_height: 42.0,
        };
        let result = calculate(&input).unwrap();

        let width = (41300.0_f64 / 1.2).sqrt();
        let expected_corner = (0.1 * width).min(0.4 * 42.0).clamp(3.0, 40.0);
        let expected_perimeter = (0.2 * width).min(0.8 * 42.0).clamp(6.0, 50.0);

        assert!((result.zones.corner_dimension_ft - expected_corner).abs() < 1e-9);
        assert!((result.zones.corner_dimension_ft - 16.8).abs() < 1e-9);
        assert!((result.zones.perimeter_width_ft - expected_perimeter).abs() < 1e-9);
        assert!((result.zones.perimeter_width_ft - 33.6).abs() < 1e-9);
    }

    #[test]
    fn test_aspect_ratio_preserved() {
        let input = ZoneGeometryInput {
            square_footage: 24000.0,
            building_height: 25.0,
        };
        let result = calculate(&input).unwrap();
        let b = result.building;

        assert!((b.length_ft / b.width_ft - ASPECT_RATIO).abs() < 1e-9);
        assert!((b.length_ft * b.width_ft - 24000.0).abs() < 1e-6);
    }

    #[test]
    fn test_corner_dimension_floor() {
        // Tiny low building: 0.4 * h governs but never below 3 ft
        let input = ZoneGeometryInput {
            square_footage: 400.0,
            building_height: 1.0,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.zones.corner_dimension_ft, 3.0);
        assert_eq!(result.zones.perimeter_width_ft, 6.0);
    }

    #[test]
    fn test_corner_dimension_cap() {
        // Very large, very tall building: capped at 40/50 ft
        let input = ZoneGeometryInput {
            square_footage: 900_000.0,
            building_height: 400.0,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.zones.corner_dimension_ft, 40.0);
        assert_eq!(result.zones.perimeter_width_ft, 50.0);
    }

    #[test]
    fn test_areas_partition_total() {
        let input = ZoneGeometryInput {
            square_footage: 41300.0,
            building_height: 42.0,
        };
        let result = calculate(&input).unwrap();
        let z = result.zones;

        let sum = z.corner_area_sqft + z.perimeter_area_sqft + z.field_area_sqft;
        assert!((sum - 41300.0).abs() < 1e-6);
        assert!((z.corner_percent + z.perimeter_percent + z.field_percent - 100.0).abs() < 1e-6);
        assert!(z.field_area_sqft > 0.0);
    }

    #[test]
    fn test_small_area_rejected() {
        let input = ZoneGeometryInput {
            square_footage: 50.0,
            building_height: 20.0,
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
