//! # Wind Calculations
//!
//! This module contains the calculation types. Each calculation follows
//! the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, SowError>` - Pure calculation function
//!
//! ## LLM Integration
//!
//! All types are designed for LLM consumption:
//! - Comprehensive rustdoc with examples
//! - Clean JSON serialization
//! - Structured error responses
//!
//! ## Available Calculations
//!
//! - [`wind_pressure`] - Zone-by-zone roof uplift pressures per ASCE 7
//! - [`zone_geometry`] - Footprint and corner/perimeter zone dimensions

pub mod wind_pressure;
pub mod zone_geometry;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use wind_pressure::{WindPressureInput, WindPressureResult, ZonePressures};
pub use zone_geometry::{ZoneGeometryInput, ZoneGeometryResult};

/// Enum wrapper for all calculation types.
///
/// This allows storing heterogeneous calculations in a single collection
/// while maintaining type safety and clean serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Zone uplift pressure calculation
    WindPressure(WindPressureInput),
    /// Zone geometry estimate
    ZoneGeometry(ZoneGeometryInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::WindPressure(w) => &w.label,
            CalculationItem::ZoneGeometry(_) => "Zone Geometry",
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::WindPressure(_) => "WindPressure",
            CalculationItem::ZoneGeometry(_) => "ZoneGeometry",
        }
    }
}
