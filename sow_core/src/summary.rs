//! # SOW Summary Assembly
//!
//! Turns a validated takeoff plus the calculation and selection results
//! into the summary document payload: material quantities, rendered
//! sections, duration estimate, and the compliance block.
//!
//! Quantity factors are the estimating team's rules of thumb (fasteners
//! per square foot, adhesive coverage), not manufacturer takeoffs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::wind_pressure::WindPressureResult;
use crate::jurisdiction::JurisdictionRecord;
use crate::sections::SectionSelection;
use crate::takeoff::TakeoffData;

/// Fasteners (and plates) per square foot of roof area
pub const FASTENERS_PER_SQFT: f64 = 4.5;

/// Square feet covered per gallon of bonding adhesive
pub const SQFT_PER_ADHESIVE_GALLON: f64 = 100.0;

/// Estimated shipped weight per square foot (lbs)
pub const WEIGHT_LBS_PER_SQFT: f64 = 1.2;

/// Production rate for the duration estimate (sqft per day)
pub const PRODUCTION_SQFT_PER_DAY: f64 = 2000.0;

/// Material quantity estimate derived from roof area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialEstimate {
    /// Membrane quantity (sqft, equal to roof area before waste factor)
    pub membrane_sq_ft: f64,
    /// Field fastener count
    pub fasteners_count: u64,
    /// Seam/insulation plate count
    pub plates_count: u64,
    /// Bonding adhesive (gallons)
    pub adhesive_gallons: u64,
    /// Estimated shipped weight (lbs)
    pub estimated_weight_lbs: u64,
}

/// Estimate material quantities from the takeoff.
pub fn estimate_materials(takeoff: &TakeoffData) -> MaterialEstimate {
    let area = takeoff.roof_area;
    MaterialEstimate {
        membrane_sq_ft: area,
        fasteners_count: (area * FASTENERS_PER_SQFT) as u64,
        plates_count: (area * FASTENERS_PER_SQFT) as u64,
        adhesive_gallons: (area / SQFT_PER_ADHESIVE_GALLON) as u64,
        estimated_weight_lbs: (area * WEIGHT_LBS_PER_SQFT) as u64,
    }
}

/// Duration estimate in whole days at the standard production rate.
pub fn estimated_duration_days(roof_area_sqft: f64) -> u64 {
    (roof_area_sqft / PRODUCTION_SQFT_PER_DAY) as u64 + 1
}

/// Project header block for the summary document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Project name
    pub name: String,
    /// Project address
    pub address: String,
    /// Generation timestamp
    pub date_generated: DateTime<Utc>,
    /// Roof area (sqft)
    pub roof_area: f64,
    /// Membrane type display name
    pub membrane_type: String,
}

/// Compliance block for the summary document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Compliance {
    /// Governing code cycle, when resolved
    pub building_code: Option<String>,
    /// Governing corner uplift pressure (psf, uplift negative); None = TBD
    pub wind_load_psf: Option<f64>,
    /// HVHZ requirement flag
    pub hvhz_required: bool,
}

/// A rendered document section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedSection {
    /// Section identifier from the rule table
    pub id: String,
    /// Numbered heading (e.g., "3.0 MATERIALS")
    pub heading: String,
    /// Section body
    pub content: String,
}

/// The assembled SOW summary payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SowSummary {
    /// Project header
    pub project_info: ProjectInfo,
    /// Material quantities
    pub materials: MaterialEstimate,
    /// Rendered sections in document order
    pub sections: Vec<RenderedSection>,
    /// Duration estimate (e.g., "21 days")
    pub estimated_duration: String,
    /// Compliance block
    pub compliance: Compliance,
}

/// Assemble the summary from the workflow artifacts.
pub fn generate_summary(
    takeoff: &TakeoffData,
    sections: &SectionSelection,
    wind: Option<&WindPressureResult>,
    jurisdiction: Option<&JurisdictionRecord>,
) -> SowSummary {
    let materials = estimate_materials(takeoff);

    let rendered = sections
        .included
        .iter()
        .enumerate()
        .map(|(i, section)| RenderedSection {
            id: section.id.clone(),
            heading: format!("{}.0 {}", i + 1, section.title.to_uppercase()),
            content: section_content(&section.id, takeoff, &materials, wind),
        })
        .collect();

    SowSummary {
        project_info: ProjectInfo {
            name: takeoff.project_name.clone(),
            address: takeoff.address.clone(),
            date_generated: Utc::now(),
            roof_area: takeoff.roof_area,
            membrane_type: takeoff.membrane_type.display_name().to_string(),
        },
        materials,
        sections: rendered,
        estimated_duration: format!("{} days", estimated_duration_days(takeoff.roof_area)),
        compliance: Compliance {
            building_code: jurisdiction.map(|j| j.code_cycle.clone()),
            wind_load_psf: wind.map(|w| w.zone_pressures.zone3_corner),
            hvhz_required: jurisdiction.map(|j| j.hvhz).or(takeoff.hvhz_zone).unwrap_or(false),
        },
    }
}

/// Boilerplate body text per section id.
fn section_content(
    id: &str,
    takeoff: &TakeoffData,
    materials: &MaterialEstimate,
    wind: Option<&WindPressureResult>,
) -> String {
    match id {
        "project_overview" => format!(
            "This project involves the installation of a {} roofing system at {}. \
             Total roof area: {} square feet.",
            takeoff.membrane_type, takeoff.address, takeoff.roof_area
        ),
        "materials" => format!(
            "Membrane: {} sq ft\nFasteners: {} units\nPlates: {} units\nAdhesive: {} gallons",
            materials.membrane_sq_ft,
            materials.fasteners_count,
            materials.plates_count,
            materials.adhesive_gallons
        ),
        "installation" => format!(
            "Installation shall follow manufacturer specifications for {} systems with \
             {} fastening pattern.",
            takeoff.membrane_type, takeoff.fastening_pattern
        ),
        "fastening_requirements" => match wind {
            Some(w) => format!(
                "Fastening patterns shall be engineered for a corner uplift of {:.1} psf \
                 per the attached wind calculation. Field, perimeter, and corner patterns \
                 vary by zone.",
                w.zone_pressures.zone3_corner.abs()
            ),
            None => "Fastening patterns shall be engineered to the governing wind uplift \
                     pressures once calculated."
                .to_string(),
        },
        "tearoff_requirements" => "Existing roof system shall be removed to the structural deck \
             and disposed of per local regulations. Deck repairs are unit-price work."
            .to_string(),
        "warranty" => "All work shall carry the manufacturer's system warranty and the \
             contractor's workmanship warranty as specified in the contract documents."
            .to_string(),
        _ => "All work shall be subject to pull tests and adhesion tests as required by \
             local building codes and manufacturer specifications."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::{select_sections, SectionContext};

    fn takeoff() -> TakeoffData {
        TakeoffData {
            project_name: "Sunrise Distribution Center".to_string(),
            address: "4100 Commerce Pkwy, Tampa, FL 33605".to_string(),
            roof_area: 41300.0,
            building_height: Some(42.0),
            ..Default::default()
        }
    }

    fn sections_for(takeoff: &TakeoffData) -> SectionSelection {
        select_sections(&SectionContext {
            takeoff: takeoff.clone(),
            jurisdiction: None,
            corner_uplift_psf: None,
        })
    }

    #[test]
    fn test_material_quantities() {
        let materials = estimate_materials(&takeoff());
        assert_eq!(materials.membrane_sq_ft, 41300.0);
        assert_eq!(materials.fasteners_count, 185_850); // 41300 * 4.5
        assert_eq!(materials.plates_count, 185_850);
        assert_eq!(materials.adhesive_gallons, 413);
        assert_eq!(materials.estimated_weight_lbs, 49_560); // 41300 * 1.2
    }

    #[test]
    fn test_duration_estimate() {
        assert_eq!(estimated_duration_days(41300.0), 21); // 20.65 -> 20 + 1
        assert_eq!(estimated_duration_days(1000.0), 1);
        assert_eq!(estimated_duration_days(100_000.0), 51);
    }

    #[test]
    fn test_summary_assembly() {
        let takeoff = takeoff();
        let sections = sections_for(&takeoff);
        let summary = generate_summary(&takeoff, &sections, None, None);

        assert_eq!(summary.project_info.name, "Sunrise Distribution Center");
        assert_eq!(summary.estimated_duration, "21 days");
        assert_eq!(summary.sections.len(), sections.included.len());
        assert!(summary.sections[0].heading.starts_with("1.0 "));
        assert!(summary.compliance.wind_load_psf.is_none());
        assert!(!summary.compliance.hvhz_required);
    }

    #[test]
    fn test_summary_with_jurisdiction_and_wind() {
        use crate::calculations::wind_pressure::{calculate, WindPressureInput};
        use crate::jurisdiction::resolve;

        let takeoff = takeoff();
        let jurisdiction = resolve("Miami-Dade", "FL").record;
        let wind = calculate(&WindPressureInput {
            label: "Main Roof".to_string(),
            building_height: 42.0,
            jurisdiction: jurisdiction.clone(),
            ..Default::default()
        })
        .unwrap();

        let sections = sections_for(&takeoff);
        let summary = generate_summary(&takeoff, &sections, Some(&wind), Some(&jurisdiction));

        assert_eq!(summary.compliance.building_code.as_deref(), Some("FBC 2023"));
        assert!(summary.compliance.hvhz_required);
        assert!(summary.compliance.wind_load_psf.unwrap() < 0.0);
    }

    #[test]
    fn test_overview_content_mentions_membrane() {
        let takeoff = takeoff();
        let sections = sections_for(&takeoff);
        let summary = generate_summary(&takeoff, &sections, None, None);
        let overview = summary
            .sections
            .iter()
            .find(|s| s.id == "project_overview")
            .unwrap();
        assert!(overview.content.contains("TPO"));
        assert!(overview.content.contains("41300"));
    }
}
