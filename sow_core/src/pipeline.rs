//! # SOW Generation Pipeline
//!
//! The workflow from takeoff submission to summary payload, as an
//! in-process pipeline of typed stage functions:
//!
//! ```text
//! validate → resolve jurisdiction → wind pressure → zone geometry
//!          → template selection → section selection → summary
//! ```
//!
//! Stages communicate through explicit result values. A validation failure
//! stops the workflow; downstream stages that cannot run (no building
//! height, no location) are skipped with a warning rather than failing,
//! matching the degradation semantics of the calculators themselves.
//!
//! Jurisdiction lookups are memoized through a [`TtlCache`] owned by the
//! pipeline, keyed by (state, county).
//!
//! ## Example
//!
//! ```rust
//! use sow_core::pipeline::{SowPipeline, WorkflowStatus};
//! use sow_core::takeoff::TakeoffData;
//!
//! let mut pipeline = SowPipeline::new();
//! let report = pipeline.run(TakeoffData {
//!     project_name: "Gulf Coast Facility".to_string(),
//!     address: "88 Harbor Blvd, Corpus Christi, TX".to_string(),
//!     roof_area: 60000.0,
//!     building_height: Some(35.0),
//!     county: Some("Nueces".to_string()),
//!     state: Some("TX".to_string()),
//!     ..Default::default()
//! });
//!
//! assert_eq!(report.status, WorkflowStatus::Success);
//! assert!(report.summary.is_some());
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cache::{CacheStats, TtlCache};
use crate::calculations::wind_pressure::{self, WindPressureInput, WindPressureResult};
use crate::calculations::zone_geometry::{self, ZoneGeometryInput, ZoneGeometryResult};
use crate::errors::SowError;
use crate::jurisdiction::{resolve, ResolvedJurisdiction};
use crate::sections::{select_sections, SectionContext, SectionSelection};
use crate::summary::{generate_summary, SowSummary};
use crate::takeoff::{TakeoffData, ValidationReport};
use crate::templates::{select_template, TemplateSelection};

/// Default TTL for memoized jurisdiction lookups
pub const JURISDICTION_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// Terminal workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStatus {
    /// All stages ran (possibly with warnings)
    Success,
    /// Takeoff validation failed; no downstream stage ran
    ValidationFailed,
    /// A calculation stage returned a structured error
    Error,
}

/// Everything the workflow produced, stage by stage.
///
/// Stages that were skipped or never reached hold `None`; the aggregated
/// `warnings` list collects every degradation across stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowReport {
    /// Short workflow identifier for file naming and log correlation
    pub workflow_id: String,

    /// When the workflow ran
    pub timestamp: DateTime<Utc>,

    /// Terminal status
    pub status: WorkflowStatus,

    /// The takeoff as submitted
    pub takeoff: TakeoffData,

    /// Stage 1: validation outcome (always present)
    pub validation: ValidationReport,

    /// Stage 2: jurisdiction resolution
    pub jurisdiction: Option<ResolvedJurisdiction>,

    /// Stage 3: wind pressure calculation
    pub wind: Option<WindPressureResult>,

    /// Stage 4: zone geometry estimate
    pub geometry: Option<ZoneGeometryResult>,

    /// Stage 5: template selection
    pub template: Option<TemplateSelection>,

    /// Stage 6: section selection
    pub sections: Option<SectionSelection>,

    /// Stage 7: assembled summary payload
    pub summary: Option<SowSummary>,

    /// Structured error when `status` is `Error`
    pub error: Option<SowError>,

    /// Warnings aggregated across all stages
    pub warnings: Vec<String>,
}

/// The pipeline object. Owns the jurisdiction memoization cache; safe to
/// reuse across submissions.
pub struct SowPipeline {
    jurisdiction_cache: TtlCache<(String, String), ResolvedJurisdiction>,
}

impl SowPipeline {
    /// Create a pipeline with the default cache TTL.
    pub fn new() -> Self {
        Self::with_cache_ttl(JURISDICTION_CACHE_TTL)
    }

    /// Create a pipeline with a custom jurisdiction cache TTL.
    pub fn with_cache_ttl(ttl: Duration) -> Self {
        SowPipeline {
            jurisdiction_cache: TtlCache::new(ttl),
        }
    }

    /// Observability snapshot of the jurisdiction cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.jurisdiction_cache.stats()
    }

    /// Drop all memoized jurisdiction lookups.
    pub fn clear_cache(&mut self) {
        self.jurisdiction_cache.clear();
    }

    /// Run the full workflow for one takeoff submission.
    pub fn run(&mut self, takeoff: TakeoffData) -> WorkflowReport {
        let workflow_id = Uuid::new_v4().simple().to_string()[..8].to_string();
        let timestamp = Utc::now();
        debug!(workflow_id = %workflow_id, project = %takeoff.project_name, "starting SOW workflow");

        let mut warnings = Vec::new();

        // Stage 1: validation gates everything else
        let validation = takeoff.validate();
        warnings.extend(validation.warnings.iter().cloned());
        if !validation.is_valid {
            warn!(
                workflow_id = %workflow_id,
                errors = validation.errors.len(),
                "takeoff validation failed"
            );
            return WorkflowReport {
                workflow_id,
                timestamp,
                status: WorkflowStatus::ValidationFailed,
                takeoff,
                validation,
                jurisdiction: None,
                wind: None,
                geometry: None,
                template: None,
                sections: None,
                summary: None,
                error: None,
                warnings,
            };
        }

        // Stage 2: jurisdiction (memoized; degrades to defaults, never fails)
        let resolved = self.resolve_jurisdiction(&takeoff);
        warnings.extend(resolved.warnings.iter().cloned());
        if takeoff.hvhz_zone == Some(true) && !resolved.record.hvhz {
            warnings.push(
                "Takeoff asserts HVHZ but the jurisdiction table does not - verify designation"
                    .to_string(),
            );
        }

        let mut record = resolved.record.clone();
        if let Some(version) = takeoff.asce_version {
            record.asce_version = version;
        }

        // Stage 3: wind pressure (skipped without a building height)
        let wind = match takeoff.building_height {
            Some(height) => {
                let input = WindPressureInput {
                    label: takeoff.project_name.clone(),
                    building_height: height,
                    exposure_category: takeoff.exposure_category.unwrap_or_default(),
                    roof_slope: takeoff.roof_slope.unwrap_or(0.0),
                    elevation: takeoff.elevation.unwrap_or(0.0),
                    jurisdiction: record.clone(),
                    wind_speed: takeoff.wind_speed,
                    risk_category: Default::default(),
                };
                match wind_pressure::calculate(&input) {
                    Ok(result) => {
                        warnings.extend(result.warnings.iter().cloned());
                        Some(result)
                    }
                    Err(error) => {
                        return self.error_report(
                            workflow_id, timestamp, takeoff, validation, resolved, error, warnings,
                        );
                    }
                }
            }
            None => {
                warnings.push(
                    "No building height provided - wind uplift calculation skipped".to_string(),
                );
                None
            }
        };

        // Stage 4: zone geometry (advisory; needs the same height)
        let geometry = match takeoff.building_height {
            Some(height) => {
                let input = ZoneGeometryInput {
                    square_footage: takeoff.roof_area,
                    building_height: height,
                };
                match zone_geometry::calculate(&input) {
                    Ok(result) => Some(result),
                    Err(error) => {
                        return self.error_report(
                            workflow_id, timestamp, takeoff, validation, resolved, error, warnings,
                        );
                    }
                }
            }
            None => None,
        };

        // Stage 5: template selection (never fails)
        let template = select_template(&takeoff);
        warnings.extend(template.notes.iter().cloned());

        // Stage 6: section selection
        let corner_uplift = wind
            .as_ref()
            .map(|w| w.zone_pressures.governing_uplift().magnitude());
        let sections = select_sections(&SectionContext {
            takeoff: takeoff.clone(),
            jurisdiction: Some(record.clone()),
            corner_uplift_psf: corner_uplift,
        });

        // Stage 7: summary assembly
        let summary = generate_summary(&takeoff, &sections, wind.as_ref(), Some(&record));

        debug!(
            workflow_id = %workflow_id,
            sections = sections.included.len(),
            warnings = warnings.len(),
            "SOW workflow complete"
        );

        WorkflowReport {
            workflow_id,
            timestamp,
            status: WorkflowStatus::Success,
            takeoff,
            validation,
            jurisdiction: Some(resolved),
            wind,
            geometry,
            template: Some(template),
            sections: Some(sections),
            summary: Some(summary),
            error: None,
            warnings,
        }
    }

    /// Memoized jurisdiction resolution keyed by (state, county).
    fn resolve_jurisdiction(&mut self, takeoff: &TakeoffData) -> ResolvedJurisdiction {
        let state = takeoff.state.clone().unwrap_or_default();
        let county = takeoff.county.clone().unwrap_or_default();
        let key = (state.to_uppercase(), county.to_lowercase());

        self.jurisdiction_cache
            .get_or_insert_with(key, || resolve(&county, &state))
            .clone()
    }

    #[allow(clippy::too_many_arguments)]
    fn error_report(
        &self,
        workflow_id: String,
        timestamp: DateTime<Utc>,
        takeoff: TakeoffData,
        validation: ValidationReport,
        jurisdiction: ResolvedJurisdiction,
        error: SowError,
        warnings: Vec<String>,
    ) -> WorkflowReport {
        warn!(workflow_id = %workflow_id, error = %error, "SOW workflow stage failed");
        WorkflowReport {
            workflow_id,
            timestamp,
            status: WorkflowStatus::Error,
            takeoff,
            validation,
            jurisdiction: Some(jurisdiction),
            wind: None,
            geometry: None,
            template: None,
            sections: None,
            summary: None,
            error: Some(error),
            warnings,
        }
    }
}

impl Default for SowPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jurisdiction::ResolutionSource;
    use crate::roofing::DeckType;
    use crate::templates::TemplateId;

    fn takeoff() -> TakeoffData {
        TakeoffData {
            project_name: "Sunrise Distribution Center".to_string(),
            address: "4100 Commerce Pkwy, Tampa, FL 33605".to_string(),
            roof_area: 41300.0,
            deck_type: Some(DeckType::Steel),
            building_height: Some(42.0),
            county: Some("Hillsborough".to_string()),
            state: Some("FL".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_workflow_success() {
        let mut pipeline = SowPipeline::new();
        let report = pipeline.run(takeoff());

        assert_eq!(report.status, WorkflowStatus::Success);
        assert_eq!(report.workflow_id.len(), 8);
        assert!(report.validation.is_valid);

        let wind = report.wind.as_ref().unwrap();
        assert!(wind.zone_pressures.is_monotonic());

        let template = report.template.as_ref().unwrap();
        assert_eq!(template.template_id, TemplateId::T2);

        let summary = report.summary.as_ref().unwrap();
        assert_eq!(summary.compliance.building_code.as_deref(), Some("FBC 2023"));
        assert!(report.geometry.is_some());
        assert!(report.sections.is_some());
    }

    #[test]
    fn test_validation_failure_stops_workflow() {
        let mut pipeline = SowPipeline::new();
        let mut bad = takeoff();
        bad.roof_area = 10.0;

        let report = pipeline.run(bad);
        assert_eq!(report.status, WorkflowStatus::ValidationFailed);
        assert!(report.jurisdiction.is_none());
        assert!(report.wind.is_none());
        assert!(report.summary.is_none());
    }

    #[test]
    fn test_missing_height_skips_wind_with_warning() {
        let mut pipeline = SowPipeline::new();
        let mut data = takeoff();
        data.building_height = None;

        let report = pipeline.run(data);
        assert_eq!(report.status, WorkflowStatus::Success);
        assert!(report.wind.is_none());
        assert!(report.geometry.is_none());
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("wind uplift calculation skipped")));
        // Sections and summary still produced
        assert!(report.sections.is_some());
        assert!(report.summary.is_some());
    }

    #[test]
    fn test_unknown_location_degrades_with_warning() {
        let mut pipeline = SowPipeline::new();
        let mut data = takeoff();
        data.state = Some("WY".to_string());
        data.county = Some("Albany".to_string());

        let report = pipeline.run(data);
        assert_eq!(report.status, WorkflowStatus::Success);
        let resolved = report.jurisdiction.as_ref().unwrap();
        assert_eq!(resolved.source, ResolutionSource::GlobalDefault);
        assert!(report.warnings.iter().any(|w| w.contains("verify manually")));
    }

    #[test]
    fn test_jurisdiction_cache_hit_on_repeat() {
        let mut pipeline = SowPipeline::new();
        pipeline.run(takeoff());
        pipeline.run(takeoff());

        let stats = pipeline.cache_stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.entries, 1);

        pipeline.clear_cache();
        assert_eq!(pipeline.cache_stats().entries, 0);
    }

    #[test]
    fn test_hvhz_assertion_mismatch_warned() {
        let mut pipeline = SowPipeline::new();
        let mut data = takeoff();
        data.hvhz_zone = Some(true); // Hillsborough is not HVHZ

        let report = pipeline.run(data);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("jurisdiction table does not")));
    }

    #[test]
    fn test_asce_version_override_applied() {
        use crate::asce_factors::AsceVersion;

        let mut pipeline = SowPipeline::new();
        let mut data = takeoff();
        data.asce_version = Some(AsceVersion::Asce710);

        let report = pipeline.run(data);
        let wind = report.wind.as_ref().unwrap();
        assert_eq!(wind.metadata.asce_version, AsceVersion::Asce710);
    }

    #[test]
    fn test_hvhz_project_end_to_end() {
        let mut pipeline = SowPipeline::new();
        let mut data = takeoff();
        data.county = Some("Miami-Dade".to_string());

        let report = pipeline.run(data);
        let summary = report.summary.as_ref().unwrap();
        assert!(summary.compliance.hvhz_required);

        let sections = report.sections.as_ref().unwrap();
        assert!(sections.included.iter().any(|s| s.id == "hvhz_requirements"));
    }
}
