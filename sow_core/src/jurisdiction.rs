//! # Jurisdiction Resolver
//!
//! Maps a (state, county) pair to the governing code cycle, ASCE edition,
//! HVHZ flag, and basic wind speed using a static lookup table with
//! state-level fallback defaults.
//!
//! ## Failure semantics
//!
//! Resolution never fails. Unknown states degrade to a hard-coded global
//! default, unknown counties degrade to the state defaults with hvhz=false,
//! and every degradation is recorded as a warning on the result and emitted
//! via `tracing::warn!` so callers can surface a "verify manually" notice.
//!
//! HVHZ determination is a data-table concern: it is set at the county
//! level for the Florida coastal counties (Miami-Dade, Broward, Palm Beach,
//! Monroe), not derived algorithmically.
//!
//! ## Example
//!
//! ```rust
//! use sow_core::jurisdiction::resolve;
//!
//! let resolved = resolve("Miami-Dade", "FL");
//! assert!(resolved.record.hvhz);
//! assert_eq!(resolved.record.asce_version.code(), "7-22");
//! assert!(resolved.warnings.is_empty());
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::asce_factors::AsceVersion;

/// Global default when a state is unmapped: 2021 IBC, ASCE 7-16, 115 mph
pub const GLOBAL_DEFAULT_CODE_CYCLE: &str = "2021 IBC";
/// Global default basic wind speed (mph)
pub const GLOBAL_DEFAULT_WIND_SPEED_MPH: f64 = 115.0;

/// Resolved jurisdiction data for a project location.
///
/// This is part of the JSON interchange contract with callers and keeps
/// the documented camelCase field names on the wire.
///
/// ## JSON Example
///
/// ```json
/// {
///   "county": "Broward",
///   "state": "FL",
///   "codeCycle": "FBC 2023",
///   "asceVersion": "7-22",
///   "hvhz": true,
///   "basicWindSpeed": 170.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionRecord {
    /// County name as provided by the caller
    pub county: String,

    /// Two-letter state code
    pub state: String,

    /// Governing code cycle (e.g., "2021 IBC", "FBC 2023")
    pub code_cycle: String,

    /// ASCE 7 edition referenced by that code cycle
    pub asce_version: AsceVersion,

    /// High-Velocity Hurricane Zone flag (Florida regulatory designation)
    pub hvhz: bool,

    /// Basic wind speed V in mph
    pub basic_wind_speed: f64,
}

/// How the record was resolved, for audit trails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionSource {
    /// County-level entry found
    County,
    /// County unmapped; state defaults applied
    StateDefault,
    /// State unmapped; global defaults applied
    GlobalDefault,
}

/// Result of a jurisdiction lookup: the record plus any degradation warnings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedJurisdiction {
    /// The resolved record (always populated)
    pub record: JurisdictionRecord,

    /// Which table level supplied the data
    pub source: ResolutionSource,

    /// Warnings accumulated while degrading to defaults
    pub warnings: Vec<String>,
}

// ============================================================================
// Static Lookup Tables
// ============================================================================

struct StateEntry {
    code_cycle: &'static str,
    asce_version: AsceVersion,
    /// State-level default wind speed (mph)
    wind_speed: f64,
    /// County overrides keyed by normalized county name
    counties: &'static [(&'static str, CountyEntry)],
}

struct CountyEntry {
    wind_speed: f64,
    hvhz: bool,
}

const fn county(wind_speed: f64, hvhz: bool) -> CountyEntry {
    CountyEntry { wind_speed, hvhz }
}

static FL_COUNTIES: [(&str, CountyEntry); 9] = [
    // HVHZ counties
    ("miami-dade", county(175.0, true)),
    ("broward", county(170.0, true)),
    ("palm beach", county(170.0, true)),
    ("monroe", county(180.0, true)),
    // Coastal, non-HVHZ
    ("lee", county(172.0, false)),
    ("collier", county(172.0, false)),
    ("duval", county(130.0, false)),
    ("orange", county(139.0, false)),
    ("hillsborough", county(146.0, false)),
];

static TX_COUNTIES: [(&str, CountyEntry); 4] = [
    ("harris", county(140.0, false)),
    ("galveston", county(150.0, false)),
    ("nueces", county(160.0, false)),
    ("cameron", county(160.0, false)),
];

static LA_COUNTIES: [(&str, CountyEntry); 2] = [
    ("orleans", county(150.0, false)),
    ("jefferson", county(150.0, false)),
];

static MS_COUNTIES: [(&str, CountyEntry); 1] = [("harrison", county(150.0, false))];

static AL_COUNTIES: [(&str, CountyEntry); 2] = [
    ("mobile", county(150.0, false)),
    ("baldwin", county(150.0, false)),
];

static GA_COUNTIES: [(&str, CountyEntry); 1] = [("chatham", county(130.0, false))];

static SC_COUNTIES: [(&str, CountyEntry); 1] = [("charleston", county(145.0, false))];

static NC_COUNTIES: [(&str, CountyEntry); 2] = [
    ("dare", county(160.0, false)),
    ("new hanover", county(150.0, false)),
];

static VA_COUNTIES: [(&str, CountyEntry); 1] = [("virginia beach", county(130.0, false))];

static STATE_TABLE: Lazy<HashMap<&'static str, StateEntry>> = Lazy::new(|| {
    let mut table = HashMap::new();

    table.insert(
        "FL",
        StateEntry {
            code_cycle: "FBC 2023",
            asce_version: AsceVersion::Asce722,
            wind_speed: 140.0,
            counties: &FL_COUNTIES,
        },
    );

    table.insert(
        "TX",
        StateEntry {
            code_cycle: "2021 IBC",
            asce_version: AsceVersion::Asce716,
            wind_speed: 115.0,
            counties: &TX_COUNTIES,
        },
    );

    table.insert(
        "LA",
        StateEntry {
            code_cycle: "2021 IBC",
            asce_version: AsceVersion::Asce716,
            wind_speed: 120.0,
            counties: &LA_COUNTIES,
        },
    );

    table.insert(
        "MS",
        StateEntry {
            code_cycle: "2021 IBC",
            asce_version: AsceVersion::Asce716,
            wind_speed: 115.0,
            counties: &MS_COUNTIES,
        },
    );

    table.insert(
        "AL",
        StateEntry {
            code_cycle: "2021 IBC",
            asce_version: AsceVersion::Asce716,
            wind_speed: 115.0,
            counties: &AL_COUNTIES,
        },
    );

    table.insert(
        "GA",
        StateEntry {
            code_cycle: "2021 IBC",
            asce_version: AsceVersion::Asce716,
            wind_speed: 110.0,
            counties: &GA_COUNTIES,
        },
    );

    table.insert(
        "SC",
        StateEntry {
            code_cycle: "2021 IBC",
            asce_version: AsceVersion::Asce716,
            wind_speed: 120.0,
            counties: &SC_COUNTIES,
        },
    );

    // NC remains on an older cycle referencing ASCE 7-10
    table.insert(
        "NC",
        StateEntry {
            code_cycle: "2018 IBC",
            asce_version: AsceVersion::Asce710,
            wind_speed: 115.0,
            counties: &NC_COUNTIES,
        },
    );

    table.insert(
        "VA",
        StateEntry {
            code_cycle: "2021 IBC",
            asce_version: AsceVersion::Asce716,
            wind_speed: 110.0,
            counties: &VA_COUNTIES,
        },
    );

    table.insert(
        "CA",
        StateEntry {
            code_cycle: "2022 CBC",
            asce_version: AsceVersion::Asce716,
            wind_speed: 95.0,
            counties: &[],
        },
    );

    table.insert(
        "CO",
        StateEntry {
            code_cycle: "2021 IBC",
            asce_version: AsceVersion::Asce716,
            wind_speed: 105.0,
            counties: &[],
        },
    );

    table
});

/// Normalize a county name for table lookup: lowercase, trimmed, with a
/// trailing "county" suffix stripped ("Miami-Dade County" -> "miami-dade").
fn normalize_county(county: &str) -> String {
    let lower = county.trim().to_lowercase();
    lower
        .strip_suffix(" county")
        .unwrap_or(&lower)
        .trim()
        .to_string()
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve a (county, state) pair to a jurisdiction record.
///
/// Lookup order: county entry → state defaults → global defaults. This
/// function never fails; degradations attach warnings instead.
///
/// # Example
///
/// ```rust
/// use sow_core::jurisdiction::{resolve, ResolutionSource};
///
/// // Unknown state degrades to the global default with a warning
/// let resolved = resolve("Nowhere", "ZZ");
/// assert_eq!(resolved.source, ResolutionSource::GlobalDefault);
/// assert_eq!(resolved.record.basic_wind_speed, 115.0);
/// assert!(!resolved.warnings.is_empty());
/// ```
pub fn resolve(county: &str, state: &str) -> ResolvedJurisdiction {
    let state_code = state.trim().to_uppercase();
    let mut warnings = Vec::new();

    let Some(entry) = STATE_TABLE.get(state_code.as_str()) else {
        let message = format!(
            "State '{}' is not in the jurisdiction table; using global defaults \
             ({}, ASCE {}, {} mph) - verify manually",
            state_code,
            GLOBAL_DEFAULT_CODE_CYCLE,
            AsceVersion::default().code(),
            GLOBAL_DEFAULT_WIND_SPEED_MPH
        );
        warn!(state = %state_code, "unmapped state, degrading to global defaults");
        warnings.push(message);

        return ResolvedJurisdiction {
            record: JurisdictionRecord {
                county: county.to_string(),
                state: state_code,
                code_cycle: GLOBAL_DEFAULT_CODE_CYCLE.to_string(),
                asce_version: AsceVersion::default(),
                hvhz: false,
                basic_wind_speed: GLOBAL_DEFAULT_WIND_SPEED_MPH,
            },
            source: ResolutionSource::GlobalDefault,
            warnings,
        };
    };

    let normalized = normalize_county(county);
    let county_entry = entry
        .counties
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, data)| data);

    match county_entry {
        Some(data) => ResolvedJurisdiction {
            record: JurisdictionRecord {
                county: county.to_string(),
                state: state_code,
                code_cycle: entry.code_cycle.to_string(),
                asce_version: entry.asce_version,
                hvhz: data.hvhz,
                basic_wind_speed: data.wind_speed,
            },
            source: ResolutionSource::County,
            warnings,
        },
        None => {
            let message = format!(
                "County '{}' is not mapped for {}; using state defaults \
                 ({} mph, hvhz=false) - verify manually",
                county, state_code, entry.wind_speed
            );
            warn!(county = %county, state = %state_code, "unmapped county, degrading to state defaults");
            warnings.push(message);

            ResolvedJurisdiction {
                record: JurisdictionRecord {
                    county: county.to_string(),
                    state: state_code,
                    code_cycle: entry.code_cycle.to_string(),
                    asce_version: entry.asce_version,
                    hvhz: false,
                    basic_wind_speed: entry.wind_speed,
                },
                source: ResolutionSource::StateDefault,
                warnings,
            }
        }
    }
}
