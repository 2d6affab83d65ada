//! # SOW Section Selection
//!
//! A fixed, hand-authored rule table decides which boilerplate document
//! sections apply to a project. Each rule evaluates one boolean predicate
//! over the project fields, independently of every other rule; the declared
//! `dependencies` list is used purely for document ordering, never for
//! conditional logic.
//!
//! Evaluation is a single pass over the table. The output carries a
//! per-rule rationale string for audit/explainability.
//!
//! ## Example
//!
//! ```rust
//! use sow_core::sections::{select_sections, SectionContext};
//! use sow_core::takeoff::TakeoffData;
//!
//! let context = SectionContext {
//!     takeoff: TakeoffData {
//!         project_name: "Test".to_string(),
//!         address: "1 Long Enough Street".to_string(),
//!         roof_area: 20000.0,
//!         building_height: Some(35.0),
//!         ..Default::default()
//!     },
//!     jurisdiction: None,
//!     corner_uplift_psf: None,
//! };
//!
//! let selection = select_sections(&context);
//! assert!(selection.included.iter().any(|s| s.id == "fall_protection"));
//! ```

use serde::{Deserialize, Serialize};

use crate::jurisdiction::JurisdictionRecord;
use crate::roofing::{AttachmentMethod, DeckType, InsulationType, WorkType};
use crate::takeoff::TakeoffData;

/// Building height above which fall protection language is required (ft)
pub const FALL_PROTECTION_HEIGHT_FT: f64 = 30.0;

/// Building height above which crane logistics language is required (ft)
pub const CRANE_HEIGHT_FT: f64 = 50.0;

/// Corner uplift magnitude that triggers enhanced wind-uplift language (psf)
pub const WIND_UPLIFT_SECTION_PSF: f64 = 30.0;

/// Everything the section predicates can see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionContext {
    /// The validated takeoff payload
    pub takeoff: TakeoffData,

    /// Resolved jurisdiction, when the workflow got that far
    pub jurisdiction: Option<JurisdictionRecord>,

    /// Governing corner uplift magnitude in psf, when computed
    pub corner_uplift_psf: Option<f64>,
}

impl SectionContext {
    fn work_type(&self) -> WorkType {
        self.takeoff.project_type.unwrap_or_default()
    }

    fn height(&self) -> f64 {
        self.takeoff.building_height.unwrap_or(0.0)
    }

    fn hvhz(&self) -> bool {
        self.jurisdiction
            .as_ref()
            .map(|j| j.hvhz)
            .or(self.takeoff.hvhz_zone)
            .unwrap_or(false)
    }

    fn has_insulation(&self) -> bool {
        match self.takeoff.insulation_type {
            Some(InsulationType::None) => false,
            Some(_) => true,
            // Tearoffs get new insulation by default
            None => self.work_type() == WorkType::Tearoff,
        }
    }
}

/// One row of the rule table.
struct SectionRule {
    /// Stable identifier used in templates and dependencies
    id: &'static str,
    /// Section heading
    title: &'static str,
    /// Document ordering; ties broken by table order
    priority: u32,
    /// Sections that must precede this one in the document (ordering only)
    dependencies: &'static [&'static str],
    /// Inclusion predicate
    include: fn(&SectionContext) -> bool,
    /// Human-readable audit rationale for the decision
    rationale: fn(&SectionContext, bool) -> String,
}

fn always(_: &SectionContext) -> bool {
    true
}

/// The rule table. Hand-authored and fixed; evaluated fresh per project.
fn rules() -> Vec<SectionRule> {
    vec![
        SectionRule {
            id: "project_overview",
            title: "Project Overview",
            priority: 10,
            dependencies: &[],
            include: always,
            rationale: |_, _| "Included on every SOW".to_string(),
        },
        SectionRule {
            id: "existing_conditions",
            title: "Existing Conditions",
            priority: 20,
            dependencies: &["project_overview"],
            include: |c| c.work_type() == WorkType::Recover,
            rationale: |c, included| {
                if included {
                    "Recover scope retains the existing assembly".to_string()
                } else {
                    format!("Work type is {}, existing assembly is removed", c.work_type())
                }
            },
        },
        SectionRule {
            id: "tearoff_requirements",
            title: "Tearoff Requirements",
            priority: 20,
            dependencies: &["project_overview"],
            include: |c| c.work_type() == WorkType::Tearoff,
            rationale: |c, included| {
                if included {
                    "Tearoff scope requires removal and disposal language".to_string()
                } else {
                    format!("Work type is {}, no tearoff", c.work_type())
                }
            },
        },
        SectionRule {
            id: "scope_of_work",
            title: "Scope of Work",
            priority: 30,
            dependencies: &[],
            include: always,
            rationale: |_, _| "Included on every SOW".to_string(),
        },
        SectionRule {
            id: "materials",
            title: "Materials",
            priority: 40,
            dependencies: &["scope_of_work"],
            include: always,
            rationale: |_, _| "Included on every SOW".to_string(),
        },
        SectionRule {
            id: "insulation",
            title: "Insulation",
            priority: 50,
            dependencies: &["materials"],
            include: SectionContext::has_insulation_rule,
            rationale: |_, included| {
                if included {
                    "Assembly includes insulation".to_string()
                } else {
                    "No insulation in the assembly".to_string()
                }
            },
        },
        SectionRule {
            id: "installation",
            title: "Installation",
            priority: 60,
            dependencies: &["materials"],
            include: always,
            rationale: |_, _| "Included on every SOW".to_string(),
        },
        SectionRule {
            id: "fastening_requirements",
            title: "Fastening Requirements",
            priority: 70,
            dependencies: &["installation"],
            include: |c| {
                matches!(
                    c.takeoff.fastening_pattern,
                    AttachmentMethod::MechanicallyAttached | AttachmentMethod::RhinoBond
                )
            },
            rationale: |c, included| {
                if included {
                    format!("{} attachment requires a fastening pattern", c.takeoff.fastening_pattern)
                } else {
                    format!("{} attachment uses no field fasteners", c.takeoff.fastening_pattern)
                }
            },
        },
        SectionRule {
            id: "adhesive_requirements",
            title: "Adhesive Requirements",
            priority: 70,
            dependencies: &["installation"],
            include: |c| c.takeoff.fastening_pattern == AttachmentMethod::FullyAdhered,
            rationale: |c, included| {
                if included {
                    "Fully adhered system requires adhesive coverage rates".to_string()
                } else {
                    format!("{} attachment, no field adhesive", c.takeoff.fastening_pattern)
                }
            },
        },
        SectionRule {
            id: "ballast_requirements",
            title: "Ballast Requirements",
            priority: 70,
            dependencies: &["installation"],
            include: |c| c.takeoff.fastening_pattern == AttachmentMethod::Ballasted,
            rationale: |c, included| {
                if included {
                    "Ballasted system requires stone coverage and parapet checks".to_string()
                } else {
                    format!("{} attachment, no ballast", c.takeoff.fastening_pattern)
                }
            },
        },
        SectionRule {
            id: "wind_uplift_requirements",
            title: "Wind Uplift Requirements",
            priority: 80,
            dependencies: &["fastening_requirements"],
            include: |c| c.corner_uplift_psf.unwrap_or(0.0) >= WIND_UPLIFT_SECTION_PSF || c.hvhz(),
            rationale: |c, included| {
                let uplift = c.corner_uplift_psf.unwrap_or(0.0);
                if included {
                    format!(
                        "Corner uplift {:.1} psf (threshold {} psf) or HVHZ jurisdiction",
                        uplift, WIND_UPLIFT_SECTION_PSF
                    )
                } else {
                    format!("Corner uplift {:.1} psf below {} psf", uplift, WIND_UPLIFT_SECTION_PSF)
                }
            },
        },
        SectionRule {
            id: "hvhz_requirements",
            title: "HVHZ Compliance",
            priority: 85,
            dependencies: &["wind_uplift_requirements"],
            include: |c| c.hvhz(),
            rationale: |_, included| {
                if included {
                    "Project is in a High-Velocity Hurricane Zone".to_string()
                } else {
                    "Not an HVHZ jurisdiction".to_string()
                }
            },
        },
        SectionRule {
            id: "fall_protection",
            title: "Fall Protection",
            priority: 90,
            dependencies: &[],
            include: |c| c.height() > FALL_PROTECTION_HEIGHT_FT,
            rationale: |c, included| {
                if included {
                    format!(
                        "Building height {:.0} ft exceeds {} ft",
                        c.height(),
                        FALL_PROTECTION_HEIGHT_FT
                    )
                } else {
                    format!(
                        "Building height {:.0} ft at or below {} ft",
                        c.height(),
                        FALL_PROTECTION_HEIGHT_FT
                    )
                }
            },
        },
        SectionRule {
            id: "crane_logistics",
            title: "Crane & Material Handling",
            priority: 95,
            dependencies: &["fall_protection"],
            include: |c| c.height() > CRANE_HEIGHT_FT,
            rationale: |c, included| {
                if included {
                    format!("Building height {:.0} ft exceeds {} ft", c.height(), CRANE_HEIGHT_FT)
                } else {
                    format!(
                        "Building height {:.0} ft at or below {} ft",
                        c.height(),
                        CRANE_HEIGHT_FT
                    )
                }
            },
        },
        SectionRule {
            id: "lwc_considerations",
            title: "Lightweight Concrete Considerations",
            priority: 100,
            dependencies: &["installation"],
            include: |c| c.takeoff.deck_type == Some(DeckType::LightweightConcrete),
            rationale: |_, included| {
                if included {
                    "Lightweight concrete deck requires venting and fastener pull-out language"
                        .to_string()
                } else {
                    "Deck is not lightweight concrete".to_string()
                }
            },
        },
        SectionRule {
            id: "gypsum_requirements",
            title: "Gypsum Deck Requirements",
            priority: 100,
            dependencies: &["installation"],
            include: |c| c.takeoff.deck_type == Some(DeckType::Gypsum),
            rationale: |_, included| {
                if included {
                    "Gypsum deck restricts fastener types and requires adhered assembly checks"
                        .to_string()
                } else {
                    "Deck is not gypsum".to_string()
                }
            },
        },
        SectionRule {
            id: "flashing_details",
            title: "Flashing Details",
            priority: 110,
            dependencies: &["installation"],
            include: always,
            rationale: |_, _| "Included on every SOW".to_string(),
        },
        SectionRule {
            id: "warranty",
            title: "Warranty",
            priority: 120,
            dependencies: &[],
            include: always,
            rationale: |_, _| "Included on every SOW".to_string(),
        },
    ]
}

impl SectionContext {
    // fn-pointer shim: method references don't coerce to fn pointers in the
    // table, a free-standing wrapper does
    fn has_insulation_rule(c: &SectionContext) -> bool {
        c.has_insulation()
    }
}

/// A section selected for the document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedSection {
    /// Stable section identifier
    pub id: String,
    /// Section heading
    pub title: String,
    /// Document ordering priority
    pub priority: u32,
    /// Why this section was included
    pub rationale: String,
}

/// A section the rule table excluded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludedSection {
    /// Stable section identifier
    pub id: String,
    /// Section heading
    pub title: String,
    /// Why this section was excluded
    pub rationale: String,
}

/// Result of section selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSelection {
    /// Sections in document order
    pub included: Vec<SelectedSection>,
    /// Sections the rules excluded, with rationale
    pub excluded: Vec<ExcludedSection>,
    /// One-line audit summary
    pub reasoning: String,
}

/// Evaluate the rule table against a project.
///
/// Single pass; each rule decides independently. Included sections are
/// ordered by priority, then adjusted so every declared dependency that is
/// itself included precedes its dependent.
pub fn select_sections(context: &SectionContext) -> SectionSelection {
    let table = rules();
    let mut included = Vec::new();
    let mut excluded = Vec::new();

    for rule in &table {
        let is_included = (rule.include)(context);
        let rationale = (rule.rationale)(context, is_included);
        if is_included {
            included.push(SelectedSection {
                id: rule.id.to_string(),
                title: rule.title.to_string(),
                priority: rule.priority,
                rationale,
            });
        } else {
            excluded.push(ExcludedSection {
                id: rule.id.to_string(),
                title: rule.title.to_string(),
                rationale,
            });
        }
    }

    included.sort_by_key(|s| s.priority);
    order_dependencies(&mut included, &table);

    let reasoning = format!(
        "{} of {} sections included for {} / {} on {}",
        included.len(),
        table.len(),
        context.work_type(),
        context.takeoff.membrane_type,
        context
            .takeoff
            .deck_type
            .map(|d| d.display_name())
            .unwrap_or("unresolved deck"),
    );

    SectionSelection {
        included,
        excluded,
        reasoning,
    }
}

/// Move any included section after its included dependencies. Priorities
/// already encode the intended order; this pass guards the table against a
/// priority edit that would silently break a declared dependency.
fn order_dependencies(included: &mut Vec<SelectedSection>, table: &[SectionRule]) {
    let deps_of = |id: &str| -> &'static [&'static str] {
        table
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.dependencies)
            .unwrap_or(&[])
    };

    let mut index = 0;
    while index < included.len() {
        let id = included[index].id.clone();
        let mut latest_dep = None;
        for dep in deps_of(&id) {
            if let Some(pos) = included.iter().position(|s| s.id == *dep) {
                if pos > index {
                    latest_dep = Some(latest_dep.map_or(pos, |p: usize| p.max(pos)));
                }
            }
        }
        if let Some(pos) = latest_dep {
            let section = included.remove(index);
            included.insert(pos, section);
            // re-examine the section now at `index`
        } else {
            index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jurisdiction::resolve;
    use crate::roofing::MembraneType;

    fn context(height: f64) -> SectionContext {
        SectionContext {
            takeoff: TakeoffData {
                project_name: "Test".to_string(),
                address: "100 Industrial Way, Anywhere".to_string(),
                roof_area: 25000.0,
                membrane_type: MembraneType::Tpo,
                building_height: Some(height),
                ..Default::default()
            },
            jurisdiction: None,
            corner_uplift_psf: None,
        }
    }

    fn included_ids(selection: &SectionSelection) -> Vec<&str> {
        selection.included.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_fall_protection_height_fixture() {
        // At 25 ft (≤ 30) excluded, at 35 ft included
        let low = select_sections(&context(25.0));
        assert!(low.excluded.iter().any(|s| s.id == "fall_protection"));
        assert!(!included_ids(&low).contains(&"fall_protection"));

        let high = select_sections(&context(35.0));
        assert!(included_ids(&high).contains(&"fall_protection"));
    }

    #[test]
    fn test_always_sections_present() {
        let selection = select_sections(&context(20.0));
        let ids = included_ids(&selection);
        for id in [
            "project_overview",
            "scope_of_work",
            "materials",
            "installation",
            "flashing_details",
            "warranty",
        ] {
            assert!(ids.contains(&id), "{} must always be included", id);
        }
    }

    #[test]
    fn test_recover_vs_tearoff_sections() {
        let mut recover = context(20.0);
        recover.takeoff.project_type = Some(WorkType::Recover);
        let selection = select_sections(&recover);
        assert!(included_ids(&selection).contains(&"existing_conditions"));
        assert!(!included_ids(&selection).contains(&"tearoff_requirements"));

        let mut tearoff = context(20.0);
        tearoff.takeoff.project_type = Some(WorkType::Tearoff);
        let selection = select_sections(&tearoff);
        assert!(included_ids(&selection).contains(&"tearoff_requirements"));
        assert!(!included_ids(&selection).contains(&"existing_conditions"));
    }

    #[test]
    fn test_hvhz_sections_from_jurisdiction() {
        let mut ctx = context(20.0);
        ctx.jurisdiction = Some(resolve("Miami-Dade", "FL").record);
        let selection = select_sections(&ctx);
        let ids = included_ids(&selection);
        assert!(ids.contains(&"hvhz_requirements"));
        assert!(ids.contains(&"wind_uplift_requirements"));
    }

    #[test]
    fn test_wind_uplift_threshold() {
        let mut ctx = context(20.0);
        ctx.corner_uplift_psf = Some(25.0);
        let selection = select_sections(&ctx);
        assert!(!included_ids(&selection).contains(&"wind_uplift_requirements"));

        ctx.corner_uplift_psf = Some(55.0);
        let selection = select_sections(&ctx);
        assert!(included_ids(&selection).contains(&"wind_uplift_requirements"));
    }

    #[test]
    fn test_attachment_specific_sections() {
        let mut ctx = context(20.0);
        ctx.takeoff.fastening_pattern = AttachmentMethod::FullyAdhered;
        let selection = select_sections(&ctx);
        let ids = included_ids(&selection);
        assert!(ids.contains(&"adhesive_requirements"));
        assert!(!ids.contains(&"fastening_requirements"));
    }

    #[test]
    fn test_deck_specific_sections() {
        let mut ctx = context(20.0);
        ctx.takeoff.deck_type = Some(DeckType::LightweightConcrete);
        let selection = select_sections(&ctx);
        assert!(included_ids(&selection).contains(&"lwc_considerations"));
        assert!(!included_ids(&selection).contains(&"gypsum_requirements"));
    }

    #[test]
    fn test_priority_ordering() {
        let selection = select_sections(&context(20.0));
        let priorities: Vec<u32> = selection.included.iter().map(|s| s.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        assert_eq!(priorities, sorted);
        assert_eq!(selection.included[0].id, "project_overview");
        assert_eq!(selection.included.last().unwrap().id, "warranty");
    }

    #[test]
    fn test_rationales_populated() {
        let selection = select_sections(&context(25.0));
        for section in &selection.included {
            assert!(!section.rationale.is_empty());
        }
        for section in &selection.excluded {
            assert!(!section.rationale.is_empty());
        }
        assert!(selection.reasoning.contains("sections included"));
    }
}
