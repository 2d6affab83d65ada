//! # SOW Template Selection
//!
//! Maps a takeoff's roofing specification (work type, membrane, attachment,
//! deck) to the best-fitting SOW template. Selection is a fixed lookup with
//! two fallback levels:
//!
//! 1. Exact (work, membrane, attachment, deck) match → high confidence
//! 2. Match with deck unresolved → medium confidence, verification note
//! 3. Default T2 template → low confidence, manual review notes
//!
//! ## Example
//!
//! ```rust
//! use sow_core::takeoff::TakeoffData;
//! use sow_core::templates::{select_template, Confidence, TemplateId};
//! use sow_core::roofing::DeckType;
//!
//! let takeoff = TakeoffData {
//!     project_name: "Test".to_string(),
//!     address: "1 Long Enough Street".to_string(),
//!     roof_area: 20000.0,
//!     deck_type: Some(DeckType::Steel),
//!     ..Default::default()
//! };
//!
//! let selection = select_template(&takeoff);
//! assert_eq!(selection.template_id, TemplateId::T2);
//! assert_eq!(selection.confidence, Confidence::High);
//! ```

use serde::{Deserialize, Serialize};

use crate::roofing::{AttachmentMethod, DeckType, MembraneType, WorkType};
use crate::takeoff::TakeoffData;

// ============================================================================
// Template Catalog
// ============================================================================

/// SOW template identifiers.
///
/// Template numbering follows the estimating team's catalog; gaps (T1, T3)
/// are retired templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateId {
    /// Recover, TPO mechanically attached, cover board over BUR/lwc/steel
    T2,
    /// Recover, TPO fleeceback mechanically attached over BUR on steel
    T4,
    /// Recover, TPO with Rhino Bond over structural standing seam
    T5,
    /// Tearoff, TPO mechanically attached with insulation on steel
    T6,
    /// Tearoff, TPO mechanically attached over lightweight concrete
    T7,
    /// Tearoff, fully adhered TPO on gypsum
    T8,
}

/// Template complexity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    /// Routine crew and sequencing
    #[serde(rename = "standard")]
    Standard,
    /// Specialty attachment or deck handling
    #[serde(rename = "complex")]
    Complex,
}

/// Static catalog metadata for a template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateMetadata {
    /// Work scope the template covers
    pub work_type: WorkType,
    /// Membranes the template supports
    pub membrane_types: Vec<MembraneType>,
    /// Attachment methods the template supports
    pub attachment_methods: Vec<AttachmentMethod>,
    /// Decks the template supports
    pub deck_types: Vec<DeckType>,
    /// Document sections the template carries
    pub sections: Vec<&'static str>,
    /// Complexity classification
    pub complexity: Complexity,
    /// Production-rate guidance
    pub estimated_duration: &'static str,
    /// Usage restrictions, if any
    pub restrictions: Vec<&'static str>,
}

impl TemplateId {
    /// All catalog templates
    pub const ALL: [TemplateId; 6] = [
        TemplateId::T2,
        TemplateId::T4,
        TemplateId::T5,
        TemplateId::T6,
        TemplateId::T7,
        TemplateId::T8,
    ];

    /// Short identifier (e.g., "T2")
    pub fn code(&self) -> &'static str {
        match self {
            TemplateId::T2 => "T2",
            TemplateId::T4 => "T4",
            TemplateId::T5 => "T5",
            TemplateId::T6 => "T6",
            TemplateId::T7 => "T7",
            TemplateId::T8 => "T8",
        }
    }

    /// Full catalog name
    pub fn full_name(&self) -> &'static str {
        match self {
            TemplateId::T2 => "T2-Recover-TPO(MA)-cvr-bd-BUR-lwc-steel",
            TemplateId::T4 => "T4-Recover-TPOfleece(MA)-BUR-lwc-steel",
            TemplateId::T5 => "T5-Recover-TPO(Rhino)-iso-EPS-flute-fill-SSR",
            TemplateId::T6 => "T6-Tearoff-TPO(MA)-insul-steel",
            TemplateId::T7 => "T7-Tearoff-TPO(MA)-insul-lwc-steel",
            TemplateId::T8 => "T8-Tearoff-TPO(adhered)-insul(adhered)-gypsum",
        }
    }

    /// One-line description for selection output
    pub fn description(&self) -> &'static str {
        match self {
            TemplateId::T2 => "TPO recover over BUR on lightweight concrete and steel deck",
            TemplateId::T4 => "TPO fleeceback recover over BUR on steel",
            TemplateId::T5 => "TPO with Rhino Bond over structural standing seam roof",
            TemplateId::T6 => "TPO tearoff and replacement with insulation on steel deck",
            TemplateId::T7 => "TPO tearoff over lightweight concrete on steel deck",
            TemplateId::T8 => "Fully adhered TPO tearoff and replacement on gypsum deck",
        }
    }

    /// Catalog metadata for this template
    pub fn metadata(&self) -> TemplateMetadata {
        match self {
            TemplateId::T2 => TemplateMetadata {
                work_type: WorkType::Recover,
                membrane_types: vec![MembraneType::Tpo],
                attachment_methods: vec![AttachmentMethod::MechanicallyAttached],
                deck_types: vec![
                    DeckType::Steel,
                    DeckType::Concrete,
                    DeckType::LightweightConcrete,
                ],
                sections: vec![
                    "project_overview",
                    "existing_conditions",
                    "scope_of_work",
                    "materials",
                    "installation",
                    "fastening_requirements",
                    "flashing_details",
                    "warranty",
                ],
                complexity: Complexity::Standard,
                estimated_duration: "5-7 days per 10,000 sf",
                restrictions: vec![],
            },
            TemplateId::T4 => TemplateMetadata {
                work_type: WorkType::Recover,
                membrane_types: vec![MembraneType::TpoFleece],
                attachment_methods: vec![AttachmentMethod::MechanicallyAttached],
                deck_types: vec![DeckType::Steel],
                sections: vec![
                    "project_overview",
                    "scope_of_work",
                    "materials",
                    "installation",
                    "fleeceback_requirements",
                ],
                complexity: Complexity::Standard,
                estimated_duration: "4-6 days per 10,000 sf",
                restrictions: vec!["Not approved for Prologis projects"],
            },
            TemplateId::T5 => TemplateMetadata {
                work_type: WorkType::Recover,
                membrane_types: vec![MembraneType::Tpo],
                attachment_methods: vec![AttachmentMethod::RhinoBond],
                deck_types: vec![DeckType::StructuralStandingSeam],
                sections: vec![
                    "project_overview",
                    "scope_of_work",
                    "materials",
                    "installation",
                    "rhino_bond_requirements",
                    "eps_flute_fill",
                ],
                complexity: Complexity::Complex,
                estimated_duration: "6-8 days per 10,000 sf",
                restrictions: vec![],
            },
            TemplateId::T6 => TemplateMetadata {
                work_type: WorkType::Tearoff,
                membrane_types: vec![MembraneType::Tpo],
                attachment_methods: vec![AttachmentMethod::MechanicallyAttached],
                deck_types: vec![DeckType::Steel],
                sections: vec![
                    "project_overview",
                    "tearoff_requirements",
                    "scope_of_work",
                    "materials",
                    "insulation",
                    "installation",
                    "fastening_requirements",
                    "warranty",
                ],
                complexity: Complexity::Standard,
                estimated_duration: "7-10 days per 10,000 sf",
                restrictions: vec![],
            },
            TemplateId::T7 => TemplateMetadata {
                work_type: WorkType::Tearoff,
                membrane_types: vec![MembraneType::Tpo],
                attachment_methods: vec![AttachmentMethod::MechanicallyAttached],
                deck_types: vec![DeckType::LightweightConcrete, DeckType::Steel],
                sections: vec![
                    "project_overview",
                    "tearoff_requirements",
                    "scope_of_work",
                    "materials",
                    "insulation",
                    "installation",
                    "lwc_considerations",
                ],
                complexity: Complexity::Standard,
                estimated_duration: "8-11 days per 10,000 sf",
                restrictions: vec![],
            },
            TemplateId::T8 => TemplateMetadata {
                work_type: WorkType::Tearoff,
                membrane_types: vec![MembraneType::Tpo],
                attachment_methods: vec![AttachmentMethod::FullyAdhered],
                deck_types: vec![DeckType::Gypsum],
                sections: vec![
                    "project_overview",
                    "tearoff_requirements",
                    "scope_of_work",
                    "materials",
                    "adhered_insulation",
                    "adhered_membrane",
                    "gypsum_requirements",
                ],
                complexity: Complexity::Complex,
                estimated_duration: "9-12 days per 10,000 sf",
                restrictions: vec![],
            },
        }
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Selection confidence level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    /// Exact specification match
    #[serde(rename = "high")]
    High,
    /// Matched with the deck type unresolved
    #[serde(rename = "medium")]
    Medium,
    /// Default fallback; manual review recommended
    #[serde(rename = "low")]
    Low,
}

/// The normalized specification the selector keyed on, kept for audit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionLogic {
    /// Normalized work scope
    pub work_type: WorkType,
    /// Normalized membrane
    pub membrane_type: MembraneType,
    /// Normalized attachment method
    pub attachment_method: AttachmentMethod,
    /// Normalized deck, if resolved
    pub deck_type: Option<DeckType>,
}

/// Result of template selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSelection {
    /// Selected template
    pub template_id: TemplateId,

    /// Full catalog name of the selected template
    pub template_name: String,

    /// One-line description
    pub description: String,

    /// Selection confidence
    pub confidence: Confidence,

    /// The key the selector matched on
    pub selection_logic: SelectionLogic,

    /// Notes for the estimator (verification asks, restrictions)
    pub notes: Vec<String>,

    /// Production-rate guidance from the catalog
    pub estimated_duration: String,
}

/// Exact-match lookup over the template mapping.
fn exact_match(
    work: WorkType,
    membrane: MembraneType,
    attachment: AttachmentMethod,
    deck: Option<DeckType>,
) -> Option<TemplateId> {
    use AttachmentMethod as A;
    use DeckType as D;
    use MembraneType as M;
    use WorkType as W;

    match (work, membrane, attachment, deck) {
        // Recover templates
        (W::Recover, M::Tpo, A::MechanicallyAttached, Some(D::Steel)) => Some(TemplateId::T2),
        (W::Recover, M::Tpo, A::MechanicallyAttached, Some(D::Concrete)) => Some(TemplateId::T2),
        (W::Recover, M::TpoFleece, A::MechanicallyAttached, Some(D::Steel)) => Some(TemplateId::T4),
        (W::Recover, M::Tpo, A::RhinoBond, Some(D::StructuralStandingSeam)) => Some(TemplateId::T5),

        // Tearoff templates
        (W::Tearoff, M::Tpo, A::MechanicallyAttached, Some(D::Steel)) => Some(TemplateId::T6),
        (W::Tearoff, M::Tpo, A::MechanicallyAttached, Some(D::LightweightConcrete)) => {
            Some(TemplateId::T7)
        }
        (W::Tearoff, M::Tpo, A::FullyAdhered, Some(D::Gypsum)) => Some(TemplateId::T8),

        // Deck-agnostic fallbacks
        (W::Recover, M::Tpo, A::MechanicallyAttached, None) => Some(TemplateId::T2),
        (W::Tearoff, M::Tpo, A::MechanicallyAttached, None) => Some(TemplateId::T6),

        _ => None,
    }
}

/// Select the best-fitting template for a takeoff.
///
/// Never fails: when no mapping matches, the standard T2 recover template
/// is returned at low confidence with manual-review notes.
pub fn select_template(takeoff: &TakeoffData) -> TemplateSelection {
    let logic = SelectionLogic {
        work_type: takeoff.project_type.unwrap_or_default(),
        membrane_type: takeoff.membrane_type,
        attachment_method: takeoff.fastening_pattern,
        deck_type: takeoff.deck_type,
    };

    // Exact match first
    if let Some(id) = exact_match(
        logic.work_type,
        logic.membrane_type,
        logic.attachment_method,
        logic.deck_type,
    ) {
        return build_selection(id, logic, Confidence::High, Vec::new());
    }

    // Retry with the deck unresolved
    if let Some(id) = exact_match(
        logic.work_type,
        logic.membrane_type,
        logic.attachment_method,
        None,
    ) {
        return build_selection(
            id,
            logic,
            Confidence::Medium,
            vec!["Deck type needs verification for optimal template selection".to_string()],
        );
    }

    // Ultimate fallback
    build_selection(
        TemplateId::T2,
        logic,
        Confidence::Low,
        vec![
            "No exact template match found for specified parameters".to_string(),
            "Using default TPO recover template".to_string(),
            "Manual review recommended for template selection".to_string(),
        ],
    )
}

fn build_selection(
    id: TemplateId,
    logic: SelectionLogic,
    confidence: Confidence,
    mut notes: Vec<String>,
) -> TemplateSelection {
    let metadata = id.metadata();
    for restriction in &metadata.restrictions {
        notes.push(format!("Template restriction: {}", restriction));
    }

    TemplateSelection {
        template_id: id,
        template_name: id.full_name().to_string(),
        description: id.description().to_string(),
        confidence,
        selection_logic: logic,
        notes,
        estimated_duration: metadata.estimated_duration.to_string(),
    }
}

// ============================================================================
// Compatibility Validation
// ============================================================================

/// Outcome of checking a (possibly manually chosen) template against a takeoff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityReport {
    /// True when no hard mismatches were found
    pub compatible: bool,
    /// Hard mismatches (work type, membrane)
    pub errors: Vec<String>,
    /// Soft mismatches (deck, restrictions)
    pub warnings: Vec<String>,
    /// Overall confidence in the pairing
    pub confidence: Confidence,
}

/// Validate that a selected template is compatible with the takeoff.
pub fn validate_compatibility(template: TemplateId, takeoff: &TakeoffData) -> CompatibilityReport {
    let metadata = template.metadata();
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let work_type = takeoff.project_type.unwrap_or_default();
    if work_type != metadata.work_type {
        errors.push(format!(
            "Work type mismatch: template is for {}, project is {}",
            metadata.work_type, work_type
        ));
    }

    if !metadata.membrane_types.contains(&takeoff.membrane_type) {
        errors.push(format!(
            "Membrane type '{}' not supported by this template",
            takeoff.membrane_type
        ));
    }

    if let Some(deck) = takeoff.deck_type {
        if !metadata.deck_types.contains(&deck) {
            warnings.push(format!(
                "Deck type '{}' may not be optimal for this template",
                deck
            ));
        }
    }

    for restriction in &metadata.restrictions {
        warnings.push(format!("Template restriction: {}", restriction));
    }

    let confidence = if !errors.is_empty() {
        Confidence::Low
    } else if !warnings.is_empty() {
        Confidence::Medium
    } else {
        Confidence::High
    };

    CompatibilityReport {
        compatible: errors.is_empty(),
        errors,
        warnings,
        confidence,
    }
}

/// List catalog templates, optionally filtered by work type and membrane.
pub fn available_templates(
    work_type: Option<WorkType>,
    membrane: Option<MembraneType>,
) -> Vec<TemplateId> {
    TemplateId::ALL
        .into_iter()
        .filter(|id| {
            let metadata = id.metadata();
            work_type.map_or(true, |w| metadata.work_type == w)
                && membrane.map_or(true, |m| metadata.membrane_types.contains(&m))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn takeoff(
        work: WorkType,
        membrane: MembraneType,
        attachment: AttachmentMethod,
        deck: Option<DeckType>,
    ) -> TakeoffData {
        TakeoffData {
            project_name: "Test Project".to_string(),
            address: "100 Industrial Way, Anywhere".to_string(),
            roof_area: 25000.0,
            membrane_type: membrane,
            fastening_pattern: attachment,
            project_type: Some(work),
            deck_type: deck,
            ..Default::default()
        }
    }

    #[test]
    fn test_recover_tpo_ma_steel_selects_t2() {
        let selection = select_template(&takeoff(
            WorkType::Recover,
            MembraneType::Tpo,
            AttachmentMethod::MechanicallyAttached,
            Some(DeckType::Steel),
        ));
        assert_eq!(selection.template_id, TemplateId::T2);
        assert_eq!(selection.confidence, Confidence::High);
        assert!(selection.notes.is_empty());
    }

    #[test]
    fn test_tearoff_adhered_gypsum_selects_t8() {
        let selection = select_template(&takeoff(
            WorkType::Tearoff,
            MembraneType::Tpo,
            AttachmentMethod::FullyAdhered,
            Some(DeckType::Gypsum),
        ));
        assert_eq!(selection.template_id, TemplateId::T8);
        assert_eq!(selection.confidence, Confidence::High);
    }

    #[test]
    fn test_rhino_bond_ssr_selects_t5() {
        let selection = select_template(&takeoff(
            WorkType::Recover,
            MembraneType::Tpo,
            AttachmentMethod::RhinoBond,
            Some(DeckType::StructuralStandingSeam),
        ));
        assert_eq!(selection.template_id, TemplateId::T5);
    }

    #[test]
    fn test_unknown_deck_falls_back_medium() {
        let selection = select_template(&takeoff(
            WorkType::Tearoff,
            MembraneType::Tpo,
            AttachmentMethod::MechanicallyAttached,
            None,
        ));
        // Deck-agnostic mapping hits directly at high confidence
        assert_eq!(selection.template_id, TemplateId::T6);
        assert_eq!(selection.confidence, Confidence::High);

        // An unmapped deck drops to the deck-agnostic row at medium
        let selection = select_template(&takeoff(
            WorkType::Tearoff,
            MembraneType::Tpo,
            AttachmentMethod::MechanicallyAttached,
            Some(DeckType::Wood),
        ));
        assert_eq!(selection.template_id, TemplateId::T6);
        assert_eq!(selection.confidence, Confidence::Medium);
        assert!(selection.notes[0].contains("verification"));
    }

    #[test]
    fn test_no_match_falls_back_to_t2_low() {
        let selection = select_template(&takeoff(
            WorkType::Tearoff,
            MembraneType::Epdm,
            AttachmentMethod::Ballasted,
            Some(DeckType::Wood),
        ));
        assert_eq!(selection.template_id, TemplateId::T2);
        assert_eq!(selection.confidence, Confidence::Low);
        assert!(selection.notes.iter().any(|n| n.contains("Manual review")));
    }

    #[test]
    fn test_fleeceback_restriction_noted() {
        let selection = select_template(&takeoff(
            WorkType::Recover,
            MembraneType::TpoFleece,
            AttachmentMethod::MechanicallyAttached,
            Some(DeckType::Steel),
        ));
        assert_eq!(selection.template_id, TemplateId::T4);
        assert!(selection.notes.iter().any(|n| n.contains("Prologis")));
    }

    #[test]
    fn test_compatibility_work_type_mismatch() {
        let data = takeoff(
            WorkType::Recover,
            MembraneType::Tpo,
            AttachmentMethod::MechanicallyAttached,
            Some(DeckType::Steel),
        );
        let report = validate_compatibility(TemplateId::T6, &data);
        assert!(!report.compatible);
        assert_eq!(report.confidence, Confidence::Low);
        assert!(report.errors[0].contains("Work type mismatch"));
    }

    #[test]
    fn test_compatibility_deck_warning() {
        let data = takeoff(
            WorkType::Tearoff,
            MembraneType::Tpo,
            AttachmentMethod::MechanicallyAttached,
            Some(DeckType::Gypsum),
        );
        let report = validate_compatibility(TemplateId::T6, &data);
        assert!(report.compatible);
        assert_eq!(report.confidence, Confidence::Medium);
        assert!(report.warnings[0].contains("may not be optimal"));
    }

    #[test]
    fn test_available_templates_filtering() {
        let tearoffs = available_templates(Some(WorkType::Tearoff), None);
        assert_eq!(
            tearoffs,
            vec![TemplateId::T6, TemplateId::T7, TemplateId::T8]
        );

        let fleece = available_templates(None, Some(MembraneType::TpoFleece));
        assert_eq!(fleece, vec![TemplateId::T4]);
    }
}
