//! # Roofing System Vocabulary
//!
//! Enumerations for the roofing system attributes that drive template and
//! section selection: work type, membrane, attachment method, deck, and
//! insulation.
//!
//! Each enum offers strict parsing (`from_str_flexible`, which errors on
//! unknown values) and lenient normalization (`normalize`, which falls back
//! to the industry-default the way the original intake form did).
//!
//! ## Example
//!
//! ```rust
//! use sow_core::roofing::{AttachmentMethod, MembraneType};
//!
//! let membrane = MembraneType::from_str_flexible("tpo fleeceback").unwrap();
//! assert_eq!(membrane, MembraneType::TpoFleece);
//!
//! // Lenient normalization defaults rather than failing
//! assert_eq!(AttachmentMethod::normalize("unknown"), AttachmentMethod::MechanicallyAttached);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{SowError, SowResult};

// ============================================================================
// Work Type
// ============================================================================

/// Scope of the roofing work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WorkType {
    /// New membrane over the existing assembly
    #[default]
    #[serde(rename = "recover")]
    Recover,

    /// Tear off down to the deck and replace
    #[serde(rename = "tearoff")]
    Tearoff,
}

impl WorkType {
    /// All work type variants for UI selection
    pub const ALL: [WorkType; 2] = [WorkType::Recover, WorkType::Tearoff];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> SowResult<Self> {
        let lower = s.trim().to_lowercase();
        if lower.contains("recover") || lower.contains("re-cover") {
            Ok(WorkType::Recover)
        } else if lower.contains("tearoff") || lower.contains("tear-off") || lower.contains("replacement") {
            Ok(WorkType::Tearoff)
        } else {
            Err(SowError::invalid_input(
                "project_type",
                s,
                "Expected recover or tearoff",
            ))
        }
    }

    /// Lenient normalization; defaults to recover like the intake form
    pub fn normalize(s: &str) -> Self {
        Self::from_str_flexible(s).unwrap_or_default()
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkType::Recover => "Recover",
            WorkType::Tearoff => "Tearoff & Replace",
        }
    }
}

impl std::fmt::Display for WorkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Membrane Type
// ============================================================================

/// Single-ply or built-up membrane type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MembraneType {
    /// Thermoplastic polyolefin (the default commercial membrane)
    #[default]
    #[serde(rename = "TPO")]
    Tpo,

    /// Fleece-backed TPO
    #[serde(rename = "TPO Fleeceback")]
    TpoFleece,

    /// Ethylene propylene diene monomer rubber
    #[serde(rename = "EPDM")]
    Epdm,

    /// Polyvinyl chloride
    #[serde(rename = "PVC")]
    Pvc,

    /// Modified bitumen
    #[serde(rename = "Modified Bitumen")]
    ModifiedBitumen,

    /// Built-up roof (hot asphalt plies)
    #[serde(rename = "Built-Up")]
    BuiltUp,
}

impl MembraneType {
    /// All membrane variants for UI selection
    pub const ALL: [MembraneType; 6] = [
        MembraneType::Tpo,
        MembraneType::TpoFleece,
        MembraneType::Epdm,
        MembraneType::Pvc,
        MembraneType::ModifiedBitumen,
        MembraneType::BuiltUp,
    ];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> SowResult<Self> {
        let upper = s.trim().to_uppercase();
        if upper.contains("FLEECE") {
            Ok(MembraneType::TpoFleece)
        } else if upper.contains("TPO") {
            Ok(MembraneType::Tpo)
        } else if upper.contains("EPDM") {
            Ok(MembraneType::Epdm)
        } else if upper.contains("PVC") {
            Ok(MembraneType::Pvc)
        } else if upper.contains("MOD") && upper.contains("BIT") {
            Ok(MembraneType::ModifiedBitumen)
        } else if upper.contains("BUILT") || upper.contains("BUR") {
            Ok(MembraneType::BuiltUp)
        } else {
            Err(SowError::invalid_input(
                "membrane_type",
                s,
                "Expected TPO, TPO Fleeceback, EPDM, PVC, Modified Bitumen, or Built-Up",
            ))
        }
    }

    /// Lenient normalization; defaults to TPO like the intake form
    pub fn normalize(s: &str) -> Self {
        Self::from_str_flexible(s).unwrap_or_default()
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            MembraneType::Tpo => "TPO",
            MembraneType::TpoFleece => "TPO Fleeceback",
            MembraneType::Epdm => "EPDM",
            MembraneType::Pvc => "PVC",
            MembraneType::ModifiedBitumen => "Modified Bitumen",
            MembraneType::BuiltUp => "Built-Up",
        }
    }
}

impl std::fmt::Display for MembraneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Attachment Method
// ============================================================================

/// Membrane attachment / fastening pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AttachmentMethod {
    /// Screws and plates in the seams
    #[default]
    #[serde(rename = "Mechanically Attached")]
    MechanicallyAttached,

    /// Bonding adhesive over the full field
    #[serde(rename = "Fully Adhered")]
    FullyAdhered,

    /// Induction-welded plates (RhinoBond and equivalents)
    #[serde(rename = "Rhino Bond")]
    RhinoBond,

    /// Loose-laid under ballast
    #[serde(rename = "Ballasted")]
    Ballasted,
}

impl AttachmentMethod {
    /// All attachment variants for UI selection
    pub const ALL: [AttachmentMethod; 4] = [
        AttachmentMethod::MechanicallyAttached,
        AttachmentMethod::FullyAdhered,
        AttachmentMethod::RhinoBond,
        AttachmentMethod::Ballasted,
    ];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> SowResult<Self> {
        let lower = s.trim().to_lowercase();
        if lower.contains("rhino") || lower.contains("induction") {
            Ok(AttachmentMethod::RhinoBond)
        } else if lower.contains("adhered") || lower.contains("fully") {
            Ok(AttachmentMethod::FullyAdhered)
        } else if lower.contains("ballast") {
            Ok(AttachmentMethod::Ballasted)
        } else if lower.contains("mechanical") || lower.contains("attached") {
            Ok(AttachmentMethod::MechanicallyAttached)
        } else {
            Err(SowError::invalid_input(
                "fastening_pattern",
                s,
                "Expected Mechanically Attached, Fully Adhered, Rhino Bond, or Ballasted",
            ))
        }
    }

    /// Lenient normalization; defaults to mechanically attached
    pub fn normalize(s: &str) -> Self {
        Self::from_str_flexible(s).unwrap_or_default()
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            AttachmentMethod::MechanicallyAttached => "Mechanically Attached",
            AttachmentMethod::FullyAdhered => "Fully Adhered",
            AttachmentMethod::RhinoBond => "Rhino Bond",
            AttachmentMethod::Ballasted => "Ballasted",
        }
    }
}

impl std::fmt::Display for AttachmentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Deck Type
// ============================================================================

/// Structural roof deck type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckType {
    /// Steel (most common commercial deck)
    #[serde(rename = "Steel")]
    Steel,

    /// Structural concrete
    #[serde(rename = "Concrete")]
    Concrete,

    /// Lightweight insulating concrete over steel
    #[serde(rename = "Lightweight Concrete")]
    LightweightConcrete,

    /// Poured or plank gypsum
    #[serde(rename = "Gypsum")]
    Gypsum,

    /// Wood plank or panel
    #[serde(rename = "Wood")]
    Wood,

    /// Structural standing seam metal roof
    #[serde(rename = "Structural Standing Seam")]
    StructuralStandingSeam,
}

impl DeckType {
    /// All deck variants for UI selection
    pub const ALL: [DeckType; 6] = [
        DeckType::Steel,
        DeckType::Concrete,
        DeckType::LightweightConcrete,
        DeckType::Gypsum,
        DeckType::Wood,
        DeckType::StructuralStandingSeam,
    ];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> SowResult<Self> {
        Self::normalize(s).ok_or_else(|| {
            SowError::invalid_input(
                "deck_type",
                s,
                "Expected Steel, Concrete, Lightweight Concrete, Gypsum, Wood, \
                 or Structural Standing Seam",
            )
        })
    }

    /// Lenient normalization; unknown decks stay unresolved (None) so the
    /// template selector can fall back with a verification note.
    pub fn normalize(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        if lower.is_empty() {
            None
        } else if lower.contains("standing") && lower.contains("seam") {
            Some(DeckType::StructuralStandingSeam)
        } else if lower.contains("steel") {
            Some(DeckType::Steel)
        } else if lower.contains("concrete") {
            if lower.contains("lightweight") || lower.contains("lwc") {
                Some(DeckType::LightweightConcrete)
            } else {
                Some(DeckType::Concrete)
            }
        } else if lower.contains("gypsum") {
            Some(DeckType::Gypsum)
        } else if lower.contains("wood") {
            Some(DeckType::Wood)
        } else {
            None
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            DeckType::Steel => "Steel",
            DeckType::Concrete => "Concrete",
            DeckType::LightweightConcrete => "Lightweight Concrete",
            DeckType::Gypsum => "Gypsum",
            DeckType::Wood => "Wood",
            DeckType::StructuralStandingSeam => "Structural Standing Seam",
        }
    }
}

impl std::fmt::Display for DeckType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Insulation Type
// ============================================================================

/// Roof insulation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InsulationType {
    /// Polyisocyanurate board (default commercial insulation)
    #[default]
    #[serde(rename = "Polyiso")]
    Polyiso,

    /// Extruded polystyrene
    #[serde(rename = "XPS")]
    Xps,

    /// Expanded polystyrene
    #[serde(rename = "EPS")]
    Eps,

    /// Mineral wool board
    #[serde(rename = "Mineral Wool")]
    MineralWool,

    /// No insulation in the assembly
    #[serde(rename = "None")]
    None,
}

impl InsulationType {
    /// All insulation variants for UI selection
    pub const ALL: [InsulationType; 5] = [
        InsulationType::Polyiso,
        InsulationType::Xps,
        InsulationType::Eps,
        InsulationType::MineralWool,
        InsulationType::None,
    ];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            InsulationType::Polyiso => "Polyiso",
            InsulationType::Xps => "XPS",
            InsulationType::Eps => "EPS",
            InsulationType::MineralWool => "Mineral Wool",
            InsulationType::None => "None",
        }
    }
}

impl std::fmt::Display for InsulationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membrane_parsing() {
        assert_eq!(MembraneType::normalize("tpo"), MembraneType::Tpo);
        assert_eq!(
            MembraneType::normalize("TPO Fleeceback"),
            MembraneType::TpoFleece
        );
        assert_eq!(
            MembraneType::from_str_flexible("modified bitumen").unwrap(),
            MembraneType::ModifiedBitumen
        );
        assert!(MembraneType::from_str_flexible("shingle").is_err());
        // Lenient path defaults to TPO
        assert_eq!(MembraneType::normalize("shingle"), MembraneType::Tpo);
    }

    #[test]
    fn test_attachment_parsing() {
        assert_eq!(
            AttachmentMethod::normalize("Rhino Bond"),
            AttachmentMethod::RhinoBond
        );
        assert_eq!(
            AttachmentMethod::normalize("induction welded"),
            AttachmentMethod::RhinoBond
        );
        assert_eq!(
            AttachmentMethod::normalize("fully adhered"),
            AttachmentMethod::FullyAdhered
        );
        assert_eq!(
            AttachmentMethod::normalize(""),
            AttachmentMethod::MechanicallyAttached
        );
    }

    #[test]
    fn test_deck_normalization() {
        assert_eq!(DeckType::normalize("Steel Deck"), Some(DeckType::Steel));
        assert_eq!(
            DeckType::normalize("lightweight concrete"),
            Some(DeckType::LightweightConcrete)
        );
        assert_eq!(DeckType::normalize("poured gypsum"), Some(DeckType::Gypsum));
    }

    #[test]
    fn test_deck_lwc_with_steel_mention() {
        // "steel" keyword is checked before concrete qualifiers
        assert_eq!(DeckType::normalize("lwc over steel"), Some(DeckType::Steel));
        assert_eq!(DeckType::normalize(""), None);
        assert_eq!(DeckType::normalize("tectum"), None);
    }

    #[test]
    fn test_work_type_parsing() {
        assert_eq!(WorkType::normalize("Re-Cover"), WorkType::Recover);
        assert_eq!(WorkType::normalize("full replacement"), WorkType::Tearoff);
        assert_eq!(WorkType::normalize(""), WorkType::Recover);
    }

    #[test]
    fn test_serde_wire_names() {
        assert_eq!(
            serde_json::to_string(&MembraneType::ModifiedBitumen).unwrap(),
            "\"Modified Bitumen\""
        );
        assert_eq!(
            serde_json::to_string(&AttachmentMethod::MechanicallyAttached).unwrap(),
            "\"Mechanically Attached\""
        );
        let deck: DeckType = serde_json::from_str("\"Lightweight Concrete\"").unwrap();
        assert_eq!(deck, DeckType::LightweightConcrete);
    }
}
