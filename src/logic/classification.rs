//! Soil group classification (USCS / IS).
//!
//! The nested coarse/fine decision tree is flattened into an ordered table.
//! Each guard carries the full path to its leaf, so the first matching row
//! wins and rows never overlap in meaning.

use crate::models::{Classification, SoilParameters};

struct ClassificationRule {
    guard: fn(&SoilParameters) -> bool,
    class: Classification,
}

fn coarse(p: &SoilParameters) -> bool {
    p.fines < 50.0
}

// Strict comparison: equal gravel and sand is treated as sand-dominant.
fn gravel_dominant(p: &SoilParameters) -> bool {
    coarse(p) && p.gravel > p.sand
}

fn clean(p: &SoilParameters) -> bool {
    p.fines < 5.0
}

fn silty_coarse(p: &SoilParameters) -> bool {
    p.plasticity_index < 4.0
}

fn silty_fine(p: &SoilParameters) -> bool {
    p.plasticity_index < 7.0
}

const CLASSIFICATION_TABLE: &[ClassificationRule] = &[
    ClassificationRule {
        guard: |p| gravel_dominant(p) && clean(p),
        class: Classification::GravelGraded,
    },
    ClassificationRule {
        guard: |p| gravel_dominant(p) && silty_coarse(p),
        class: Classification::SiltyGravel,
    },
    ClassificationRule {
        guard: gravel_dominant,
        class: Classification::ClayeyGravel,
    },
    ClassificationRule {
        guard: |p| coarse(p) && clean(p),
        class: Classification::SandGraded,
    },
    ClassificationRule {
        guard: |p| coarse(p) && silty_coarse(p),
        class: Classification::SiltySand,
    },
    ClassificationRule {
        guard: coarse,
        class: Classification::ClayeySand,
    },
    ClassificationRule {
        guard: |p| p.liquid_limit < 35.0 && silty_fine(p),
        class: Classification::SiltLow,
    },
    ClassificationRule {
        guard: |p| p.liquid_limit < 35.0,
        class: Classification::ClayLow,
    },
    ClassificationRule {
        guard: |p| p.liquid_limit < 50.0 && silty_fine(p),
        class: Classification::SiltMedium,
    },
    ClassificationRule {
        guard: |p| p.liquid_limit < 50.0,
        class: Classification::ClayMedium,
    },
    ClassificationRule {
        guard: silty_fine,
        class: Classification::SiltHigh,
    },
];

/// Classify a normalized sample. Anything not matched by the table is a
/// high-plasticity clay (fine-grained, LL >= 50, PI >= 7).
pub fn classify(params: &SoilParameters) -> Classification {
    CLASSIFICATION_TABLE
        .iter()
        .find(|rule| (rule.guard)(params))
        .map(|rule| rule.class)
        .unwrap_or(Classification::ClayHigh)
}
