use super::SoilParameters;
use serde::{Deserialize, Serialize};

/// Placeholder risk entry used when no scoring rule reported a risk.
pub const NO_MAJOR_RISKS: &str = "No major risks identified";

/// USCS / IS soil group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "GW/GP - Well/Poorly graded Gravel")]
    GravelGraded,
    #[serde(rename = "GM - Silty Gravel")]
    SiltyGravel,
    #[serde(rename = "GC - Clayey Gravel")]
    ClayeyGravel,
    #[serde(rename = "SW/SP - Well/Poorly graded Sand")]
    SandGraded,
    #[serde(rename = "SM - Silty Sand")]
    SiltySand,
    #[serde(rename = "SC - Clayey Sand")]
    ClayeySand,
    #[serde(rename = "ML - Silt of Low Plasticity")]
    SiltLow,
    #[serde(rename = "CL - Clay of Low Plasticity")]
    ClayLow,
    #[serde(rename = "MI - Silt of Medium Plasticity")]
    SiltMedium,
    #[serde(rename = "CI - Clay of Medium Plasticity")]
    ClayMedium,
    #[serde(rename = "MH - Silt of High Plasticity")]
    SiltHigh,
    #[serde(rename = "CH - Clay of High Plasticity")]
    ClayHigh,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::GravelGraded => "GW/GP - Well/Poorly graded Gravel",
            Classification::SiltyGravel => "GM - Silty Gravel",
            Classification::ClayeyGravel => "GC - Clayey Gravel",
            Classification::SandGraded => "SW/SP - Well/Poorly graded Sand",
            Classification::SiltySand => "SM - Silty Sand",
            Classification::ClayeySand => "SC - Clayey Sand",
            Classification::SiltLow => "ML - Silt of Low Plasticity",
            Classification::ClayLow => "CL - Clay of Low Plasticity",
            Classification::SiltMedium => "MI - Silt of Medium Plasticity",
            Classification::ClayMedium => "CI - Clay of Medium Plasticity",
            Classification::SiltHigh => "MH - Silt of High Plasticity",
            Classification::ClayHigh => "CH - Clay of High Plasticity",
        }
    }

    /// Group symbol, e.g. "SC" or "GW/GP".
    pub fn symbol(&self) -> &'static str {
        self.as_str()
            .split_once(" - ")
            .map(|(symbol, _)| symbol)
            .unwrap_or_else(|| self.as_str())
    }

    pub fn is_coarse_grained(&self) -> bool {
        matches!(
            self,
            Classification::GravelGraded
                | Classification::SiltyGravel
                | Classification::ClayeyGravel
                | Classification::SandGraded
                | Classification::SiltySand
                | Classification::ClayeySand
        )
    }

    pub fn all() -> &'static [Classification] {
        &[
            Classification::GravelGraded,
            Classification::SiltyGravel,
            Classification::ClayeyGravel,
            Classification::SandGraded,
            Classification::SiltySand,
            Classification::ClayeySand,
            Classification::SiltLow,
            Classification::ClayLow,
            Classification::SiltMedium,
            Classification::ClayMedium,
            Classification::SiltHigh,
            Classification::ClayHigh,
        ]
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s) || c.symbol().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suitability {
    #[serde(rename = "UNSUITABLE")]
    Unsuitable,
    #[serde(rename = "MODERATELY SUITABLE")]
    ModeratelySuitable,
    #[serde(rename = "SUITABLE")]
    Suitable,
}

impl Suitability {
    pub fn from_score(score: i32) -> Self {
        if score >= 3 {
            Suitability::Suitable
        } else if score >= 0 {
            Suitability::ModeratelySuitable
        } else {
            Suitability::Unsuitable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Suitability::Suitable => "SUITABLE",
            Suitability::ModeratelySuitable => "MODERATELY SUITABLE",
            Suitability::Unsuitable => "UNSUITABLE",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Suitability::Suitable => "Suitable for residential/light commercial construction",
            Suitability::ModeratelySuitable => {
                "Moderately suitable - requires soil improvement measures"
            }
            Suitability::Unsuitable => "Not suitable without major ground improvement",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "SUITABLE" => Some(Suitability::Suitable),
            "MODERATELY SUITABLE" | "MODERATELY_SUITABLE" => Some(Suitability::ModeratelySuitable),
            "UNSUITABLE" => Some(Suitability::Unsuitable),
            _ => None,
        }
    }
}

impl std::fmt::Display for Suitability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Complete engine output for one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub classification: Classification,
    pub behavior: Vec<String>,
    pub suitability: Suitability,
    pub suitability_text: String,
    pub risks: Vec<String>,
    pub recommendations: Vec<String>,
    pub parameters: SoilParameters,
}
