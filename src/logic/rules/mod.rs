pub mod bearing_capacity;
pub mod compressibility;
pub mod drainage;
pub mod engine;
pub mod expansiveness;
pub mod moisture;

pub use engine::SuitabilityEngine;

use crate::models::SoilParameters;

/// Contribution of a single rule to the suitability score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub score_delta: i32,
    pub risk: Option<String>,
}

impl Finding {
    pub fn new(score_delta: i32) -> Self {
        Self {
            score_delta,
            risk: None,
        }
    }

    pub fn with_risk(mut self, risk: impl Into<String>) -> Self {
        self.risk = Some(risk.into());
        self
    }
}

/// Trait for construction suitability rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return a finding if it is triggered
    fn evaluate(&self, params: &SoilParameters) -> Option<Finding>;
}
