use super::{Finding, Rule};
use crate::models::SoilParameters;

/// Drainage rule - informational, never changes the score
///
/// Conditions:
/// - F >50 and PI >15
pub struct DrainageRule;

impl Rule for DrainageRule {
    fn id(&self) -> &'static str {
        "drainage"
    }

    fn name(&self) -> &'static str {
        "Drainage"
    }

    fn evaluate(&self, params: &SoilParameters) -> Option<Finding> {
        if params.fines > 50.0 && params.plasticity_index > 15.0 {
            Some(Finding::new(0).with_risk("Poor drainage - waterlogging risk, drainage system essential"))
        } else {
            None
        }
    }
}
