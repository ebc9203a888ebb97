use super::{Finding, Rule};
use crate::models::SoilParameters;

/// Compressibility rule - settlement risk from high liquid limit or plasticity
///
/// Conditions:
/// - LL >50 or PI >30: -2, high compressibility
/// - LL >35 or PI >17: -1, moderate compressibility
pub struct CompressibilityRule;

impl Rule for CompressibilityRule {
    fn id(&self) -> &'static str {
        "compressibility"
    }

    fn name(&self) -> &'static str {
        "Compressibility"
    }

    fn evaluate(&self, params: &SoilParameters) -> Option<Finding> {
        let ll = params.liquid_limit;
        let pi = params.plasticity_index;

        if ll > 50.0 || pi > 30.0 {
            Some(
                Finding::new(-2)
                    .with_risk("High compressibility - significant settlement expected"),
            )
        } else if ll > 35.0 || pi > 17.0 {
            Some(Finding::new(-1).with_risk("Moderate compressibility - monitor settlement"))
        } else {
            None
        }
    }
}
