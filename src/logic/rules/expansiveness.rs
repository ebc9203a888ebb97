use super::{Finding, Rule};
use crate::models::SoilParameters;

/// Expansive soil rule
///
/// Plastic, fines-rich soils swell when wet and shrink when dry, which moves
/// shallow foundations.
///
/// Conditions:
/// - PI >35 and F >50: -3, highly expansive
/// - PI >25 and F >40: -2, moderately expansive
pub struct ExpansivenessRule;

impl Rule for ExpansivenessRule {
    fn id(&self) -> &'static str {
        "expansiveness"
    }

    fn name(&self) -> &'static str {
        "Expansive Soil"
    }

    fn evaluate(&self, params: &SoilParameters) -> Option<Finding> {
        let pi = params.plasticity_index;
        let fines = params.fines;

        if pi > 35.0 && fines > 50.0 {
            Some(Finding::new(-3).with_risk("Highly expansive soil - severe swelling/shrinkage risk"))
        } else if pi > 25.0 && fines > 40.0 {
            Some(Finding::new(-2).with_risk("Moderately expansive - foundation movement possible"))
        } else {
            None
        }
    }
}
