use super::{Finding, Rule};
use crate::models::SoilParameters;

/// Bearing capacity rule - the only rule that adds to the score
///
/// Exactly one tier always fires:
/// - PI <12 and coarse-grained (F <50): +3
/// - PI <20: +2, moderate bearing capacity
/// - otherwise: +0, low bearing capacity
pub struct BearingCapacityRule;

impl Rule for BearingCapacityRule {
    fn id(&self) -> &'static str {
        "bearing_capacity"
    }

    fn name(&self) -> &'static str {
        "Bearing Capacity"
    }

    fn evaluate(&self, params: &SoilParameters) -> Option<Finding> {
        let pi = params.plasticity_index;

        let finding = if pi < 12.0 && params.fines < 50.0 {
            Finding::new(3)
        } else if pi < 20.0 {
            Finding::new(2).with_risk("Moderate bearing capacity - may require deeper foundations")
        } else {
            Finding::new(0).with_risk("Low bearing capacity - deep foundations recommended")
        };

        Some(finding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(pi: f64, fines: f64) -> Finding {
        let params = SoilParameters {
            plasticity_index: pi,
            fines,
            ..Default::default()
        };
        BearingCapacityRule.evaluate(&params).unwrap()
    }

    #[test]
    fn coarse_low_plasticity_is_best() {
        assert_eq!(eval(11.9, 49.9), Finding::new(3));
    }

    #[test]
    fn fine_grained_low_plasticity_is_moderate() {
        let f = eval(5.0, 50.0);
        assert_eq!(f.score_delta, 2);
        assert!(f.risk.unwrap().starts_with("Moderate bearing capacity"));
    }

    #[test]
    fn high_plasticity_is_low_capacity() {
        let f = eval(20.0, 10.0);
        assert_eq!(f.score_delta, 0);
        assert!(f.risk.unwrap().starts_with("Low bearing capacity"));
    }
}
