use super::{Finding, Rule};
use crate::models::SoilParameters;

/// Maximum tolerated gap between natural and optimum moisture, in percent.
const MAX_MOISTURE_DEVIATION: f64 = 4.0;

/// Moisture deviation rule
///
/// Soil far from its optimum moisture content cannot be compacted to MDD
/// without drying or wetting first.
pub struct MoistureDeviationRule;

impl Rule for MoistureDeviationRule {
    fn id(&self) -> &'static str {
        "moisture_deviation"
    }

    fn name(&self) -> &'static str {
        "Moisture Deviation"
    }

    fn evaluate(&self, params: &SoilParameters) -> Option<Finding> {
        if params.moisture_deviation() <= MAX_MOISTURE_DEVIATION {
            return None;
        }

        Some(Finding::new(-1).with_risk(format!(
            "Moisture content ({}%) deviates from OMC ({}%) - compaction issues",
            params.natural_moisture, params.optimum_moisture
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(nmc: f64, omc: f64) -> Option<Finding> {
        MoistureDeviationRule.evaluate(&SoilParameters {
            natural_moisture: nmc,
            optimum_moisture: omc,
            ..Default::default()
        })
    }

    #[test]
    fn deviation_of_exactly_four_is_tolerated() {
        assert_eq!(eval(16.0, 12.0), None);
        assert_eq!(eval(8.0, 12.0), None);
    }

    #[test]
    fn risk_message_carries_both_values() {
        let finding = eval(20.0, 15.0).unwrap();
        assert_eq!(finding.score_delta, -1);
        assert_eq!(
            finding.risk.as_deref(),
            Some("Moisture content (20%) deviates from OMC (15%) - compaction issues")
        );

        let finding = eval(7.5, 12.25).unwrap();
        assert_eq!(
            finding.risk.as_deref(),
            Some("Moisture content (7.5%) deviates from OMC (12.25%) - compaction issues")
        );
    }
}
