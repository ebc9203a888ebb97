use super::{
    bearing_capacity::BearingCapacityRule, compressibility::CompressibilityRule,
    drainage::DrainageRule, expansiveness::ExpansivenessRule, moisture::MoistureDeviationRule,
    Rule,
};
use crate::logic::{behavior, classification, recommendations};
use crate::models::{AnalysisResult, SoilParameters, SoilSample, Suitability, NO_MAJOR_RISKS};

/// Accumulated score and raw risk list, before the sentinel is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreCard {
    pub score: i32,
    pub risks: Vec<String>,
}

impl ScoreCard {
    pub fn suitability(&self) -> Suitability {
        Suitability::from_score(self.score)
    }
}

pub struct SuitabilityEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl SuitabilityEngine {
    pub fn new() -> Self {
        // Order matters: risks are reported in rule order.
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(BearingCapacityRule),
            Box::new(CompressibilityRule),
            Box::new(ExpansivenessRule),
            Box::new(MoistureDeviationRule),
            Box::new(DrainageRule),
        ];

        Self { rules }
    }

    pub fn score(&self, params: &SoilParameters) -> ScoreCard {
        let mut card = ScoreCard {
            score: 0,
            risks: Vec::new(),
        };

        for finding in self.rules.iter().filter_map(|rule| rule.evaluate(params)) {
            card.score += finding.score_delta;
            card.risks.extend(finding.risk);
        }

        card
    }

    /// Classify and score a sample. Pure and total over numeric input.
    pub fn analyze(&self, sample: &SoilSample) -> AnalysisResult {
        let params = sample.normalize();

        let classification = classification::classify(&params);
        let behavior = behavior::observe(&params);
        let card = self.score(&params);
        let suitability = card.suitability();
        let recommendations = recommendations::recommend(&params, suitability);

        let risks = if card.risks.is_empty() {
            vec![NO_MAJOR_RISKS.to_string()]
        } else {
            card.risks
        };

        AnalysisResult {
            classification,
            behavior,
            suitability,
            suitability_text: suitability.description().to_string(),
            risks,
            recommendations,
            parameters: params,
        }
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for SuitabilityEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Classification;
    use crate::logic::recommendations::CONSULT_ENGINEER;

    fn scenario_one() -> SoilSample {
        SoilSample {
            liquid_limit: 30.0,
            plastic_limit: 20.0,
            plasticity_index: 10.0,
            gravel: 10.0,
            coarse_sand: 20.0,
            medium_sand: 20.0,
            fine_sand: 10.0,
            fines: 40.0,
            optimum_moisture: 12.0,
            max_dry_density: 17.0,
            natural_moisture: 13.0,
        }
    }

    fn scenario_two() -> SoilSample {
        SoilSample {
            liquid_limit: 60.0,
            plastic_limit: 20.0,
            plasticity_index: 40.0,
            gravel: 5.0,
            coarse_sand: 10.0,
            medium_sand: 10.0,
            fine_sand: 5.0,
            fines: 70.0,
            optimum_moisture: 15.0,
            max_dry_density: 15.0,
            natural_moisture: 20.0,
        }
    }

    #[test]
    fn clayey_sand_is_suitable() {
        let engine = SuitabilityEngine::new();
        let sample = scenario_one();

        let card = engine.score(&sample.normalize());
        assert_eq!(card.score, 3);
        assert!(card.risks.is_empty());

        let result = engine.analyze(&sample);
        assert_eq!(result.classification, Classification::ClayeySand);
        assert_eq!(result.suitability, Suitability::Suitable);
        assert_eq!(
            result.suitability_text,
            "Suitable for residential/light commercial construction"
        );
        assert_eq!(result.risks, vec![NO_MAJOR_RISKS]);
        assert_eq!(
            result.behavior,
            vec![
                "Medium plasticity - moderate volume change potential",
                "Coarse-grained soil - good drainage characteristics",
                "Moderate density - adequate compaction",
            ]
        );
        assert_eq!(result.recommendations.len(), 3);
        assert_eq!(result.parameters.sand, 50.0);
    }

    #[test]
    fn high_plasticity_clay_is_unsuitable() {
        let engine = SuitabilityEngine::new();
        let sample = scenario_two();

        let card = engine.score(&sample.normalize());
        assert_eq!(card.score, -6);

        let result = engine.analyze(&sample);
        assert_eq!(result.classification, Classification::ClayHigh);
        assert_eq!(result.suitability, Suitability::Unsuitable);
        assert_eq!(
            result.risks,
            vec![
                "Low bearing capacity - deep foundations recommended",
                "High compressibility - significant settlement expected",
                "Highly expansive soil - severe swelling/shrinkage risk",
                "Moisture content (20%) deviates from OMC (15%) - compaction issues",
                "Poor drainage - waterlogging risk, drainage system essential",
            ]
        );
        assert_eq!(result.recommendations.len(), 7);
        assert_eq!(result.behavior.len(), 2);
    }

    #[test]
    fn unremarkable_moderate_soil_falls_back_to_consult_engineer() {
        // Fine-grained at exactly F=50 (no F>50 triggers), low PI, adequate MDD.
        // Bearing +2 only, so MODERATELY SUITABLE with no targeted advice.
        let sample = SoilSample {
            liquid_limit: 30.0,
            plasticity_index: 5.0,
            fines: 50.0,
            max_dry_density: 17.0,
            optimum_moisture: 12.0,
            natural_moisture: 12.0,
            ..Default::default()
        };
        let result = SuitabilityEngine::new().analyze(&sample);
        assert_eq!(result.suitability, Suitability::ModeratelySuitable);
        assert_eq!(result.recommendations, CONSULT_ENGINEER);
    }

    #[test]
    fn unremarkable_unsuitable_soil_falls_back_to_consult_engineer() {
        // PI 20 gives +0 bearing and -1 compressibility with no targeted advice.
        let sample = SoilSample {
            liquid_limit: 30.0,
            plasticity_index: 20.0,
            fines: 30.0,
            max_dry_density: 17.0,
            ..Default::default()
        };
        let result = SuitabilityEngine::new().analyze(&sample);
        assert_eq!(result.suitability, Suitability::Unsuitable);
        assert_eq!(result.recommendations, CONSULT_ENGINEER);
    }

    #[test]
    fn score_never_rises_with_plasticity() {
        let engine = SuitabilityEngine::new();
        for fines in [10.0, 45.0, 60.0] {
            let mut previous = i32::MAX;
            for step in 0..=600 {
                let params = SoilParameters {
                    plasticity_index: step as f64 * 0.1,
                    fines,
                    liquid_limit: 40.0,
                    max_dry_density: 17.0,
                    ..Default::default()
                };
                let score = engine.score(&params).score;
                assert!(
                    score <= previous,
                    "score rose from {} to {} at PI={} F={}",
                    previous,
                    score,
                    params.plasticity_index,
                    fines
                );
                previous = score;
            }
        }
    }

    #[test]
    fn risks_and_recommendations_are_never_empty() {
        let engine = SuitabilityEngine::new();
        let values = [-10.0, 0.0, 4.0, 5.0, 7.0, 12.0, 17.0, 35.0, 50.0, 120.0];
        for &ll in &values {
            for &pi in &values {
                for &fines in &values {
                    for &mdd in &[0.0, 16.0, 17.0, 19.0] {
                        let sample = SoilSample {
                            liquid_limit: ll,
                            plasticity_index: pi,
                            fines,
                            max_dry_density: mdd,
                            gravel: 20.0,
                            medium_sand: 20.0,
                            ..Default::default()
                        };
                        let result = engine.analyze(&sample);
                        assert!(!result.risks.is_empty());
                        assert!(!result.recommendations.is_empty());
                        assert!((1..=3).contains(&result.behavior.len()));
                    }
                }
            }
        }
    }

    #[test]
    fn analysis_is_idempotent() {
        let engine = SuitabilityEngine::new();
        let a = serde_json::to_vec(&engine.analyze(&scenario_two())).unwrap();
        let b = serde_json::to_vec(&engine.analyze(&scenario_two())).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn suitability_text_matches_verdict() {
        let engine = SuitabilityEngine::new();
        for sample in [scenario_one(), scenario_two(), SoilSample::default()] {
            let result = engine.analyze(&sample);
            assert_eq!(result.suitability_text, result.suitability.description());
        }
    }

    #[test]
    fn rules_are_listed_in_evaluation_order() {
        let ids: Vec<_> = SuitabilityEngine::new()
            .list_rules()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(
            ids,
            vec![
                "bearing_capacity",
                "compressibility",
                "expansiveness",
                "moisture_deviation",
                "drainage"
            ]
        );
    }
}
