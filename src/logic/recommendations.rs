use crate::models::{SoilParameters, Suitability};

struct RecommendationRule {
    guard: fn(&SoilParameters) -> bool,
    items: &'static [&'static str],
}

const TARGETED: &[RecommendationRule] = &[
    RecommendationRule {
        guard: |p| p.plasticity_index > 25.0,
        items: &[
            "Use deep foundations (piles/piers) to reach stable strata",
            "Provide moisture barrier around foundation perimeter",
        ],
    },
    RecommendationRule {
        guard: |p| p.fines > 50.0,
        items: &[
            "Install proper drainage system to control groundwater",
            "Consider soil stabilization with lime/cement",
        ],
    },
    RecommendationRule {
        guard: |p| p.max_dry_density < 16.0,
        items: &["Improve compaction through mechanical stabilization"],
    },
    RecommendationRule {
        guard: |p| p.liquid_limit > 50.0,
        items: &[
            "Conduct consolidation tests for settlement analysis",
            "Consider preloading or ground improvement techniques",
        ],
    },
];

pub const STANDARD_PRACTICE: &[&str] = &[
    "Proceed with standard foundation design as per IS codes",
    "Maintain proper compaction at 95% of MDD",
    "Ensure adequate drainage around structures",
];

pub const CONSULT_ENGINEER: &[&str] = &[
    "Consult geotechnical engineer for detailed investigation",
    "Perform additional tests: triaxial, consolidation, CBR",
];

/// Engineering recommendations. Every targeted rule is checked in order;
/// when none fire, a suitable soil gets standard-practice advice and
/// anything else gets referred to an engineer. Never empty.
pub fn recommend(params: &SoilParameters, suitability: Suitability) -> Vec<String> {
    let mut recommendations: Vec<String> = TARGETED
        .iter()
        .filter(|rule| (rule.guard)(params))
        .flat_map(|rule| rule.items.iter().map(|s| s.to_string()))
        .collect();

    if suitability == Suitability::Suitable && recommendations.is_empty() {
        recommendations.extend(STANDARD_PRACTICE.iter().map(|s| s.to_string()));
    }

    if recommendations.is_empty() {
        recommendations.extend(CONSULT_ENGINEER.iter().map(|s| s.to_string()));
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> SoilParameters {
        SoilParameters {
            max_dry_density: 17.0,
            ..Default::default()
        }
    }

    #[test]
    fn targeted_rules_accumulate_in_order() {
        let p = SoilParameters {
            plasticity_index: 40.0,
            fines: 70.0,
            max_dry_density: 15.0,
            liquid_limit: 60.0,
            ..Default::default()
        };
        let recs = recommend(&p, Suitability::Unsuitable);
        assert_eq!(recs.len(), 7);
        assert!(recs[0].starts_with("Use deep foundations"));
        assert!(recs[2].starts_with("Install proper drainage"));
        assert!(recs[4].starts_with("Improve compaction"));
        assert!(recs[6].starts_with("Consider preloading"));
    }

    #[test]
    fn suitable_without_targets_gets_standard_practice() {
        let recs = recommend(&quiet(), Suitability::Suitable);
        assert_eq!(recs, STANDARD_PRACTICE);
    }

    #[test]
    fn non_suitable_without_targets_gets_consult_engineer() {
        assert_eq!(
            recommend(&quiet(), Suitability::ModeratelySuitable),
            CONSULT_ENGINEER
        );
        assert_eq!(recommend(&quiet(), Suitability::Unsuitable), CONSULT_ENGINEER);
    }

    #[test]
    fn targeted_rule_suppresses_fallbacks() {
        let p = SoilParameters {
            max_dry_density: 10.0,
            ..Default::default()
        };
        let recs = recommend(&p, Suitability::Suitable);
        assert_eq!(recs, vec!["Improve compaction through mechanical stabilization"]);
    }
}
