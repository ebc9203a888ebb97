use crate::models::SoilParameters;

pub const HIGHLY_PLASTIC: &str = "Highly plastic - prone to volume changes with moisture";
pub const MEDIUM_PLASTICITY: &str = "Medium plasticity - moderate volume change potential";
pub const LOW_PLASTICITY: &str = "Low plasticity - minimal volume change";
pub const FINE_GRAINED: &str = "Fine-grained soil - susceptible to moisture sensitivity";
pub const COARSE_GRAINED: &str = "Coarse-grained soil - good drainage characteristics";
pub const HIGH_DENSITY: &str = "High density achievable - good compaction potential";
pub const MODERATE_DENSITY: &str = "Moderate density - adequate compaction";

/// Behavioral observations, in fixed order: plasticity, grain size, then
/// compaction potential when the density warrants a note.
pub fn observe(params: &SoilParameters) -> Vec<String> {
    let mut behavior = Vec::with_capacity(3);

    let plasticity = if params.plasticity_index > 17.0 {
        HIGHLY_PLASTIC
    } else if params.plasticity_index > 7.0 {
        MEDIUM_PLASTICITY
    } else {
        LOW_PLASTICITY
    };
    behavior.push(plasticity.to_string());

    let grain = if params.fines > 50.0 {
        FINE_GRAINED
    } else {
        COARSE_GRAINED
    };
    behavior.push(grain.to_string());

    if params.max_dry_density > 18.0 {
        behavior.push(HIGH_DENSITY.to_string());
    } else if params.max_dry_density > 16.0 {
        behavior.push(MODERATE_DENSITY.to_string());
    }

    behavior
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pi: f64, fines: f64, mdd: f64) -> SoilParameters {
        SoilParameters {
            plasticity_index: pi,
            fines,
            max_dry_density: mdd,
            ..Default::default()
        }
    }

    #[test]
    fn plasticity_tiers() {
        assert_eq!(observe(&params(18.0, 0.0, 0.0))[0], HIGHLY_PLASTIC);
        assert_eq!(observe(&params(17.0, 0.0, 0.0))[0], MEDIUM_PLASTICITY);
        assert_eq!(observe(&params(7.0, 0.0, 0.0))[0], LOW_PLASTICITY);
    }

    #[test]
    fn fines_of_fifty_reads_as_coarse() {
        // Behavior uses a strict F > 50, unlike classification
        assert_eq!(observe(&params(0.0, 50.0, 0.0))[1], COARSE_GRAINED);
        assert_eq!(observe(&params(0.0, 50.1, 0.0))[1], FINE_GRAINED);
    }

    #[test]
    fn compaction_note_is_optional() {
        assert_eq!(observe(&params(0.0, 0.0, 16.0)).len(), 2);
        assert_eq!(observe(&params(0.0, 0.0, 17.0))[2], MODERATE_DENSITY);
        assert_eq!(observe(&params(0.0, 0.0, 18.0))[2], MODERATE_DENSITY);
        assert_eq!(observe(&params(0.0, 0.0, 18.5))[2], HIGH_DENSITY);
    }
}
