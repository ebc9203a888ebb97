use serde::{Deserialize, Serialize};

/// Raw laboratory test values as submitted by the client.
///
/// Keys follow the lab sheet column headers. Any missing value is 0.
/// No range validation is done here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoilSample {
    #[serde(rename = "LL")]
    pub liquid_limit: f64,
    #[serde(rename = "PL")]
    pub plastic_limit: f64,
    #[serde(rename = "PI")]
    pub plasticity_index: f64,
    #[serde(rename = "G")]
    pub gravel: f64,
    #[serde(rename = "CS")]
    pub coarse_sand: f64,
    #[serde(rename = "MS")]
    pub medium_sand: f64,
    #[serde(rename = "FS")]
    pub fine_sand: f64,
    #[serde(rename = "F")]
    pub fines: f64,
    #[serde(rename = "OMC%")]
    pub optimum_moisture: f64,
    #[serde(rename = "MDD (kN/m3)")]
    pub max_dry_density: f64,
    #[serde(rename = "NMC (%)")]
    pub natural_moisture: f64,
}

impl SoilSample {
    pub fn total_sand(&self) -> f64 {
        self.coarse_sand + self.medium_sand + self.fine_sand
    }

    /// Collapse the three sand fractions into a single total.
    pub fn normalize(&self) -> SoilParameters {
        SoilParameters {
            liquid_limit: self.liquid_limit,
            plastic_limit: self.plastic_limit,
            plasticity_index: self.plasticity_index,
            gravel: self.gravel,
            sand: self.total_sand(),
            fines: self.fines,
            optimum_moisture: self.optimum_moisture,
            max_dry_density: self.max_dry_density,
            natural_moisture: self.natural_moisture,
        }
    }
}

/// Normalized parameter set consumed by the engine and echoed in results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoilParameters {
    #[serde(rename = "LL")]
    pub liquid_limit: f64,
    #[serde(rename = "PL")]
    pub plastic_limit: f64,
    #[serde(rename = "PI")]
    pub plasticity_index: f64,
    #[serde(rename = "Gravel")]
    pub gravel: f64,
    #[serde(rename = "Sand")]
    pub sand: f64,
    #[serde(rename = "Fines")]
    pub fines: f64,
    #[serde(rename = "OMC")]
    pub optimum_moisture: f64,
    #[serde(rename = "MDD")]
    pub max_dry_density: f64,
    #[serde(rename = "NMC")]
    pub natural_moisture: f64,
}

impl SoilParameters {
    pub fn moisture_deviation(&self) -> f64 {
        (self.natural_moisture - self.optimum_moisture).abs()
    }

    /// Rows for tabular display: (label, value, unit).
    pub fn table_rows(&self) -> [(&'static str, f64, &'static str); 9] {
        [
            ("Liquid Limit (LL)", self.liquid_limit, "%"),
            ("Plastic Limit (PL)", self.plastic_limit, "%"),
            ("Plasticity Index (PI)", self.plasticity_index, "-"),
            ("Gravel Content", self.gravel, "%"),
            ("Sand Content", self.sand, "%"),
            ("Fines Content", self.fines, "%"),
            ("Optimum Moisture Content (OMC)", self.optimum_moisture, "%"),
            ("Maximum Dry Density (MDD)", self.max_dry_density, "kN/m³"),
            ("Natural Moisture Content (NMC)", self.natural_moisture, "%"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_default_to_zero() {
        let sample: SoilSample = serde_json::from_str(r#"{"LL": 30}"#).unwrap();
        assert_eq!(sample.liquid_limit, 30.0);
        assert_eq!(sample.fines, 0.0);
        assert_eq!(sample.natural_moisture, 0.0);
    }

    #[test]
    fn lab_sheet_keys_are_recognized() {
        let sample: SoilSample = serde_json::from_str(
            r#"{"OMC%": 12, "MDD (kN/m3)": 17.5, "NMC (%)": 13.2, "CS": 20, "MS": 20, "FS": 10}"#,
        )
        .unwrap();
        assert_eq!(sample.optimum_moisture, 12.0);
        assert_eq!(sample.max_dry_density, 17.5);
        assert_eq!(sample.natural_moisture, 13.2);
        assert_eq!(sample.total_sand(), 50.0);
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        let result: std::result::Result<SoilSample, _> =
            serde_json::from_str(r#"{"LL": "thirty"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn normalize_sums_sand_fractions() {
        let sample = SoilSample {
            gravel: 10.0,
            coarse_sand: 5.0,
            medium_sand: 7.5,
            fine_sand: 2.5,
            ..Default::default()
        };
        let params = sample.normalize();
        assert_eq!(params.sand, 15.0);
        assert_eq!(params.gravel, 10.0);
    }

    #[test]
    fn parameters_serialize_with_report_keys() {
        let params = SoilSample {
            liquid_limit: 30.0,
            ..Default::default()
        }
        .normalize();
        let value = serde_json::to_value(params).unwrap();
        for key in ["LL", "PL", "PI", "Gravel", "Sand", "Fines", "OMC", "MDD", "NMC"] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(value["LL"], 30.0);
    }
}
