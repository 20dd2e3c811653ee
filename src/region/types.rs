use serde::{Deserialize, Serialize};

/// Economic indicators for one region snapshot.
///
/// Every field is optional: snapshots from the census extracts are often
/// partial, and a missing field contributes nothing to a score.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegionMetrics {
    #[serde(default)]
    pub employed_population: Option<f64>,
    #[serde(default)]
    pub total_population: Option<f64>,
    #[serde(default)]
    pub establishment_count: Option<f64>,
    #[serde(default)]
    pub annual_payroll: Option<f64>,
    #[serde(default)]
    pub median_income: Option<f64>,
    #[serde(default)]
    pub labor_force_count: Option<f64>,
}

/// A region as supplied by the caller. `key` is whatever code the caller
/// groups by (county FIPS, ZIP, ...); `msa` is carried for display only.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Region {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub msa: Option<String>,
    #[serde(default)]
    pub metrics: RegionMetrics,
}

impl Region {
    /// Name when present, otherwise the key.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }
}

/// Inputs to the valuation estimator.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FirmValuationInput {
    pub employee_count: u32,
    pub estimated_revenue: f64,
}

/// A named firm from a batch valuation file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FirmRecord {
    pub name: String,
    pub employee_count: u32,
    pub estimated_revenue: f64,
}

impl FirmRecord {
    pub fn valuation_input(&self) -> FirmValuationInput {
        FirmValuationInput {
            employee_count: self.employee_count,
            estimated_revenue: self.estimated_revenue,
        }
    }
}

/// Read an optional metric, treating missing and non-finite values as absent.
pub(crate) fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_label_prefers_name() {
        let mut region = Region {
            key: "06037".to_string(),
            name: None,
            msa: None,
            metrics: RegionMetrics::default(),
        };
        assert_eq!(region.label(), "06037");
        region.name = Some("Los Angeles County".to_string());
        assert_eq!(region.label(), "Los Angeles County");
    }

    #[test]
    fn test_partial_metrics_parse() {
        let json = r#"{"key": "17031", "metrics": {"median_income": 78000}}"#;
        let region: Region = serde_json::from_str(json).unwrap();
        assert_eq!(region.metrics.median_income, Some(78000.0));
        assert!(region.metrics.total_population.is_none());
        assert!(region.msa.is_none());
    }

    #[test]
    fn test_region_without_metrics_block() {
        let json = r#"{"key": "17031"}"#;
        let region: Region = serde_json::from_str(json).unwrap();
        assert_eq!(region.metrics, RegionMetrics::default());
    }

    #[test]
    fn test_unknown_metric_rejected() {
        let json = r#"{"key": "1", "metrics": {"gdp": 1.0}}"#;
        assert!(serde_json::from_str::<Region>(json).is_err());
    }

    #[test]
    fn test_present_filters_non_finite() {
        assert_eq!(present(Some(3.0)), Some(3.0));
        assert_eq!(present(Some(f64::NAN)), None);
        assert_eq!(present(Some(f64::INFINITY)), None);
        assert_eq!(present(None), None);
    }
}
