use super::config::BuyerConfig;
use super::engine::{clamp_unit, FactorContribution, ScoreResult};
use crate::region::types::present;
use crate::region::{Region, RegionMetrics};
use serde::Serialize;

/// Largest income, employment and establishment values across a cohort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CohortMaxima {
    pub median_income: f64,
    pub employed_population: f64,
    pub establishment_count: f64,
}

impl CohortMaxima {
    /// Maxima over `cohort`. Missing, non-finite and negative values are ignored,
    /// so an empty cohort has all maxima at 0.
    pub fn from_metrics<'a, I>(cohort: I) -> Self
    where
        I: IntoIterator<Item = &'a RegionMetrics>,
    {
        cohort
            .into_iter()
            .fold(CohortMaxima::default(), |acc, metrics| CohortMaxima {
                median_income: acc.median_income.max(value(metrics.median_income)),
                employed_population: acc
                    .employed_population
                    .max(value(metrics.employed_population)),
                establishment_count: acc
                    .establishment_count
                    .max(value(metrics.establishment_count)),
            })
    }

    pub fn from_regions(cohort: &[Region]) -> Self {
        Self::from_metrics(cohort.iter().map(|region| &region.metrics))
    }
}

fn value(field: Option<f64>) -> f64 {
    present(field).unwrap_or(0.0)
}

/// Buyer-fit score of one region against precomputed cohort maxima.
///
/// Each metric is expressed as a share of the cohort maximum and the shares
/// are weighted. A maximum of 0 yields a share of 0, which makes every region
/// in an empty cohort score 0.
pub fn calculate_buyer_score(
    metrics: &RegionMetrics,
    maxima: &CohortMaxima,
    config: &BuyerConfig,
) -> ScoreResult {
    let weights = &config.weights;
    let factors = vec![
        share(
            "Income",
            metrics.median_income,
            maxima.median_income,
            weights.income,
        ),
        share(
            "Employment",
            metrics.employed_population,
            maxima.employed_population,
            weights.employment,
        ),
        share(
            "Establishments",
            metrics.establishment_count,
            maxima.establishment_count,
            weights.establishments,
        ),
    ];

    ScoreResult::from_factors(factors)
}

/// Convenience wrapper computing the cohort maxima on the fly.
pub fn buyer_score(metrics: &RegionMetrics, cohort: &[Region], config: &BuyerConfig) -> ScoreResult {
    let maxima = CohortMaxima::from_regions(cohort);
    calculate_buyer_score(metrics, &maxima, config)
}

fn share(label: &str, field: Option<f64>, max: f64, weight: f64) -> FactorContribution {
    let raw = present(field);
    let normalized = if max > 0.0 {
        clamp_unit(raw.unwrap_or(0.0) / max)
    } else {
        0.0
    };
    FactorContribution {
        label: label.to_string(),
        raw: raw.unwrap_or(0.0),
        normalized,
        weight,
        contribution: normalized * weight,
        missing: raw.is_none(),
    }
}
