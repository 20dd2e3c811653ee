use super::config::GrowthConfig;
use super::engine::{contribution, ScoreResult};
use crate::region::types::present;
use crate::region::RegionMetrics;

/// Composite regional growth/opportunity score in [0,1].
///
/// Six raw indicators are derived from the snapshot, each divided by its cap
/// and clamped, then combined with the configured weights. A component whose
/// denominator is zero contributes nothing; a component whose inputs are
/// missing also contributes nothing and marks the result incomplete.
pub fn calculate_growth_score(metrics: &RegionMetrics, config: &GrowthConfig) -> ScoreResult {
    let employed = present(metrics.employed_population);
    let total = present(metrics.total_population);
    let establishments = present(metrics.establishment_count);
    let payroll = present(metrics.annual_payroll);
    let income = present(metrics.median_income);
    let labor_force = present(metrics.labor_force_count);

    let weights = &config.weights;
    let caps = &config.caps;

    let population = match total {
        Some(t) if t > 0.0 => t.log10(),
        _ => 0.0,
    };

    let factors = vec![
        contribution(
            "Employment",
            per(employed, total, 100.0),
            caps.employment,
            weights.employment,
            employed.is_none() || total.is_none(),
        ),
        contribution(
            "Business density",
            per(establishments, total, 10_000.0),
            caps.business_density,
            weights.business_density,
            establishments.is_none() || total.is_none(),
        ),
        contribution(
            "Wage",
            per(payroll, employed, 1.0),
            caps.wage,
            weights.wage,
            payroll.is_none() || employed.is_none(),
        ),
        contribution(
            "Population",
            population,
            caps.population,
            weights.population,
            total.is_none(),
        ),
        contribution(
            "Income",
            income.unwrap_or(0.0) / 1_000.0,
            caps.income,
            weights.income,
            income.is_none(),
        ),
        contribution(
            "Labor force",
            per(labor_force, total, 100.0),
            caps.labor_force,
            weights.labor_force,
            labor_force.is_none() || total.is_none(),
        ),
    ];

    ScoreResult::from_factors(factors)
}

/// `numerator / denominator * scale`, 0 when either side is missing or the
/// denominator is not positive.
fn per(numerator: Option<f64>, denominator: Option<f64>, scale: f64) -> f64 {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d > 0.0 => n / d * scale,
        _ => 0.0,
    }
}
