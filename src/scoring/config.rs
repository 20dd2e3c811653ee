use serde::{Deserialize, Serialize};

/// Main scoring configuration.
///
/// Every section is optional; a missing section uses its defaults.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   valuation:
///     max_multiple: 1.09
///     step_ups:
///       - { revenue_above: 5000000, add: 0.05 }
///   growth:
///     weights: { employment: 0.25, business_density: 0.2, wage: 0.2,
///                population: 0.15, income: 0.1, labor_force: 0.1 }
///   buyer:
///     weights: { income: 0.3, employment: 0.4, establishments: 0.3 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default)]
    pub valuation: Option<ValuationConfig>,

    #[serde(default)]
    pub growth: Option<GrowthConfig>,

    #[serde(default)]
    pub buyer: Option<BuyerConfig>,
}

impl ScoringConfig {
    /// Config with every section filled in, as written by `offmarket init`.
    pub fn with_defaults() -> Self {
        Self {
            valuation: Some(ValuationConfig::default()),
            growth: Some(GrowthConfig::default()),
            buyer: Some(BuyerConfig::default()),
        }
    }

    pub fn valuation_or_default(&self) -> ValuationConfig {
        self.valuation.clone().unwrap_or_default()
    }

    pub fn growth_or_default(&self) -> GrowthConfig {
        self.growth.clone().unwrap_or_default()
    }

    pub fn buyer_or_default(&self) -> BuyerConfig {
        self.buyer.clone().unwrap_or_default()
    }
}

/// Valuation estimator settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ValuationConfig {
    /// Firms with at most this many employees are "small" (default: 5)
    pub small_max_employees: u32,

    /// Firms with at most this many employees are "medium" (default: 20)
    pub medium_max_employees: u32,

    /// Base revenue multiple per firm size
    pub multiples: SizeMultiples,

    /// Additive step-ups, each applied when revenue is strictly above its threshold
    pub step_ups: Vec<RevenueStepUp>,

    /// Upper bound on the final multiple (default: 1.09)
    pub max_multiple: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            small_max_employees: 5,
            medium_max_employees: 20,
            multiples: SizeMultiples::default(),
            step_ups: vec![
                RevenueStepUp {
                    revenue_above: 5_000_000.0,
                    add: 0.05,
                },
                RevenueStepUp {
                    revenue_above: 10_000_000.0,
                    add: 0.04,
                },
            ],
            max_multiple: 1.09,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SizeMultiples {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
}

impl Default for SizeMultiples {
    fn default() -> Self {
        Self {
            small: 0.71,
            medium: 0.85,
            large: 1.00,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RevenueStepUp {
    pub revenue_above: f64,
    pub add: f64,
}

/// Growth/opportunity scorer settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GrowthConfig {
    #[serde(default)]
    pub weights: GrowthWeights,

    #[serde(default)]
    pub caps: GrowthCaps,
}

/// Weight of each growth component. Must sum to 1.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GrowthWeights {
    pub employment: f64,
    pub business_density: f64,
    pub wage: f64,
    pub population: f64,
    pub income: f64,
    pub labor_force: f64,
}

impl Default for GrowthWeights {
    fn default() -> Self {
        Self {
            employment: 0.25,
            business_density: 0.20,
            wage: 0.20,
            population: 0.15,
            income: 0.10,
            labor_force: 0.10,
        }
    }
}

impl GrowthWeights {
    pub fn sum(&self) -> f64 {
        self.employment
            + self.business_density
            + self.wage
            + self.population
            + self.income
            + self.labor_force
    }
}

/// Raw component value that normalizes to 1.0.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GrowthCaps {
    /// Employed share of population, percent
    pub employment: f64,
    /// Establishments per 10,000 residents
    pub business_density: f64,
    /// Payroll per employed person, dollars
    pub wage: f64,
    /// log10 of population
    pub population: f64,
    /// Median income, thousands of dollars
    pub income: f64,
    /// Labor force share of population, percent
    pub labor_force: f64,
}

impl Default for GrowthCaps {
    fn default() -> Self {
        Self {
            employment: 50.0,
            business_density: 100.0,
            wage: 100_000.0,
            population: 7.0,
            income: 150.0,
            labor_force: 100.0,
        }
    }
}

/// Buyer-fit scorer settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BuyerConfig {
    #[serde(default)]
    pub weights: BuyerWeights,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BuyerWeights {
    pub income: f64,
    pub employment: f64,
    pub establishments: f64,
}

impl Default for BuyerWeights {
    fn default() -> Self {
        Self {
            income: 0.3,
            employment: 0.4,
            establishments: 0.3,
        }
    }
}

impl BuyerWeights {
    pub fn sum(&self) -> f64 {
        self.income + self.employment + self.establishments
    }
}
