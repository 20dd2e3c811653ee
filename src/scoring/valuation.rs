use super::config::ValuationConfig;
use crate::region::FirmValuationInput;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FirmSize {
    Small,
    Medium,
    Large,
}

impl fmt::Display for FirmSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FirmSize::Small => "small",
            FirmSize::Medium => "medium",
            FirmSize::Large => "large",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Valuation {
    pub size: FirmSize,
    pub multiple: f64,
    pub value: f64,
}

/// Size tier by headcount. Boundaries belong to the lower tier.
pub fn classify_firm_size(employee_count: u32, config: &ValuationConfig) -> FirmSize {
    if employee_count <= config.small_max_employees {
        FirmSize::Small
    } else if employee_count <= config.medium_max_employees {
        FirmSize::Medium
    } else {
        FirmSize::Large
    }
}

/// Revenue multiple for a firm: base multiple for its size, plus every
/// step-up whose threshold revenue exceeds, capped at `max_multiple`.
pub fn valuation_multiple(size: FirmSize, revenue: f64, config: &ValuationConfig) -> f64 {
    let base = match size {
        FirmSize::Small => config.multiples.small,
        FirmSize::Medium => config.multiples.medium,
        FirmSize::Large => config.multiples.large,
    };

    let multiple = config
        .step_ups
        .iter()
        .filter(|step| revenue > step.revenue_above)
        .fold(base, |acc, step| acc + step.add);

    multiple.min(config.max_multiple)
}

/// Estimate enterprise value as revenue times the size/revenue multiple.
///
/// Inputs are not validated: a negative revenue yields a negative value.
pub fn estimate_valuation(input: &FirmValuationInput, config: &ValuationConfig) -> Valuation {
    let size = classify_firm_size(input.employee_count, config);
    let multiple = valuation_multiple(size, input.estimated_revenue, config);
    Valuation {
        size,
        multiple,
        value: input.estimated_revenue * multiple,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::RevenueStepUp;

    fn input(employee_count: u32, estimated_revenue: f64) -> FirmValuationInput {
        FirmValuationInput {
            employee_count,
            estimated_revenue,
        }
    }

    #[test]
    fn test_size_boundaries() {
        let config = ValuationConfig::default();
        for n in 0..=5 {
            assert_eq!(classify_firm_size(n, &config), FirmSize::Small);
        }
        for n in 6..=20 {
            assert_eq!(classify_firm_size(n, &config), FirmSize::Medium);
        }
        assert_eq!(classify_firm_size(21, &config), FirmSize::Large);
        assert_eq!(classify_firm_size(5000, &config), FirmSize::Large);
    }

    #[test]
    fn test_base_multiples() {
        let config = ValuationConfig::default();
        assert_eq!(valuation_multiple(FirmSize::Small, 1_000_000.0, &config), 0.71);
        assert_eq!(valuation_multiple(FirmSize::Medium, 1_000_000.0, &config), 0.85);
        assert_eq!(valuation_multiple(FirmSize::Large, 1_000_000.0, &config), 1.00);
    }

    #[test]
    fn test_step_up_threshold_is_exclusive() {
        let config = ValuationConfig::default();
        assert_eq!(valuation_multiple(FirmSize::Small, 5_000_000.0, &config), 0.71);
        let above = valuation_multiple(FirmSize::Small, 5_000_001.0, &config);
        assert!((above - 0.76).abs() < 1e-9);
    }

    #[test]
    fn test_medium_firm_single_step_up() {
        // 10 employees, $6M revenue -> 0.85 + 0.05
        let valuation = estimate_valuation(&input(10, 6_000_000.0), &ValuationConfig::default());
        assert_eq!(valuation.size, FirmSize::Medium);
        assert!((valuation.multiple - 0.90).abs() < 1e-9);
        assert!((valuation.value - 5_400_000.0).abs() < 1e-3);
    }

    #[test]
    fn test_medium_firm_both_step_ups() {
        // 10 employees, $11M revenue -> 0.85 + 0.05 + 0.04
        let valuation = estimate_valuation(&input(10, 11_000_000.0), &ValuationConfig::default());
        assert_eq!(valuation.size, FirmSize::Medium);
        assert!((valuation.multiple - 0.94).abs() < 1e-9);
        assert!((valuation.value - 10_340_000.0).abs() < 1e-3);
    }

    #[test]
    fn test_large_firm_hits_cap() {
        let valuation = estimate_valuation(&input(50, 20_000_000.0), &ValuationConfig::default());
        assert_eq!(valuation.size, FirmSize::Large);
        assert!(valuation.multiple <= 1.09);
        assert!((valuation.multiple - 1.09).abs() < 1e-9);
    }

    #[test]
    fn test_cap_applies_to_custom_step_ups() {
        let mut config = ValuationConfig::default();
        config.step_ups.push(RevenueStepUp {
            revenue_above: 15_000_000.0,
            add: 0.5,
        });
        let multiple = valuation_multiple(FirmSize::Large, 20_000_000.0, &config);
        assert_eq!(multiple, 1.09);
    }

    #[test]
    fn test_multiple_monotonic_in_revenue() {
        let config = ValuationConfig::default();
        for size in [FirmSize::Small, FirmSize::Medium, FirmSize::Large] {
            let mut previous = f64::MIN;
            for step in 0..=300 {
                let revenue = step as f64 * 50_000.0;
                let multiple = valuation_multiple(size, revenue, &config);
                assert!(multiple >= previous, "{} at {}", size, revenue);
                assert!(multiple <= 1.09);
                previous = multiple;
            }
        }
    }

    #[test]
    fn test_zero_revenue() {
        let valuation = estimate_valuation(&input(3, 0.0), &ValuationConfig::default());
        assert_eq!(valuation.value, 0.0);
        assert_eq!(valuation.size, FirmSize::Small);
    }

    #[test]
    fn test_firm_size_display() {
        assert_eq!(FirmSize::Medium.to_string(), "medium");
    }
}
