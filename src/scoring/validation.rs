use super::config::{BuyerConfig, GrowthConfig, ScoringConfig, ValuationConfig};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref valuation) = config.valuation {
        validate_valuation(valuation, &mut errors);
    }
    if let Some(ref growth) = config.growth {
        validate_growth(growth, &mut errors);
    }
    if let Some(ref buyer) = config.buyer {
        validate_buyer(buyer, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_valuation(config: &ValuationConfig, errors: &mut Vec<String>) {
    if config.small_max_employees > config.medium_max_employees {
        errors.push(format!(
            "scoring.valuation.small_max_employees: {} exceeds medium_max_employees {}",
            config.small_max_employees, config.medium_max_employees
        ));
    }

    let multiples = [
        ("small", config.multiples.small),
        ("medium", config.multiples.medium),
        ("large", config.multiples.large),
    ];
    for (name, multiple) in multiples {
        check_non_negative(
            &format!("scoring.valuation.multiples.{}", name),
            multiple,
            errors,
        );
    }

    for (i, step) in config.step_ups.iter().enumerate() {
        check_non_negative(
            &format!("scoring.valuation.step_ups[{}].revenue_above", i),
            step.revenue_above,
            errors,
        );
        // A negative step-up would make the multiple fall as revenue grows
        check_non_negative(
            &format!("scoring.valuation.step_ups[{}].add", i),
            step.add,
            errors,
        );
    }

    check_non_negative("scoring.valuation.max_multiple", config.max_multiple, errors);
}

fn validate_growth(config: &GrowthConfig, errors: &mut Vec<String>) {
    let caps = &config.caps;
    let caps = [
        ("employment", caps.employment),
        ("business_density", caps.business_density),
        ("wage", caps.wage),
        ("population", caps.population),
        ("income", caps.income),
        ("labor_force", caps.labor_force),
    ];
    for (name, cap) in caps {
        if !cap.is_finite() || cap <= 0.0 {
            errors.push(format!("scoring.growth.caps.{}: must be positive", name));
        }
    }

    let weights = &config.weights;
    let named = [
        ("employment", weights.employment),
        ("business_density", weights.business_density),
        ("wage", weights.wage),
        ("population", weights.population),
        ("income", weights.income),
        ("labor_force", weights.labor_force),
    ];
    check_weights("scoring.growth.weights", &named, weights.sum(), errors);
}

fn validate_buyer(config: &BuyerConfig, errors: &mut Vec<String>) {
    let weights = &config.weights;
    let named = [
        ("income", weights.income),
        ("employment", weights.employment),
        ("establishments", weights.establishments),
    ];
    check_weights("scoring.buyer.weights", &named, weights.sum(), errors);
}

fn check_weights(prefix: &str, named: &[(&str, f64)], sum: f64, errors: &mut Vec<String>) {
    let before = errors.len();
    for (name, weight) in named {
        check_non_negative(&format!("{}.{}", prefix, name), *weight, errors);
    }
    // Only report the sum when every weight is individually valid
    if errors.len() == before && (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        errors.push(format!("{}: must sum to 1 (got {})", prefix, sum));
    }
}

fn check_non_negative(field: &str, value: f64, errors: &mut Vec<String>) {
    if !value.is_finite() || value < 0.0 {
        errors.push(format!("{}: must be a non-negative number", field));
    }
}
