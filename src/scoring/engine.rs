use serde::Serialize;

/// One weighted component of a composite score.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FactorContribution {
    pub label: String,      // e.g. "Employment", "Wage"
    pub raw: f64,           // Component value before normalization
    pub normalized: f64,    // raw / cap, clamped to [0,1]
    pub weight: f64,
    pub contribution: f64,  // normalized * weight
    pub missing: bool,      // An input this component needs was absent
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorContribution>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    /// True when at least one input was missing and counted as zero.
    pub incomplete: bool,
    pub breakdown: ScoreBreakdown,
}

impl ScoreResult {
    pub(crate) fn from_factors(factors: Vec<FactorContribution>) -> Self {
        let total: f64 = factors.iter().map(|f| f.contribution).sum();
        let incomplete = factors.iter().any(|f| f.missing);
        ScoreResult {
            score: clamp_unit(total),
            incomplete,
            breakdown: ScoreBreakdown { factors },
        }
    }
}

/// Divide by `cap` and clamp into [0,1]. Invalid caps and NaN values
/// normalize to 0.
pub fn normalize(value: f64, cap: f64) -> f64 {
    if cap <= 0.0 || !cap.is_finite() {
        return 0.0;
    }
    clamp_unit(value / cap)
}

/// Clamp into [0,1], mapping NaN to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Build a contribution from a raw value.
pub(crate) fn contribution(
    label: &str,
    raw: f64,
    cap: f64,
    weight: f64,
    missing: bool,
) -> FactorContribution {
    let normalized = normalize(raw, cap);
    FactorContribution {
        label: label.to_string(),
        raw,
        normalized,
        weight,
        contribution: normalized * weight,
        missing,
    }
}
