use anyhow::{bail, Result};

/// Threshold expression used by the color and height tables.
///
/// Accepted forms: `<N`, `<=N`, `>N`, `>=N`, `N-M` (inclusive) and a bare `N`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeOp {
    LessThan(f64),
    LessEqual(f64),
    GreaterThan(f64),
    GreaterEqual(f64),
    Equal(f64),
    Between(f64, f64), // Inclusive range: N-M
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let op = if let Some(val) = s.strip_prefix(">=") {
            RangeOp::GreaterEqual(parse_bound(val)?)
        } else if let Some(val) = s.strip_prefix("<=") {
            RangeOp::LessEqual(parse_bound(val)?)
        } else if let Some(val) = s.strip_prefix('>') {
            RangeOp::GreaterThan(parse_bound(val)?)
        } else if let Some(val) = s.strip_prefix('<') {
            RangeOp::LessThan(parse_bound(val)?)
        } else if let Some((low, high)) = s.get(1..).and_then(|rest| rest.split_once('-')) {
            // Skip the first char so a leading minus sign is not read as the separator
            let low = parse_bound(&format!("{}{}", &s[..1], low))?;
            let high = parse_bound(high)?;
            if low > high {
                bail!("Range lower bound exceeds upper bound: {}", s)
            }
            RangeOp::Between(low, high)
        } else {
            RangeOp::Equal(parse_bound(s)?)
        };
        Ok(op)
    }

    pub fn matches(&self, value: f64) -> bool {
        match *self {
            RangeOp::LessThan(n) => value < n,
            RangeOp::LessEqual(n) => value <= n,
            RangeOp::GreaterThan(n) => value > n,
            RangeOp::GreaterEqual(n) => value >= n,
            RangeOp::Equal(n) => value == n,
            RangeOp::Between(low, high) => value >= low && value <= high,
        }
    }
}

fn parse_bound(s: &str) -> Result<f64> {
    let s = s.trim();
    let value: f64 = match s.parse() {
        Ok(v) => v,
        Err(_) => bail!("Invalid number in range: '{}'", s),
    };
    if !value.is_finite() {
        bail!("Range bound must be finite: '{}'", s)
    }
    Ok(value)
}
