//! Presentation lookups: score to hex color and score to extrusion height.
//!
//! A single table drives every map layer and table swatch. Buckets are
//! checked in order and the first matching range wins.

pub mod range;

pub use range::RangeOp;

use serde::{Deserialize, Serialize};

/// Color and height tables.
///
/// Example YAML:
/// ```yaml
/// scale:
///   fallback_color: "#cccccc"
///   colors:
///     - { range: ">=0.8", color: "#1a9850" }
///     - { range: "0.4-0.8", color: "#fee08b" }
///   heights:
///     - { range: ">=0.8", height: 4000 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScaleConfig {
    /// Color used when no bucket matches (default: "#cccccc")
    #[serde(default)]
    pub fallback_color: Option<String>,

    #[serde(default)]
    pub colors: Vec<ColorStop>,

    #[serde(default)]
    pub heights: Vec<HeightStop>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ColorStop {
    pub range: String,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HeightStop {
    pub range: String,
    pub height: f64,
}

pub const DEFAULT_FALLBACK_COLOR: &str = "#cccccc";

impl Default for ScaleConfig {
    fn default() -> Self {
        let colors = [
            (">=0.8", "#1a9850"),
            (">=0.6", "#91cf60"),
            (">=0.4", "#fee08b"),
            (">=0.2", "#fc8d59"),
            (">=0", "#d73027"),
        ];
        let heights = [
            (">=0.8", 4000.0),
            (">=0.6", 3000.0),
            (">=0.4", 2000.0),
            (">=0.2", 1000.0),
            (">=0", 250.0),
        ];
        Self {
            fallback_color: Some(DEFAULT_FALLBACK_COLOR.to_string()),
            colors: colors
                .iter()
                .map(|(range, color)| ColorStop {
                    range: range.to_string(),
                    color: color.to_string(),
                })
                .collect(),
            heights: heights
                .iter()
                .map(|(range, height)| HeightStop {
                    range: range.to_string(),
                    height: *height,
                })
                .collect(),
        }
    }
}

impl ScaleConfig {
    /// Hex color for a score. Falls back to `fallback_color` when no bucket matches.
    pub fn color_for(&self, score: f64) -> &str {
        first_match(&self.colors, score, |c| &c.range)
            .map(|c| c.color.as_str())
            .unwrap_or_else(|| {
                self.fallback_color
                    .as_deref()
                    .unwrap_or(DEFAULT_FALLBACK_COLOR)
            })
    }

    /// Extrusion height for a score, 0 when no bucket matches.
    pub fn height_for(&self, score: f64) -> f64 {
        first_match(&self.heights, score, |h| &h.range)
            .map(|h| h.height)
            .unwrap_or(0.0)
    }
}

fn first_match<T, F>(buckets: &[T], value: f64, get_range: F) -> Option<&T>
where
    F: Fn(&T) -> &str,
{
    // Unparseable ranges are skipped here; validate_scale reports them
    buckets.iter().find(|bucket| {
        RangeOp::parse(get_range(bucket))
            .map(|range| range.matches(value))
            .unwrap_or(false)
    })
}

/// Parse "#RRGGBB" into its RGB components.
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Validate the scale tables.
/// Returns all validation errors at once (not just the first).
pub fn validate_scale(config: &ScaleConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref fallback) = config.fallback_color {
        if parse_hex_color(fallback).is_none() {
            errors.push(format!(
                "scale.fallback_color: invalid color '{}' - expected #RRGGBB",
                fallback
            ));
        }
    }

    for (i, stop) in config.colors.iter().enumerate() {
        if let Err(e) = RangeOp::parse(&stop.range) {
            errors.push(format!(
                "scale.colors[{}].range: invalid '{}' - {}",
                i, stop.range, e
            ));
        }
        if parse_hex_color(&stop.color).is_none() {
            errors.push(format!(
                "scale.colors[{}].color: invalid '{}' - expected #RRGGBB",
                i, stop.color
            ));
        }
    }

    for (i, stop) in config.heights.iter().enumerate() {
        if let Err(e) = RangeOp::parse(&stop.range) {
            errors.push(format!(
                "scale.heights[{}].range: invalid '{}' - {}",
                i, stop.range, e
            ));
        }
        if !stop.height.is_finite() || stop.height < 0.0 {
            errors.push(format!(
                "scale.heights[{}].height: must be a non-negative number",
                i
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
