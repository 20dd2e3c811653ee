use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::rank::RankedRegion;
use crate::region::{FirmRecord, FirmValuationInput};
use crate::scale::{parse_hex_color, ScaleConfig};
use crate::scoring::{ScoreResult, Valuation};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a dollar amount in compact notation ($850, $1.5k, $5.4M, $1.2B)
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();
    let formatted = if abs >= 1_000_000_000.0 {
        format!("{:.1}B", abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.1}M", abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", abs / 1_000.0)
    } else {
        format!("{:.0}", abs)
    };

    // Trim trailing .0 (e.g., "1.0M" -> "1M")
    let trimmed = formatted
        .replace(".0B", "B")
        .replace(".0M", "M")
        .replace(".0k", "k");

    format!("{}${}", sign, trimmed)
}

/// Format a [0,1] score with three decimals.
/// If incomplete is true, appends asterisk to indicate missing inputs
pub fn format_score(score: f64, incomplete: bool) -> String {
    if incomplete {
        format!("{:.3}*", score)
    } else {
        format!("{:.3}", score)
    }
}

/// Format a revenue multiple, e.g. "0.94x"
pub fn format_multiple(multiple: f64) -> String {
    format!("{:.2}x", multiple)
}

/// Render a hex color as a colored block followed by its code
fn format_swatch(hex: &str, use_colors: bool) -> String {
    match parse_hex_color(hex) {
        Some((r, g, b)) if use_colors => format!("{} {}", "██".truecolor(r, g, b), hex),
        _ => hex.to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn fit_to_terminal(name: &str, fixed_width: usize, term_width: Option<usize>) -> String {
    match term_width {
        Some(width) if width > fixed_width + 10 => truncate_name(name, width - fixed_width),
        // Very narrow terminal, show truncated
        Some(_) => truncate_name(name, 20),
        // No terminal (pipe), don't truncate
        None => name.to_string(),
    }
}

/// Format ranked regions as a table with columns: Index, Score, Color, Key, Name
/// No headers. Score column is right-aligned, 7 chars wide (fits "0.123*")
pub fn format_region_table(rows: &[RankedRegion], scale: &ScaleConfig, use_colors: bool) -> String {
    if rows.is_empty() {
        return "No regions found.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = 3;
    let score_width = 7;
    let separator = "  ";
    let key_width = rows
        .iter()
        .map(|row| row.region.key.chars().count())
        .max()
        .unwrap_or(0);

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format_score(row.result.score, row.result.incomplete);
            let score_padded = format!("{:>width$}", score_str, width = score_width);
            let color = scale.color_for(row.result.score);
            let swatch = format_swatch(color, use_colors);
            let key_padded = format!("{:<width$}", row.region.key, width = key_width);

            // "#rrggbb" plus the block and a space when colored
            let swatch_width = if use_colors { 10 } else { 7 };
            let fixed_width = index_width
                + 1
                + score_width
                + separator.len() * 3
                + swatch_width
                + key_width;
            let name = fit_to_terminal(row.region.label(), fixed_width, term_width);

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    swatch,
                    separator,
                    key_padded.cyan(),
                    separator,
                    name
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, score_padded, separator, swatch, separator, key_padded, separator, name
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked regions as tab-separated values for scripting
/// Columns: score, key, name, color, height (no headers, no colors)
pub fn format_region_tsv(rows: &[RankedRegion], scale: &ScaleConfig) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{:.4}\t{}\t{}\t{}\t{}",
                row.result.score,
                row.region.key,
                row.region.name.as_deref().unwrap_or(""),
                scale.color_for(row.result.score),
                scale.height_for(row.result.score)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct RegionRow<'a> {
    rank: usize,
    key: &'a str,
    name: Option<&'a str>,
    msa: Option<&'a str>,
    score: f64,
    incomplete: bool,
    color: &'a str,
    height: f64,
    breakdown: &'a crate::scoring::ScoreBreakdown,
}

/// Format ranked regions as a pretty-printed JSON array
pub fn format_region_json(rows: &[RankedRegion], scale: &ScaleConfig) -> Result<String> {
    let out: Vec<RegionRow> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| RegionRow {
            rank: idx + 1,
            key: &row.region.key,
            name: row.region.name.as_deref(),
            msa: row.region.msa.as_deref(),
            score: row.result.score,
            incomplete: row.result.incomplete,
            color: scale.color_for(row.result.score),
            height: scale.height_for(row.result.score),
            breakdown: &row.result.breakdown,
        })
        .collect();
    serde_json::to_string_pretty(&out).context("Failed to serialize regions")
}

/// Format a score's per-component breakdown, one component per line (for verbose mode)
pub fn format_score_breakdown(result: &ScoreResult) -> String {
    let label_width = result
        .breakdown
        .factors
        .iter()
        .map(|f| f.label.len())
        .max()
        .unwrap_or(0);

    result
        .breakdown
        .factors
        .iter()
        .map(|f| {
            let missing = if f.missing { "  (missing)" } else { "" };
            format!(
                "  {:<width$}  {:.3} x {:.2} = {:.3}{}",
                f.label,
                f.normalized,
                f.weight,
                f.contribution,
                missing,
                width = label_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single valuation with detailed multi-line output
pub fn format_valuation_detail(
    input: &FirmValuationInput,
    valuation: &Valuation,
    use_colors: bool,
) -> String {
    let value = format_currency(valuation.value);
    let revenue = format_currency(input.estimated_revenue);
    let multiple = format_multiple(valuation.multiple);

    if use_colors {
        format!(
            "Estimated value: {}\n  Size: {} ({} employees)\n  Revenue: {}\n  Multiple: {}",
            value.bold().green(),
            valuation.size.yellow(),
            input.employee_count,
            revenue,
            multiple.cyan()
        )
    } else {
        format!(
            "Estimated value: {}\n  Size: {} ({} employees)\n  Revenue: {}\n  Multiple: {}",
            value, valuation.size, input.employee_count, revenue, multiple
        )
    }
}

/// Format valued firms as a table with columns: Index, Value, Multiple, Size, Name
pub fn format_firm_table(rows: &[(FirmRecord, Valuation)], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No firms found.".to_string();
    }

    let term_width = get_terminal_width();
    let value_width = 8;
    let separator = "  ";
    // index + value + multiple + size columns
    let fixed_width = 3 + 1 + value_width + separator.len() * 3 + 5 + 6;

    rows.iter()
        .enumerate()
        .map(|(idx, (firm, valuation))| {
            let index_str = format!("{:>2}.", idx + 1);
            let value_padded = format!(
                "{:>width$}",
                format_currency(valuation.value),
                width = value_width
            );
            let multiple = format_multiple(valuation.multiple);
            let size = format!("{:<6}", valuation.size.to_string());
            let name = fit_to_terminal(&firm.name, fixed_width, term_width);

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    value_padded.bold(),
                    separator,
                    multiple,
                    separator,
                    size.yellow(),
                    separator,
                    name
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, value_padded, separator, multiple, separator, size, separator, name
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format valued firms as tab-separated values
/// Columns: value, multiple, size, employees, revenue, name
pub fn format_firm_tsv(rows: &[(FirmRecord, Valuation)]) -> String {
    rows.iter()
        .map(|(firm, valuation)| {
            format!(
                "{}\t{:.4}\t{}\t{}\t{}\t{}",
                valuation.value.round() as i64,
                valuation.multiple,
                valuation.size,
                firm.employee_count,
                firm.estimated_revenue.round() as i64,
                firm.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct FirmRow<'a> {
    name: &'a str,
    employee_count: u32,
    estimated_revenue: f64,
    #[serde(flatten)]
    valuation: &'a Valuation,
}

/// Format valued firms as a pretty-printed JSON array
pub fn format_firm_json(rows: &[(FirmRecord, Valuation)]) -> Result<String> {
    let out: Vec<FirmRow> = rows
        .iter()
        .map(|(firm, valuation)| FirmRow {
            name: &firm.name,
            employee_count: firm.employee_count,
            estimated_revenue: firm.estimated_revenue,
            valuation,
        })
        .collect();
    serde_json::to_string_pretty(&out).context("Failed to serialize valuations")
}

/// Format the color and height a score maps to
pub fn format_scale_lookup(score: f64, scale: &ScaleConfig, use_colors: bool) -> String {
    format!(
        "Score {:.3}\n  Color: {}\n  Height: {}",
        score,
        format_swatch(scale.color_for(score), use_colors),
        scale.height_for(score)
    )
}
