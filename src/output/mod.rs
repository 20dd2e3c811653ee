pub mod formatter;

pub use formatter::{
    format_currency, format_firm_json, format_firm_table, format_firm_tsv, format_multiple,
    format_region_json, format_region_table, format_region_tsv, format_scale_lookup,
    format_score, format_score_breakdown, format_valuation_detail, should_use_colors,
};
