pub mod formatter;

pub use formatter::{
    format_breakdown, format_json, format_model, format_percentage, format_score_table, format_tsv,
    score_bar, should_use_colors, truncate_name,
};
