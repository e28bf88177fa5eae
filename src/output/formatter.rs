use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::export::ScoreSnapshot;
use crate::model::Model;
use crate::scoring::WeightedScore;
use crate::session::Session;

const BAR_WIDTH: usize = 20;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a percentage with one decimal: "72.5%"
pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Text score bar, filled in proportion to a 0-100 percentage
pub fn score_bar(pct: f64, width: usize) -> String {
    let ratio = (pct / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
pub fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format the per-dimension summary, total and grade of a session.
///
/// One line per dimension: name, bar, own percentage, weight. Followed by the
/// weighted total and the grade.
pub fn format_score_table(session: &Session, use_colors: bool) -> String {
    let result = session.result();
    if result.dimensions.is_empty() {
        return "Model has no dimensions.".to_string();
    }

    let name_width = result
        .dimensions
        .keys()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);
    // bar + "  100.0%" + "  w 0.390" + separators
    let fixed_width = BAR_WIDTH + 8 + 9 + 4;
    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => name_width.min(width - fixed_width),
        Some(_) => name_width.min(20),
        None => name_width,
    };

    let mut lines: Vec<String> = result
        .dimensions
        .iter()
        .map(|(name, dim)| {
            let pct = dim.percentage();
            let name = format!("{:<width$}", truncate_name(name, name_width), width = name_width);
            let bar = score_bar(pct, BAR_WIDTH);
            let pct_str = format!("{:>7}", format_percentage(pct));
            let weight_str = format!("w {:.3}", dim.weight);
            if use_colors {
                format!(
                    "{}  {}  {}  {}",
                    name.bold(),
                    bar.cyan(),
                    pct_str,
                    weight_str.dimmed()
                )
            } else {
                format!("{}  {}  {}  {}", name, bar, pct_str, weight_str)
            }
        })
        .collect();

    let total_pct = result.total_pct();
    let grade = session.grade();
    lines.push(String::new());
    if use_colors {
        lines.push(format!(
            "{}  {}",
            "Total:".bold(),
            format_percentage(total_pct).bold()
        ));
        lines.push(format!("{}  {}", "Grade:".bold(), grade.green().bold()));
    } else {
        lines.push(format!("Total:  {}", format_percentage(total_pct)));
        lines.push(format!("Grade:  {}", grade));
    }

    lines.join("\n")
}

/// Format the per-indicator breakdown (for verbose mode)
pub fn format_breakdown(result: &WeightedScore, use_colors: bool) -> String {
    if result.breakdown.is_empty() {
        return "No indicators.".to_string();
    }

    result
        .breakdown
        .iter()
        .map(|c| {
            let path = format!("{} / {} / {}", c.dimension, c.subcategory, c.name);
            let detail = format!(
                "  Rating: {}/5  Weight: {:.3}  Contribution: {:.4}",
                c.rating, c.weight, c.contribution
            );
            if use_colors {
                format!("{}\n{}", path.bold(), detail.dimmed())
            } else {
                format!("{}\n{}", path, detail)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a session as tab-separated values for scripting
/// Columns: dimension, score, weight, percentage; then total and grade rows
pub fn format_tsv(session: &Session) -> String {
    let result = session.result();
    let mut lines: Vec<String> = result
        .dimensions
        .iter()
        .map(|(name, dim)| {
            format!(
                "{}\t{:.6}\t{:.6}\t{:.2}",
                name,
                dim.score,
                dim.weight,
                dim.percentage()
            )
        })
        .collect();
    lines.push(format!("total\t{:.6}\t\t{:.2}", result.total, result.total_pct()));
    lines.push(format!("grade\t{}", session.grade()));
    lines.join("\n")
}

/// Format a snapshot as pretty JSON
pub fn format_json(snapshot: &ScoreSnapshot) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Format the model hierarchy with weights
pub fn format_model(model: &Model, use_colors: bool) -> String {
    let mut lines = Vec::new();
    for (dimension, subcategories) in &model.dimensions {
        if use_colors {
            lines.push(dimension.bold().to_string());
        } else {
            lines.push(dimension.clone());
        }
        for (subcategory, indicators) in subcategories {
            lines.push(format!("  {}", subcategory));
            for indicator in indicators {
                let weight = format!("{:.3}", indicator.weight);
                if use_colors {
                    lines.push(format!("    {}  {}", weight.cyan(), indicator.name));
                } else {
                    lines.push(format!("    {}  {}", weight, indicator.name));
                }
            }
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "{} indicators, total weight {:.3}",
        model.indicator_count(),
        model.total_weight()
    ));
    lines.join("\n")
}
