//! Centralized theme module for TUI color constants and styles

use crate::config::Theme;
use ratatui::prelude::*;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Score-based colors (traffic light pattern, high is good)
    pub score_high: Color,
    pub score_mid: Color,
    pub score_low: Color,
    pub bar_empty: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub dimension_color: Color,
    pub rating_color: Color,

    // Styles
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            score_high: Color::Green,
            score_mid: Color::Yellow,
            score_low: Color::Red,
            bar_empty: Color::DarkGray,
            row_alt_bg: Color::Indexed(235),
            dimension_color: Color::Cyan,
            rating_color: Color::Yellow,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
        }
    }

    pub fn light() -> Self {
        Self {
            score_high: Color::Indexed(28),
            score_mid: Color::Indexed(130),
            score_low: Color::Indexed(124),
            bar_empty: Color::Indexed(250),
            row_alt_bg: Color::Indexed(254),
            dimension_color: Color::Blue,
            rating_color: Color::Indexed(130),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Indexed(242),
            title_color: Color::Blue,
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Indexed(28),
            flash_error: Color::Indexed(124),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
        }
    }

    /// Returns the color for a 0-100 percentage
    pub fn score_color(&self, pct: f64) -> Color {
        if pct >= 70.0 {
            self.score_high
        } else if pct >= 40.0 {
            self.score_mid
        } else {
            self.score_low
        }
    }
}

/// Pick a palette. `Auto` asks the terminal for its background luma and
/// falls back to the dark palette when the terminal does not answer.
pub fn resolve_theme(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Dark => ThemeColors::dark(),
        Theme::Light => ThemeColors::light(),
        Theme::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            Ok(_) => ThemeColors::dark(),
            Err(e) => {
                tracing::debug!(error = %e, "could not detect terminal background");
                ThemeColors::dark()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_color_thresholds() {
        let colors = ThemeColors::dark();
        assert_eq!(colors.score_color(85.0), Color::Green);
        assert_eq!(colors.score_color(55.0), Color::Yellow);
        assert_eq!(colors.score_color(10.0), Color::Red);
    }

    #[test]
    fn test_explicit_theme_skips_detection() {
        assert_eq!(resolve_theme(Theme::Light).title_color, Color::Blue);
        assert_eq!(resolve_theme(Theme::Dark).title_color, Color::Cyan);
    }
}
