use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Wrap};
use crate::output::{format_percentage, score_bar, truncate_name};
use crate::tui::app::{App, InputMode};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 10 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small")
            .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    let dimension_rows = app.session.model().dimensions.len() as u16;

    // Layout: Title(1) + Dimensions(n + 2) + Table(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(dimension_rows + 2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_dimensions(frame, chunks[1], app);
    render_table(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);

    match app.input_mode {
        InputMode::Help => render_help_popup(frame, app),
        InputMode::Explanation => render_explanation_popup(frame, app),
        InputMode::Bands | InputMode::BandLabel => render_bands_popup(frame, app),
        InputMode::Path(prompt) => render_input_popup(frame, app, prompt.title()),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let total_pct = app.session.total_pct();
    let grade = app.session.grade();

    let left = "Scorecard";
    let right = format!("Total {}  Grade {}", format_percentage(total_pct), grade);
    let padding_len = (area.width as usize).saturating_sub(left.len() + right.chars().count());

    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(colors.title_color).bold()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right, Style::default().fg(colors.score_color(total_pct)).bold()),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_dimensions(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let result = app.session.result();

    let block = Block::bordered()
        .title(" Dimensions ")
        .border_style(Style::default().fg(colors.muted));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let name_width = 24usize;
    let bar_width = (inner.width as usize)
        .saturating_sub(name_width + 10)
        .clamp(4, 30);

    let lines: Vec<Line> = result
        .dimensions
        .iter()
        .map(|(name, dim)| {
            let pct = dim.percentage();
            let color = colors.score_color(pct);
            let bar = score_bar(pct, bar_width);
            let (filled_part, empty_part) = bar.split_at(bar.find('░').unwrap_or(bar.len()));
            Line::from(vec![
                Span::styled(
                    format!("{:<width$} ", truncate_name(name, name_width), width = name_width),
                    Style::default().fg(colors.dimension_color),
                ),
                Span::styled(filled_part.to_string(), Style::default().fg(color)),
                Span::styled(empty_part.to_string(), Style::default().fg(colors.bar_empty)),
                Span::styled(format!(" {:>7}", format_percentage(pct)), Style::default().fg(color)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let colors = app.colors.clone();
    let result = app.session.result();

    if result.breakdown.is_empty() {
        let empty_msg = Paragraph::new("Model has no indicators")
            .alignment(Alignment::Center)
            .block(Block::default());
        frame.render_widget(empty_msg, area);
        return;
    }

    let rows: Vec<Row> = result
        .breakdown
        .iter()
        .enumerate()
        .map(|(idx, c)| {
            let stars = format!(
                "{}{}",
                "●".repeat(c.rating as usize),
                "○".repeat(5usize.saturating_sub(c.rating as usize))
            );

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(colors.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(truncate_name(&c.dimension, 22))
                    .style(Style::default().fg(colors.dimension_color)),
                Cell::from(truncate_name(&c.subcategory, 22)),
                Cell::from(c.name.clone()),
                Cell::from(Line::from(vec![
                    Span::styled(stars, Style::default().fg(colors.rating_color)),
                    Span::raw(format!(" {}", c.rating)),
                ])),
                Cell::from(format!("{:.3}", c.weight)),
                Cell::from(format!("{:.4}", c.contribution)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(22),
        Constraint::Length(22),
        Constraint::Fill(1),
        Constraint::Length(8),  // "●●●○○ 3"
        Constraint::Length(7),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Dimension", "Subcategory", "Indicator", "Rating", "Weight", "Contrib"])
                .style(colors.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(colors.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Error") {
            colors.flash_error
        } else {
            colors.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let rated = app.session.ratings().len();
        let count = format!(
            "{}/{} rated",
            rated,
            app.session.model().indicator_count()
        );

        let hints = [
            ("0-5", ":rate "),
            ("h/l", ":-/+ "),
            ("g", ":bands "),
            ("r", ":reset "),
            ("L", ":load "),
            ("e", ":export "),
            ("z", ":undo "),
            ("?", ":help "),
            ("q", ":quit"),
        ];

        let mut spans = vec![
            Span::styled(count, Style::default().fg(colors.muted)),
            Span::raw("  "),
        ];
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(colors.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(colors.status_bar_bg)),
        area
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn popup_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::bordered()
        .title(Span::styled(title, app.colors.popup_title))
        .border_style(Style::default().fg(app.colors.popup_border))
}

fn render_explanation_popup(frame: &mut Frame, app: &App) {
    let Some(key) = app.selected_key() else {
        return;
    };
    let Some(entry) = app.session.model().find(&key) else {
        return;
    };

    let popup_area = centered_rect_fixed(60, 9, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(app, " Indicator ");
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let explanation = if entry.indicator.explanation.is_empty() {
        "No explanation provided."
    } else {
        entry.indicator.explanation.as_str()
    };

    let lines = vec![
        Line::from(Span::styled(entry.indicator.name.clone(), Style::default().bold())),
        Line::from(Span::styled(
            format!("{} / {}", entry.dimension, entry.subcategory),
            Style::default().fg(app.colors.muted),
        )),
        Line::from(format!(
            "Weight {:.3}  Rating {}/5",
            entry.indicator.weight,
            app.session.rating(&key)
        )),
        Line::from(""),
        Line::from(explanation.to_string()),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_bands_popup(frame: &mut Frame, app: &App) {
    let bands = app.session.bands();
    let height = bands.len() as u16 + 6;
    let popup_area = centered_rect_fixed(44, height, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(app, " Grade Bands ");
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines: Vec<Line> = bands
        .iter()
        .enumerate()
        .map(|(i, band)| {
            let selected = i == app.selected_band;
            let label = if selected && app.input_mode == InputMode::BandLabel {
                format!("{}|", app.text_input)
            } else {
                band.label.clone()
            };
            let text = format!("{:<16} >= {:>5.1}%", label, band.min);
            if selected {
                Line::from(Span::styled(text, app.colors.row_selected))
            } else {
                Line::from(text)
            }
        })
        .collect();

    if bands.is_empty() {
        lines.push(Line::from("No bands configured"));
    }
    if !crate::scoring::is_sorted_descending(bands) {
        lines.push(Line::from(Span::styled(
            "Bands are not sorted by threshold",
            Style::default().fg(app.colors.flash_error),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "j/k: select  +/-: threshold  Enter: rename  Esc: close",
        Style::default().fg(app.colors.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_input_popup(frame: &mut Frame, app: &App, title: &str) {
    let popup_area = centered_rect_fixed(60, 5, frame.area());
    frame.render_widget(Clear, popup_area);

    let title = format!(" {} ", title);
    let block = popup_block(app, &title);
    let inner = block.inner(popup_area);
    frame.render_widget(block.clone(), popup_area);

    let chunks = Layout::vertical([
        Constraint::Length(1),  // Input line
        Constraint::Length(1),  // Help text
    ])
    .split(inner);

    let input = Paragraph::new(format!("{}|", app.text_input));
    frame.render_widget(input, chunks[0]);

    let help = Paragraph::new("Enter: confirm | Esc: cancel")
        .style(Style::default().fg(app.colors.muted));
    frame.render_widget(help, chunks[1]);
}

fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(50, 18, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(app, " Keyboard Shortcuts ");
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(app.colors.status_key_color).bold();
    let shortcuts = [
        ("j / Down      ", "Next indicator"),
        ("k / Up        ", "Previous indicator"),
        ("0 - 5         ", "Set rating"),
        ("h / l         ", "Decrease / increase rating"),
        ("Enter         ", "Show explanation"),
        ("g             ", "Edit grade bands"),
        ("r             ", "Reset all ratings"),
        ("L             ", "Load model file"),
        ("e             ", "Export scores"),
        ("i             ", "Import scores"),
        ("z             ", "Undo last change"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = shortcuts
        .iter()
        .map(|(key, action)| {
            Line::from(vec![Span::styled(*key, key_style), Span::raw(*action)])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(app.colors.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
