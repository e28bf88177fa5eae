pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer log output while TUI is active to prevent it corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let result = run_loop(&mut terminal, &mut app);

    ratatui::restore();

    // Flush buffered log output now that the terminal is restored
    let buffered = crate::stderr_buffer::drain();
    if !buffered.is_empty() {
        eprint!("{}", buffered);
    }

    result
}

fn run_loop(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> anyhow::Result<()> {
    let mut events = EventHandler::new(250); // 250ms tick for flash expiry

    while !app.should_quit {
        terminal.draw(|frame| ui::draw(frame, app))?;

        match events.next()? {
            Event::Key(key) => handle_key_event(app, key),
            Event::Tick => app.update_flash(),
        }
    }
    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        app::InputMode::Normal => match key.code {
            KeyCode::Char('q') => app.should_quit = true,

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

            // Rating
            KeyCode::Char(c @ '0'..='5') => {
                app.set_selected_rating(i64::from(c as u8 - b'0'));
            }
            KeyCode::Char('h') | KeyCode::Left => app.adjust_selected_rating(-1),
            KeyCode::Char('l') | KeyCode::Right => app.adjust_selected_rating(1),

            KeyCode::Char('r') => app.reset_ratings(),
            KeyCode::Char('z') => app.undo_last(),

            KeyCode::Char('g') => app.show_bands(),
            KeyCode::Char('L') => app.start_path_input(app::PathPrompt::LoadModel),
            KeyCode::Char('e') => app.start_path_input(app::PathPrompt::Export),
            KeyCode::Char('i') => app.start_path_input(app::PathPrompt::Import),

            KeyCode::Enter => app.show_explanation(),
            KeyCode::Char('?') => app.show_help(),
            _ => {}
        },
        app::InputMode::Bands => match key.code {
            KeyCode::Esc | KeyCode::Char('g') | KeyCode::Char('q') => app.dismiss_popup(),
            KeyCode::Char('j') | KeyCode::Down => app.next_band(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_band(),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => app.adjust_band_min(1.0),
            KeyCode::Char('-') | KeyCode::Left => app.adjust_band_min(-1.0),
            KeyCode::Enter => app.start_band_label_input(),
            KeyCode::Char('z') => app.undo_last(),
            _ => {}
        },
        app::InputMode::BandLabel => match key.code {
            KeyCode::Enter => app.confirm_band_label_input(),
            KeyCode::Esc => app.cancel_band_label_input(),
            KeyCode::Backspace => {
                app.text_input.pop();
            }
            KeyCode::Char(c) => app.text_input.push(c),
            _ => {}
        },
        app::InputMode::Path(_) => match key.code {
            KeyCode::Enter => app.confirm_path_input(),
            KeyCode::Esc => app.dismiss_popup(),
            KeyCode::Backspace => {
                app.text_input.pop();
            }
            KeyCode::Char(c) => app.text_input.push(c),
            _ => {}
        },
        app::InputMode::Explanation | app::InputMode::Help => {
            // Any key closes the popup
            app.dismiss_popup();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_model;
    use crate::scoring::default_bands;
    use crate::session::Session;

    fn app() -> App {
        App::new(
            Session::new(default_model(), default_bands()),
            std::env::temp_dir(),
            ThemeColors::dark(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_digit_keys_rate_selected() {
        let mut app = app();
        let key = app.selected_key().unwrap();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.session.rating(&key), 4);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.session.rating(&key), 3);
        // Out of scale digits are ignored
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.session.rating(&key), 3);
    }

    #[test]
    fn test_band_editor_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.input_mode, app::InputMode::Bands);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.session.bands()[1].min, 69.0);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, app::InputMode::Normal);
    }

    #[test]
    fn test_path_prompt_typing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('L'));
        for c in "abc".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.text_input, "ab");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, app::InputMode::Normal);
        assert!(app.text_input.is_empty());
    }

    #[test]
    fn test_ctrl_c_quits_from_any_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}
