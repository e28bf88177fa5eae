use crate::export::{default_export_path, load_snapshot, save_snapshot, snapshot};
use crate::model::load_model;
use crate::session::Session;
use crate::tui::theme::ThemeColors;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Instant;

const MAX_UNDO: usize = 50;
const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
    Explanation,
    Bands,
    BandLabel,
    Path(PathPrompt),
}

/// What a path typed into the prompt is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPrompt {
    LoadModel,
    Export,
    Import,
}

impl PathPrompt {
    pub fn title(&self) -> &'static str {
        match self {
            PathPrompt::LoadModel => "Load Model",
            PathPrompt::Export => "Export Scores",
            PathPrompt::Import => "Import Scores",
        }
    }
}

pub struct App {
    pub session: Session,
    pub undo_stack: VecDeque<Session>,
    pub table_state: ratatui::widgets::TableState,
    pub selected_band: usize,
    pub input_mode: InputMode,
    pub text_input: String,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub export_dir: PathBuf,
    pub colors: ThemeColors,
}

impl App {
    pub fn new(session: Session, export_dir: PathBuf, colors: ThemeColors) -> Self {
        let mut table_state = ratatui::widgets::TableState::default();
        if session.model().indicator_count() > 0 {
            table_state.select(Some(0));
        }

        Self {
            session,
            undo_stack: VecDeque::new(),
            table_state,
            selected_band: 0,
            input_mode: InputMode::Normal,
            text_input: String::new(),
            flash_message: None,
            should_quit: false,
            export_dir,
            colors,
        }
    }

    /// Adopt a new session snapshot, keeping the previous one for undo.
    /// Unchanged snapshots are not recorded.
    pub fn commit(&mut self, next: Session) -> bool {
        if next == self.session {
            return false;
        }
        let previous = std::mem::replace(&mut self.session, next);
        self.undo_stack.push_front(previous);
        if self.undo_stack.len() > MAX_UNDO {
            self.undo_stack.pop_back();
        }
        true
    }

    /// Restore the previous session snapshot
    pub fn undo_last(&mut self) {
        match self.undo_stack.pop_front() {
            Some(previous) => {
                self.session = previous;
                self.clamp_selection();
                self.show_flash("Undone".to_string());
            }
            None => self.show_flash("Nothing to undo".to_string()),
        }
    }

    fn row_count(&self) -> usize {
        self.session.model().indicator_count()
    }

    fn clamp_selection(&mut self) {
        let count = self.row_count();
        if count == 0 {
            self.table_state.select(None);
        } else {
            match self.table_state.selected() {
                Some(selected) if selected >= count => self.table_state.select(Some(count - 1)),
                Some(_) => {}
                None => self.table_state.select(Some(0)),
            }
        }
        if self.selected_band >= self.session.bands().len() {
            self.selected_band = self.session.bands().len().saturating_sub(1);
        }
    }

    pub fn next_row(&mut self) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < count => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    /// Key of the indicator under the cursor
    pub fn selected_key(&self) -> Option<String> {
        let index = self.table_state.selected()?;
        self.session.model().entries().get(index).map(|e| e.key())
    }

    pub fn set_selected_rating(&mut self, rating: i64) {
        if let Some(key) = self.selected_key() {
            let next = self.session.with_rating(&key, rating);
            self.commit(next);
        }
    }

    pub fn adjust_selected_rating(&mut self, delta: i64) {
        if let Some(key) = self.selected_key() {
            let next = self.session.with_rating_delta(&key, delta);
            self.commit(next);
        }
    }

    pub fn reset_ratings(&mut self) {
        let next = self.session.reset();
        if self.commit(next) {
            self.show_flash("Ratings reset (z to undo)".to_string());
        }
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn show_explanation(&mut self) {
        if self.selected_key().is_some() {
            self.input_mode = InputMode::Explanation;
        }
    }

    pub fn dismiss_popup(&mut self) {
        self.input_mode = InputMode::Normal;
        self.text_input.clear();
    }

    // Band editor

    pub fn show_bands(&mut self) {
        self.input_mode = InputMode::Bands;
        self.clamp_selection();
    }

    pub fn next_band(&mut self) {
        let count = self.session.bands().len();
        if count > 0 {
            self.selected_band = (self.selected_band + 1) % count;
        }
    }

    pub fn previous_band(&mut self) {
        let count = self.session.bands().len();
        if count > 0 {
            self.selected_band = (self.selected_band + count - 1) % count;
        }
    }

    /// Move the selected band's threshold; clamped to 0-100 by the session
    pub fn adjust_band_min(&mut self, delta: f64) {
        if let Some(band) = self.session.bands().get(self.selected_band) {
            let next = self
                .session
                .with_band_min(self.selected_band, band.min + delta);
            self.commit(next);
        }
    }

    pub fn start_band_label_input(&mut self) {
        if let Some(band) = self.session.bands().get(self.selected_band) {
            self.text_input = band.label.clone();
            self.input_mode = InputMode::BandLabel;
        }
    }

    pub fn confirm_band_label_input(&mut self) {
        let label = self.text_input.trim().to_string();
        if label.is_empty() {
            self.show_flash("Error: band label must not be empty".to_string());
        } else {
            let next = self.session.with_band_label(self.selected_band, &label);
            self.commit(next);
        }
        self.text_input.clear();
        self.input_mode = InputMode::Bands;
    }

    pub fn cancel_band_label_input(&mut self) {
        self.text_input.clear();
        self.input_mode = InputMode::Bands;
    }

    // Path prompts

    pub fn start_path_input(&mut self, prompt: PathPrompt) {
        self.text_input = match prompt {
            PathPrompt::Export => default_export_path(&self.export_dir).display().to_string(),
            PathPrompt::LoadModel | PathPrompt::Import => String::new(),
        };
        self.input_mode = InputMode::Path(prompt);
    }

    pub fn confirm_path_input(&mut self) {
        let InputMode::Path(prompt) = self.input_mode else {
            return;
        };
        let input = self.text_input.trim().to_string();
        self.dismiss_popup();

        if input.is_empty() {
            self.show_flash("Error: no path given".to_string());
            return;
        }
        let path = PathBuf::from(input);
        match prompt {
            PathPrompt::LoadModel => self.load_model_from(&path),
            PathPrompt::Export => self.export_to(&path),
            PathPrompt::Import => self.import_from(&path),
        }
    }

    /// Replace the model. On any failure the current session is kept as-is.
    pub fn load_model_from(&mut self, path: &Path) {
        match load_model(path) {
            Ok(model) => {
                let count = model.indicator_count();
                let next = self.session.with_model(model);
                self.commit(next);
                self.table_state.select(if count > 0 { Some(0) } else { None });
                self.show_flash(format!("Loaded model: {} indicators, ratings cleared", count));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "model reload rejected");
                self.show_flash(format!("Error: {}", e));
            }
        }
    }

    pub fn export_to(&mut self, path: &Path) {
        let snap = snapshot(&self.session);
        match save_snapshot(path, &snap) {
            Ok(()) => self.show_flash(format!("Exported: {}", path.display())),
            Err(e) => self.show_flash(format!("Failed to export: {:#}", e)),
        }
    }

    pub fn import_from(&mut self, path: &Path) {
        match load_snapshot(path) {
            Ok(snap) => {
                let next = self.session.with_imported_scores(&snap.scores);
                let imported = next.ratings().len();
                self.commit(next);
                self.show_flash(format!("Imported {} scores (z to undo)", imported));
            }
            Err(e) => self.show_flash(format!("Failed to import: {:#}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_model;
    use crate::scoring::default_bands;
    use std::env;

    fn app() -> App {
        App::new(
            Session::new(default_model(), default_bands()),
            env::temp_dir(),
            ThemeColors::dark(),
        )
    }

    #[test]
    fn test_new_selects_first_row() {
        let app = app();
        assert_eq!(app.table_state.selected(), Some(0));
        assert_eq!(
            app.selected_key().as_deref(),
            Some("Customer & Market::Net Promoter Score")
        );
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app();
        app.previous_row();
        assert_eq!(app.table_state.selected(), Some(17));
        app.next_row();
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_rating_and_undo() {
        let mut app = app();
        let key = app.selected_key().unwrap();
        app.set_selected_rating(4);
        assert_eq!(app.session.rating(&key), 4);
        app.adjust_selected_rating(3);
        assert_eq!(app.session.rating(&key), 5);

        app.undo_last();
        assert_eq!(app.session.rating(&key), 4);
        app.undo_last();
        assert_eq!(app.session.rating(&key), 0);
        assert!(app.undo_stack.is_empty());
    }

    #[test]
    fn test_unchanged_snapshot_not_recorded() {
        let mut app = app();
        app.set_selected_rating(0);
        assert!(app.undo_stack.is_empty());
        app.reset_ratings();
        assert!(app.undo_stack.is_empty());
    }

    #[test]
    fn test_undo_stack_capped() {
        let mut app = app();
        for i in 0..(MAX_UNDO + 10) {
            app.set_selected_rating((i % 2) as i64 + 1);
        }
        assert_eq!(app.undo_stack.len(), MAX_UNDO);
    }

    #[test]
    fn test_band_editing() {
        let mut app = app();
        app.show_bands();
        app.adjust_band_min(20.0);
        assert_eq!(app.session.bands()[0].min, 100.0);

        app.next_band();
        app.start_band_label_input();
        assert_eq!(app.text_input, "B");
        app.text_input = "Good".to_string();
        app.confirm_band_label_input();
        assert_eq!(app.session.bands()[1].label, "Good");
        assert_eq!(app.input_mode, InputMode::Bands);
    }

    #[test]
    fn test_empty_band_label_rejected() {
        let mut app = app();
        app.show_bands();
        app.start_band_label_input();
        app.text_input = "  ".to_string();
        app.confirm_band_label_input();
        assert_eq!(app.session.bands()[0].label, "A");
    }

    #[test]
    fn test_failed_model_load_keeps_state() {
        let path = env::temp_dir().join("scorecard_test_tui_bad_model.json");
        std::fs::write(&path, r#"{"dimensions": {}}"#).unwrap();

        let mut app = app();
        app.set_selected_rating(3);
        let before = app.session.clone();
        app.load_model_from(&path);

        assert_eq!(app.session, before);
        let (msg, _) = app.flash_message.clone().unwrap();
        assert!(msg.contains("invalid configuration"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_model_load_clears_ratings() {
        let path = env::temp_dir().join("scorecard_test_tui_good_model.json");
        std::fs::write(
            &path,
            r#"{"model": {"Dim": {"Sub": [{"kpi": "A", "weight": 0.5}]}}}"#,
        )
        .unwrap();

        let mut app = app();
        app.set_selected_rating(3);
        app.load_model_from(&path);

        assert!(app.session.ratings().is_empty());
        assert_eq!(app.selected_key().as_deref(), Some("Dim::A"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_export_then_import() {
        let path = env::temp_dir().join("scorecard_test_tui_export.json");
        let _ = std::fs::remove_file(&path);

        let mut app = app();
        let key = app.selected_key().unwrap();
        app.set_selected_rating(5);
        app.export_to(&path);

        app.reset_ratings();
        assert_eq!(app.session.rating(&key), 0);
        app.import_from(&path);
        assert_eq!(app.session.rating(&key), 5);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_confirm_path_input_without_path() {
        let mut app = app();
        app.start_path_input(PathPrompt::LoadModel);
        app.confirm_path_input();
        assert_eq!(app.input_mode, InputMode::Normal);
        let (msg, _) = app.flash_message.clone().unwrap();
        assert!(msg.starts_with("Error"));
    }
}
