//! Application state and core logic

use crate::config::TuiConfig;
use crate::platform::SHORTCUT_MODIFIER;
use crate::sink::{self, SubmissionSink};
use crate::state::{
    AppState, FieldDefinitionForm, FieldType, FocusTarget, FormError, FormEvent, FormOutcome,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Receiver of submitted definitions
    sink: Box<dyn SubmissionSink>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance from the user configuration
    pub fn new(config: &TuiConfig) -> Self {
        let form = if config.starts_with_multiple() {
            FieldDefinitionForm::with_field_type(FieldType::Multiple)
        } else {
            FieldDefinitionForm::new()
        };
        Self::with_sink(AppState::new(form), sink::from_config(config))
    }

    pub fn with_sink(state: AppState, sink: Box<dyn SubmissionSink>) -> Self {
        Self {
            state,
            sink,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Where submitted definitions go
    pub fn sink_description(&self) -> String {
        self.sink.describe()
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Global quit: Ctrl+C
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return Ok(());
        }

        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        let target = self.state.active_target();

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.next_form_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_form_field(),
            KeyCode::Esc => self.cancel(),
            // Keyboard shortcuts (work from anywhere)
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.save().await;
            }
            KeyCode::Char('n') if key.modifiers.contains(SHORTCUT_MODIFIER) => self.add_row(),
            KeyCode::Char('d') if key.modifiers.contains(SHORTCUT_MODIFIER) => {
                if let Some(index) = target.row_index() {
                    self.remove_row(index);
                }
            }
            // Field type radio
            KeyCode::Left if target == FocusTarget::FieldType => {
                self.state.select_field_type(FieldType::Text);
            }
            KeyCode::Right if target == FocusTarget::FieldType => {
                self.state.select_field_type(FieldType::Multiple);
            }
            KeyCode::Char(' ') | KeyCode::Enter if target == FocusTarget::FieldType => {
                self.state.toggle_field_type();
            }
            // Buttons
            KeyCode::Enter | KeyCode::Char(' ') if target.is_button() => {
                self.activate(target).await;
            }
            KeyCode::Enter => self.state.next_form_field(),
            // Form field input
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Err(err) = self.state.form_input_char(c) {
                    self.report_form_error(err);
                }
            }
            KeyCode::Backspace => {
                if let Err(err) = self.state.form_backspace() {
                    self.report_form_error(err);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Trigger the button under focus
    async fn activate(&mut self, target: FocusTarget) {
        match target {
            FocusTarget::RemoveRow(index) => self.remove_row(index),
            FocusTarget::AddRow => self.add_row(),
            FocusTarget::Save => self.save().await,
            FocusTarget::Cancel => self.cancel(),
            _ => {}
        }
    }

    fn add_row(&mut self) {
        if self.state.form.selected_type() == FieldType::Multiple {
            self.state.add_row();
        }
    }

    fn remove_row(&mut self, index: usize) {
        if let Err(err) = self.state.remove_row(index) {
            self.report_form_error(err);
        }
    }

    fn cancel(&mut self) {
        if self.state.form.is_dirty() {
            self.state.status_message = Some("Changes discarded".to_string());
        }
        self.state.clear_form();
    }

    /// Submit the form and hand the record to the sink
    async fn save(&mut self) {
        self.state.submit_attempted = true;
        match self.state.form.apply(FormEvent::Submit) {
            Ok(FormOutcome::Submitted(record)) => {
                let code = record.code.clone();
                match self.sink.submit(record).await {
                    Ok(()) => {
                        self.state.submitted_count += 1;
                        tracing::info!(%code, "field definition saved");
                        self.state.status_message = Some(format!("Saved {code}"));
                    }
                    Err(e) => {
                        tracing::error!("submission failed: {e:#}");
                        self.push_error(format!("Failed to save field definition: {e}"));
                    }
                }
            }
            Ok(_) => {
                let form = &self.state.form;
                let msg = match form.report().issues().len() {
                    _ if !form.is_dirty() => "Nothing to save".to_string(),
                    1 => "Fix the highlighted field before saving".to_string(),
                    n => format!("Fix the {n} highlighted fields before saving"),
                };
                self.state.status_message = Some(msg);
            }
            Err(err) => self.report_form_error(err),
        }
    }

    fn report_form_error(&mut self, err: FormError) {
        tracing::warn!(%err, "rejected form event");
        self.state.status_message = Some(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MockSubmissionSink;
    use crate::state::{FieldDefinition, FieldEntry, FieldPath};
    use tokio_test::block_on;

    fn app_with(sink: MockSubmissionSink) -> App {
        App::with_sink(AppState::default(), Box::new(sink))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn shortcut(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), SHORTCUT_MODIFIER)
    }

    fn press(app: &mut App, event: KeyEvent) {
        block_on(app.handle_key(event)).unwrap();
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, key(KeyCode::Char(c)));
        }
    }

    /// Fill name and code, leaving focus on the field type radio
    fn fill_name_and_code(app: &mut App) {
        type_str(app, "Eng");
        press(app, key(KeyCode::Tab));
        type_str(app, "ENG");
        press(app, key(KeyCode::Tab));
    }

    mod navigation {
        use super::*;

        #[test]
        fn test_should_quit_initially_false() {
            let app = app_with(MockSubmissionSink::new());
            assert!(!app.should_quit());
        }

        #[test]
        fn test_ctrl_c_quits_even_with_error_dialog() {
            let mut app = app_with(MockSubmissionSink::new());
            app.push_error("boom");
            press(&mut app, ctrl('c'));
            assert!(app.should_quit());
        }

        #[test]
        fn test_tab_and_backtab() {
            let mut app = app_with(MockSubmissionSink::new());
            press(&mut app, key(KeyCode::Tab));
            assert_eq!(app.state.active_target(), FocusTarget::Code);
            press(&mut app, key(KeyCode::BackTab));
            assert_eq!(app.state.active_target(), FocusTarget::Name);
        }

        #[test]
        fn test_enter_on_text_field_moves_on() {
            let mut app = app_with(MockSubmissionSink::new());
            press(&mut app, key(KeyCode::Enter));
            assert_eq!(app.state.active_target(), FocusTarget::Code);
        }
    }

    mod field_type {
        use super::*;

        #[test]
        fn test_space_toggles_type() {
            let mut app = app_with(MockSubmissionSink::new());
            app.state.focus(FocusTarget::FieldType);
            press(&mut app, key(KeyCode::Char(' ')));
            assert_eq!(app.state.form.selected_type(), FieldType::Multiple);
            press(&mut app, key(KeyCode::Char(' ')));
            assert_eq!(app.state.form.selected_type(), FieldType::Text);
        }

        #[test]
        fn test_arrows_select_type() {
            let mut app = app_with(MockSubmissionSink::new());
            app.state.focus(FocusTarget::FieldType);
            press(&mut app, key(KeyCode::Right));
            assert_eq!(app.state.form.selected_type(), FieldType::Multiple);
            press(&mut app, key(KeyCode::Left));
            assert_eq!(app.state.form.selected_type(), FieldType::Text);
        }

        #[test]
        fn test_typing_on_radio_does_not_edit() {
            let mut app = app_with(MockSubmissionSink::new());
            app.state.focus(FocusTarget::FieldType);
            type_str(&mut app, "abc");
            assert!(!app.state.form.is_dirty());
        }
    }

    mod rows {
        use super::*;

        #[test]
        fn test_shortcut_n_adds_row_in_multiple_mode() {
            let mut app = app_with(MockSubmissionSink::new());
            app.state.select_field_type(FieldType::Multiple);
            press(&mut app, shortcut('n'));
            assert_eq!(app.state.form.state().rows.len(), 2);
            assert_eq!(app.state.active_target(), FocusTarget::RowName(1));
        }

        #[test]
        fn test_shortcut_n_ignored_in_text_mode() {
            let mut app = app_with(MockSubmissionSink::new());
            press(&mut app, shortcut('n'));
            assert_eq!(app.state.form.state().rows.len(), 1);
        }

        #[test]
        fn test_shortcut_d_removes_focused_row() {
            let mut app = app_with(MockSubmissionSink::new());
            app.state.select_field_type(FieldType::Multiple);
            app.state.add_row();
            type_str(&mut app, "Grade");
            press(&mut app, shortcut('d'));
            assert_eq!(app.state.form.state().rows.len(), 1);
            assert_eq!(app.state.form.state().rows.get(0).unwrap().name, "");
        }

        #[test]
        fn test_shortcut_d_outside_rows_is_noop() {
            let mut app = app_with(MockSubmissionSink::new());
            app.state.select_field_type(FieldType::Multiple);
            press(&mut app, shortcut('d'));
            assert_eq!(app.state.form.state().rows.len(), 1);
        }

        #[test]
        fn test_enter_on_delete_button() {
            let mut app = app_with(MockSubmissionSink::new());
            app.state.select_field_type(FieldType::Multiple);
            app.state.focus(FocusTarget::RemoveRow(0));
            press(&mut app, key(KeyCode::Enter));
            assert!(app.state.form.state().rows.is_empty());
            assert!(app.state.form.report().error(FieldPath::Rows).is_some());
        }

        #[test]
        fn test_enter_on_add_button() {
            let mut app = app_with(MockSubmissionSink::new());
            app.state.select_field_type(FieldType::Multiple);
            app.state.focus(FocusTarget::AddRow);
            press(&mut app, key(KeyCode::Enter));
            assert_eq!(app.state.form.state().rows.len(), 2);
        }
    }

    mod saving {
        use super::*;

        #[test]
        fn test_save_hands_record_to_sink() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_submit()
                .withf(|record: &FieldDefinition| {
                    *record
                        == FieldDefinition {
                            name: "Eng".into(),
                            code: "ENG".into(),
                            field_type: FieldType::Multiple,
                            field: vec![FieldEntry {
                                name: "Level".into(),
                                value: "L1".into(),
                            }],
                        }
                })
                .times(1)
                .returning(|_| Ok(()));

            let mut app = app_with(sink);
            fill_name_and_code(&mut app);
            press(&mut app, key(KeyCode::Right));
            press(&mut app, key(KeyCode::Tab));
            type_str(&mut app, "Level");
            press(&mut app, key(KeyCode::Tab));
            type_str(&mut app, "L1");
            press(&mut app, ctrl('s'));

            assert_eq!(app.state.submitted_count, 1);
            assert_eq!(app.state.status_message.as_deref(), Some("Saved ENG"));
            assert!(!app.state.has_errors());
        }

        #[test]
        fn test_save_blocked_when_invalid() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_submit().never();

            let mut app = app_with(sink);
            type_str(&mut app, "Eng");
            press(&mut app, ctrl('s'));

            assert!(app.state.submit_attempted);
            assert_eq!(app.state.submitted_count, 0);
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Fix the highlighted field before saving")
            );
            assert!(app.state.visible_error(FieldPath::Code).is_some());
        }

        #[test]
        fn test_save_blocked_counts_invalid_fields() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_submit().never();

            let mut app = app_with(sink);
            app.state.select_field_type(FieldType::Multiple);
            press(&mut app, ctrl('s'));

            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Fix the 4 highlighted fields before saving")
            );
        }

        #[test]
        fn test_save_blocked_when_clean() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_submit().never();

            let mut app = app_with(sink);
            app.state.focus(FocusTarget::Save);
            press(&mut app, key(KeyCode::Enter));
            assert_eq!(app.state.status_message.as_deref(), Some("Nothing to save"));
        }

        #[test]
        fn test_sink_failure_shows_error_dialog() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_submit()
                .times(1)
                .returning(|_| Err(anyhow::anyhow!("disk full")));

            let mut app = app_with(sink);
            fill_name_and_code(&mut app);
            press(&mut app, ctrl('s'));

            assert_eq!(app.state.submitted_count, 0);
            assert_eq!(
                app.state.current_error(),
                Some("Failed to save field definition: disk full")
            );

            // Modal swallows other keys until dismissed
            press(&mut app, key(KeyCode::Char('x')));
            assert_eq!(app.state.form.state().text(FieldPath::Name), Some("Eng"));
            press(&mut app, key(KeyCode::Enter));
            assert!(!app.state.has_errors());
        }
    }

    mod cancel {
        use super::*;

        #[test]
        fn test_esc_discards_changes() {
            let mut app = app_with(MockSubmissionSink::new());
            fill_name_and_code(&mut app);
            press(&mut app, key(KeyCode::Esc));
            assert!(!app.state.form.is_dirty());
            assert_eq!(app.state.active_target(), FocusTarget::Name);
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Changes discarded")
            );
        }

        #[test]
        fn test_cancel_button_on_clean_form() {
            let mut app = app_with(MockSubmissionSink::new());
            app.state.focus(FocusTarget::Cancel);
            press(&mut app, key(KeyCode::Enter));
            assert!(app.state.status_message.is_none());
        }
    }

    #[test]
    fn test_new_respects_start_with_multiple() {
        let config = TuiConfig {
            start_with_multiple: Some(true),
            ..Default::default()
        };
        let app = App::new(&config);
        assert_eq!(app.state.form.selected_type(), FieldType::Multiple);
        assert!(!app.state.form.is_dirty());
        assert_eq!(app.sink_description(), "log");
    }
}
