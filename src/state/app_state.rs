//! Application state definitions

use super::focus::{clamp_focus, next_focus, prev_focus, Focus};
use super::forms::{FormError, FormState, FormVariant, MedicineField, PatientField};
use crate::export::ExportError;
use crate::view::RenderMode;
use std::collections::VecDeque;

/// Main application state
pub struct AppState {
    pub form: FormState,
    pub variant: FormVariant,
    pub focus: Focus,
    pub mode: RenderMode,

    // Export
    pub exporting: bool,
    pending_capture: bool,
    print_frame_ready: bool,

    // Feedback
    errors: VecDeque<String>,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(variant: FormVariant) -> Self {
        Self::with_form(FormState::new(), variant)
    }

    pub fn with_form(form: FormState, variant: FormVariant) -> Self {
        Self {
            form,
            variant,
            focus: Focus::first(variant),
            mode: RenderMode::Editable,
            exporting: false,
            pending_capture: false,
            print_frame_ready: false,
            errors: VecDeque::new(),
            status_message: None,
        }
    }

    /// Keys may change the form only while the editable view is shown
    pub fn is_editable(&self) -> bool {
        self.mode == RenderMode::Editable
    }

    /// Move to next form field
    pub fn next_field(&mut self) {
        let order = Focus::order(&self.form, self.variant);
        self.focus = next_focus(self.focus, &order);
    }

    /// Move to previous form field
    pub fn prev_field(&mut self) {
        let order = Focus::order(&self.form, self.variant);
        self.focus = prev_focus(self.focus, &order);
    }

    /// Handle character input on the focused field
    pub fn input_char(&mut self, c: char) -> Result<(), FormError> {
        self.edit_text(|value| value.push(c))
    }

    /// Handle backspace on the focused field
    pub fn backspace(&mut self) -> Result<(), FormError> {
        self.edit_text(|value| {
            value.pop();
        })
    }

    /// Insert a line break; only notes are multi-line
    pub fn newline(&mut self) {
        if self.focus == Focus::Notes {
            let mut notes = self.form.notes().to_string();
            notes.push('\n');
            self.form.update_notes(notes);
        }
    }

    fn edit_text(&mut self, edit: impl FnOnce(&mut String)) -> Result<(), FormError> {
        if !self.focus.is_text() {
            return Ok(());
        }
        match self.focus {
            Focus::Patient(field) => {
                let mut value = self.form.patient().get(field).to_string();
                edit(&mut value);
                self.form.update_patient_info(field, &value)
            }
            Focus::Vitals(field) => {
                let mut value = self.form.vitals().get(field).to_string();
                edit(&mut value);
                self.form.update_vitals(field, value);
                Ok(())
            }
            Focus::Medicine { row, field } => {
                let mut value = self
                    .form
                    .medicines()
                    .get(row)
                    .map(|m| m.value(field).to_string())
                    .unwrap_or_default();
                edit(&mut value);
                self.form.update_medicine(row, field, &value)
            }
            Focus::Investigation { row } => {
                let mut value = self
                    .form
                    .investigations()
                    .get(row)
                    .map(|i| i.text.clone())
                    .unwrap_or_default();
                edit(&mut value);
                self.form.update_investigation(row, &value)
            }
            Focus::Notes => {
                let mut value = self.form.notes().to_string();
                edit(&mut value);
                self.form.update_notes(value);
                Ok(())
            }
            Focus::AddMedicine | Focus::AddInvestigation | Focus::Export => Ok(()),
        }
    }

    /// Step the focused option field; other fields are left alone
    pub fn cycle_option(&mut self, forward: bool) -> Result<(), FormError> {
        match self.focus {
            Focus::Patient(PatientField::Gender) => {
                self.form.cycle_gender(forward);
                Ok(())
            }
            Focus::Medicine { row, field } if field.is_option() => {
                self.form.cycle_medicine_option(row, field, forward)
            }
            _ => Ok(()),
        }
    }

    /// Append a medicine row and focus its name
    pub fn add_medicine(&mut self) {
        let id = self.form.add_medicine();
        if let Some(row) = self.form.medicine_index(id) {
            self.focus = Focus::Medicine {
                row,
                field: MedicineField::Name,
            };
        }
    }

    /// Append an investigation row and focus it
    pub fn add_investigation(&mut self) {
        if !self.variant.has_investigations() {
            return;
        }
        let id = self.form.add_investigation();
        if let Some(row) = self.form.investigation_index(id) {
            self.focus = Focus::Investigation { row };
        }
    }

    /// Remove the row under focus; returns false when focus is not on a row
    pub fn remove_focused_row(&mut self) -> bool {
        let removed = match self.focus {
            Focus::Medicine { row, .. } => self
                .form
                .medicines()
                .get(row)
                .map(|m| m.id())
                .is_some_and(|id| self.form.remove_medicine(id)),
            Focus::Investigation { row } => self
                .form
                .investigations()
                .get(row)
                .map(|i| i.id())
                .is_some_and(|id| self.form.remove_investigation(id)),
            _ => false,
        };
        if removed {
            self.focus = clamp_focus(self.focus, &self.form, self.variant);
        }
        removed
    }

    /// Push an error message to the queue
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push_back(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error shown in the dialog, oldest first
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Enter print mode and wait for the next frame before capture
    pub fn begin_export(&mut self) -> Result<(), ExportError> {
        if self.exporting {
            return Err(ExportError::AlreadyRunning);
        }
        self.exporting = true;
        self.mode = RenderMode::Print;
        self.pending_capture = true;
        self.print_frame_ready = false;
        self.status_message = Some("Generating...".to_string());
        Ok(())
    }

    /// Called by the event loop after every completed frame
    pub fn mark_frame_rendered(&mut self) {
        if self.pending_capture && self.mode == RenderMode::Print {
            self.print_frame_ready = true;
        }
    }

    /// A print-mode frame has been drawn and the capture has not been taken
    pub fn capture_ready(&self) -> bool {
        self.pending_capture && self.print_frame_ready
    }

    /// Claim the capture and drop back to the editable view
    pub fn take_capture(&mut self) -> Result<(), ExportError> {
        if !self.capture_ready() {
            return Err(ExportError::RenderNotReady);
        }
        self.pending_capture = false;
        self.print_frame_ready = false;
        self.mode = RenderMode::Editable;
        Ok(())
    }

    /// Clear the busy flag once the export task has settled
    pub fn finish_export(&mut self) {
        self.exporting = false;
        self.pending_capture = false;
        self.print_frame_ready = false;
        self.mode = RenderMode::Editable;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FormVariant::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::Gender;
    use crate::state::VitalsField;
    use pretty_assertions::assert_eq;

    fn state() -> AppState {
        AppState::new(FormVariant::Extended)
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut state = state();
        state.focus = Focus::Vitals(VitalsField::Bp);
        for c in "120/80".chars() {
            state.input_char(c).unwrap();
        }
        state.backspace().unwrap();
        assert_eq!(state.form.vitals().bp, "120/8");
    }

    #[test]
    fn test_typing_on_option_field_is_ignored() {
        let mut state = state();
        state.focus = Focus::Medicine {
            row: 0,
            field: MedicineField::Type,
        };
        state.input_char('x').unwrap();
        assert_eq!(state.form.medicines()[0].value(MedicineField::Type), "Tab");
    }

    #[test]
    fn test_newline_only_in_notes() {
        let mut state = state();
        state.focus = Focus::Notes;
        state.input_char('a').unwrap();
        state.newline();
        state.input_char('b').unwrap();
        assert_eq!(state.form.notes(), "a\nb");

        state.focus = Focus::Vitals(VitalsField::Weight);
        state.newline();
        assert_eq!(state.form.vitals().weight, "");
    }

    #[test]
    fn test_cycle_option_on_medicine_and_gender() {
        let mut state = state();
        state.focus = Focus::Medicine {
            row: 0,
            field: MedicineField::Timing,
        };
        state.cycle_option(true).unwrap();
        assert_eq!(
            state.form.medicines()[0].value(MedicineField::Timing),
            "Night only"
        );

        state.focus = Focus::Patient(PatientField::Gender);
        state.cycle_option(false).unwrap();
        assert_eq!(state.form.patient().gender, Gender::Female);
    }

    #[test]
    fn test_add_medicine_focuses_new_row() {
        let mut state = state();
        state.add_medicine();
        assert_eq!(state.form.medicines().len(), 2);
        assert_eq!(
            state.focus,
            Focus::Medicine {
                row: 1,
                field: MedicineField::Name
            }
        );
    }

    #[test]
    fn test_remove_last_row_clamps_focus() {
        let mut state = state();
        state.add_medicine();
        state.focus = Focus::Medicine {
            row: 1,
            field: MedicineField::Quantity,
        };
        assert!(state.remove_focused_row());
        assert_eq!(
            state.focus,
            Focus::Medicine {
                row: 0,
                field: MedicineField::Quantity
            }
        );

        assert!(state.remove_focused_row());
        assert_eq!(state.form.medicines().len(), 0);
        assert_eq!(state.focus, Focus::AddMedicine);
    }

    #[test]
    fn test_remove_without_row_focus() {
        let mut state = state();
        state.focus = Focus::Notes;
        assert!(!state.remove_focused_row());
        assert_eq!(state.form.medicines().len(), 1);
    }

    #[test]
    fn test_minimal_variant_refuses_investigations() {
        let mut state = AppState::new(FormVariant::Minimal);
        let before = state.form.investigations().len();
        state.add_investigation();
        assert_eq!(state.form.investigations().len(), before);
        assert_eq!(state.focus, Focus::Vitals(VitalsField::Bp));
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = state();
        assert!(!state.has_errors());
        state.push_error("first");
        state.push_error("second");
        assert_eq!(state.error_count(), 2);
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
    }

    #[test]
    fn test_export_waits_for_print_frame() {
        let mut state = state();
        state.begin_export().unwrap();
        assert_eq!(state.mode, RenderMode::Print);
        assert!(state.exporting);

        assert!(matches!(
            state.take_capture(),
            Err(ExportError::RenderNotReady)
        ));

        state.mark_frame_rendered();
        assert!(state.capture_ready());
        state.take_capture().unwrap();

        assert_eq!(state.mode, RenderMode::Editable);
        assert!(state.exporting);
        assert!(!state.capture_ready());
    }

    #[test]
    fn test_second_export_is_refused() {
        let mut state = state();
        state.begin_export().unwrap();
        assert!(matches!(
            state.begin_export(),
            Err(ExportError::AlreadyRunning)
        ));

        state.finish_export();
        assert!(!state.exporting);
        assert!(state.begin_export().is_ok());
    }

    #[test]
    fn test_frames_before_export_do_not_arm_capture() {
        let mut state = state();
        state.mark_frame_rendered();
        assert!(!state.capture_ready());
    }
}
