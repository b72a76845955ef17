//! Application state and core logic

use crate::config::TuiConfig;
use crate::export::{ExportError, ExportOutcome, ExportPipeline};
use crate::platform::is_shortcut;
use crate::state::{AppState, Focus, FormError};
use crate::ui::render_print_surface;
use crate::view::{render, Letterhead, PrescriptionView, RenderContext};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

type ExportTask = JoinHandle<Result<ExportOutcome, ExportError>>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    letterhead: Letterhead,
    exporter: Arc<ExportPipeline>,
    /// Export running in the background, if any
    export_task: Option<ExportTask>,
    last_export: Option<ExportOutcome>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance exporting with the default collaborators
    pub fn new(config: &TuiConfig) -> Self {
        Self::with_exporter(config, ExportPipeline::with_defaults(config.output_dir()))
    }

    pub fn with_exporter(config: &TuiConfig, exporter: ExportPipeline) -> Self {
        Self {
            state: AppState::new(config.variant()),
            letterhead: config.letterhead(),
            exporter: Arc::new(exporter),
            export_task: None,
            last_export: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn last_export(&self) -> Option<&ExportOutcome> {
        self.last_export.as_ref()
    }

    /// The view for the current mode
    pub fn current_view(&self) -> PrescriptionView {
        let ctx = RenderContext {
            letterhead: &self.letterhead,
            variant: self.state.variant,
            focus: Some(self.state.focus),
            exporting: self.state.exporting,
        };
        render(&self.state.form, self.state.mode, &ctx)
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }

        // Error dialog is modal
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.state.dismiss_error();
            }
            return;
        }

        if !self.state.is_editable() {
            return;
        }

        if !self.state.exporting {
            self.state.status_message = None;
        }

        if is_shortcut(key.modifiers) {
            match key.code {
                KeyCode::Char('n') => self.state.add_medicine(),
                KeyCode::Char('d') => {
                    if !self.state.remove_focused_row() {
                        self.state.status_message = Some("No row selected".to_string());
                    }
                }
                KeyCode::Char('s') | KeyCode::Char('p') => self.request_export(),
                _ => {}
            }
            return;
        }

        let result = match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.state.next_field();
                Ok(())
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.state.prev_field();
                Ok(())
            }
            KeyCode::Left => self.state.cycle_option(false),
            KeyCode::Right => self.state.cycle_option(true),
            KeyCode::Char(' ') if self.state.focus.is_option() => self.state.cycle_option(true),
            KeyCode::Enter => {
                self.activate();
                Ok(())
            }
            KeyCode::Backspace => self.state.backspace(),
            KeyCode::Char(c) => self.state.input_char(c),
            _ => Ok(()),
        };

        if let Err(e) = result {
            self.report_form_error(e);
        }
    }

    /// Enter on the focused element
    fn activate(&mut self) {
        match self.state.focus {
            Focus::AddMedicine => self.state.add_medicine(),
            Focus::AddInvestigation => self.state.add_investigation(),
            Focus::Export => self.request_export(),
            Focus::Notes => self.state.newline(),
            _ => self.state.next_field(),
        }
    }

    fn report_form_error(&mut self, e: FormError) {
        warn!("Form update rejected: {e}");
        self.state.status_message = Some(e.to_string());
    }

    /// Switch to print mode; the capture follows the next rendered frame
    pub fn request_export(&mut self) {
        match self.state.begin_export() {
            Ok(()) => debug!("Export requested, waiting for print frame"),
            Err(e) => {
                debug!("Export request ignored: {e}");
                self.state.status_message = Some("Export already in progress".to_string());
            }
        }
    }

    /// Called by the event loop after each completed frame
    pub fn on_frame_rendered(&mut self) {
        self.state.mark_frame_rendered();
        if !self.state.capture_ready() {
            return;
        }
        match self.capture_print_surface() {
            Ok(surface) => self.spawn_export(surface),
            Err(e) => self.apply_export_result(Err(e)),
        }
    }

    /// Take the print-mode rendering and return to the editable view
    pub fn capture_print_surface(&mut self) -> Result<Buffer, ExportError> {
        let view = self.current_view();
        self.state.take_capture()?;
        Ok(render_print_surface(&view))
    }

    fn spawn_export(&mut self, surface: Buffer) {
        info!(
            "Starting export to {}",
            self.exporter.output_path().display()
        );
        let exporter = Arc::clone(&self.exporter);
        self.export_task = Some(tokio::spawn(
            async move { exporter.export(surface).await },
        ));
    }

    /// Apply the export result once its task has finished
    pub async fn poll_export(&mut self) {
        let finished = self
            .export_task
            .as_ref()
            .is_some_and(|task| task.is_finished());
        if finished {
            self.finish_export().await;
        }
    }

    /// Wait for a running export and apply its result
    pub async fn finish_export(&mut self) {
        if let Some(task) = self.export_task.take() {
            let result = match task.await {
                Ok(result) => result,
                Err(e) => Err(ExportError::Task(e.to_string())),
            };
            self.apply_export_result(result);
        }
    }

    fn apply_export_result(&mut self, result: Result<ExportOutcome, ExportError>) {
        self.state.finish_export();
        match result {
            Ok(outcome) => {
                info!(
                    "Export finished: {} ({} bytes, {} page(s), {} image(s))",
                    outcome.path.display(),
                    outcome.byte_count,
                    outcome.page_count,
                    outcome.image_count
                );
                debug!(
                    "Image placed at ({:.1}, {:.1}) mm, {:.1}x{:.1} mm",
                    outcome.placement.x,
                    outcome.placement.y,
                    outcome.placement.width,
                    outcome.placement.height
                );
                self.state.status_message = Some(format!("Saved {}", outcome.path.display()));
                self.last_export = Some(outcome);
            }
            Err(e) if !e.is_failure() => {
                warn!("Export did not start: {e}");
                self.state.push_error(format!("Could not generate PDF: {e}"));
            }
            Err(e) => {
                error!("Export failed: {e}");
                self.state.status_message = None;
                self.state.push_error(format!("Failed to generate PDF: {e}"));
            }
        }
    }
}
