//! UI module for rendering the TUI

mod components;
mod layout;
mod prescription;
mod print_surface;

pub use print_surface::render_print_surface;

use crate::app::App;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    let view = app.current_view();
    prescription::draw(frame, main_area, &view);

    layout::draw_status_bar(frame, status_area, app);

    // Error dialog overlay (modal)
    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message, app.state.error_count());
    }
}
