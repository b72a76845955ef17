//! Layout components (content area, status bar)

use crate::app::App;
use crate::platform::{ADD_MEDICINE_SHORTCUT, EXPORT_SHORTCUT, REMOVE_ROW_SHORTCUT};
use crate::state::Focus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Busy indicator
    let busy = if app.state.exporting {
        Span::styled(" ◐ ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    };
    spans.push(busy);

    spans.push(Span::styled(
        focus_hints(app.state.focus),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        let color = if app.state.exporting {
            Color::Yellow
        } else {
            Color::Green
        };
        spans.push(Span::styled(msg.as_str(), Style::default().fg(color)));
    } else if let Some(outcome) = app.last_export() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("Last saved {}", outcome.path.display()),
            Style::default().fg(Color::Gray),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the focused element
fn focus_hints(focus: Focus) -> String {
    let action = match focus {
        Focus::AddMedicine | Focus::AddInvestigation => "Enter:add".to_string(),
        Focus::Export => "Enter:generate".to_string(),
        Focus::Notes => "type:edit  Enter:newline".to_string(),
        Focus::Medicine { .. } | Focus::Investigation { .. } if focus.is_option() => {
            format!("←/→:change  {REMOVE_ROW_SHORTCUT}:remove row")
        }
        Focus::Medicine { .. } | Focus::Investigation { .. } => {
            format!("type:edit  {REMOVE_ROW_SHORTCUT}:remove row")
        }
        _ if focus.is_option() => "←/→:change".to_string(),
        _ => "type:edit".to_string(),
    };
    format!(
        "Tab/↑↓:move  {action}  {ADD_MEDICINE_SHORTCUT}:add medicine  {EXPORT_SHORTCUT}:export"
    )
}
