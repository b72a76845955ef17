//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a bordered button; disabled buttons are greyed out
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let border_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Green)
    };

    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };

    let paragraph = Paragraph::new(format!(" {content} "))
        .style(text_style)
        .alignment(Alignment::Center);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Width a button needs to show `content` without clipping
pub fn button_width(content: &str) -> u16 {
    // content + surrounding spaces + borders
    content.chars().count() as u16 + 4
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_button_width_fits_label() {
        assert_eq!(button_width("Generate PDF"), 16);
    }

    #[test]
    fn test_disabled_button_is_grey() {
        let mut terminal = Terminal::new(TestBackend::new(20, BUTTON_HEIGHT)).unwrap();
        terminal
            .draw(|frame| {
                render_button(frame, frame.area(), "Generating...", true, false);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let label_cell = buffer
            .content()
            .iter()
            .find(|cell| cell.symbol() == "G")
            .unwrap();
        assert_eq!(label_cell.fg, Color::DarkGray);
    }
}
