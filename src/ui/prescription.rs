//! Prescription card drawing, shared by the screen and the print surface

use super::components::{button_width, render_button, wrap_text, BUTTON_HEIGHT};
use crate::state::MedicineField;
use crate::view::{Control, LabeledSlot, PrescriptionView, Slot};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const TYPE_WIDTH: usize = 10;
const QUANTITY_WIDTH: usize = 9;
const TIMING_WIDTH: usize = 29;
const INSTRUCTION_WIDTH: usize = 20;
const MIN_NAME_WIDTH: usize = 12;
const SIGNATURE_WIDTH: usize = 24;
const ITEM_GAP: usize = 3;

/// Lines of the card plus where the focused element sits
pub struct CardLines {
    pub lines: Vec<Line<'static>>,
    pub focused_line: Option<usize>,
}

impl CardLines {
    fn push(&mut self, line: Line<'static>, focused: bool) {
        if focused {
            self.focused_line = Some(self.lines.len());
        }
        self.lines.push(line);
    }

    /// Push the lines of one element; focus lands on its first line
    fn push_group(&mut self, lines: Vec<Line<'static>>, focused: bool) {
        for (i, line) in lines.into_iter().enumerate() {
            self.push(line, focused && i == 0);
        }
    }

    fn blank(&mut self) {
        self.lines.push(Line::from(""));
    }
}

/// Lay out `view` as text lines `width` columns wide
pub fn card_lines(view: &PrescriptionView, width: u16) -> CardLines {
    let width = width as usize;
    let mut card = CardLines {
        lines: Vec::new(),
        focused_line: None,
    };
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let rule = Line::from("─".repeat(width));

    // Letterhead
    for text in wrapped(&view.letterhead.doctor_name, width) {
        card.push(Line::from(Span::styled(text, bold)), false);
    }
    for address in &view.letterhead.address_lines {
        for text in wrapped(address, width) {
            card.push(Line::from(text), false);
        }
    }
    if let Some(mobile) = &view.letterhead.mobile {
        for text in wrapped(&format!("Mobile: {mobile}"), width) {
            card.push(Line::from(text), false);
        }
    }
    card.push(rule.clone(), false);

    if let Some(patient) = &view.patient {
        let focused = patient.iter().any(|p| p.slot.focused);
        card.push_group(labeled_lines(patient, width), focused);
    }
    let focused = view.vitals.iter().any(|v| v.slot.focused);
    card.push_group(labeled_lines(&view.vitals, width), focused);
    card.push(rule, false);

    // Medicines
    card.push(
        Line::from(Span::styled(
            "Rx",
            bold.add_modifier(Modifier::ITALIC),
        )),
        false,
    );
    let widths = column_widths(width);
    let headings = MedicineField::ALL
        .iter()
        .zip(widths)
        .map(|(field, w)| Span::styled(fit(field.label(), w), bold))
        .collect::<Vec<_>>();
    card.push(Line::from(headings), false);
    for row in &view.medicines {
        let columns = row
            .cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| wrapped(&slot_text(cell), w.saturating_sub(1)))
            .collect::<Vec<_>>();
        let height = columns.iter().map(Vec::len).max().unwrap_or(1);
        let lines = (0..height)
            .map(|i| {
                let spans = row
                    .cells
                    .iter()
                    .zip(widths)
                    .zip(&columns)
                    .map(|((cell, w), parts)| {
                        let text = parts.get(i).map(String::as_str).unwrap_or("");
                        Span::styled(fit(text, w), slot_style(cell))
                    })
                    .collect::<Vec<_>>();
                Line::from(spans)
            })
            .collect();
        card.push_group(lines, row.cells.iter().any(|c| c.focused));
    }
    if let Some(control) = &view.add_medicine {
        card.push(control_line(control), control.focused);
    }

    // Investigations
    if let Some(rows) = &view.investigations {
        card.blank();
        card.push(Line::from(Span::styled("Investigations", bold)), false);
        for row in rows {
            let style = slot_style(&row.slot);
            let lines = wrapped(&slot_text(&row.slot), width.saturating_sub(2))
                .into_iter()
                .enumerate()
                .map(|(i, text)| {
                    let bullet = if i == 0 { "- " } else { "  " };
                    Line::from(vec![Span::raw(bullet), Span::styled(text, style)])
                })
                .collect();
            card.push_group(lines, row.slot.focused);
        }
        if let Some(control) = &view.add_investigation {
            card.push(control_line(control), control.focused);
        }
    }

    // Notes
    card.blank();
    card.push(Line::from(Span::styled(view.notes.label, bold)), false);
    let notes = &view.notes.slot;
    let note_style = slot_style(notes);
    let note_text = slot_text(notes);
    let note_lines = note_text
        .split('\n')
        .flat_map(|paragraph| wrapped(paragraph, width))
        .collect::<Vec<_>>();
    // Focus follows the last line, where typing happens
    let last = note_lines.len().saturating_sub(1);
    for (i, text) in note_lines.into_iter().enumerate() {
        card.push(
            Line::from(Span::styled(text, note_style)),
            notes.focused && i == last,
        );
    }

    // Signature
    card.blank();
    card.blank();
    card.push(right_aligned(&"_".repeat(SIGNATURE_WIDTH), width), false);
    for text in wrapped(&view.letterhead.doctor_name, width) {
        card.push(right_aligned(&text, width), false);
    }

    if view.export.as_ref().is_some_and(|c| c.focused) {
        card.focused_line = Some(card.lines.len().saturating_sub(1));
    }
    card
}

/// Column widths for type, name, quantity, timing and instruction
fn column_widths(width: usize) -> [usize; 5] {
    let fixed = TYPE_WIDTH + QUANTITY_WIDTH + TIMING_WIDTH + INSTRUCTION_WIDTH;
    let name = width.saturating_sub(fixed).max(MIN_NAME_WIDTH);
    [TYPE_WIDTH, name, QUANTITY_WIDTH, TIMING_WIDTH, INSTRUCTION_WIDTH]
}

/// Split `text` into lines of at most `width` columns; short text is kept as typed
fn wrapped(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    if text.chars().count() <= width {
        return vec![text.to_string()];
    }
    wrap_text(text, width)
}

/// Truncate or pad `text` to exactly `width` columns, keeping one column of gap
fn fit(text: &str, width: usize) -> String {
    let visible = width.saturating_sub(1);
    let mut out: String = text.chars().take(visible).collect();
    let used = out.chars().count();
    out.push_str(&" ".repeat(width - used));
    out
}

fn right_aligned(text: &str, width: usize) -> Line<'static> {
    let pad = width.saturating_sub(text.chars().count());
    Line::from(format!("{}{text}", " ".repeat(pad)))
}

/// `Label: value` items packed into lines of at most `width` columns
fn labeled_lines(slots: &[LabeledSlot], width: usize) -> Vec<Line<'static>> {
    let label_style = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for item in slots {
        let label = format!("{}: ", item.label);
        let label_len = label.chars().count();
        let style = slot_style(&item.slot);
        let mut parts =
            wrapped(&slot_text(&item.slot), width.saturating_sub(label_len)).into_iter();
        let first = parts.next().unwrap_or_default();
        let item_len = label_len + first.chars().count();

        if used > 0 && used + ITEM_GAP + item_len > width {
            lines.push(Line::from(std::mem::take(&mut spans)));
            used = 0;
        }
        if used > 0 {
            spans.push(Span::raw(" ".repeat(ITEM_GAP)));
            used += ITEM_GAP;
        }
        spans.push(Span::styled(label, label_style));
        spans.push(Span::styled(first, style));
        used += item_len;

        // Continuation lines are indented past the label
        for part in parts {
            lines.push(Line::from(std::mem::take(&mut spans)));
            used = label_len + part.chars().count();
            spans.push(Span::raw(" ".repeat(label_len)));
            spans.push(Span::styled(part, style));
        }
    }
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }
    lines
}

fn control_line(control: &Control) -> Line<'static> {
    let style = if control.focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(Color::Green)
    };
    Line::from(Span::styled(format!("[ {} ]", control.label), style))
}

fn slot_text(slot: &Slot) -> String {
    if slot.focused && slot.is_option {
        format!("<{}>", slot.text)
    } else if slot.focused && slot.text.is_empty() {
        "_".to_string()
    } else {
        slot.text.clone()
    }
}

fn slot_style(slot: &Slot) -> Style {
    let mut style = Style::default();
    if slot.is_placeholder {
        style = style.fg(Color::DarkGray).add_modifier(Modifier::ITALIC);
    }
    if slot.focused {
        style = style
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    style
}

/// First line to show so the focused line stays visible
fn scroll_offset(focused_line: Option<usize>, height: u16) -> u16 {
    let height = height as usize;
    match focused_line {
        Some(line) if height > 0 && line >= height => (line + 1 - height) as u16,
        _ => 0,
    }
}

/// Draw the card and, while editing, the export button under it
pub fn draw(frame: &mut Frame, area: Rect, view: &PrescriptionView) {
    let (card_area, button_area) = match view.export {
        Some(_) => {
            let [card, button] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(BUTTON_HEIGHT)])
                    .areas(area);
            (card, Some(button))
        }
        None => (area, None),
    };

    let title = if view.is_print() {
        " Print preview "
    } else {
        " Prescription "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(card_area);

    let card = card_lines(view, inner.width);
    let scroll = scroll_offset(card.focused_line, inner.height);
    frame.render_widget(
        Paragraph::new(card.lines).block(block).scroll((scroll, 0)),
        card_area,
    );

    if let (Some(export), Some(row)) = (&view.export, button_area) {
        let width = button_width(&export.label).max(18).min(row.width);
        let button = Rect {
            x: row.x + row.width.saturating_sub(width) / 2,
            y: row.y,
            width,
            height: row.height,
        };
        render_button(frame, button, &export.label, export.focused, export.enabled);
    }
}
