//! Offscreen rendering of the print view for capture

use super::prescription::card_lines;
use crate::view::PrescriptionView;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Paragraph, Widget},
};

/// Width of the print surface in cells
pub const PRINT_WIDTH: u16 = 96;
const SIDE_MARGIN: u16 = 2;
const TOP_MARGIN: u16 = 1;

/// Draw `view` into a fresh buffer sized to its content
pub fn render_print_surface(view: &PrescriptionView) -> Buffer {
    let content_width = PRINT_WIDTH - 2 * SIDE_MARGIN;
    let card = card_lines(view, content_width);
    let content_height = u16::try_from(card.lines.len()).unwrap_or(u16::MAX - 2 * TOP_MARGIN);

    let mut buffer = Buffer::empty(Rect::new(
        0,
        0,
        PRINT_WIDTH,
        content_height.saturating_add(2 * TOP_MARGIN),
    ));
    let content = Rect::new(SIDE_MARGIN, TOP_MARGIN, content_width, content_height);
    Paragraph::new(card.lines).render(content, &mut buffer);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::PatientInfo;
    use crate::state::{Focus, FormState, FormVariant, MedicineField};
    use crate::view::{render, Letterhead, RenderContext, RenderMode};
    use chrono::NaiveDate;

    fn rows(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol().to_string()))
                    .collect::<String>()
            })
            .collect()
    }

    fn print_view(form: &FormState) -> PrescriptionView {
        let letterhead = Letterhead {
            doctor_name: "Dr. A. Example".to_string(),
            address_lines: vec![],
            mobile: Some("0000000000".to_string()),
        };
        render(
            form,
            RenderMode::Print,
            &RenderContext {
                letterhead: &letterhead,
                variant: FormVariant::Extended,
                focus: Some(Focus::Export),
                exporting: true,
            },
        )
    }

    #[test]
    fn test_surface_has_fixed_width_and_margins() {
        let buffer = render_print_surface(&print_view(&FormState::new()));
        assert_eq!(buffer.area.width, PRINT_WIDTH);

        let rows = rows(&buffer);
        assert!(rows[0].trim().is_empty());
        assert!(rows[1].starts_with("  Dr. A. Example"));
        assert!(rows.last().unwrap().trim().is_empty());
    }

    #[test]
    fn test_surface_shows_only_printable_content() {
        let mut form = FormState::with_patient(PatientInfo::dated(
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        ));
        form.update_medicine(0, MedicineField::Name, "Paracetamol")
            .unwrap();
        form.update_medicine(0, MedicineField::Quantity, "10")
            .unwrap();
        form.add_medicine();

        let text = rows(&render_print_surface(&print_view(&form))).join("\n");

        assert!(text.contains("Paracetamol"));
        assert!(text.contains("05/03/2024"));
        assert!(text.contains("Mobile: 0000000000"));
        assert!(!text.contains("Generate PDF"));
        assert!(!text.contains("Generating..."));
        assert!(!text.contains("+ Add Medicine"));
        assert!(!text.contains("Medicine Name"));
        assert_eq!(text.matches("Morning only").count(), 1);
    }

    #[test]
    fn test_long_medicine_name_prints_in_full() {
        let mut form = FormState::new();
        form.update_medicine(0, MedicineField::Name, "Amoxicillin + Clavulanic Acid 625mg")
            .unwrap();

        let rows = rows(&render_print_surface(&print_view(&form)));
        let first = rows
            .iter()
            .position(|r| r.contains("Amoxicillin +"))
            .unwrap();
        let column = rows[first].find("Amoxicillin +").unwrap();
        assert!(rows[first + 1][column..].starts_with("Clavulanic Acid 625mg"));
    }

    #[test]
    fn test_long_note_prints_in_full() {
        let note = "Take the tablets after food with a full glass of water, avoid driving \
                    if drowsy, and come back for review if the cough lasts a week";
        assert!(note.len() > 120);
        let mut form = FormState::new();
        form.update_notes(note);

        let buffer = render_print_surface(&print_view(&form));
        let rows = rows(&buffer);
        let words = rows
            .iter()
            .flat_map(|r| r.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ");
        assert!(words.contains(note));

        // Nothing spills into the right margin
        for row in &rows {
            assert!(row.ends_with("  "), "clipped: {row:?}");
        }
        let signature = rows
            .iter()
            .rposition(|r| r.contains("Dr. A. Example"))
            .unwrap();
        assert_eq!(usize::from(buffer.area.height), signature + 1 + usize::from(TOP_MARGIN));
    }
}
