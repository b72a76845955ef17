//! Presentation model of the prescription
//!
//! [`render`] is a pure function of the form and a few presentation inputs.
//! Editable mode shows every row with placeholders and controls; print mode
//! shows only what belongs on paper.

use crate::state::{Focus, FormState, FormVariant, MedicineField, PatientField, VitalsField};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Editable,
    Print,
}

/// Doctor details printed at the top and under the signature line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letterhead {
    pub doctor_name: String,
    pub address_lines: Vec<String>,
    pub mobile: Option<String>,
}

/// Presentation inputs that are not part of the form itself
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub letterhead: &'a Letterhead,
    pub variant: FormVariant,
    pub focus: Option<Focus>,
    pub exporting: bool,
}

/// One displayed value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub text: String,
    /// `text` is a hint, not a value
    pub is_placeholder: bool,
    pub focused: bool,
    /// Value comes from a fixed option list
    pub is_option: bool,
}

impl Slot {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_placeholder: false,
            focused: false,
            is_option: false,
        }
    }

    fn editable(value: &str, placeholder: &str, focused: bool, is_option: bool) -> Self {
        let show_placeholder = value.is_empty() && !placeholder.is_empty();
        Self {
            text: if show_placeholder {
                placeholder.to_string()
            } else {
                value.to_string()
            },
            is_placeholder: show_placeholder,
            focused,
            is_option,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledSlot {
    pub label: &'static str,
    pub slot: Slot,
}

/// One medicine row, cells in column order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineRow {
    pub cells: Vec<Slot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestigationRow {
    pub slot: Slot,
}

/// Interactive control shown only while editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub label: String,
    pub focused: bool,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionView {
    pub mode: RenderMode,
    pub letterhead: Letterhead,
    pub patient: Option<Vec<LabeledSlot>>,
    pub vitals: Vec<LabeledSlot>,
    pub medicines: Vec<MedicineRow>,
    pub add_medicine: Option<Control>,
    pub investigations: Option<Vec<InvestigationRow>>,
    pub add_investigation: Option<Control>,
    pub notes: LabeledSlot,
    pub export: Option<Control>,
}

impl PrescriptionView {
    pub fn is_print(&self) -> bool {
        self.mode == RenderMode::Print
    }
}

/// Build the view of `form` in `mode`
pub fn render(form: &FormState, mode: RenderMode, ctx: &RenderContext) -> PrescriptionView {
    let editable = mode == RenderMode::Editable;
    let focus = if editable { ctx.focus } else { None };
    let is_focused = |f: Focus| focus == Some(f);

    let patient = ctx.variant.has_patient_info().then(|| {
        PatientField::ALL
            .into_iter()
            .map(|field| {
                let raw = form.patient().get(field);
                let slot = if editable {
                    Slot::editable(
                        raw,
                        field.placeholder(),
                        is_focused(Focus::Patient(field)),
                        field.is_option(),
                    )
                } else if field == PatientField::Date {
                    Slot::plain(format_display_date(raw))
                } else {
                    Slot::plain(raw)
                };
                LabeledSlot {
                    label: field.label(),
                    slot,
                }
            })
            .collect()
    });

    let vitals = VitalsField::ALL
        .into_iter()
        .map(|field| {
            let raw = form.vitals().get(field);
            let slot = if editable {
                Slot::editable(
                    raw,
                    field.placeholder(),
                    is_focused(Focus::Vitals(field)),
                    false,
                )
            } else {
                Slot::plain(raw)
            };
            LabeledSlot {
                label: field.label(),
                slot,
            }
        })
        .collect();

    let medicines = form
        .medicines()
        .iter()
        .enumerate()
        .filter(|(_, med)| editable || !med.is_blank())
        .map(|(index, med)| MedicineRow {
            cells: MedicineField::ALL
                .into_iter()
                .map(|field| {
                    if editable {
                        Slot::editable(
                            med.value(field),
                            field.placeholder(),
                            is_focused(Focus::Medicine { row: index, field }),
                            field.is_option(),
                        )
                    } else {
                        Slot::plain(med.value(field))
                    }
                })
                .collect(),
        })
        .collect();

    let investigations = ctx.variant.has_investigations().then(|| {
        form.investigations()
            .iter()
            .enumerate()
            .filter(|(_, inv)| editable || !inv.text.is_empty())
            .map(|(index, inv)| InvestigationRow {
                slot: if editable {
                    Slot::editable(
                        &inv.text,
                        "e.g., CBC, Lipid profile",
                        is_focused(Focus::Investigation { row: index }),
                        false,
                    )
                } else {
                    Slot::plain(&inv.text)
                },
            })
            .collect()
    });

    let notes = LabeledSlot {
        label: "Other Notes",
        slot: if editable {
            Slot::editable(
                form.notes(),
                "e.g., Follow up after 1 week.",
                is_focused(Focus::Notes),
                false,
            )
        } else {
            Slot::plain(form.notes())
        },
    };

    let control = |label: &str, f: Focus, enabled: bool| {
        editable.then(|| Control {
            label: label.to_string(),
            focused: is_focused(f),
            enabled,
        })
    };

    let export_label = if ctx.exporting {
        "Generating..."
    } else {
        "Generate PDF"
    };

    PrescriptionView {
        mode,
        letterhead: ctx.letterhead.clone(),
        patient,
        vitals,
        medicines,
        add_medicine: control("+ Add Medicine", Focus::AddMedicine, true),
        investigations,
        add_investigation: if ctx.variant.has_investigations() {
            control("+ Add Investigation", Focus::AddInvestigation, true)
        } else {
            None
        },
        notes,
        export: control(export_label, Focus::Export, !ctx.exporting),
    }
}

/// `YYYY-MM-DD` to `DD/MM/YYYY`; empty stays empty and anything else is shown as typed
pub fn format_display_date(iso: &str) -> String {
    if iso.is_empty() {
        return String::new();
    }
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| iso.to_string())
}
