//! Keyboard focus over the prescription form

use super::forms::{FormState, FormVariant, MedicineField, PatientField, VitalsField};

/// Focusable element of the editable form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Patient(PatientField),
    Vitals(VitalsField),
    Medicine {
        row: usize,
        field: MedicineField,
    },
    AddMedicine,
    Investigation {
        row: usize,
    },
    AddInvestigation,
    Notes,
    Export,
}

impl Focus {
    /// Tab order for the current rows of `form`
    pub fn order(form: &FormState, variant: FormVariant) -> Vec<Focus> {
        let mut order = Vec::new();

        if variant.has_patient_info() {
            order.extend(PatientField::ALL.map(Focus::Patient));
        }
        order.extend(VitalsField::ALL.map(Focus::Vitals));

        for row in 0..form.medicines().len() {
            order.extend(MedicineField::ALL.map(|field| Focus::Medicine { row, field }));
        }
        order.push(Focus::AddMedicine);

        if variant.has_investigations() {
            order.extend((0..form.investigations().len()).map(|row| Focus::Investigation { row }));
            order.push(Focus::AddInvestigation);
        }

        order.push(Focus::Notes);
        order.push(Focus::Export);
        order
    }

    /// First focus stop of a fresh form
    pub fn first(variant: FormVariant) -> Self {
        if variant.has_patient_info() {
            Focus::Patient(PatientField::Name)
        } else {
            Focus::Vitals(VitalsField::Bp)
        }
    }

    /// Whether Left/Right cycle a fixed option list here
    pub fn is_option(self) -> bool {
        match self {
            Focus::Patient(field) => field.is_option(),
            Focus::Medicine { field, .. } => field.is_option(),
            _ => false,
        }
    }

    /// Whether typed characters edit a text value here
    pub fn is_text(self) -> bool {
        match self {
            Focus::Patient(field) => !field.is_option(),
            Focus::Medicine { field, .. } => !field.is_option(),
            Focus::Vitals(_) | Focus::Investigation { .. } | Focus::Notes => true,
            Focus::AddMedicine | Focus::AddInvestigation | Focus::Export => false,
        }
    }
}

/// Move to the next stop, wrapping at the end
pub fn next_focus(current: Focus, order: &[Focus]) -> Focus {
    step(current, order, true)
}

/// Move to the previous stop, wrapping at the start
pub fn prev_focus(current: Focus, order: &[Focus]) -> Focus {
    step(current, order, false)
}

fn step(current: Focus, order: &[Focus], forward: bool) -> Focus {
    let count = order.len();
    if count == 0 {
        return current;
    }
    let Some(index) = order.iter().position(|f| *f == current) else {
        return order[0];
    };
    let next = if forward {
        (index + 1) % count
    } else if index == 0 {
        count - 1
    } else {
        index - 1
    };
    order[next]
}

/// Bring a focus that points past the end of a list back onto a valid stop
pub fn clamp_focus(current: Focus, form: &FormState, variant: FormVariant) -> Focus {
    let order = Focus::order(form, variant);
    if order.contains(&current) {
        return current;
    }

    match current {
        Focus::Medicine { row, field } => match form.medicines().len() {
            0 => Focus::AddMedicine,
            len => Focus::Medicine {
                row: row.min(len - 1),
                field,
            },
        },
        Focus::Investigation { row } if variant.has_investigations() => {
            match form.investigations().len() {
                0 => Focus::AddInvestigation,
                len => Focus::Investigation {
                    row: row.min(len - 1),
                },
            }
        }
        _ => Focus::first(variant),
    }
}
