//! Form domain layer
//!
//! This module provides the prescription data model and the only operations
//! allowed to change it. Rendering reads it; key handling writes it.

mod field;
mod form_state;
mod options;

pub use field::{MedicineField, PatientField, VitalsField};
pub use form_state::{
    EntryId, FormError, FormState, FormVariant, InvestigationEntry, ListKind, MedicineEntry,
    PatientInfo, Vitals,
};
pub use options::{Gender, Instruction, MedicineType, OptionSet, Timing};
