//! Prescription form state and its mutation operations

use super::field::{MedicineField, PatientField, VitalsField};
use super::options::{Gender, Instruction, MedicineType, OptionSet, Timing};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by form mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{list} row {index} does not exist ({len} rows)")]
    InvalidIndex {
        list: ListKind,
        index: usize,
        len: usize,
    },
    #[error("'{value}' is not a valid {field} option")]
    InvalidOption { field: &'static str, value: String },
    #[error("unknown field '{0}'")]
    UnknownField(String),
}

/// The two editable lists on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Medicines,
    Investigations,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Medicines => write!(f, "medicine"),
            Self::Investigations => write!(f, "investigation"),
        }
    }
}

/// Which sections of the form are in use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormVariant {
    /// Vitals, medicines and notes only
    Minimal,
    /// Adds patient details and investigations
    #[default]
    Extended,
}

impl FormVariant {
    pub fn has_patient_info(self) -> bool {
        matches!(self, Self::Extended)
    }

    pub fn has_investigations(self) -> bool {
        matches!(self, Self::Extended)
    }
}

/// Stable identity of a list entry, independent of its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the medicine list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineEntry {
    id: EntryId,
    pub kind: MedicineType,
    pub name: String,
    pub quantity: String,
    pub timing: Timing,
    pub instruction: Instruction,
}

impl MedicineEntry {
    fn new() -> Self {
        Self {
            id: EntryId::generate(),
            kind: MedicineType::default(),
            name: String::new(),
            quantity: String::new(),
            timing: Timing::default(),
            instruction: Instruction::default(),
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    /// A row with neither name nor quantity has nothing worth printing
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.quantity.is_empty()
    }

    /// Display text of a column
    pub fn value(&self, field: MedicineField) -> &str {
        match field {
            MedicineField::Type => self.kind.label(),
            MedicineField::Name => &self.name,
            MedicineField::Quantity => &self.quantity,
            MedicineField::Timing => self.timing.label(),
            MedicineField::Instruction => self.instruction.label(),
        }
    }
}

/// One row of the investigation list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestigationEntry {
    id: EntryId,
    pub text: String,
}

impl InvestigationEntry {
    fn new() -> Self {
        Self {
            id: EntryId::generate(),
            text: String::new(),
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vitals {
    pub bp: String,
    pub weight: String,
}

impl Vitals {
    pub fn get(&self, field: VitalsField) -> &str {
        match field {
            VitalsField::Bp => &self.bp,
            VitalsField::Weight => &self.weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientInfo {
    pub name: String,
    /// ISO `YYYY-MM-DD`, kept as typed
    pub date: String,
    pub age: String,
    pub gender: Gender,
}

impl PatientInfo {
    /// Blank patient details dated on the given day
    pub fn dated(date: NaiveDate) -> Self {
        Self {
            name: String::new(),
            date: date.format("%Y-%m-%d").to_string(),
            age: String::new(),
            gender: Gender::default(),
        }
    }

    pub fn get(&self, field: PatientField) -> &str {
        match field {
            PatientField::Name => &self.name,
            PatientField::Date => &self.date,
            PatientField::Age => &self.age,
            PatientField::Gender => self.gender.label(),
        }
    }
}

impl Default for PatientInfo {
    fn default() -> Self {
        Self::dated(Local::now().date_naive())
    }
}

/// Aggregate root of the prescription being written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    vitals: Vitals,
    notes: String,
    medicines: Vec<MedicineEntry>,
    investigations: Vec<InvestigationEntry>,
    patient: PatientInfo,
}

impl FormState {
    /// Fresh form with one empty medicine row and one empty investigation row
    pub fn new() -> Self {
        Self::with_patient(PatientInfo::default())
    }

    pub fn with_patient(patient: PatientInfo) -> Self {
        Self {
            vitals: Vitals::default(),
            notes: String::new(),
            medicines: vec![MedicineEntry::new()],
            investigations: vec![InvestigationEntry::new()],
            patient,
        }
    }

    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn medicines(&self) -> &[MedicineEntry] {
        &self.medicines
    }

    pub fn investigations(&self) -> &[InvestigationEntry] {
        &self.investigations
    }

    pub fn patient(&self) -> &PatientInfo {
        &self.patient
    }

    pub fn update_vitals(&mut self, field: VitalsField, value: impl Into<String>) {
        match field {
            VitalsField::Bp => self.vitals.bp = value.into(),
            VitalsField::Weight => self.vitals.weight = value.into(),
        }
    }

    pub fn update_notes(&mut self, value: impl Into<String>) {
        self.notes = value.into();
    }

    pub fn update_patient_info(
        &mut self,
        field: PatientField,
        value: &str,
    ) -> Result<(), FormError> {
        match field {
            PatientField::Name => self.patient.name = value.to_string(),
            PatientField::Date => self.patient.date = value.to_string(),
            PatientField::Age => self.patient.age = value.to_string(),
            PatientField::Gender => self.patient.gender = parse_option("gender", value)?,
        }
        Ok(())
    }

    /// Replace one column of the medicine at `index`, leaving everything else intact
    pub fn update_medicine(
        &mut self,
        index: usize,
        field: MedicineField,
        value: &str,
    ) -> Result<(), FormError> {
        let len = self.medicines.len();
        let entry = self
            .medicines
            .get_mut(index)
            .ok_or(FormError::InvalidIndex {
                list: ListKind::Medicines,
                index,
                len,
            })?;

        match field {
            MedicineField::Type => entry.kind = parse_option(field.key(), value)?,
            MedicineField::Name => entry.name = value.to_string(),
            MedicineField::Quantity => entry.quantity = value.to_string(),
            MedicineField::Timing => entry.timing = parse_option(field.key(), value)?,
            MedicineField::Instruction => entry.instruction = parse_option(field.key(), value)?,
        }
        Ok(())
    }

    /// Append a default medicine row and return its id
    pub fn add_medicine(&mut self) -> EntryId {
        let entry = MedicineEntry::new();
        let id = entry.id();
        self.medicines.push(entry);
        id
    }

    /// Remove the medicine with `id`; returns false when no row matched
    pub fn remove_medicine(&mut self, id: EntryId) -> bool {
        let before = self.medicines.len();
        self.medicines.retain(|m| m.id != id);
        self.medicines.len() != before
    }

    pub fn medicine_index(&self, id: EntryId) -> Option<usize> {
        self.medicines.iter().position(|m| m.id == id)
    }

    /// Step an option column to its neighbouring value. Text columns are left alone.
    pub fn cycle_medicine_option(
        &mut self,
        index: usize,
        field: MedicineField,
        forward: bool,
    ) -> Result<(), FormError> {
        let entry = self.medicines.get(index).ok_or(FormError::InvalidIndex {
            list: ListKind::Medicines,
            index,
            len: self.medicines.len(),
        })?;

        let next = match field {
            MedicineField::Type => entry.kind.cycle(forward).label(),
            MedicineField::Timing => entry.timing.cycle(forward).label(),
            MedicineField::Instruction => entry.instruction.cycle(forward).label(),
            MedicineField::Name | MedicineField::Quantity => return Ok(()),
        };
        self.update_medicine(index, field, next)
    }

    pub fn cycle_gender(&mut self, forward: bool) {
        self.patient.gender = self.patient.gender.cycle(forward);
    }

    pub fn update_investigation(&mut self, index: usize, value: &str) -> Result<(), FormError> {
        let len = self.investigations.len();
        let entry = self
            .investigations
            .get_mut(index)
            .ok_or(FormError::InvalidIndex {
                list: ListKind::Investigations,
                index,
                len,
            })?;
        entry.text = value.to_string();
        Ok(())
    }

    pub fn add_investigation(&mut self) -> EntryId {
        let entry = InvestigationEntry::new();
        let id = entry.id();
        self.investigations.push(entry);
        id
    }

    pub fn remove_investigation(&mut self, id: EntryId) -> bool {
        let before = self.investigations.len();
        self.investigations.retain(|i| i.id != id);
        self.investigations.len() != before
    }

    pub fn investigation_index(&self, id: EntryId) -> Option<usize> {
        self.investigations.iter().position(|i| i.id == id)
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_option<T: OptionSet>(field: &'static str, value: &str) -> Result<T, FormError> {
    T::from_label(value).ok_or_else(|| FormError::InvalidOption {
        field,
        value: value.to_string(),
    })
}
