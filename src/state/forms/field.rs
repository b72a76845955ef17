//! Field selectors for the prescription form
//!
//! Each selector names one editable field. Selectors parse from the short
//! keys used by callers (`"bp"`, `"quantity"`, ...) so mutations can be driven
//! by plain strings as well as by the typed variants.

use super::form_state::FormError;
use std::str::FromStr;

/// Vital signs recorded on the prescription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VitalsField {
    Bp,
    Weight,
}

impl VitalsField {
    pub const ALL: [Self; 2] = [Self::Bp, Self::Weight];

    pub fn label(self) -> &'static str {
        match self {
            Self::Bp => "Blood Pressure (BP)",
            Self::Weight => "Weight",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Bp => "e.g., 120/80 mmHg",
            Self::Weight => "e.g., 70 kg",
        }
    }
}

impl FromStr for VitalsField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bp" => Ok(Self::Bp),
            "weight" => Ok(Self::Weight),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

/// Patient details (extended form only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatientField {
    Name,
    Date,
    Age,
    Gender,
}

impl PatientField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Date, Self::Age, Self::Gender];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Date => "Date",
            Self::Age => "Age",
            Self::Gender => "Gender",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Patient Name",
            Self::Date => "YYYY-MM-DD",
            Self::Age => "e.g., 42",
            Self::Gender => "",
        }
    }

    pub fn is_option(self) -> bool {
        matches!(self, Self::Gender)
    }
}

impl FromStr for PatientField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "date" => Ok(Self::Date),
            "age" => Ok(Self::Age),
            "gender" => Ok(Self::Gender),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

/// Columns of a medicine row, in print order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MedicineField {
    Type,
    Name,
    Quantity,
    Timing,
    Instruction,
}

impl MedicineField {
    pub const ALL: [Self; 5] = [
        Self::Type,
        Self::Name,
        Self::Quantity,
        Self::Timing,
        Self::Instruction,
    ];

    /// Column heading
    pub fn label(self) -> &'static str {
        match self {
            Self::Type => "Type",
            Self::Name => "Medicine",
            Self::Quantity => "Quantity",
            Self::Timing => "Timing",
            Self::Instruction => "Instruction",
        }
    }

    /// Key used in error messages and string-driven updates
    pub fn key(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Name => "name",
            Self::Quantity => "quantity",
            Self::Timing => "timing",
            Self::Instruction => "instruction",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Medicine Name",
            Self::Quantity => "e.g., 30",
            _ => "",
        }
    }

    /// Select-style columns take a value from a fixed option list
    pub fn is_option(self) -> bool {
        matches!(self, Self::Type | Self::Timing | Self::Instruction)
    }
}

impl FromStr for MedicineField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}
