//! Fixed option sets for select-style fields

/// A closed list of labelled options, in display order
pub trait OptionSet: Sized + Copy + PartialEq + 'static {
    /// Every option, first entry is the default
    const ALL: &'static [Self];

    /// Human-readable label, also the accepted input value
    fn label(self) -> &'static str;

    /// Parse an option from its exact label
    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|o| o.label() == label)
    }

    /// Step to the neighbouring option, wrapping at either end
    fn cycle(self, forward: bool) -> Self {
        let count = Self::ALL.len();
        let current = Self::ALL.iter().position(|o| *o == self).unwrap_or(0);
        let next = if forward {
            (current + 1) % count
        } else if current == 0 {
            count - 1
        } else {
            current - 1
        };
        Self::ALL[next]
    }
}

/// Dosage form of a medicine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MedicineType {
    #[default]
    Tab,
    Cap,
    Syp,
    Injection,
    Lotion,
    Cream,
    Sachet,
    Other,
}

impl OptionSet for MedicineType {
    const ALL: &'static [Self] = &[
        Self::Tab,
        Self::Cap,
        Self::Syp,
        Self::Injection,
        Self::Lotion,
        Self::Cream,
        Self::Sachet,
        Self::Other,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Tab => "Tab",
            Self::Cap => "Cap",
            Self::Syp => "Syp",
            Self::Injection => "Injection",
            Self::Lotion => "Lotion",
            Self::Cream => "Cream",
            Self::Sachet => "Sachet",
            Self::Other => "Other",
        }
    }
}

/// When in the day a dose is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timing {
    #[default]
    MorningOnly,
    NightOnly,
    MorningAndNight,
    ThriceDaily,
}

impl OptionSet for Timing {
    const ALL: &'static [Self] = &[
        Self::MorningOnly,
        Self::NightOnly,
        Self::MorningAndNight,
        Self::ThriceDaily,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::MorningOnly => "Morning only",
            Self::NightOnly => "Night only",
            Self::MorningAndNight => "Morning and Night",
            Self::ThriceDaily => "Morning, Afternoon and Night",
        }
    }
}

/// Dose instruction relative to meals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Instruction {
    #[default]
    BeforeMeal,
    AfterMeal,
    AtBedTime,
    MorningBeforeMeal,
}

impl OptionSet for Instruction {
    const ALL: &'static [Self] = &[
        Self::BeforeMeal,
        Self::AfterMeal,
        Self::AtBedTime,
        Self::MorningBeforeMeal,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::BeforeMeal => "Before Meal",
            Self::AfterMeal => "After Meal",
            Self::AtBedTime => "At Bed Time",
            Self::MorningBeforeMeal => "Morning Before Meal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl OptionSet for Gender {
    const ALL: &'static [Self] = &[Self::Male, Self::Female];

    fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_first_options() {
        assert_eq!(MedicineType::default(), MedicineType::ALL[0]);
        assert_eq!(Timing::default(), Timing::ALL[0]);
        assert_eq!(Instruction::default(), Instruction::ALL[0]);
        assert_eq!(Gender::default(), Gender::ALL[0]);
    }

    #[test]
    fn test_labels_match_option_lists() {
        let types: Vec<_> = MedicineType::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(
            types,
            ["Tab", "Cap", "Syp", "Injection", "Lotion", "Cream", "Sachet", "Other"]
        );

        let timings: Vec<_> = Timing::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(
            timings,
            [
                "Morning only",
                "Night only",
                "Morning and Night",
                "Morning, Afternoon and Night"
            ]
        );

        let instructions: Vec<_> = Instruction::ALL.iter().map(|i| i.label()).collect();
        assert_eq!(
            instructions,
            ["Before Meal", "After Meal", "At Bed Time", "Morning Before Meal"]
        );
    }

    #[test]
    fn test_from_label_is_exact() {
        assert_eq!(Timing::from_label("Night only"), Some(Timing::NightOnly));
        assert_eq!(Timing::from_label("night only"), None);
        assert_eq!(Gender::from_label("Female"), Some(Gender::Female));
        assert_eq!(MedicineType::from_label(""), None);
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        assert_eq!(MedicineType::Other.cycle(true), MedicineType::Tab);
        assert_eq!(MedicineType::Tab.cycle(false), MedicineType::Other);
        assert_eq!(Gender::Male.cycle(true), Gender::Female);
        assert_eq!(Instruction::AfterMeal.cycle(false), Instruction::BeforeMeal);
    }
}
