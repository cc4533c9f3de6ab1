//! The fitness profile collected by the form and flattened into prompt text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Gender choices offered by the form's single-choice selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimums enforced by the form's number inputs.
pub const MIN_AGE: u32 = 1;
pub const MIN_MEASUREMENT: f64 = 1.0;
pub const MIN_DURATION_DAYS: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessProfile {
    #[serde(default)]
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub target_weight_kg: f64,
    pub target_duration_days: u32,
    #[serde(default)]
    pub food_preference: String,
}

impl Default for FitnessProfile {
    /// Matches what a freshly rendered form shows: every number at its minimum.
    fn default() -> Self {
        Self {
            name: String::new(),
            age: MIN_AGE,
            gender: Gender::default(),
            weight_kg: MIN_MEASUREMENT,
            height_cm: MIN_MEASUREMENT,
            target_weight_kg: MIN_MEASUREMENT,
            target_duration_days: MIN_DURATION_DAYS,
            food_preference: String::new(),
        }
    }
}

impl FitnessProfile {
    /// Flattens the profile into the single line of text handed to the advice prompt.
    pub fn to_profile_string(&self) -> String {
        format!(
            "Name: {}, Age: {} Years, Gender: {}, Weight: {} Kilograms, Height: {} Centimeter, \
             Target Weight: {} Kilograms, Target Duration: {} Days, Food Preference: {}",
            self.name,
            self.age,
            self.gender,
            format_decimal(self.weight_kg),
            format_decimal(self.height_cm),
            format_decimal(self.target_weight_kg),
            self.target_duration_days,
            self.food_preference,
        )
    }

    /// Rejects values the form's number inputs would never submit.
    ///
    /// Name and food preference may be empty.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();

        if self.age < MIN_AGE {
            problems.push(format!("age must be at least {MIN_AGE}"));
        }
        for (field, value) in [
            ("weight", self.weight_kg),
            ("height", self.height_cm),
            ("target weight", self.target_weight_kg),
        ] {
            if !value.is_finite() || value < MIN_MEASUREMENT {
                problems.push(format!("{field} must be at least {MIN_MEASUREMENT:.1}"));
            }
        }
        if self.target_duration_days < MIN_DURATION_DAYS {
            problems.push(format!(
                "target duration must be at least {MIN_DURATION_DAYS} day"
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(problems.join("; ")))
        }
    }
}

/// Formats a measurement with at least one decimal place (`65` → `65.0`, `65.25` → `65.25`).
fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
