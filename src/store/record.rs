//! Student record model.

use serde::{Deserialize, Serialize};

/// Identifier of a record in the store.
pub type StudentId = u32;

/// Placeholder text that interactive API docs pre-fill into string fields.
/// Partial updates treat it as "no input".
pub const PLACEHOLDER_TEXT: &str = "string";

/// A student's stored attributes.
///
/// Every field is optional; `null` and an absent field both decode to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: Option<String>,
    pub age: Option<i64>,
    /// School year. Older clients send this as `class`.
    #[serde(alias = "class")]
    pub year: Option<String>,
}

impl Student {
    pub fn new(name: impl Into<String>, age: i64, year: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            age: Some(age),
            year: Some(year.into()),
        }
    }

    /// Case-insensitive name comparison. A record without a name never matches.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|own| own.to_lowercase() == name.to_lowercase())
    }

    /// Apply the fields of `patch` that carry real input.
    ///
    /// Text fields are skipped when unset, empty, or equal to
    /// [`PLACEHOLDER_TEXT`]. `age` is skipped unless it is greater than zero.
    pub fn apply_patch(&mut self, patch: Student) {
        if let Some(name) = patch.name.filter(|v| has_text(v)) {
            self.name = Some(name);
        }
        if let Some(age) = patch.age.filter(|v| *v > 0) {
            self.age = Some(age);
        }
        if let Some(year) = patch.year.filter(|v| has_text(v)) {
            self.year = Some(year);
        }
    }
}

fn has_text(value: &str) -> bool {
    !value.is_empty() && value != PLACEHOLDER_TEXT
}

/// The fixed records the store starts with.
pub fn seed_records() -> Vec<(StudentId, Student)> {
    vec![
        (1, Student::new("John", 17, "year 12")),
        (2, Student::new("Jane", 14, "year 9")),
        (3, Student::new("Julia", 16, "year 11")),
    ]
}
