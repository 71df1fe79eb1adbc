//! Registration fields and the update reducer.
//!
//! `RegistrationFields` is the partial record collected across turns.
//! `FieldUpdates` is what one turn of extraction proposes; `merge` folds
//! updates into a new field set without ever overwriting a set field.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five registration fields, in prompting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Name,
    DateOfBirth,
    Gender,
    UsesBudgetApp,
    BudgetAppName,
}

impl FieldName {
    /// Fixed prompting order.
    pub const ORDER: [FieldName; 5] = [
        FieldName::Name,
        FieldName::DateOfBirth,
        FieldName::Gender,
        FieldName::UsesBudgetApp,
        FieldName::BudgetAppName,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::DateOfBirth => "dateOfBirth",
            FieldName::Gender => "gender",
            FieldName::UsesBudgetApp => "usesBudgetApp",
            FieldName::BudgetAppName => "budgetAppName",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partially collected registration data.
///
/// A field counts as set when it is present and, for strings, not empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFields {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<Gender>,
    pub uses_budget_app: Option<bool>,
    pub budget_app_name: Option<String>,
}

impl RegistrationFields {
    /// Creates an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the given field holds a usable value.
    pub fn is_set(&self, field: FieldName) -> bool {
        match field {
            FieldName::Name => is_present(&self.name),
            FieldName::DateOfBirth => is_present(&self.date_of_birth),
            FieldName::Gender => self.gender.is_some(),
            FieldName::UsesBudgetApp => self.uses_budget_app.is_some(),
            FieldName::BudgetAppName => is_present(&self.budget_app_name),
        }
    }

    /// Returns true if the user has answered "yes" to using a budget app.
    pub fn uses_budget_app(&self) -> bool {
        self.uses_budget_app == Some(true)
    }

    /// Folds a turn's updates into a new field set.
    ///
    /// Set fields are never overwritten. The one exception is
    /// `clear_budget_app_name`, which forces `budget_app_name` to absent
    /// whatever it held before.
    pub fn merge(&self, updates: &FieldUpdates) -> RegistrationFields {
        let mut merged = self.clone();

        if !self.is_set(FieldName::Name) {
            if let Some(name) = &updates.name {
                merged.name = Some(name.clone());
            }
        }
        if !self.is_set(FieldName::DateOfBirth) {
            if let Some(dob) = &updates.date_of_birth {
                merged.date_of_birth = Some(dob.clone());
            }
        }
        if !self.is_set(FieldName::Gender) {
            merged.gender = merged.gender.or(updates.gender);
        }
        if !self.is_set(FieldName::UsesBudgetApp) {
            merged.uses_budget_app = merged.uses_budget_app.or(updates.uses_budget_app);
        }
        if !self.is_set(FieldName::BudgetAppName) {
            if let Some(app) = &updates.budget_app_name {
                merged.budget_app_name = Some(app.clone());
            }
        }

        if updates.clear_budget_app_name {
            merged.budget_app_name = None;
        }

        merged
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Field values proposed by one turn of extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldUpdates {
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<Gender>,
    pub uses_budget_app: Option<bool>,
    pub budget_app_name: Option<String>,
    /// Set when the user said they do not use a budget app.
    pub clear_budget_app_name: bool,
}

impl FieldUpdates {
    /// Returns true if the updates propose nothing.
    pub fn is_empty(&self) -> bool {
        *self == FieldUpdates::default()
    }

    /// Names of the fields this update proposes values for.
    pub fn proposed_fields(&self) -> Vec<FieldName> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push(FieldName::Name);
        }
        if self.date_of_birth.is_some() {
            fields.push(FieldName::DateOfBirth);
        }
        if self.gender.is_some() {
            fields.push(FieldName::Gender);
        }
        if self.uses_budget_app.is_some() {
            fields.push(FieldName::UsesBudgetApp);
        }
        if self.budget_app_name.is_some() {
            fields.push(FieldName::BudgetAppName);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod is_set {
        use super::*;

        #[test]
        fn empty_string_counts_as_unset() {
            let fields = RegistrationFields {
                name: Some(String::new()),
                ..Default::default()
            };
            assert!(!fields.is_set(FieldName::Name));
        }

        #[test]
        fn false_answer_counts_as_set() {
            let fields = RegistrationFields {
                uses_budget_app: Some(false),
                ..Default::default()
            };
            assert!(fields.is_set(FieldName::UsesBudgetApp));
        }

        #[test]
        fn new_field_set_has_nothing_set() {
            let fields = RegistrationFields::new();
            for field in FieldName::ORDER {
                assert!(!fields.is_set(field));
            }
        }
    }

    mod merge {
        use super::*;

        #[test]
        fn fills_unset_fields() {
            let updates = FieldUpdates {
                name: Some("Ada".to_string()),
                gender: Some(Gender::Female),
                ..Default::default()
            };

            let merged = RegistrationFields::new().merge(&updates);

            assert_eq!(merged.name.as_deref(), Some("Ada"));
            assert_eq!(merged.gender, Some(Gender::Female));
            assert_eq!(merged.date_of_birth, None);
        }

        #[test]
        fn never_overwrites_set_fields() {
            let fields = RegistrationFields {
                name: Some("Ada".to_string()),
                uses_budget_app: Some(true),
                ..Default::default()
            };
            let updates = FieldUpdates {
                name: Some("Grace".to_string()),
                uses_budget_app: Some(false),
                ..Default::default()
            };

            let merged = fields.merge(&updates);

            assert_eq!(merged.name.as_deref(), Some("Ada"));
            assert_eq!(merged.uses_budget_app, Some(true));
        }

        #[test]
        fn replaces_empty_string_values() {
            let fields = RegistrationFields {
                name: Some(String::new()),
                ..Default::default()
            };
            let updates = FieldUpdates {
                name: Some("Ada".to_string()),
                ..Default::default()
            };

            assert_eq!(fields.merge(&updates).name.as_deref(), Some("Ada"));
        }

        #[test]
        fn clear_flag_forces_budget_app_name_absent() {
            let fields = RegistrationFields {
                budget_app_name: Some("YNAB".to_string()),
                ..Default::default()
            };
            let updates = FieldUpdates {
                uses_budget_app: Some(false),
                clear_budget_app_name: true,
                ..Default::default()
            };

            let merged = fields.merge(&updates);

            assert_eq!(merged.uses_budget_app, Some(false));
            assert_eq!(merged.budget_app_name, None);
        }

        #[test]
        fn leaves_original_untouched() {
            let fields = RegistrationFields::new();
            let updates = FieldUpdates {
                name: Some("Ada".to_string()),
                ..Default::default()
            };

            let _ = fields.merge(&updates);

            assert_eq!(fields, RegistrationFields::new());
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn serializes_camel_case_with_null_budget_app_name() {
            let fields = RegistrationFields {
                name: Some("Ada".to_string()),
                date_of_birth: Some("1990-05-10".to_string()),
                gender: Some(Gender::Male),
                uses_budget_app: Some(false),
                budget_app_name: None,
            };

            let json = serde_json::to_value(&fields).unwrap();

            assert_eq!(
                json,
                serde_json::json!({
                    "name": "Ada",
                    "dateOfBirth": "1990-05-10",
                    "gender": "male",
                    "usesBudgetApp": false,
                    "budgetAppName": null
                })
            );
        }

        #[test]
        fn field_names_use_wire_spelling() {
            assert_eq!(
                serde_json::to_string(&FieldName::DateOfBirth).unwrap(),
                "\"dateOfBirth\""
            );
            assert_eq!(FieldName::BudgetAppName.to_string(), "budgetAppName");
        }
    }

    #[test]
    fn proposed_fields_lists_only_present_values() {
        let updates = FieldUpdates {
            gender: Some(Gender::Other),
            uses_budget_app: Some(false),
            clear_budget_app_name: true,
            ..Default::default()
        };

        assert_eq!(
            updates.proposed_fields(),
            vec![FieldName::Gender, FieldName::UsesBudgetApp]
        );
        assert!(!updates.is_empty());
        assert!(FieldUpdates::default().is_empty());
    }
}
