//! Step sequencing: which field to ask for next.

use super::fields::{FieldName, RegistrationFields};

/// Returns the first applicable field that is still unset.
///
/// `budgetAppName` only applies while the user has not answered "no" to
/// using a budget app. `None` means the record is complete.
pub fn next_field(fields: &RegistrationFields) -> Option<FieldName> {
    FieldName::ORDER
        .into_iter()
        .filter(|field| is_applicable(*field, fields))
        .find(|field| !fields.is_set(*field))
}

/// Fields that must be set for the record to be complete.
pub fn applicable_fields(fields: &RegistrationFields) -> Vec<FieldName> {
    FieldName::ORDER
        .into_iter()
        .filter(|field| is_applicable(*field, fields))
        .collect()
}

fn is_applicable(field: FieldName, fields: &RegistrationFields) -> bool {
    match field {
        FieldName::BudgetAppName => fields.uses_budget_app != Some(false),
        _ => true,
    }
}
