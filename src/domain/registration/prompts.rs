//! Question text and closing-message templates.

use super::fields::{FieldName, RegistrationFields};

const NOT_PROVIDED: &str = "not provided";

/// Fixed question for a field.
///
/// The date-of-birth question greets the user by name once it is known.
pub fn prompt_for(field: FieldName, fields: &RegistrationFields) -> String {
    match field {
        FieldName::Name => "Hi! What's your name?".to_string(),
        FieldName::DateOfBirth => match fields.name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => format!(
                "Nice to meet you, {}! What's your date of birth? (YYYY-MM-DD)",
                name
            ),
            None => "What's your date of birth? (YYYY-MM-DD)".to_string(),
        },
        FieldName::Gender => "What's your gender? (male, female, or other)".to_string(),
        FieldName::UsesBudgetApp => "Do you currently use a budgeting app? (yes or no)".to_string(),
        FieldName::BudgetAppName => {
            if fields.uses_budget_app() {
                "Great! Which budgeting app do you use?".to_string()
            } else {
                "What's the name of the budgeting app?".to_string()
            }
        }
    }
}

/// Instruction asking the text generator to phrase a question naturally.
pub fn rephrase_instruction(field: FieldName, fields: &RegistrationFields) -> String {
    format!(
        "You are a friendly registration assistant. Rephrase the following question \
         in one short, warm sentence without changing what is asked. \
         Reply with the question only.\n\nQuestion: {}",
        prompt_for(field, fields)
    )
}

/// Instruction asking the text generator for a closing welcome message.
///
/// Unknown values are spelled out as "not provided".
pub fn closing_instruction(fields: &RegistrationFields) -> String {
    let uses_app = match fields.uses_budget_app {
        Some(true) => "yes",
        Some(false) => "no",
        None => NOT_PROVIDED,
    };

    format!(
        "Write a short, friendly welcome message (two sentences at most) for a user who \
         just finished registering.\n\
         Name: {}\n\
         Date of birth: {}\n\
         Gender: {}\n\
         Uses a budgeting app: {}\n\
         Budgeting app: {}",
        text_or_not_provided(fields.name.as_deref()),
        text_or_not_provided(fields.date_of_birth.as_deref()),
        fields.gender.map(|g| g.as_str()).unwrap_or(NOT_PROVIDED),
        uses_app,
        text_or_not_provided(fields.budget_app_name.as_deref()),
    )
}

/// Deterministic closing message used when generation fails.
///
/// Unknown values are left out entirely.
pub fn fallback_closing_message(fields: &RegistrationFields) -> String {
    let mut message = String::from("Registration complete");

    if let Some(name) = non_empty(fields.name.as_deref()) {
        message.push_str(" for ");
        message.push_str(name);
    }
    if let Some(dob) = non_empty(fields.date_of_birth.as_deref()) {
        message.push_str(", born ");
        message.push_str(dob);
    }
    if let Some(gender) = fields.gender {
        message.push_str(", gender: ");
        message.push_str(gender.as_str());
    }
    match (fields.uses_budget_app, non_empty(fields.budget_app_name.as_deref())) {
        (Some(true), Some(app)) => {
            message.push_str(", budget app: ");
            message.push_str(app);
        }
        (Some(false), _) => message.push_str(", no budget app"),
        _ => {}
    }

    message.push_str(". Welcome!");
    message
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn text_or_not_provided(value: Option<&str>) -> &str {
    non_empty(value).unwrap_or(NOT_PROVIDED)
}
