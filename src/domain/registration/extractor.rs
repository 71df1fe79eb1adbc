//! Field extraction from free-text answers.
//!
//! Pattern-based only. Each rule looks for one field in the raw message and
//! proposes a value when that field is still unset. A miss is not an error:
//! the field simply stays unset and gets asked for again.

use once_cell::sync::Lazy;
use regex::Regex;

use super::fields::{FieldName, FieldUpdates, Gender, RegistrationFields};

/// "name is X", "I am X", "I'm X".
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:name is|i am|i'm)\s+([a-z][\w\s'\-]{1,60})")
        .expect("name pattern is valid")
});

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{4})-([0-9]{2})-([0-9]{2})").expect("date pattern is valid")
});

static YES_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:yes|yep|yeah|sure|true)\b").expect("yes pattern is valid")
});

static NO_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:no|nope|nah|false)\b").expect("no pattern is valid")
});

/// Budget app phrasings, most specific first.
static BUDGET_APP_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)\b(?:called|using)\s+([a-z][\w\s'\-]{1,60})")
            .expect("budget app pattern is valid"),
        Regex::new(r"(?i)\b(?:app|application)\s+([a-z][\w\s'\-]{1,60})")
            .expect("budget app pattern is valid"),
    ]
});

type GenderRule = (fn(&str) -> bool, Gender);

/// Evaluated in order against the lowercased message; first match wins.
const GENDER_RULES: [GenderRule; 3] = [
    (mentions_male, Gender::Male),
    (mentions_female, Gender::Female),
    (mentions_other, Gender::Other),
];

/// "male" that is not the tail of "female".
fn mentions_male(text: &str) -> bool {
    text.match_indices("male")
        .any(|(idx, _)| !text[..idx].ends_with("fe"))
}

fn mentions_female(text: &str) -> bool {
    text.contains("female")
}

fn mentions_other(text: &str) -> bool {
    text.contains("other")
}

/// Extracts registration fields from a single user message.
#[derive(Debug, Clone, Default)]
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Proposes values for every field that is currently unset.
    ///
    /// `current_step` is the field the user was last asked for; it enables
    /// the free-form fallback for `name` and `budgetAppName`, where a bare
    /// answer like "Ada" is taken as the whole value.
    pub fn extract(
        &self,
        fields: &RegistrationFields,
        current_step: FieldName,
        text: &str,
    ) -> FieldUpdates {
        let trimmed = text.trim();
        let mut updates = FieldUpdates::default();

        if !fields.is_set(FieldName::Name) {
            updates.name = extract_name(text).or_else(|| {
                (current_step == FieldName::Name && !trimmed.is_empty())
                    .then(|| trimmed.to_string())
            });
        }

        if !fields.is_set(FieldName::DateOfBirth) {
            updates.date_of_birth = extract_date_of_birth(text);
        }

        if !fields.is_set(FieldName::Gender) {
            updates.gender = extract_gender(text);
        }

        if !fields.is_set(FieldName::UsesBudgetApp) {
            updates.uses_budget_app = extract_yes_no(text);
            if updates.uses_budget_app == Some(false) {
                updates.clear_budget_app_name = true;
            }
        }

        let uses_budget_app = fields.uses_budget_app() || updates.uses_budget_app == Some(true);
        if uses_budget_app && !fields.is_set(FieldName::BudgetAppName) {
            updates.budget_app_name = extract_budget_app_name(text).or_else(|| {
                (current_step == FieldName::BudgetAppName && !trimmed.is_empty())
                    .then(|| trimmed.to_string())
            });
        }

        updates
    }
}

fn extract_name(text: &str) -> Option<String> {
    capture_trimmed(&NAME_PATTERN, text)
}

/// Accepts `YYYY-MM-DD` with month 01-12 and day 01-31.
///
/// Days are not checked against the month, so `1990-02-31` passes.
fn extract_date_of_birth(text: &str) -> Option<String> {
    let caps = DATE_PATTERN.captures(text)?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some(caps[0].to_string())
}

fn extract_gender(text: &str) -> Option<Gender> {
    let lowered = text.to_lowercase();
    GENDER_RULES
        .iter()
        .find(|(matches, _)| matches(&lowered))
        .map(|(_, gender)| *gender)
}

fn extract_yes_no(text: &str) -> Option<bool> {
    if YES_PATTERN.is_match(text) {
        Some(true)
    } else if NO_PATTERN.is_match(text) {
        Some(false)
    } else {
        None
    }
}

fn extract_budget_app_name(text: &str) -> Option<String> {
    BUDGET_APP_PATTERNS
        .iter()
        .find_map(|pattern| capture_trimmed(pattern, text))
}

fn capture_trimmed(pattern: &Regex, text: &str) -> Option<String> {
    let captured = pattern.captures(text)?.get(1)?.as_str().trim();
    (!captured.is_empty()).then(|| captured.to_string())
}
