//! Onboarding draft - profile fields collected one question at a time.

use serde::{Deserialize, Serialize};

use super::Gender;
use crate::domain::foundation::ValidationError;

/// In-progress, unsaved profile data accumulated during onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub city: Option<String>,
    pub gender: Option<Gender>,
    pub description: Option<String>,
}

impl ProfileDraft {
    /// Resets every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns true when no field has been filled yet.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Validates that every field is present and yields the submission payload.
    pub fn complete(&self) -> Result<ProfileFields, ValidationError> {
        Ok(ProfileFields {
            name: required_text("name", self.name.as_deref())?,
            age: self.age.ok_or_else(|| ValidationError::empty_field("age"))?,
            city: required_text("city", self.city.as_deref())?,
            gender: self.gender.ok_or_else(|| ValidationError::empty_field("gender"))?,
            description: self.description.clone().unwrap_or_default(),
        })
    }
}

fn required_text(field: &str, value: Option<&str>) -> Result<String, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::empty_field(field)),
    }
}

/// Complete set of user-editable profile fields sent on create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub name: String,
    pub age: u32,
    #[serde(rename = "location")]
    pub city: String,
    pub gender: Gender,
    pub description: String,
}

/// Parses an age answer.
///
/// Only a single positive integer token is accepted; "0", "-5", "abc" and
/// "25 years" are all rejected.
pub fn parse_age(text: &str) -> Result<u32, ValidationError> {
    let token = text.trim();
    let value: i64 = token
        .parse()
        .map_err(|_| ValidationError::invalid_format("age", "not an integer"))?;
    if value <= 0 || value > i64::from(i32::MAX) {
        return Err(ValidationError::out_of_range(
            "age",
            1,
            i64::from(i32::MAX),
            value,
        ));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn filled() -> ProfileDraft {
        ProfileDraft {
            name: Some("Ann".to_string()),
            age: Some(22),
            city: Some("Perm".to_string()),
            gender: Some(Gender::Female),
            description: Some("reads a lot".to_string()),
        }
    }

    mod draft {
        use super::*;

        #[test]
        fn default_draft_is_empty() {
            assert!(ProfileDraft::default().is_empty());
        }

        #[test]
        fn clear_resets_all_fields() {
            let mut draft = filled();
            draft.clear();
            assert!(draft.is_empty());
        }

        #[test]
        fn complete_yields_fields() {
            let fields = filled().complete().unwrap();
            assert_eq!(fields.name, "Ann");
            assert_eq!(fields.age, 22);
            assert_eq!(fields.city, "Perm");
            assert_eq!(fields.gender, Gender::Female);
        }

        #[test]
        fn complete_reports_first_missing_field() {
            let mut draft = filled();
            draft.age = None;
            assert_eq!(draft.complete().unwrap_err().field(), "age");
        }

        #[test]
        fn complete_rejects_blank_name() {
            let mut draft = filled();
            draft.name = Some("   ".to_string());
            assert_eq!(draft.complete().unwrap_err().field(), "name");
        }

        #[test]
        fn description_may_be_missing() {
            let mut draft = filled();
            draft.description = None;
            assert_eq!(draft.complete().unwrap().description, "");
        }

        #[test]
        fn fields_serialize_city_as_location() {
            let json = serde_json::to_value(filled().complete().unwrap()).unwrap();
            assert_eq!(json["location"], "Perm");
        }
    }

    mod age {
        use super::*;

        #[test]
        fn accepts_positive_integer() {
            assert_eq!(parse_age("27"), Ok(27));
            assert_eq!(parse_age(" 31 "), Ok(31));
        }

        #[test]
        fn rejects_zero_negative_and_text() {
            for input in ["0", "-5", "abc", "", "25 years", "2.5"] {
                assert!(parse_age(input).is_err(), "accepted {:?}", input);
            }
        }

        proptest! {
            #[test]
            fn any_positive_i32_is_accepted(n in 1i32..=i32::MAX) {
                prop_assert_eq!(parse_age(&n.to_string()), Ok(n as u32));
            }

            #[test]
            fn any_non_positive_is_rejected(n in i64::MIN..=0i64) {
                prop_assert!(parse_age(&n.to_string()).is_err());
            }

            #[test]
            fn alphabetic_tokens_are_rejected(s in "[a-zA-Z]{1,12}") {
                prop_assert!(parse_age(&s).is_err());
            }
        }
    }
}
