//! Profile read model and the gender vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Identity, ServiceId, ValidationError};

/// One of the two canonical gender labels the dialogue accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Guy")]
    Male,
    #[serde(rename = "Girl")]
    Female,
}

impl Gender {
    /// Canonical label, also used as the button text.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Guy",
            Gender::Female => "Girl",
        }
    }

    /// The gender a caller of this gender browses.
    pub fn opposite(&self) -> Gender {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    /// Accepts exactly one of the two canonical labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Guy" => Ok(Gender::Male),
            "Girl" => Ok(Gender::Female),
            other => Err(ValidationError::invalid_format(
                "gender",
                format!("expected 'Guy' or 'Girl', got '{}'", other),
            )),
        }
    }
}

/// A registered profile as returned by the Profile Service.
///
/// Treated as an immutable read-through value; the engine re-fetches it
/// on every flow instead of caching it in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub service_id: ServiceId,
    pub identity: Identity,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub location: String,
    #[serde(default)]
    pub description: String,
    /// Storage handle or URL of the profile photo, as stored upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub visible: bool,
}

impl Profile {
    /// Caption shown on a candidate card and on the own-profile view.
    pub fn caption(&self) -> String {
        format!(
            "{}, {}, {}\n{}",
            self.name, self.age, self.location, self.description
        )
    }

    /// Returns true when a photo has been attached.
    pub fn has_photo(&self) -> bool {
        self.photo.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Builds a visible profile with sensible defaults for tests.
    pub fn profile(service_id: i64, identity: i64, gender: Gender, age: u32) -> Profile {
        Profile {
            service_id: ServiceId::new(service_id),
            identity: Identity::new(identity),
            name: format!("user{}", service_id),
            age,
            gender,
            location: "Kazan".to_string(),
            description: "likes hiking".to_string(),
            photo: None,
            visible: true,
        }
    }
}
