//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Externally-stable handle for a conversational participant.
///
/// Assigned by the chat transport (e.g. a chat or channel id). It is the sole
/// key into the session store and the join key to a profile once
/// registration completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(i64);

impl Identity {
    /// Creates an Identity from a raw transport id.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw transport id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for Identity {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identity {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Identifier the Profile Service assigns to a registered profile.
///
/// Distinct from [`Identity`]; the Pairing Service only speaks in service ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(i64);

impl ServiceId {
    /// Creates a ServiceId from the raw value returned by the Profile Service.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ServiceId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ServiceId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}
