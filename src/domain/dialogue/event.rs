//! Inbound events and the command vocabularies parsed from them.

use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;
use crate::domain::profile::Gender;

/// One inbound event from the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Start,
    Text(String),
    Photo(Vec<u8>),
    Action(Action),
}

/// Timeout category of an inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    /// Start and button actions: short profile/pairing lookups.
    Lookup,
    /// Free text: may trigger browsing.
    Text,
    /// Photo: profile write plus upload.
    Photo,
}

impl InboundEvent {
    pub fn category(&self) -> EventCategory {
        match self {
            InboundEvent::Start | InboundEvent::Action(_) => EventCategory::Lookup,
            InboundEvent::Text(_) => EventCategory::Text,
            InboundEvent::Photo(_) => EventCategory::Photo,
        }
    }

    /// Short name for logs; never includes user content.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::Start => "start",
            InboundEvent::Text(_) => "text",
            InboundEvent::Photo(_) => "photo",
            InboundEvent::Action(_) => "action",
        }
    }
}

/// Button action token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Like,
    Dislike,
    Sleep,
    GenderMale,
    GenderFemale,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Like,
        Action::Dislike,
        Action::Sleep,
        Action::GenderMale,
        Action::GenderFemale,
    ];

    /// Wire token used by the gateway.
    pub fn token(&self) -> &'static str {
        match self {
            Action::Like => "like",
            Action::Dislike => "dislike",
            Action::Sleep => "sleep",
            Action::GenderMale => "gender_male",
            Action::GenderFemale => "gender_female",
        }
    }

    /// The gender carried by a gender button.
    pub fn gender(&self) -> Option<Gender> {
        match self {
            Action::GenderMale => Some(Gender::Male),
            Action::GenderFemale => Some(Gender::Female),
            _ => None,
        }
    }

    /// Maps a browse keyboard label sent back as plain text.
    pub fn from_browse_label(text: &str) -> Option<Action> {
        match text.trim() {
            "❤️" | "❤" => Some(Action::Like),
            "👎" => Some(Action::Dislike),
            "💤" => Some(Action::Sleep),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Action {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.token() == s.trim())
            .ok_or_else(|| ValidationError::invalid_format("action", format!("unknown token '{}'", s)))
    }
}

/// Menu selection, parsed once at the menu boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// "1" - browse candidates.
    Browse,
    /// "2" - show own profile.
    ViewProfile,
    /// "3" - edit profile (restart onboarding).
    Edit,
}

impl MenuCommand {
    pub fn parse(text: &str) -> Option<MenuCommand> {
        match text.trim() {
            "1" => Some(MenuCommand::Browse),
            "2" => Some(MenuCommand::ViewProfile),
            "3" => Some(MenuCommand::Edit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod action {
        use super::*;

        #[test]
        fn tokens_roundtrip() {
            for action in Action::ALL {
                assert_eq!(action.token().parse::<Action>().unwrap(), action);
            }
        }

        #[test]
        fn unknown_token_is_rejected() {
            assert!("superlike".parse::<Action>().is_err());
        }

        #[test]
        fn only_gender_buttons_carry_gender() {
            assert_eq!(Action::GenderMale.gender(), Some(Gender::Male));
            assert_eq!(Action::GenderFemale.gender(), Some(Gender::Female));
            assert_eq!(Action::Like.gender(), None);
        }

        #[test]
        fn browse_labels_map_to_actions() {
            assert_eq!(Action::from_browse_label("❤️"), Some(Action::Like));
            assert_eq!(Action::from_browse_label("👎"), Some(Action::Dislike));
            assert_eq!(Action::from_browse_label("💤"), Some(Action::Sleep));
            assert_eq!(Action::from_browse_label("1"), None);
        }
    }

    mod menu_command {
        use super::*;

        #[test]
        fn parses_three_entries() {
            assert_eq!(MenuCommand::parse("1"), Some(MenuCommand::Browse));
            assert_eq!(MenuCommand::parse("2"), Some(MenuCommand::ViewProfile));
            assert_eq!(MenuCommand::parse(" 3 "), Some(MenuCommand::Edit));
        }

        #[test]
        fn anything_else_is_none() {
            for input in ["0", "4", "one", "", "12"] {
                assert_eq!(MenuCommand::parse(input), None, "{:?}", input);
            }
        }
    }

    #[test]
    fn categories_follow_event_kind() {
        assert_eq!(InboundEvent::Start.category(), EventCategory::Lookup);
        assert_eq!(InboundEvent::Action(Action::Like).category(), EventCategory::Lookup);
        assert_eq!(InboundEvent::Text("hi".into()).category(), EventCategory::Text);
        assert_eq!(InboundEvent::Photo(vec![1]).category(), EventCategory::Photo);
    }
}
