//! Dialogue state machine.
//!
//! Onboarding is a linear chain of questions ending in the menu; the menu and
//! browsing are mutually reachable. A start event (or a profile that vanished
//! upstream) can pull the user back to either end from anywhere, so the
//! machine has no terminal state.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Current node of a user's conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    /// Session created, no start event handled yet.
    #[default]
    Idle,
    AskName,
    AskAge,
    AskCity,
    AskGender,
    AskDescription,
    AskPhoto,
    /// Registered user choosing between browse / view / edit.
    Menu,
    /// A candidate card is (or was just) on screen.
    Browsing,
}

impl DialogueState {
    /// Returns true while a profile draft is being collected.
    pub fn is_onboarding(&self) -> bool {
        matches!(
            self,
            Self::AskName
                | Self::AskAge
                | Self::AskCity
                | Self::AskGender
                | Self::AskDescription
                | Self::AskPhoto
        )
    }

    /// The next question in the onboarding chain.
    pub fn next_question(&self) -> Option<Self> {
        use DialogueState::*;
        match self {
            AskName => Some(AskAge),
            AskAge => Some(AskCity),
            AskCity => Some(AskGender),
            AskGender => Some(AskDescription),
            AskDescription => Some(AskPhoto),
            _ => None,
        }
    }
}

impl StateMachine for DialogueState {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogueState::*;
        let forward: &[DialogueState] = match self {
            Idle => &[],
            AskName => &[AskAge],
            AskAge => &[AskCity],
            AskCity => &[AskGender],
            AskGender => &[AskDescription],
            AskDescription => &[AskPhoto],
            AskPhoto => &[],
            Menu => &[Browsing],
            Browsing => &[],
        };

        // Restart and "profile exists" routing are reachable from every node.
        let mut targets = forward.to_vec();
        for always in [AskName, Menu] {
            if always != *self && !targets.contains(&always) {
                targets.push(always);
            }
        }
        targets
    }
}
