//! Onboarding: collecting the profile draft and submitting it.

use super::engine::Turn;
use super::{replies, DialogueEngine};
use crate::domain::dialogue::{DialogueState, Output};
use crate::domain::profile::{parse_age, Gender};
use crate::ports::UpstreamError;

/// Applies a free-text answer to the current onboarding question.
pub(super) fn answer(turn: &mut Turn, text: &str) -> Output {
    let state = turn.session.state();
    let text = text.trim();

    match state {
        DialogueState::AskName | DialogueState::AskCity if text.is_empty() => {
            replies::question(state)
        }
        DialogueState::AskName => {
            turn.session.draft_mut().name = Some(text.to_string());
            ask_next(turn)
        }
        DialogueState::AskAge => match parse_age(text) {
            Ok(age) => {
                turn.session.draft_mut().age = Some(age);
                ask_next(turn)
            }
            Err(err) => {
                tracing::debug!(%err, "Rejected age");
                replies::invalid_age()
            }
        },
        DialogueState::AskCity => {
            turn.session.draft_mut().city = Some(text.to_string());
            ask_next(turn)
        }
        DialogueState::AskGender => match text.parse::<Gender>() {
            Ok(gender) => accept_gender(turn, gender),
            Err(_) => replies::invalid_gender(),
        },
        DialogueState::AskDescription => {
            turn.session.draft_mut().description = Some(text.to_string());
            ask_next(turn)
        }
        DialogueState::AskPhoto => replies::photo_required(),
        DialogueState::Idle | DialogueState::Menu | DialogueState::Browsing => replies::menu(),
    }
}

pub(super) fn accept_gender(turn: &mut Turn, gender: Gender) -> Output {
    turn.session.draft_mut().gender = Some(gender);
    ask_next(turn)
}

fn ask_next(turn: &mut Turn) -> Output {
    match turn.session.state().next_question() {
        Some(next) => {
            turn.advance(next);
            replies::question(next)
        }
        None => replies::question(turn.session.state()),
    }
}

impl DialogueEngine {
    /// Writes the draft as the caller's profile, then attaches the photo.
    ///
    /// The profile is created when the caller has none and updated otherwise.
    /// A failed photo upload is logged and does not block the move to Menu.
    pub(super) async fn submit_profile(
        &self,
        turn: &mut Turn,
        photo: Vec<u8>,
    ) -> Result<Output, UpstreamError> {
        if photo.is_empty() {
            return Ok(replies::empty_photo());
        }

        let fields = match turn.session.draft().complete() {
            Ok(fields) => fields,
            Err(err) => {
                tracing::debug!(%err, "Draft incomplete at submission, restarting onboarding");
                turn.session.restart_onboarding();
                return Ok(replies::draft_incomplete());
            }
        };

        let identity = turn.session.identity();
        let saved = match turn.call(self.profiles.get_by_identity(identity)).await {
            Ok(existing) => {
                turn.call(self.profiles.update(existing.service_id, &fields))
                    .await?
            }
            Err(err) if err.is_not_found() => {
                turn.call(self.profiles.create(identity, &fields)).await?
            }
            Err(err) => return Err(err),
        };
        tracing::info!(service_id = %saved.service_id, "Profile saved");

        if let Err(err) = turn
            .call(self.profiles.attach_photo(saved.service_id, photo))
            .await
        {
            tracing::warn!(error = %err, service_id = %saved.service_id, "Photo upload failed, profile kept without it");
            turn.note(err);
        }

        turn.session.clear_draft();
        turn.advance(DialogueState::Menu);
        Ok(replies::profile_saved())
    }
}
