//! Reply texts and the Outputs built from them.

use crate::domain::dialogue::{DialogueState, Output, PhotoRef, ReplySurface};
use crate::domain::profile::Profile;

const MENU: &str = "1. Browse profiles 🚀\n2. My profile 📱\n3. Edit profile ✏️";

/// Fragment prepended to the next card after a mutual like.
pub const MATCH_FRAGMENT: &str = "🎉 It's a match!";

pub fn welcome() -> Output {
    Output::text("Hi! Let's create your profile.\nWhat's your name?")
}

pub fn restart() -> Output {
    Output::text("Let's start from the beginning. What's your name?")
}

pub fn edit_profile() -> Output {
    Output::text("Ok, let's update your profile. What's your name?")
}

pub fn profile_missing() -> Output {
    Output::text("Looks like you don't have a profile yet. Let's create one! What's your name?")
}

pub fn draft_incomplete() -> Output {
    Output::text("Some profile details got lost. Let's start over: what's your name?")
}

/// The question asked on entering an onboarding state.
pub fn question(state: DialogueState) -> Output {
    match state {
        DialogueState::AskName => Output::text("What's your name?"),
        DialogueState::AskAge => Output::text("How old are you?"),
        DialogueState::AskCity => Output::text("Where do you live? Name your city."),
        DialogueState::AskGender => {
            Output::text("Choose your gender:").with_surface(ReplySurface::GenderChoice)
        }
        DialogueState::AskDescription => {
            Output::text("Briefly describe yourself (interests, who you're looking for).")
        }
        DialogueState::AskPhoto => Output::text("Send a photo for your profile (one image)."),
        DialogueState::Menu | DialogueState::Browsing | DialogueState::Idle => menu(),
    }
}

pub fn invalid_age() -> Output {
    Output::text("Age must be a positive number. Please enter a valid age.")
}

pub fn invalid_gender() -> Output {
    Output::text("Please choose with a button: Guy or Girl.").with_surface(ReplySurface::GenderChoice)
}

pub fn photo_required() -> Output {
    Output::text("Please send a photo for your profile.")
}

pub fn empty_photo() -> Output {
    Output::text("That photo is empty. Please send another one.")
}

pub fn photo_not_needed() -> Output {
    Output::text("A photo isn't needed right now. Use the menu.")
}

pub fn action_unavailable() -> Output {
    Output::text("This action isn't available right now. Use the menu.")
}

pub fn menu() -> Output {
    menu_with("Choose an action:")
}

pub fn menu_hint() -> Output {
    menu_with("Pick a menu item: 1 (browse), 2 (my profile), 3 (edit).")
}

pub fn profile_saved() -> Output {
    menu_with("Profile saved! What's next?")
}

pub fn paused() -> Output {
    menu_with("Ok, back to the menu.")
}

pub fn no_candidates() -> Output {
    menu_with("No matching profiles yet. What's next?")
}

pub fn candidates_exhausted() -> Output {
    menu_with("No more profiles. Back to the menu. What's next?")
}

pub fn nothing_to_rate() -> Output {
    menu_with("There is no profile to rate. What's next?")
}

pub fn use_buttons() -> Output {
    Output::text("Use the buttons: ❤️ / 👎 / 💤").with_surface(ReplySurface::BrowseActions)
}

pub fn candidate_unavailable() -> Output {
    Output::text("Couldn't load this profile. Press a button to try the next one…")
        .with_surface(ReplySurface::BrowseActions)
}

pub fn service_unavailable() -> Output {
    Output::text("Service is unavailable. Please try again later.")
}

pub fn candidate_card(profile: &Profile) -> Output {
    Output::text(profile.caption())
        .with_photo(photo_of(profile))
        .with_surface(ReplySurface::BrowseActions)
}

pub fn own_profile(profile: &Profile) -> Output {
    Output::text(format!("Your profile:\n{}", profile.caption()))
        .with_photo(photo_of(profile))
        .with_surface(ReplySurface::Menu)
}

fn menu_with(lead: &str) -> Output {
    Output::text(format!("{}\n{}", lead, MENU)).with_surface(ReplySurface::Menu)
}

fn photo_of(profile: &Profile) -> Option<PhotoRef> {
    profile.photo.as_deref().and_then(PhotoRef::parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::profile::fixtures::profile;
    use crate::domain::profile::Gender;

    #[test]
    fn menu_replies_carry_menu_surface() {
        for out in [menu(), menu_hint(), profile_saved(), paused(), no_candidates()] {
            assert_eq!(out.surface, ReplySurface::Menu);
            assert!(out.text.contains("1. Browse profiles"));
        }
    }

    #[test]
    fn gender_question_offers_gender_buttons() {
        assert_eq!(question(DialogueState::AskGender).surface, ReplySurface::GenderChoice);
        assert_eq!(invalid_gender().surface, ReplySurface::GenderChoice);
    }

    #[test]
    fn candidate_card_shows_caption_and_photo() {
        let mut p = profile(2, 200, Gender::Female, 24);
        p.photo = Some("file_id:AgAD".to_string());

        let out = candidate_card(&p);
        assert_eq!(out.text, p.caption());
        assert_eq!(out.photo, Some(PhotoRef::Handle("AgAD".to_string())));
        assert_eq!(out.surface, ReplySurface::BrowseActions);
    }

    #[test]
    fn own_profile_is_labelled() {
        let p = profile(1, 100, Gender::Male, 25);
        let out = own_profile(&p);
        assert!(out.text.starts_with("Your profile:\n"));
        assert!(out.photo.is_none());
    }
}
