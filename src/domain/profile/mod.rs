//! Profile module - the profile read model, the onboarding draft and the
//! candidate filter derived from a profile.

mod draft;
mod filter;
pub(crate) mod profile;

pub use draft::{parse_age, ProfileDraft, ProfileFields};
pub use filter::{CandidateFilter, AGE_WINDOW, DEFAULT_CANDIDATE_LIMIT};
pub use profile::{Gender, Profile};
