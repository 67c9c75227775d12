//! Candidate selection criteria derived from the caller's own profile.

use std::collections::HashSet;

use super::{Gender, Profile};
use crate::domain::foundation::ServiceId;

/// How far a candidate's age may be from the caller's, in years.
pub const AGE_WINDOW: u32 = 3;

/// Maximum number of candidates returned per browsing session.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 20;

/// Candidate filter value.
///
/// Computed fresh every time browsing starts and never cached: it depends on
/// the caller's current profile and on who the caller liked today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFilter {
    pub caller: ServiceId,
    pub target_gender: Gender,
    pub min_age: u32,
    pub max_age: u32,
    pub location: String,
    pub limit: usize,
    pub exclude: HashSet<ServiceId>,
}

impl CandidateFilter {
    /// Builds the filter for `caller`, excluding everyone already liked today.
    pub fn for_caller(caller: &Profile, liked_today: impl IntoIterator<Item = ServiceId>) -> Self {
        Self {
            caller: caller.service_id,
            target_gender: caller.gender.opposite(),
            min_age: caller.age.saturating_sub(AGE_WINDOW),
            max_age: caller.age.saturating_add(AGE_WINDOW),
            location: caller.location.trim().to_string(),
            limit: DEFAULT_CANDIDATE_LIMIT,
            exclude: liked_today.into_iter().collect(),
        }
    }

    /// Overrides the result cap.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Returns true if `profile` may be offered to the caller.
    pub fn admits(&self, profile: &Profile) -> bool {
        profile.visible
            && profile.service_id != self.caller
            && !self.exclude.contains(&profile.service_id)
            && profile.gender == self.target_gender
            && (self.min_age..=self.max_age).contains(&profile.age)
            && profile.location.trim() == self.location
    }

    /// Applies the filter to a pool, preserving pool order and the result cap.
    pub fn select<'a>(&self, pool: impl IntoIterator<Item = &'a Profile>) -> Vec<&'a Profile> {
        pool.into_iter()
            .filter(|p| self.admits(p))
            .take(self.limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::profile::fixtures::profile;

    fn caller() -> Profile {
        profile(1, 100, Gender::Male, 25)
    }

    #[test]
    fn targets_opposite_gender_and_age_window() {
        let filter = CandidateFilter::for_caller(&caller(), []);
        assert_eq!(filter.target_gender, Gender::Female);
        assert_eq!(filter.min_age, 22);
        assert_eq!(filter.max_age, 28);
        assert_eq!(filter.limit, DEFAULT_CANDIDATE_LIMIT);
    }

    #[test]
    fn age_window_saturates_at_zero() {
        let young = profile(1, 100, Gender::Female, 2);
        let filter = CandidateFilter::for_caller(&young, []);
        assert_eq!(filter.min_age, 0);
    }

    #[test]
    fn admits_matching_candidate() {
        let filter = CandidateFilter::for_caller(&caller(), []);
        assert!(filter.admits(&profile(2, 200, Gender::Female, 28)));
    }

    #[test]
    fn rejects_same_gender_and_out_of_window() {
        let filter = CandidateFilter::for_caller(&caller(), []);
        assert!(!filter.admits(&profile(2, 200, Gender::Male, 25)));
        assert!(!filter.admits(&profile(3, 300, Gender::Female, 29)));
        assert!(!filter.admits(&profile(4, 400, Gender::Female, 21)));
    }

    #[test]
    fn rejects_other_location_and_hidden_profiles() {
        let filter = CandidateFilter::for_caller(&caller(), []);
        let mut elsewhere = profile(2, 200, Gender::Female, 25);
        elsewhere.location = "Omsk".to_string();
        let mut hidden = profile(3, 300, Gender::Female, 25);
        hidden.visible = false;
        assert!(!filter.admits(&elsewhere));
        assert!(!filter.admits(&hidden));
    }

    #[test]
    fn rejects_caller_and_excluded_ids() {
        let me = caller();
        let filter = CandidateFilter::for_caller(&me, [ServiceId::new(2)]);
        assert!(!filter.admits(&me));
        assert!(!filter.admits(&profile(2, 200, Gender::Female, 25)));
    }

    #[test]
    fn select_preserves_order_and_cap() {
        let pool: Vec<Profile> = (2..10)
            .map(|i| profile(i, i * 100, Gender::Female, 25))
            .collect();
        let filter = CandidateFilter::for_caller(&caller(), []).with_limit(3);
        let picked: Vec<i64> = filter
            .select(&pool)
            .into_iter()
            .map(|p| p.service_id.as_i64())
            .collect();
        assert_eq!(picked, vec![2, 3, 4]);
    }
}
