//! Suggestion ranking.
//!
//! Ranks suggestions to present the most useful options first.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::domain::{RouteId, StopId, SuggestedRoute, SuggestionKind};

/// Preference bands, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tier {
    /// Direct ride with an ETA.
    Direct,
    /// One change, with an ETA.
    Connecting,
    /// No usable ETA.
    Unestimated,
}

fn tier(suggestion: &SuggestedRoute) -> Tier {
    if !suggestion.total_eta().is_available() {
        return Tier::Unestimated;
    }
    match suggestion.kind() {
        SuggestionKind::Direct => Tier::Direct,
        SuggestionKind::Connecting => Tier::Connecting,
    }
}

/// Rank suggestions by preference and keep the best `max_results`.
///
/// Suggestions are ranked by:
/// 1. Direct rides with an ETA
/// 2. Connecting rides with an ETA
/// 3. Anything without an ETA
///
/// and within each band by ascending total ETA. The sort is stable, so
/// equal candidates keep their discovery order. Duplicates are removed
/// and the list is capped only after ranking.
pub fn rank_suggestions(
    mut suggestions: Vec<SuggestedRoute>,
    max_results: usize,
) -> Vec<SuggestedRoute> {
    suggestions.sort_by(compare);

    let mut suggestions = deduplicate(suggestions);
    suggestions.truncate(max_results);
    suggestions
}

fn compare(a: &SuggestedRoute, b: &SuggestedRoute) -> Ordering {
    // Primary: preference band
    let tier_cmp = tier(a).cmp(&tier(b));
    if tier_cmp != Ordering::Equal {
        return tier_cmp;
    }

    // Secondary: sooner arrival
    a.total_eta().minutes().cmp(&b.total_eta().minutes())
}

/// Identity of a suggestion: the (route, boarding stop, alighting stop) of
/// each leg.
type SuggestionKey = Vec<(RouteId, StopId, StopId)>;

fn key(suggestion: &SuggestedRoute) -> SuggestionKey {
    suggestion
        .legs()
        .iter()
        .map(|leg| {
            (
                leg.route().id.clone(),
                leg.start_stop().id.clone(),
                leg.end_stop().id.clone(),
            )
        })
        .collect()
}

/// Remove suggestions that ride the same routes between the same stops.
///
/// Keeps the first occurrence, so run it on an already-ranked list to
/// keep the best of each group.
pub fn deduplicate(suggestions: Vec<SuggestedRoute>) -> Vec<SuggestedRoute> {
    if suggestions.len() <= 1 {
        return suggestions;
    }

    let mut seen: HashSet<SuggestionKey> = HashSet::with_capacity(suggestions.len());
    suggestions
        .into_iter()
        .filter(|s| seen.insert(key(s)))
        .collect()
}
