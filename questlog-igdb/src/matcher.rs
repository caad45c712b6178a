use std::collections::HashSet;

use crate::types::SearchCandidate;

/// Scores above this are trusted; at or below, the service's first result is used.
pub const MATCH_THRESHOLD: f64 = 0.6;

/// Score given when one name contains the other.
pub const CONTAINMENT_SCORE: f64 = 0.8;

/// The candidate chosen for a catalog entry and how well it matched.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub candidate: &'a SearchCandidate,
    /// Similarity in [0, 1]; 1.0 for an exact name match
    pub score: f64,
}

/// Pick the best candidate for `search_name`.
///
/// 1. An exact case-insensitive, trimmed name match wins outright.
/// 2. Otherwise every candidate is scored with [`similarity`] and the best one
///    is taken if it scores above [`MATCH_THRESHOLD`].
/// 3. Failing that, the first candidate in service order is returned
///    regardless of score.
///
/// Returns `None` only for an empty candidate list.
pub fn best_match<'a>(
    search_name: &str,
    candidates: &'a [SearchCandidate],
) -> Option<MatchResult<'a>> {
    let wanted = search_name.trim().to_lowercase();

    if let Some(exact) = candidates
        .iter()
        .filter(|c| !c.name.trim().is_empty())
        .find(|c| c.name.trim().to_lowercase() == wanted)
    {
        return Some(MatchResult {
            candidate: exact,
            score: 1.0,
        });
    }

    let scores: Vec<f64> = candidates
        .iter()
        .map(|c| similarity(search_name, &c.name))
        .collect();
    let index = choose(&scores)?;

    Some(MatchResult {
        candidate: &candidates[index],
        score: scores[index],
    })
}

/// Index of the winning score: the highest one when it clears the threshold,
/// else the first position.
fn choose(scores: &[f64]) -> Option<usize> {
    if scores.is_empty() {
        return None;
    }

    let mut ranked: Vec<usize> = (0..scores.len()).collect();
    ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let top = ranked[0];
    if scores[top] > MATCH_THRESHOLD {
        Some(top)
    } else {
        Some(0)
    }
}

/// Symmetric name similarity in [0, 1].
///
/// Containment in either direction scores [`CONTAINMENT_SCORE`]; otherwise the
/// Jaccard overlap of lowercase whitespace-separated words. Blank names score 0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    // A blank name would be contained in everything.
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    if a.contains(&b) || b.contains(&a) {
        return CONTAINMENT_SCORE;
    }

    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();

    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    let common = words_a.intersection(&words_b).count();

    common as f64 / union as f64
}

#[cfg(test)]
#[path = "tests/matcher_tests.rs"]
mod tests;
