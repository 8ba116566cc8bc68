use super::name_normalization_service::canonicalize;
use super::similarity_service::name_similarity;
use crate::module::name_screening::model::{
    BestMatchDetail, BestMatchSummary, ConsolidatedView, DetailedView, EntryId, MatchCandidate,
    RankedMatch, ScreenedName, ScreeningSubject, ScreeningViews, WatchlistEntry, classify,
};
use chrono::{DateTime, SecondsFormat, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;

pub const TOP_MATCH_LIMIT: usize = 3;

/// Full name first, then non-empty aliases in order. Falls back to a single
/// empty name so a subject without names still yields one screening row.
pub fn names_to_screen(subject: &ScreeningSubject) -> Vec<String> {
    let mut names = Vec::with_capacity(subject.aliases.len() + 1);
    if let Some(full_name) = subject.full_name.as_deref().filter(|n| !n.is_empty()) {
        names.push(full_name.to_string());
    }
    names.extend(subject.aliases.iter().filter(|a| !a.is_empty()).cloned());
    if names.is_empty() {
        names.push(String::new());
    }
    names
}

/// Scores one name against every entry, best first. Ties keep watchlist order.
pub fn score_against_watchlist<'a>(
    name: &str,
    watchlist: &'a [WatchlistEntry],
) -> Vec<(&'a WatchlistEntry, f64)> {
    let mut scored = watchlist
        .iter()
        .map(|entry| (entry, name_similarity(name, entry.name_str())))
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| descending(a.1, b.1));
    scored
}

/// One candidate per watchlist id holding the highest score any screened name
/// reached, sorted best first on unrounded scores.
pub fn rank_candidates<'a>(
    names: &'a [String],
    watchlist: &'a [WatchlistEntry],
) -> Vec<MatchCandidate<'a>> {
    let mut candidates: Vec<MatchCandidate<'a>> = Vec::new();
    let mut index_by_id: HashMap<&'a EntryId, usize> = HashMap::new();

    for name in names {
        for (entry, score) in score_against_watchlist(name, watchlist) {
            match index_by_id.get(&entry.id) {
                Some(&idx) => {
                    let existing = &mut candidates[idx];
                    if score > existing.score {
                        existing.score = score;
                        existing.matched_input_name = name.as_str();
                    }
                }
                None => {
                    index_by_id.insert(&entry.id, candidates.len());
                    candidates.push(MatchCandidate {
                        entry,
                        score,
                        matched_input_name: name.as_str(),
                    });
                }
            }
        }
    }

    candidates.sort_by(|a, b| descending(a.score, b.score));
    candidates
}

pub fn screen(
    subject: &ScreeningSubject,
    fallback_request_id: &str,
    watchlist: &[WatchlistEntry],
) -> ScreeningViews {
    screen_at(subject, fallback_request_id, watchlist, Utc::now())
}

pub fn screen_at(
    subject: &ScreeningSubject,
    fallback_request_id: &str,
    watchlist: &[WatchlistEntry],
    generated_at: DateTime<Utc>,
) -> ScreeningViews {
    let names = names_to_screen(subject);
    let top_matches = rank_candidates(&names, watchlist)
        .into_iter()
        .take(TOP_MATCH_LIMIT)
        .map(|c| RankedMatch {
            id: c.entry.id.clone(),
            name: c.entry.name.clone(),
            score: round_score(c.score),
            matched_input_name: Some(c.matched_input_name)
                .filter(|n| !n.is_empty())
                .map(str::to_owned),
            match_type: classify(round_score(c.score)),
        })
        .collect::<Vec<_>>();

    let best = match top_matches.first() {
        Some(m) => BestMatchDetail {
            id: Some(m.id.clone()),
            name: m.name.clone(),
            score: m.score,
            match_type: m.match_type,
        },
        None => BestMatchDetail {
            id: None,
            name: None,
            score: 0.0,
            match_type: classify(0.0),
        },
    };

    let raw_name = subject
        .full_name
        .clone()
        .filter(|n| !n.is_empty())
        .or_else(|| names.first().cloned())
        .unwrap_or_default();

    let consolidated = ConsolidatedView {
        request_id: subject
            .request_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| fallback_request_id.to_string()),
        screening_result: best.match_type,
        best_match: best.id.clone().filter(|id| !id.is_null()).map(|id| BestMatchSummary {
            id,
            name: best.name.clone(),
            score: best.score,
        }),
        timestamp: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    let detailed = DetailedView {
        normalized_name: canonicalize(&raw_name),
        raw_name,
        all_names_screened: names
            .iter()
            .map(|n| ScreenedName {
                raw: n.clone(),
                normalized: canonicalize(n),
            })
            .collect(),
        best_match: best,
        top3_matches: top_matches,
    };

    ScreeningViews {
        detailed,
        consolidated,
    }
}

/// Rounds to two decimals for presentation. Ranking never sees this value.
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
