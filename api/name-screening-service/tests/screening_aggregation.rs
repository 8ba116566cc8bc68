use chrono::{TimeZone, Utc};
use name_screening_service::module::name_screening::model::{
    BestMatchSummary, EntryId, MatchType, ScreeningSubject, ScreeningViews, WatchlistEntry,
    classify,
};
use name_screening_service::service::screening_service::{
    names_to_screen, rank_candidates, round_score, screen_at,
};
use serde_json::json;

fn watchlist(value: serde_json::Value) -> Vec<WatchlistEntry> {
    serde_json::from_value(value).expect("watchlist fixture")
}

fn subject(full_name: Option<&str>, aliases: &[&str]) -> ScreeningSubject {
    ScreeningSubject {
        request_id: None,
        full_name: full_name.map(str::to_string),
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
        country: None,
    }
}

fn run(subject: &ScreeningSubject, entries: &[WatchlistEntry]) -> ScreeningViews {
    let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    screen_at(subject, "req-fallback", entries, at)
}

#[test]
fn reordered_full_name_is_an_exact_match() {
    let entries = watchlist(json!([{ "id": 1, "name": "John Smith" }]));
    let views = run(&subject(Some("Smith John"), &[]), &entries);

    assert_eq!(views.consolidated.screening_result, MatchType::ExactMatch);
    assert_eq!(
        views.consolidated.best_match,
        Some(BestMatchSummary {
            id: EntryId::from(1_i64),
            name: Some("John Smith".to_string()),
            score: 1.0,
        })
    );
    assert_eq!(views.consolidated.request_id, "req-fallback");
    assert_eq!(views.consolidated.timestamp, "2026-01-02T03:04:05.000Z");
}

#[test]
fn near_spelling_is_a_possible_match() {
    let entries = watchlist(json!([{ "id": 1, "name": "Jon Smyth" }]));
    let views = run(&subject(Some("John Smith"), &[]), &entries);

    let best = &views.detailed.best_match;
    assert!(best.score > 0.75 && best.score < 0.90);
    assert_eq!(best.match_type, MatchType::PossibleMatch);
    assert_eq!(views.consolidated.screening_result, MatchType::PossibleMatch);
}

#[test]
fn empty_watchlist_yields_no_match_and_null_best() {
    let views = run(&subject(Some("Anyone"), &[]), &[]);

    assert_eq!(views.consolidated.best_match, None);
    assert_eq!(views.consolidated.screening_result, MatchType::NoMatch);
    assert!(views.detailed.top3_matches.is_empty());
    assert_eq!(views.detailed.best_match.id, None);
    assert_eq!(views.detailed.best_match.name, None);
    assert_eq!(views.detailed.best_match.score, 0.0);
}

#[test]
fn subject_without_names_screens_a_single_empty_name() {
    let empty = subject(None, &[]);
    assert_eq!(names_to_screen(&empty), vec![String::new()]);

    let entries = watchlist(json!([{ "id": 1, "name": "John Smith" }]));
    let views = run(&empty, &entries);

    assert_eq!(views.detailed.raw_name, "");
    assert_eq!(views.detailed.all_names_screened.len(), 1);
    assert_eq!(views.detailed.all_names_screened[0].normalized, "");
    assert_eq!(views.detailed.top3_matches[0].score, 0.0);
    assert_eq!(views.detailed.top3_matches[0].matched_input_name, None);

    let detailed = serde_json::to_value(&views.detailed).expect("serialize");
    assert!(detailed["top3Matches"][0]["matchedInputName"].is_null());
    assert_eq!(views.consolidated.screening_result, MatchType::NoMatch);
}

#[test]
fn names_to_screen_puts_full_name_first_and_drops_empty_aliases() {
    let s = subject(Some("Ann Lee"), &["", "Anna Li", ""]);
    assert_eq!(names_to_screen(&s), vec!["Ann Lee".to_string(), "Anna Li".to_string()]);

    let aliases_only = subject(Some(""), &["", "A. Person"]);
    assert_eq!(names_to_screen(&aliases_only), vec!["A. Person".to_string()]);
}

#[test]
fn best_alias_score_wins_per_candidate() {
    let entries = watchlist(json!([{ "id": 2, "name": "Anna Lee" }]));

    for aliases in [["Ann Lee", "Anna Li"], ["Anna Li", "Ann Lee"]] {
        let names = names_to_screen(&subject(None, &aliases));
        let ranked = rank_candidates(&names, &entries);

        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].score - 0.875).abs() < 1e-9);
        assert_eq!(ranked[0].matched_input_name, "Ann Lee");
    }

    let views = run(&subject(None, &["Anna Li", "Ann Lee"]), &entries);
    let top = &views.detailed.top3_matches[0];
    assert_eq!(top.score, 0.88);
    assert_eq!(top.matched_input_name.as_deref(), Some("Ann Lee"));
    assert_eq!(top.match_type, MatchType::PossibleMatch);
    assert_eq!(views.detailed.raw_name, "Anna Li");
}

#[test]
fn equal_scores_keep_the_first_name_that_reached_them() {
    let entries = watchlist(json!([{ "id": 1, "name": "John Smith" }]));
    let names = names_to_screen(&subject(Some("John Smith"), &["Smith John"]));
    let ranked = rank_candidates(&names, &entries);

    assert_eq!(ranked[0].matched_input_name, "John Smith");
}

#[test]
fn duplicate_ids_collapse_into_one_candidate() {
    let entries = watchlist(json!([
        { "id": "wl-7", "name": "Jane Doe" },
        { "id": "wl-7", "name": "John Smith" },
        { "id": "wl-8", "name": "Someone Else" }
    ]));
    let names = names_to_screen(&subject(Some("John Smith"), &[]));
    let ranked = rank_candidates(&names, &entries);

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].entry.id, EntryId::Text("wl-7".to_string()));
    assert_eq!(ranked[0].score, 1.0);
}

#[test]
fn top_three_are_ranked_and_classified_individually() {
    let entries = watchlist(json!([
        { "id": 1, "name": "Alice Brown" },
        { "id": 2, "name": "John Smith" },
        { "id": 3, "name": "Jon Smith" },
        { "id": 4, "name": "Johnny Smithe" },
        { "id": 5, "name": "Zed" }
    ]));
    let views = run(&subject(Some("John Smith"), &[]), &entries);
    let top = &views.detailed.top3_matches;

    let ids = top.iter().map(|m| m.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids, vec![EntryId::from(2_i64), EntryId::from(3_i64), EntryId::from(4_i64)]);
    assert_eq!(top[0].match_type, MatchType::ExactMatch);
    assert_eq!(top[1].score, 0.9);
    assert_eq!(top[1].match_type, MatchType::ExactMatch);
    assert_eq!(top[2].score, 0.77);
    assert_eq!(top[2].match_type, MatchType::PossibleMatch);
}

#[test]
fn scores_rounding_into_a_band_take_that_band_but_rank_by_raw_score() {
    // 26/29 is about 0.8966 and presents as 0.9; 27/30 is exactly 0.9.
    let entries = watchlist(json!([
        { "id": "rounded-up", "name": "Alexander Maximilian Rothberg" },
        { "id": "exact-band", "name": "Alexander Maximilian Rothbergz" }
    ]));
    let s = subject(Some("Alexander Maximilian Rothbxyz"), &[]);

    let names = names_to_screen(&s);
    let ranked = rank_candidates(&names, &entries);
    assert_eq!(ranked[0].entry.id, EntryId::Text("exact-band".to_string()));
    assert!((ranked[0].score - 0.9).abs() < 1e-9);
    assert!(ranked[1].score < 0.9 && ranked[1].score > 0.895);

    let views = run(&s, &entries);
    let top = &views.detailed.top3_matches;
    assert_eq!(top[0].id, EntryId::Text("exact-band".to_string()));
    assert_eq!(top[1].id, EntryId::Text("rounded-up".to_string()));
    assert_eq!(top[1].score, 0.9);
    assert_eq!(top[1].match_type, MatchType::ExactMatch);
}

#[test]
fn raw_score_just_below_possible_band_rounds_into_it() {
    assert_eq!(round_score(0.746), 0.75);
    assert_eq!(classify(round_score(0.746)), MatchType::PossibleMatch);
    assert_eq!(classify(0.746), MatchType::NoMatch);
}

#[test]
fn any_json_id_shape_is_screened() {
    let entries = watchlist(json!([
        { "id": 1.5, "name": "Jane Doe" },
        { "id": 18446744073709551615u64, "name": "Anna Lee" },
        { "id": null, "name": "John Smith" },
        { "name": "Jon Smith" }
    ]));
    assert_eq!(entries[2].id, EntryId::Null);
    assert_eq!(entries[3].id, EntryId::Null);
    assert_eq!(entries[1].id.to_string(), "18446744073709551615");

    let names = names_to_screen(&subject(Some("John Smith"), &[]));
    let ranked = rank_candidates(&names, &entries);
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].entry.id, EntryId::Null);
    assert_eq!(ranked[0].score, 1.0);

    let views = run(&subject(Some("Jane Doe"), &[]), &entries);
    let best = views.consolidated.best_match.expect("best match");
    assert_eq!(serde_json::to_value(&best.id).expect("serialize"), json!(1.5));
    assert_eq!(views.consolidated.screening_result, MatchType::ExactMatch);
}

#[test]
fn null_id_best_match_is_reported_as_absent() {
    let entries = watchlist(json!([{ "name": "John Smith" }]));
    let views = run(&subject(Some("John Smith"), &[]), &entries);

    assert_eq!(views.consolidated.screening_result, MatchType::ExactMatch);
    assert_eq!(views.consolidated.best_match, None);
    assert_eq!(views.detailed.best_match.id, Some(EntryId::Null));
}

#[test]
fn subject_request_id_overrides_fallback() {
    let mut s = subject(Some("John Smith"), &[]);
    s.request_id = Some("req-from-input".to_string());
    let views = run(&s, &[]);
    assert_eq!(views.consolidated.request_id, "req-from-input");
}

#[test]
fn detailed_view_lists_raw_and_normalized_names() {
    let entries = watchlist(json!([{ "id": 1, "name": "John Smith" }]));
    let views = run(&subject(Some("SMITH, John"), &["J. Smith"]), &entries);

    assert_eq!(views.detailed.raw_name, "SMITH, John");
    assert_eq!(views.detailed.normalized_name, "smith john");
    let normalized = views
        .detailed
        .all_names_screened
        .iter()
        .map(|n| n.normalized.as_str())
        .collect::<Vec<_>>();
    assert_eq!(normalized, vec!["smith john", "j smith"]);
}

#[test]
fn rounding_is_half_up_to_two_decimals() {
    assert_eq!(round_score(0.875), 0.88);
    assert_eq!(round_score(0.7692307692), 0.77);
    assert_eq!(round_score(1.0), 1.0);
    assert_eq!(round_score(0.0), 0.0);
}

#[test]
fn views_serialize_with_camel_case_fields() {
    let entries = watchlist(json!([{ "id": 1, "name": "John Smith", "program": "SDN" }]));
    let views = run(&subject(Some("John Smith"), &[]), &entries);

    let consolidated = serde_json::to_value(&views.consolidated).expect("serialize");
    assert_eq!(consolidated["screeningResult"], "EXACT_MATCH");
    assert_eq!(consolidated["bestMatch"]["id"], 1);
    assert_eq!(consolidated["requestId"], "req-fallback");

    let detailed = serde_json::to_value(&views.detailed).expect("serialize");
    assert_eq!(detailed["top3Matches"][0]["matchedInputName"], "John Smith");
    assert_eq!(detailed["bestMatch"]["matchType"], "EXACT_MATCH");
    assert_eq!(detailed["allNamesScreened"][0]["raw"], "John Smith");
}

#[test]
fn lenient_inputs_treat_non_strings_as_absent() {
    let entries = watchlist(json!([
        { "id": 1, "name": 42, "program": "SDN" },
        { "id": "x-2", "name": null }
    ]));
    assert_eq!(entries[0].name, None);
    assert_eq!(entries[0].extra["program"], "SDN");
    assert_eq!(entries[1].name_str(), "");

    let s: ScreeningSubject = serde_json::from_value(json!({
        "requestId": 77,
        "fullName": 42,
        "aliases": ["Ann Lee", 5, null],
        "country": "GB"
    }))
    .expect("subject");
    assert_eq!(s.request_id.as_deref(), Some("77"));
    assert_eq!(s.full_name, None);
    assert_eq!(s.aliases, vec!["Ann Lee".to_string()]);

    let no_aliases: ScreeningSubject =
        serde_json::from_value(json!({ "aliases": "not-a-list" })).expect("subject");
    assert!(no_aliases.aliases.is_empty());
}
