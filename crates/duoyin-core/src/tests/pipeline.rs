//! Pipeline-level tests: normalization, script filtering, capping.

use super::test_engine;
use crate::resolver::ResolveMode;

fn candidates(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_normalizes_and_drops_empty_candidates() {
    let response = test_engine().process(&candidates(&["好。", "。", "   "]), "zh");
    assert_eq!(response.candidates, ["好"]);
}

#[test]
fn test_empty_input_is_empty_output() {
    let response = test_engine().process(&[], "zh");
    assert!(response.candidates.is_empty());
    assert!(response.augmentation.is_none());
}

#[test]
fn test_all_punctuation_input_is_empty_output() {
    let response = test_engine().process(&candidates(&["。", "..."]), "zh");
    assert!(response.candidates.is_empty());
    assert!(response.augmentation.is_none());
}

#[test]
fn test_filters_stray_transliterations_for_chinese() {
    let response = test_engine().process(&candidates(&["好", "hao no han"]), "zh");
    assert_eq!(response.candidates, ["好"]);
}

#[test]
fn test_mixed_script_candidates_survive_the_filter() {
    let response = test_engine().process(&candidates(&["好k"]), "zh");
    assert_eq!(response.candidates, ["好k"]);
}

#[test]
fn test_filter_wipeout_falls_back_to_top_candidate() {
    let response = test_engine().process(&candidates(&["hello", "world"]), "zh");
    assert_eq!(response.candidates, ["hello"]);
    // The fallback candidate still goes through resolution; "hello" is
    // syllable-shaped, it just has no shard data.
    let resolution = response.augmentation.unwrap();
    assert_eq!(resolution.mode, ResolveMode::SinglePinyin);
    assert!(resolution.homophones.is_empty());
}

#[test]
fn test_no_script_filter_outside_logographic_targets() {
    let response = test_engine().process(&candidates(&["hello"]), "en");
    assert_eq!(response.candidates, ["hello"]);
    assert!(response.augmentation.is_none());
}

#[test]
fn test_japanese_filter_keeps_native_script() {
    let response = test_engine().process(&candidates(&["ramen", "ラーメン"]), "ja");
    assert_eq!(response.candidates, ["ラーメン"]);
    // No resolution modes apply to Japanese.
    assert!(response.augmentation.is_none());
}

#[test]
fn test_korean_filter_keeps_native_script() {
    let response = test_engine().process(&candidates(&["hanguk", "한국"]), "ko");
    assert_eq!(response.candidates, ["한국"]);
}

#[test]
fn test_preserves_provider_rank_order() {
    let response = test_engine().process(&candidates(&["two", "blue", "four"]), "en");
    assert_eq!(response.candidates, ["two", "blue", "four"]);
    // Only the top candidate resolves.
    assert_eq!(response.augmentation.unwrap().input, "two");
}

#[test]
fn test_caps_candidates_at_configured_maximum() {
    let raw = candidates(&["one", "two", "three", "four", "five", "six", "seven"]);
    let response = test_engine().process(&raw, "en");
    assert_eq!(response.candidates, ["one", "two", "three", "four", "five"]);
}

#[test]
fn test_resolution_runs_before_the_cap_but_on_the_top_only() {
    let raw = candidates(&["blue", "two", "three", "four", "five", "six"]);
    let response = test_engine().process(&raw, "en");
    assert_eq!(response.candidates.len(), 5);
    // Top candidate is not a number; nothing else is consulted.
    assert!(response.augmentation.is_none());
}
