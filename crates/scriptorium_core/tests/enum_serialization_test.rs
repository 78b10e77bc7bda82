//! Canonical enum serialization: serde and strum must agree on the
//! snake_case wire form, and every value must round-trip through it.

use scriptorium_core::{
    CharacterRole, ClicheKind, ConflictKind, DialogDensity, EmotionBeat, EpisodeStatus,
    Importance, IssueCategory, ProjectKind, ProjectStatus, SceneKind, Severity,
};

fn assert_canonical<T>(value: T, expected: &str)
where
    T: serde::Serialize
        + serde::de::DeserializeOwned
        + std::fmt::Display
        + std::str::FromStr
        + PartialEq
        + std::fmt::Debug,
    <T as std::str::FromStr>::Err: std::fmt::Debug,
{
    // serde form
    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(json, format!("\"{}\"", expected));
    let back: T = serde_json::from_str(&json).unwrap();
    assert_eq!(back, value);

    // strum form matches serde's
    assert_eq!(value.to_string(), expected);
    let parsed: T = expected.parse().unwrap();
    assert_eq!(parsed, value);
}

#[test]
fn snake_case_is_the_single_canonical_form() {
    assert_canonical(ProjectKind::TalkShow, "talk_show");
    assert_canonical(ProjectKind::WebDrama, "web_drama");
    assert_canonical(ProjectStatus::InProgress, "in_progress");
    assert_canonical(EpisodeStatus::FirstEdit, "first_edit");
    assert_canonical(SceneKind::NewsSummary, "news_summary");
    assert_canonical(ConflictKind::Ideological, "ideological");
    assert_canonical(ConflictKind::None, "none");
    assert_canonical(EmotionBeat::Climax, "climax");
    assert_canonical(DialogDensity::Medium, "medium");
    assert_canonical(CharacterRole::CoHost, "co_host");
    assert_canonical(ClicheKind::Transition, "transition");
    assert_canonical(IssueCategory::Structure, "structure");
    assert_canonical(Severity::Error, "error");
    assert_canonical(Importance::High, "high");
}

#[test]
fn unknown_values_are_rejected_not_coerced() {
    assert!(serde_json::from_str::<SceneKind>("\"musical\"").is_err());
    assert!("musical".parse::<SceneKind>().is_err());
    // Case matters: the canonical form is lowercase.
    assert!("Dialogue".parse::<SceneKind>().is_err());
}
