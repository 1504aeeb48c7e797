use super::*;
use time::macros::datetime;

// =============================================================================
// SortOrder
// =============================================================================

#[test]
fn sort_order_toggles_both_ways() {
    assert_eq!(SortOrder::Asc.toggled(), SortOrder::Desc);
    assert_eq!(SortOrder::Desc.toggled(), SortOrder::Asc);
}

#[test]
fn sort_order_labels() {
    assert_eq!(SortOrder::Asc.label(), "Lower is better");
    assert_eq!(SortOrder::Desc.label(), "Higher is better");
}

#[test]
fn sort_order_defaults_to_ascending() {
    assert_eq!(SortOrder::default(), SortOrder::Asc);
}

#[test]
fn sort_order_parse_ignores_case() {
    assert_eq!(SortOrder::parse("ASC"), Some(SortOrder::Asc));
    assert_eq!(SortOrder::parse("desc"), Some(SortOrder::Desc));
    assert_eq!(SortOrder::parse("Desc"), Some(SortOrder::Desc));
    assert_eq!(SortOrder::parse("up"), None);
}

#[test]
fn sort_order_wire_format_is_uppercase() {
    assert_eq!(serde_json::to_string(&SortOrder::Desc).unwrap(), "\"DESC\"");
    let parsed: SortOrder = serde_json::from_str("\"ASC\"").unwrap();
    assert_eq!(parsed, SortOrder::Asc);
}

// =============================================================================
// Leaderboard / LeaderboardEntry
// =============================================================================

#[test]
fn leaderboard_deserializes_camel_case() {
    let json = r#"{
        "id": "8e067d2d-6f08-4f93-ad2d-f3ad5ca3c69c",
        "name": "Best times",
        "sort": "ASC",
        "startDatetime": "2022-03-01T10:00:00Z"
    }"#;
    let leaderboard: Leaderboard = serde_json::from_str(json).unwrap();
    assert_eq!(leaderboard.name, "Best times");
    assert_eq!(leaderboard.sort, SortOrder::Asc);
    assert_eq!(leaderboard.start_datetime, datetime!(2022-03-01 10:00 UTC));
}

#[test]
fn leaderboard_serializes_camel_case() {
    let leaderboard = Leaderboard {
        id: Uuid::nil(),
        name: "Scores".into(),
        sort: SortOrder::Desc,
        start_datetime: datetime!(2022-03-01 10:00 UTC),
    };
    let value = serde_json::to_value(&leaderboard).unwrap();
    assert_eq!(value["startDatetime"], "2022-03-01T10:00:00Z");
    assert_eq!(value["sort"], "DESC");
}

#[test]
fn entry_deserializes_camel_case() {
    let json = r#"{
        "id": "00000000-0000-0000-0000-000000000001",
        "leaderboardId": "00000000-0000-0000-0000-000000000002",
        "playerName": "Player 1",
        "score": 12.5,
        "createdAt": "2022-03-02T08:00:00Z"
    }"#;
    let entry: LeaderboardEntry = serde_json::from_str(json).unwrap();
    assert_eq!(entry.player_name, "Player 1");
    assert!((entry.score - 12.5).abs() < f64::EPSILON);
}

// =============================================================================
// Payloads
// =============================================================================

#[test]
fn create_payload_defaults() {
    let payload = CreateLeaderboardPayload::default();
    assert_eq!(payload.name, DEFAULT_LEADERBOARD_NAME);
    assert_eq!(payload.sort, SortOrder::Asc);
}

#[test]
fn update_payload_omits_absent_fields() {
    let value = serde_json::to_value(UpdateLeaderboardPayload::name("Renamed")).unwrap();
    assert_eq!(value, serde_json::json!({ "name": "Renamed" }));
    let value = serde_json::to_value(UpdateLeaderboardPayload::sort(SortOrder::Desc)).unwrap();
    assert_eq!(value, serde_json::json!({ "sort": "DESC" }));
}

#[test]
fn update_payload_applies_present_fields_only() {
    let mut leaderboard = Leaderboard {
        id: Uuid::nil(),
        name: "Old".into(),
        sort: SortOrder::Asc,
        start_datetime: datetime!(2022-03-01 10:00 UTC),
    };
    UpdateLeaderboardPayload::sort(SortOrder::Desc).apply_to(&mut leaderboard);
    assert_eq!(leaderboard.name, "Old");
    assert_eq!(leaderboard.sort, SortOrder::Desc);

    UpdateLeaderboardPayload::name("New").apply_to(&mut leaderboard);
    assert_eq!(leaderboard.name, "New");
    assert_eq!(leaderboard.sort, SortOrder::Desc);
}
