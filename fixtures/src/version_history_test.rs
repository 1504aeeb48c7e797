use super::*;

#[test]
fn versions_belong_to_the_story_project() {
    let versions = versions();
    assert_eq!(versions.len(), 3);
    assert!(versions.iter().all(|v| v.project_id == project_id()));
}

#[test]
fn versions_form_a_chain_from_newest_to_oldest() {
    let versions = versions();
    for pair in versions.windows(2) {
        assert_eq!(pair[0].previous_version.as_deref(), Some(pair[1].id.as_str()));
        assert!(pair[0].created_at > pair[1].created_at);
    }
    assert_eq!(versions[2].previous_version, None);
}

#[test]
fn version_serializes_like_the_service() {
    let value = serde_json::to_value(&versions()[0]).unwrap();
    assert_eq!(value["createdAt"], "2022-12-14T10:11:49.305Z");
    assert_eq!(value["previousVersion"], "9f9f50a3-1bb2-41c3-9ddb-feaf9be45648");
    assert_eq!(value["userId"], "a9bc54be-07e1-4f29-9739-5fbec2b04da7");
}

#[test]
fn first_version_has_null_previous_and_no_author() {
    let value = serde_json::to_value(&versions()[2]).unwrap();
    assert!(value["previousVersion"].is_null());
    assert!(value.get("userId").is_none());
}

#[test]
fn authors_resolve_by_profile_key() {
    let profiles = user_public_profiles_by_ids();
    let versions = versions();
    assert_eq!(author_of(&versions[0], &profiles).map(|p| p.username.as_str()), Some("LuniMoon"));
    assert_eq!(author_of(&versions[1], &profiles).map(|p| p.username.as_str()), Some("alex_"));
    assert_eq!(author_of(&versions[2], &profiles), None);
}

#[test]
fn profile_key_and_id_mismatch_is_kept() {
    let profiles = user_public_profiles_by_ids();
    let luni = &profiles["a9bc54be-07e1-4f29-9739-5fbec2b04da7"];
    assert_eq!(luni.id, "9bc54be-07e1-4f29-9739-5fbec2b04da7");
}

#[test]
fn profile_serializes_camel_case_with_nulls() {
    let value = serde_json::to_value(user_public_profiles_by_ids()).unwrap();
    let alex = &value["c73c4d69-86a2-441b-a8b7-afe6b8fce810"];
    assert_eq!(alex["username"], "alex_");
    assert!(alex["donateLink"].is_null());
    assert!(alex["discordUsername"].is_null());
    assert_eq!(alex["communityLinks"], serde_json::json!({}));
    assert!(alex["iconUrl"].as_str().unwrap().starts_with("https://www.gravatar.com/avatar/"));
}
