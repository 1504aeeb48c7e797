//! Version history story data: three saved versions of one cloud project
//! and the public profiles of their authors.
//!
//! The data is kept exactly as the story ships it, including the profile
//! keyed `a9bc54be-...` whose own `id` lacks the leading `a`.

#[cfg(test)]
#[path = "version_history_test.rs"]
mod version_history_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::datetime;

const PROJECT_ID: &str = "fb4d878a-1935-4916-b681-f9235475d354";

/// One saved version of a cloud project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudProjectVersion {
    pub id: String,
    pub project_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// `None` for the first version of a project.
    pub previous_version: Option<String>,
    /// Absent when the author is unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Public part of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublicProfile {
    pub id: String,
    pub username: String,
    pub description: Option<String>,
    pub donate_link: Option<String>,
    pub discord_username: Option<String>,
    pub community_links: BTreeMap<String, String>,
    pub icon_url: String,
}

#[must_use]
pub fn project_id() -> &'static str {
    PROJECT_ID
}

/// Versions from newest to oldest, each pointing at the one before.
#[must_use]
pub fn versions() -> Vec<CloudProjectVersion> {
    vec![
        CloudProjectVersion {
            id: "8e067d2d-6f08-4f93-ad2d-f3ad5ca3c69c".into(),
            project_id: PROJECT_ID.into(),
            created_at: datetime!(2022-12-14 10:11:49.305 UTC),
            previous_version: Some("9f9f50a3-1bb2-41c3-9ddb-feaf9be45648".into()),
            user_id: Some("a9bc54be-07e1-4f29-9739-5fbec2b04da7".into()),
        },
        CloudProjectVersion {
            id: "9f9f50a3-1bb2-41c3-9ddb-feaf9be45648".into(),
            project_id: PROJECT_ID.into(),
            created_at: datetime!(2022-12-13 10:11:49.305 UTC),
            previous_version: Some("5280e344-bd36-4662-9948-cb0d18928d03".into()),
            user_id: Some("c73c4d69-86a2-441b-a8b7-afe6b8fce810".into()),
        },
        CloudProjectVersion {
            id: "5280e344-bd36-4662-9948-cb0d18928d03".into(),
            project_id: PROJECT_ID.into(),
            created_at: datetime!(2022-12-12 10:11:49.305 UTC),
            previous_version: None,
            user_id: None,
        },
    ]
}

/// Author profiles keyed by user id, as `GET /user-public-profile` returns them.
#[must_use]
pub fn user_public_profiles_by_ids() -> BTreeMap<String, UserPublicProfile> {
    let profile = |id: &str, username: &str, icon_url: &str| UserPublicProfile {
        id: id.into(),
        username: username.into(),
        description: None,
        donate_link: None,
        discord_username: None,
        community_links: BTreeMap::new(),
        icon_url: icon_url.into(),
    };
    BTreeMap::from([
        (
            "c73c4d69-86a2-441b-a8b7-afe6b8fce810".to_owned(),
            profile(
                "c73c4d69-86a2-441b-a8b7-afe6b8fce810",
                "alex_",
                "https://www.gravatar.com/avatar/6079a3eba0dc05f12034c55bbce6aaa3?s=40&d=retro",
            ),
        ),
        (
            "a9bc54be-07e1-4f29-9739-5fbec2b04da7".to_owned(),
            profile(
                "9bc54be-07e1-4f29-9739-5fbec2b04da7",
                "LuniMoon",
                "https://www.gravatar.com/avatar/6079a3eba0dc05f12034c55bbce65aa3?s=40&d=retro",
            ),
        ),
    ])
}

/// Author of `version` among `profiles`, looked up by map key.
#[must_use]
pub fn author_of<'a>(
    version: &CloudProjectVersion,
    profiles: &'a BTreeMap<String, UserPublicProfile>,
) -> Option<&'a UserPublicProfile> {
    profiles.get(version.user_id.as_deref()?)
}
