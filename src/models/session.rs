// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Session and user profile models.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User identifier as returned by the backend (numeric or string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

/// Profile of the logged-in user.
///
/// Unknown fields sent by the backend are kept in `extra` so they survive
/// a persist/reload cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(flatten)]
    #[cfg_attr(feature = "binding-generation", ts(skip))]
    pub extra: BTreeMap<String, Value>,
}

/// Authenticated session: bearer token plus optional profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: Option<AuthUser>) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// A session counts as authenticated only with a non-empty token.
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_keeps_unknown_fields() {
        let json = r#"{"id":7,"name":"Ana","avatarUrl":"/a.png","rol":"admin"}"#;
        let user: AuthUser = serde_json::from_str(json).unwrap();

        assert_eq!(user.id, Some(UserId::Number(7)));
        assert_eq!(user.avatar_url.as_deref(), Some("/a.png"));
        assert_eq!(user.extra.get("rol"), Some(&Value::from("admin")));

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["rol"], "admin");
        assert_eq!(back["avatarUrl"], "/a.png");
    }

    #[test]
    fn test_session_without_user_field() {
        let session: Session = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert_eq!(session.token, "abc");
        assert!(session.user.is_none());
        assert!(session.has_token());
    }

    #[test]
    fn test_string_user_id() {
        let user: AuthUser = serde_json::from_str(r#"{"id":"u-12"}"#).unwrap();
        assert_eq!(user.id.unwrap().to_string(), "u-12");
    }
}
