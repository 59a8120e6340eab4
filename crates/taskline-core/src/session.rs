//! Session
//!
//! The signed-in state, built once at startup from the stored token and then
//! handed down through context. The user is read from the JWT payload without
//! verifying the signature; the backend does that on every request.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::ItemId;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("token is not a JWT")]
    Malformed,
    #[error("token payload is not base64: {0}")]
    Encoding(String),
    #[error("token payload is not a user: {0}")]
    Payload(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "numeric_or_string_id")]
    pub id: ItemId,
    pub username: String,
}

fn numeric_or_string_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ItemId, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(ItemId),
        Text(String),
    }
    match Id::deserialize(deserializer)? {
        Id::Number(id) => Ok(id),
        Id::Text(text) => text.parse().map_err(serde::de::Error::custom),
    }
}

/// Read `{id, username}` from the token's payload segment
pub fn decode_user(token: &str) -> Result<User, SessionError> {
    let payload = token.split('.').nth(1).ok_or(SessionError::Malformed)?;
    let trimmed = payload.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .map_err(|e| SessionError::Encoding(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| SessionError::Payload(e.to_string()))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Any non-empty stored token counts as signed in. An undecodable token
    /// still authenticates; only the username display is lost.
    pub fn bootstrap(stored_token: Option<String>) -> Self {
        let mut session = Self::anonymous();
        if let Some(token) = stored_token.filter(|t| !t.trim().is_empty()) {
            session.sign_in(token);
        }
        session
    }

    pub fn sign_in(&mut self, token: String) {
        self.user = match decode_user(&token) {
            Ok(user) => Some(user),
            Err(err) => {
                log::warn!("[session] could not read user from token: {}", err);
                None
            }
        };
        self.token = Some(token);
    }

    pub fn sign_out(&mut self) {
        self.token = None;
        self.user = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.username.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(payload: &str) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.signature", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn test_decode_user_from_payload() {
        let user = decode_user(&jwt(r#"{"id":7,"username":"amy","exp":1}"#)).unwrap();
        assert_eq!(user, User { id: 7, username: "amy".into() });
        let user = decode_user(&jwt(r#"{"id":"12","username":"bo"}"#)).unwrap();
        assert_eq!(user.id, 12);
    }

    #[test]
    fn test_decode_user_errors() {
        assert_eq!(decode_user("opaque-token"), Err(SessionError::Malformed));
        assert!(matches!(decode_user("a.!!!.c"), Err(SessionError::Encoding(_))));
        assert!(matches!(decode_user(&jwt("[]")), Err(SessionError::Payload(_))));
    }

    #[test]
    fn test_bootstrap() {
        assert!(!Session::bootstrap(None).is_authenticated());
        assert!(!Session::bootstrap(Some("  ".into())).is_authenticated());

        let opaque = Session::bootstrap(Some("mock-jwt-token".into()));
        assert!(opaque.is_authenticated());
        assert_eq!(opaque.username(), None);

        let session = Session::bootstrap(Some(jwt(r#"{"id":1,"username":"amy"}"#)));
        assert_eq!(session.username(), Some("amy"));
    }

    #[test]
    fn test_sign_out_clears_everything() {
        let mut session = Session::bootstrap(Some(jwt(r#"{"id":1,"username":"amy"}"#)));
        session.sign_out();
        assert_eq!(session, Session::anonymous());
        assert_eq!(session.token(), None);
    }
}
