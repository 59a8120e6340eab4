//! Auth Commands
//!
//! Login, registration and the GitHub OAuth round trip. Each returns the
//! session token; persisting it is the caller's job.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;
use taskline_core::wire::{AuthData, LoginRequest, RegisterRequest};
use taskline_core::ApiError;

use super::ApiClient;
use crate::config::GithubOAuth;

const GITHUB_SCOPE: &str = "user:email";

#[derive(Serialize)]
struct GithubCodeArgs<'a> {
    code: &'a str,
}

fn require_token(data: AuthData) -> Result<String, ApiError> {
    data.token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Decode("response carried no token".to_string()))
}

pub async fn login(client: &ApiClient, account: &str, password: &str) -> Result<String, ApiError> {
    let data: AuthData = client
        .post("/v1/users/login", &LoginRequest { account, password })
        .await?;
    require_token(data)
}

pub async fn register(
    client: &ApiClient,
    username: &str,
    password: &str,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<String, ApiError> {
    let request = RegisterRequest {
        username,
        password,
        email: email.filter(|v| !v.trim().is_empty()),
        phone: phone.filter(|v| !v.trim().is_empty()),
    };
    let data: AuthData = client.post("/v1/users/register", &request).await?;
    require_token(data)
}

/// Exchange the `code` GitHub redirected back with for a session token
pub async fn github_login(client: &ApiClient, code: &str) -> Result<String, ApiError> {
    let data: AuthData = client
        .post("/v1/users/github/login", &GithubCodeArgs { code })
        .await?;
    require_token(data)
}

pub fn github_authorize_url(oauth: &GithubOAuth) -> String {
    format!(
        "{}?client_id={}&scope={}",
        oauth.authorize_url,
        utf8_percent_encode(&oauth.client_id, NON_ALPHANUMERIC),
        utf8_percent_encode(GITHUB_SCOPE, NON_ALPHANUMERIC)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_authorize_url() {
        let oauth = GithubOAuth {
            client_id: "Iv1.abc".into(),
            authorize_url: "https://github.com/login/oauth/authorize".into(),
        };
        assert_eq!(
            github_authorize_url(&oauth),
            "https://github.com/login/oauth/authorize?client_id=Iv1%2Eabc&scope=user%3Aemail"
        );
    }

    #[test]
    fn test_require_token() {
        assert_eq!(require_token(AuthData { token: Some("t".into()) }), Ok("t".to_string()));
        assert!(require_token(AuthData { token: Some(String::new()) }).is_err());
        assert!(require_token(AuthData::default()).is_err());
    }
}
