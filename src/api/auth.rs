use serde::Deserialize;

use crate::error::AuthError;
use crate::state::session::Session;

/// Client for the identity provider (Supabase-style auth REST API).
///
/// The application only needs two operations and keeps no token state beyond
/// the returned `Session`.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    user: Option<AuthUser>,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    email: Option<String>,
}

/// Failure bodies vary across provider versions; take whichever message
/// field is present
#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        AuthClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Register a new account
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .post(format!("{}/auth/v1/signup", self.base_url))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let body = response
                .text()
                .await
                .map_err(|e| AuthError::Transport(e.to_string()))?;
            Err(AuthError::Rejected(rejection_message(&body)))
        }
    }

    /// Exchange credentials for a session
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let response = self
            .http
            .post(format!(
                "{}/auth/v1/token?grant_type=password",
                self.base_url
            ))
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(AuthError::Rejected(rejection_message(&body)));
        }

        session_from_json(email, &body)
    }
}

/// Provider rejection message, verbatim when one of the known fields is set
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<AuthErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error_description.or(parsed.msg).or(parsed.message))
        .unwrap_or_else(|| "authentication rejected".to_string())
}

/// Build the session context from a successful token response
fn session_from_json(fallback_email: &str, body: &str) -> Result<Session, AuthError> {
    let parsed: TokenResponse =
        serde_json::from_str(body).map_err(|e| AuthError::Malformed(e.to_string()))?;

    let email = parsed
        .user
        .and_then(|user| user.email)
        .unwrap_or_else(|| fallback_email.to_string());

    Ok(Session::signed_in(email, parsed.access_token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_token_response() {
        let body = r#"{
            "access_token": "jwt-token",
            "token_type": "bearer",
            "user": { "id": "1", "email": "user@example.com" }
        }"#;

        let session = session_from_json("typed@example.com", body).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.email(), Some("user@example.com"));
        assert_eq!(session.access_token(), Some("jwt-token"));
    }

    #[test]
    fn test_session_falls_back_to_typed_email() {
        let session = session_from_json("typed@example.com", r#"{"access_token": "t"}"#).unwrap();
        assert_eq!(session.email(), Some("typed@example.com"));
    }

    #[test]
    fn test_malformed_token_response() {
        assert!(matches!(
            session_from_json("a@b.c", "not json"),
            Err(AuthError::Malformed(_))
        ));
    }

    #[test]
    fn test_rejection_message_fields() {
        assert_eq!(
            rejection_message(r#"{"error_description": "Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(
            rejection_message(r#"{"msg": "Email not confirmed"}"#),
            "Email not confirmed"
        );
        assert_eq!(rejection_message("<html></html>"), "authentication rejected");
    }
}
