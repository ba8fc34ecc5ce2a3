// Registration and login against the customer/auth APIs. The backend is
// inconsistent about where it puts things: the token may be `accessToken` or
// `token`, the payload may live under `body` or `data`, and registration
// returns a `customer` where login returns a `user`. The fallback chains
// here mirror that, and a successful call persists the bearer token plus a
// denormalized user record as the local session.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::config::session::{self, Session, SessionUser};

use super::build_client;

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    pub body: Option<AuthBody>,
    pub data: Option<AuthBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthBody {
    pub token: Option<String>,
    #[serde(rename = "accessToken")]
    pub access_token: Option<String>,
    pub user: Option<ApiUser>,
    pub customer: Option<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    #[serde(rename = "_id")]
    pub mongo_id: Option<String>,
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    // the backend sends phone as either a string or a number
    pub phone: Option<serde_json::Value>,
    pub location: Option<String>,
}

impl ApiUser {
    fn to_session_user(&self) -> SessionUser {
        let phone = self.phone.as_ref().map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        });
        SessionUser {
            id: self
                .mongo_id
                .clone()
                .or_else(|| self.id.clone())
                .unwrap_or_default(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone,
            location: self.location.clone(),
        }
    }
}

impl AuthResponse {
    pub fn display_message(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }

    /// Walk the body/data and accessToken/token fallback chains.
    fn token(&self) -> Option<String> {
        let from = |b: &Option<AuthBody>| {
            b.as_ref()
                .and_then(|b| b.access_token.clone().or_else(|| b.token.clone()))
        };
        from(&self.body).or_else(|| from(&self.data))
    }

    fn user(&self) -> Option<&ApiUser> {
        self.body
            .as_ref()
            .and_then(|b| b.user.as_ref().or(b.customer.as_ref()))
            .or_else(|| {
                self.data
                    .as_ref()
                    .and_then(|d| d.user.as_ref().or(d.customer.as_ref()))
            })
    }

    /// The session this response establishes, if it carried both a token and
    /// a user record.
    pub fn session(&self) -> Option<Session> {
        if !self.success {
            return None;
        }
        let token = self.token()?;
        let user = self.user()?.to_session_user();
        Some(Session { token, user })
    }
}

async fn post_auth(url: &str, request: &impl Serialize) -> Result<AuthResponse> {
    let client = build_client()?;
    let response = client
        .post(url)
        .json(request)
        .send()
        .await
        .context("Network error - no response from server")?;

    if !response.status().is_success() {
        let status = response.status();
        let parsed: std::result::Result<AuthResponse, _> = response.json().await;
        if let Ok(body) = parsed {
            if let Some(message) = body.display_message() {
                anyhow::bail!("Request failed ({}): {}", status, message);
            }
        }
        anyhow::bail!("Request failed ({})", status);
    }

    response
        .json()
        .await
        .context("Failed to parse authentication response")
}

/// Register a new customer; persists the session on success.
pub async fn register(request: &RegisterRequest) -> Result<AuthResponse> {
    let url = format!("{}/register-customer", config::auth_base_url());
    let response = post_auth(&url, request).await?;
    if let Some(session) = response.session() {
        session::save_session(&session)?;
    }
    Ok(response)
}

/// Log in; persists the session on success.
pub async fn login(request: &LoginRequest) -> Result<AuthResponse> {
    let url = format!("{}/login", config::login_base_url());
    let response = post_auth(&url, request).await?;
    if let Some(session) = response.session() {
        session::save_session(&session)?;
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_with_body_and_access_token() {
        let json = r#"{
            "success": true,
            "message": "Welcome back",
            "body": {
                "accessToken": "tok-123",
                "user": { "_id": "u1", "name": "Ada", "email": "ada@example.com", "phone": 5551234 }
            }
        }"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();
        let session = response.session().unwrap();
        assert_eq!(session.token, "tok-123");
        assert_eq!(session.user.id, "u1");
        assert_eq!(session.user.phone.as_deref(), Some("5551234"));
    }

    #[test]
    fn login_response_with_data_and_plain_token() {
        let json = r#"{
            "success": true,
            "data": {
                "token": "tok-456",
                "user": { "id": "u2", "name": "Grace", "email": "grace@example.com" }
            }
        }"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();
        let session = response.session().unwrap();
        assert_eq!(session.token, "tok-456");
        assert_eq!(session.user.id, "u2");
        assert!(session.user.phone.is_none());
    }

    #[test]
    fn register_response_with_customer_record() {
        let json = r#"{
            "success": true,
            "body": {
                "token": "tok-789",
                "customer": { "id": "c1", "name": "Linus", "email": "linus@example.com", "location": "Helsinki" }
            }
        }"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();
        let session = response.session().unwrap();
        assert_eq!(session.user.id, "c1");
        assert_eq!(session.user.location.as_deref(), Some("Helsinki"));
    }

    #[test]
    fn failed_or_tokenless_responses_yield_no_session() {
        let response: AuthResponse =
            serde_json::from_str(r#"{"success": false, "error": "bad credentials"}"#).unwrap();
        assert!(response.session().is_none());
        assert_eq!(response.display_message(), Some("bad credentials"));

        // success without a token is not a session either
        let response: AuthResponse = serde_json::from_str(
            r#"{"success": true, "body": {"user": {"name": "A", "email": "a@b.c"}}}"#,
        )
        .unwrap();
        assert!(response.session().is_none());
    }
}
