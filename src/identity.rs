//! src/identity.rs
//!
//! Session lookups against the identity provider's `whoami` endpoint. The
//! homepage middleware forwards the browser's cookies and either gets back
//! the signed-in visitor or nothing.

use std::time::Duration;

use reqwest::header::COOKIE;
use reqwest::{Client, StatusCode};

use crate::config::IdentitySettings;

/// The visitor attached to a valid identity session.
#[derive(Debug, Clone)]
pub struct SessionData {
    pub email: String,
    pub name: String,
}

#[derive(serde::Deserialize)]
struct WhoamiResponse {
    #[serde(default)]
    active: bool,
    identity: Option<Identity>,
}

#[derive(serde::Deserialize)]
struct Identity {
    #[serde(default)]
    traits: Traits,
}

#[derive(serde::Deserialize, Default)]
struct Traits {
    #[serde(default)]
    email: String,
    #[serde(default)]
    name: String,
}

#[derive(Clone)]
pub struct IdentityClient {
    http_client: Client,
    base_url: String,
}

impl IdentityClient {
    pub fn new(settings: IdentitySettings) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(Duration::from_millis(settings.request_timeout_ms))
                .build()
                .expect("Failed to build the identity HTTP client"),
            base_url: settings.base_url,
        }
    }

    /// Address of the provider's hosted login page, where visitors without
    /// a session get sent.
    pub fn login_url(&self) -> String {
        format!("{}/ui/login", self.base_url)
    }

    /// Resolves the request's cookies to a session. `Ok(None)` covers both
    /// "no session" answers: a 401/403 from the endpoint and an inactive
    /// session payload.
    pub async fn to_session(
        &self,
        cookie_header: &str,
    ) -> Result<Option<SessionData>, reqwest::Error> {
        let url = format!("{}/sessions/whoami", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .header(COOKIE, cookie_header)
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }

        let whoami: WhoamiResponse = response.error_for_status()?.json().await?;
        if !whoami.active {
            return Ok(None);
        }
        Ok(whoami.identity.map(|identity| SessionData {
            email: identity.traits.email,
            name: identity.traits.name,
        }))
    }
}
