//! src/captcha.rs

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

use crate::config::CaptchaSettings;

#[derive(thiserror::Error, Debug)]
pub enum CaptchaError {
    /// The verification endpoint rejected the request itself, e.g.
    /// `invalid-input-secret`. Distinct from a clean `success: false`.
    #[error("captcha verification rejected: {0:?}")]
    Api(Vec<String>),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[derive(serde::Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// Client for the reCAPTCHA `siteverify` endpoint.
#[derive(Clone)]
pub struct CaptchaVerifier {
    http_client: Client,
    base_url: String,
    secret: Secret<String>,
}

impl CaptchaVerifier {
    pub fn new(settings: CaptchaSettings) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(Duration::from_millis(settings.request_timeout_ms))
                .build()
                .expect("Failed to build the captcha HTTP client"),
            base_url: settings.base_url,
            secret: settings.secret,
        }
    }

    /// Checks a response token with the verification service. `Ok(false)`
    /// means the service answered but did not accept the token.
    pub async fn verify(&self, token: &str, remote_ip: &str) -> Result<bool, CaptchaError> {
        let url = format!("{}/recaptcha/api/siteverify", self.base_url);
        let mut form: Vec<(&str, &str)> = vec![
            ("secret", self.secret.expose_secret()),
            ("response", token),
        ];
        if !remote_ip.is_empty() {
            form.push(("remoteip", remote_ip));
        }

        let response: VerifyResponse = self
            .http_client
            .post(&url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.success && !response.error_codes.is_empty() {
            return Err(CaptchaError::Api(response.error_codes));
        }
        Ok(response.success)
    }
}
