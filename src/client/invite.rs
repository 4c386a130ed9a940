//! src/client/invite.rs

use reqwest::Client;

/// Fallback shown when a failed submission carries no message of its own.
const FALLBACK_MESSAGE: &str = "Server error";

/// The one way a submission can fail. Transport errors and server-reported
/// errors land here alike; the message is rendered straight into the
/// submit control's label.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct SubmissionFailure {
    pub message: String,
}

impl SubmissionFailure {
    fn server_error() -> Self {
        Self {
            message: FALLBACK_MESSAGE.into(),
        }
    }
}

/// Issues the invite call the form submits to.
pub struct InviteClient {
    http_client: Client,
    base_url: String,
}

impl InviteClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: Client::new(),
            base_url,
        }
    }

    /// One form-encoded POST per call, no retries. A 2xx answer is a
    /// success; anything else becomes a [`SubmissionFailure`] carrying the
    /// response body, or the fallback message when the body is empty.
    pub async fn invite(
        &self,
        code_of_conduct: u8,
        email: &str,
        first_name: &str,
        last_name: &str,
        captcha_token: &str,
    ) -> Result<(), SubmissionFailure> {
        let code_of_conduct = code_of_conduct.to_string();
        let response = self
            .http_client
            .post(format!("{}/invite/", self.base_url))
            .form(&[
                ("coc", code_of_conduct.as_str()),
                ("email", email),
                ("fname", first_name),
                ("lname", last_name),
                ("g-recaptcha-response", captcha_token),
            ])
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(_) => return Err(SubmissionFailure::server_error()),
        };

        if response.status().is_success() {
            return Ok(());
        }

        let message = response
            .text()
            .await
            .ok()
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| FALLBACK_MESSAGE.into());
        Err(SubmissionFailure { message })
    }
}
