//! src/routes/invite.rs

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use std::fmt::Formatter;

use crate::captcha::{CaptchaError, CaptchaVerifier};
use crate::domain::invite_request::{InviteForm, InviteRejection, InviteRequest};
use crate::metrics::Metrics;
use crate::slack::{SlackClient, SlackError};

fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// Everything that can stop an invite. The `Display` text of each variant
/// is the plain-text body the browser renders on the submit button, so
/// the wording here is user-facing.
#[derive(thiserror::Error)]
pub enum InviteError {
    #[error("{0}")]
    Rejected(#[from] InviteRejection),

    #[error("Internal Server Error")]
    PeerAddressUnknown,

    #[error("Error validating recaptcha.. Did you click it?")]
    CaptchaCheckFailed(#[source] CaptchaError),

    #[error("Invalid recaptcha")]
    CaptchaRejected,

    #[error("{0}")]
    InviteFailed(#[from] SlackError),
}

impl std::fmt::Debug for InviteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for InviteError {
    fn status_code(&self) -> StatusCode {
        match self {
            InviteError::Rejected(_) | InviteError::CaptchaCheckFailed(_) => {
                StatusCode::PRECONDITION_FAILED
            }
            InviteError::PeerAddressUnknown
            | InviteError::CaptchaRejected
            | InviteError::InviteFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[tracing::instrument(
name = "Inviting a new member",
skip(request, form, slack, captcha, metrics),
fields(
member_email = % form.email,
member_first_name = % form.fname,
)
)]
pub async fn invite(
    request: HttpRequest,
    form: web::Form<InviteForm>,
    slack: web::Data<SlackClient>,
    captcha: web::Data<CaptchaVerifier>,
    metrics: web::Data<Metrics>,
) -> Result<impl Responder, InviteError> {
    let invite_request: InviteRequest =
        form.0.try_into().map_err(|rejection: InviteRejection| {
            metrics.record_rejection(&rejection);
            InviteError::from(rejection)
        })?;

    let remote_ip = request
        .peer_addr()
        .map(|addr| addr.ip().to_string())
        .ok_or_else(|| {
            metrics.record_failed_captcha();
            InviteError::PeerAddressUnknown
        })?;

    let token_accepted = captcha
        .verify(invite_request.captcha_token(), &remote_ip)
        .await
        .map_err(|error| {
            metrics.record_failed_captcha();
            InviteError::CaptchaCheckFailed(error)
        })?;
    if !token_accepted {
        metrics.record_invalid_captcha();
        return Err(InviteError::CaptchaRejected);
    }
    metrics.record_successful_captcha();

    slack
        .invite_to_team(
            invite_request.first_name(),
            invite_request.last_name(),
            invite_request.email(),
        )
        .await
        .map_err(|error| {
            metrics.record_invite_error();
            InviteError::from(error)
        })?;

    metrics.record_successful_invite();
    Ok(HttpResponse::Ok())
}
