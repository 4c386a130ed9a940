//! src/middleware.rs
//!
//! Middleware for the homepage: the session gate and the HTTPS bounce.

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{ContentType, COOKIE, LOCATION};
use actix_web::{web, Error, HttpMessage, HttpResponse};
use actix_web_lab::middleware::Next;

use crate::identity::IdentityClient;

/// Whether plain-HTTP requests get bounced to their HTTPS equivalent.
#[derive(Debug, Clone, Copy)]
pub struct HttpsPolicy {
    pub enforce: bool,
}

const REDIRECT_PAGE: &str = include_str!("redirect.html");

/// Lets signed-in visitors through with their [`SessionData`] attached to
/// the request; everyone else gets the page that forwards them to the
/// login flow.
///
/// [`SessionData`]: crate::identity::SessionData
pub async fn require_session(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let identity = req
        .app_data::<web::Data<IdentityClient>>()
        .cloned()
        .ok_or_else(|| {
            actix_web::error::ErrorInternalServerError("The identity client is not registered")
        })?;

    let cookies = req
        .headers()
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_owned();

    let session = match identity.to_session(&cookies).await {
        Ok(session) => session,
        Err(error) => {
            tracing::warn!(error.cause_chain = ?error, "Failed to check the visitor's session");
            None
        }
    };

    match session {
        Some(session) => {
            req.extensions_mut().insert(session);
            next.call(req)
                .await
                .map(ServiceResponse::map_into_boxed_body)
        }
        None => {
            let login_url = htmlescape::encode_minimal(&identity.login_url());
            let (request, _) = req.into_parts();
            let response = HttpResponse::Ok()
                .content_type(ContentType::html())
                .body(REDIRECT_PAGE.replace("{{login_url}}", &login_url));
            Ok(ServiceResponse::new(request, response).map_into_boxed_body())
        }
    }
}

/// Behind the load balancer the original scheme arrives in
/// `X-Forwarded-Proto`; plain-HTTP requests are sent back to the same URL
/// over HTTPS.
pub async fn enforce_https(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let enforce = req
        .app_data::<web::Data<HttpsPolicy>>()
        .map(|policy| policy.enforce)
        .unwrap_or(false);

    let forwarded_proto = req
        .headers()
        .get("X-Forwarded-Proto")
        .and_then(|value| value.to_str().ok());

    if enforce && forwarded_proto == Some("http") {
        let host = req.connection_info().host().to_owned();
        let target = format!("https://{}{}", host, req.uri());
        let (request, _) = req.into_parts();
        let response = HttpResponse::MovedPermanently()
            .insert_header((LOCATION, target))
            .finish();
        return Ok(ServiceResponse::new(request, response).map_into_boxed_body());
    }

    next.call(req)
        .await
        .map(ServiceResponse::map_into_boxed_body)
}
