use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{web, App, HttpResponse, HttpServer};
use actix_web_lab::middleware::from_fn;
use tracing_actix_web::TracingLogger;

use crate::captcha::CaptchaVerifier;
use crate::domain::team::TeamDirectory;
use crate::identity::IdentityClient;
use crate::metrics::Metrics;
use crate::middleware::{enforce_https, require_session, HttpsPolicy};
use crate::routes::badge::team_badge;
use crate::routes::health::health_check;
use crate::routes::home::{homepage, PageSettings};
use crate::routes::invite::invite;
use crate::routes::vars::debug_vars;
use crate::slack::SlackClient;

/// Everything the request handlers and middleware reach for.
pub struct AppState {
    pub slack_client: SlackClient,
    pub captcha_verifier: CaptchaVerifier,
    pub identity_client: IdentityClient,
    pub team: Arc<TeamDirectory>,
    pub metrics: Arc<Metrics>,
    pub page: PageSettings,
    pub https_policy: HttpsPolicy,
}

pub fn run(listener: TcpListener, state: AppState) -> Result<Server, std::io::Error> {
    let slack_client = web::Data::new(state.slack_client);
    let captcha_verifier = web::Data::new(state.captcha_verifier);
    let identity_client = web::Data::new(state.identity_client);
    let team = web::Data::from(state.team);
    let metrics = web::Data::from(state.metrics);
    let page = web::Data::new(state.page);
    let https_policy = web::Data::new(state.https_policy);

    Ok(HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .service(
                // The session gate runs before the HTTPS bounce.
                web::resource("/")
                    .wrap(from_fn(enforce_https))
                    .wrap(from_fn(require_session))
                    .route(web::get().to(homepage)),
            )
            .service(
                web::resource("/invite/")
                    .route(web::post().to(invite))
                    .default_service(web::to(HttpResponse::NotFound)),
            )
            .service(
                web::resource("/badge.svg")
                    .route(web::get().to(team_badge))
                    .default_service(web::to(HttpResponse::NotFound)),
            )
            .route("/health", web::get().to(health_check))
            .route("/debug/vars", web::get().to(debug_vars))
            .app_data(slack_client.clone())
            .app_data(captcha_verifier.clone())
            .app_data(identity_client.clone())
            .app_data(team.clone())
            .app_data(metrics.clone())
            .app_data(page.clone())
            .app_data(https_policy.clone())
    })
    .listen(listener)?
    .run())
}
