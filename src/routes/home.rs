//! src/routes/home.rs

use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};
use htmlescape::encode_minimal;

use crate::domain::team::TeamDirectory;
use crate::identity::SessionData;
use crate::metrics::Metrics;

/// Values the homepage needs beyond what the poller keeps fresh.
#[derive(Debug, Clone)]
pub struct PageSettings {
    pub captcha_sitekey: String,
    pub coc_url: String,
}

const HOME_PAGE: &str = include_str!("home.html");

pub async fn homepage(
    session: web::ReqData<SessionData>,
    team: web::Data<TeamDirectory>,
    metrics: web::Data<Metrics>,
    page: web::Data<PageSettings>,
) -> HttpResponse {
    metrics.record_homepage_hit();

    let team = team.snapshot();
    let (user_count, active_count) = metrics.user_counts();
    let body = HOME_PAGE
        .replace("{{site_key}}", &encode_minimal(&page.captcha_sitekey))
        .replace("{{coc_url}}", &encode_minimal(&page.coc_url))
        .replace("{{team_name}}", &encode_minimal(&team.name))
        .replace("{{team_domain}}", &encode_minimal(&team.domain))
        .replace("{{team_icon}}", &encode_minimal(&team.icon_url))
        .replace("{{user_count}}", &user_count.to_string())
        .replace("{{active_count}}", &active_count.to_string())
        .replace("{{visitor_name}}", &encode_minimal(&session.name))
        .replace("{{visitor_email}}", &encode_minimal(&session.email));

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}
