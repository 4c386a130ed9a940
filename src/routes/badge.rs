//! src/routes/badge.rs

use actix_web::{web, HttpResponse};

use crate::badge::render;
use crate::metrics::Metrics;

const BADGE_COLOR: &str = "#E01563";

/// The member-count badge. The status label is `active/total` while anyone
/// is online, plain `total` otherwise.
pub async fn team_badge(metrics: web::Data<Metrics>) -> HttpResponse {
    let (users, active) = metrics.user_counts();

    HttpResponse::Ok()
        .content_type("image/svg+xml; charset=utf-8")
        .body(render("slack", &status_label(users, active), BADGE_COLOR))
}

fn status_label(users: i64, active: i64) -> String {
    if active > 0 {
        format!("{}/{}", active, users)
    } else {
        users.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::status_label;

    #[test]
    fn the_status_shows_the_fraction_while_anyone_is_online() {
        assert_eq!(status_label(3500, 120), "120/3500");
    }

    #[test]
    fn the_status_falls_back_to_the_total_when_nobody_is_online() {
        assert_eq!(status_label(3500, 0), "3500");
    }
}
