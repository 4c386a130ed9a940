use wiremock::matchers::path;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::spawn_app;

pub mod helpers;

#[tokio::test]
async fn rejections_show_up_in_the_debug_vars() {
    let app = spawn_app().await;

    app.post_invite("coc=1&fname=Jane&lname=Doe").await;
    app.post_invite("coc=1&fname=Jane&lname=Doe").await;
    app.post_invite("coc=1&email=a%40b.com&lname=Doe").await;

    let vars = app.get_debug_vars().await;
    assert_eq!(vars["metrics"]["missing_email"], 2);
    assert_eq!(vars["metrics"]["missing_first_name"], 1);
    assert_eq!(vars["metrics"]["missing_last_name"], 0);
    assert_eq!(vars["metrics"]["successful_invites"], 0);
}

#[tokio::test]
async fn a_full_invite_counts_the_captcha_and_the_invite() {
    let app = spawn_app().await;

    Mock::given(path("/recaptcha/api/siteverify"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })),
        )
        .expect(1)
        .mount(&app.captcha_server)
        .await;
    Mock::given(path("/api/users.admin.invite"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .expect(1)
        .mount(&app.slack_server)
        .await;

    app.post_invite("coc=1&email=a%40b.com&fname=Jane&lname=Doe&g-recaptcha-response=tok123")
        .await;

    let vars = app.get_debug_vars().await;
    assert_eq!(vars["metrics"]["successful_captcha"], 1);
    assert_eq!(vars["metrics"]["successful_invites"], 1);
    assert_eq!(vars["metrics"]["invite_errors"], 0);
}

#[tokio::test]
async fn a_refused_captcha_counts_as_invalid() {
    let app = spawn_app().await;

    Mock::given(path("/recaptcha/api/siteverify"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": false })),
        )
        .expect(1)
        .mount(&app.captcha_server)
        .await;

    app.post_invite("coc=1&email=a%40b.com&fname=Jane&lname=Doe&g-recaptcha-response=tok123")
        .await;

    let vars = app.get_debug_vars().await;
    assert_eq!(vars["metrics"]["invalid_captcha"], 1);
    assert_eq!(vars["metrics"]["successful_captcha"], 0);
}
