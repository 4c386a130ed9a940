use once_cell::sync::Lazy;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use slackinviter::config::{get_configuration, Configuration};
use slackinviter::startup::AppServer;
use slackinviter::telemetry::{get_subscriber, init_subscriber};

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber(
            "test".into(),
            "debug".into(),
            std::io::stdout,
        ));
    } else {
        init_subscriber(get_subscriber("test".into(), "debug".into(), std::io::sink));
    }
});

pub struct TestApp {
    pub addr: String,
    pub port: u16,
    pub slack_server: MockServer,
    pub captcha_server: MockServer,
    pub identity_server: MockServer,
    pub http_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_invite(&self, body: &str) -> reqwest::Response {
        self.http_client
            .post(format!("{}/invite/", self.addr))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_debug_vars(&self) -> serde_json::Value {
        self.http_client
            .get(format!("{}/debug/vars", self.addr))
            .send()
            .await
            .expect("Failed to execute request.")
            .json()
            .await
            .expect("Failed to parse the debug vars")
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(customize: impl FnOnce(&mut Configuration)) -> TestApp {
    Lazy::force(&TRACING);

    let slack_server = MockServer::start().await;
    let captcha_server = MockServer::start().await;
    let identity_server = MockServer::start().await;

    // Keep the startup poller quiet: an empty member list and a minimal
    // team profile, so its first refresh succeeds and it goes to sleep.
    Mock::given(method("GET"))
        .and(path("/api/users.list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "members": [],
            "response_metadata": { "next_cursor": "" },
        })))
        .mount(&slack_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/team.info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "team": { "name": "Gophers", "domain": "gophers" },
        })))
        .mount(&slack_server)
        .await;

    let mut configuration = get_configuration().expect("should load configuration");
    configuration.app.host = "127.0.0.1".into();
    configuration.app.port = 0;
    configuration.slack.base_url = slack_server.uri();
    configuration.captcha.base_url = captcha_server.uri();
    configuration.identity.base_url = identity_server.uri();
    customize(&mut configuration);

    let server = AppServer::build(configuration)
        .await
        .expect("Failed to build the server");
    let port = server.port();
    let _ = tokio::spawn(server.run_until_stopped());

    TestApp {
        addr: format!("http://127.0.0.1:{}", port),
        port,
        slack_server,
        captcha_server,
        identity_server,
        http_client: reqwest::Client::new(),
    }
}
