use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;

use crate::captcha::CaptchaVerifier;
use crate::config::Configuration;
use crate::domain::team::TeamDirectory;
use crate::identity::IdentityClient;
use crate::metrics::Metrics;
use crate::middleware::HttpsPolicy;
use crate::poller;
use crate::routes::home::PageSettings;
use crate::run::{run, AppState};
use crate::slack::SlackClient;

pub struct AppServer {
    port: u16,
    address: String,
    server: Server,
}

impl AppServer {
    pub async fn build(configuration: Configuration) -> Result<Self, anyhow::Error> {
        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.app.host, configuration.app.port
        ))?;

        tracing::info!(
            "Starting service on address: {}",
            listener.local_addr()?
        );

        let slack_client = SlackClient::new(configuration.slack.clone());
        let captcha_verifier = CaptchaVerifier::new(configuration.captcha.clone());
        let identity_client = IdentityClient::new(configuration.identity.clone());
        let team = Arc::new(TeamDirectory::default());
        let metrics = Arc::new(Metrics::default());

        tokio::spawn(poller::run(
            slack_client.clone(),
            Arc::clone(&team),
            Arc::clone(&metrics),
        ));

        let page = PageSettings {
            captcha_sitekey: configuration.captcha.sitekey.clone(),
            coc_url: configuration.app.coc_url.clone(),
        };
        let https_policy = HttpsPolicy {
            enforce: configuration.app.enforce_https,
        };

        let address = configuration.app.host.clone();
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            AppState {
                slack_client,
                captcha_verifier,
                identity_client,
                team,
                metrics,
                page,
                https_policy,
            },
        )?;

        Ok(Self {
            port,
            address,
            server,
        })
    }

    pub fn to_server_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    pub fn address(&self) -> String {
        self.address.clone()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
