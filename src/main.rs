use slackinviter::config::get_configuration;
use slackinviter::startup::AppServer;
use slackinviter::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber(get_subscriber(
        "slackinviter".into(),
        "info".into(),
        std::io::stdout,
    ));

    let configuration = get_configuration().expect("Should have loaded configuration");
    let server = AppServer::build(configuration).await?;

    server.run_until_stopped().await?;

    Ok(())
}
