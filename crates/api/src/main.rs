use anyhow::Context;

use mailinglist_infra::AppConfig;

#[tokio::main]
async fn main() {
    mailinglist_observability::init();

    let result = match AppConfig::from_env().context("invalid configuration") {
        Ok(config) => mailinglist_api::server::run(&config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(error = %format!("{e:#}"), "JSON server error");
        std::process::exit(1);
    }
}
