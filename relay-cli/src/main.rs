use anyhow::Result;
use clap::Parser;
use cli::Cli;
use dotenv::dotenv;
use relay::RelayClient;
use tracing::info;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let stdout_log = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        );

    tracing_subscriber::registry().with(stdout_log).init();

    let client = RelayClient::new(cli.relay_url.clone());
    let params = cli.search_params();

    let orders = if cli.binary {
        client.search_binary(&params).await?
    } else {
        client.search(&params).await?
    };

    info!("{} matching orders", orders.len());
    for order in &orders {
        println!("{}", serde_json::to_string_pretty(order)?);
    }

    Ok(())
}
