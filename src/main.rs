use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use colleague_match::config::Config;
use colleague_match::server;
use colleague_match::store::ColleagueStore;

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();

    let store = ColleagueStore::connect(&config.database_url).await?;
    store.seed_if_empty().await?;

    server::serve(store, config.port).await?;
    Ok(())
}
