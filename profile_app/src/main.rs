use profile_app::{app::App, config::Config};

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::parse();

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("could not create {}", config.upload_dir.display()))?;

    let db = profile_db::Db::init(&config.database_url, config.database_max_connections).await?;

    profile_app::serve(App {
        config: Arc::new(config),
        db,
    })
    .await?;

    Ok(())
}
