mod config;
mod main_lib;
mod repl;

use config::Config;
use main_lib::{build_app, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config.log_format);
    let app = build_app(&config)?;
    tracing::info!("Database path in use: {}", config.db_path);
    repl::run(app).await
}
