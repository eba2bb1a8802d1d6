mod analysis;
mod app;
mod config;
mod detector;
mod domain;
mod infrastructure;
mod terminal;

use anyhow::Result;
use infrastructure::{
    directories, logging,
    shutdown::{self, Shutdown},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let shutdown = Shutdown::new();
    shutdown::install_signal_handlers(shutdown.clone());

    let app = app::PhishAiApp::initialize(config, shutdown)?;
    app.run().await
}
