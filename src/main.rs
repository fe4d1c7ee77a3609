use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::nearby::provider::LocationProvider;
use crate::nearby_web::{Defaults, Options};

pub mod nearby;
pub mod nearby_web;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "./nearby.config.yaml".to_owned());
    let config = nearby::config::load(&config_path)?;

    // the dataset is read on every request, a missing file is not fatal yet
    if !config.dataset.is_file() {
        warn!("Dataset {:?} does not exist", config.dataset);
    }

    info!("Serving locations from {:?}", config.dataset);

    nearby_web::serve(Options {
        provider: LocationProvider::new(&config.dataset),
        defaults: Defaults {
            max_distance: config.default_max_distance,
            max_results: config.default_max_results,
        },
        addr: config.http_address,
    }).await?;

    Ok(())
}
