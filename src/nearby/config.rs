use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyConfig {
    /// Path to the csv file with the known locations.
    pub dataset: PathBuf,
    pub http_address: String,

    // used for requests that do not specify their own limits
    #[serde(default = "default_max_distance")]
    pub default_max_distance: f64,
    #[serde(default = "default_max_results")]
    pub default_max_results: i64,
}

pub fn load(path: impl AsRef<Path>) -> Result<NearbyConfig> {
    let path = path.as_ref();
    let fp = File::open(path).with_context(|| format!("open config {:?}", path))?;
    let config = serde_yaml::from_reader(fp).with_context(|| format!("parse config {:?}", path))?;
    Ok(config)
}

fn default_max_distance() -> f64 {
    50_000.0
}

fn default_max_results() -> i64 {
    50
}
