use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application settings stored in `~/.tierline/config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Currency code used when a pricing file does not name one
    pub currency: String,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_decimals")]
    pub decimals: usize,
    /// Pricing JSON loaded when no `--input` is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_file: Option<PathBuf>,
}

fn default_decimals() -> usize {
    2
}

/// How the curve is printed
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}
