use super::types::{Config, OutputFormat};

pub const DEFAULT_CONFIG: Config = Config {
    currency: String::new(), // Set to "USD" at runtime
    format: OutputFormat::Table,
    decimals: 2,
    pricing_file: None,
};

impl Default for Config {
    fn default() -> Self {
        let currency = std::env::var("TIERLINE_CURRENCY").unwrap_or_else(|_| "USD".to_string());
        Config {
            currency,
            ..DEFAULT_CONFIG
        }
    }
}
