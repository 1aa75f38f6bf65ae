use super::error::ConfigError;
use super::types::Config;
use crate::billing::{Currency, PricingConfig};
use crate::debug_println;
use std::fs;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Read a pricing configuration exported as JSON
    pub fn load_pricing<P: AsRef<Path>>(path: P) -> Result<PricingConfig, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let pricing = PricingConfig::from_json(&content)?;
        debug_println!(
            "Loaded {} tiers from {}",
            pricing.tiers.len(),
            path.display()
        );
        Ok(pricing)
    }

    /// Write a pricing configuration as pretty-printed JSON
    pub fn save_pricing<P: AsRef<Path>>(
        pricing: &PricingConfig,
        path: P,
    ) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }

        let content = pricing.to_json()?;
        fs::write(path, content).map_err(|e| ConfigError::io(path, e))?;
        Ok(())
    }

    /// Get the settings directory path (~/.tierline/)
    pub fn get_config_dir() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            home.join(".tierline")
        } else {
            PathBuf::from(".tierline")
        }
    }
}

impl Config {
    /// Load configuration from default location
    pub fn load() -> Result<Config, ConfigError> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            return Ok(Config::default());
        }

        ConfigLoader::load_from_path(config_path)
    }

    /// Save configuration to default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(Self::get_config_path())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::io(path, e))?;
        Ok(())
    }

    /// Get the default config file path (~/.tierline/config.toml)
    pub fn get_config_path() -> PathBuf {
        ConfigLoader::get_config_dir().join("config.toml")
    }

    /// Initialize config directory and create default config
    pub fn init() -> Result<(), ConfigError> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            Config::default().save_to_path(&config_path)?;
            println!("Created config at {}", config_path.display());
        } else {
            println!("Config already exists at {}", config_path.display());
        }

        Ok(())
    }

    /// Validate configuration
    pub fn check(&self) -> Result<(), ConfigError> {
        if Currency::find(&self.currency).is_none() {
            return Err(ConfigError::UnknownCurrency(self.currency.clone()));
        }

        if self.decimals > 6 {
            return Err(ConfigError::InvalidDecimals(self.decimals));
        }

        Ok(())
    }

    /// Print configuration as TOML
    pub fn print(&self) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        println!("{}", content);
        Ok(())
    }

    /// Pricing configuration used when none is given on the command line
    pub fn initial_pricing(&self) -> Result<PricingConfig, ConfigError> {
        match &self.pricing_file {
            Some(path) => ConfigLoader::load_pricing(path),
            None => Ok(PricingConfig {
                currency: self.currency.clone(),
                ..PricingConfig::default()
            }),
        }
    }
}
