use super::calculator::calculate;
use super::{Curve, PricingConfig};

/// Holds the current configuration and the curve last computed from it.
///
/// The configuration is replaced wholesale on every edit; the cached curve is
/// dropped at the same time and recomputed on the next read.
#[derive(Debug, Clone, Default)]
pub struct PricingModel {
    config: PricingConfig,
    cached: Option<Curve>,
}

impl PricingModel {
    pub fn new(config: PricingConfig) -> Self {
        Self {
            config,
            cached: None,
        }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Swap in a new configuration
    pub fn replace(&mut self, config: PricingConfig) {
        self.config = config;
        self.cached = None;
    }

    /// Derive the next configuration from the current one
    pub fn update<F>(&mut self, edit: F)
    where
        F: FnOnce(&PricingConfig) -> PricingConfig,
    {
        let next = edit(&self.config);
        self.replace(next);
    }

    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    pub fn curve(&mut self) -> &Curve {
        let config = &self.config;
        self.cached.get_or_insert_with(|| calculate(config))
    }

    pub fn into_config(self) -> PricingConfig {
        self.config
    }
}
