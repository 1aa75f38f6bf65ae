pub mod defaults;
pub mod error;
pub mod loader;
pub mod types;

pub use defaults::DEFAULT_CONFIG;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::*;
