pub mod app;
pub mod components;

pub use app::run_configurator;
