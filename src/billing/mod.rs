pub mod calculator;
pub mod currency;
pub mod editing;
pub mod input;
pub mod model;
pub mod types;

pub use calculator::calculate;
pub use currency::{Currency, CURRENCIES};
pub use model::PricingModel;
pub use types::{
    default_tiers, Curve, CurvePoint, Multiplier, PricingConfig, Tier,
    UNLIMITED_DISPLAY_REPETITIONS,
};
