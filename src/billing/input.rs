//! Normalization of raw user input before it reaches the calculator.
//!
//! Every numeric field has a paired slider range. Typed values may exceed the
//! slider range; the slider then just pins to its nearest end.

use super::{Multiplier, Tier};

/// Slider position that stands for an unlimited multiplier
pub const MULTIPLIER_SLIDER_MAX: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Slider position for a typed value
    pub fn position(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Move `value` by `steps` slider steps, staying inside the slider range
    pub fn nudge(&self, value: f64, steps: i32) -> f64 {
        (self.position(value) + self.step * steps as f64).clamp(self.min, self.max)
    }
}

pub const MRR_SLIDER: SliderRange = SliderRange::new(0.0, 5000.0, 10.0);
pub const DISCOUNT_SLIDER: SliderRange = SliderRange::new(0.0, 100.0, 1.0);

/// Editable tier columns, in table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierField {
    Sequence,
    Units,
    Price,
    UnitPrice,
    FreeUnits,
    Multiplier,
}

impl TierField {
    pub const ALL: [TierField; 6] = [
        TierField::Sequence,
        TierField::Units,
        TierField::Price,
        TierField::UnitPrice,
        TierField::FreeUnits,
        TierField::Multiplier,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TierField::Sequence => "Seq",
            TierField::Units => "Units",
            TierField::Price => "Price",
            TierField::UnitPrice => "Unit Price",
            TierField::FreeUnits => "Free Units",
            TierField::Multiplier => "Multiplier",
        }
    }

    /// Slider bound to a numeric field. Sequence has none, multiplier uses positions.
    pub fn slider(&self) -> Option<SliderRange> {
        match self {
            TierField::Units => Some(SliderRange::new(0.0, 2000.0, 10.0)),
            TierField::Price => Some(SliderRange::new(0.0, 500.0, 1.0)),
            TierField::UnitPrice => Some(SliderRange::new(0.0, 50.0, 0.5)),
            TierField::FreeUnits => Some(SliderRange::new(0.0, 500.0, 1.0)),
            TierField::Sequence | TierField::Multiplier => None,
        }
    }

    pub fn value(&self, tier: &Tier) -> f64 {
        match self {
            TierField::Sequence => tier.sequence as f64,
            TierField::Units => tier.units,
            TierField::Price => tier.price,
            TierField::UnitPrice => tier.unit_price,
            TierField::FreeUnits => tier.free_units,
            TierField::Multiplier => tier.multiplier.display_repetitions() as f64,
        }
    }

    pub fn display(&self, tier: &Tier) -> String {
        match self {
            TierField::Multiplier => tier.multiplier.to_string(),
            TierField::Sequence => tier.sequence.to_string(),
            _ => format!("{}", self.value(tier)),
        }
    }
}

/// Parse a typed amount. Empty, non-numeric and negative input becomes 0.
pub fn parse_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// Parse a typed discount percentage into 0..=100
pub fn parse_discount(raw: &str) -> f64 {
    parse_amount(raw).min(100.0)
}

/// Parse a typed multiplier. Anything unrecognized becomes a single repetition.
pub fn parse_multiplier(raw: &str) -> Multiplier {
    let value = raw.trim().to_lowercase();
    if matches!(value.as_str(), "∞" | "inf" | "infinity") {
        return Multiplier::Unlimited;
    }

    // Leading integer, like "3x" or "12.5"
    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u32>() {
        Ok(n) if n >= 1 => Multiplier::Finite(n),
        _ => Multiplier::Finite(1),
    }
}

/// Slider position for a multiplier: 1..=9 for finite counts, 10 for unlimited
pub fn multiplier_slider_position(multiplier: Multiplier) -> u32 {
    match multiplier {
        Multiplier::Finite(n) => n.clamp(1, MULTIPLIER_SLIDER_MAX - 1),
        Multiplier::Unlimited => MULTIPLIER_SLIDER_MAX,
    }
}

pub fn multiplier_from_slider(position: u32) -> Multiplier {
    if position >= MULTIPLIER_SLIDER_MAX {
        Multiplier::Unlimited
    } else {
        Multiplier::Finite(position.max(1))
    }
}

/// Move a multiplier along its slider
pub fn nudge_multiplier(multiplier: Multiplier, steps: i32) -> Multiplier {
    let position = multiplier_slider_position(multiplier) as i64 + steps as i64;
    multiplier_from_slider(position.clamp(1, MULTIPLIER_SLIDER_MAX as i64) as u32)
}
