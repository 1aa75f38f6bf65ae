use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Repetitions rendered for an unlimited tier. Display cutoff only, the tier itself never ends.
pub const UNLIMITED_DISPLAY_REPETITIONS: u32 = 5;

/// How many times a tier's unit block is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplier {
    Finite(u32),
    Unlimited,
}

impl Default for Multiplier {
    fn default() -> Self {
        Multiplier::Finite(1)
    }
}

impl Multiplier {
    /// Billed repetition count, `None` when the tier repeats indefinitely
    pub fn repetitions(&self) -> Option<u32> {
        match self {
            Multiplier::Finite(n) => Some((*n).max(1)),
            Multiplier::Unlimited => None,
        }
    }

    /// Repetitions drawn on the chart
    pub fn display_repetitions(&self) -> u32 {
        self.repetitions().unwrap_or(UNLIMITED_DISPLAY_REPETITIONS)
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Multiplier::Unlimited)
    }

    /// Finite counts below one stand for a single repetition
    pub fn normalized(self) -> Self {
        match self {
            Multiplier::Finite(n) => Multiplier::Finite(n.max(1)),
            Multiplier::Unlimited => Multiplier::Unlimited,
        }
    }
}

impl std::fmt::Display for Multiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Multiplier::Finite(n) => write!(f, "{}", n),
            Multiplier::Unlimited => write!(f, "∞"),
        }
    }
}

impl Serialize for Multiplier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Multiplier::Finite(n) => serializer.serialize_u32(*n),
            Multiplier::Unlimited => serializer.serialize_str("infinity"),
        }
    }
}

/// Shapes a multiplier can take in imported JSON
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMultiplier {
    Count(f64),
    Label(String),
    Missing,
}

impl<'de> Deserialize<'de> for Multiplier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawMultiplier::deserialize(deserializer)? {
            RawMultiplier::Count(n) if n >= 1.0 => {
                Ok(Multiplier::Finite(n.min(u32::MAX as f64) as u32))
            }
            RawMultiplier::Count(_) | RawMultiplier::Missing => Ok(Multiplier::Finite(1)),
            RawMultiplier::Label(label) => {
                let trimmed = label.trim().to_lowercase();
                match trimmed.as_str() {
                    "infinity" | "inf" | "∞" => Ok(Multiplier::Unlimited),
                    _ => trimmed
                        .parse::<u32>()
                        .map(|n| Multiplier::Finite(n.max(1)))
                        .map_err(|_| {
                            serde::de::Error::custom(format!("invalid multiplier: {:?}", label))
                        }),
                }
            }
        }
    }
}

/// One pricing band, applied `multiplier` times
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub sequence: u32,
    pub units: f64,
    /// Fixed fee per repetition
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub unit_price: f64,
    /// Leading units of each repetition not billed at `unit_price`
    #[serde(default)]
    pub free_units: f64,
    #[serde(default)]
    pub multiplier: Multiplier,
}

impl Tier {
    pub fn new(
        sequence: u32,
        units: f64,
        price: f64,
        unit_price: f64,
        free_units: f64,
        multiplier: Multiplier,
    ) -> Self {
        Self {
            sequence,
            units,
            price,
            unit_price,
            free_units,
            multiplier,
        }
    }
}

/// The tier schedule plus floor and discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub mrr: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default = "default_tiers", deserialize_with = "tiers_or_default")]
    pub tiers: Vec<Tier>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Tiers shown on first start
pub fn default_tiers() -> Vec<Tier> {
    vec![
        Tier::new(1, 100.0, 0.0, 10.0, 10.0, Multiplier::Finite(1)),
        Tier::new(2, 200.0, 50.0, 7.0, 0.0, Multiplier::Finite(2)),
        Tier::new(3, 500.0, 0.0, 3.0, 0.0, Multiplier::Unlimited),
    ]
}

/// `null` reads like a missing field; an explicit empty list stays empty
fn tiers_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Tier>, D::Error> {
    Ok(Option::<Vec<Tier>>::deserialize(deserializer)?.unwrap_or_else(default_tiers))
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            mrr: 0.0,
            discount: 0.0,
            tiers: default_tiers(),
        }
    }
}

impl PricingConfig {
    /// Multiplicative factor left after the discount
    pub fn discount_factor(&self) -> f64 {
        1.0 - self.discount.clamp(0.0, 100.0) / 100.0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}

/// Aligned cost series sampled at every breakpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Curve {
    pub labels: Vec<f64>,
    pub cumulative: Vec<f64>,
    pub average: Vec<Option<f64>>,
    pub current: Vec<f64>,
}

/// A single row of a [`Curve`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub units: f64,
    pub cumulative: f64,
    pub average: Option<f64>,
    pub current: f64,
}

impl Curve {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<CurvePoint> {
        Some(CurvePoint {
            units: *self.labels.get(index)?,
            cumulative: *self.cumulative.get(index)?,
            average: *self.average.get(index)?,
            current: *self.current.get(index)?,
        })
    }

    pub fn points(&self) -> impl Iterator<Item = CurvePoint> + '_ {
        (0..self.len()).filter_map(|i| self.point(i))
    }

    pub fn last(&self) -> Option<CurvePoint> {
        self.len().checked_sub(1).and_then(|i| self.point(i))
    }

    pub(crate) fn push(&mut self, point: CurvePoint) {
        self.labels.push(point.units);
        self.cumulative.push(point.cumulative);
        self.average.push(point.average);
        self.current.push(point.current);
    }
}
