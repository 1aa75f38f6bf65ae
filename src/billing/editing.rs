use super::input::{TierField, DISCOUNT_SLIDER};
use super::{Multiplier, PricingConfig, Tier};

impl PricingConfig {
    /// Append a tier after the highest sequence
    pub fn with_tier_added(&self) -> PricingConfig {
        let next_sequence = self.tiers.iter().map(|t| t.sequence).max().unwrap_or(0) + 1;
        let mut next = self.clone();
        next.tiers.push(Tier::new(
            next_sequence,
            100.0,
            0.0,
            5.0,
            0.0,
            Multiplier::Finite(1),
        ));
        next
    }

    /// Remove the tier at `index`. The last remaining tier is never removed.
    pub fn with_tier_removed(&self, index: usize) -> PricingConfig {
        let mut next = self.clone();
        if next.tiers.len() > 1 && index < next.tiers.len() {
            next.tiers.remove(index);
        }
        next
    }

    /// Set one numeric column of a tier. Negative values are stored as 0.
    pub fn with_tier_field(&self, index: usize, field: TierField, value: f64) -> PricingConfig {
        let mut next = self.clone();
        let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
        if let Some(tier) = next.tiers.get_mut(index) {
            match field {
                TierField::Sequence => tier.sequence = value as u32,
                TierField::Units => tier.units = value,
                TierField::Price => tier.price = value,
                TierField::UnitPrice => tier.unit_price = value,
                TierField::FreeUnits => tier.free_units = value,
                TierField::Multiplier => {
                    tier.multiplier = Multiplier::Finite((value as u32).max(1))
                }
            }
        }
        next
    }

    /// Set a tier's multiplier. `Finite(0)` is stored as a single repetition.
    pub fn with_multiplier(&self, index: usize, multiplier: Multiplier) -> PricingConfig {
        let mut next = self.clone();
        if let Some(tier) = next.tiers.get_mut(index) {
            tier.multiplier = multiplier.normalized();
        }
        next
    }

    pub fn with_mrr(&self, mrr: f64) -> PricingConfig {
        PricingConfig {
            mrr: if mrr.is_finite() { mrr.max(0.0) } else { 0.0 },
            ..self.clone()
        }
    }

    pub fn with_discount(&self, discount: f64) -> PricingConfig {
        let discount = if discount.is_finite() { discount } else { 0.0 };
        PricingConfig {
            discount: discount.clamp(DISCOUNT_SLIDER.min, DISCOUNT_SLIDER.max),
            ..self.clone()
        }
    }

    pub fn with_currency(&self, code: &str) -> PricingConfig {
        PricingConfig {
            currency: code.trim().to_uppercase(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_added_tier_follows_highest_sequence() {
        let config = PricingConfig::default().with_tier_added();
        let added = config.tiers.last().unwrap();

        assert_eq!(config.tiers.len(), 4);
        assert_eq!(added.sequence, 4);
        assert_eq!(added.units, 100.0);
        assert_eq!(added.unit_price, 5.0);
        assert_eq!(added.multiplier, Multiplier::Finite(1));
    }

    #[test]
    fn test_last_tier_cannot_be_removed() {
        let config = PricingConfig::default()
            .with_tier_removed(0)
            .with_tier_removed(0)
            .with_tier_removed(0);

        assert_eq!(config.tiers.len(), 1);
        assert_eq!(config.tiers[0].sequence, 3);
    }

    #[test]
    fn test_edits_leave_original_untouched() {
        let original = PricingConfig::default();
        let edited = original.with_tier_field(0, TierField::UnitPrice, 25.0);

        assert_eq!(original.tiers[0].unit_price, 10.0);
        assert_eq!(edited.tiers[0].unit_price, 25.0);
    }

    #[test]
    fn test_field_values_are_normalized() {
        let config = PricingConfig::default()
            .with_tier_field(1, TierField::Price, -3.0)
            .with_tier_field(5, TierField::Units, 10.0)
            .with_discount(140.0)
            .with_mrr(-1.0)
            .with_currency("eur");

        assert_eq!(config.tiers[1].price, 0.0);
        assert_eq!(config.discount, 100.0);
        assert_eq!(config.mrr, 0.0);
        assert_eq!(config.currency, "EUR");
    }

    #[test]
    fn test_multiplier_edit() {
        let config = PricingConfig::default().with_multiplier(0, Multiplier::Unlimited);
        assert!(config.tiers[0].multiplier.is_unlimited());
    }

    #[test]
    fn test_zero_multiplier_is_stored_as_one() {
        let config = PricingConfig::default().with_multiplier(1, Multiplier::Finite(0));
        assert_eq!(config.tiers[1].multiplier, Multiplier::Finite(1));

        let parsed = PricingConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
