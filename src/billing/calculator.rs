use crate::billing::{Curve, CurvePoint, PricingConfig, Tier};
use crate::debug_println;

/// Raw cost at one consumption level, before floor and discount
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub units: f64,
    pub cost: f64,
    /// Slope of the raw cost curve on the segment ending here
    pub rate: f64,
}

/// Calculate the cumulative, average and marginal cost curves for a configuration
pub fn calculate(config: &PricingConfig) -> Curve {
    let breakpoints = accumulate_breakpoints(&config.tiers);
    let curve = apply_floor_and_discount(&breakpoints, config.mrr, config.discount);

    debug_println!(
        "calculate: {} tiers -> {} breakpoints (mrr {}, discount {}%)",
        config.tiers.len(),
        curve.len(),
        config.mrr,
        config.discount
    );

    curve
}

/// Array indices of `tiers` in evaluation order. Stable, so equal sequences keep their array order.
pub fn evaluation_order(tiers: &[Tier]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..tiers.len()).collect();
    order.sort_by_key(|&index| tiers[index].sequence);
    order
}

/// Tiers in evaluation order
pub fn ordered_tiers(tiers: &[Tier]) -> Vec<&Tier> {
    evaluation_order(tiers)
        .into_iter()
        .map(|index| &tiers[index])
        .collect()
}

/// Walk every rendered repetition and emit the consumption levels where the slope changes
pub fn accumulate_breakpoints(tiers: &[Tier]) -> Vec<Breakpoint> {
    let mut points = vec![Breakpoint {
        units: 0.0,
        cost: 0.0,
        rate: 0.0,
    }];
    let mut offset = 0.0;
    let mut cost = 0.0;

    for tier in ordered_tiers(tiers) {
        // NaN-safe: anything not strictly positive is skipped
        if !(tier.units > 0.0) {
            debug_println!("skipping tier {}: no units", tier.sequence);
            continue;
        }

        let units = tier.units;
        let free = tier.free_units.max(0.0).min(units);
        let price = tier.price.max(0.0);
        let unit_price = tier.unit_price.max(0.0);
        let billable = units - free;
        let rate = if billable > 0.0 { unit_price } else { 0.0 };

        // The start of every repetition is the previous repetition's end (or 0)
        for _ in 0..tier.multiplier.display_repetitions() {
            if free > 0.0 && free < units {
                push_breakpoint(&mut points, offset + free, cost + price, 0.0);
            }

            cost += price + billable * unit_price;
            offset += units;
            push_breakpoint(&mut points, offset, cost, rate);
        }

        if tier.multiplier.is_unlimited() {
            // Nothing after an unlimited tier is reachable
            break;
        }
    }

    points
}

fn push_breakpoint(points: &mut Vec<Breakpoint>, units: f64, cost: f64, rate: f64) {
    match points.last_mut() {
        Some(last) if units <= last.units => {
            last.cost = last.cost.max(cost);
            last.rate = rate;
        }
        _ => points.push(Breakpoint { units, cost, rate }),
    }
}

/// Apply the revenue floor, then the discount, and derive average and marginal series
pub fn apply_floor_and_discount(breakpoints: &[Breakpoint], mrr: f64, discount: f64) -> Curve {
    let mrr = mrr.max(0.0);
    let factor = 1.0 - discount.clamp(0.0, 100.0) / 100.0;
    let mut curve = Curve::default();

    for point in breakpoints {
        let cumulative = point.cost.max(mrr) * factor;
        let current = if point.cost <= mrr {
            0.0
        } else {
            point.rate * factor
        };
        let average = if point.units > 0.0 {
            Some(cumulative / point.units)
        } else {
            None
        };

        curve.push(CurvePoint {
            units: point.units,
            cumulative,
            average,
            current,
        });
    }

    curve
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::Multiplier;

    fn tier(seq: u32, units: f64, price: f64, unit_price: f64, free: f64, m: Multiplier) -> Tier {
        Tier::new(seq, units, price, unit_price, free, m)
    }

    fn config(tiers: Vec<Tier>) -> PricingConfig {
        PricingConfig {
            tiers,
            ..PricingConfig::default()
        }
    }

    #[test]
    fn test_repeated_tier_with_fixed_fee() {
        let tiers = vec![tier(1, 100.0, 10.0, 2.0, 0.0, Multiplier::Finite(3))];
        let curve = calculate(&config(tiers));

        assert_eq!(curve.labels, vec![0.0, 100.0, 200.0, 300.0]);
        assert_eq!(curve.cumulative, vec![0.0, 210.0, 420.0, 630.0]);
        assert_eq!(curve.current, vec![0.0, 2.0, 2.0, 2.0]);
        assert_eq!(curve.average[0], None);
        assert_eq!(curve.average[3], Some(2.1));
    }

    #[test]
    fn test_default_tier_breakpoints() {
        let curve = calculate(&PricingConfig::default());

        assert_eq!(
            curve.labels,
            vec![0.0, 10.0, 100.0, 300.0, 500.0, 1000.0, 1500.0, 2000.0, 2500.0, 3000.0]
        );
        assert_eq!(curve.cumulative[1], 0.0);
        assert_eq!(curve.cumulative[2], 900.0);
        assert_eq!(curve.cumulative[3], 2350.0);
        assert_eq!(curve.cumulative[4], 3800.0);
        assert_eq!(curve.cumulative[9], 11300.0);
        assert_eq!(curve.current[1], 0.0);
        assert_eq!(curve.current[2], 10.0);
        assert_eq!(curve.current[4], 7.0);
        assert_eq!(curve.current[9], 3.0);
    }

    #[test]
    fn test_free_units_span_carries_fee_but_no_rate() {
        let points = accumulate_breakpoints(&[
            tier(1, 100.0, 5.0, 1.0, 40.0, Multiplier::Finite(2)),
        ]);

        assert_eq!(
            points,
            vec![
                Breakpoint { units: 0.0, cost: 0.0, rate: 0.0 },
                Breakpoint { units: 40.0, cost: 5.0, rate: 0.0 },
                Breakpoint { units: 100.0, cost: 65.0, rate: 1.0 },
                Breakpoint { units: 140.0, cost: 70.0, rate: 0.0 },
                Breakpoint { units: 200.0, cost: 130.0, rate: 1.0 },
            ]
        );
    }

    #[test]
    fn test_fully_free_repetition_is_deduplicated() {
        let points = accumulate_breakpoints(&[
            tier(1, 50.0, 0.0, 4.0, 50.0, Multiplier::Finite(2)),
        ]);

        let labels: Vec<f64> = points.iter().map(|p| p.units).collect();
        assert_eq!(labels, vec![0.0, 50.0, 100.0]);
        assert!(points.iter().all(|p| p.cost == 0.0 && p.rate == 0.0));
    }

    #[test]
    fn test_tiers_walked_in_sequence_order() {
        let shuffled = config(vec![
            tier(2, 200.0, 0.0, 1.0, 0.0, Multiplier::Finite(1)),
            tier(1, 100.0, 0.0, 5.0, 0.0, Multiplier::Finite(1)),
        ]);
        let curve = calculate(&shuffled);

        assert_eq!(curve.labels, vec![0.0, 100.0, 300.0]);
        assert_eq!(curve.cumulative, vec![0.0, 500.0, 700.0]);
        assert_eq!(curve.current, vec![0.0, 5.0, 1.0]);
    }

    #[test]
    fn test_evaluation_order_is_stable() {
        let tiers = vec![
            tier(3, 10.0, 0.0, 1.0, 0.0, Multiplier::Finite(1)),
            tier(1, 10.0, 0.0, 1.0, 0.0, Multiplier::Finite(1)),
            tier(3, 20.0, 0.0, 1.0, 0.0, Multiplier::Finite(1)),
        ];

        assert_eq!(evaluation_order(&tiers), vec![1, 0, 2]);
        let units: Vec<f64> = ordered_tiers(&tiers).iter().map(|t| t.units).collect();
        assert_eq!(units, vec![10.0, 10.0, 20.0]);
    }

    #[test]
    fn test_unlimited_first_tier_hides_later_tiers() {
        let curve = calculate(&config(vec![
            tier(1, 100.0, 0.0, 10.0, 10.0, Multiplier::Unlimited),
            tier(2, 200.0, 50.0, 7.0, 0.0, Multiplier::Finite(2)),
        ]));

        let last = curve.last().unwrap();
        assert_eq!(last.units, 500.0);
        assert_eq!(last.current, 10.0);
        assert!(curve.labels.iter().all(|&units| units <= 500.0));
    }

    #[test]
    fn test_zero_unit_tiers_are_skipped() {
        let curve = calculate(&config(vec![
            tier(1, 0.0, 100.0, 1.0, 0.0, Multiplier::Finite(3)),
            tier(2, 10.0, 0.0, 1.0, 0.0, Multiplier::Finite(1)),
        ]));

        assert_eq!(curve.labels, vec![0.0, 10.0]);
        assert_eq!(curve.cumulative, vec![0.0, 10.0]);
    }

    #[test]
    fn test_no_tiers_yields_floor_only() {
        let curve = calculate(&PricingConfig {
            tiers: Vec::new(),
            mrr: 250.0,
            ..PricingConfig::default()
        });

        assert_eq!(curve.labels, vec![0.0]);
        assert_eq!(curve.cumulative, vec![250.0]);
        assert_eq!(curve.average, vec![None]);
        assert_eq!(curve.current, vec![0.0]);
    }

    #[test]
    fn test_floor_suppresses_marginal_rate() {
        let breakpoints = accumulate_breakpoints(&[
            tier(1, 100.0, 0.0, 1.0, 0.0, Multiplier::Finite(3)),
        ]);
        let curve = apply_floor_and_discount(&breakpoints, 200.0, 0.0);

        assert_eq!(curve.cumulative, vec![200.0, 200.0, 200.0, 300.0]);
        assert_eq!(curve.current, vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_discount_applies_after_floor() {
        let breakpoints = accumulate_breakpoints(&[
            tier(1, 100.0, 0.0, 4.0, 0.0, Multiplier::Finite(2)),
        ]);
        let curve = apply_floor_and_discount(&breakpoints, 100.0, 25.0);

        assert_eq!(curve.cumulative, vec![75.0, 300.0, 600.0]);
        assert_eq!(curve.current, vec![0.0, 3.0, 3.0]);
        assert_eq!(curve.average[2], Some(3.0));
    }

    #[test]
    fn test_discount_is_clamped() {
        let breakpoints = accumulate_breakpoints(&[
            tier(1, 10.0, 0.0, 1.0, 0.0, Multiplier::Finite(1)),
        ]);

        let over = apply_floor_and_discount(&breakpoints, 0.0, 150.0);
        assert_eq!(over.cumulative, vec![0.0, 0.0]);

        let under = apply_floor_and_discount(&breakpoints, 0.0, -20.0);
        assert_eq!(under.cumulative, vec![0.0, 10.0]);
    }
}
