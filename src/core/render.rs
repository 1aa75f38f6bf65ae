use crate::billing::currency::UNITS_AXIS_TITLE;
use crate::billing::{Currency, Curve};
use crate::config::OutputFormat;
use serde::Serialize;

pub trait CurveRenderer {
    fn render(&self, curve: &Curve, currency: Currency) -> String;
}

/// Pick the renderer for an output format
pub fn render_curve(
    format: OutputFormat,
    curve: &Curve,
    currency: Currency,
    decimals: usize,
) -> String {
    match format {
        OutputFormat::Table => TableRenderer::new(decimals).render(curve, currency),
        OutputFormat::Csv => CsvRenderer::new(decimals).render(curve, currency),
        OutputFormat::Json => JsonRenderer.render(curve, currency),
    }
}

fn round_to(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Aligned text table, one row per breakpoint
pub struct TableRenderer {
    decimals: usize,
}

impl TableRenderer {
    pub fn new(decimals: usize) -> Self {
        Self { decimals }
    }
}

impl CurveRenderer for TableRenderer {
    fn render(&self, curve: &Curve, currency: Currency) -> String {
        let headers = [
            UNITS_AXIS_TITLE.to_string(),
            currency.cumulative_axis_title(),
            format!("Average {}", currency.rate_axis_title()),
            format!("Marginal {}", currency.rate_axis_title()),
        ];

        let rows: Vec<[String; 4]> = curve
            .points()
            .map(|p| {
                [
                    format!("{}", round_to(p.units, self.decimals)),
                    currency.format_amount(p.cumulative, self.decimals),
                    p.average
                        .map(|avg| currency.format_amount(avg, self.decimals))
                        .unwrap_or_else(|| "-".to_string()),
                    currency.format_amount(p.current, self.decimals),
                ]
            })
            .collect();

        let mut widths = headers.clone().map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let format_row = |cells: &[String; 4]| {
            cells
                .iter()
                .zip(widths.iter())
                .map(|(cell, width)| {
                    let pad = width.saturating_sub(cell.chars().count());
                    format!("{}{}", " ".repeat(pad), cell)
                })
                .collect::<Vec<_>>()
                .join("  ")
        };

        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(format_row(&headers));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        lines.extend(rows.iter().map(format_row));
        lines.join("\n")
    }
}

/// `units,cumulative,average,current` with an empty average at zero units
pub struct CsvRenderer {
    decimals: usize,
}

impl CsvRenderer {
    pub fn new(decimals: usize) -> Self {
        Self { decimals }
    }
}

impl CurveRenderer for CsvRenderer {
    fn render(&self, curve: &Curve, _currency: Currency) -> String {
        let mut out = String::from("units,cumulative,average,current\n");
        for p in curve.points() {
            let average = p
                .average
                .map(|avg| format!("{:.*}", self.decimals, avg))
                .unwrap_or_default();
            out.push_str(&format!(
                "{},{:.*},{},{:.*}\n",
                p.units, self.decimals, p.cumulative, average, self.decimals, p.current
            ));
        }
        out
    }
}

/// The curve's four series as a JSON object, undefined averages as `null`
pub struct JsonRenderer;

#[derive(Serialize)]
struct ChartData<'a> {
    currency: &'a str,
    #[serde(flatten)]
    curve: &'a Curve,
}

impl CurveRenderer for JsonRenderer {
    fn render(&self, curve: &Curve, currency: Currency) -> String {
        let data = ChartData {
            currency: currency.code,
            curve,
        };
        serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::{calculate, Multiplier, PricingConfig, Tier};

    fn single_tier_curve() -> Curve {
        calculate(&PricingConfig {
            tiers: vec![Tier::new(1, 100.0, 10.0, 2.0, 0.0, Multiplier::Finite(3))],
            ..PricingConfig::default()
        })
    }

    #[test]
    fn test_table_uses_currency_titles() {
        let table = TableRenderer::new(2).render(&single_tier_curve(), Currency::from_code("EUR"));
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].contains("Number of Units"));
        assert!(lines[0].contains("Cumulative Price (€)"));
        assert!(lines[0].contains("Marginal Unit Price (€)"));
        assert_eq!(lines.len(), 2 + 4);
        assert!(lines[2].trim_end().ends_with("€0.00"));
        assert!(lines[2].contains(" - "));
        assert!(lines[5].contains("€630.00"));
    }

    #[test]
    fn test_csv_leaves_average_blank_at_zero() {
        let csv = CsvRenderer::new(2).render(&single_tier_curve(), Currency::default());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "units,cumulative,average,current");
        assert_eq!(lines[1], "0,0.00,,0.00");
        assert_eq!(lines[4], "300,630.00,2.10,2.00");
    }

    #[test]
    fn test_json_has_null_average() {
        let json = JsonRenderer.render(&single_tier_curve(), Currency::from_code("GBP"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["currency"], "GBP");
        assert!(value["average"][0].is_null());
        assert_eq!(value["labels"].as_array().unwrap().len(), 4);
        assert_eq!(value["cumulative"][3], 630.0);
    }

    #[test]
    fn test_render_curve_dispatch() {
        let curve = single_tier_curve();
        let csv = render_curve(OutputFormat::Csv, &curve, Currency::default(), 1);
        assert!(csv.starts_with("units,"));
        let json = render_curve(OutputFormat::Json, &curve, Currency::default(), 1);
        assert!(json.trim_start().starts_with('{'));
    }
}
