use crate::billing::currency::UNITS_AXIS_TITLE;
use crate::billing::{Currency, Curve};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Chart state owned by the app and handed a fresh curve after every edit
#[derive(Debug, Default)]
pub struct ChartView {
    cumulative: Vec<(f64, f64)>,
    average: Vec<(f64, f64)>,
    current: Vec<(f64, f64)>,
    max_units: f64,
    max_cumulative: f64,
    max_rate: f64,
}

impl ChartView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the plotted series from a curve
    pub fn update(&mut self, curve: &Curve) {
        self.cumulative = curve.points().map(|p| (p.units, p.cumulative)).collect();
        self.average = curve
            .points()
            .filter_map(|p| p.average.map(|avg| (p.units, avg)))
            .collect();
        self.current = stepped_series(curve);

        self.max_units = curve.labels.iter().copied().fold(0.0, f64::max);
        self.max_cumulative = curve.cumulative.iter().copied().fold(0.0, f64::max);
        self.max_rate = self
            .average
            .iter()
            .chain(self.current.iter())
            .map(|(_, y)| *y)
            .fold(0.0, f64::max);
    }

    pub fn render(&self, f: &mut Frame, area: Rect, currency: Currency) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let x_bound = self.max_units.max(1.0);

        let cumulative = Chart::new(vec![Dataset::default()
            .name("Total Cumulative Price")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Blue))
            .data(&self.cumulative)])
        .block(Block::default().borders(Borders::ALL).title("Pricing Chart"))
        .x_axis(units_axis(x_bound))
        .y_axis(value_axis(
            currency.cumulative_axis_title(),
            self.max_cumulative,
        ));
        f.render_widget(cumulative, chunks[0]);

        let rates = Chart::new(vec![
            Dataset::default()
                .name("Average Unit Price")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Green))
                .data(&self.average),
            Dataset::default()
                .name("Current Price (Marginal)")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Red))
                .data(&self.current),
        ])
        .block(Block::default().borders(Borders::ALL))
        .x_axis(units_axis(x_bound))
        .y_axis(value_axis(currency.rate_axis_title(), self.max_rate));
        f.render_widget(rates, chunks[1]);
    }
}

fn units_axis<'a>(max_units: f64) -> Axis<'a> {
    Axis::default()
        .title(UNITS_AXIS_TITLE)
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, max_units])
        .labels(vec![
            "0".to_string(),
            format!("{:.0}", max_units / 2.0),
            format!("{:.0}", max_units),
        ])
}

fn value_axis<'a>(title: String, max_value: f64) -> Axis<'a> {
    let upper = if max_value > 0.0 { max_value * 1.05 } else { 1.0 };
    Axis::default()
        .title(title)
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, upper])
        .labels(vec![
            "0".to_string(),
            format!("{:.2}", upper / 2.0),
            format!("{:.2}", upper),
        ])
}

/// Marginal rate drawn as a step: each breakpoint's rate covers the segment ending there
fn stepped_series(curve: &Curve) -> Vec<(f64, f64)> {
    let mut series = Vec::with_capacity(curve.len() * 2);
    let mut previous_units = None;

    for point in curve.points() {
        match previous_units {
            Some(start) => {
                series.push((start, point.current));
                series.push((point.units, point.current));
            }
            None => series.push((point.units, point.current)),
        }
        previous_units = Some(point.units);
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::{calculate, PricingConfig};

    #[test]
    fn test_stepped_series_covers_segments() {
        let curve = calculate(&PricingConfig::default());
        let series = stepped_series(&curve);

        assert_eq!(series.len(), 1 + 2 * (curve.len() - 1));
        assert_eq!(series[0], (0.0, 0.0));
        // 10..100 billed at 10
        assert_eq!(series[3], (10.0, 10.0));
        assert_eq!(series[4], (100.0, 10.0));
        assert_eq!(series.last(), Some(&(3000.0, 3.0)));
    }

    #[test]
    fn test_update_skips_undefined_average() {
        let mut view = ChartView::new();
        view.update(&calculate(&PricingConfig::default()));

        assert_eq!(view.cumulative.len(), 10);
        assert_eq!(view.average.len(), 9);
        assert_eq!(view.max_units, 3000.0);
        assert_eq!(view.max_cumulative, 11300.0);
        assert_eq!(view.max_rate, 10.0);
    }
}
