use crate::billing::calculator::evaluation_order;
use crate::billing::input::{nudge_multiplier, TierField};
use crate::billing::PricingConfig;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

/// Tier editor: a table with one selected cell.
///
/// Rows are listed in evaluation order, so `selected_row` is a display
/// position; edits go through [`TierTableComponent::selected_index`].
#[derive(Debug, Default)]
pub struct TierTableComponent {
    selected_row: usize,
    selected_field: usize,
}

impl TierTableComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    pub fn selected_field(&self) -> TierField {
        TierField::ALL[self.selected_field]
    }

    pub fn move_row(&mut self, delta: i32, tier_count: usize) {
        if tier_count == 0 {
            self.selected_row = 0;
            return;
        }

        self.selected_row = (self.selected_row as i32 + delta)
            .max(0)
            .min(tier_count as i32 - 1) as usize;
    }

    pub fn move_field(&mut self, delta: i32) {
        self.selected_field = (self.selected_field as i32 + delta)
            .max(0)
            .min(TierField::ALL.len() as i32 - 1) as usize;
    }

    pub fn select_row(&mut self, row: usize, tier_count: usize) {
        self.selected_row = row.min(tier_count.saturating_sub(1));
    }

    /// Array index of the tier under the cursor
    pub fn selected_index(&self, config: &PricingConfig) -> Option<usize> {
        evaluation_order(&config.tiers).get(self.selected_row).copied()
    }

    /// Put the cursor on the row showing the tier at `index`
    pub fn select_index(&mut self, index: usize, config: &PricingConfig) {
        if let Some(row) = evaluation_order(&config.tiers)
            .iter()
            .position(|&i| i == index)
        {
            self.selected_row = row;
        }
    }

    /// Move the selected cell's slider by `steps`
    pub fn adjust(&self, config: &PricingConfig, steps: i32) -> PricingConfig {
        let Some(index) = self.selected_index(config) else {
            return config.clone();
        };
        let tier = &config.tiers[index];

        match self.selected_field() {
            TierField::Multiplier => {
                config.with_multiplier(index, nudge_multiplier(tier.multiplier, steps))
            }
            TierField::Sequence => {
                let sequence = (tier.sequence as i64 + steps as i64).max(0);
                config.with_tier_field(index, TierField::Sequence, sequence as f64)
            }
            field => match field.slider() {
                Some(slider) => {
                    config.with_tier_field(index, field, slider.nudge(field.value(tier), steps))
                }
                None => config.clone(),
            },
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, config: &PricingConfig) {
        let header = Row::new(TierField::ALL.iter().map(|field| Cell::from(field.label())))
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );

        let rows: Vec<Row> = evaluation_order(&config.tiers)
            .into_iter()
            .map(|index| &config.tiers[index])
            .enumerate()
            .map(|(row, tier)| {
                let cells = TierField::ALL.iter().enumerate().map(|(col, field)| {
                    let cell = Cell::from(field.display(tier));
                    if row == self.selected_row && col == self.selected_field {
                        cell.style(Style::default().fg(Color::Black).bg(Color::Cyan))
                    } else if row == self.selected_row {
                        cell.style(Style::default().fg(Color::Cyan))
                    } else {
                        cell
                    }
                });
                Row::new(cells)
            })
            .collect();

        let widths = [Constraint::Length(12); 6];
        let table = Table::new(rows, widths).header(header).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Pricing Tier Configuration"),
        );

        f.render_widget(table, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::Multiplier;

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut table = TierTableComponent::new();
        table.move_row(-1, 3);
        assert_eq!(table.selected_row(), 0);
        table.move_row(10, 3);
        assert_eq!(table.selected_row(), 2);

        table.move_field(-2);
        assert_eq!(table.selected_field(), TierField::Sequence);
        table.move_field(20);
        assert_eq!(table.selected_field(), TierField::Multiplier);

        table.select_row(5, 2);
        assert_eq!(table.selected_row(), 1);
    }

    #[test]
    fn test_adjust_uses_slider_step() {
        let mut table = TierTableComponent::new();
        table.move_field(3); // Unit Price
        let config = table.adjust(&PricingConfig::default(), 2);
        assert_eq!(config.tiers[0].unit_price, 11.0);

        table.move_field(-2); // Units
        let config = table.adjust(&config, -1);
        assert_eq!(config.tiers[0].units, 90.0);
    }

    #[test]
    fn test_adjust_multiplier_to_unlimited_and_back() {
        let mut table = TierTableComponent::new();
        table.move_field(5);
        table.move_row(1, 3);

        let config = table.adjust(&PricingConfig::default(), 8);
        assert_eq!(config.tiers[1].multiplier, Multiplier::Unlimited);

        let config = table.adjust(&config, -1);
        assert_eq!(config.tiers[1].multiplier, Multiplier::Finite(9));
    }

    #[test]
    fn test_rows_follow_sequence_order() {
        let mut config = PricingConfig::default();
        config.tiers.swap(0, 2);

        let mut table = TierTableComponent::new();
        assert_eq!(table.selected_index(&config), Some(2));

        table.move_field(3); // Unit Price
        let adjusted = table.adjust(&config, 2);
        assert_eq!(adjusted.tiers[2].unit_price, 11.0);
        assert_eq!(adjusted.tiers[0].unit_price, 3.0);

        table.select_index(0, &config);
        assert_eq!(table.selected_row(), 2);
    }

    #[test]
    fn test_adjust_without_tiers_is_noop() {
        let table = TierTableComponent::new();
        let empty = PricingConfig {
            tiers: Vec::new(),
            ..PricingConfig::default()
        };
        assert_eq!(table.adjust(&empty, 1), empty);
    }
}
