use super::components::{ChartView, TierTableComponent};
use crate::billing::input::{
    parse_amount, parse_discount, parse_multiplier, TierField, DISCOUNT_SLIDER, MRR_SLIDER,
};
use crate::billing::{Currency, PricingConfig, PricingModel};
use crate::config::ConfigLoader;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    DefaultTerminal, Frame,
};
use std::io;

const EXPORT_FILE_NAME: &str = "pricing-config.json";

const HELP_TEXT: &str = "↑/↓/←/→: Select  +/-: Adjust  Enter: Type value  \
    a/d: Add/Remove tier  m/M: MRR  [/]: Discount  r/p: Type MRR/Discount  \
    c: Currency  e: Export  q: Quit";

/// Where a typed value is committed
#[derive(Debug, Clone, Copy, PartialEq)]
enum EntryTarget {
    Tier(usize, TierField),
    Mrr,
    Discount,
}

impl EntryTarget {
    fn label(&self) -> &'static str {
        match self {
            EntryTarget::Tier(_, field) => field.label(),
            EntryTarget::Mrr => "MRR",
            EntryTarget::Discount => "Discount (%)",
        }
    }
}

/// Text typed into a field, applied on Enter
#[derive(Debug, Clone, PartialEq)]
struct Entry {
    target: EntryTarget,
    buffer: String,
}

/// Run the interactive tier editor and return the configuration it ends with
pub fn run_configurator(
    pricing: PricingConfig,
    decimals: usize,
) -> Result<PricingConfig, Box<dyn std::error::Error>> {
    let mut terminal = ratatui::try_init()?;
    let result = App::new(pricing, decimals).run(&mut terminal);
    ratatui::restore();
    Ok(result?)
}

pub struct App {
    model: PricingModel,
    table: TierTableComponent,
    chart: ChartView,
    decimals: usize,
    entry: Option<Entry>,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(pricing: PricingConfig, decimals: usize) -> Self {
        let mut app = Self {
            model: PricingModel::new(pricing),
            table: TierTableComponent::new(),
            chart: ChartView::new(),
            decimals,
            entry: None,
            status: None,
            should_quit: false,
        };
        app.refresh_chart();
        app
    }

    pub fn config(&self) -> &PricingConfig {
        self.model.config()
    }

    fn run(mut self, terminal: &mut DefaultTerminal) -> io::Result<PricingConfig> {
        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }

        Ok(self.model.into_config())
    }

    /// Apply one key press. Every edit replaces the configuration and redraws the chart.
    pub fn handle_key(&mut self, code: KeyCode) {
        if self.entry.is_some() {
            self.handle_entry_key(code);
            return;
        }

        let tier_count = self.config().tiers.len();
        self.status = None;

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.table.move_row(-1, tier_count),
            KeyCode::Down | KeyCode::Char('j') => self.table.move_row(1, tier_count),
            KeyCode::Left | KeyCode::Char('h') => self.table.move_field(-1),
            KeyCode::Right | KeyCode::Char('l') => self.table.move_field(1),
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_selected(1),
            KeyCode::Char('-') => self.adjust_selected(-1),
            KeyCode::Enter => {
                if let Some(index) = self.table.selected_index(self.config()) {
                    self.open_entry(EntryTarget::Tier(index, self.table.selected_field()));
                }
            }
            KeyCode::Char('r') => self.open_entry(EntryTarget::Mrr),
            KeyCode::Char('p') => self.open_entry(EntryTarget::Discount),
            KeyCode::Char('a') => {
                self.edit(|c| c.with_tier_added());
                let count = self.config().tiers.len();
                self.table.select_row(count - 1, count);
            }
            KeyCode::Char('d') => {
                if tier_count <= 1 {
                    self.status = Some("At least one tier is required".to_string());
                } else if let Some(index) = self.table.selected_index(self.config()) {
                    let row = self.table.selected_row();
                    self.edit(|c| c.with_tier_removed(index));
                    self.table.select_row(row, tier_count - 1);
                }
            }
            KeyCode::Char('M') => self.edit(|c| c.with_mrr(MRR_SLIDER.nudge(c.mrr, 1))),
            KeyCode::Char('m') => self.edit(|c| c.with_mrr(MRR_SLIDER.nudge(c.mrr, -1))),
            KeyCode::Char(']') => {
                self.edit(|c| c.with_discount(DISCOUNT_SLIDER.nudge(c.discount, 1)))
            }
            KeyCode::Char('[') => {
                self.edit(|c| c.with_discount(DISCOUNT_SLIDER.nudge(c.discount, -1)))
            }
            KeyCode::Char('c') => self.edit(|c| {
                let next = Currency::from_code(&c.currency).next();
                c.with_currency(next.code)
            }),
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
    }

    fn open_entry(&mut self, target: EntryTarget) {
        self.entry = Some(Entry {
            target,
            buffer: String::new(),
        });
    }

    fn handle_entry_key(&mut self, code: KeyCode) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        match code {
            KeyCode::Char(c) => entry.buffer.push(c),
            KeyCode::Backspace => {
                entry.buffer.pop();
            }
            KeyCode::Esc => self.entry = None,
            KeyCode::Enter => {
                if let Some(entry) = self.entry.take() {
                    self.commit_entry(entry);
                }
            }
            _ => {}
        }
    }

    /// Normalize typed text the same way imported values are, then apply it
    fn commit_entry(&mut self, entry: Entry) {
        let raw = entry.buffer.as_str();
        match entry.target {
            EntryTarget::Tier(index, TierField::Multiplier) => {
                let multiplier = parse_multiplier(raw);
                self.edit(|c| c.with_multiplier(index, multiplier));
            }
            EntryTarget::Tier(index, field) => {
                let value = parse_amount(raw);
                self.edit(|c| c.with_tier_field(index, field, value));
            }
            EntryTarget::Mrr => {
                let mrr = parse_amount(raw);
                self.edit(|c| c.with_mrr(mrr));
            }
            EntryTarget::Discount => {
                let discount = parse_discount(raw);
                self.edit(|c| c.with_discount(discount));
            }
        }

        if let EntryTarget::Tier(index, _) = entry.target {
            self.table.select_index(index, self.model.config());
        }
    }

    /// Nudge the selected cell, keeping the cursor on the same tier if it moves
    fn adjust_selected(&mut self, steps: i32) {
        let index = self.table.selected_index(self.config());
        let table = &self.table;
        self.model.update(|c| table.adjust(c, steps));
        self.refresh_chart();

        if let Some(index) = index {
            self.table.select_index(index, self.model.config());
        }
    }

    fn edit<F>(&mut self, edit: F)
    where
        F: FnOnce(&PricingConfig) -> PricingConfig,
    {
        self.model.update(edit);
        self.refresh_chart();
    }

    fn refresh_chart(&mut self) {
        let curve = self.model.curve();
        self.chart.update(curve);
    }

    fn export(&mut self) {
        self.status = Some(
            match ConfigLoader::save_pricing(self.model.config(), EXPORT_FILE_NAME) {
                Ok(()) => format!("Exported to {}", EXPORT_FILE_NAME),
                Err(e) => format!("Export failed: {}", e),
            },
        );
    }

    fn summary_line(&self) -> String {
        let config = self.config();
        let currency = Currency::from_code(&config.currency);
        format!(
            "Currency: {}   MRR: {}   Discount: {}%",
            currency.option_label(),
            currency.format_amount(config.mrr, self.decimals),
            config.discount
        )
    }

    fn render(&self, f: &mut Frame) {
        let tier_rows = self.config().tiers.len() as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),             // Currency, MRR, discount
                Constraint::Length(tier_rows + 3), // Tier table
                Constraint::Min(10),               // Charts
                Constraint::Length(3),             // Help text
            ])
            .split(f.area());

        let summary = Paragraph::new(self.summary_line())
            .block(Block::default().borders(Borders::ALL).title("Pricing Tier Calculator"));
        f.render_widget(summary, chunks[0]);

        self.table.render(f, chunks[1], self.model.config());

        let currency = Currency::from_code(&self.config().currency);
        self.chart.render(f, chunks[2], currency);

        let help_text = match (&self.entry, &self.status) {
            (Some(entry), _) => format!(
                "{}: {}_   (Enter: Apply  Esc: Cancel)",
                entry.target.label(),
                entry.buffer
            ),
            (None, Some(status)) => status.clone(),
            (None, None) => HELP_TEXT.to_string(),
        };
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::TOP));
        f.render_widget(help, chunks[3]);
    }
}
