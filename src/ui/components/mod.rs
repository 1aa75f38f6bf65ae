pub mod chart;
pub mod tier_table;

pub use chart::ChartView;
pub use tier_table::TierTableComponent;
