use crate::config::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tierline")]
#[command(version, about = "Tiered usage-based pricing calculator")]
pub struct Cli {
    /// Enter TUI configuration mode
    #[arg(short = 'c', long = "config")]
    pub config: bool,

    /// Pricing configuration to load (JSON)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write the effective pricing configuration as JSON
    #[arg(short = 'e', long = "export", value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Currency code used for labels (USD, EUR, ...)
    #[arg(long = "currency", value_name = "CODE")]
    pub currency: Option<String>,

    /// Minimum recurring revenue floor
    #[arg(long = "mrr", value_name = "AMOUNT")]
    pub mrr: Option<f64>,

    /// Discount percentage (0-100)
    #[arg(long = "discount", value_name = "PERCENT")]
    pub discount: Option<f64>,

    /// Output format for the curve
    #[arg(short = 'f', long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Print current configuration
    #[arg(long = "print")]
    pub print: bool,

    /// Initialize config file
    #[arg(long = "init")]
    pub init: bool,

    /// Check configuration
    #[arg(long = "check")]
    pub check: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
