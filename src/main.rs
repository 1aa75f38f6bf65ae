use std::process;
use tierline::billing::{calculate, Currency, PricingConfig};
use tierline::cli::Cli;
use tierline::config::{Config, ConfigLoader};
use tierline::core::render_curve;
use tierline::debug_println;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    // Handle configuration commands
    if cli.init {
        Config::init()?;
        return Ok(());
    }

    let config = Config::load().unwrap_or_else(|_| Config::default());

    if cli.print {
        config.print()?;
        return Ok(());
    }

    if cli.check {
        config.check()?;
        if let Some(path) = &cli.input {
            ConfigLoader::load_pricing(path)?;
        }
        println!("✓ Configuration valid");
        return Ok(());
    }

    let pricing = match apply_overrides(&cli, load_pricing(&cli, &config)?) {
        Ok(pricing) => pricing,
        Err(message) => {
            eprintln!("Error: {}", message);
            process::exit(1);
        }
    };

    if cli.config {
        #[cfg(feature = "tui")]
        {
            let edited = tierline::ui::run_configurator(pricing, config.decimals)?;
            if let Some(path) = &cli.export {
                ConfigLoader::save_pricing(&edited, path)?;
                println!("Pricing configuration saved to {}", path.display());
            }
        }
        #[cfg(not(feature = "tui"))]
        {
            eprintln!("TUI feature is not enabled. Please install with --features tui");
            process::exit(1);
        }
        return Ok(());
    }

    if let Some(path) = &cli.export {
        ConfigLoader::save_pricing(&pricing, path)?;
        debug_println!("Exported pricing configuration to {}", path.display());
    }

    let curve = calculate(&pricing);
    let format = cli.format.unwrap_or(config.format);
    let currency = Currency::from_code(&pricing.currency);

    println!("{}", render_curve(format, &curve, currency, config.decimals));

    Ok(())
}

fn load_pricing(cli: &Cli, config: &Config) -> Result<PricingConfig, Box<dyn std::error::Error>> {
    let pricing = match &cli.input {
        Some(path) => ConfigLoader::load_pricing(path)?,
        None => config.initial_pricing()?,
    };
    Ok(pricing)
}

/// Apply command-line overrides on top of the loaded pricing configuration
fn apply_overrides(cli: &Cli, mut pricing: PricingConfig) -> Result<PricingConfig, String> {
    if let Some(code) = &cli.currency {
        if Currency::find(code).is_none() {
            return Err(format!("Unknown currency code: {}", code));
        }
        pricing = pricing.with_currency(code);
    }

    if let Some(mrr) = cli.mrr {
        if !(mrr >= 0.0) {
            return Err("MRR must be a non-negative amount".to_string());
        }
        pricing = pricing.with_mrr(mrr);
    }

    if let Some(discount) = cli.discount {
        if !(0.0..=100.0).contains(&discount) {
            return Err("Discount must be between 0 and 100".to_string());
        }
        pricing = pricing.with_discount(discount);
    }

    Ok(pricing)
}
