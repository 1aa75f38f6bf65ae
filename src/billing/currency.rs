use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A selectable currency. Only the label changes, amounts are never converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
}

pub const CURRENCIES: [Currency; 13] = [
    Currency { code: "USD", symbol: "$" },
    Currency { code: "EUR", symbol: "€" },
    Currency { code: "GBP", symbol: "£" },
    Currency { code: "JPY", symbol: "¥" },
    Currency { code: "CHF", symbol: "CHF" },
    Currency { code: "CAD", symbol: "CA$" },
    Currency { code: "AUD", symbol: "A$" },
    Currency { code: "CNY", symbol: "¥" },
    Currency { code: "INR", symbol: "₹" },
    Currency { code: "BRL", symbol: "R$" },
    Currency { code: "KRW", symbol: "₩" },
    Currency { code: "CZK", symbol: "Kč" },
    Currency { code: "PLN", symbol: "zł" },
];

/// Lookup index keyed by upper-case code
static BY_CODE: Lazy<HashMap<&'static str, Currency>> =
    Lazy::new(|| CURRENCIES.iter().map(|c| (c.code, *c)).collect());

impl Default for Currency {
    fn default() -> Self {
        CURRENCIES[0]
    }
}

impl Currency {
    /// Find a currency by its ISO code (case-insensitive)
    pub fn find(code: &str) -> Option<Currency> {
        BY_CODE.get(code.trim().to_uppercase().as_str()).copied()
    }

    /// Find a currency, falling back to USD for unknown codes
    pub fn from_code(code: &str) -> Currency {
        Self::find(code).unwrap_or_default()
    }

    /// The currency after this one in the selection list
    pub fn next(&self) -> Currency {
        let index = CURRENCIES
            .iter()
            .position(|c| c.code == self.code)
            .unwrap_or(0);
        CURRENCIES[(index + 1) % CURRENCIES.len()]
    }

    pub fn format_amount(&self, value: f64, decimals: usize) -> String {
        format!("{}{:.*}", self.symbol, decimals, value)
    }

    pub fn cumulative_axis_title(&self) -> String {
        format!("Cumulative Price ({})", self.symbol)
    }

    pub fn rate_axis_title(&self) -> String {
        format!("Unit Price ({})", self.symbol)
    }

    pub fn option_label(&self) -> String {
        format!("{} ({})", self.code, self.symbol)
    }
}

pub const UNITS_AXIS_TITLE: &str = "Number of Units";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(Currency::find("eur").map(|c| c.symbol), Some("€"));
        assert_eq!(Currency::find(" PLN ").map(|c| c.symbol), Some("zł"));
        assert_eq!(Currency::find("XYZ"), None);
    }

    #[test]
    fn test_unknown_code_falls_back_to_usd() {
        assert_eq!(Currency::from_code("XYZ").code, "USD");
    }

    #[test]
    fn test_next_wraps_around() {
        assert_eq!(Currency::from_code("USD").next().code, "EUR");
        assert_eq!(Currency::from_code("PLN").next().code, "USD");
    }

    #[test]
    fn test_labels() {
        let chf = Currency::from_code("CHF");
        assert_eq!(chf.format_amount(12.5, 2), "CHF12.50");
        assert_eq!(chf.cumulative_axis_title(), "Cumulative Price (CHF)");
        assert_eq!(Currency::from_code("CAD").rate_axis_title(), "Unit Price (CA$)");
        assert_eq!(Currency::from_code("CZK").option_label(), "CZK (Kč)");
    }
}
