//! Minor-unit amounts to display strings.

use num_format::{Locale, ToFormattedString};

use crate::config::MoneyConfig;

const NBSP: &str = "\u{a0}";

/// Resolve a BCP 47 tag, trying the full tag first and then its language.
fn resolve_locale(tag: &str) -> Option<Locale> {
    let tag = tag.trim().replace('_', "-");
    if let Ok(locale) = Locale::from_name(tag.as_str()) {
        return Some(locale);
    }
    let language = tag.split('-').next()?.to_ascii_lowercase();
    Locale::from_name(language.as_str()).ok()
}

/// Languages that write the symbol after the number ("12,50 €").
fn symbol_after(tag: &str) -> bool {
    let language = tag
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    matches!(
        language.as_str(),
        "de" | "nl" | "es" | "it" | "da" | "pt" | "fr" | "sv" | "nb" | "fi" | "pl"
    )
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    let symbol = match currency.to_ascii_uppercase().as_str() {
        "GBP" => "£",
        "EUR" => "€",
        "USD" => "$",
        "CAD" => "CA$",
        "AUD" => "A$",
        "NZD" => "NZ$",
        "CHF" => "CHF",
        "SEK" | "NOK" | "DKK" => "kr",
        "PLN" => "zł",
        _ => return None,
    };
    Some(symbol)
}

#[derive(Debug, Clone)]
struct Localized {
    locale: Locale,
    symbol: &'static str,
    symbol_after: bool,
}

/// Currency formatter for drawer totals and line prices.
///
/// Amounts arrive in minor units and are divided by 100. When the configured
/// locale/currency pair is unknown, output degrades to
/// `<fallback symbol><amount to 2 decimals>` without grouping.
#[derive(Debug, Clone)]
pub struct MoneyFormat {
    localized: Option<Localized>,
    fallback_symbol: String,
}

impl MoneyFormat {
    pub fn new(config: &MoneyConfig) -> Self {
        let localized = resolve_locale(&config.locale)
            .zip(currency_symbol(&config.currency))
            .map(|(locale, symbol)| Localized {
                locale,
                symbol,
                symbol_after: symbol_after(&config.locale),
            });
        if localized.is_none() {
            tracing::debug!(
                locale = %config.locale,
                currency = %config.currency,
                "No currency layout for locale, using fallback format"
            );
        }
        Self {
            localized,
            fallback_symbol: config.fallback_symbol.clone(),
        }
    }

    pub fn format(&self, minor_units: u64) -> String {
        let major = minor_units / 100;
        let minor = minor_units % 100;

        let Some(localized) = &self.localized else {
            return format!("{}{}.{:02}", self.fallback_symbol, major, minor);
        };

        let number = format!(
            "{}{}{:02}",
            major.to_formatted_string(&localized.locale),
            localized.locale.decimal(),
            minor
        );
        if localized.symbol_after {
            format!("{}{}{}", number, NBSP, localized.symbol)
        } else {
            format!("{}{}", localized.symbol, number)
        }
    }
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::new(&MoneyConfig::default())
    }
}
