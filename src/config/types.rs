use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub money: MoneyConfig,
}

/// Where the cart endpoints live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store origin (scheme + host + port), e.g. "https://shop.example.com".
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Locale / market path prefix, e.g. "/" or "/en-gb/".
    #[serde(default = "default_root")]
    pub root: String,
}

/// Debounce and transient feedback durations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Quiet period after the last keystroke before a typed quantity is sent.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// How long a wrapper keeps its "ok" flag after a successful update.
    #[serde(default = "default_ok_flash_ms")]
    pub ok_flash_ms: u64,
    /// How long the "item added/removed" message stays visible.
    #[serde(default = "default_message_visible_ms")]
    pub message_visible_ms: u64,
}

/// Currency display settings for drawer totals and line prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneyConfig {
    /// BCP 47 locale tag (e.g. "en-GB", "de-DE").
    #[serde(default = "default_locale")]
    pub locale: String,
    /// ISO 4217 currency code (e.g. "GBP").
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Symbol used when the locale/currency pair cannot be formatted.
    #[serde(default = "default_fallback_symbol")]
    pub fallback_symbol: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:9292".to_string()
}

fn default_root() -> String {
    "/".to_string()
}

fn default_debounce_ms() -> u64 {
    350
}

fn default_ok_flash_ms() -> u64 {
    600
}

fn default_message_visible_ms() -> u64 {
    1800
}

fn default_locale() -> String {
    "en-GB".to_string()
}

fn default_currency() -> String {
    "GBP".to_string()
}

fn default_fallback_symbol() -> String {
    "£".to_string()
}

impl StoreConfig {
    /// Root path prefix, normalised to start and end with '/'.
    pub fn normalized_root(&self) -> String {
        let trimmed = self.root.trim().trim_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            root: default_root(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            ok_flash_ms: default_ok_flash_ms(),
            message_visible_ms: default_message_visible_ms(),
        }
    }
}

impl Default for MoneyConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            currency: default_currency(),
            fallback_symbol: default_fallback_symbol(),
        }
    }
}
