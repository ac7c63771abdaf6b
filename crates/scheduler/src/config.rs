use serde::{Deserialize, Serialize};

use common::InstrumentSpec;

/// Instrument configuration file (TOML).
///
/// Example `config/instruments.toml`:
/// ```toml
/// [[instrument]]
/// symbol = "BTCUSDT"
/// entry_interval = "5m"
/// trend_interval = "30m"
/// min_trend_volume = 250000.0
///
/// [[instrument]]
/// symbol = "ETHUSDT"
/// entry_interval = "15m"
/// trend_interval = "1h"
/// min_trend_volume = 100000.0
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstrumentFileConfig {
    #[serde(rename = "instrument")]
    pub instruments: Vec<InstrumentSpec>,
}

impl InstrumentFileConfig {
    /// Load from a TOML file. Exits the process on error: workers must
    /// never start with a malformed instrument list or an unparseable
    /// interval string.
    pub fn load(path: &str) -> Self {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read instrument config at '{path}': {e}"));
        toml::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse instrument config at '{path}': {e}"))
    }
}
