/// Global configuration loaded from environment variables at startup.
/// Malformed values cause an immediate panic with a clear message; the
/// process must not start instrument workers with invalid configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Reference interval the baseline parameter set was tuned for.
    pub baseline_interval_minutes: u32,
    /// Length of the global entry cooldown applied by the risk manager.
    pub cooldown_secs: u64,
    /// Path to the per-instrument TOML configuration file.
    pub instruments_config_path: String,
}

impl Config {
    /// Load configuration from the environment, reading `.env` if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        Config {
            baseline_interval_minutes: parsed_env("BASELINE_INTERVAL_MINUTES", 5),
            cooldown_secs: parsed_env("COOLDOWN_SECS", 900),
            instruments_config_path: std::env::var("INSTRUMENTS_CONFIG_PATH")
                .unwrap_or_else(|_| "config/instruments.toml".to_string()),
        }
    }
}

fn parsed_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            panic!("Environment variable '{key}' has invalid value: '{raw}'")
        }),
        Err(_) => default,
    }
}
