pub mod config;
pub mod error;
pub mod interval;
pub mod ports;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use interval::Interval;
pub use ports::{MarketData, SignalHooks};
pub use types::*;
