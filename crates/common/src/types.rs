use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Interval;

/// One fixed-interval OHLCV candle.
///
/// Sequences are ordered ascending by `open_time`. The most recent element
/// of a fetched sequence may still be forming; decision logic reads the
/// last *closed* bar, never the forming one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Base-asset volume traded during the bar.
    pub volume: f64,
}

impl Bar {
    /// Notional volume of the bar (base volume priced at the close).
    pub fn notional_volume(&self) -> f64 {
        self.volume * self.close
    }

    /// Candle body as an absolute price distance.
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Full high-to-low range of the bar.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

/// What a classification tick decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    #[default]
    None,
    EnterLong,
    EnterShort,
    ExitLong,
    ExitShort,
}

impl SignalKind {
    pub fn is_entry(&self) -> bool {
        matches!(self, SignalKind::EnterLong | SignalKind::EnterShort)
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, SignalKind::ExitLong | SignalKind::ExitShort)
    }
}

/// Profile tag attached to an entry; selects the exit-threshold bundle the
/// position manager applies downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TradeMode {
    #[default]
    Trend,
    Scalp,
    Continuation,
}

impl std::fmt::Display for TradeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeMode::Trend => write!(f, "trend"),
            TradeMode::Scalp => write!(f, "scalp"),
            TradeMode::Continuation => write!(f, "continuation"),
        }
    }
}

/// The single output of one classifier invocation.
///
/// `kind == None` is the default outcome and carries a diagnostic reason;
/// entries always carry `entry_price` and a non-empty reason. Timestamps
/// come from the classified bar, not the wall clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub kind: SignalKind,
    pub entry_price: Option<f64>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
    pub mode: TradeMode,
}

impl Signal {
    /// A non-signal with a diagnostic reason.
    pub fn none(
        symbol: impl Into<String>,
        reason: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            kind: SignalKind::None,
            entry_price: None,
            stop_loss: None,
            take_profit: None,
            reason: reason.into(),
            timestamp,
            mode: TradeMode::default(),
        }
    }

    pub fn enter_long(
        symbol: impl Into<String>,
        entry_price: f64,
        stop_loss: Option<f64>,
        reason: impl Into<String>,
        timestamp: DateTime<Utc>,
        mode: TradeMode,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            kind: SignalKind::EnterLong,
            entry_price: Some(entry_price),
            stop_loss,
            take_profit: None,
            reason: reason.into(),
            timestamp,
            mode,
        }
    }

    pub fn exit_long(
        symbol: impl Into<String>,
        reason: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            kind: SignalKind::ExitLong,
            entry_price: None,
            stop_loss: None,
            take_profit: None,
            reason: reason.into(),
            timestamp,
            mode: TradeMode::default(),
        }
    }
}

/// Externally observed position state, queried each poll rather than cached.
/// A zero signed quantity means flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub symbol: String,
    /// Positive for long, negative for short, zero for flat.
    pub signed_qty: f64,
    pub entry_price: f64,
    pub mark_price: f64,
    pub updated_at: DateTime<Utc>,
}

impl PositionSnapshot {
    pub fn is_flat(&self) -> bool {
        self.signed_qty == 0.0
    }
}

/// Global entry-suppression state, written only by the external risk
/// manager and read as a copied snapshot by every scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CooldownState {
    pub active: bool,
    pub remaining_secs: u64,
}

/// Per-instrument configuration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    /// Exchange symbol, e.g. "BTCUSDT".
    pub symbol: String,
    /// Interval driving entry decisions, e.g. "5m".
    pub entry_interval: Interval,
    /// Coarser interval supplying the trend bias, e.g. "30m".
    pub trend_interval: Interval,
    /// Minimum acceptable trend-interval notional volume moving average.
    pub min_trend_volume: f64,
}
