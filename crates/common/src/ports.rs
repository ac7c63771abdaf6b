use async_trait::async_trait;

use crate::{Bar, Error, Interval, PositionSnapshot, Result, Signal};

/// Abstraction over already-fetched market state.
///
/// Implemented by the data-provider collaborator. This core never performs
/// network I/O itself; timeouts and retries for these calls belong to the
/// implementation, not to the callers.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch the most recent bars for a symbol and interval, oldest first.
    /// The final element may be a still-forming bar.
    async fn recent_bars(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Bar>>;

    /// Query the current position for a symbol. Zero quantity means flat.
    async fn position_snapshot(&self, symbol: &str) -> Result<PositionSnapshot>;
}

/// Callbacks an instrument worker emits into.
///
/// `on_signal` feeds the order-execution collaborator, `on_manual_position`
/// the position manager, `on_tick_error` the notification layer. None of
/// them may block a worker indefinitely.
#[async_trait]
pub trait SignalHooks: Send + Sync {
    /// A non-`None` signal produced at a bar close.
    async fn on_signal(&self, signal: Signal);

    /// A non-flat position was observed that this core did not open itself
    /// (manual trade, restart recovery, external modification).
    async fn on_manual_position(&self, snapshot: PositionSnapshot);

    /// A transient failure during one scheduler tick. The worker continues.
    async fn on_tick_error(&self, symbol: &str, error: &Error);
}
