use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use common::{
    CooldownState, InstrumentSpec, MarketData, Result, SignalHooks, SignalKind,
};
use strategy::{ParameterSet, PatternClassifier};

/// Cadence of the fast position-reconcile sub-loop. Bounds the delay
/// before an externally opened position is recognized.
pub const POSITION_POLL_SECS: u64 = 8;

/// Extra delay past the bar boundary so the provider has the closed bar.
const BOUNDARY_SLACK_MS: u64 = 1500;

/// Bars fetched beyond the classifier minimum, covering the forming bar
/// and indicator warm-up drift.
const FETCH_MARGIN: usize = 60;

/// Mutable state owned exclusively by one worker loop. Never shared.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerState {
    /// Open time of the newest bar this worker has handled. Monotonically
    /// non-decreasing; a bar is classified at most once.
    pub last_processed_open_time: Option<DateTime<Utc>>,
    /// When the position snapshot was last successfully queried.
    pub last_position_poll: Option<DateTime<Utc>>,
}

/// Drives one instrument: aligns classification ticks to bar-close
/// boundaries, reconciles externally observed positions on a fast
/// sub-interval, and gates new entries behind the shared cooldown.
///
/// Workers run concurrently and independently; ordering is guaranteed only
/// within one worker's loop (fetch, reconcile, classify, dispatch). A tick
/// failure is reported and the loop moves on to the next tick.
pub struct InstrumentWorker {
    spec: InstrumentSpec,
    classifier: PatternClassifier,
    market: Arc<dyn MarketData>,
    hooks: Arc<dyn SignalHooks>,
    cooldown: Arc<RwLock<CooldownState>>,
    state: WorkerState,
    fetch_limit: usize,
}

impl InstrumentWorker {
    pub fn new(
        spec: InstrumentSpec,
        baseline_minutes: u32,
        market: Arc<dyn MarketData>,
        hooks: Arc<dyn SignalHooks>,
        cooldown: Arc<RwLock<CooldownState>>,
    ) -> Self {
        let params = ParameterSet::for_interval(spec.entry_interval, baseline_minutes);
        let fetch_limit = params.min_bars_entry.max(params.min_bars_trend) + FETCH_MARGIN;
        Self {
            classifier: PatternClassifier::new(params),
            spec,
            market,
            hooks,
            cooldown,
            state: WorkerState::default(),
            fetch_limit,
        }
    }

    pub fn state(&self) -> &WorkerState {
        &self.state
    }

    /// Run the worker until the token is cancelled. Call from
    /// `tokio::spawn`; cancellation exits at the next suspension point
    /// without side effects.
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!(
            symbol = %self.spec.symbol,
            entry = %self.spec.entry_interval,
            trend = %self.spec.trend_interval,
            "instrument worker started"
        );

        // Catch positions opened while we were down, without waiting for
        // the first poll tick.
        self.reconcile_position().await;

        let poll_period = Duration::from_secs(POSITION_POLL_SECS);
        let mut poll = interval_at(Instant::now() + poll_period, poll_period);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let to_boundary = self.delay_to_next_close();
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!(symbol = %self.spec.symbol, "instrument worker stopped");
                    return;
                }
                _ = poll.tick() => {
                    self.reconcile_position().await;
                }
                _ = tokio::time::sleep(to_boundary) => {
                    if let Err(error) = self.bar_tick().await {
                        warn!(symbol = %self.spec.symbol, error = %error, "bar tick failed");
                        self.hooks.on_tick_error(&self.spec.symbol, &error).await;
                    }
                }
            }
        }
    }

    /// One bar-close decision tick: fetch, dedupe, reconcile, classify,
    /// dispatch.
    async fn bar_tick(&mut self) -> Result<()> {
        let symbol = self.spec.symbol.clone();
        let entry = self
            .market
            .recent_bars(&symbol, self.spec.entry_interval, self.fetch_limit)
            .await?;
        let trend = self
            .market
            .recent_bars(&symbol, self.spec.trend_interval, self.fetch_limit)
            .await?;

        // The final element may still be forming; the newest closed bar
        // decides whether this tick has anything new to do.
        let Some(last_closed) = entry.len().checked_sub(2).map(|i| &entry[i]) else {
            debug!(symbol = %symbol, "no closed entry bars yet");
            return Ok(());
        };
        let bar_open_time = last_closed.open_time;
        if let Some(processed) = self.state.last_processed_open_time {
            if bar_open_time <= processed {
                debug!(symbol = %symbol, open_time = %bar_open_time, "bar already processed");
                return Ok(());
            }
        }

        // Boundary re-check closes the race between the fast poll and the
        // bar tick: an open position means no entry classification.
        let snapshot = self.market.position_snapshot(&symbol).await?;
        self.state.last_position_poll = Some(Utc::now());
        if !snapshot.is_flat() {
            self.hooks.on_manual_position(snapshot).await;
            self.state.last_processed_open_time = Some(bar_open_time);
            debug!(symbol = %symbol, "position open, entry classification skipped");
            return Ok(());
        }

        let cooldown = *self.cooldown.read().await;
        if cooldown.active {
            self.state.last_processed_open_time = Some(bar_open_time);
            debug!(
                symbol = %symbol,
                remaining_secs = cooldown.remaining_secs,
                "cooldown active, entry suppressed"
            );
            return Ok(());
        }

        let signal = self
            .classifier
            .classify(&symbol, &entry, &trend, self.spec.min_trend_volume);
        self.state.last_processed_open_time = Some(bar_open_time);

        if signal.kind == SignalKind::None {
            debug!(symbol = %symbol, reason = %signal.reason, "no signal");
        } else {
            info!(symbol = %symbol, kind = ?signal.kind, reason = %signal.reason, "signal forwarded");
            self.hooks.on_signal(signal).await;
        }
        Ok(())
    }

    /// Re-poll the externally owned position and re-notify the position
    /// manager whenever a non-flat position is observed.
    async fn reconcile_position(&mut self) {
        match self.market.position_snapshot(&self.spec.symbol).await {
            Ok(snapshot) => {
                self.state.last_position_poll = Some(Utc::now());
                if !snapshot.is_flat() {
                    debug!(
                        symbol = %self.spec.symbol,
                        qty = snapshot.signed_qty,
                        "externally observed position"
                    );
                    self.hooks.on_manual_position(snapshot).await;
                }
            }
            Err(error) => {
                warn!(symbol = %self.spec.symbol, error = %error, "position poll failed");
                self.hooks.on_tick_error(&self.spec.symbol, &error).await;
            }
        }
    }

    /// Delay until just past the next bar-close boundary of the entry
    /// interval: `ceil(now / interval) * interval` plus a small slack.
    fn delay_to_next_close(&self) -> Duration {
        let secs = self.spec.entry_interval.seconds();
        let now = Utc::now().timestamp().max(0) as u64;
        let to_boundary = secs - now % secs;
        Duration::from_secs(to_boundary) + Duration::from_millis(BOUNDARY_SLACK_MS)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
