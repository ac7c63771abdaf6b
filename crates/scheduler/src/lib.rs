pub mod config;
pub mod worker;

pub use config::InstrumentFileConfig;
pub use worker::{InstrumentWorker, WorkerState};

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use common::{CooldownState, InstrumentSpec, MarketData, SignalHooks};

/// Spawn one independent worker task per instrument.
///
/// Workers share nothing mutable beyond read access to the cooldown
/// snapshot; each owns its own state and tick cadence. Cancelling the
/// returned token stops every worker at its next suspension point.
pub fn spawn_workers(
    instruments: Vec<InstrumentSpec>,
    baseline_minutes: u32,
    market: Arc<dyn MarketData>,
    hooks: Arc<dyn SignalHooks>,
    cooldown: Arc<RwLock<CooldownState>>,
) -> (CancellationToken, Vec<JoinHandle<()>>) {
    let shutdown = CancellationToken::new();
    let handles = instruments
        .into_iter()
        .map(|spec| {
            let worker = InstrumentWorker::new(
                spec,
                baseline_minutes,
                market.clone(),
                hooks.clone(),
                cooldown.clone(),
            );
            tokio::spawn(worker.run(shutdown.clone()))
        })
        .collect();
    (shutdown, handles)
}
