use common::TradeMode;
use serde::Serialize;

/// Exit-threshold bundle for one trade mode.
///
/// Thresholds come in two parallel frameworks: risk-multiples (`*_r`,
/// profit/loss as a multiple of the amount initially risked) and
/// return-on-margin fractions (`*_roi`). The position manager applies
/// whichever framework its configuration selects; both describe the same
/// three decisions: protect the position at break-even, take profit
/// quickly, or cut a trade that has turned dangerous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModeProfile {
    pub mode: TradeMode,
    /// Move the stop to break-even once this many R is unrealized.
    pub protect_at_r: f64,
    /// Take profit outright at this many R.
    pub quick_take_r: f64,
    /// Cut the position once the loss reaches this many R (negative).
    pub danger_cut_r: f64,
    /// Close after this many bars without resolution.
    pub time_stop_bars: u32,
    /// Return-on-margin analogue of `protect_at_r`.
    pub protect_at_roi: f64,
    /// Return-on-margin analogue of `quick_take_r`.
    pub quick_take_roi: f64,
    /// Return-on-margin analogue of `danger_cut_r` (negative).
    pub danger_cut_roi: f64,
    /// How long a resting maker order may wait before repricing.
    pub maker_timeout_secs: u64,
}

const TREND: ModeProfile = ModeProfile {
    mode: TradeMode::Trend,
    protect_at_r: 1.0,
    quick_take_r: 2.5,
    danger_cut_r: -1.0,
    time_stop_bars: 48,
    protect_at_roi: 0.12,
    quick_take_roi: 0.30,
    danger_cut_roi: -0.12,
    maker_timeout_secs: 45,
};

const SCALP: ModeProfile = ModeProfile {
    mode: TradeMode::Scalp,
    protect_at_r: 0.6,
    quick_take_r: 1.2,
    danger_cut_r: -0.7,
    time_stop_bars: 12,
    protect_at_roi: 0.06,
    quick_take_roi: 0.12,
    danger_cut_roi: -0.08,
    maker_timeout_secs: 20,
};

const CONTINUATION: ModeProfile = ModeProfile {
    mode: TradeMode::Continuation,
    protect_at_r: 0.8,
    quick_take_r: 1.8,
    danger_cut_r: -0.8,
    time_stop_bars: 24,
    protect_at_roi: 0.09,
    quick_take_roi: 0.20,
    danger_cut_roi: -0.10,
    maker_timeout_secs: 30,
};

/// Look up the immutable profile for a trade mode.
pub fn profile(mode: TradeMode) -> &'static ModeProfile {
    match mode {
        TradeMode::Trend => &TREND,
        TradeMode::Scalp => &SCALP,
        TradeMode::Continuation => &CONTINUATION,
    }
}
