use common::Interval;
use serde::Serialize;

/// Clamp bounds for every scaled parameter, public so the scaling
/// guarantee can be asserted against the same constants it is enforced
/// with. Each tuple is `(lower, upper)`, both inclusive.
pub mod limits {
    /// Bounds on the interval scale factor itself.
    pub const SCALE: (f64, f64) = (0.75, 2.50);

    // Minimum bar counts
    pub const MIN_BARS_ENTRY: (usize, usize) = (64, 240);
    pub const MIN_BARS_TREND: (usize, usize) = (64, 220);

    // Pattern lookbacks
    pub const RETEST_LOOKBACK: (usize, usize) = (5, 20);
    pub const RANGE_LOOKBACK: (usize, usize) = (8, 30);
    pub const SWING_LOOKBACK: (usize, usize) = (6, 24);
    pub const HOLD_CONFIRM_BARS: (usize, usize) = (2, 6);
    pub const SWEEP_LOOKBACK: (usize, usize) = (5, 18);

    // Distance / tolerance fractions
    pub const MAX_CHASE_DISTANCE: (f64, f64) = (0.0020, 0.0120);
    pub const MAX_CHASE_ATR_MULT: (f64, f64) = (1.2, 3.5);
    pub const IMPULSE_BODY_RATIO: (f64, f64) = (0.60, 0.90);
    pub const IMPULSE_RANGE_ATR_MULT: (f64, f64) = (1.6, 4.2);
    pub const RETEST_BAND: (f64, f64) = (0.0008, 0.0045);
    pub const RECLAIM_BUFFER: (f64, f64) = (0.0004, 0.0025);
    pub const BREAK_BUFFER: (f64, f64) = (0.0005, 0.0030);
    pub const HOLD_TOLERANCE: (f64, f64) = (0.0006, 0.0035);
    pub const RANGE_COMPRESSION_ATR_MULT: (f64, f64) = (1.4, 3.8);
    pub const RANGE_FLOOR_BUFFER: (f64, f64) = (0.0005, 0.0030);
    pub const SWEEP_UNDERCUT: (f64, f64) = (0.0004, 0.0024);
    pub const SWEEP_RECLAIM: (f64, f64) = (0.0003, 0.0020);
    pub const SWEEP_BODY_RATIO_MIN: (f64, f64) = (0.35, 0.60);
    pub const SWEEP_EXHAUSTION_ATR_MULT: (f64, f64) = (1.8, 4.5);
    pub const EXIT_MA_TOLERANCE: (f64, f64) = (0.0006, 0.0035);
    pub const SLOPE_TOLERANCE: (f64, f64) = (0.0001, 0.0008);

    // Momentum-oscillator minimums, per pattern
    pub const MOMENTUM_MIN_RETEST: (f64, f64) = (42.0, 58.0);
    pub const MOMENTUM_MIN_CONTINUATION: (f64, f64) = (46.0, 64.0);
    pub const MOMENTUM_MIN_BREAKOUT: (f64, f64) = (50.0, 70.0);
    pub const MOMENTUM_MIN_SWEEP: (f64, f64) = (44.0, 62.0);
    pub const MOMENTUM_EXIT_WEAK: (f64, f64) = (38.0, 54.0);

    // Volume-ratio minimums
    pub const VOLUME_RATIO_MIN: (f64, f64) = (0.80, 2.00);
    pub const BREAKOUT_VOLUME_RATIO_MIN: (f64, f64) = (1.00, 2.60);
}

/// Every gate and threshold the classifier consults, derived once per
/// (instrument, interval) and never mutated afterwards.
///
/// Baseline values are tuned for 5-minute bars; `for_interval` rescales
/// them so one rule set behaves sensibly from 1-minute to 1-hour bars.
/// All fractional fields are fractions of price unless named `*_atr_mult`
/// (multiples of the average true range) or `momentum_*` (oscillator
/// points).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSet {
    pub interval_minutes: u32,
    /// The clamped `sqrt(interval / baseline)` factor the set was derived with.
    pub scale: f64,

    // Indicator periods, fixed across intervals.
    pub fast_ma_period: usize,
    pub slow_ma_period: usize,
    pub momentum_period: usize,
    pub volatility_period: usize,
    pub volume_ma_period: usize,

    // Minimum closed-bar counts before classifying at all.
    pub min_bars_entry: usize,
    pub min_bars_trend: usize,

    // Pattern lookbacks, in bars.
    pub retest_lookback: usize,
    pub range_lookback: usize,
    pub swing_lookback: usize,
    pub hold_confirm_bars: usize,
    pub sweep_lookback: usize,

    // Entry gates.
    pub max_chase_distance: f64,
    pub max_chase_atr_mult: f64,
    pub impulse_body_ratio: f64,
    pub impulse_range_atr_mult: f64,

    // Retest detector.
    pub retest_band: f64,
    pub reclaim_buffer: f64,

    // Continuation detector.
    pub range_compression_atr_mult: f64,
    pub range_floor_buffer: f64,
    pub break_buffer: f64,

    // Breakout-and-hold detector.
    pub hold_tolerance: f64,

    // Sweep-reversal detector.
    pub sweep_undercut: f64,
    pub sweep_reclaim: f64,
    pub sweep_body_ratio_min: f64,
    pub sweep_exhaustion_atr_mult: f64,

    // Exits and trend gate.
    pub exit_ma_tolerance: f64,
    pub slope_tolerance: f64,

    // Momentum minimums per pattern; retest loosest, breakout strictest.
    pub momentum_min_retest: f64,
    pub momentum_min_continuation: f64,
    pub momentum_min_breakout: f64,
    pub momentum_min_sweep: f64,
    pub momentum_exit_weak: f64,

    // Volume confirmation, as a ratio of the bar's own volume MA.
    pub volume_ratio_min: f64,
    pub breakout_volume_ratio_min: f64,
}

/// Interval scale factor: `sqrt(interval / baseline)`, clamped.
pub fn scale_factor(interval_minutes: u32, baseline_minutes: u32) -> f64 {
    let raw = (f64::from(interval_minutes) / f64::from(baseline_minutes)).sqrt();
    raw.clamp(limits::SCALE.0, limits::SCALE.1)
}

impl ParameterSet {
    /// Derive the effective parameter set for an interval from the
    /// compiled-in baseline. Every field lands inside its `limits` bounds
    /// for any interval in the supported 1–60 minute domain.
    pub fn for_interval(interval: Interval, baseline_minutes: u32) -> Self {
        let f = scale_factor(interval.minutes(), baseline_minutes);

        Self {
            interval_minutes: interval.minutes(),
            scale: f,

            fast_ma_period: 20,
            slow_ma_period: 50,
            momentum_period: 14,
            volatility_period: 14,
            volume_ma_period: 20,

            min_bars_entry: scale_len(90.0, f, limits::MIN_BARS_ENTRY),
            min_bars_trend: scale_len(80.0, f, limits::MIN_BARS_TREND),

            retest_lookback: scale_len(8.0, f, limits::RETEST_LOOKBACK),
            range_lookback: scale_len(12.0, f, limits::RANGE_LOOKBACK),
            swing_lookback: scale_len(10.0, f, limits::SWING_LOOKBACK),
            hold_confirm_bars: scale_len(3.0, f, limits::HOLD_CONFIRM_BARS),
            sweep_lookback: scale_len(9.0, f, limits::SWEEP_LOOKBACK),

            max_chase_distance: scale_frac(0.0040, f, limits::MAX_CHASE_DISTANCE),
            max_chase_atr_mult: scale_frac(1.8, f, limits::MAX_CHASE_ATR_MULT),
            impulse_body_ratio: scale_frac(0.72, f, limits::IMPULSE_BODY_RATIO),
            impulse_range_atr_mult: scale_frac(2.2, f, limits::IMPULSE_RANGE_ATR_MULT),

            retest_band: scale_frac(0.0015, f, limits::RETEST_BAND),
            reclaim_buffer: scale_frac(0.0008, f, limits::RECLAIM_BUFFER),

            range_compression_atr_mult: scale_frac(2.0, f, limits::RANGE_COMPRESSION_ATR_MULT),
            range_floor_buffer: scale_frac(0.0010, f, limits::RANGE_FLOOR_BUFFER),
            break_buffer: scale_frac(0.0010, f, limits::BREAK_BUFFER),

            hold_tolerance: scale_frac(0.0012, f, limits::HOLD_TOLERANCE),

            sweep_undercut: scale_frac(0.0008, f, limits::SWEEP_UNDERCUT),
            sweep_reclaim: scale_frac(0.0006, f, limits::SWEEP_RECLAIM),
            sweep_body_ratio_min: scale_frac(0.45, f, limits::SWEEP_BODY_RATIO_MIN),
            sweep_exhaustion_atr_mult: scale_frac(2.5, f, limits::SWEEP_EXHAUSTION_ATR_MULT),

            exit_ma_tolerance: scale_frac(0.0012, f, limits::EXIT_MA_TOLERANCE),
            slope_tolerance: scale_frac(0.0002, f, limits::SLOPE_TOLERANCE),

            momentum_min_retest: shift_osc(48.0, 4.0, f, limits::MOMENTUM_MIN_RETEST),
            momentum_min_continuation: shift_osc(52.0, 5.0, f, limits::MOMENTUM_MIN_CONTINUATION),
            momentum_min_breakout: shift_osc(56.0, 6.0, f, limits::MOMENTUM_MIN_BREAKOUT),
            momentum_min_sweep: shift_osc(50.0, 5.0, f, limits::MOMENTUM_MIN_SWEEP),
            momentum_exit_weak: shift_osc(45.0, 3.0, f, limits::MOMENTUM_EXIT_WEAK),

            volume_ratio_min: scale_inv(1.20, f, limits::VOLUME_RATIO_MIN),
            breakout_volume_ratio_min: scale_inv(1.50, f, limits::BREAKOUT_VOLUME_RATIO_MIN),
        }
    }
}

/// Lookback lengths scale proportionally, rounded to whole bars.
fn scale_len(base: f64, f: f64, (lo, hi): (usize, usize)) -> usize {
    ((base * f).round() as usize).clamp(lo, hi)
}

/// Distances, tolerances and volatility multiples scale proportionally.
fn scale_frac(base: f64, f: f64, (lo, hi): (f64, f64)) -> f64 {
    (base * f).clamp(lo, hi)
}

/// Oscillator minimums shift linearly with the factor's distance from 1.
fn shift_osc(base: f64, per_unit: f64, f: f64, (lo, hi): (f64, f64)) -> f64 {
    (base + per_unit * (f - 1.0)).clamp(lo, hi)
}

/// Volume-ratio minimums scale inversely: smaller intervals are noisier
/// and require relatively higher volume confirmation.
fn scale_inv(base: f64, f: f64, (lo, hi): (f64, f64)) -> f64 {
    (base / f).clamp(lo, hi)
}
