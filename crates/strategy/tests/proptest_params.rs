use proptest::prelude::*;

use common::Interval;
use strategy::params::{limits, scale_factor, ParameterSet};

fn assert_within_f64(name: &str, value: f64, (lo, hi): (f64, f64)) {
    assert!(
        (lo..=hi).contains(&value),
        "{name} = {value} outside [{lo}, {hi}]"
    );
}

fn assert_within_len(name: &str, value: usize, (lo, hi): (usize, usize)) {
    assert!(
        (lo..=hi).contains(&value),
        "{name} = {value} outside [{lo}, {hi}]"
    );
}

proptest! {
    /// Every derived parameter stays inside its documented clamp bounds
    /// for any interval in the supported 1-60 minute domain, not just the
    /// shipped defaults.
    #[test]
    fn derived_parameters_respect_clamp_bounds(minutes in 1u32..=60) {
        let interval = Interval::from_minutes(minutes).unwrap();
        let p = ParameterSet::for_interval(interval, 5);

        assert_within_f64("scale", p.scale, limits::SCALE);

        assert_within_len("min_bars_entry", p.min_bars_entry, limits::MIN_BARS_ENTRY);
        assert_within_len("min_bars_trend", p.min_bars_trend, limits::MIN_BARS_TREND);
        assert_within_len("retest_lookback", p.retest_lookback, limits::RETEST_LOOKBACK);
        assert_within_len("range_lookback", p.range_lookback, limits::RANGE_LOOKBACK);
        assert_within_len("swing_lookback", p.swing_lookback, limits::SWING_LOOKBACK);
        assert_within_len("hold_confirm_bars", p.hold_confirm_bars, limits::HOLD_CONFIRM_BARS);
        assert_within_len("sweep_lookback", p.sweep_lookback, limits::SWEEP_LOOKBACK);

        assert_within_f64("max_chase_distance", p.max_chase_distance, limits::MAX_CHASE_DISTANCE);
        assert_within_f64("max_chase_atr_mult", p.max_chase_atr_mult, limits::MAX_CHASE_ATR_MULT);
        assert_within_f64("impulse_body_ratio", p.impulse_body_ratio, limits::IMPULSE_BODY_RATIO);
        assert_within_f64(
            "impulse_range_atr_mult",
            p.impulse_range_atr_mult,
            limits::IMPULSE_RANGE_ATR_MULT,
        );
        assert_within_f64("retest_band", p.retest_band, limits::RETEST_BAND);
        assert_within_f64("reclaim_buffer", p.reclaim_buffer, limits::RECLAIM_BUFFER);
        assert_within_f64("break_buffer", p.break_buffer, limits::BREAK_BUFFER);
        assert_within_f64("hold_tolerance", p.hold_tolerance, limits::HOLD_TOLERANCE);
        assert_within_f64(
            "range_compression_atr_mult",
            p.range_compression_atr_mult,
            limits::RANGE_COMPRESSION_ATR_MULT,
        );
        assert_within_f64("range_floor_buffer", p.range_floor_buffer, limits::RANGE_FLOOR_BUFFER);
        assert_within_f64("sweep_undercut", p.sweep_undercut, limits::SWEEP_UNDERCUT);
        assert_within_f64("sweep_reclaim", p.sweep_reclaim, limits::SWEEP_RECLAIM);
        assert_within_f64(
            "sweep_body_ratio_min",
            p.sweep_body_ratio_min,
            limits::SWEEP_BODY_RATIO_MIN,
        );
        assert_within_f64(
            "sweep_exhaustion_atr_mult",
            p.sweep_exhaustion_atr_mult,
            limits::SWEEP_EXHAUSTION_ATR_MULT,
        );
        assert_within_f64("exit_ma_tolerance", p.exit_ma_tolerance, limits::EXIT_MA_TOLERANCE);
        assert_within_f64("slope_tolerance", p.slope_tolerance, limits::SLOPE_TOLERANCE);

        assert_within_f64("momentum_min_retest", p.momentum_min_retest, limits::MOMENTUM_MIN_RETEST);
        assert_within_f64(
            "momentum_min_continuation",
            p.momentum_min_continuation,
            limits::MOMENTUM_MIN_CONTINUATION,
        );
        assert_within_f64(
            "momentum_min_breakout",
            p.momentum_min_breakout,
            limits::MOMENTUM_MIN_BREAKOUT,
        );
        assert_within_f64("momentum_min_sweep", p.momentum_min_sweep, limits::MOMENTUM_MIN_SWEEP);
        assert_within_f64("momentum_exit_weak", p.momentum_exit_weak, limits::MOMENTUM_EXIT_WEAK);

        assert_within_f64("volume_ratio_min", p.volume_ratio_min, limits::VOLUME_RATIO_MIN);
        assert_within_f64(
            "breakout_volume_ratio_min",
            p.breakout_volume_ratio_min,
            limits::BREAKOUT_VOLUME_RATIO_MIN,
        );
    }

    /// The scale factor is monotone in the interval and clamped at the
    /// edges of the domain.
    #[test]
    fn scale_factor_is_monotone_and_clamped(a in 1u32..=60, b in 1u32..=60) {
        let fa = scale_factor(a, 5);
        let fb = scale_factor(b, 5);
        prop_assert!(fa >= limits::SCALE.0 && fa <= limits::SCALE.1);
        if a <= b {
            prop_assert!(fa <= fb);
        }
    }
}
