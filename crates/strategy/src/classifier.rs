use chrono::{DateTime, Utc};
use tracing::debug;

use common::{Bar, Signal, TradeMode};

use crate::indicators::{AverageTrueRange, Ema, Momentum, VolumeMa};
use crate::params::ParameterSet;

/// Evaluates one (entry series, trend series) pair into exactly one
/// `Signal` per invocation.
///
/// The classifier is pure: identical inputs produce an identical signal,
/// and nothing is retained between calls. Both input series may end with a
/// still-forming bar; the final element of each is dropped before any
/// computation, so every decision reads the last *closed* bar.
///
/// Evaluation order is fixed: bar-count preconditions, the trend gate,
/// then the anti-chase / impulse / liquidity gates, then the entry pattern
/// detectors in priority order (retest, continuation, breakout-and-hold),
/// then the soft-exit conditions. The sweep-reversal detector runs only on
/// the trend-gate-failed path. Callers holding no position treat exit
/// signals as no-ops.
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    params: ParameterSet,
}

/// Entry-interval series and the indicator state derived from it.
struct EntryContext<'a> {
    bars: &'a [Bar],
    closes: Vec<f64>,
    fast: Vec<f64>,
    slow: Vec<f64>,
    momentum: Vec<f64>,
    atr: f64,
    volume_ma: f64,
}

impl PatternClassifier {
    pub fn new(params: ParameterSet) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn classify(
        &self,
        symbol: &str,
        entry_bars: &[Bar],
        trend_bars: &[Bar],
        min_trend_volume: f64,
    ) -> Signal {
        let p = &self.params;
        let entry = closed(entry_bars);
        let trend = closed(trend_bars);
        let ts = entry
            .last()
            .map(|b| b.open_time)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        // Preconditions: enough closed bars for full indicator warm-up.
        if entry.len() < p.min_bars_entry {
            return Signal::none(
                symbol,
                format!(
                    "insufficient entry bars: have {}, need {}",
                    entry.len(),
                    p.min_bars_entry
                ),
                ts,
            );
        }
        if trend.len() < p.min_bars_trend {
            return Signal::none(
                symbol,
                format!(
                    "insufficient trend bars: have {}, need {}",
                    trend.len(),
                    p.min_bars_trend
                ),
                ts,
            );
        }

        let ctx = self.entry_context(entry);
        let j = entry.len() - 1;
        let last = &entry[j];

        // Trend gate: fast above slow on the coarser interval, fast not
        // falling versus the prior closed bar.
        let trend_closes: Vec<f64> = trend.iter().map(|b| b.close).collect();
        let t_fast = Ema::new(p.fast_ma_period).series(&trend_closes);
        let t_slow = Ema::new(p.slow_ma_period).series(&trend_closes);
        let ti = trend.len() - 1;
        let fast_now = t_fast[ti];
        let slow_now = t_slow[ti];
        let trend_ok =
            fast_now > slow_now && fast_now >= t_fast[ti - 1] * (1.0 - p.slope_tolerance);

        if !trend_ok {
            // Counter-trend entries are limited to the sweep-reversal
            // pattern; anything else on this path is an exit question.
            if let Some(signal) = self.sweep_reversal(symbol, &ctx, ts) {
                return signal;
            }
            if let Some(signal) = self.soft_exit(symbol, &ctx, ts, "Trend-break exit") {
                return signal;
            }
            debug!(symbol, fast = fast_now, slow = slow_now, "trend gate rejected");
            return Signal::none(
                symbol,
                format!("Trend gate: fast {fast_now:.6} vs slow {slow_now:.6}"),
                ts,
            );
        }

        // Anti-chase gate: price too far from the fast average, measured
        // both as a fraction of price and as a volatility multiple.
        let fast_j = ctx.fast[j];
        let distance = (last.close - fast_j).abs();
        if distance / last.close > p.max_chase_distance {
            return Signal::none(
                symbol,
                format!(
                    "Anti-chase: close {:.6} is {:.4}% from fast ma",
                    last.close,
                    distance / last.close * 100.0
                ),
                ts,
            );
        }
        if ctx.atr > 0.0 && distance > p.max_chase_atr_mult * ctx.atr {
            return Signal::none(
                symbol,
                format!(
                    "Anti-chase: distance {:.6} exceeds {:.2}x atr",
                    distance, p.max_chase_atr_mult
                ),
                ts,
            );
        }

        // Impulse gate: do not chase an exhaustion candle.
        let range = last.range();
        if range > 0.0
            && last.body() / range > p.impulse_body_ratio
            && ctx.atr > 0.0
            && range > p.impulse_range_atr_mult * ctx.atr
        {
            return Signal::none(
                symbol,
                format!(
                    "Impulse: climax bar, body ratio {:.2} over {:.2}x atr range",
                    last.body() / range,
                    p.impulse_range_atr_mult
                ),
                ts,
            );
        }

        // Liquidity gate: the instrument must trade enough on the trend
        // interval, and the signal bar itself must carry relative volume.
        let trend_volume_ma = VolumeMa::new(p.volume_ma_period).value(trend);
        if trend_volume_ma < min_trend_volume {
            return Signal::none(
                symbol,
                format!(
                    "Liquidity: trend volume ma {trend_volume_ma:.0} below minimum {min_trend_volume:.0}"
                ),
                ts,
            );
        }
        if ctx.volume_ma > 0.0 && last.notional_volume() < p.volume_ratio_min * ctx.volume_ma {
            return Signal::none(
                symbol,
                format!(
                    "Liquidity: bar notional {:.0} below {:.2}x volume ma",
                    last.notional_volume(),
                    p.volume_ratio_min
                ),
                ts,
            );
        }

        // Entry detectors, fixed priority, first match wins.
        if let Some(signal) = self.retest(symbol, &ctx, ts) {
            return signal;
        }
        if let Some(signal) = self.continuation(symbol, &ctx, ts) {
            return signal;
        }
        if let Some(signal) = self.breakout_hold(symbol, &ctx, ts) {
            return signal;
        }

        if let Some(signal) = self.soft_exit(symbol, &ctx, ts, "Exit") {
            return signal;
        }

        Signal::none(symbol, "No signal", ts)
    }

    fn entry_context<'a>(&self, bars: &'a [Bar]) -> EntryContext<'a> {
        let p = &self.params;
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast = Ema::new(p.fast_ma_period).series(&closes);
        let slow = Ema::new(p.slow_ma_period).series(&closes);
        let momentum = Momentum::new(p.momentum_period).series(&closes);
        let atr = AverageTrueRange::new(p.volatility_period).value(bars);
        let volume_ma = VolumeMa::new(p.volume_ma_period).value(bars);
        EntryContext {
            bars,
            closes,
            fast,
            slow,
            momentum,
            atr,
            volume_ma,
        }
    }

    /// Mean-reversion retest: a recent low touched the band around the
    /// fast average and the close has reclaimed above it.
    fn retest(&self, symbol: &str, ctx: &EntryContext, ts: DateTime<Utc>) -> Option<Signal> {
        let p = &self.params;
        let j = ctx.bars.len() - 1;
        let last = &ctx.bars[j];
        let fast_j = ctx.fast[j];

        if ctx.momentum[j] < p.momentum_min_retest {
            return None;
        }
        if last.close <= fast_j * (1.0 + p.reclaim_buffer) {
            return None;
        }
        // Bullish candle or a higher close confirms the reclaim.
        if !last.is_bullish() && last.close <= ctx.closes[j - 1] {
            return None;
        }
        let touched = (j - p.retest_lookback..j).find(|&k| {
            let ma = ctx.fast[k];
            let low = ctx.bars[k].low;
            low <= ma * (1.0 + p.retest_band) && low >= ma * (1.0 - p.retest_band)
        })?;

        let stop = ctx.bars[touched].low.min(fast_j * (1.0 - p.retest_band));
        Some(Signal::enter_long(
            symbol,
            last.close,
            Some(stop),
            format!(
                "Retest: low touched fast ma within band, close reclaimed at {:.6}",
                last.close
            ),
            ts,
            TradeMode::Scalp,
        ))
    }

    /// Range continuation: a compressed range riding above the fast
    /// average, broken upward on volume.
    fn continuation(&self, symbol: &str, ctx: &EntryContext, ts: DateTime<Utc>) -> Option<Signal> {
        let p = &self.params;
        let j = ctx.bars.len() - 1;
        let last = &ctx.bars[j];

        if ctx.momentum[j] < p.momentum_min_continuation {
            return None;
        }
        let window = &ctx.bars[j - p.range_lookback..j];
        let ceiling = window.iter().map(|b| b.high).fold(f64::MIN, f64::max);
        let floor = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);

        if ctx.atr <= 0.0 || ceiling - floor > p.range_compression_atr_mult * ctx.atr {
            return None;
        }
        if floor <= ctx.fast[j] * (1.0 + p.range_floor_buffer) {
            return None;
        }
        if last.close <= ceiling * (1.0 + p.break_buffer) {
            return None;
        }
        if ctx.volume_ma > 0.0
            && last.notional_volume() < p.breakout_volume_ratio_min * ctx.volume_ma
        {
            return None;
        }

        Some(Signal::enter_long(
            symbol,
            last.close,
            Some(floor),
            format!(
                "Continuation: close {:.6} broke range ceiling {ceiling:.6}",
                last.close
            ),
            ts,
            TradeMode::Continuation,
        ))
    }

    /// Swing breakout that held: close above the prior swing high with
    /// every close of the confirm window staying above it.
    fn breakout_hold(&self, symbol: &str, ctx: &EntryContext, ts: DateTime<Utc>) -> Option<Signal> {
        let p = &self.params;
        let j = ctx.bars.len() - 1;
        let last = &ctx.bars[j];

        if ctx.momentum[j] < p.momentum_min_breakout {
            return None;
        }
        let confirm_start = j + 1 - p.hold_confirm_bars;
        let swing_window = &ctx.bars[confirm_start - p.swing_lookback..confirm_start];
        let swing_high = swing_window.iter().map(|b| b.high).fold(f64::MIN, f64::max);

        if last.close <= swing_high * (1.0 + p.break_buffer) {
            return None;
        }
        let hold_floor = swing_high * (1.0 - p.hold_tolerance);
        if ctx.closes[confirm_start..=j].iter().any(|&c| c < hold_floor) {
            return None;
        }
        if ctx.volume_ma > 0.0
            && last.notional_volume() < p.breakout_volume_ratio_min * ctx.volume_ma
        {
            return None;
        }

        Some(Signal::enter_long(
            symbol,
            last.close,
            Some(hold_floor),
            format!(
                "Breakout-hold: close {:.6} held above swing high {swing_high:.6}",
                last.close
            ),
            ts,
            TradeMode::Trend,
        ))
    }

    /// Liquidity sweep reversal: the previous bar undercut a recent local
    /// low and the current bar reclaimed it with a solid bullish body.
    /// Only consulted when the trend gate failed.
    fn sweep_reversal(&self, symbol: &str, ctx: &EntryContext, ts: DateTime<Utc>) -> Option<Signal> {
        let p = &self.params;
        let j = ctx.bars.len() - 1;
        let last = &ctx.bars[j];
        let prev = &ctx.bars[j - 1];

        if ctx.momentum[j] < p.momentum_min_sweep {
            return None;
        }
        let window = &ctx.bars[j - 1 - p.sweep_lookback..j - 1];
        let local_low = window.iter().map(|b| b.low).fold(f64::MAX, f64::min);

        if prev.low >= local_low * (1.0 - p.sweep_undercut) {
            return None;
        }
        if last.close <= local_low * (1.0 + p.sweep_reclaim) {
            return None;
        }
        let range = last.range();
        if !last.is_bullish() || range <= 0.0 || last.body() / range < p.sweep_body_ratio_min {
            return None;
        }
        // An oversized reversal bar is its own exhaustion risk.
        if ctx.atr > 0.0 && range > p.sweep_exhaustion_atr_mult * ctx.atr {
            return None;
        }

        Some(Signal::enter_long(
            symbol,
            last.close,
            Some(prev.low),
            format!(
                "Sweep-reversal: reclaimed swept low {local_low:.6} at {:.6}",
                last.close
            ),
            ts,
            TradeMode::Scalp,
        ))
    }

    /// Soft exit conditions, shared by the in-trend and trend-break paths.
    fn soft_exit(
        &self,
        symbol: &str,
        ctx: &EntryContext,
        ts: DateTime<Utc>,
        label: &str,
    ) -> Option<Signal> {
        let p = &self.params;
        let j = ctx.bars.len() - 1;
        let close = ctx.closes[j];
        let fast_j = ctx.fast[j];

        if close < fast_j * (1.0 - p.exit_ma_tolerance) && ctx.momentum[j] < p.momentum_exit_weak {
            return Some(Signal::exit_long(
                symbol,
                format!("{label}: close below fast ma with weak momentum"),
                ts,
            ));
        }
        if close < ctx.slow[j] * (1.0 - p.exit_ma_tolerance) {
            return Some(Signal::exit_long(
                symbol,
                format!("{label}: close below slow ma"),
                ts,
            ));
        }
        if close < fast_j && ctx.closes[j - 1] < ctx.fast[j - 1] {
            return Some(Signal::exit_long(
                symbol,
                format!("{label}: two consecutive closes below fast ma"),
                ts,
            ));
        }
        None
    }
}

/// Drop the final (possibly still-forming) element of a fetched series.
fn closed(bars: &[Bar]) -> &[Bar] {
    match bars.len() {
        0 => bars,
        n => &bars[..n - 1],
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use common::{Interval, SignalKind};

    const SYMBOL: &str = "BTCUSDT";

    fn t(i: usize) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + i as i64 * 300, 0).unwrap()
    }

    fn bar(i: usize, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Bar {
        Bar {
            open_time: t(i),
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Default candle geometry used by the fixtures: small bullish body,
    /// symmetric wicks, unit volume block.
    fn default_bar(i: usize, close: f64) -> Bar {
        bar(i, close - 0.10, close + 0.15, close - 0.15, close, 1000.0)
    }

    fn series(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| default_bar(i, c))
            .collect()
    }

    fn ramp(n: usize, start: f64, slope: f64) -> Vec<f64> {
        (0..n).map(|i| start + slope * i as f64).collect()
    }

    /// Append a thin still-forming bar; classification must ignore it.
    fn push_forming(bars: &mut Vec<Bar>) {
        let c = bars.last().unwrap().close;
        let i = bars.len();
        bars.push(bar(i, c, c + 0.05, c - 0.05, c, 10.0));
    }

    fn rising_trend() -> Vec<Bar> {
        let mut bars = series(&ramp(100, 100.0, 0.15));
        for b in &mut bars {
            b.volume = 1500.0;
        }
        push_forming(&mut bars);
        bars
    }

    fn falling_trend() -> Vec<Bar> {
        let mut bars = series(&ramp(100, 115.0, -0.15));
        for b in &mut bars {
            b.volume = 1500.0;
        }
        push_forming(&mut bars);
        bars
    }

    /// Gentle uptrend whose lows ride the fast average band, with a
    /// volume-confirmed bullish reclaim on the last closed bar.
    fn retest_entry() -> Vec<Bar> {
        let mut bars = series(&ramp(120, 100.0, 0.02));
        bars[119].volume = 3000.0;
        push_forming(&mut bars);
        bars
    }

    fn classifier() -> PatternClassifier {
        let interval: Interval = "5m".parse().unwrap();
        PatternClassifier::new(ParameterSet::for_interval(interval, 5))
    }

    fn classifier_with(tweak: impl FnOnce(&mut ParameterSet)) -> PatternClassifier {
        let interval: Interval = "5m".parse().unwrap();
        let mut params = ParameterSet::for_interval(interval, 5);
        tweak(&mut params);
        PatternClassifier::new(params)
    }

    #[test]
    fn retest_scenario_enters_long() {
        let signal = classifier().classify(SYMBOL, &retest_entry(), &rising_trend(), 0.0);
        assert_eq!(signal.kind, SignalKind::EnterLong, "reason: {}", signal.reason);
        assert!(signal.reason.contains("Retest"), "reason: {}", signal.reason);
        assert_eq!(signal.mode, TradeMode::Scalp);
        // Entry price is the last closed bar's close, not the forming bar.
        let entry = signal.entry_price.unwrap();
        assert!((entry - 102.38).abs() < 1e-9, "entry: {entry}");
        assert!(signal.stop_loss.unwrap() < entry);
    }

    #[test]
    fn classification_is_pure() {
        let entry = retest_entry();
        let trend = rising_trend();
        let clf = classifier();
        let first = clf.classify(SYMBOL, &entry, &trend, 0.0);
        let second = clf.classify(SYMBOL, &entry, &trend, 0.0);
        assert_eq!(first, second);
    }

    #[test]
    fn short_entry_series_names_the_deficit() {
        let mut entry = series(&ramp(30, 100.0, 0.02));
        push_forming(&mut entry);
        let signal = classifier().classify(SYMBOL, &entry, &rising_trend(), 0.0);
        assert_eq!(signal.kind, SignalKind::None);
        assert!(signal.reason.contains("bars"), "reason: {}", signal.reason);
    }

    #[test]
    fn short_trend_series_names_the_deficit() {
        let mut trend = series(&ramp(40, 100.0, 0.15));
        push_forming(&mut trend);
        let signal = classifier().classify(SYMBOL, &retest_entry(), &trend, 0.0);
        assert_eq!(signal.kind, SignalKind::None);
        assert!(signal.reason.contains("trend bars"), "reason: {}", signal.reason);
    }

    #[test]
    fn failed_trend_gate_blocks_trend_entries() {
        let signal = classifier().classify(SYMBOL, &retest_entry(), &falling_trend(), 0.0);
        assert_eq!(signal.kind, SignalKind::None, "reason: {}", signal.reason);
        assert!(
            signal.reason.contains("Trend gate"),
            "reason: {}",
            signal.reason
        );
    }

    #[test]
    fn anti_chase_gate_rejects_extended_price() {
        let mut closes = ramp(120, 100.0, 0.02);
        closes[119] += 1.0; // last close jumps far above the fast average
        let mut entry = series(&closes);
        entry[119] = bar(119, closes[119] - 0.10, closes[119] + 0.10, closes[119] - 0.15, closes[119], 3000.0);
        push_forming(&mut entry);

        let signal = classifier().classify(SYMBOL, &entry, &rising_trend(), 0.0);
        assert_eq!(signal.kind, SignalKind::None);
        assert!(
            signal.reason.contains("Anti-chase"),
            "reason: {}",
            signal.reason
        );
    }

    #[test]
    fn impulse_gate_rejects_climax_bar() {
        let mut closes = ramp(120, 100.0, 0.02);
        closes[119] = closes[118] + 0.02;
        let mut entry = series(&closes);
        // A huge-bodied bar that still closes near the fast average.
        let c = closes[119];
        entry[119] = bar(119, c + 2.0, c + 2.05, c - 0.05, c, 3000.0);
        push_forming(&mut entry);

        let signal = classifier().classify(SYMBOL, &entry, &rising_trend(), 0.0);
        assert_eq!(signal.kind, SignalKind::None);
        assert!(signal.reason.contains("Impulse"), "reason: {}", signal.reason);
    }

    #[test]
    fn liquidity_gate_rejects_thin_trend_volume() {
        let signal = classifier().classify(SYMBOL, &retest_entry(), &rising_trend(), 1e9);
        assert_eq!(signal.kind, SignalKind::None);
        assert!(
            signal.reason.contains("Liquidity"),
            "reason: {}",
            signal.reason
        );
    }

    #[test]
    fn liquidity_gate_rejects_thin_signal_bar() {
        let mut entry = retest_entry();
        entry[119].volume = 1000.0; // no relative volume on the signal bar
        let signal = classifier().classify(SYMBOL, &entry, &rising_trend(), 0.0);
        assert_eq!(signal.kind, SignalKind::None);
        assert!(
            signal.reason.contains("Liquidity"),
            "reason: {}",
            signal.reason
        );
    }

    #[test]
    fn continuation_scenario_enters_long() {
        // Ramp, then a 13-bar coil riding above the fast average, then an
        // upward break on volume.
        let plateau = 100.0 + 0.03 * 105.0;
        let mut closes = ramp(106, 100.0, 0.03);
        closes.extend(std::iter::repeat(plateau).take(13));
        closes.push(plateau + 0.20);

        let mut entry = series(&closes);
        for i in 106..119 {
            entry[i] = bar(i, plateau - 0.01, plateau + 0.02, plateau - 0.02, plateau, 1000.0);
        }
        let c = closes[119];
        entry[119] = bar(119, c - 0.15, c + 0.04, plateau + 0.01, c, 3000.0);
        push_forming(&mut entry);

        let clf = classifier_with(|p| {
            // Isolate the detector: no band touch, forgiving chase/floor gates.
            p.retest_band = 0.0001;
            p.range_floor_buffer = 0.0001;
            p.max_chase_atr_mult = 6.0;
        });
        let signal = clf.classify(SYMBOL, &entry, &rising_trend(), 0.0);
        assert_eq!(signal.kind, SignalKind::EnterLong, "reason: {}", signal.reason);
        assert!(
            signal.reason.contains("Continuation"),
            "reason: {}",
            signal.reason
        );
        assert_eq!(signal.mode, TradeMode::Continuation);
    }

    #[test]
    fn breakout_hold_scenario_enters_long() {
        // Steady ramp, then a swing-high break held for the confirm window.
        let mut closes = ramp(117, 100.0, 0.03);
        let swing_high = closes[116] + 0.15; // highest high of the swing window
        closes.push(swing_high + 0.05);
        closes.push(swing_high + 0.10);
        closes.push(swing_high + 0.20);

        let mut entry = series(&closes);
        for i in 117..120 {
            let c = closes[i];
            entry[i] = bar(i, c - 0.10, c + 0.10, c - 0.10, c, 1000.0);
        }
        entry[119].volume = 3000.0;
        push_forming(&mut entry);

        let clf = classifier_with(|p| {
            p.retest_band = 0.0001;
            p.range_compression_atr_mult = 0.0; // continuation can never coil
            p.max_chase_distance = 0.0120;
            p.max_chase_atr_mult = 6.0;
        });
        let signal = clf.classify(SYMBOL, &entry, &rising_trend(), 0.0);
        assert_eq!(signal.kind, SignalKind::EnterLong, "reason: {}", signal.reason);
        assert!(
            signal.reason.contains("Breakout"),
            "reason: {}",
            signal.reason
        );
        assert_eq!(signal.mode, TradeMode::Trend);
    }

    #[test]
    fn sweep_reversal_fires_only_when_trend_gate_failed() {
        // Gentle drift, a two-bar flush under the local low, then a strong
        // bullish reclaim.
        let mut closes = ramp(117, 100.0, 0.01);
        closes.push(100.90);
        closes.push(100.85);
        closes.push(101.20);

        let mut entry = series(&closes);
        entry[118] = bar(118, 100.75, 101.00, 100.55, 100.85, 1000.0);
        entry[119] = bar(119, 100.60, 101.25, 100.55, 101.20, 1000.0);
        push_forming(&mut entry);

        let clf = classifier();
        let counter_trend = clf.classify(SYMBOL, &entry, &falling_trend(), 0.0);
        assert_eq!(
            counter_trend.kind,
            SignalKind::EnterLong,
            "reason: {}",
            counter_trend.reason
        );
        assert!(
            counter_trend.reason.contains("Sweep"),
            "reason: {}",
            counter_trend.reason
        );
        assert_eq!(counter_trend.mode, TradeMode::Scalp);

        // With the trend gate passing, the sweep path is never consulted.
        let with_trend = clf.classify(SYMBOL, &entry, &rising_trend(), 0.0);
        assert!(
            !with_trend.reason.contains("Sweep"),
            "reason: {}",
            with_trend.reason
        );
    }

    #[test]
    fn breakdown_below_fast_ma_exits() {
        // Uptrend that rolls over: two closes under the fast average with
        // fading momentum.
        let mut closes = ramp(118, 100.0, 0.02);
        let top = closes[117];
        closes.push(top - 0.35);
        closes.push(top - 0.40);

        let mut entry = series(&closes);
        entry[119].volume = 3000.0;
        push_forming(&mut entry);

        let signal = classifier().classify(SYMBOL, &entry, &rising_trend(), 0.0);
        assert_eq!(signal.kind, SignalKind::ExitLong, "reason: {}", signal.reason);
        assert!(signal.reason.contains("Exit"), "reason: {}", signal.reason);
    }

    #[test]
    fn quiet_market_returns_no_signal() {
        // A coil with no reclaim, no break and no breakdown.
        let plateau = 100.0 + 0.03 * 105.0;
        let mut closes = ramp(106, 100.0, 0.03);
        closes.extend(std::iter::repeat(plateau).take(14));

        let mut entry = series(&closes);
        for i in 106..120 {
            entry[i] = bar(i, plateau - 0.01, plateau + 0.05, plateau - 0.05, plateau, 1000.0);
        }
        entry[119].volume = 3000.0;
        push_forming(&mut entry);

        let signal = classifier().classify(SYMBOL, &entry, &rising_trend(), 0.0);
        assert_eq!(signal.kind, SignalKind::None, "reason: {}", signal.reason);
        assert_eq!(signal.reason, "No signal");
    }

    #[test]
    fn timestamp_comes_from_the_last_closed_bar() {
        let entry = retest_entry();
        let signal = classifier().classify(SYMBOL, &entry, &rising_trend(), 0.0);
        assert_eq!(signal.timestamp, entry[119].open_time);
    }
}
