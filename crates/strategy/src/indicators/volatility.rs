use common::Bar;

/// Average true range over the last `period` bars of a slice.
///
/// True range accounts for gaps: the max of high−low, |high−prevClose| and
/// |low−prevClose|. Returns `0.0` when fewer than `period + 1` bars are
/// available (a previous close is needed for every bar in the window).
#[derive(Debug, Clone)]
pub struct AverageTrueRange {
    pub period: usize,
}

impl AverageTrueRange {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self { period }
    }

    pub fn value(&self, bars: &[Bar]) -> f64 {
        if bars.len() < self.period + 1 {
            return 0.0;
        }

        let start = bars.len() - self.period;
        let mut sum = 0.0;
        for i in start..bars.len() {
            let bar = &bars[i];
            let prev_close = bars[i - 1].close;
            let tr = (bar.high - bar.low)
                .max((bar.high - prev_close).abs())
                .max((bar.low - prev_close).abs());
            sum += tr;
        }
        sum / self.period as f64
    }
}
