use common::Bar;

/// Arithmetic mean of notional volume (volume × close) over the last
/// `period` bars of a slice. Returns `0.0` when the slice is shorter than
/// `period`.
#[derive(Debug, Clone)]
pub struct VolumeMa {
    pub period: usize,
}

impl VolumeMa {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "volume MA period must be >= 1");
        Self { period }
    }

    pub fn value(&self, bars: &[Bar]) -> f64 {
        if bars.len() < self.period {
            return 0.0;
        }
        bars[bars.len() - self.period..]
            .iter()
            .map(Bar::notional_volume)
            .sum::<f64>()
            / self.period as f64
    }
}
