/// Exponential moving average with smoothing factor `2 / (period + 1)`.
///
/// The first valid value sits at index `period - 1` and is seeded with the
/// simple average of the first `period` inputs. Earlier indices are `NaN`
/// and must not be read; callers check bar-count preconditions first.
#[derive(Debug, Clone)]
pub struct Ema {
    pub period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self { period }
    }

    /// Compute the full series, aligned 1:1 with the input (oldest first).
    pub fn series(&self, values: &[f64]) -> Vec<f64> {
        let mut out = vec![f64::NAN; values.len()];
        if values.len() < self.period {
            return out;
        }

        let seed: f64 = values[..self.period].iter().sum::<f64>() / self.period as f64;
        out[self.period - 1] = seed;

        let k = 2.0 / (self.period as f64 + 1.0);
        for i in self.period..values.len() {
            out[i] = values[i] * k + out[i - 1] * (1.0 - k);
        }
        out
    }
}
