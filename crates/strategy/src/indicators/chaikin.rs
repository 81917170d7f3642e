/// Chaikin Volatility indicator.
///
/// Percent rate of change, over `period` bars, of an EMA of the high-low range.
#[derive(Debug, Clone)]
pub struct ChaikinVolatility {
    pub period: usize,
}

impl ChaikinVolatility {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Chaikin volatility period must be >= 1");
        Self { period }
    }

    /// Candle index of the first CV value.
    pub fn offset(&self) -> usize {
        2 * self.period - 1
    }

    /// Compute the CV series from per-bar highs and lows (oldest first).
    ///
    /// Element `i` belongs to bar `i + 2 * period - 1`. Empty when the input is
    /// shorter than `2 * period` or the slices differ in length. A zero EMA
    /// baseline yields a non-finite value for that bar.
    pub fn compute(&self, highs: &[f64], lows: &[f64]) -> Vec<f64> {
        if highs.len() != lows.len() || highs.len() < 2 * self.period {
            return Vec::new();
        }

        let ranges: Vec<f64> = highs.iter().zip(lows).map(|(h, l)| h - l).collect();
        let smoothed = ema_series(&ranges, self.period);

        smoothed
            .iter()
            .skip(self.period)
            .zip(&smoothed)
            .map(|(current, base)| (current - base) / base * 100.0)
            .collect()
    }
}

/// EMA over `data` with smoothing `2 / (period + 1)`, seeded with the SMA of
/// the first `period` values. Element 0 belongs to `data[period - 1]`.
fn ema_series(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return Vec::new();
    }
    let k = 2.0 / (period as f64 + 1.0);

    let mut ema_val = data[..period].iter().sum::<f64>() / period as f64;
    let mut out = Vec::with_capacity(data.len() - period + 1);
    out.push(ema_val);
    for &value in &data[period..] {
        ema_val = value * k + ema_val * (1.0 - k);
        out.push(ema_val);
    }
    out
}
