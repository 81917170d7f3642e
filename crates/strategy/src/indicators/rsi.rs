/// RSI (Relative Strength Index) indicator.
///
/// Uses Wilder's smoothed moving average (same as TradingView / standard RSI).
/// The first `period` price changes only seed the averages; one RSI value is
/// produced for every change after that.
#[derive(Debug, Clone)]
pub struct RsiIndicator {
    pub period: usize,
}

impl RsiIndicator {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "RSI period must be >= 2");
        Self { period }
    }

    /// Candle index of the first RSI value.
    pub fn offset(&self) -> usize {
        self.period
    }

    /// Compute the RSI series from close prices (oldest first).
    ///
    /// Returns `closes.len() - period - 1` values; element `i` belongs to
    /// `closes[i + period]`, so the last candle has no value. Empty when
    /// there is not enough data.
    pub fn compute(&self, closes: &[f64]) -> Vec<f64> {
        if closes.len() < self.period + 1 {
            return Vec::new();
        }

        let period = self.period as f64;
        let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
        let initial = &changes[..self.period];

        // First average gain/loss over the initial `period` changes
        let mut avg_gain = initial.iter().filter(|&&c| c > 0.0).sum::<f64>() / period;
        let mut avg_loss = initial.iter().filter(|&&c| c < 0.0).map(|c| c.abs()).sum::<f64>() / period;

        let mut out = Vec::with_capacity(changes.len() - self.period);
        for &change in &changes[self.period..] {
            let gain = if change > 0.0 { change } else { 0.0 };
            let loss = if change < 0.0 { change.abs() } else { 0.0 };
            avg_gain = (avg_gain * (period - 1.0) + gain) / period;
            avg_loss = (avg_loss * (period - 1.0) + loss) / period;

            let rs = if avg_loss == 0.0 { f64::INFINITY } else { avg_gain / avg_loss };
            out.push(100.0 - 100.0 / (1.0 + rs));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_empty_when_insufficient_data() {
        let rsi = RsiIndicator::new(14);
        // Need at least period+1 = 15 values
        let prices = vec![100.0; 14];
        assert!(rsi.compute(&prices).is_empty());
    }

    #[test]
    fn rsi_length_is_closes_minus_period_minus_one() {
        let rsi = RsiIndicator::new(14);
        let prices: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        assert!(rsi.compute(&prices).is_empty());

        let prices: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        assert_eq!(rsi.compute(&prices).len(), 40 - 14 - 1);
    }

    #[test]
    fn rsi_all_gains_returns_100() {
        let rsi = RsiIndicator::new(3);
        // Strictly increasing prices → RSI = 100
        let prices = vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0];
        let values = rsi.compute(&prices);
        assert_eq!(values.len(), 2);
        for v in values {
            assert!((v - 100.0).abs() < 1e-6, "Expected ~100, got {v}");
        }
    }

    #[test]
    fn rsi_all_losses_returns_0() {
        let rsi = RsiIndicator::new(3);
        // Strictly decreasing prices → RSI = 0
        let prices = vec![15.0, 14.0, 13.0, 12.0, 11.0, 10.0];
        for v in rsi.compute(&prices) {
            assert!(v.abs() < 1e-6, "Expected ~0, got {v}");
        }
    }

    #[test]
    fn rsi_flat_series_has_no_losses() {
        let rsi = RsiIndicator::new(3);
        let values = rsi.compute(&[5.0; 8]);
        assert!(values.iter().all(|&v| v == 100.0));
    }

    #[test]
    fn rsi_known_values_period_two() {
        // changes: +1, -1 | +2, -2
        // seed: gain 0.5, loss 0.5
        // +2 → gain 1.25, loss 0.25 → RS 5 → 83.333..
        // -2 → gain 0.625, loss 1.125 → RS 0.5555.. → 35.714..
        let rsi = RsiIndicator::new(2);
        let values = rsi.compute(&[10.0, 11.0, 10.0, 12.0, 10.0]);
        assert_eq!(values.len(), 2);
        assert!((values[0] - 83.333_333_333).abs() < 1e-6, "got {}", values[0]);
        assert!((values[1] - 35.714_285_714).abs() < 1e-6, "got {}", values[1]);
    }

    #[test]
    fn rsi_reference_series_known_values() {
        let rsi = RsiIndicator::new(14);
        let prices = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
        ];
        let values = rsi.compute(&prices);
        let expected = [66.249_619, 66.480_942, 69.346_853, 66.294_713, 57.915_021];
        assert_eq!(values.len(), expected.len());
        for (i, (v, e)) in values.iter().zip(expected).enumerate() {
            assert!((v - e).abs() < 1e-5, "rsi[{i}]: expected {e}, got {v}");
        }

        // Values sit at candles 14..=18; candle 19 has none
        assert_eq!(rsi.offset(), 14);
        assert_eq!(rsi.offset() + values.len(), prices.len() - 1);
    }
}
