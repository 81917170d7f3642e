pub mod chaikin;
pub mod rsi;

pub use chaikin::ChaikinVolatility;
pub use rsi::RsiIndicator;

use common::Candle;

use crate::config::SimulatorConfig;

/// RSI and CV series for one candle slice, each tagged with the candle index
/// of its first element.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub rsi: Vec<f64>,
    pub cv: Vec<f64>,
    pub rsi_offset: usize,
    pub cv_offset: usize,
}

impl IndicatorSeries {
    pub fn compute(candles: &[Candle], cfg: &SimulatorConfig) -> Self {
        let rsi = RsiIndicator::new(cfg.rsi_period);
        let cv = ChaikinVolatility::new(cfg.cv_period);

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
        let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

        Self {
            rsi: rsi.compute(&closes),
            cv: cv.compute(&highs, &lows),
            rsi_offset: rsi.offset(),
            cv_offset: cv.offset(),
        }
    }

    /// True when no candle has both indicator values.
    pub fn is_empty(&self) -> bool {
        self.rsi.is_empty() || self.cv.is_empty()
    }

    /// First candle index at which both indicators are defined.
    pub fn first_index(&self) -> usize {
        self.rsi_offset.max(self.cv_offset)
    }

    /// `(rsi, cv)` for the given candle index.
    pub fn at(&self, candle_index: usize) -> Option<(f64, f64)> {
        let rsi = self.rsi.get(candle_index.checked_sub(self.rsi_offset)?)?;
        let cv = self.cv.get(candle_index.checked_sub(self.cv_offset)?)?;
        Some((*rsi, *cv))
    }
}
