use rand::Rng;
use serde::{Deserialize, Serialize};

use common::{Dimension, Error, Result, StrategyParameters};

/// Closed interval `[low, high]` for one parameter. Written as a two-element
/// array in config files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Bound {
    pub low: f64,
    pub high: f64,
}

impl Bound {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.low..=self.high).contains(&value)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.low, self.high)
    }
}

impl From<(f64, f64)> for Bound {
    fn from((low, high): (f64, f64)) -> Self {
        Self { low, high }
    }
}

impl From<Bound> for (f64, f64) {
    fn from(b: Bound) -> Self {
        (b.low, b.high)
    }
}

/// Search box for the four strategy thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterBounds {
    pub buy_rsi: Bound,
    pub buy_cv: Bound,
    pub sell_rsi: Bound,
    pub sell_cv: Bound,
}

impl Default for ParameterBounds {
    fn default() -> Self {
        Self {
            buy_rsi: Bound::new(0.0, 100.0),
            buy_cv: Bound::new(-50.0, 0.0),
            sell_rsi: Bound::new(0.0, 100.0),
            sell_cv: Bound::new(0.0, 400.0),
        }
    }
}

impl ParameterBounds {
    pub fn get(&self, dim: Dimension) -> Bound {
        match dim {
            Dimension::BuyRsi => self.buy_rsi,
            Dimension::BuyCv => self.buy_cv,
            Dimension::SellRsi => self.sell_rsi,
            Dimension::SellCv => self.sell_cv,
        }
    }

    /// Every bound must be finite with `low <= high`, and so must its width.
    pub fn validate(&self) -> Result<()> {
        for dim in Dimension::ALL {
            let b = self.get(dim);
            let ordered = b.low.is_finite() && b.high.is_finite() && b.low <= b.high;
            if !(ordered && (b.high - b.low).is_finite()) {
                return Err(Error::InvalidBound { dimension: dim, low: b.low, high: b.high });
            }
        }
        Ok(())
    }

    pub fn contains(&self, params: &StrategyParameters) -> bool {
        Dimension::ALL
            .into_iter()
            .all(|dim| self.get(dim).contains(params.get(dim)))
    }

    /// Uniform sample inside the box. Bounds must have passed `validate`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> StrategyParameters {
        let mut params = StrategyParameters::default();
        for dim in Dimension::ALL {
            let b = self.get(dim);
            params.set(dim, rng.random_range(b.low..=b.high));
        }
        params
    }

    /// Move exactly one randomly chosen dimension by `±step`, clamped to its bound.
    pub fn perturb<R: Rng + ?Sized>(
        &self,
        params: &StrategyParameters,
        step: f64,
        rng: &mut R,
    ) -> StrategyParameters {
        let dim = Dimension::ALL[rng.random_range(0..Dimension::ALL.len())];
        let delta = if rng.random_bool(0.5) { step } else { -step };

        let mut next = *params;
        next.set(dim, self.get(dim).clamp(params.get(dim) + delta));
        next
    }
}
