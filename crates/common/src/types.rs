use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV price bar.
///
/// Series are expected in ascending `time` order with unique timestamps.
/// Nothing downstream sorts or deduplicates; a misordered series produces
/// misaligned indicator indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket open time, in seconds since the Unix epoch.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl Candle {
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }
}

/// RFC 3339 rendering of an epoch-seconds timestamp, or the raw number when
/// it is out of chrono's range.
pub fn format_timestamp(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|d| d.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}

/// Side of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    Buy,
    Sell,
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalKind::Buy => write!(f, "BUY"),
            SignalKind::Sell => write!(f, "SELL"),
        }
    }
}

/// A buy or sell marker produced by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub time: i64,
    pub kind: SignalKind,
    pub price: f64,
    /// `false` for a predicate hit that did not change the position
    /// (only recorded when all triggers are requested).
    pub executed: bool,
}

/// A closed round trip: one buy matched with the following sell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub buy_time: i64,
    pub sell_time: i64,
    pub buy_price: f64,
    pub sell_price: f64,
    pub percentage_change: f64,
}

/// Compounded outcome of a trade list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioResult {
    pub initial_investment: f64,
    pub final_value: f64,
    pub total_percentage_change: f64,
}

impl PortfolioResult {
    pub const DEFAULT_INITIAL_INVESTMENT: f64 = 1000.0;

    /// Reinvest the whole balance into every trade, in order.
    pub fn from_trades(initial_investment: f64, trades: &[Trade]) -> Self {
        let final_value = trades
            .iter()
            .fold(initial_investment, |balance, t| balance * (1.0 + t.percentage_change / 100.0));
        Self {
            initial_investment,
            final_value,
            total_percentage_change: (final_value / initial_investment - 1.0) * 100.0,
        }
    }
}

/// One of the four tunable thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    BuyRsi,
    BuyCv,
    SellRsi,
    SellCv,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::BuyRsi,
        Dimension::BuyCv,
        Dimension::SellRsi,
        Dimension::SellCv,
    ];
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::BuyRsi => write!(f, "buy_rsi"),
            Dimension::BuyCv => write!(f, "buy_cv"),
            Dimension::SellRsi => write!(f, "sell_rsi"),
            Dimension::SellCv => write!(f, "sell_cv"),
        }
    }
}

/// Entry/exit thresholds for the RSI + Chaikin Volatility strategy.
///
/// Buy when `rsi < buy_rsi && cv < buy_cv`; sell when
/// `rsi > sell_rsi && cv > sell_cv`. Values are not range-checked here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyParameters {
    pub buy_rsi: f64,
    pub buy_cv: f64,
    pub sell_rsi: f64,
    pub sell_cv: f64,
}

impl Default for StrategyParameters {
    fn default() -> Self {
        Self {
            buy_rsi: 40.0,
            buy_cv: -19.9,
            sell_rsi: 72.0,
            sell_cv: 65.0,
        }
    }
}

impl StrategyParameters {
    pub fn get(&self, dim: Dimension) -> f64 {
        match dim {
            Dimension::BuyRsi => self.buy_rsi,
            Dimension::BuyCv => self.buy_cv,
            Dimension::SellRsi => self.sell_rsi,
            Dimension::SellCv => self.sell_cv,
        }
    }

    pub fn set(&mut self, dim: Dimension, value: f64) {
        match dim {
            Dimension::BuyRsi => self.buy_rsi = value,
            Dimension::BuyCv => self.buy_cv = value,
            Dimension::SellRsi => self.sell_rsi = value,
            Dimension::SellCv => self.sell_cv = value,
        }
    }
}

/// The scalar outcome the optimizer ranks parameter sets by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fitness {
    pub profit_percent: f64,
    pub trade_count: usize,
}

/// A parameter set together with the fitness it scored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationCandidate {
    pub params: StrategyParameters,
    pub profit_percent: f64,
    pub trade_count: usize,
}

impl OptimizationCandidate {
    pub fn new(params: StrategyParameters, fitness: Fitness) -> Self {
        Self {
            params,
            profit_percent: fitness.profit_percent,
            trade_count: fitness.trade_count,
        }
    }

    /// Placeholder best used before any qualifying candidate is found.
    pub fn sentinel() -> Self {
        Self {
            params: StrategyParameters::default(),
            profit_percent: f64::NEG_INFINITY,
            trade_count: 0,
        }
    }

    /// `false` for the sentinel: no parameter set met the trade-count floor.
    pub fn is_usable(&self) -> bool {
        self.profit_percent != f64::NEG_INFINITY
    }
}
