use serde::Serialize;
use tracing::trace;

use common::{
    Candle, Error, Fitness, PortfolioResult, Result, Signal, SignalKind, StrategyParameters, Trade,
};

use crate::config::SimulatorConfig;
use crate::indicators::IndicatorSeries;
use crate::position::PositionState;

/// Result of replaying a strategy over one candle series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub signals: Vec<Signal>,
    pub trades: Vec<Trade>,
    pub portfolio: PortfolioResult,
}

impl Evaluation {
    fn empty(initial_investment: f64) -> Self {
        Self {
            signals: Vec::new(),
            trades: Vec::new(),
            portfolio: PortfolioResult::from_trades(initial_investment, &[]),
        }
    }

    pub fn profit_percent(&self) -> f64 {
        self.portfolio.total_percentage_change
    }

    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    pub fn fitness(&self) -> Fitness {
        Fitness {
            profit_percent: self.profit_percent(),
            trade_count: self.trade_count(),
        }
    }
}

/// Replays the RSI + Chaikin Volatility threshold strategy over a candle series.
///
/// Stateless between calls: indicators, signals and trades are rebuilt on
/// every `evaluate`. Parameter values are used as given; keeping them inside
/// any search bounds is the caller's job.
#[derive(Debug, Clone, Default)]
pub struct SignalSimulator {
    config: SimulatorConfig,
}

impl SignalSimulator {
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Scan the series once, buying when `rsi < buy_rsi && cv < buy_cv` while
    /// flat and selling when `rsi > sell_rsi && cv > sell_cv` while holding.
    ///
    /// With `emit_all_triggers`, predicate hits that did not change the
    /// position are also recorded as signals with `executed == false`.
    /// A position still open at the end is not counted.
    pub fn evaluate(
        &self,
        candles: &[Candle],
        params: &StrategyParameters,
        emit_all_triggers: bool,
    ) -> Result<Evaluation> {
        validate_candles(candles)?;

        let series = IndicatorSeries::compute(candles, &self.config);
        if series.is_empty() {
            return Ok(Evaluation::empty(self.config.initial_investment));
        }

        let mut state = PositionState::Flat;
        let mut signals = Vec::new();
        let mut trades = Vec::new();

        for (index, candle) in candles.iter().enumerate().skip(series.first_index()) {
            let Some((rsi, cv)) = series.at(index) else {
                break;
            };
            let buy_hit = rsi < params.buy_rsi && cv < params.buy_cv;
            let sell_hit = rsi > params.sell_rsi && cv > params.sell_cv;

            let mut entered = false;
            let mut exited = false;
            if buy_hit && state.enter(candle.time, candle.close) {
                entered = true;
                signals.push(signal(candle, SignalKind::Buy, true));
            } else if sell_hit && state.is_holding() {
                if let Some(trade) = state.exit(candle.time, candle.close) {
                    exited = true;
                    trades.push(trade);
                    signals.push(signal(candle, SignalKind::Sell, true));
                }
            }

            if emit_all_triggers {
                if buy_hit && !entered {
                    signals.push(signal(candle, SignalKind::Buy, false));
                }
                if sell_hit && !exited {
                    signals.push(signal(candle, SignalKind::Sell, false));
                }
            }
        }

        let portfolio = PortfolioResult::from_trades(self.config.initial_investment, &trades);
        trace!(
            trades = trades.len(),
            profit_pct = portfolio.total_percentage_change,
            open_at_end = state.is_holding(),
            "Strategy evaluated"
        );

        Ok(Evaluation { signals, trades, portfolio })
    }
}

fn signal(candle: &Candle, kind: SignalKind, executed: bool) -> Signal {
    Signal {
        time: candle.time,
        kind,
        price: candle.close,
        executed,
    }
}

fn validate_candles(candles: &[Candle]) -> Result<()> {
    for (index, c) in candles.iter().enumerate() {
        let fields = [("open", c.open), ("high", c.high), ("low", c.low), ("close", c.close)];
        if let Some(&(field, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::MalformedCandle { index, field, value });
        }
    }
    Ok(())
}
