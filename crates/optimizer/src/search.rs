use std::time::Duration;

use rand::Rng;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use common::{Candle, Error, Fitness, OptimizationCandidate, Result, StrategyParameters};
use strategy::SignalSimulator;

use crate::cancel::CancelToken;
use crate::config::OptimizerConfig;
use crate::progress::{ProgressSink, ProgressUpdate};
use crate::throttle::Throttle;

/// The function being maximized.
pub trait Objective {
    fn score(&self, candles: &[Candle], params: &StrategyParameters) -> Result<Fitness>;
}

impl Objective for SignalSimulator {
    fn score(&self, candles: &[Candle], params: &StrategyParameters) -> Result<Fitness> {
        self.evaluate(candles, params, false).map(|e| e.fitness())
    }
}

/// Outcome of one `Optimizer::run`. Nothing carries over between runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationRunState {
    /// Best qualifying candidate, or the sentinel when none qualified.
    pub best: OptimizationCandidate,
    pub elapsed: Duration,
    /// Objective evaluations across all climbs.
    pub iterations: u64,
    pub climbs_attempted: u64,
    pub climbs_completed: u64,
}

impl OptimizationRunState {
    fn new() -> Self {
        Self {
            best: OptimizationCandidate::sentinel(),
            elapsed: Duration::ZERO,
            iterations: 0,
            climbs_attempted: 0,
            climbs_completed: 0,
        }
    }
}

/// Random-restart hill climber over the strategy thresholds.
///
/// Restarts run until the time budget is spent or the run is cancelled. Each
/// climb starts from a uniform sample and accepts a single-dimension neighbor
/// only when it is strictly more profitable and trades at least
/// `min_trade_count` times.
pub struct Optimizer<O = SignalSimulator> {
    config: OptimizerConfig,
    objective: O,
}

impl<O: Objective> Optimizer<O> {
    pub fn new(config: OptimizerConfig, objective: O) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, objective })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Search until the time budget runs out.
    ///
    /// `sink` gets the first improvement, further improvements at most once
    /// per `progress_interval`, and one final update with `is_final` set.
    /// A climb that fails to evaluate is skipped. The run itself only fails
    /// when climbs were attempted and none of them completed.
    pub async fn run<R, S>(
        &mut self,
        candles: &[Candle],
        rng: &mut R,
        sink: &mut S,
        cancel: &CancelToken,
    ) -> Result<OptimizationRunState>
    where
        R: Rng + ?Sized,
        S: ProgressSink + ?Sized,
    {
        let budget = self.config.time_budget();
        let started = Instant::now();
        let mut throttle = Throttle::new(self.config.progress_interval());
        let mut state = OptimizationRunState::new();
        let mut last_error: Option<Error> = None;

        info!(
            candles = candles.len(),
            budget_ms = self.config.time_budget_ms,
            min_trades = self.config.min_trade_count,
            "Optimization started"
        );

        while started.elapsed() < budget {
            if cancel.is_cancelled() {
                info!(climbs = state.climbs_completed, "Optimization cancelled");
                break;
            }

            state.climbs_attempted += 1;
            match self.climb(candles, rng, &mut state.iterations) {
                Ok(candidate) => {
                    state.climbs_completed += 1;
                    debug!(
                        climb = state.climbs_attempted,
                        profit_pct = candidate.profit_percent,
                        trades = candidate.trade_count,
                        "Climb finished"
                    );

                    if candidate.trade_count >= self.config.min_trade_count
                        && candidate.profit_percent > state.best.profit_percent
                    {
                        state.best = candidate;
                        let now = Instant::now();
                        if throttle.should_emit(now) {
                            sink.emit(&ProgressUpdate {
                                candidate,
                                elapsed: now - started,
                                climbs: state.climbs_completed,
                                is_final: false,
                            });
                        }
                    }
                }
                Err(e) => {
                    warn!(climb = state.climbs_attempted, error = %e, "Climb aborted");
                    last_error = Some(e);
                }
            }

            tokio::time::sleep(self.config.yield_delay()).await;
        }

        state.elapsed = started.elapsed();
        sink.emit(&ProgressUpdate {
            candidate: state.best,
            elapsed: state.elapsed,
            climbs: state.climbs_completed,
            is_final: true,
        });

        if state.climbs_attempted > 0 && state.climbs_completed == 0 {
            return Err(Error::NoCompletedClimbs {
                attempted: state.climbs_attempted,
                last_error: last_error.map(|e| e.to_string()).unwrap_or_default(),
            });
        }

        info!(
            climbs = state.climbs_completed,
            iterations = state.iterations,
            elapsed_ms = u64::try_from(state.elapsed.as_millis()).unwrap_or(u64::MAX),
            profit_pct = state.best.profit_percent,
            trades = state.best.trade_count,
            usable = state.best.is_usable(),
            "Optimization finished"
        );
        Ok(state)
    }

    /// One hill climb from a fresh random start, run to its full iteration count.
    fn climb<R: Rng + ?Sized>(
        &self,
        candles: &[Candle],
        rng: &mut R,
        iterations: &mut u64,
    ) -> Result<OptimizationCandidate> {
        let bounds = &self.config.bounds;

        let start = bounds.sample(rng);
        *iterations += 1;
        let mut current = OptimizationCandidate::new(start, self.objective.score(candles, &start)?);

        for _ in 1..self.config.max_iterations_per_climb {
            let neighbor = bounds.perturb(&current.params, self.config.step_size, rng);
            *iterations += 1;
            let fitness = self.objective.score(candles, &neighbor)?;

            if fitness.profit_percent > current.profit_percent
                && fitness.trade_count >= self.config.min_trade_count
            {
                current = OptimizationCandidate::new(neighbor, fitness);
            }
        }
        Ok(current)
    }
}
