use std::cell::RefCell;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use common::{Candle, Fitness, Result, StrategyParameters};
use optimizer::{Bound, CancelToken, Objective, Optimizer, OptimizerConfig, ParameterBounds, ProgressUpdate};

/// Scores by distance to a target and records what it was asked about.
struct DistanceToTarget {
    target: StrategyParameters,
    seen: RefCell<Vec<StrategyParameters>>,
}

impl Objective for DistanceToTarget {
    fn score(&self, _: &[Candle], p: &StrategyParameters) -> Result<Fitness> {
        self.seen.borrow_mut().push(*p);
        let d = (p.buy_rsi - self.target.buy_rsi).abs()
            + (p.buy_cv - self.target.buy_cv).abs()
            + (p.sell_rsi - self.target.sell_rsi).abs()
            + (p.sell_cv - self.target.sell_cv).abs();
        Ok(Fitness { profit_percent: -d, trade_count: 5 })
    }
}

fn bound() -> impl Strategy<Value = Bound> {
    (-500.0f64..500.0, 0.0f64..300.0).prop_map(|(low, width)| Bound::new(low, low + width))
}

proptest! {
    /// Random starts and neighbors never leave the configured box.
    #[test]
    fn every_candidate_respects_bounds(
        seed in any::<u64>(),
        step in 0.1f64..80.0,
        b in (bound(), bound(), bound(), bound()),
    ) {
        let bounds = ParameterBounds { buy_rsi: b.0, buy_cv: b.1, sell_rsi: b.2, sell_cv: b.3 };
        let cfg = OptimizerConfig {
            time_budget_ms: 100,
            max_iterations_per_climb: 40,
            step_size: step,
            bounds,
            ..OptimizerConfig::default()
        };
        let objective = DistanceToTarget {
            target: StrategyParameters { buy_rsi: b.0.low, buy_cv: b.1.high, sell_rsi: b.2.low, sell_cv: b.3.high },
            seen: RefCell::new(Vec::new()),
        };
        let mut opt = Optimizer::new(cfg, objective).unwrap();

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();
        let state = rt.block_on(async {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut sink = |_: &ProgressUpdate| {};
            opt.run(&[], &mut rng, &mut sink, &CancelToken::new()).await
        }).unwrap();

        prop_assert!(bounds.contains(&state.best.params));
        let seen = opt.objective().seen.borrow();
        prop_assert!(!seen.is_empty());
        for p in seen.iter() {
            prop_assert!(bounds.contains(p), "{:?} outside {:?}", p, bounds);
        }
    }

    /// Perturbing always lands back inside the box, whatever the step.
    #[test]
    fn perturb_is_clamped(seed in any::<u64>(), step in 0.0f64..10_000.0) {
        let bounds = ParameterBounds::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut p = bounds.sample(&mut rng);
        for _ in 0..50 {
            p = bounds.perturb(&p, step, &mut rng);
            prop_assert!(bounds.contains(&p));
        }
    }
}
