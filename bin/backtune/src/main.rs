use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use common::{format_timestamp, Candle, Config};
use optimizer::{CancelToken, Optimizer, OptimizerFileConfig, ProgressUpdate};
use strategy::SignalSimulator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env()?;
    let mut file_cfg = OptimizerFileConfig::load_or_default(&cfg.optimizer_config_path)?;
    if let Some(ms) = cfg.time_budget_ms {
        file_cfg.optimizer.time_budget_ms = ms;
    }

    // ── Candles ───────────────────────────────────────────────────────────────
    let raw = std::fs::read_to_string(&cfg.candles_path)
        .with_context(|| format!("Failed to read candles at '{}'", cfg.candles_path.display()))?;
    let candles: Vec<Candle> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse candles at '{}'", cfg.candles_path.display()))?;
    info!(
        count = candles.len(),
        from = ?candles.first().and_then(Candle::datetime),
        to = ?candles.last().and_then(Candle::datetime),
        "Candles loaded"
    );

    // ── Optimizer ─────────────────────────────────────────────────────────────
    let simulator = SignalSimulator::new(file_cfg.simulator.clone())?;
    let mut optimizer = Optimizer::new(file_cfg.optimizer.clone(), simulator)?;
    let mut rng = match cfg.seed {
        Some(seed) => {
            info!(seed, "Seeded run");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupt received, finishing the current climb");
                cancel.cancel();
            }
        });
    }

    let mut sink = |u: &ProgressUpdate| {
        let p = u.candidate.params;
        info!(
            profit_pct = u.candidate.profit_percent,
            trades = u.candidate.trade_count,
            buy_rsi = p.buy_rsi,
            buy_cv = p.buy_cv,
            sell_rsi = p.sell_rsi,
            sell_cv = p.sell_cv,
            climbs = u.climbs,
            elapsed_ms = u64::try_from(u.elapsed.as_millis()).unwrap_or(u64::MAX),
            is_final = u.is_final,
            "Best so far"
        );
    };
    let state = optimizer.run(&candles, &mut rng, &mut sink, &cancel).await?;

    // ── Report ────────────────────────────────────────────────────────────────
    let summary = json!({
        "climbs": state.climbs_completed,
        "iterations": state.iterations,
        "elapsed_ms": u64::try_from(state.elapsed.as_millis()).unwrap_or(u64::MAX),
    });

    if !state.best.is_usable() {
        warn!(
            min_trades = optimizer.config().min_trade_count,
            "No parameter set reached the minimum trade count"
        );
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "usable": false, "run": summary }))?
        );
        return Ok(());
    }

    let evaluation = optimizer
        .objective()
        .evaluate(&candles, &state.best.params, false)?;
    for trade in &evaluation.trades {
        info!(
            bought = %format_timestamp(trade.buy_time),
            sold = %format_timestamp(trade.sell_time),
            buy_price = trade.buy_price,
            sell_price = trade.sell_price,
            pct = trade.percentage_change,
            "Trade"
        );
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "usable": true,
            "run": summary,
            "best": state.best,
            "portfolio": evaluation.portfolio,
            "trades": evaluation.trades,
            "signals": evaluation.signals,
        }))?
    );
    Ok(())
}
