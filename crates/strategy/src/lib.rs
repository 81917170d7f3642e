pub mod config;
pub mod indicators;
pub mod position;
pub mod simulator;

pub use config::SimulatorConfig;
pub use indicators::IndicatorSeries;
pub use position::PositionState;
pub use simulator::{Evaluation, SignalSimulator};
