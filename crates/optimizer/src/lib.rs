pub mod bounds;
pub mod cancel;
pub mod config;
pub mod progress;
pub mod search;
pub mod throttle;

pub use bounds::{Bound, ParameterBounds};
pub use cancel::CancelToken;
pub use config::{OptimizerConfig, OptimizerFileConfig};
pub use progress::{ProgressSink, ProgressUpdate};
pub use search::{Objective, OptimizationRunState, Optimizer};
pub use throttle::Throttle;
