use std::time::Duration;

use tokio::sync::watch;

use common::OptimizationCandidate;

/// One notification about the best candidate of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressUpdate {
    pub candidate: OptimizationCandidate,
    /// Time since the run started.
    pub elapsed: Duration,
    /// Climbs finished so far.
    pub climbs: u64,
    /// Set on the single, unthrottled end-of-run update.
    pub is_final: bool,
}

/// Receiver of optimizer progress. Must not block.
pub trait ProgressSink {
    fn emit(&mut self, update: &ProgressUpdate);
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressUpdate),
{
    fn emit(&mut self, update: &ProgressUpdate) {
        self(update)
    }
}

/// Latest-value channel, suited to UI controls that only show the current best.
impl ProgressSink for watch::Sender<ProgressUpdate> {
    fn emit(&mut self, update: &ProgressUpdate) {
        self.send_replace(*update);
    }
}
