use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tracing::trace;

/// Shared stop flag for one search session.
///
/// Clones observe the same flag; the worker polls it at its checkpoints and
/// never gets interrupted in between.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Returns true when the caller should halt at `stage`.
    pub fn should_stop(&self, stage: &'static str) -> bool {
        let stop = self.is_cancelled();
        if stop {
            trace!(stage, "stop requested");
        }
        stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_flag() {
        let token = CancellationToken::new();
        let worker_side = token.clone();
        assert!(!worker_side.should_stop("document"));

        token.cancel();

        assert!(worker_side.is_cancelled());
        assert!(worker_side.should_stop("match"));
    }
}
