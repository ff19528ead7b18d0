use crate::config::LayoutConfig;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Shared cancellation flag. Clones observe the same flag, so one can be handed
/// to another thread and cancelled from there.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Limits checked by the layout search before each trial.
#[derive(Debug, Clone, Default)]
pub struct SearchControl {
    cancel: Option<CancelToken>,
    deadline: Option<Instant>,
    max_trials: Option<usize>,
}

impl SearchControl {
    /// No limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits from `time_budget_ms` (measured from now) and `max_trials`.
    pub fn from_config(cfg: &LayoutConfig) -> Self {
        let mut control = Self::new().with_max_trials(cfg.max_trials);
        if let Some(ms) = cfg.time_budget_ms.filter(|&ms| ms > 0) {
            control = control.with_time_budget(Duration::from_millis(ms));
        }
        control
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_time_budget(self, budget: Duration) -> Self {
        self.with_deadline(Instant::now() + budget)
    }

    pub fn with_max_trials(mut self, max_trials: Option<usize>) -> Self {
        self.max_trials = max_trials;
        self
    }

    /// True when the search must stop before running trial number `trials + 1`.
    pub fn should_stop(&self, trials: usize) -> bool {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return true;
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return true;
        }
        self.max_trials.is_some_and(|max| trials >= max)
    }
}
