//! Cancellable delayed tasks.
//!
//! The table only ever needs "run this callback after a delay, unless
//! cancelled". [`Timer`] is that contract; [`TokioTimer`] fulfils it on a
//! tokio runtime.

use std::{fmt, time::Duration};

use tokio::{runtime::Handle, task::AbortHandle};

use crate::{EngineError, ResultEngine};

/// A delayed task to run once.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Schedules delayed tasks.
pub trait Timer: Send + Sync {
    /// Runs `task` after `delay`, unless the returned handle is cancelled first.
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;
}

/// Handle of a pending task. Dropping it does **not** cancel the task.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancels the task if it has not run yet.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("pending", &self.cancel.is_some())
            .finish()
    }
}

/// [`Timer`] backed by a tokio runtime.
#[derive(Clone, Debug)]
pub struct TokioTimer {
    runtime: Handle,
}

impl TokioTimer {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Uses the runtime the caller runs on.
    pub fn current() -> ResultEngine<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|err| EngineError::Runtime(err.to_string()))
    }
}

impl Timer for TokioTimer {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let abort: AbortHandle = self
            .runtime
            .spawn(async move {
                tokio::time::sleep(delay).await;
                task();
            })
            .abort_handle();
        TimerHandle::new(move || abort.abort())
    }
}
