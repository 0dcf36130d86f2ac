use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cloneable handle that asks a running engine to stop after the current
/// generation.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    cancelled: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Early-abort check consulted between generations.
#[derive(Clone, Debug)]
pub struct StopController {
    handle: StopHandle,
    max_runtime: Option<Duration>,
    start_time: Instant,
}

impl StopController {
    pub fn new(handle: StopHandle, max_runtime_seconds: Option<f64>) -> Self {
        Self {
            handle,
            max_runtime: max_runtime_seconds
                .filter(|s| s.is_finite() && *s > 0.0)
                .map(Duration::from_secs_f64),
            start_time: Instant::now(),
        }
    }

    pub fn restart_clock(&mut self) {
        self.start_time = Instant::now();
    }

    pub fn handle(&self) -> StopHandle {
        self.handle.clone()
    }

    pub fn should_stop(&self) -> bool {
        if self.handle.is_cancelled() {
            return true;
        }
        match self.max_runtime {
            Some(limit) if self.start_time.elapsed() >= limit => {
                self.handle.cancel();
                true
            }
            _ => false,
        }
    }
}

impl Default for StopController {
    fn default() -> Self {
        Self::new(StopHandle::new(), None)
    }
}
