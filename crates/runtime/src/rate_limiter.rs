//! Fixed-window request throttling shared by the API layers.

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

/// Counts permits per fixed window. The window reopens `period` after it was
/// first entered, not after the last request, so a sustained burst cannot
/// keep pushing the reset forward.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    window: Arc<Mutex<Window>>,
    capacity: u64,
    period: Duration,
}

#[derive(Debug)]
struct Window {
    used: u64,
    opened_at: Instant,
}

impl RateLimiter {
    /// Create a limiter allowing `capacity` permits per `period`.
    pub fn new(capacity: u64, period: Duration) -> Self {
        Self {
            window: Arc::new(Mutex::new(Window { used: 0, opened_at: Instant::now() })),
            capacity,
            period,
        }
    }

    /// Take one permit from the current window. Returns `false` when the
    /// window is exhausted.
    pub fn try_acquire(&self) -> bool {
        let mut window = self.window.lock().expect("lock poisoned");
        let now = Instant::now();
        if now.duration_since(window.opened_at) >= self.period {
            window.opened_at = now;
            window.used = 1;
            return true;
        }
        if window.used < self.capacity {
            window.used += 1;
            return true;
        }
        false
    }
}
