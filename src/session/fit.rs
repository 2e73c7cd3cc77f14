//! Debounced viewport fitting.
//!
//! Resize events arrive in bursts while a window is dragged. Each request
//! restarts the timer, and only the last size is applied once the timer
//! runs out. The host polls [`FitDebouncer::poll`] from its tick.

use std::time::{Duration, Instant};

/// Default quiet period before a fit is applied.
pub const FIT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Columns and rows available to the terminal view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

#[derive(Debug, Clone)]
pub struct FitDebouncer {
    delay: Duration,
    /// Latest requested size and when the request came in.
    pending: Option<(Viewport, Instant)>,
}

impl Default for FitDebouncer {
    fn default() -> Self {
        Self::new(FIT_DEBOUNCE)
    }
}

impl FitDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Request a fit, replacing any pending one and restarting the timer.
    pub fn request(&mut self, viewport: Viewport, now: Instant) {
        self.pending = Some((viewport, now));
    }

    /// Take the pending viewport if its quiet period has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Viewport> {
        match self.pending {
            Some((viewport, since)) if now.saturating_duration_since(since) >= self.delay => {
                self.pending = None;
                Some(viewport)
            }
            _ => None,
        }
    }

    /// Drop the pending fit without applying it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
