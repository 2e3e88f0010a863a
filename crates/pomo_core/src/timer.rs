use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

/// One-shot countdown running on its own thread.
///
/// `on_tick` fires once per elapsed second with the remaining seconds,
/// counting `duration, duration - 1, .., 1, 0`. On natural expiry
/// `on_complete` fires exactly once; a cancelled run stops silently.
/// Each `start` owns a fresh cancellation flag, so a latched cancel from a
/// previous run can never leak into the next one.
#[derive(Debug)]
pub struct IntervalTimer {
    cancelled: Arc<AtomicBool>,
    #[cfg_attr(not(test), allow(dead_code))]
    handle: Option<JoinHandle<()>>,
}

impl IntervalTimer {
    pub fn start<T, C>(duration_secs: u64, on_tick: T, on_complete: C) -> Self
    where
        T: Fn(u64) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        Self::start_with_interval(duration_secs, Duration::from_secs(1), on_tick, on_complete)
    }

    /// Same as `start` with the tick period injectable. Tests run countdowns
    /// at millisecond periods through this.
    pub fn start_with_interval<T, C>(
        duration_secs: u64,
        interval: Duration,
        on_tick: T,
        on_complete: C,
    ) -> Self
    where
        T: Fn(u64) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let handle = std::thread::spawn(move || {
            let mut remaining = duration_secs;
            loop {
                if flag.load(Ordering::SeqCst) {
                    return;
                }

                on_tick(remaining);

                if remaining == 0 {
                    break;
                }

                std::thread::sleep(interval);
                remaining -= 1;
            }

            // The flag may have been set during the final sleep; a cancelled
            // run must never report completion.
            if !flag.load(Ordering::SeqCst) {
                on_complete();
            }
        });

        Self {
            cancelled,
            handle: Some(handle),
        }
    }

    /// Requests early termination. Safe from any thread; asynchronous - the
    /// countdown thread may run for up to one more tick before it notices.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Blocks until the countdown thread exits. Test-only convenience; the
    /// controller never joins, it relies on the event queue instead.
    #[cfg(test)]
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
