//! Delay scheduling between trace steps.
//!
//! Engines never sleep directly. Between visual steps they await
//! [`Scheduler::suspend`], which hands control back to whatever is driving
//! the run future (a UI event loop, `pollster`, a test) and resumes the engine
//! once the delay has elapsed. Only one suspension is outstanding at a time,
//! so resumption order is the call order.
//!
//! # Implementations
//!
//! - [`ThreadTimer`] - wall-clock delays; a helper thread sleeps and wakes
//!   the task, so the executor thread is never blocked.
//! - [`VirtualClock`] - advances a virtual clock and resumes on the next
//!   poll. Deterministic; used for headless recording, tests and benches.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll, Waker};
use std::thread;
use std::time::Duration;

use crate::error::SortError;

/// Delay in milliseconds at speed 1.0. `delay_ms = BASE_DELAY_MS / speed`.
pub const BASE_DELAY_MS: f64 = 250.0;

/// Convert a user speed factor into the per-step delay.
///
/// Higher speed means a shorter delay, rounded to whole nanoseconds. Speeds
/// that are non-finite or not strictly positive are rejected, as are speeds
/// so small the delay overflows or so large it rounds to zero.
pub fn delay_for_speed(speed: f64) -> Result<Duration, SortError> {
    if !speed.is_finite() || speed <= 0.0 {
        return Err(SortError::InvalidSpeed(speed));
    }
    let nanos = (BASE_DELAY_MS * 1_000_000.0 / speed).round();
    if nanos < 1.0 || nanos >= u64::MAX as f64 {
        return Err(SortError::InvalidSpeed(speed));
    }
    Ok(Duration::from_nanos(nanos as u64))
}

/// Suspends a running engine between steps.
pub trait Scheduler {
    /// Future returned by [`Scheduler::suspend`].
    type Sleep: Future<Output = ()>;

    /// Yield to the host for at least `delay`, then resume.
    ///
    /// A zero delay still yields once so other queued host work can run.
    fn suspend(&mut self, delay: Duration) -> Self::Sleep;
}

/// Future that returns `Pending` exactly once, waking itself immediately.
#[derive(Debug, Default)]
pub struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Scheduler that keeps time instead of waiting for it.
#[derive(Debug, Default, Clone)]
pub struct VirtualClock {
    elapsed: Duration,
    suspensions: u64,
}

impl VirtualClock {
    /// Clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of every delay requested so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of suspensions requested so far.
    pub fn suspensions(&self) -> u64 {
        self.suspensions
    }
}

impl Scheduler for VirtualClock {
    type Sleep = YieldNow;

    fn suspend(&mut self, delay: Duration) -> YieldNow {
        self.elapsed = self.elapsed.saturating_add(delay);
        self.suspensions += 1;
        YieldNow::default()
    }
}

/// Scheduler backed by real time.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadTimer;

impl ThreadTimer {
    /// Create a wall-clock scheduler.
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for ThreadTimer {
    type Sleep = TimerSleep;

    fn suspend(&mut self, delay: Duration) -> TimerSleep {
        TimerSleep {
            delay,
            shared: None,
            yielded: false,
        }
    }
}

/// State shared between a [`TimerSleep`] and its helper thread.
#[derive(Debug)]
struct TimerShared {
    done: AtomicBool,
    waker: Mutex<Option<Waker>>,
}

impl TimerShared {
    fn store_waker(&self, waker: &Waker) {
        let mut slot = self.waker.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(current) if current.will_wake(waker) => {}
            _ => *slot = Some(waker.clone()),
        }
    }

    fn fire(&self) {
        self.done.store(true, Ordering::SeqCst);
        let waker = self
            .waker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

/// Future returned by [`ThreadTimer::suspend`].
#[derive(Debug)]
pub struct TimerSleep {
    delay: Duration,
    shared: Option<Arc<TimerShared>>,
    yielded: bool,
}

impl TimerSleep {
    /// Start the helper thread. If it cannot be spawned the sleep resolves
    /// immediately rather than blocking the executor.
    fn arm(&mut self, waker: &Waker) {
        let shared = Arc::new(TimerShared {
            done: AtomicBool::new(false),
            waker: Mutex::new(Some(waker.clone())),
        });
        let remote = Arc::clone(&shared);
        let delay = self.delay;
        let spawned = thread::Builder::new()
            .name("sortviz-timer".to_owned())
            .spawn(move || {
                thread::sleep(delay);
                remote.fire();
            });
        if let Err(e) = spawned {
            log::warn!("timer thread unavailable, resuming immediately: {e}");
            shared.fire();
        }
        self.shared = Some(shared);
    }
}

impl Future for TimerSleep {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.delay.is_zero() {
            if self.yielded {
                return Poll::Ready(());
            }
            self.yielded = true;
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }

        let shared = match self.shared.clone() {
            Some(shared) => shared,
            None => {
                self.arm(cx.waker());
                return Poll::Pending;
            }
        };
        if shared.done.load(Ordering::SeqCst) {
            return Poll::Ready(());
        }
        shared.store_waker(cx.waker());
        // The timer may have fired between the check and storing the waker.
        if shared.done.load(Ordering::SeqCst) {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}
