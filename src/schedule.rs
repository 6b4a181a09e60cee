//! Single-threaded cooperative scheduler.
//!
//! The comparator never blocks: every wait is a registered continuation.
//! Two mechanisms exist, mirroring the host event loop the engine targets:
//! zero-delay deferred tasks (repaints decoupled from input handlers) and
//! periodic timers on a virtual clock (the 40 ms video repaint cadence).
//! The clock is advanced explicitly by the host, which keeps scheduling
//! deterministic and lets tests drive cadence directly.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::foundation::error::{JuxtaError, JuxtaResult};

/// Deferred-task queue plus periodic timers on a virtual clock.
pub struct Scheduler {
    deferred: RefCell<VecDeque<Box<dyn FnOnce()>>>,
    timers: RefCell<Vec<PeriodicTimer>>,
    now: Cell<Duration>,
}

struct PeriodicTimer {
    period: Duration,
    next_due: Duration,
    task: Rc<RefCell<Box<dyn FnMut()>>>,
    cancelled: Rc<Cell<bool>>,
}

/// Cancellation handle for a periodic timer.
///
/// Cancelling (or dropping) the handle prevents all future ticks; the
/// owning comparator holds its handle so teardown cannot leak timers.
pub struct TimerHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TimerHandle {
    /// Stop the timer. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl Scheduler {
    /// Create a scheduler with the clock at zero.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            deferred: RefCell::new(VecDeque::new()),
            timers: RefCell::new(Vec::new()),
            now: Cell::new(Duration::ZERO),
        })
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Queue a zero-delay task for the next [`Scheduler::run_deferred`] drain.
    pub fn defer(&self, task: impl FnOnce() + 'static) {
        self.deferred.borrow_mut().push_back(Box::new(task));
    }

    /// Register a periodic task firing every `period` of virtual time.
    pub fn every(
        &self,
        period: Duration,
        task: impl FnMut() + 'static,
    ) -> JuxtaResult<TimerHandle> {
        if period.is_zero() {
            return Err(JuxtaError::validation("timer period must be > 0"));
        }
        let cancelled = Rc::new(Cell::new(false));
        self.timers.borrow_mut().push(PeriodicTimer {
            period,
            next_due: self.now.get() + period,
            task: Rc::new(RefCell::new(Box::new(task))),
            cancelled: Rc::clone(&cancelled),
        });
        Ok(TimerHandle { cancelled })
    }

    /// Drain the deferred queue in FIFO order.
    ///
    /// Tasks queued while draining run in the same drain, so a repaint
    /// scheduled by another repaint still happens before this returns.
    pub fn run_deferred(&self) {
        loop {
            let task = self.deferred.borrow_mut().pop_front();
            match task {
                Some(task) => task(),
                None => break,
            }
        }
    }

    /// Advance the virtual clock by `dt`, firing due periodic ticks in due
    /// order (registration order on ties), then drain the deferred queue.
    pub fn advance(&self, dt: Duration) {
        let target = self.now.get() + dt;
        loop {
            let due = {
                let mut timers = self.timers.borrow_mut();
                timers.retain(|t| !t.cancelled.get());
                timers
                    .iter_mut()
                    .filter(|t| t.next_due <= target)
                    .min_by_key(|t| t.next_due)
                    .map(|t| {
                        let at = t.next_due;
                        t.next_due += t.period;
                        (at, Rc::clone(&t.task))
                    })
            };
            let Some((at, task)) = due else {
                break;
            };
            self.now.set(at);
            (task.borrow_mut())();
        }
        self.now.set(target);
        self.run_deferred();
    }
}

#[cfg(test)]
#[path = "../tests/unit/schedule.rs"]
mod tests;
