//! Scheduling port and a deterministic virtual clock.
//!
//! Controllers never hold closures. Every delayed or repeating callback is a
//! [`Task`] value handed to a [`Scheduler`]; when it comes due the host gives
//! the task back to [`Page::fire`](crate::page::Page::fire), which routes it
//! to the controller that owns it.
//!
//! ```text
//! controller ──schedule_after(300, Task::X)──▶ Scheduler
//!                                                  │ (due)
//! Page::fire(Task::X) ◀─────────── host ◀──────────┘
//! ```
//!
//! This keeps the whole layer single-threaded and free of `Rc<RefCell<_>>`
//! cycles, and lets tests advance time by exact amounts with
//! [`VirtualClock`] instead of sleeping.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;

use crate::surface::ElementRef;

/// Milliseconds of (virtual or wall) time.
pub type Millis = u64;

/// Delay used for [`Scheduler::request_frame`] on the virtual clock (~60 Hz).
pub const FRAME_MS: Millis = 16;

/// Cancellation handle returned by every scheduling call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimerHandle(u64);

/// Which card batch a staggered animation step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CardBatch {
    Skills,
    Projects,
}

/// A unit of deferred work, routed back to its owning controller when due.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Task {
    /// Repeating loader tick: fade the message out.
    LoaderTick,
    /// Swap in the next loader message and fade it back in.
    LoaderSwap,
    /// Grace delay after page load elapsed: fade the overlay.
    LoaderFadeOut,
    /// Fade finished: detach the overlay.
    LoaderRemove,
    TypewriterTick,
    /// Put card `index` of a batch into its hidden start state.
    CardEnter { batch: CardBatch, index: usize },
    /// Move card `index` of a batch to its visible end state.
    CardSettle { batch: CardBatch, index: usize },
    CounterTick { target: ElementRef },
    RevealStart { target: ElementRef },
    RevealFrame { target: ElementRef },
}

/// Scheduling capability injected into every controller.
pub trait Scheduler {
    /// Current time on this scheduler's clock.
    fn now(&self) -> Millis;

    /// Run `task` once after `delay`.
    fn schedule_after(&mut self, delay: Millis, task: Task) -> TimerHandle;

    /// Run `task` every `interval` until cancelled. The first run is one
    /// interval from now.
    fn schedule_repeating(&mut self, interval: Millis, task: Task) -> TimerHandle;

    /// Run `task` before the next repaint.
    fn request_frame(&mut self, task: Task) -> TimerHandle;

    /// Cancel a pending or repeating task. Returns `false` if the handle had
    /// already fired (one-shot) or was cancelled before.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

#[derive(Debug)]
struct Slot {
    task: Task,
    every: Option<Millis>,
}

/// Deterministic in-memory scheduler.
///
/// Tasks due at the same instant fire in the order they were scheduled.
/// Cancellation is lazy: cancelled entries stay in the heap and are skipped
/// when popped.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now: Millis,
    next_id: u64,
    seq: u64,
    queue: BinaryHeap<Reverse<(Millis, u64, TimerHandle)>>,
    live: HashMap<TimerHandle, Slot>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (not yet fired or cancelled) timers.
    pub fn pending(&self) -> usize {
        self.live.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.live.contains_key(&handle)
    }

    /// Due time of the earliest live timer, if any.
    pub fn next_due(&self) -> Option<Millis> {
        self.queue
            .iter()
            .filter(|Reverse((_, _, handle))| self.live.contains_key(handle))
            .map(|Reverse((due, _, _))| *due)
            .min()
    }

    /// Pop the next task due at or before `until`, moving the clock to its
    /// due time. Repeating tasks are re-armed before being returned.
    pub fn pop_due(&mut self, until: Millis) -> Option<Task> {
        loop {
            let Reverse((due, _, handle)) = *self.queue.peek()?;
            if due > until {
                return None;
            }
            self.queue.pop();
            let Some(slot) = self.live.get(&handle) else {
                continue;
            };
            let (task, every) = (slot.task.clone(), slot.every);
            self.now = self.now.max(due);
            match every {
                Some(every) => self.push(due + every, handle),
                None => {
                    self.live.remove(&handle);
                }
            }
            return Some(task);
        }
    }

    /// Move the clock forward to `to` without firing anything.
    pub fn set_now(&mut self, to: Millis) {
        self.now = self.now.max(to);
    }

    fn push(&mut self, due: Millis, handle: TimerHandle) {
        self.seq += 1;
        self.queue.push(Reverse((due, self.seq, handle)));
    }

    fn insert(&mut self, delay: Millis, task: Task, every: Option<Millis>) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.live.insert(handle, Slot { task, every });
        self.push(self.now + delay, handle);
        handle
    }
}

impl Scheduler for VirtualClock {
    fn now(&self) -> Millis {
        self.now
    }

    fn schedule_after(&mut self, delay: Millis, task: Task) -> TimerHandle {
        self.insert(delay, task, None)
    }

    fn schedule_repeating(&mut self, interval: Millis, task: Task) -> TimerHandle {
        // A zero interval would re-arm at the same instant forever.
        let interval = interval.max(1);
        self.insert(interval, task, Some(interval))
    }

    fn request_frame(&mut self, task: Task) -> TimerHandle {
        self.insert(FRAME_MS, task, None)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.live.remove(&handle).is_some()
    }
}
