//! Cooperative one-shot timers.
//!
//! Timers are typed tokens rather than closures: when a deadline passes the
//! host receives the [`TimerCallback`] back and dispatches it to whoever
//! still owns the target. Owners keep the [`TimerHandle`] and cancel it on
//! teardown, so a callback never reaches destroyed state.
//!
//! [`ManualTimers`] is the reference implementation driven by an explicit
//! clock, used by the runtime and by tests.

use std::collections::BTreeMap;

use crate::state::ActorId;

/// Cancellable handle returned by [`TimerService::schedule_once`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerHandle(pub u64);

/// What to do when a timer expires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimerCallback {
    /// Tear down a dead combatant so upstream logic can spawn a replacement.
    Respawn(ActorId),
    /// Destroy a projectile whose hit has already been resolved.
    DestroyProjectile(ActorId),
}

/// Deferred callback service.
pub trait TimerService {
    /// Schedules `callback` to fire once after `delay` seconds.
    fn schedule_once(&mut self, delay: f32, callback: TimerCallback) -> TimerHandle;

    /// Cancels a pending timer. Returns false if it already fired or was cancelled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

/// A timer whose deadline has passed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub callback: TimerCallback,
    /// Clock value the timer was due at.
    pub deadline: f64,
}

#[derive(Clone, Copy, Debug)]
struct PendingTimer {
    deadline: f64,
    callback: TimerCallback,
}

/// Timer service driven by an explicit simulation clock.
#[derive(Clone, Debug, Default)]
pub struct ManualTimers {
    now: f64,
    next_handle: u64,
    pending: BTreeMap<TimerHandle, PendingTimer>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Seconds left until `handle` fires, if it is still pending.
    pub fn remaining(&self, handle: TimerHandle) -> Option<f64> {
        self.pending
            .get(&handle)
            .map(|timer| (timer.deadline - self.now).max(0.0))
    }

    /// Advances the clock by `dt` seconds and returns every timer that came
    /// due, ordered by deadline and then by scheduling order.
    ///
    /// Fired timers are removed before they are returned.
    pub fn advance(&mut self, dt: f32) -> Vec<FiredTimer> {
        self.now += f64::from(dt.max(0.0));

        let now = self.now;
        let mut fired: Vec<FiredTimer> = self
            .pending
            .iter()
            .filter(|(_, timer)| timer.deadline <= now)
            .map(|(&handle, timer)| FiredTimer {
                handle,
                callback: timer.callback,
                deadline: timer.deadline,
            })
            .collect();

        fired.sort_by(|a, b| {
            a.deadline
                .total_cmp(&b.deadline)
                .then_with(|| a.handle.cmp(&b.handle))
        });

        for timer in &fired {
            self.pending.remove(&timer.handle);
        }

        fired
    }
}

impl TimerService for ManualTimers {
    fn schedule_once(&mut self, delay: f32, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        self.pending.insert(
            handle,
            PendingTimer {
                deadline: self.now + f64::from(delay.max(0.0)),
                callback,
            },
        );

        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_after_deadline() {
        let mut timers = ManualTimers::new();
        let handle = timers.schedule_once(5.0, TimerCallback::Respawn(ActorId(1)));

        assert!(timers.advance(4.9).is_empty());
        assert!(timers.is_pending(handle));

        let fired = timers.advance(0.2);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].handle, handle);
        assert_eq!(fired[0].callback, TimerCallback::Respawn(ActorId(1)));
        assert!(!timers.is_pending(handle));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timers = ManualTimers::new();
        let handle = timers.schedule_once(1.0, TimerCallback::DestroyProjectile(ActorId(7)));

        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert!(timers.advance(10.0).is_empty());
    }

    #[test]
    fn fires_in_deadline_then_schedule_order() {
        let mut timers = ManualTimers::new();
        let late = timers.schedule_once(2.0, TimerCallback::Respawn(ActorId(1)));
        let first = timers.schedule_once(1.0, TimerCallback::Respawn(ActorId(2)));
        let tied = timers.schedule_once(1.0, TimerCallback::Respawn(ActorId(3)));

        let order: Vec<_> = timers.advance(3.0).iter().map(|t| t.handle).collect();
        assert_eq!(order, vec![first, tied, late]);
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut timers = ManualTimers::new();
        timers.schedule_once(0.0, TimerCallback::Respawn(ActorId(1)));
        assert_eq!(timers.advance(0.0).len(), 1);
    }

    #[test]
    fn remaining_tracks_clock() {
        let mut timers = ManualTimers::new();
        let handle = timers.schedule_once(5.0, TimerCallback::Respawn(ActorId(1)));
        timers.advance(2.0);
        assert_eq!(timers.remaining(handle), Some(3.0));
    }
}
