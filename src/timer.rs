//! A registry of one-shot and repeating timers keyed by opaque handles.
//!
//! The registry knows nothing about what a timer does; each timer carries an action
//! payload that is handed back when it fires.
//!
//! Callers whose actions start or stop other timers dispatch with [`TimerRegistry::due`]
//! followed by one [`TimerRegistry::fire`] per key, so a timer stopped by an earlier action
//! in the same pass is skipped. [`TimerRegistry::tick`] is the shorthand for callers that
//! only collect actions.

use std::collections::BTreeMap;

use bevy_ecs::resource::Resource;
use tracing::trace;

/// Handle to a registered timer. Keys are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerKey(u32);

#[derive(Debug, Clone)]
pub struct Timer<A> {
    /// Milliseconds between start and firing.
    pub duration: u64,
    /// Absolute time the timer fires at, valid only while running.
    pub deadline: u64,
    pub repeating: bool,
    pub running: bool,
    pub action: A,
}

#[derive(Resource, Debug)]
pub struct TimerRegistry<A: Send + Sync + 'static> {
    timers: BTreeMap<TimerKey, Timer<A>>,
    next_key: u32,
}

impl<A: Send + Sync + 'static> Default for TimerRegistry<A> {
    fn default() -> Self {
        Self {
            timers: BTreeMap::new(),
            next_key: 0,
        }
    }
}

impl<A: Clone + Send + Sync + 'static> TimerRegistry<A> {
    /// Registers a stopped timer and returns its key.
    pub fn register(&mut self, duration: u64, repeating: bool, action: A) -> TimerKey {
        let key = TimerKey(self.next_key);
        self.next_key += 1;
        self.timers.insert(
            key,
            Timer {
                duration,
                deadline: 0,
                repeating,
                running: false,
                action,
            },
        );
        key
    }

    /// Registers a timer and starts it immediately.
    pub fn schedule(&mut self, duration: u64, repeating: bool, action: A, now: u64) -> TimerKey {
        let key = self.register(duration, repeating, action);
        self.start(key, now);
        key
    }

    /// Starts (or restarts) a timer so it fires `duration` ms after `now`.
    pub fn start(&mut self, key: TimerKey, now: u64) -> bool {
        let Some(timer) = self.timers.get_mut(&key) else {
            trace!(?key, "Ignoring start of unknown timer");
            return false;
        };
        timer.deadline = now + timer.duration;
        timer.running = true;
        true
    }

    /// Removes a timer. Unknown keys are ignored.
    pub fn stop(&mut self, key: TimerKey) {
        if self.timers.remove(&key).is_none() {
            trace!(?key, "Ignoring stop of unknown timer");
        }
    }

    /// Halts a running timer, keeping the time it had left as its new duration.
    pub fn pause(&mut self, key: TimerKey, now: u64) {
        if let Some(timer) = self.timers.get_mut(&key) {
            if timer.running {
                timer.duration = timer.deadline.saturating_sub(now);
                timer.running = false;
            }
        }
    }

    /// Changes the period used the next time the timer is started or repeats.
    pub fn set_duration(&mut self, key: TimerKey, duration: u64) {
        if let Some(timer) = self.timers.get_mut(&key) {
            timer.duration = duration;
        }
    }

    pub fn is_running(&self, key: TimerKey) -> bool {
        self.timers.get(&key).is_some_and(|timer| timer.running)
    }

    pub fn contains(&self, key: TimerKey) -> bool {
        self.timers.contains_key(&key)
    }

    pub fn get(&self, key: TimerKey) -> Option<&Timer<A>> {
        self.timers.get(&key)
    }

    /// Milliseconds until a running timer fires.
    pub fn remaining(&self, key: TimerKey, now: u64) -> Option<u64> {
        self.timers
            .get(&key)
            .filter(|timer| timer.running)
            .map(|timer| timer.deadline.saturating_sub(now))
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Keys of every running timer whose deadline has passed, in key order.
    pub fn due(&self, now: u64) -> Vec<TimerKey> {
        self.timers
            .iter()
            .filter(|(_, timer)| timer.running && timer.deadline <= now)
            .map(|(key, _)| *key)
            .collect()
    }

    /// Fires a single timer if it is still registered, running and due.
    ///
    /// Repeating timers are rescheduled for `now + duration`; one-shot timers are removed.
    pub fn fire(&mut self, key: TimerKey, now: u64) -> Option<A> {
        let timer = self.timers.get_mut(&key)?;
        if !timer.running || timer.deadline > now {
            return None;
        }

        if timer.repeating {
            timer.deadline = now + timer.duration;
            Some(timer.action.clone())
        } else {
            self.timers.remove(&key).map(|timer| timer.action)
        }
    }

    /// Fires every due timer and returns their actions in key order.
    ///
    /// Actions are only returned, so nothing can cancel a sibling mid-pass; see [`Self::due`].
    pub fn tick(&mut self, now: u64) -> Vec<A> {
        self.due(now).into_iter().filter_map(|key| self.fire(key, now)).collect()
    }
}
