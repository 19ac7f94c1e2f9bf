//! Rate limiting for discrete actions bound to held keys.
//!
//! A held key is seen as "down" on every frame. The gate lets an action fire
//! once, then swallows further triggers until its cooldown has elapsed.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

/// Discrete actions that are rate limited while their key is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateAction {
    Refuel,
    PreviousSong,
    NextSong,
    VolumeUp,
    VolumeDown,
}

/// Source of "now" for the gate, in seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock measured from the moment the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

#[derive(Debug)]
pub struct CooldownGate<K = GateAction, C = MonotonicClock> {
    clock: C,
    last_trigger: HashMap<K, f64>,
}

impl<K: Eq + Hash + Copy + std::fmt::Debug> CooldownGate<K, MonotonicClock> {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl<K: Eq + Hash + Copy + std::fmt::Debug> Default for CooldownGate<K, MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Copy + std::fmt::Debug, C: Clock> CooldownGate<K, C> {
    pub fn with_clock(clock: C) -> Self {
        CooldownGate {
            clock,
            last_trigger: HashMap::new(),
        }
    }

    /// Returns true if `action` may fire now. The first query for an action
    /// always passes. An admitted trigger restarts that action's timer; a
    /// rejected one leaves it alone.
    pub fn is_ready(&mut self, action: K, cooldown: f64) -> bool {
        let now = self.clock.now();
        match self.last_trigger.get(&action).copied() {
            Some(last) if now - last < cooldown => {
                crate::debug_gate!(
                    "{:?} rejected, {:.3}s of {:.3}s elapsed",
                    action,
                    now - last,
                    cooldown
                );
                false
            }
            _ => {
                self.last_trigger.insert(action, now);
                crate::debug_gate!("{:?} admitted at {:.3}s", action, now);
                true
            }
        }
    }
}
