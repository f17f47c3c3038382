//! Frame clock and one-shot delayed effects.
//!
//! The clock advances by the frame delta the runtime hands us. Delayed
//! effects (end of an invulnerability window, end of the swing animation,
//! expiry of a dragon attack) are armed into a min-heap and fired at the
//! start of the first tick whose time has reached them. Timers are never
//! cancelled; a timer whose target has gone away simply does nothing.

use hecs::Entity;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

// =============================================================================
// GAME CLOCK
// =============================================================================

/// Session clock (in seconds)
///
/// Kept in f64 so that long sessions still advance by whole frame deltas;
/// an f32 accumulator stops moving after a few days of uptime.
#[derive(Debug, Clone)]
pub struct GameClock {
    /// Seconds elapsed since the session started
    pub time: f64,
}

impl GameClock {
    pub fn new() -> Self {
        Self { time: 0.0 }
    }

    /// Advance time by a frame delta. Negative deltas are ignored.
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.time += f64::from(dt);
        }
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TIMER QUEUE
// =============================================================================

/// What happens when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Player becomes vulnerable again
    EndInvulnerability,
    /// Player's swing animation is over
    EndAttackAnimation,
    /// A dragon attack has run its full duration
    ExpireAttack(Entity),
}

/// A timer armed for a specific game time
#[derive(Debug, Clone, Copy)]
struct ScheduledTimer {
    fire_at: f64,
    /// Arming order, keeps timers with equal fire times FIFO
    seq: u64,
    timer: Timer,
}

impl PartialEq for ScheduledTimer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledTimer {}

impl PartialOrd for ScheduledTimer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTimer {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior (earliest time first)
        other
            .fire_at
            .partial_cmp(&self.fire_at)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Pending one-shot timers, earliest first
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: BinaryHeap<ScheduledTimer>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer to fire at an absolute game time
    pub fn schedule(&mut self, fire_at: f64, timer: Timer) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(ScheduledTimer { fire_at, seq, timer });
    }

    /// Arm a timer to fire `delay` seconds after `now`
    pub fn schedule_in(&mut self, now: f64, delay: f32, timer: Timer) {
        self.schedule(now + f64::from(delay), timer);
    }

    /// Next timer to fire, if any
    pub fn peek_next(&self) -> Option<(Timer, f64)> {
        self.pending.peek().map(|st| (st.timer, st.fire_at))
    }

    /// Pop the earliest timer if it is due at `now`
    pub fn pop_due(&mut self, now: f64) -> Option<Timer> {
        match self.pending.peek() {
            Some(st) if st.fire_at <= now => self.pending.pop().map(|st| st.timer),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
