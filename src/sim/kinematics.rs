//! Jump kinematics
//!
//! The character's height is a step function of time: a trigger snaps the
//! offset up and schedules a one-shot landing. Landings are deferred actions
//! kept in [`JumpTimers`]; each carries the generation it was scheduled in,
//! and scheduling a new landing bumps the generation so any landing still
//! pending from an earlier arc becomes a no-op when it comes due.

use super::state::{Character, JumpPhase};
use crate::settings::JumpTuning;

/// What a trigger did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    Single,
    Double,
    /// Mid-air with no double jump available; dropped
    Ignored,
}

/// A deferred landing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Landing {
    due_ms: u64,
    generation: u64,
}

/// Pending landings for one character
#[derive(Debug, Clone, Default)]
pub struct JumpTimers {
    generation: u64,
    pending: Vec<Landing>,
}

impl JumpTimers {
    /// Schedule a landing, superseding every landing scheduled before it
    fn schedule(&mut self, due_ms: u64) {
        self.generation += 1;
        self.pending.push(Landing {
            due_ms,
            generation: self.generation,
        });
    }

    /// Time of the landing that will actually apply, if any
    pub fn next_landing_ms(&self) -> Option<u64> {
        self.pending
            .iter()
            .find(|l| l.generation == self.generation)
            .map(|l| l.due_ms)
    }

    /// Landings still queued, stale ones included
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Handle a jump trigger at `now_ms`
pub fn trigger_jump(character: &mut Character, jump: &JumpTuning, now_ms: u64) -> JumpOutcome {
    match character.phase {
        JumpPhase::Grounded => {
            character.phase = JumpPhase::Airborne;
            character.last_jump_ms = now_ms;
            character.offset = jump.single_height;
            character.timers.schedule(now_ms + jump.single_ms);
            log::debug!("jump at {}ms", now_ms);
            JumpOutcome::Single
        }
        JumpPhase::Airborne
            if now_ms.saturating_sub(character.last_jump_ms) < jump.window_ms =>
        {
            character.phase = JumpPhase::DoubleJump;
            character.offset = jump.double_height;
            character.timers.schedule(now_ms + jump.double_ms);
            log::debug!("double jump at {}ms", now_ms);
            JumpOutcome::Double
        }
        JumpPhase::Airborne | JumpPhase::DoubleJump => JumpOutcome::Ignored,
    }
}

/// Fire every landing due at or before `now_ms`
///
/// Returns true if the character landed.
pub fn land_due(character: &mut Character, now_ms: u64) -> bool {
    let timers = &mut character.timers;
    if timers.pending.iter().all(|l| l.due_ms > now_ms) {
        return false;
    }

    let current = timers.generation;
    let mut landed = false;
    timers.pending.retain(|l| {
        if l.due_ms > now_ms {
            return true;
        }
        if l.generation == current {
            landed = true;
        } else {
            log::debug!("discarding stale landing due at {}ms", l.due_ms);
        }
        false
    });

    if landed {
        character.offset = 0.0;
        character.phase = JumpPhase::Grounded;
    }
    landed
}
