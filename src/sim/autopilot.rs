//! Idle/demo mode - a simple bot that plays the game
//!
//! A single jump alone never clears an obstacle at the default tuning (the
//! overlap lasts longer than the arc), so the bot jumps just before contact
//! and escalates to a double jump at the last moment the window allows.

use super::state::{GameState, JumpPhase};
use crate::settings::Tuning;

/// Jump when the nearest obstacle is this many ticks from contact
const LEAD_TICKS: f32 = 4.0;

/// Should the bot trigger a jump at `now_ms`?
pub fn should_jump(state: &GameState, tuning: &Tuning, now_ms: u64) -> bool {
    let geometry = &state.geometry;
    let (char_left, char_right) = geometry.character_span_x();

    match state.character.phase {
        JumpPhase::Grounded => {
            let lead = geometry.scroll_speed * LEAD_TICKS;
            state
                .world
                .obstacles
                .iter()
                .filter(|o| o.x + geometry.obstacle_size > char_left)
                .map(|o| o.x - char_right)
                .any(|gap| gap <= lead)
        }
        JumpPhase::Airborne => {
            // Last tick still inside the double-jump window
            let since = now_ms.saturating_sub(state.character.last_jump_ms);
            since + tuning.tick_interval_ms >= tuning.jump.window_ms
                && since < tuning.jump.window_ms
        }
        JumpPhase::DoubleJump => false,
    }
}
