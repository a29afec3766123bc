use crate::entity::Entity;
use crate::input_system::MovementIntents;

/// Player movement settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerControls {
    /// World units per second along one axis
    pub speed: f32,
    /// Scale diagonal input back to unit length
    pub normalize_diagonal: bool,
}

/// Moves the player by `speed * dt` along every held direction.
///
/// This is a direct position edit, not a velocity: the player's velocity
/// stays zero and `advance` never moves it. Returns true if the player moved.
pub fn apply_intents(
    player: &mut Entity,
    intents: &MovementIntents,
    controls: &PlayerControls,
    delta_time: f32,
) -> bool {
    if !intents.is_moving() {
        return false;
    }

    let mut direction = intents.direction();

    if controls.normalize_diagonal {
        direction = direction.normalize();
    }

    player.position += direction * (controls.speed * delta_time);
    true
}
