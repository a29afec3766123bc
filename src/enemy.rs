use crate::entity::Entity;
use glam::Vec3;

/// Enemy movement mode. Derived from the entity's `tracking` flag, so the
/// one-way Patrol -> Pursuit transition is just that flag being set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyBehavior {
    /// Circling the fixed reference point
    Patrol,
    /// Homing on the player
    Pursuit,
}

impl EnemyBehavior {
    pub fn of(enemy: &Entity) -> Self {
        if enemy.tracking {
            EnemyBehavior::Pursuit
        } else {
            EnemyBehavior::Patrol
        }
    }
}

/// Tuning for the enemy AI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyTuning {
    /// Patrol angular speed in radians per second
    pub patrol_angular_rate: f32,
    /// Proportional gain on the vector to the player
    pub pursuit_gain: f32,
}

/// Rotates the enemy about its reference point by `angular_rate * dt`.
///
/// The position is set directly; velocity is untouched. The result lies in
/// the z = 0 plane.
pub fn patrol(enemy: &mut Entity, angular_rate: f32, delta_time: f32) {
    let pivot = enemy.reference_point();
    let offset = enemy.position - pivot;
    let (sin, cos) = (angular_rate * delta_time).sin_cos();

    enemy.position = Vec3::new(
        pivot.x + offset.x * cos - offset.y * sin,
        pivot.y + offset.y * cos + offset.x * sin,
        0.0,
    );
}

/// Points the enemy's velocity at the player, scaled by `gain`.
///
/// Not normalized: the further the player, the faster the enemy.
pub fn pursue(enemy: &mut Entity, player_position: Vec3, gain: f32) {
    enemy.velocity = gain * (player_position - enemy.position);
}

/// Runs one AI step for an enemy according to its current behaviour.
pub fn steer(enemy: &mut Entity, player_position: Vec3, tuning: &EnemyTuning, delta_time: f32) {
    match EnemyBehavior::of(enemy) {
        EnemyBehavior::Patrol => patrol(enemy, tuning.patrol_angular_rate, delta_time),
        EnemyBehavior::Pursuit => pursue(enemy, player_position, tuning.pursuit_gain),
    }
}
