/// Entity - the movable, renderable game object
///
/// Every object in the arena (player, enemies, collectibles, the explosion and
/// death effects, the background) is one `Entity` value. What used to be a
/// class hierarchy is a single struct tagged with an [`EntityKind`], and the
/// few behaviours that differ per kind live in a lookup table
/// ([`EntityKind::behavior`]) instead of overridden methods.
///
/// # Rust Learning Notes
///
/// This module demonstrates:
/// - **Tagged variants**: `kind` replaces virtual dispatch
/// - **Const fns on enums**: the behaviour table is resolved at compile time
/// - **Plain data**: entities are `Clone` values owned by the world
use crate::render::RenderAdapter;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Offset between an entity's spawn position and its orbit reference point.
pub const DEFAULT_ORBIT_OFFSET: Vec3 = Vec3::new(0.2, 0.2, 0.0);

/// What an entity is. Decides hostility and pickup rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Collectible,
    Effect,
    Background,
}

/// Per-kind behaviour flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindBehavior {
    /// Hurts the player on contact
    pub hostile: bool,
    /// Takes part in the pickup scan as the collecting side
    pub collects: bool,
    /// Can be removed by a pickup
    pub collectable: bool,
}

impl EntityKind {
    /// The behaviour table. Effects and the background never take part in
    /// pickups; they are drawn and repositioned but otherwise inert.
    pub const fn behavior(self) -> KindBehavior {
        match self {
            EntityKind::Player => KindBehavior {
                hostile: false,
                collects: true,
                collectable: false,
            },
            EntityKind::Enemy => KindBehavior {
                hostile: true,
                collects: false,
                collectable: false,
            },
            EntityKind::Collectible => KindBehavior {
                hostile: false,
                collects: true,
                collectable: true,
            },
            EntityKind::Effect | EntityKind::Background => KindBehavior {
                hostile: false,
                collects: false,
                collectable: false,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub position: Vec3,
    pub velocity: Vec3,
    scale: f32,
    pub hostile: bool,
    /// Enemy pursuit flag. Once set it is never cleared.
    pub tracking: bool,
    reference_point: Vec3,
    kind: EntityKind,
}

impl Entity {
    /// Creates a stationary entity of unit scale.
    ///
    /// The reference point is fixed here, `orbit_offset` below and to the
    /// left of the spawn position, and never moves afterwards.
    pub fn new(kind: EntityKind, position: Vec3, orbit_offset: Vec3) -> Self {
        Entity {
            position,
            velocity: Vec3::ZERO,
            scale: 1.0,
            hostile: kind.behavior().hostile,
            tracking: false,
            reference_point: position - orbit_offset,
            kind,
        }
    }

    pub fn player(position: Vec3) -> Self {
        Entity::new(EntityKind::Player, position, DEFAULT_ORBIT_OFFSET)
    }

    pub fn enemy(position: Vec3, orbit_offset: Vec3) -> Self {
        Entity::new(EntityKind::Enemy, position, orbit_offset)
    }

    pub fn collectible(position: Vec3) -> Self {
        Entity::new(EntityKind::Collectible, position, DEFAULT_ORBIT_OFFSET)
    }

    pub fn effect(position: Vec3, scale: f32) -> Self {
        Entity::new(EntityKind::Effect, position, DEFAULT_ORBIT_OFFSET).with_scale(scale)
    }

    pub fn background(position: Vec3, scale: f32) -> Self {
        Entity::new(EntityKind::Background, position, DEFAULT_ORBIT_OFFSET).with_scale(scale)
    }

    /// Builder-style scale setter. Scale must stay positive.
    pub fn with_scale(mut self, scale: f32) -> Self {
        debug_assert!(scale > 0.0, "entity scale must be positive, got {scale}");
        self.scale = scale;
        self
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn reference_point(&self) -> Vec3 {
        self.reference_point
    }

    /// Explicit Euler step: `position += velocity * dt`.
    pub fn advance(&mut self, delta_time: f32) {
        self.position += self.velocity * delta_time;
    }

    /// Hands the entity to the render adapter. Never mutates the entity.
    pub fn render<R: RenderAdapter + ?Sized>(&self, renderer: &mut R, view: &Mat4, time: f64) {
        renderer.draw(self, view, time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_advance_is_linear() {
        let mut entity = Entity::player(Vec3::new(1.0, -2.0, 0.0));
        entity.velocity = Vec3::new(0.5, 4.0, 0.0);

        entity.advance(0.25);

        assert_abs_diff_eq!(entity.position.x, 1.125);
        assert_abs_diff_eq!(entity.position.y, -1.0);
        assert_abs_diff_eq!(entity.position.z, 0.0);
    }

    #[test]
    fn test_advance_with_zero_dt_is_noop() {
        let mut entity = Entity::collectible(Vec3::new(3.5, 0.0, 0.0));
        entity.velocity = Vec3::new(9.0, 9.0, 0.0);

        entity.advance(0.0);

        assert_eq!(entity.position, Vec3::new(3.5, 0.0, 0.0));
    }

    #[test]
    fn test_hostility_follows_kind() {
        assert!(Entity::enemy(Vec3::ZERO, DEFAULT_ORBIT_OFFSET).hostile);
        assert!(!Entity::player(Vec3::ZERO).hostile);
        assert!(!Entity::collectible(Vec3::ZERO).hostile);
        assert!(!Entity::effect(Vec3::ZERO, 5.0).hostile);
    }

    #[test]
    fn test_reference_point_fixed_at_creation() {
        let mut enemy = Entity::enemy(Vec3::new(-2.2, 0.0, 0.0), DEFAULT_ORBIT_OFFSET);
        let reference = enemy.reference_point();

        enemy.velocity = Vec3::new(1.0, 1.0, 0.0);
        enemy.advance(3.0);

        assert_eq!(enemy.reference_point(), reference);
        assert_abs_diff_eq!(reference.x, -2.4, epsilon = 1e-6);
        assert_abs_diff_eq!(reference.y, -0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_behavior_table() {
        assert!(EntityKind::Collectible.behavior().collectable);
        assert!(!EntityKind::Player.behavior().collectable);
        assert!(EntityKind::Player.behavior().collects);
        assert!(!EntityKind::Background.behavior().collects);
        assert!(!EntityKind::Effect.behavior().collects);
    }
}
