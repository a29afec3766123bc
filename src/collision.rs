/// Collision detection for the arena
///
/// Every collision in the game is a distance test between two entity centres
/// against a threshold derived from the reference entity's scale. There are
/// no bounding boxes; only magnitudes are compared, so coincident entities
/// (distance zero) are safe.
///
/// # Architecture
///
/// - `Collidable` trait: anything with a centre and a scale
/// - Threshold helpers: the contact radius and the pursuit radius
/// - `check_collisions_with_collection`: indices of a slice within range
///
/// All comparisons are strict (`<`): an entity sitting exactly on a
/// threshold does not collide.
use crate::entity::Entity;
use glam::Vec3;

/// Trait for entities that participate in collision detection.
pub trait Collidable {
    /// Centre of the entity in world units.
    fn center(&self) -> Vec3;

    /// Uniform scale of the entity; thresholds are derived from it.
    fn scale(&self) -> f32;
}

impl Collidable for Entity {
    fn center(&self) -> Vec3 {
        self.position
    }

    fn scale(&self) -> f32 {
        Entity::scale(self)
    }
}

/// Euclidean distance between two centres.
pub fn distance(a: &impl Collidable, b: &impl Collidable) -> f32 {
    (a.center() - b.center()).length()
}

/// Radius inside which two entities touch: `scale - margin`.
///
/// With the default margin of 0.2 a unit-scale player touches anything
/// closer than 0.8 units.
pub fn contact_radius(scale: f32, margin: f32) -> f32 {
    scale - margin
}

/// Radius inside which a patrolling enemy notices the player: `factor * scale`.
pub fn pursuit_radius(scale: f32, factor: f32) -> f32 {
    factor * scale
}

/// True when `distance(a, b) < threshold`.
pub fn within(a: &impl Collidable, b: &impl Collidable, threshold: f32) -> bool {
    distance(a, b) < threshold
}

/// Checks one entity against a collection and returns the indices in range.
///
/// # Example
///
/// ```rust
/// # use orbit_patrol::collision::check_collisions_with_collection;
/// # use orbit_patrol::entity::Entity;
/// # use glam::Vec3;
/// let player = Entity::player(Vec3::ZERO);
/// let items = vec![
///     Entity::collectible(Vec3::new(0.5, 0.0, 0.0)),
///     Entity::collectible(Vec3::new(3.5, 0.0, 0.0)),
/// ];
/// assert_eq!(check_collisions_with_collection(&player, &items, 0.8), vec![0]);
/// ```
pub fn check_collisions_with_collection<T: Collidable>(
    entity: &impl Collidable,
    entities: &[T],
    threshold: f32,
) -> Vec<usize> {
    let mut collisions = Vec::new();

    for (index, other) in entities.iter().enumerate() {
        if within(entity, other, threshold) {
            collisions.push(index);
        }
    }

    collisions
}
