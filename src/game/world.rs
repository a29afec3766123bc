// GameWorld struct and entity management
//
// This module contains the GameWorld struct which owns every entity in the
// arena plus the counters, timers and flags the per-frame update drives.
// The update itself lives in update.rs.

use crate::config::{GameConfig, TuningConfig};
use crate::enemy::EnemyTuning;
use crate::entity::Entity;
use crate::player::PlayerControls;
use glam::Vec3;
use log::debug;

use super::WorldEvent;

/// GameWorld owns all game objects and world state.
///
/// The player, the two effects and the background are named fields rather
/// than positions in a shared list, so no index arithmetic is needed to find
/// them. The outer update pass still visits them in a fixed order: player,
/// collectibles, explosion, death marker, background.
pub struct GameWorld {
    pub(super) config: GameConfig,
    pub(super) controls: PlayerControls,
    pub(super) enemy_tuning: EnemyTuning,

    /// `None` once the player has been killed
    pub(super) player: Option<Entity>,
    pub(super) collectibles: Vec<Entity>,
    pub(super) enemies: Vec<Entity>,
    pub(super) explosion: Entity,
    pub(super) death_marker: Entity,
    pub(super) background: Entity,

    /// Goes to -1 on the killing hit
    pub(super) lives: i32,
    pub(super) items_collected: u32,
    pub(super) invulnerable: bool,
    pub(super) elapsed_time: f64,
    /// 0 when no explosion is showing
    pub(super) explosion_end_time: f64,
    /// 0 when not invulnerable
    pub(super) invulnerability_end_time: f64,
    pub(super) next_spawn_time: f64,
    pub(super) player_dead: bool,
    pub(super) should_terminate: bool,

    pub(super) rng: fastrand::Rng,
    pub(super) events: Vec<WorldEvent>,
}

impl GameWorld {
    /// Builds the starting level from the config's layout.
    ///
    /// The config is expected to have passed `GameConfig::validate`.
    pub fn new(config: GameConfig) -> Self {
        let tuning = &config.tuning;
        let layout = &config.layout;

        let player = Entity::player(layout.player);
        let enemies = layout
            .enemies
            .iter()
            .map(|&position| Entity::enemy(position, tuning.orbit_offset))
            .collect();
        let collectibles = layout
            .collectibles
            .iter()
            .map(|&position| Entity::collectible(position))
            .collect();

        let explosion = Entity::effect(tuning.parking_position, tuning.effect_scale);
        let death_marker = Entity::effect(tuning.parking_position, tuning.effect_scale);
        let background = Entity::background(layout.background, tuning.background_scale);

        let rng = match tuning.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        GameWorld {
            controls: controls_from(tuning),
            enemy_tuning: enemy_tuning_from(tuning),
            player: Some(player),
            collectibles,
            enemies,
            explosion,
            death_marker,
            background,
            lives: tuning.starting_lives,
            items_collected: 0,
            invulnerable: false,
            elapsed_time: 0.0,
            explosion_end_time: 0.0,
            invulnerability_end_time: 0.0,
            next_spawn_time: tuning.first_spawn_time,
            player_dead: false,
            should_terminate: false,
            rng,
            events: Vec::new(),
            config,
        }
    }

    pub fn tuning(&self) -> &TuningConfig {
        &self.config.tuning
    }

    pub fn player(&self) -> Option<&Entity> {
        self.player.as_ref()
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn collectibles(&self) -> &[Entity] {
        &self.collectibles
    }

    pub fn explosion(&self) -> &Entity {
        &self.explosion
    }

    pub fn death_marker(&self) -> &Entity {
        &self.death_marker
    }

    pub fn background(&self) -> &Entity {
        &self.background
    }

    /// Every non-enemy entity in outer-pass order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.player
            .iter()
            .chain(self.collectibles.iter())
            .chain([&self.explosion, &self.death_marker, &self.background])
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn items_collected(&self) -> u32 {
        self.items_collected
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    pub fn explosion_end_time(&self) -> f64 {
        self.explosion_end_time
    }

    pub fn invulnerability_end_time(&self) -> f64 {
        self.invulnerability_end_time
    }

    pub fn next_spawn_time(&self) -> f64 {
        self.next_spawn_time
    }

    pub fn is_player_dead(&self) -> bool {
        self.player_dead
    }

    pub fn should_terminate(&self) -> bool {
        self.should_terminate
    }

    /// Appends a patrolling enemy whose orbit centre is derived from
    /// `position` and the configured orbit offset.
    pub fn spawn_enemy_at(&mut self, position: Vec3) {
        debug!("Enemy spawned at ({}, {})", position.x, position.y);
        self.enemies
            .push(Entity::enemy(position, self.config.tuning.orbit_offset));
        self.events.push(WorldEvent::EnemySpawned { position });
    }

    /// Returns and clears the events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    /// One-line HUD text: lives, items and the current state.
    pub fn status_line(&self) -> String {
        let mut line = format!(
            "{} | Lives: {} | Items: {}/{}",
            self.config.window.title,
            self.lives.max(0),
            self.items_collected,
            self.config.tuning.items_for_empowerment
        );

        if self.player_dead {
            line.push_str(" | GAME OVER");
        } else if self.invulnerable {
            line.push_str(" | EMPOWERED");
        }

        line
    }
}

fn controls_from(tuning: &TuningConfig) -> PlayerControls {
    PlayerControls {
        speed: tuning.player_speed,
        normalize_diagonal: tuning.normalize_diagonal,
    }
}

fn enemy_tuning_from(tuning: &TuningConfig) -> EnemyTuning {
    EnemyTuning {
        patrol_angular_rate: tuning.patrol_angular_rate,
        pursuit_gain: tuning.pursuit_gain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_initial_state() {
        let world = GameWorld::new(GameConfig::default());

        assert_eq!(world.lives(), 2);
        assert_eq!(world.items_collected(), 0);
        assert_eq!(world.next_spawn_time(), 7.0);
        assert_eq!(world.elapsed_time(), 0.0);
        assert!(!world.is_invulnerable());
        assert!(!world.is_player_dead());
        assert!(!world.should_terminate());
        assert_eq!(world.enemies().len(), 2);
        assert_eq!(world.collectibles().len(), 5);
        assert_eq!(world.player().map(|p| p.position), Some(Vec3::ZERO));
    }

    #[test]
    fn test_reserved_entities() {
        let world = GameWorld::new(GameConfig::default());

        assert_eq!(world.explosion().position, Vec3::new(100.0, 100.0, 100.0));
        assert_eq!(world.explosion().scale(), 5.0);
        assert_eq!(world.death_marker().scale(), 5.0);
        assert_eq!(world.background().scale(), 10.0);
        assert_eq!(world.background().kind(), EntityKind::Background);
    }

    #[test]
    fn test_entities_in_outer_pass_order() {
        let world = GameWorld::new(GameConfig::default());

        let kinds: Vec<EntityKind> = world.entities().map(Entity::kind).collect();

        assert_eq!(kinds.len(), 9);
        assert_eq!(kinds[0], EntityKind::Player);
        assert!(kinds[1..6].iter().all(|&k| k == EntityKind::Collectible));
        assert_eq!(&kinds[6..], &[EntityKind::Effect, EntityKind::Effect, EntityKind::Background]);
    }

    #[test]
    fn test_enemy_orbit_centres() {
        let world = GameWorld::new(GameConfig::default());
        let centre = world.enemies()[1].reference_point();

        assert_abs_diff_eq!(centre.x, 2.6, epsilon = 1e-6);
        assert_abs_diff_eq!(centre.y, -0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_spawn_enemy_at_records_event() {
        let mut world = GameWorld::new(GameConfig::default());

        world.spawn_enemy_at(Vec3::new(1.0, -2.0, 0.0));

        assert_eq!(world.enemies().len(), 3);
        assert_eq!(
            world.drain_events(),
            vec![WorldEvent::EnemySpawned {
                position: Vec3::new(1.0, -2.0, 0.0)
            }]
        );
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_status_line() {
        let mut world = GameWorld::new(GameConfig::default());
        assert_eq!(world.status_line(), "Assignment 2 | Lives: 2 | Items: 0/5");

        world.invulnerable = true;
        assert!(world.status_line().ends_with("EMPOWERED"));

        world.lives = -1;
        world.player_dead = true;
        assert_eq!(world.status_line(), "Assignment 2 | Lives: 0 | Items: 0/5 | GAME OVER");
    }
}
