//! Shared fixtures for unit tests.

use crate::config::GameConfig;
use crate::entity::{Entity, EntityKind};
use crate::render::{PlayerAppearance, RenderAdapter};
use glam::{Mat4, Vec3};

/// Render adapter that remembers every call.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub draws: Vec<(EntityKind, Vec3)>,
    pub appearances: Vec<PlayerAppearance>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.draws.iter().filter(|(k, _)| *k == kind).count()
    }

    pub fn clear(&mut self) {
        self.draws.clear();
        self.appearances.clear();
    }
}

impl RenderAdapter for RecordingRenderer {
    fn draw(&mut self, entity: &Entity, _view: &Mat4, _time: f64) {
        self.draws.push((entity.kind(), entity.position));
    }

    fn set_player_appearance(&mut self, appearance: PlayerAppearance) {
        self.appearances.push(appearance);
    }
}

/// Default config with an empty level, a fixed seed and no timed spawns.
pub fn quiet_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.layout.enemies.clear();
    config.layout.collectibles.clear();
    config.tuning.seed = Some(7);
    config.tuning.first_spawn_time = 1.0e9;
    config
}

/// A quiet config with the given player, enemy and collectible positions.
pub fn arena_config(player: Vec3, enemies: &[Vec3], collectibles: &[Vec3]) -> GameConfig {
    let mut config = quiet_config();
    config.layout.player = player;
    config.layout.enemies = enemies.to_vec();
    config.layout.collectibles = collectibles.to_vec();
    config
}
