// Shared enums used by the world and the frame driver

use glam::Vec3;

/// Something notable that happened during an update.
///
/// The world appends these as it goes; the driver drains them once per frame
/// and hands them to the platform host (the SDL host refreshes the window
/// title when lives or items change).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldEvent {
    EnemySpawned { position: Vec3 },
    /// A patrolling enemy came close enough to start homing
    PursuitStarted,
    EnemyDestroyed { position: Vec3 },
    PlayerHit { lives_left: i32 },
    PlayerKilled,
    ItemCollected { count: u32 },
    Empowered,
    EmpowermentExpired,
    ExplosionCleared,
    GameOver,
    QuitRequested,
}

impl WorldEvent {
    /// Events that change what the HUD shows.
    pub fn affects_hud(&self) -> bool {
        matches!(
            self,
            WorldEvent::PlayerHit { .. }
                | WorldEvent::PlayerKilled
                | WorldEvent::ItemCollected { .. }
                | WorldEvent::Empowered
                | WorldEvent::EmpowermentExpired
                | WorldEvent::GameOver
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_events() {
        assert!(WorldEvent::ItemCollected { count: 3 }.affects_hud());
        assert!(WorldEvent::PlayerHit { lives_left: 1 }.affects_hud());
        assert!(!WorldEvent::PursuitStarted.affects_hud());
        assert!(!WorldEvent::EnemySpawned { position: Vec3::ZERO }.affects_hud());
    }
}
