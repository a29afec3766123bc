// Game module - Contains all game logic and state management
//
// This module contains:
// - world.rs: GameWorld struct, setup and accessors
// - types.rs: Shared enums (WorldEvent)
// - update.rs: The per-frame update (movement, AI, collisions, spawning, timers)

// Module declarations
pub mod types;
pub mod update;
pub mod world;

// Re-export types for convenience
pub use types::*;
pub use world::GameWorld;
