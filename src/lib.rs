//! Orbit Patrol - simulation core of a small 2D arcade game
//!
//! The player dodges patrolling enemies and picks up items in a bounded
//! arena. Five pickups make the player briefly invulnerable; a hit costs a
//! life and spawns an explosion; losing the last life ends the game once the
//! explosion has played out.
//!
//! The crate is split the same way the game is:
//! - [`entity`], [`enemy`], [`player`], [`collision`]: the pieces
//! - [`game`]: the world state and the per-frame update
//! - [`render`], [`input_system`]: the boundary to the platform
//! - [`frame`]: the game loop
//! - [`config`], [`error`], [`logging`]: startup plumbing
//!
//! The SDL2 window, keyboard and texture code lives in `platform` behind
//! the `sdl` feature.

pub mod collision;
pub mod config;
pub mod enemy;
pub mod entity;
pub mod error;
pub mod frame;
pub mod game;
pub mod input_system;
pub mod logging;
pub mod player;
pub mod render;

#[cfg(feature = "sdl")]
pub mod platform;

#[cfg(test)]
mod test_support;
