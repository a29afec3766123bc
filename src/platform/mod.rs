//! SDL2 platform layer
//!
//! Window, keyboard, textures and the canvas renderer. Only compiled with the
//! `sdl` feature; the simulation never depends on it.

pub mod host;
pub mod sdl_render;
pub mod textures;

pub use host::SdlHost;
pub use sdl_render::SdlRenderer;
pub use textures::TextureSet;
