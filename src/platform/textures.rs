use crate::config::TextureConfig;
use crate::entity::EntityKind;
use crate::render::PlayerAppearance;
use log::{info, warn};
use sdl2::image::LoadTexture;
use sdl2::pixels::Color;
use sdl2::render::{Texture, TextureCreator};
use sdl2::video::WindowContext;
use std::path::Path;

/// All textures the arena needs, one per entity kind plus the empowered
/// player variant.
///
/// Any of them may be missing; the renderer then draws a flat quad in the
/// kind's fallback colour instead.
pub struct TextureSet<'a> {
    player: Option<Texture<'a>>,
    player_empowered: Option<Texture<'a>>,
    enemy: Option<Texture<'a>>,
    collectible: Option<Texture<'a>>,
    effect: Option<Texture<'a>>,
    background: Option<Texture<'a>>,
}

impl<'a> TextureSet<'a> {
    pub fn load(texture_creator: &'a TextureCreator<WindowContext>, config: &TextureConfig) -> Self {
        let set = TextureSet {
            player: load_optional(texture_creator, &config.player),
            player_empowered: load_optional(texture_creator, &config.player_empowered),
            enemy: load_optional(texture_creator, &config.enemy),
            collectible: load_optional(texture_creator, &config.collectible),
            effect: load_optional(texture_creator, &config.effect),
            background: load_optional(texture_creator, &config.background),
        };
        info!("Loaded {}/6 textures", set.loaded_count());
        set
    }

    /// A set with no textures at all.
    pub fn empty() -> Self {
        TextureSet {
            player: None,
            player_empowered: None,
            enemy: None,
            collectible: None,
            effect: None,
            background: None,
        }
    }

    fn loaded_count(&self) -> usize {
        [
            &self.player,
            &self.player_empowered,
            &self.enemy,
            &self.collectible,
            &self.effect,
            &self.background,
        ]
        .iter()
        .filter(|texture| texture.is_some())
        .count()
    }

    /// The texture for `kind`. An empowered player without its own texture
    /// keeps the normal one.
    pub fn for_kind(&self, kind: EntityKind, appearance: PlayerAppearance) -> Option<&Texture<'a>> {
        match (kind, appearance) {
            (EntityKind::Player, PlayerAppearance::Empowered) => {
                self.player_empowered.as_ref().or(self.player.as_ref())
            }
            (EntityKind::Player, PlayerAppearance::Normal) => self.player.as_ref(),
            (EntityKind::Enemy, _) => self.enemy.as_ref(),
            (EntityKind::Collectible, _) => self.collectible.as_ref(),
            (EntityKind::Effect, _) => self.effect.as_ref(),
            (EntityKind::Background, _) => self.background.as_ref(),
        }
    }
}

fn load_optional<'a>(
    texture_creator: &'a TextureCreator<WindowContext>,
    path: &Path,
) -> Option<Texture<'a>> {
    match texture_creator.load_texture(path) {
        Ok(texture) => Some(texture),
        Err(e) => {
            warn!("Failed to load {}: {}, using flat colour", path.display(), e);
            None
        }
    }
}

/// Flat colour drawn when a kind has no texture. The background has none;
/// the clear colour shows through.
pub fn fallback_color(kind: EntityKind, appearance: PlayerAppearance) -> Option<Color> {
    match (kind, appearance) {
        (EntityKind::Player, PlayerAppearance::Normal) => Some(Color::RGB(230, 230, 230)),
        (EntityKind::Player, PlayerAppearance::Empowered) => Some(Color::RGB(255, 215, 0)),
        (EntityKind::Enemy, _) => Some(Color::RGB(200, 40, 40)),
        (EntityKind::Collectible, _) => Some(Color::RGB(60, 200, 90)),
        (EntityKind::Effect, _) => Some(Color::RGB(255, 140, 0)),
        (EntityKind::Background, _) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_colors() {
        assert!(fallback_color(EntityKind::Background, PlayerAppearance::Normal).is_none());
        assert_ne!(
            fallback_color(EntityKind::Player, PlayerAppearance::Normal),
            fallback_color(EntityKind::Player, PlayerAppearance::Empowered)
        );
    }

    #[test]
    fn test_empty_set_has_no_textures() {
        let set = TextureSet::empty();
        assert_eq!(set.loaded_count(), 0);
        assert!(set.for_kind(EntityKind::Enemy, PlayerAppearance::Normal).is_none());
    }
}
