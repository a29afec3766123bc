/// Render adapter boundary
///
/// The simulation never draws anything itself. It hands entities to a
/// [`RenderAdapter`] together with the view transform, and tells the adapter
/// when the player's appearance changes. Everything here is platform-free;
/// the SDL2 implementation lives in `platform`.
///
/// # Architecture
///
/// - `RenderAdapter` trait: what the world calls into
/// - `model_matrix` / `view_matrix`: translation * scale, uniform zoom
/// - `project_quad`: unit quad -> NDC -> pixel rectangle
/// - `DrawCommand` + `sort_for_painting`: painter's-algorithm ordering, so an
///   adapter can accept draws in simulation order and paint them back to front
use crate::entity::{Entity, EntityKind};
use glam::{Mat4, Vec3, Vec4};

/// Which texture variant the player is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerAppearance {
    #[default]
    Normal,
    /// Shown while the player is invulnerable
    Empowered,
}

/// Trait implemented by anything that can draw the arena.
///
/// Stateless from the simulation's point of view: no return value is
/// consumed, and a failed draw must not affect the world.
pub trait RenderAdapter {
    /// Draws one entity as a textured, scaled, translated quad.
    fn draw(&mut self, entity: &Entity, view: &Mat4, time: f64);

    /// Swaps the player's texture.
    fn set_player_appearance(&mut self, appearance: PlayerAppearance);
}

/// Adapter that draws nothing. Useful for headless runs.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderAdapter for NullRenderer {
    fn draw(&mut self, _entity: &Entity, _view: &Mat4, _time: f64) {}

    fn set_player_appearance(&mut self, _appearance: PlayerAppearance) {}
}

/// Model transform for an entity: translate to its position, then scale x/y.
pub fn model_matrix(entity: &Entity) -> Mat4 {
    let scale = entity.scale();
    Mat4::from_translation(entity.position) * Mat4::from_scale(Vec3::new(scale, scale, 1.0))
}

/// Camera transform: a uniform zoom centred on the origin.
pub fn view_matrix(camera_zoom: f32) -> Mat4 {
    Mat4::from_scale(Vec3::splat(camera_zoom))
}

/// An axis-aligned pixel rectangle, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Projects the unit quad (-0.5..0.5 on both axes) through `transform`
/// (usually `view * model`) into a viewport of `viewport_width` x
/// `viewport_height` pixels.
///
/// NDC y points up, pixel y points down. Returns `None` when the quad
/// collapses to less than a pixel.
pub fn project_quad(
    transform: &Mat4,
    viewport_width: u32,
    viewport_height: u32,
) -> Option<ScreenRect> {
    let low = transform * Vec4::new(-0.5, -0.5, 0.0, 1.0);
    let high = transform * Vec4::new(0.5, 0.5, 0.0, 1.0);

    let (w, h) = (viewport_width as f32, viewport_height as f32);
    let to_pixel_x = |ndc: f32| ((ndc + 1.0) * 0.5 * w).round();
    let to_pixel_y = |ndc: f32| ((1.0 - ndc) * 0.5 * h).round();

    let left = to_pixel_x(low.x.min(high.x));
    let right = to_pixel_x(low.x.max(high.x));
    let top = to_pixel_y(low.y.max(high.y));
    let bottom = to_pixel_y(low.y.min(high.y));

    let width = right - left;
    let height = bottom - top;
    if !(width >= 1.0 && height >= 1.0) {
        return None;
    }

    Some(ScreenRect {
        x: left as i32,
        y: top as i32,
        width: width as u32,
        height: height as u32,
    })
}

/// Painting layer for an entity kind. Lower layers are painted first.
pub fn paint_layer(kind: EntityKind) -> u8 {
    match kind {
        EntityKind::Background => 0,
        EntityKind::Collectible => 1,
        EntityKind::Enemy => 2,
        EntityKind::Player => 3,
        EntityKind::Effect => 4,
    }
}

/// A draw request captured during the update, painted at end of frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub kind: EntityKind,
    pub transform: Mat4,
}

impl DrawCommand {
    pub fn capture(entity: &Entity, view: &Mat4) -> Self {
        DrawCommand {
            kind: entity.kind(),
            transform: *view * model_matrix(entity),
        }
    }

    pub fn layer(&self) -> u8 {
        paint_layer(self.kind)
    }
}

/// Sorts draw commands back to front (painter's algorithm).
///
/// The sort is stable: commands on the same layer keep the order the
/// simulation issued them in.
pub fn sort_for_painting(commands: &mut [DrawCommand]) {
    commands.sort_by_key(DrawCommand::layer);
}
