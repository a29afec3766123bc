use super::textures::{TextureSet, fallback_color};
use crate::entity::Entity;
use crate::render::{
    DrawCommand, PlayerAppearance, RenderAdapter, project_quad, sort_for_painting,
};
use glam::Mat4;
use log::{debug, warn};
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Canvas-backed render adapter.
///
/// Draws arrive during the world update in simulation order. They are
/// queued and painted back to front when the host presents the frame, so
/// the background never covers what was drawn before it.
pub struct SdlRenderer<'a> {
    textures: TextureSet<'a>,
    appearance: PlayerAppearance,
    queue: Vec<DrawCommand>,
    draw_failures: u64,
}

impl<'a> SdlRenderer<'a> {
    pub fn new(textures: TextureSet<'a>) -> Self {
        SdlRenderer {
            textures,
            appearance: PlayerAppearance::Normal,
            queue: Vec::new(),
            draw_failures: 0,
        }
    }

    pub fn appearance(&self) -> PlayerAppearance {
        self.appearance
    }

    /// Paints and clears the queued draws. Failures are logged, never
    /// returned: a missing frame is better than a crashed game.
    pub fn paint(&mut self, canvas: &mut Canvas<Window>) {
        sort_for_painting(&mut self.queue);

        let (width, height) = match canvas.output_size() {
            Ok(size) => size,
            Err(e) => {
                warn!("Could not query output size: {}", e);
                self.queue.clear();
                return;
            }
        };

        for command in self.queue.drain(..) {
            let Some(screen) = project_quad(&command.transform, width, height) else {
                continue;
            };
            let rect = Rect::new(screen.x, screen.y, screen.width, screen.height);

            let result = match self.textures.for_kind(command.kind, self.appearance) {
                Some(texture) => canvas.copy(texture, None, rect),
                None => match fallback_color(command.kind, self.appearance) {
                    Some(color) => {
                        canvas.set_draw_color(color);
                        canvas.fill_rect(rect)
                    }
                    None => Ok(()),
                },
            };

            if let Err(e) = result {
                self.draw_failures += 1;
                if self.draw_failures == 1 {
                    warn!("Draw failed for {:?}: {}", command.kind, e);
                } else {
                    debug!("Draw failed for {:?}: {}", command.kind, e);
                }
            }
        }
    }
}

impl RenderAdapter for SdlRenderer<'_> {
    fn draw(&mut self, entity: &Entity, view: &Mat4, _time: f64) {
        self.queue.push(DrawCommand::capture(entity, view));
    }

    fn set_player_appearance(&mut self, appearance: PlayerAppearance) {
        debug!("Player appearance -> {:?}", appearance);
        self.appearance = appearance;
    }
}
