use super::SdlRenderer;
use crate::error::GameError;
use crate::frame::FrameHost;
use crate::game::{GameWorld, WorldEvent};
use crate::input_system::{InputFrame, InputSystem};
use sdl2::EventPump;
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;
use std::time::{Duration, Instant};

// Roughly 60 FPS between presents
const FRAME_PAUSE: Duration = Duration::new(0, 1_000_000_000u32 / 60);

/// SDL2 side of the game loop: window, event pump and canvas renderer.
pub struct SdlHost<'a> {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    input: InputSystem,
    renderer: SdlRenderer<'a>,
    clear_color: Color,
    started: Instant,
}

impl<'a> SdlHost<'a> {
    pub fn new(
        canvas: Canvas<Window>,
        event_pump: EventPump,
        renderer: SdlRenderer<'a>,
        clear_color: [u8; 3],
    ) -> Self {
        let [r, g, b] = clear_color;
        SdlHost {
            canvas,
            event_pump,
            input: InputSystem::new(),
            renderer,
            clear_color: Color::RGB(r, g, b),
            started: Instant::now(),
        }
    }

    /// Shows lives and items in the window title.
    pub fn refresh_title(&mut self, world: &GameWorld) -> Result<(), GameError> {
        self.canvas
            .window_mut()
            .set_title(&world.status_line())
            .map_err(|e| GameError::Platform(e.to_string()))
    }
}

impl<'a> FrameHost for SdlHost<'a> {
    type Renderer = SdlRenderer<'a>;

    fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn poll(&mut self) -> InputFrame {
        self.input.poll(&mut self.event_pump)
    }

    fn begin_frame(&mut self) -> &mut SdlRenderer<'a> {
        &mut self.renderer
    }

    fn end_frame(&mut self, world: &GameWorld, events: &[WorldEvent]) -> Result<(), GameError> {
        self.canvas.set_draw_color(self.clear_color);
        self.canvas.clear();
        self.renderer.paint(&mut self.canvas);
        self.canvas.present();

        if events.iter().any(WorldEvent::affects_hud) {
            self.refresh_title(world)?;
        }

        std::thread::sleep(FRAME_PAUSE);
        Ok(())
    }
}
