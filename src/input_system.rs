use glam::Vec3;

/// Movement intents polled once per frame.
///
/// This decouples raw input (keyboard scancodes, window events) from the
/// simulation. The world only ever sees these booleans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementIntents {
    pub move_forward: bool,
    pub move_back: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub quit: bool,
}

impl MovementIntents {
    /// Nothing pressed.
    pub fn idle() -> Self {
        MovementIntents::default()
    }

    /// Sum of the unit axes of every held direction.
    ///
    /// Each direction is gated independently and the result is not
    /// normalized, so a diagonal is `sqrt(2)` long and opposite keys cancel.
    pub fn direction(&self) -> Vec3 {
        let mut direction = Vec3::ZERO;

        if self.move_forward {
            direction += Vec3::Y;
        }
        if self.move_back {
            direction -= Vec3::Y;
        }
        if self.move_right {
            direction += Vec3::X;
        }
        if self.move_left {
            direction -= Vec3::X;
        }

        direction
    }

    pub fn is_moving(&self) -> bool {
        self.direction() != Vec3::ZERO
    }
}

/// What one poll of the platform produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub intents: MovementIntents,
    /// The window was closed; this is the external close signal, not the
    /// in-game quit intent
    pub close_requested: bool,
}

#[cfg(feature = "sdl")]
pub use sdl_input::InputSystem;

#[cfg(feature = "sdl")]
mod sdl_input {
    use super::{InputFrame, MovementIntents};
    use sdl2::EventPump;
    use sdl2::event::Event;
    use sdl2::keyboard::Scancode;

    /// InputSystem drains SDL2 events and samples the keyboard.
    ///
    /// # Architecture
    ///
    /// 1. Poll pending events; a `Quit` event becomes the close signal
    /// 2. Sample the held-key state (W/S/A/D/Q)
    /// 3. Return an `InputFrame` for the frame driver
    pub struct InputSystem;

    impl InputSystem {
        pub fn new() -> Self {
            InputSystem
        }

        pub fn poll(&mut self, event_pump: &mut EventPump) -> InputFrame {
            let mut close_requested = false;

            for event in event_pump.poll_iter() {
                if let Event::Quit { .. } = event {
                    close_requested = true;
                }
            }

            let keyboard_state = event_pump.keyboard_state();
            let intents = MovementIntents {
                move_forward: keyboard_state.is_scancode_pressed(Scancode::W),
                move_back: keyboard_state.is_scancode_pressed(Scancode::S),
                move_left: keyboard_state.is_scancode_pressed(Scancode::A),
                move_right: keyboard_state.is_scancode_pressed(Scancode::D),
                quit: keyboard_state.is_scancode_pressed(Scancode::Q),
            };

            InputFrame {
                intents,
                close_requested,
            }
        }
    }

    impl Default for InputSystem {
        fn default() -> Self {
            Self::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_has_no_direction() {
        let intents = MovementIntents::idle();
        assert_eq!(intents.direction(), Vec3::ZERO);
        assert!(!intents.is_moving());
    }

    #[test]
    fn test_axis_directions() {
        let forward = MovementIntents {
            move_forward: true,
            ..Default::default()
        };
        let left = MovementIntents {
            move_left: true,
            ..Default::default()
        };

        assert_eq!(forward.direction(), Vec3::Y);
        assert_eq!(left.direction(), -Vec3::X);
    }

    #[test]
    fn test_diagonal_is_additive() {
        let intents = MovementIntents {
            move_forward: true,
            move_right: true,
            ..Default::default()
        };

        assert_eq!(intents.direction(), Vec3::new(1.0, 1.0, 0.0));
        assert!((intents.direction().length() - 2.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let intents = MovementIntents {
            move_forward: true,
            move_back: true,
            ..Default::default()
        };

        assert_eq!(intents.direction(), Vec3::ZERO);
    }

    #[test]
    fn test_quit_is_not_movement() {
        let intents = MovementIntents {
            quit: true,
            ..Default::default()
        };

        assert!(!intents.is_moving());
    }
}
