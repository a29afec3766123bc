/// Frame Driver - runs the game loop
///
/// The driver owns the clock bookkeeping and the exit conditions; everything
/// platform-specific (timing source, input polling, presenting) sits behind
/// the [`FrameHost`] trait so the loop can be driven by SDL2 or by a scripted
/// host in tests.
///
/// # Architecture
///
/// Each tick:
/// 1. Poll input. A close signal ends the loop before anything else happens
/// 2. `dt = now - last`
/// 3. `world.update(view, dt, intents, renderer)`
/// 4. Hand the frame's events to the host and present
/// 5. Stop if the world asked to terminate
use crate::error::GameError;
use crate::game::{GameWorld, WorldEvent};
use crate::input_system::InputFrame;
use crate::render::{RenderAdapter, view_matrix};
use glam::Mat4;
use log::info;

/// Platform side of the game loop.
pub trait FrameHost {
    type Renderer: RenderAdapter;

    /// Monotonic time in seconds.
    fn now(&self) -> f64;

    /// Drains pending platform input.
    fn poll(&mut self) -> InputFrame;

    /// Prepares a new frame and returns the adapter the world draws into.
    fn begin_frame(&mut self) -> &mut Self::Renderer;

    /// Presents the frame. `events` are the world events of this frame.
    fn end_frame(&mut self, world: &GameWorld, events: &[WorldEvent]) -> Result<(), GameError>;
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The window was closed
    Closed,
    /// The world set its termination flag (quit key or game over)
    Terminated,
}

pub struct FrameDriver {
    view: Mat4,
    last_time: Option<f64>,
    frames: u64,
}

impl FrameDriver {
    pub fn new(camera_zoom: f32) -> Self {
        FrameDriver {
            view: view_matrix(camera_zoom),
            last_time: None,
            frames: 0,
        }
    }

    /// Frames completed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame. Returns the outcome once the loop should stop.
    pub fn tick<H: FrameHost>(
        &mut self,
        world: &mut GameWorld,
        host: &mut H,
    ) -> Result<Option<RunOutcome>, GameError> {
        let input = host.poll();
        if input.close_requested {
            return Ok(Some(RunOutcome::Closed));
        }

        let now = host.now();
        let delta_time = self.last_time.map_or(0.0, |last| now - last);
        self.last_time = Some(now);

        let renderer = host.begin_frame();
        world.update(&self.view, delta_time, &input.intents, renderer);

        let events = world.drain_events();
        host.end_frame(world, &events)?;
        self.frames += 1;

        if world.should_terminate() {
            return Ok(Some(RunOutcome::Terminated));
        }
        Ok(None)
    }

    /// Ticks until the window closes or the world terminates.
    pub fn run<H: FrameHost>(
        &mut self,
        world: &mut GameWorld,
        host: &mut H,
    ) -> Result<RunOutcome, GameError> {
        loop {
            if let Some(outcome) = self.tick(world, host)? {
                info!("Game loop finished after {} frames ({:?})", self.frames, outcome);
                return Ok(outcome);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use crate::input_system::MovementIntents;
    use crate::test_support::{RecordingRenderer, arena_config, quiet_config};
    use approx::assert_abs_diff_eq;
    use glam::Vec3;
    use std::collections::VecDeque;

    /// Host with a fake clock that advances `step` seconds per poll.
    struct ScriptedHost {
        clock: f64,
        step: f64,
        inputs: VecDeque<InputFrame>,
        renderer: RecordingRenderer,
        frames_presented: usize,
        events_seen: Vec<WorldEvent>,
    }

    impl ScriptedHost {
        fn new(step: f64, inputs: Vec<InputFrame>) -> Self {
            ScriptedHost {
                clock: 0.0,
                step,
                inputs: inputs.into(),
                renderer: RecordingRenderer::new(),
                frames_presented: 0,
                events_seen: Vec::new(),
            }
        }
    }

    impl FrameHost for ScriptedHost {
        type Renderer = RecordingRenderer;

        fn now(&self) -> f64 {
            self.clock
        }

        fn poll(&mut self) -> InputFrame {
            self.clock += self.step;
            self.inputs.pop_front().unwrap_or_default()
        }

        fn begin_frame(&mut self) -> &mut RecordingRenderer {
            &mut self.renderer
        }

        fn end_frame(&mut self, _world: &GameWorld, events: &[WorldEvent]) -> Result<(), GameError> {
            self.frames_presented += 1;
            self.events_seen.extend_from_slice(events);
            Ok(())
        }
    }

    fn close() -> InputFrame {
        InputFrame {
            close_requested: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_stops_on_close_signal() {
        let mut world = GameWorld::new(quiet_config());
        let mut host = ScriptedHost::new(0.1, vec![InputFrame::default(), InputFrame::default(), close()]);
        let mut driver = FrameDriver::new(0.25);

        let outcome = driver.run(&mut world, &mut host).unwrap();

        assert_eq!(outcome, RunOutcome::Closed);
        assert_eq!(driver.frames(), 2);
        assert_eq!(host.frames_presented, 2);
    }

    #[test]
    fn test_stops_on_quit_intent() {
        let mut world = GameWorld::new(quiet_config());
        let quit = InputFrame {
            intents: MovementIntents {
                quit: true,
                ..Default::default()
            },
            close_requested: false,
        };
        let mut host = ScriptedHost::new(0.1, vec![quit]);
        let mut driver = FrameDriver::new(0.25);

        let outcome = driver.run(&mut world, &mut host).unwrap();

        assert_eq!(outcome, RunOutcome::Terminated);
        assert_eq!(driver.frames(), 1);
        assert_eq!(host.events_seen, vec![WorldEvent::QuitRequested]);
    }

    #[test]
    fn test_delta_time_from_clock() {
        let mut world = GameWorld::new(quiet_config());
        let inputs = vec![InputFrame::default(); 3];
        let mut host = ScriptedHost::new(0.5, inputs);
        let mut driver = FrameDriver::new(0.25);

        for _ in 0..3 {
            assert_eq!(driver.tick(&mut world, &mut host).unwrap(), None);
        }

        // The first frame has no previous timestamp
        assert_abs_diff_eq!(world.elapsed_time(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_game_over_terminates_loop() {
        let mut config = arena_config(Vec3::ZERO, &[Vec3::new(0.2, 0.0, 0.0)], &[]);
        config.tuning.starting_lives = 0;
        let mut world = GameWorld::new(config);
        let mut host = ScriptedHost::new(0.25, Vec::new());
        let mut driver = FrameDriver::new(0.25);

        let outcome = driver.run(&mut world, &mut host).unwrap();

        assert_eq!(outcome, RunOutcome::Terminated);
        assert!(world.is_player_dead());
        assert!(host.events_seen.contains(&WorldEvent::PlayerKilled));
        assert_eq!(host.events_seen.last(), Some(&WorldEvent::GameOver));
        // Killed on the first frame (dt 0), explosion shows for two seconds
        assert_eq!(driver.frames(), 9);
        assert_eq!(host.renderer.count(EntityKind::Player), 0);
    }
}
