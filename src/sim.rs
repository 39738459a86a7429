use crate::{
    camera::Camera,
    caster::Caster,
    collision,
    grid::Grid,
    input::{Action, InputState},
    settings::Settings,
    vector::Vector2,
};

/// Turns frame timestamps into simulation deltas.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_delta: f64,
    fps: f64,
}

impl FrameClock {
    pub fn new(max_delta: f64) -> Self {
        Self {
            last_ms: None,
            max_delta,
            fps: 0.0,
        }
    }

    /// Seconds since the previous tick, capped at `max_delta` so a stalled
    /// frame cannot turn into one huge movement step. The first tick is 0.
    pub fn tick(&mut self, timestamp_ms: f64) -> f64 {
        let raw = match self.last_ms.replace(timestamp_ms) {
            Some(last) => ((timestamp_ms - last) / 1000.0).max(0.0),
            None => 0.0,
        };

        if raw > 0.0 {
            self.fps = 1.0 / raw;
        }

        if raw > self.max_delta {
            log::warn!(
                "frame took {:.0} ms, clamping to {:.0} ms",
                raw * 1000.0,
                self.max_delta * 1000.0
            );
            self.max_delta
        } else {
            raw
        }
    }

    /// Instantaneous rate of the last real (unclamped) delta.
    #[inline]
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

/// Everything one frame reads or writes, owned by the frame driver.
///
/// Only [`SimulationState::update`] mutates the camera; rendering borrows
/// the state immutably.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub grid: Grid,
    pub camera: Camera,
    pub settings: Settings,
}

impl SimulationState {
    pub fn new(grid: Grid, settings: Settings) -> Self {
        let camera = Camera::new(
            settings.spawn_position,
            settings.spawn_direction,
            settings.fov_degrees,
        );
        Self {
            grid,
            camera,
            settings,
        }
    }

    #[inline]
    pub fn caster(&self) -> Caster<'_> {
        Caster::new(&self.grid, self.settings.max_steps)
    }

    /// Advances the camera by `dt` seconds of held input.
    ///
    /// Each held move is resolved and committed on its own, in the order
    /// forward, backward, strafe left, strafe right, so simultaneous keys
    /// compose as consecutive moves rather than one summed vector.
    pub fn update(&mut self, dt: f64, input: &impl InputState) {
        let step = self.settings.move_speed * dt;
        let turn = self.settings.turn_speed * dt;

        let forward = self.camera.direction();
        if input.is_held(Action::Forward) {
            self.try_move(self.camera.position + forward * step);
        }
        if input.is_held(Action::Backward) {
            self.try_move(self.camera.position - forward * step);
        }

        let right = self.camera.right();
        if input.is_held(Action::StrafeLeft) {
            self.try_move(self.camera.position - right * step);
        }
        if input.is_held(Action::StrafeRight) {
            self.try_move(self.camera.position + right * step);
        }

        if input.is_held(Action::TurnLeft) {
            self.camera.rotate(turn);
        }
        if input.is_held(Action::TurnRight) {
            self.camera.rotate(-turn);
        }
    }

    fn try_move(&mut self, desired: Vector2) {
        self.camera.position = collision::resolve(
            &self.grid,
            self.camera.position,
            desired,
            self.settings.clearance,
        );
    }
}
