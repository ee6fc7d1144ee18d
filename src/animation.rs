// Frame loop that owns the field and the surface it draws on. The browser driver
// calls tick() from requestAnimationFrame and keeps rescheduling while it returns
// true, tests call run_frames() for a bounded number of frames instead.

use crate::error::Result;
use crate::field::Field;
use crate::renderer::Surface;
use log::info;
use rand::Rng;

pub struct Animation<S: Surface, R: Rng> {
    pub field: Field<R>,
    pub surface: S,
    running: bool,
    frames: u64,
}

impl<S: Surface, R: Rng> Animation<S, R> {
    pub fn new(field: Field<R>, surface: S) -> Self {
        Animation {
            field,
            surface,
            running: true,
            frames: 0,
        }
    }

    /// Renders one frame if the loop is still running. Returns whether the
    /// next frame should be scheduled.
    pub fn tick(&mut self) -> Result<bool> {
        if !self.running {
            return Ok(false);
        }
        self.field.frame(&mut self.surface)?;
        self.frames += 1;
        Ok(self.running)
    }

    /// Renders up to `count` frames, fewer if the loop gets stopped.
    pub fn run_frames(&mut self, count: usize) -> Result<usize> {
        let mut rendered = 0;
        while rendered < count && self.tick()? {
            rendered += 1;
        }
        Ok(rendered)
    }

    pub fn stop(&mut self) {
        if self.running {
            info!("animation stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.surface.resize(width, height);
        self.field.on_resize(width, height);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.field.on_pointer_move(x, y);
    }

    pub fn pointer_leave(&mut self) {
        self.field.on_pointer_leave();
    }

    pub fn click(&mut self, x: f64, y: f64) {
        self.field.on_click(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::renderer::recording::{DrawCall, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn animation(seed: u64) -> Animation<RecordingSurface, StdRng> {
        let field = Field::new(
            1400.0,
            800.0,
            FieldConfig::default(),
            StdRng::seed_from_u64(seed),
        );
        Animation::new(field, RecordingSurface::default())
    }

    #[test]
    fn runs_bounded_number_of_frames() {
        let mut animation = animation(42);
        assert_eq!(animation.run_frames(25).unwrap(), 25);
        assert_eq!(animation.frames(), 25);
        assert!(animation.is_running());
    }

    #[test]
    fn stopped_loop_renders_nothing() {
        let mut animation = animation(42);
        animation.run_frames(3).unwrap();
        animation.stop();
        animation.surface.calls.clear();
        assert!(!animation.tick().unwrap());
        assert_eq!(animation.run_frames(10).unwrap(), 0);
        assert_eq!(animation.frames(), 3);
        assert!(animation.surface.calls.is_empty());
    }

    #[test]
    fn same_seed_replays_same_frames() {
        let mut first = animation(9);
        let mut second = animation(9);
        first.click(300.0, 300.0);
        second.click(300.0, 300.0);
        first.run_frames(40).unwrap();
        second.run_frames(40).unwrap();
        assert_eq!(first.surface.calls, second.surface.calls);
    }

    #[test]
    fn resize_reaches_surface_and_field() {
        let mut animation = animation(42);
        animation.resize(600.0, 400.0);
        assert_eq!(animation.surface.size, (600.0, 400.0));
        assert_eq!(animation.field.len(), 20);
        animation.tick().unwrap();
        assert_eq!(
            animation.surface.calls[0],
            DrawCall::Clear {
                width: 600.0,
                height: 400.0
            }
        );
    }

    #[test]
    fn click_between_frames_is_drawn_next_frame() {
        let mut animation = animation(42);
        animation.tick().unwrap();
        assert_eq!(animation.surface.circles().len(), 93);
        animation.click(50.0, 50.0);
        animation.tick().unwrap();
        assert_eq!(animation.surface.circles().len(), 101);
    }
}
