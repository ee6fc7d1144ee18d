// The particle field: every live particle, the canvas size and the pointer.
// Populated from the canvas area, fully reset on resize, grows by a burst of
// explosion particles on each click and drops its oldest particles once the
// cap is exceeded. Field::frame runs one animation frame against any Surface.

use crate::config::FieldConfig;
use crate::error::Result;
use crate::particle::{Particle, ParticleKind};
use crate::pointer::Pointer;
use crate::renderer::Surface;
use log::{debug, info};
use rand::Rng;
use std::collections::VecDeque;
use vecmath::{vec2_square_len, vec2_sub};

/// Number of particles a `width` x `height` canvas holds at the given density.
/// Degenerate sizes (zero, negative, not finite) hold none.
pub fn target_count(width: f64, height: f64, density: f64) -> usize {
    let count = (width * height / density).floor();
    if width > 0.0 && height > 0.0 && count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// Opacity of a particle link at squared distance `distance_sq`, fading
/// linearly to zero at `fade_distance_sq`.
pub fn link_opacity(distance_sq: f64, fade_distance_sq: f64) -> f64 {
    (1.0 - distance_sq / fade_distance_sq).max(0.0).min(1.0)
}

pub struct Field<R: Rng> {
    width: f64,
    height: f64,
    particles: VecDeque<Particle>,
    pointer: Pointer,
    config: FieldConfig,
    rng: R,
}

impl<R: Rng> Field<R> {
    pub fn new(width: f64, height: f64, config: FieldConfig, rng: R) -> Self {
        let mut field = Field {
            width,
            height,
            particles: VecDeque::new(),
            pointer: Pointer::new(config.pointer_radius),
            config,
            rng,
        };
        field.initialize(width, height);
        field
    }

    /// Throws away every particle and populates the field for the given size.
    pub fn initialize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        let count = target_count(width, height, self.config.density);
        self.particles.clear();
        self.particles.reserve(count);
        let bounds = self.bounds();
        for _ in 0..count {
            let p = Particle::spawn(
                &mut self.rng,
                bounds,
                None,
                ParticleKind::Normal,
                &self.config,
            );
            self.particles.push_back(p);
        }
        info!("field populated: {} particles on {}x{}", count, width, height);
    }

    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.initialize(width, height);
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer.move_to(x, y);
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer.leave();
    }

    /// Bursts explosion particles out of the click point. Once the field is
    /// over the cap the oldest particles go, never the fresh burst.
    pub fn on_click(&mut self, x: f64, y: f64) {
        let bounds = self.bounds();
        for _ in 0..self.config.burst_size {
            let p = Particle::spawn(
                &mut self.rng,
                bounds,
                Some([x, y]),
                ParticleKind::Explosion,
                &self.config,
            );
            self.particles.push_back(p);
        }
        if self.particles.len() > self.config.max_particles {
            let excess = self.config.burst_size.min(self.particles.len());
            self.particles.drain(..excess);
            debug!("particle cap hit, dropped {} oldest", excess);
        }
    }

    /// One animation frame: clear, step every particle, then link nearby
    /// particles to each other and to the pointer.
    pub fn frame<S: Surface>(&mut self, surface: &mut S) -> Result<()> {
        surface.clear(self.width, self.height);

        let bounds = self.bounds();
        for particle in self.particles.iter_mut() {
            particle.step(bounds, &self.pointer, &self.config, surface)?;
        }

        self.connect(surface);
        Ok(())
    }

    fn connect<S: Surface>(&self, surface: &mut S) {
        let config = &self.config;
        let link_distance_sq =
            (self.width / config.link_divisor) * (self.height / config.link_divisor);

        for (a, first) in self.particles.iter().enumerate() {
            for second in self.particles.iter().skip(a + 1) {
                let distance_sq = vec2_square_len(vec2_sub(first.pos, second.pos));
                if distance_sq >= link_distance_sq {
                    continue;
                }
                let opacity = link_opacity(distance_sq, config.fade_distance_sq);
                if opacity <= 0.0 {
                    continue;
                }
                surface.stroke_line(
                    first.pos,
                    second.pos,
                    config.particle_color,
                    opacity,
                    config.line_width,
                );
            }
        }

        if let Some(pointer_pos) = self.pointer.pos {
            for particle in self.particles.iter() {
                let close = self
                    .pointer
                    .square_distance_to(particle.pos)
                    .map_or(false, |distance_sq| {
                        distance_sq < config.pointer_link_distance_sq
                    });
                if close {
                    surface.stroke_line(
                        particle.pos,
                        pointer_pos,
                        config.particle_color,
                        config.pointer_link_opacity,
                        config.line_width,
                    );
                }
            }
        }
    }

    pub fn bounds(&self) -> [f64; 2] {
        [self.width, self.height]
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}
