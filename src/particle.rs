// Simple particle struct to keep track of individual position, velocity, size and color.
// Knows how to bounce off the canvas edges, dodge the pointer and draw itself.

use crate::color::Color;
use crate::config::FieldConfig;
use crate::error::Result;
use crate::pointer::Pointer;
use crate::renderer::Surface;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Normal,
    // Spawned by a click, moves faster
    Explosion,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub size: f64,
    pub color: Color,
    pub kind: ParticleKind,
}

impl Particle {
    pub fn new(pos: [f64; 2], vel: [f64; 2], size: f64, color: Color, kind: ParticleKind) -> Particle {
        Particle {
            pos,
            vel,
            size,
            color,
            kind,
        }
    }

    /// Random particle inside `bounds` (or at `at` when given) with a velocity
    /// drawn from the speed range of its kind.
    pub fn spawn<R: Rng>(
        rng: &mut R,
        bounds: [f64; 2],
        at: Option<[f64; 2]>,
        kind: ParticleKind,
        config: &FieldConfig,
    ) -> Particle {
        let pos = match at {
            Some(pos) => pos,
            None => [rng.gen::<f64>() * bounds[0], rng.gen::<f64>() * bounds[1]],
        };
        let speed = match kind {
            ParticleKind::Normal => config.normal_speed,
            ParticleKind::Explosion => config.explosion_speed,
        };
        let vel = [
            rng.gen::<f64>() * speed * 2.0 - speed,
            rng.gen::<f64>() * speed * 2.0 - speed,
        ];
        let size = rng.gen::<f64>() * (config.max_radius - config.min_radius) + config.min_radius;
        Particle::new(pos, vel, size, config.particle_color, kind)
    }

    /// Bounce, dodge the pointer, move. Does not draw.
    pub fn advance(&mut self, bounds: [f64; 2], pointer: &Pointer, config: &FieldConfig) {
        for axis in 0..2 {
            if self.pos[axis] > bounds[axis] || self.pos[axis] < 0.0 {
                self.vel[axis] = -self.vel[axis];
            }
        }

        if pointer.reaches(self.pos, self.size) {
            self.repel(pointer, bounds, config);
        }

        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1];
    }

    /// One animation frame for this particle: advance, then draw at the new position.
    pub fn step<S: Surface>(
        &mut self,
        bounds: [f64; 2],
        pointer: &Pointer,
        config: &FieldConfig,
        surface: &mut S,
    ) -> Result<()> {
        self.advance(bounds, pointer, config);
        surface.fill_circle(self.pos, self.size, self.color)
    }

    // Fixed nudge away from the pointer on each axis, skipped within the edge margin
    // so the pointer can't shove particles off the canvas
    fn repel(&mut self, pointer: &Pointer, bounds: [f64; 2], config: &FieldConfig) {
        let pointer_pos = match pointer.pos {
            Some(pos) => pos,
            None => return,
        };
        let margin = self.size * config.edge_margin_factor;
        for axis in 0..2 {
            if pointer_pos[axis] < self.pos[axis] && self.pos[axis] < bounds[axis] - margin {
                self.pos[axis] += config.repulsion_step;
            }
            if pointer_pos[axis] > self.pos[axis] && self.pos[axis] > margin {
                self.pos[axis] -= config.repulsion_step;
            }
        }
    }
}
