// Tunables for the particle field. Every field has a default, so a host can
// pass `{}` or only the keys it wants to change, e.g.
// `{"max_particles": 200, "particle_color": "#38bdf8"}`

use crate::color::Color;
use crate::error::{Error, Result};
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Canvas area (px²) per particle when populating the field.
    pub density: f64,
    /// Per-axis velocity bound of ambient particles.
    pub normal_speed: f64,
    /// Per-axis velocity bound of click-burst particles.
    pub explosion_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub particle_color: Color,
    /// Range within which the pointer pushes particles away.
    pub pointer_radius: f64,
    pub repulsion_step: f64,
    /// Repulsion stops this many particle radii away from the canvas edge.
    pub edge_margin_factor: f64,
    pub burst_size: usize,
    pub max_particles: usize,
    /// Particles link when their squared distance is below
    /// `(width / link_divisor) * (height / link_divisor)`.
    pub link_divisor: f64,
    /// Squared distance at which a particle link has faded out completely.
    pub fade_distance_sq: f64,
    pub pointer_link_distance_sq: f64,
    pub pointer_link_opacity: f64,
    pub line_width: f64,
    /// Fixed seed for the random source, entropy when absent.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            density: 12000.0,
            normal_speed: 0.2,
            explosion_speed: 1.0,
            min_radius: 1.0,
            max_radius: 3.0,
            particle_color: Color::ACCENT,
            pointer_radius: 150.0,
            repulsion_step: 2.0,
            edge_margin_factor: 10.0,
            burst_size: 8,
            max_particles: 150,
            link_divisor: 7.0,
            fade_distance_sq: 20000.0,
            pointer_link_distance_sq: 20000.0,
            pointer_link_opacity: 0.4,
            line_width: 1.0,
            seed: None,
        }
    }
}

impl FieldConfig {
    pub fn from_json(json: &str) -> Result<FieldConfig> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )))
            }
        };
        let non_negative = |name: &str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!(
                    "{} must not be negative, got {}",
                    name, value
                )))
            }
        };

        positive("density", self.density)?;
        positive("min_radius", self.min_radius)?;
        positive("link_divisor", self.link_divisor)?;
        positive("fade_distance_sq", self.fade_distance_sq)?;
        positive("line_width", self.line_width)?;
        non_negative("normal_speed", self.normal_speed)?;
        non_negative("explosion_speed", self.explosion_speed)?;
        non_negative("pointer_radius", self.pointer_radius)?;
        non_negative("repulsion_step", self.repulsion_step)?;
        positive("edge_margin_factor", self.edge_margin_factor)?;
        non_negative("pointer_link_distance_sq", self.pointer_link_distance_sq)?;

        if !(self.max_radius.is_finite() && self.max_radius >= self.min_radius) {
            return Err(Error::InvalidConfig(format!(
                "max_radius {} is below min_radius {}",
                self.max_radius, self.min_radius
            )));
        }
        // trimming one burst must never reach into the burst just added
        if self.burst_size > self.max_particles {
            return Err(Error::InvalidConfig(format!(
                "burst_size {} exceeds max_particles {}",
                self.burst_size, self.max_particles
            )));
        }
        if !(0.0..=1.0).contains(&self.pointer_link_opacity) {
            return Err(Error::InvalidConfig(format!(
                "pointer_link_opacity must be within [0, 1], got {}",
                self.pointer_link_opacity
            )));
        }
        Ok(())
    }
}
