// Pointer tracker, keeps the last known mouse position (absent once the
// mouse leaves the window) and the radius it pushes particles within

use vecmath::{vec2_len, vec2_square_len, vec2_sub};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pointer {
    pub pos: Option<[f64; 2]>,
    pub radius: f64,
}

impl Pointer {
    pub fn new(radius: f64) -> Self {
        Pointer { pos: None, radius }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.pos = Some([x, y]);
    }

    pub fn leave(&mut self) {
        self.pos = None;
    }

    pub fn distance_to(&self, point: [f64; 2]) -> Option<f64> {
        self.pos.map(|pos| vec2_len(vec2_sub(pos, point)))
    }

    pub fn square_distance_to(&self, point: [f64; 2]) -> Option<f64> {
        self.pos.map(|pos| vec2_square_len(vec2_sub(pos, point)))
    }

    // Used for checking if a particle of the given size is close enough to be pushed
    pub fn reaches(&self, point: [f64; 2], size: f64) -> bool {
        match self.distance_to(point) {
            Some(distance) => distance < self.radius + size,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_pointer_reaches_nothing() {
        let mut pointer = Pointer::new(150.0);
        assert!(!pointer.reaches([0.0, 0.0], 3.0));
        pointer.move_to(10.0, 10.0);
        assert!(pointer.reaches([0.0, 0.0], 3.0));
        pointer.leave();
        assert_eq!(pointer.pos, None);
        assert_eq!(pointer.distance_to([0.0, 0.0]), None);
    }

    #[test]
    fn reach_includes_particle_size() {
        let mut pointer = Pointer::new(150.0);
        pointer.move_to(0.0, 0.0);
        assert!(!pointer.reaches([152.0, 0.0], 1.0));
        assert!(pointer.reaches([152.0, 0.0], 3.0));
        assert_eq!(pointer.square_distance_to([3.0, 4.0]), Some(25.0));
    }
}
