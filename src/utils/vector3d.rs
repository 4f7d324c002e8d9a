use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3D { x, y, z }
    }

    pub fn zero() -> Self {
        Vector3D::new(0.0, 0.0, 0.0)
    }

    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }

    // Horizontal component is sin(pitch) * vertical * scale
    pub fn from_vertical(vertical: f64, pitch: f64, scale: f64) -> Self {
        Vector3D::new(pitch.sin() * vertical * scale, vertical, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_magnitude() {
        let v = Vector3D::new(2.0, 3.0, 6.0);
        assert_abs_diff_eq!(v.magnitude(), 7.0, epsilon = 1e-12);
        assert_eq!(Vector3D::zero().magnitude(), 0.0);
    }

    #[test]
    fn test_from_vertical() {
        let pitch = 30.0_f64.to_radians();
        let v = Vector3D::from_vertical(1000.0, pitch, 0.1);
        assert_abs_diff_eq!(v.x, 50.0, epsilon = 1e-9);
        assert_eq!(v.y, 1000.0);
        assert_eq!(v.z, 0.0);

        // Vertical ascent has no horizontal component
        let straight_up = Vector3D::from_vertical(1000.0, 0.0, 0.1);
        assert_eq!(straight_up.x, 0.0);
    }
}
