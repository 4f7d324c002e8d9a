#[derive(Debug, Clone)]
pub struct Aerodynamics {
    pub drag_coefficient: f64,
    pub surface_area: f64,
}

impl Aerodynamics {
    pub fn new(drag_coefficient: f64, surface_area: f64) -> Self {
        Aerodynamics {
            drag_coefficient,
            surface_area,
        }
    }

    // q = ½ρv²
    pub fn calculate_dynamic_pressure(speed: f64, air_density: f64) -> f64 {
        0.5 * air_density * speed.powi(2)
    }

    pub fn calculate_drag(&self, speed: f64, air_density: f64) -> f64 {
        Self::calculate_dynamic_pressure(speed, air_density)
            * self.drag_coefficient
            * self.surface_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dynamic_pressure() {
        assert_relative_eq!(
            Aerodynamics::calculate_dynamic_pressure(100.0, 1.225),
            6125.0,
            epsilon = 1e-9
        );
        assert_eq!(Aerodynamics::calculate_dynamic_pressure(0.0, 1.225), 0.0);
    }

    #[test]
    fn test_drag_scales_with_speed_squared() {
        let aerodynamics = Aerodynamics::new(0.3, 10.0);
        let slow = aerodynamics.calculate_drag(100.0, 1.225);
        let fast = aerodynamics.calculate_drag(200.0, 1.225);

        assert_relative_eq!(slow, 6125.0 * 0.3 * 10.0, epsilon = 1e-9);
        assert_relative_eq!(fast / slow, 4.0, epsilon = 1e-12);
        // Sign of the velocity does not matter
        assert_relative_eq!(aerodynamics.calculate_drag(-100.0, 1.225), slow, epsilon = 1e-12);
    }

    #[test]
    fn test_no_drag_in_vacuum() {
        let aerodynamics = Aerodynamics::new(0.3, 10.0);
        assert_eq!(aerodynamics.calculate_drag(7_000.0, 0.0), 0.0);
    }
}
