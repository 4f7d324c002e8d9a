use crate::{
    constants::{
        EARTH_ROTATION_RATE, HORIZONTAL_SCALE, PITCH_END_TIME, PITCH_FINAL_DEGREES,
        PITCH_START_TIME,
    },
    control::{environment::calculate_atmosphere, mission::CelestialBody},
    utils::vector3d::Vector3D,
};

use super::aerodynamics::Aerodynamics;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalSolution {
    pub acceleration: f64,
    pub velocity: f64,
    pub altitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightState {
    pub position: Vector3D,
    pub velocity: Vector3D,
    pub acceleration: Vector3D,
    pub pitch: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl FlightState {
    pub fn altitude(&self) -> f64 {
        self.position.y
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }
}

#[derive(Debug, Clone)]
pub struct Kinematics {
    pub body: CelestialBody,
    pub aerodynamics: Aerodynamics,
    pub launch_latitude: f64,
    pub launch_longitude: f64,
}

impl Kinematics {
    pub fn new(
        body: CelestialBody,
        aerodynamics: Aerodynamics,
        launch_latitude: f64,
        launch_longitude: f64,
    ) -> Self {
        Kinematics {
            body,
            aerodynamics,
            launch_latitude,
            launch_longitude,
        }
    }

    // Vertical for 10 s, then a linear turn to 30° by t = 60 s
    pub fn pitch_program(time: f64) -> f64 {
        let final_pitch = PITCH_FINAL_DEGREES.to_radians();
        if time < PITCH_START_TIME {
            0.0
        } else if time < PITCH_END_TIME {
            final_pitch * (time - PITCH_START_TIME) / (PITCH_END_TIME - PITCH_START_TIME)
        } else {
            final_pitch
        }
    }

    // thrust/m - g(h) - drag/m
    pub fn vertical_acceleration(&self, thrust: f64, mass: f64, altitude: f64, speed: f64) -> f64 {
        let density = calculate_atmosphere(altitude).density;
        let drag = self.aerodynamics.calculate_drag(speed, density);
        thrust / mass - self.body.gravity_at_altitude(altitude) - drag / mass
    }

    // Constant acceleration since liftoff: v = a·t, h = ½·a·t²
    pub fn solve_vertical(&self, time: f64, thrust: f64, mass: f64, aborted: bool) -> VerticalSolution {
        let surface_gravity = self.body.surface_gravity();
        let estimate = if aborted {
            -surface_gravity
        } else {
            thrust / mass - surface_gravity
        };
        let estimated_altitude = 0.5 * estimate * time.powi(2);
        let estimated_speed = estimate * time;

        let acceleration = if aborted {
            -self.body.gravity_at_altitude(estimated_altitude)
        } else {
            self.vertical_acceleration(thrust, mass, estimated_altitude, estimated_speed)
        };

        VerticalSolution {
            acceleration,
            velocity: acceleration * time,
            altitude: 0.5 * acceleration * time.powi(2),
        }
    }

    pub fn geographic_position(&self, time: f64, altitude: f64, downrange: f64) -> (f64, f64) {
        let latitude = self.launch_latitude + (altitude / self.body.radius).to_degrees();
        let longitude = self.launch_longitude
            + (EARTH_ROTATION_RATE * time).to_degrees()
            + (downrange / self.body.radius).to_degrees();
        (latitude, longitude)
    }

    pub fn flight_state(
        &self,
        time: f64,
        thrust: f64,
        mass: f64,
        pitch_offset: f64,
        aborted: bool,
    ) -> FlightState {
        let vertical = self.solve_vertical(time, thrust, mass, aborted);
        let pitch = Self::pitch_program(time) + pitch_offset;

        let position = Vector3D::from_vertical(vertical.altitude, pitch, HORIZONTAL_SCALE);
        let velocity = Vector3D::from_vertical(vertical.velocity, pitch, HORIZONTAL_SCALE);
        let acceleration = Vector3D::from_vertical(vertical.acceleration, pitch, HORIZONTAL_SCALE);
        let (latitude, longitude) = self.geographic_position(time, position.y, position.x);

        FlightState {
            position,
            velocity,
            acceleration,
            pitch,
            latitude,
            longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{LAUNCH_LATITUDE, LAUNCH_LONGITUDE};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn create_kinematics() -> Kinematics {
        Kinematics::new(
            CelestialBody::earth(),
            Aerodynamics::new(0.3, 10.52),
            LAUNCH_LATITUDE,
            LAUNCH_LONGITUDE,
        )
    }

    #[test]
    fn test_pitch_program() {
        assert_eq!(Kinematics::pitch_program(0.0), 0.0);
        assert_eq!(Kinematics::pitch_program(9.99), 0.0);
        assert_relative_eq!(
            Kinematics::pitch_program(35.0),
            15.0_f64.to_radians(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            Kinematics::pitch_program(60.0),
            30.0_f64.to_radians(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            Kinematics::pitch_program(400.0),
            30.0_f64.to_radians(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_constant_acceleration_kinematics() {
        let kinematics = create_kinematics();
        let solution = kinematics.solve_vertical(20.0, 7_000_000.0, 500_000.0, false);

        assert!(solution.acceleration > 0.0);
        assert_relative_eq!(solution.velocity, solution.acceleration * 20.0, epsilon = 1e-9);
        assert_relative_eq!(
            solution.altitude,
            0.5 * solution.acceleration * 400.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_drag_reduces_acceleration() {
        let kinematics = create_kinematics();
        let in_vacuum = 7_000_000.0 / 500_000.0 - kinematics.body.gravity_at_altitude(0.0);
        let with_drag = kinematics.vertical_acceleration(7_000_000.0, 500_000.0, 0.0, 300.0);
        assert!(with_drag < in_vacuum);
    }

    #[test]
    fn test_liftoff_state() {
        let kinematics = create_kinematics();
        let state = kinematics.flight_state(0.0, 7_000_000.0, 500_000.0, 0.0, false);

        assert_eq!(state.position, Vector3D::zero());
        assert_eq!(state.velocity, Vector3D::zero());
        assert_abs_diff_eq!(state.latitude, LAUNCH_LATITUDE, epsilon = 1e-12);
        assert_abs_diff_eq!(state.longitude, LAUNCH_LONGITUDE, epsilon = 1e-12);
    }

    #[test]
    fn test_horizontal_bend_follows_pitch() {
        let kinematics = create_kinematics();
        let vertical_phase = kinematics.flight_state(5.0, 7_000_000.0, 500_000.0, 0.0, false);
        assert_eq!(vertical_phase.position.x, 0.0);

        let turned = kinematics.flight_state(100.0, 7_000_000.0, 300_000.0, 0.0, false);
        assert_relative_eq!(
            turned.position.x,
            0.5 * turned.position.y * 0.1,
            epsilon = 1e-6,
            max_relative = 1e-9
        );
        assert_relative_eq!(turned.velocity.x, 0.5 * turned.velocity.y * 0.1, max_relative = 1e-9);
    }

    #[test]
    fn test_aborted_vehicle_falls() {
        let kinematics = create_kinematics();
        let solution = kinematics.solve_vertical(10.0, 7_000_000.0, 500_000.0, true);
        let expected = -kinematics
            .body
            .gravity_at_altitude(-0.5 * kinematics.body.surface_gravity() * 100.0);

        assert_relative_eq!(solution.acceleration, expected, epsilon = 1e-12);
        assert!(solution.velocity < 0.0);
    }

    #[test]
    fn test_earth_rotation_moves_longitude() {
        let kinematics = create_kinematics();
        let (_, longitude) = kinematics.geographic_position(3_600.0, 0.0, 0.0);
        // ~15 degrees per hour
        assert_abs_diff_eq!(longitude - LAUNCH_LONGITUDE, 15.04, epsilon = 0.01);
    }
}
