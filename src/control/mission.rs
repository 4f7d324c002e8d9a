use serde::{Deserialize, Serialize};

use crate::constants::{EARTH_MASS, EARTH_RADIUS, GRAVITATIONAL_CONSTANT};

#[derive(Clone, Debug)]
pub struct CelestialBody {
    pub name: String,
    pub radius: f64,
    pub mass: f64,
}

impl CelestialBody {
    pub fn new(name: String, radius: f64, mass: f64) -> Self {
        CelestialBody { name, radius, mass }
    }

    pub fn earth() -> Self {
        CelestialBody::new("Earth".to_string(), EARTH_RADIUS, EARTH_MASS)
    }

    pub fn gravitational_parameter(&self) -> f64 {
        GRAVITATIONAL_CONSTANT * self.mass
    }

    pub fn surface_gravity(&self) -> f64 {
        self.gravitational_parameter() / self.radius.powi(2)
    }

    pub fn gravity_at_altitude(&self, altitude: f64) -> f64 {
        let distance = self.radius + altitude;
        self.gravitational_parameter() / distance.powi(2)
    }
}

// Windows are inclusive on both ends
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionPhase {
    pub name: String,
    pub start_time: f64,
    pub end_time: f64,
    pub description: String,
}

impl MissionPhase {
    pub fn new(name: &str, start_time: f64, end_time: f64, description: &str) -> Self {
        MissionPhase {
            name: name.to_string(),
            start_time,
            end_time,
            description: description.to_string(),
        }
    }

    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time <= self.end_time
    }
}

#[derive(Clone, Debug)]
pub struct MissionTimeline {
    phases: Vec<MissionPhase>,
}

impl MissionTimeline {
    pub fn new(phases: Vec<MissionPhase>) -> Self {
        MissionTimeline { phases }
    }

    pub fn phases(&self) -> &[MissionPhase] {
        &self.phases
    }

    // Falls back to the first entry
    pub fn phase_at(&self, time: f64) -> Option<&MissionPhase> {
        self.phases
            .iter()
            .find(|phase| phase.contains(time))
            .or_else(|| self.phases.first())
    }
}

impl Default for MissionTimeline {
    fn default() -> Self {
        MissionTimeline::new(vec![
            MissionPhase::new("Pre-Launch", 0.0, 1.0, "Final countdown and engine ignition"),
            MissionPhase::new("Liftoff", 1.0, 60.0, "Vertical ascent and pitch program"),
            MissionPhase::new("Max-Q", 60.0, 162.0, "Maximum aerodynamic pressure"),
            MissionPhase::new("MECO", 162.0, 164.0, "Main engine cutoff"),
            MissionPhase::new("Stage Separation", 164.0, 167.0, "First stage jettison"),
            MissionPhase::new(
                "Second Stage Ignition",
                167.0,
                200.0,
                "Upper stage engine start",
            ),
            MissionPhase::new("Fairing Separation", 200.0, 210.0, "Payload fairing jettison"),
            MissionPhase::new("Second Stage Burn", 210.0, 564.0, "Orbit insertion burn"),
            MissionPhase::new("SECO-1", 564.0, 570.0, "Second engine cutoff"),
            MissionPhase::new("Coast Phase", 570.0, 580.0, "Unpowered coast to deployment"),
            MissionPhase::new("Payload Deployment", 580.0, 600.0, "Payload release"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_earth_gravity() {
        let earth = CelestialBody::earth();

        assert_eq!(earth.name, "Earth");
        assert_abs_diff_eq!(earth.surface_gravity(), 9.82, epsilon = 1e-2);

        let gravity_at_200km = earth.gravity_at_altitude(200_000.0);
        assert_abs_diff_eq!(gravity_at_200km, 9.23, epsilon = 1e-2);

        let expected_ratio = (earth.radius / (earth.radius + 100_000.0)).powi(2);
        let actual_ratio = earth.gravity_at_altitude(100_000.0) / earth.surface_gravity();
        assert_abs_diff_eq!(actual_ratio, expected_ratio, epsilon = 1e-9);
    }

    #[test]
    fn test_phase_lookup() {
        let timeline = MissionTimeline::default();

        assert_eq!(timeline.phase_at(0.0).map(|p| p.name.as_str()), Some("Pre-Launch"));
        assert_eq!(timeline.phase_at(30.0).map(|p| p.name.as_str()), Some("Liftoff"));
        assert_eq!(timeline.phase_at(100.0).map(|p| p.name.as_str()), Some("Max-Q"));
        assert_eq!(timeline.phase_at(165.0).map(|p| p.name.as_str()), Some("Stage Separation"));
        assert_eq!(timeline.phase_at(590.0).map(|p| p.name.as_str()), Some("Payload Deployment"));
    }

    #[test]
    fn test_first_matching_window_wins() {
        // 60.0 is the end of Liftoff and the start of Max-Q
        let timeline = MissionTimeline::default();
        assert_eq!(timeline.phase_at(60.0).map(|p| p.name.as_str()), Some("Liftoff"));
    }

    #[test]
    fn test_fallback_to_first_phase() {
        let timeline = MissionTimeline::new(vec![
            MissionPhase::new("Hold", 0.0, 10.0, ""),
            MissionPhase::new("Burn", 20.0, 30.0, ""),
        ]);

        // Gap between windows
        assert_eq!(timeline.phase_at(15.0).map(|p| p.name.as_str()), Some("Hold"));
        // Past the end of the table
        assert_eq!(timeline.phase_at(1_000.0).map(|p| p.name.as_str()), Some("Hold"));

        assert!(MissionTimeline::new(Vec::new()).phase_at(0.0).is_none());
    }
}
