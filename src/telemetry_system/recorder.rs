use super::telemetry::TelemetryData;

pub struct TelemetryRecorder {
    pub log: Vec<String>,
    max_velocity: f64,
    max_altitude: f64,
    min_fuel: f64,
    max_acceleration: f64,
    max_stress: f64,
    phase_times: Vec<(String, f64)>,
    samples: usize,
}

impl TelemetryRecorder {
    pub fn new() -> Self {
        TelemetryRecorder {
            log: Vec::new(),
            max_velocity: 0.0,
            max_altitude: 0.0,
            min_fuel: f64::MAX,
            max_acceleration: 0.0,
            max_stress: 0.0,
            phase_times: Vec::new(),
            samples: 0,
        }
    }

    pub fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 3600.0 {
            let hours = (elapsed_time / 3600.0).floor();
            let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
        } else if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    pub fn format_altitude(altitude: f64) -> String {
        if altitude.abs() >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    pub fn collect_data(&mut self, telemetry: &TelemetryData) {
        self.samples += 1;

        let altitude = telemetry.altitude();
        self.max_velocity = self.max_velocity.max(telemetry.velocity.total);
        self.max_altitude = self.max_altitude.max(altitude);
        self.max_acceleration = self.max_acceleration.max(telemetry.acceleration.total);
        self.max_stress = self.max_stress.max(telemetry.structural.stress);
        self.min_fuel = self.min_fuel.min(telemetry.engine.fuel);

        let data = format!(
            "Time: {} [{}]\n\
                 Altitude: {} (lat {:.4}°, lon {:.4}°)\n\
                 Velocity: {:.2} m/s\n\
                 Acceleration: {:.2} m/s²\n\
                 Stage: {}/{} | Engine: {:?} | Thrust: {:.2} N\n\
                 Fuel: {:.2} kg | Oxidizer: {:.2} kg\n\
                 Stress: {:.3} | Vibration: {:.3}\n\
                 Apogee: {} | Perigee: {}\n",
            Self::format_time(telemetry.timestamp),
            telemetry.mission_phase,
            Self::format_altitude(altitude),
            telemetry.position.lat,
            telemetry.position.lon,
            telemetry.velocity.total,
            telemetry.acceleration.total,
            telemetry.staging.current_stage,
            telemetry.staging.total_stages,
            telemetry.engine.status,
            telemetry.engine.thrust,
            telemetry.engine.fuel,
            telemetry.engine.oxidizer,
            telemetry.structural.stress,
            telemetry.structural.vibration,
            Self::format_altitude(telemetry.orbital_parameters.current_apogee),
            Self::format_altitude(telemetry.orbital_parameters.perigee),
        );
        self.log.push(data);

        // Track phase transitions
        let changed = self
            .phase_times
            .last()
            .map_or(true, |(phase, _)| *phase != telemetry.mission_phase);
        if changed {
            self.phase_times
                .push((telemetry.mission_phase.clone(), telemetry.timestamp));
        }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn max_altitude(&self) -> f64 {
        self.max_altitude
    }

    pub fn min_fuel(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.min_fuel
        }
    }

    pub fn phase_transitions(&self) -> &[(String, f64)] {
        &self.phase_times
    }

    pub fn summary(&self) -> String {
        let mut summary = String::from("--- Mission Summary ---\n");
        summary.push_str(&format!("Samples: {}\n", self.samples));
        summary.push_str(&format!("Max Velocity: {:.2} m/s\n", self.max_velocity));
        summary.push_str(&format!(
            "Max Altitude: {}\n",
            Self::format_altitude(self.max_altitude)
        ));
        summary.push_str(&format!("Min Fuel: {:.2} kg\n", self.min_fuel()));
        summary.push_str(&format!(
            "Max Acceleration: {:.2} m/s²\n",
            self.max_acceleration
        ));
        summary.push_str(&format!("Max Structural Stress: {:.3}\n", self.max_stress));

        summary.push_str("\n--- Phase Transitions ---\n");
        for (phase, time) in &self.phase_times {
            summary.push_str(&format!("{} reached at: {}\n", phase, Self::format_time(*time)));
        }
        summary
    }

    pub fn display_data(&self, verbose: bool) {
        if verbose {
            println!("--- Telemetry Data ---");
            for entry in &self.log {
                println!("{}", entry);
            }
            println!("--- End of Telemetry ---\n");
        }
        println!("{}", self.summary());
    }
}

impl Default for TelemetryRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(TelemetryRecorder::format_time(12.5), "12.50s");
        assert_eq!(TelemetryRecorder::format_time(162.0), "2m 42.00s");
        assert_eq!(TelemetryRecorder::format_time(3_725.0), "1h 2m 5.00s");
    }

    #[test]
    fn test_format_altitude() {
        assert_eq!(TelemetryRecorder::format_altitude(512.0), "512.00 m");
        assert_eq!(TelemetryRecorder::format_altitude(200_000.0), "200.00 km");
    }

    #[test]
    fn test_empty_recorder() {
        let recorder = TelemetryRecorder::new();
        assert_eq!(recorder.samples(), 0);
        assert_eq!(recorder.min_fuel(), 0.0);
        assert!(recorder.phase_transitions().is_empty());
        assert!(recorder.summary().contains("Samples: 0"));
    }
}
