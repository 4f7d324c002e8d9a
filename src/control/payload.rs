use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayloadStatus {
    Secured,
    Deployed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadData {
    pub status: PayloadStatus,
    pub ready_for_deployment: bool,
}

#[derive(Debug, Clone)]
pub struct Payload {
    pub mass: f64,            // kg
    pub deployment_time: f64, // s
}

impl Payload {
    pub fn new(mass: f64, deployment_time: f64) -> Self {
        Payload {
            mass,
            deployment_time,
        }
    }

    pub fn get_mass(&self) -> f64 {
        self.mass
    }

    pub fn is_deployed(&self, time: f64, deployed_by_command: bool) -> bool {
        deployed_by_command || time >= self.deployment_time
    }

    pub fn data(&self, time: f64, deployed_by_command: bool) -> PayloadData {
        let status = if self.is_deployed(time, deployed_by_command) {
            PayloadStatus::Deployed
        } else {
            PayloadStatus::Secured
        };

        PayloadData {
            status,
            ready_for_deployment: !deployed_by_command
                && time >= self.deployment_time
                && time < self.deployment_time + 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduled_deployment() {
        let payload = Payload::new(15_000.0, 580.0);

        let before = payload.data(500.0, false);
        assert_eq!(before.status, PayloadStatus::Secured);
        assert!(!before.ready_for_deployment);

        let window = payload.data(580.5, false);
        assert_eq!(window.status, PayloadStatus::Deployed);
        assert!(window.ready_for_deployment);

        let after = payload.data(582.0, false);
        assert_eq!(after.status, PayloadStatus::Deployed);
        assert!(!after.ready_for_deployment);
    }

    #[test]
    fn test_commanded_deployment() {
        let payload = Payload::new(15_000.0, 580.0);
        let data = payload.data(100.0, true);

        assert_eq!(data.status, PayloadStatus::Deployed);
        assert!(!data.ready_for_deployment);
        assert_eq!(payload.get_mass(), 15_000.0);
    }
}
