//! Night Shift Rotation Model

use serde::{Deserialize, Serialize};

/// Which of the two workers takes the first off day of a rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkerSlot {
    #[default]
    First,
    Second,
}

/// Two-person night shift configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShiftConfig {
    pub first_worker: String,
    pub second_worker: String,
    /// Weekdays off (0 = Sunday .. 6 = Saturday)
    pub off_days: Vec<u8>,
    pub first_off: WorkerSlot,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            first_worker: "P1".to_string(),
            second_worker: "P2".to_string(),
            off_days: vec![0, 6],
            first_off: WorkerSlot::First,
        }
    }
}

impl ShiftConfig {
    pub fn worker(&self, slot: WorkerSlot) -> &str {
        match slot {
            WorkerSlot::First => &self.first_worker,
            WorkerSlot::Second => &self.second_worker,
        }
    }

    /// Whether a weekday (0 = Sunday) is an off day
    pub fn is_off_day(&self, weekday: u8) -> bool {
        self.off_days.contains(&weekday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weekend_off() {
        let config = ShiftConfig::default();
        assert!(config.is_off_day(0));
        assert!(config.is_off_day(6));
        assert!(!config.is_off_day(3));
        assert_eq!(config.worker(WorkerSlot::Second), "P2");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ShiftConfig =
            serde_json::from_str(r#"{"firstWorker":"Ana","firstOff":"second"}"#).unwrap();
        assert_eq!(config.first_worker, "Ana");
        assert_eq!(config.second_worker, "P2");
        assert_eq!(config.first_off, WorkerSlot::Second);
    }
}
