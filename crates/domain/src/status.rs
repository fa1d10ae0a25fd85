//! System status report and the formatting helpers used to display it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ConnectedUser>,
    pub uptime: Uptime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware: Option<RunningFirmware>,
}

/// Account the status was requested with, as seen by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedUser {
    pub id: String,
    pub source_ip: String,
}

/// Uptime counters, all in seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uptime {
    pub system: u64,
    pub wifi: WifiStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiStats {
    pub current_uptime: u64,
    pub cumulated_uptime: u64,
    pub successes: u64,
    pub attempts: u64,
    pub disconnects: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningFirmware {
    pub running_partition: String,
    pub running_partition_size: u64,
    pub running_app_name: String,
    pub running_app_version: String,
    pub running_app_compiled_date: String,
    pub running_app_compiled_time: String,
    pub running_app_idf_version: String,
}

/// Human readable duration, e.g. `1j 1h 0m 0s`.
///
/// Leading zero units are dropped, seconds are always shown.
#[must_use]
pub fn seconds_to_duration(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = seconds % 86_400 / 3_600;
    let minutes = seconds % 3_600 / 60;
    let seconds = seconds % 60;

    let mut parts = Vec::with_capacity(4);
    if days > 0 {
        parts.push(format!("{days}j"));
    }
    if days > 0 || hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if days > 0 || hours > 0 || minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    parts.push(format!("{seconds}s"));
    parts.join(" ")
}

/// Floored percentage of `part` over `whole`, 0 when `whole` is 0.
#[must_use]
pub fn percent(part: u64, whole: u64) -> u64 {
    if whole == 0 {
        return 0;
    }
    part.saturating_mul(100) / whole
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_day_and_hour() {
        assert_eq!(seconds_to_duration(90_000), "1j 1h 0m 0s");
    }

    #[test]
    fn should_drop_leading_zero_units() {
        assert_eq!(seconds_to_duration(0), "0s");
        assert_eq!(seconds_to_duration(59), "59s");
        assert_eq!(seconds_to_duration(61), "1m 1s");
        assert_eq!(seconds_to_duration(3_600), "1h 0m 0s");
        assert_eq!(seconds_to_duration(43_210), "12h 0m 10s");
    }

    #[test]
    fn should_floor_percentages() {
        assert_eq!(percent(2, 3), 66);
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(5, 0), 0);
    }

    #[test]
    fn should_read_status_without_user_and_firmware() {
        let status: Status = serde_json::from_str(
            r#"{"uptime":{"system":43210,"wifi":{"current_uptime":3679,"cumulated_uptime":40000,"successes":3,"attempts":4,"disconnects":2}}}"#,
        )
        .unwrap();
        assert_eq!(status.uptime.system, 43_210);
        assert_eq!(status.uptime.wifi.disconnects, 2);
        assert!(status.user.is_none());
        assert!(status.firmware.is_none());
    }
}
