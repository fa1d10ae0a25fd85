//! System status section.

use ofp_domain::error::OfpError;
use ofp_domain::status::{Status, percent, seconds_to_duration};

use crate::ports::ControllerApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub lines: Vec<String>,
}

impl StatusView {
    #[must_use]
    pub fn render(status: &Status) -> Self {
        let uptime = &status.uptime;
        let wifi = &uptime.wifi;
        let mut lines = vec![
            format!(
                "Système démarré depuis {}",
                seconds_to_duration(uptime.system)
            ),
            format!(
                "Connecté au Wifi depuis {} ({}%)",
                seconds_to_duration(wifi.current_uptime),
                percent(wifi.cumulated_uptime, uptime.system)
            ),
            format!(
                "{} connexions réussies pour {} tentatives ({}%)",
                wifi.successes,
                wifi.attempts,
                percent(wifi.successes, wifi.attempts)
            ),
            format!(
                "{} déconnexions détectées depuis le dernier démarrage",
                wifi.disconnects
            ),
        ];

        if let Some(firmware) = &status.firmware {
            lines.push(format!(
                "Le système a démarré sur la partition \"{}\" dont la taille maximale est de {} octets",
                firmware.running_partition, firmware.running_partition_size
            ));
            lines.push(format!(
                "Microgiciel actif est \"{}\" en version {}",
                firmware.running_app_name, firmware.running_app_version
            ));
            lines.push(format!(
                "Microgiciel généré le {} {} à l'aide du framework ESP-IDF {}",
                firmware.running_app_compiled_date,
                firmware.running_app_compiled_time,
                firmware.running_app_idf_version
            ));
        }

        if let Some(user) = &status.user {
            lines.push(format!(
                "L'utilisateur \"{}\" est connecté, et son IP apparente est {}",
                user.id, user.source_ip
            ));
        }

        Self { lines }
    }
}

#[derive(Clone)]
pub struct StatusController<A> {
    api: A,
}

impl<A: ControllerApi> StatusController<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Propagates the controller error when the status cannot be fetched.
    pub async fn load(&self) -> Result<StatusView, OfpError> {
        let status = self.api.get_status().await?;
        Ok(StatusView::render(&status))
    }
}

#[cfg(test)]
mod tests {
    use ofp_domain::status::RunningFirmware;

    use super::*;
    use crate::testing::StubController;

    #[tokio::test]
    async fn should_render_uptime_lines() {
        let controller = StatusController::new(StubController::default());
        let view = controller.load().await.unwrap();
        assert_eq!(view.lines[0], "Système démarré depuis 1j 1h 0m 0s");
        assert_eq!(view.lines[1], "Connecté au Wifi depuis 1h 1m 19s (50%)");
        assert_eq!(view.lines[2], "3 connexions réussies pour 4 tentatives (75%)");
        assert_eq!(
            view.lines[3],
            "2 déconnexions détectées depuis le dernier démarrage"
        );
        assert_eq!(
            view.lines.last().unwrap(),
            "L'utilisateur \"admin\" est connecté, et son IP apparente est 192.168.1.20"
        );
    }

    #[test]
    fn should_include_firmware_lines_when_reported() {
        let status = Status {
            firmware: Some(RunningFirmware {
                running_partition: "ota_0".to_string(),
                running_partition_size: 1_572_864,
                running_app_name: "ofp".to_string(),
                running_app_version: "1.0.0".to_string(),
                running_app_compiled_date: "Jan 10 2022".to_string(),
                running_app_compiled_time: "21:12:00".to_string(),
                running_app_idf_version: "v4.4.1".to_string(),
            }),
            ..Status::default()
        };
        let view = StatusView::render(&status);
        assert_eq!(view.lines.len(), 7);
        assert_eq!(
            view.lines[5],
            "Microgiciel actif est \"ofp\" en version 1.0.0"
        );
        assert_eq!(view.lines[2], "0 connexions réussies pour 0 tentatives (0%)");
    }

    #[tokio::test]
    async fn should_propagate_fetch_failure() {
        let stub = StubController::default();
        stub.fail("get_status");
        let controller = StatusController::new(stub);
        assert!(controller.load().await.is_err());
    }
}
