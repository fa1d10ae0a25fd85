//! Dashboard facade: bootstrap of every section and the user actions.
//!
//! Failures never escape from here. They are written to the error panel,
//! the failed section is left out of the page, and any follow-up refresh of
//! a failed action is skipped.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use ofp_domain::error::OfpError;
use ofp_domain::id::{HardwareId, PlanningId, SlotId};

use crate::error_panel::ErrorPanel;
use crate::ports::ControllerApi;
use crate::refresh::ZoneRefresher;
use crate::views::Outcome;
use crate::views::accounts::{AccountsController, AccountsView};
use crate::views::firmware::{FirmwareController, Upload};
use crate::views::hardware::{HardwareController, HardwareView};
use crate::views::planning_slots::{PlanningSlotsController, PlanningSlotsView, SlotInput};
use crate::views::plannings::{PlanningListController, PlanningListView};
use crate::views::status::{StatusController, StatusView};
use crate::views::zone_configuration::{ZoneConfigurationController, ZoneConfigurationView};
use crate::views::zone_override::{ZoneOverrideController, ZoneOverrideView};

/// Selection carried by the page URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub planning: Option<PlanningId>,
    pub hardware: Option<HardwareId>,
}

/// Everything the main page shows. A section is `None` when it failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardPage {
    pub status: Option<StatusView>,
    pub zone_override: Option<ZoneOverrideView>,
    pub zones: Option<ZoneConfigurationView>,
    pub plannings: Option<PlanningListView>,
    pub slots: Option<PlanningSlotsView>,
    pub accounts: Option<AccountsView>,
    pub hardware: Option<HardwareView>,
    /// Administrator present: account creation, firmware, certificate and
    /// hardware sections are shown.
    pub admin: bool,
    pub errors: Vec<String>,
}

/// The zone section on its own, served to the auto-refreshing frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSection {
    pub zones: Option<ZoneConfigurationView>,
    pub errors: Vec<String>,
}

pub struct Dashboard<A> {
    status: StatusController<A>,
    zone_override: ZoneOverrideController<A>,
    zones: ZoneConfigurationController<A>,
    plannings: PlanningListController<A>,
    slots: PlanningSlotsController<A>,
    accounts: AccountsController<A>,
    firmware: FirmwareController<A>,
    hardware: HardwareController<A>,
    panel: Arc<ErrorPanel>,
    refresher: Arc<ZoneRefresher<A>>,
}

impl<A: ControllerApi + Clone> Dashboard<A> {
    pub fn new(api: A, panel: Arc<ErrorPanel>) -> Self {
        let refresher = Arc::new(ZoneRefresher::new(
            ZoneConfigurationController::new(api.clone()),
            Arc::clone(&panel),
        ));
        Self {
            status: StatusController::new(api.clone()),
            zone_override: ZoneOverrideController::new(api.clone()),
            zones: ZoneConfigurationController::new(api.clone()),
            plannings: PlanningListController::new(api.clone()),
            slots: PlanningSlotsController::new(api.clone()),
            accounts: AccountsController::new(api.clone()),
            firmware: FirmwareController::new(api.clone()),
            hardware: HardwareController::new(api),
            panel,
            refresher,
        }
    }
}

impl<A: ControllerApi> Dashboard<A> {
    #[must_use]
    pub fn panel(&self) -> &Arc<ErrorPanel> {
        &self.panel
    }

    #[must_use]
    pub fn refresher(&self) -> &Arc<ZoneRefresher<A>> {
        &self.refresher
    }

    fn settle<T>(&self, result: Result<T, OfpError>) -> Option<T> {
        result.map_err(|err| self.panel.log(&err)).ok()
    }

    /// Load every section concurrently. Never fails: a failing section is
    /// logged to the panel and left out.
    pub async fn bootstrap(&self, selection: Selection) -> DashboardPage {
        let plannings = async {
            let list = self.plannings.load(selection.planning).await;
            let slots = match list.as_ref().ok().and_then(|list| list.selected) {
                Some(id) => Some(self.slots.load(id).await),
                None => None,
            };
            (list, slots)
        };

        let (status, zone_override, zones, (plannings, slots), accounts, hardware) = tokio::join!(
            self.status.load(),
            self.zone_override.load(),
            self.zones.load(),
            plannings,
            self.accounts.load(),
            self.hardware.load(selection.hardware.clone()),
        );

        let zones = self.settle(zones);
        if let Some(view) = &zones {
            self.refresher.publish(view.clone());
        }
        let accounts = self.settle(accounts);
        let admin = accounts.as_ref().is_some_and(|view| view.admin);

        DashboardPage {
            status: self.settle(status),
            zone_override: self.settle(zone_override),
            zones,
            plannings: self.settle(plannings),
            slots: slots.and_then(|slots| self.settle(slots)),
            accounts,
            hardware: self.settle(hardware),
            admin,
            errors: self.panel.drain(),
        }
    }

    /// Latest zone snapshot, fetched first if the refresher has none yet.
    pub async fn zone_section(&self) -> ZoneSection {
        if self.refresher.latest().is_none() {
            self.refresher.refresh_now().await;
        }
        ZoneSection {
            zones: self.refresher.latest(),
            errors: self.panel.drain(),
        }
    }

    /// Arm the periodic zone refresh.
    pub fn spawn_refresh(&self, period: Duration) -> JoinHandle<()>
    where
        A: 'static,
    {
        Arc::clone(&self.refresher).spawn(period)
    }

    async fn finish(&self, result: Result<Outcome, OfpError>, refresh_zones: bool) -> Outcome {
        match result {
            Ok(Outcome::Applied) => {
                if refresh_zones {
                    self.refresher.refresh_now().await;
                }
                Outcome::Applied
            }
            Ok(outcome) => outcome,
            Err(err) => {
                self.panel.log(&err);
                Outcome::Failed
            }
        }
    }

    pub async fn change_override(&self, value: &str) -> Outcome {
        let result = self.zone_override.change(value).await;
        self.finish(result, true).await
    }

    pub async fn rename_zone(&self, zone: &str, description: &str) -> Outcome {
        let result = self.zones.rename(zone, description).await;
        self.finish(result, true).await
    }

    pub async fn change_zone_mode(&self, zone: &str, mode: &str) -> Outcome {
        let result = self.zones.change_mode(zone, mode).await;
        self.finish(result, true).await
    }

    pub async fn create_planning(&self, name: &str) -> Outcome {
        let result = self.plannings.create(name).await;
        self.finish(result, true).await
    }

    /// Zones show planning names, so the zone section is refreshed too.
    pub async fn rename_planning(&self, id: PlanningId, name: &str) -> Outcome {
        let result = self.plannings.rename(id, name).await;
        self.finish(result, true).await
    }

    /// Zones may have referenced the planning, so the zone section is refreshed too.
    pub async fn delete_planning(&self, id: PlanningId) -> Outcome {
        let result = self.plannings.delete(id).await;
        self.finish(result, true).await
    }

    pub async fn add_slot(&self, planning: PlanningId, input: &SlotInput) -> Outcome {
        let result = self.slots.add(planning, input).await;
        self.finish(result, true).await
    }

    pub async fn edit_slot(
        &self,
        planning: PlanningId,
        slot: SlotId,
        original: &SlotInput,
        edited: &SlotInput,
    ) -> Outcome {
        let result = self.slots.edit(planning, slot, original, edited).await;
        self.finish(result, true).await
    }

    pub async fn delete_slot(&self, planning: PlanningId, slot: SlotId) -> Outcome {
        let result = self.slots.delete(planning, slot).await;
        self.finish(result, true).await
    }

    pub async fn create_account(&self, id: &str, password: &str) -> Outcome {
        let result = self.accounts.create(id, password).await;
        self.finish(result, false).await
    }

    pub async fn delete_account(&self, id: &str) -> Outcome {
        let result = self.accounts.delete(id).await;
        self.finish(result, false).await
    }

    pub async fn reset_password(&self, id: &str, password: &str) -> Outcome {
        let result = self.accounts.reset_password(id, password).await;
        self.finish(result, false).await
    }

    pub async fn upload_firmware(&self, upload: Upload) -> Outcome {
        let result = self.firmware.upload_firmware(upload).await;
        self.finish(result, false).await
    }

    pub async fn upload_certificate(&self, upload: Upload) -> Outcome {
        let result = self.firmware.upload_certificate(upload).await;
        self.finish(result, false).await
    }

    pub async fn apply_hardware(
        &self,
        hardware: &str,
        fields: &[(String, String)],
        confirmed: bool,
    ) -> Outcome {
        let result = self.hardware.apply(hardware, fields, confirmed).await;
        self.finish(result, false).await
    }

    /// Ask the controller to reboot. `None` when the request failed.
    pub async fn reboot(&self) -> Option<String> {
        let result = self.firmware.reboot().await;
        self.settle(result)
    }
}
