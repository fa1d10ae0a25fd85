//! Stub controller shared by the unit tests of this crate.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::Notify;

use ofp_domain::account::{Account, AccountType, NewAccount, PasswordReset};
use ofp_domain::error::{HttpError, HttpMethod, NotFoundError, OfpError};
use ofp_domain::hardware::{
    HardwareList, HardwareParameter, HardwareSettings, HardwareType, ParameterKind, ParameterValue,
};
use ofp_domain::id::{AccountId, HardwareId, OrderId, PlanningId, SlotId, ZoneId};
use ofp_domain::order::{Order, canonical_orders};
use ofp_domain::override_order::Override;
use ofp_domain::planning::{DayOfWeek, NewSlot, Planning, PlanningName, Slot, SlotPatch};
use ofp_domain::status::{ConnectedUser, Status, Uptime, WifiStats};
use ofp_domain::zone::{Zone, ZoneMode, ZonePatch};

use crate::ports::ControllerApi;

pub(crate) struct StubState {
    pub status: Status,
    pub orders: Vec<Order>,
    pub override_value: Override,
    pub zones: Vec<Zone>,
    pub plannings: Vec<Planning>,
    pub slots: HashMap<PlanningId, Vec<Slot>>,
    pub accounts: Vec<Account>,
    pub hardware: HardwareList,
    pub parameters: HashMap<HardwareId, Vec<HardwareParameter>>,
    /// Operations answering HTTP 500.
    pub failing: HashSet<&'static str>,
    /// Every operation called, in order.
    pub calls: Vec<&'static str>,
    pub last_slot_patch: Option<SlotPatch>,
    pub last_hardware: Option<HardwareSettings>,
    /// When set, `get_zones` waits for a notification before answering.
    pub zones_gate: Option<Arc<Notify>>,
}

pub(crate) struct StubController {
    state: Mutex<StubState>,
}

fn zone(id: &str, description: &str, mode: &str, current: &str) -> Zone {
    Zone {
        id: ZoneId::new(id),
        description: description.to_string(),
        mode: mode.parse().unwrap(),
        current: OrderId::new(current),
    }
}

fn slot(id: u32, dow: DayOfWeek, hour: u8, minute: u8, order: &str) -> Slot {
    Slot {
        id: SlotId::new(id),
        dow,
        hour,
        minute,
        order: OrderId::new(order),
    }
}

impl Default for StubController {
    fn default() -> Self {
        let state = StubState {
            status: Status {
                user: Some(ConnectedUser {
                    id: "admin".to_string(),
                    source_ip: "192.168.1.20".to_string(),
                }),
                uptime: Uptime {
                    system: 90_000,
                    wifi: WifiStats {
                        current_uptime: 3_679,
                        cumulated_uptime: 45_000,
                        successes: 3,
                        attempts: 4,
                        disconnects: 2,
                    },
                },
                firmware: None,
            },
            orders: canonical_orders(),
            override_value: Override::None,
            zones: vec![
                zone("e1z1", "salon", ":planning:0", "economy"),
                zone("e1z2", "chambre parents", ":fixed:nofreeze", "nofreeze"),
            ],
            plannings: vec![
                Planning {
                    id: PlanningId::new(1),
                    name: "Bureaux".to_string(),
                },
                Planning {
                    id: PlanningId::new(0),
                    name: "Pièces de vie".to_string(),
                },
            ],
            slots: HashMap::from([
                (
                    PlanningId::new(0),
                    vec![
                        slot(2, DayOfWeek::Monday, 17, 0, "cozy"),
                        slot(0, DayOfWeek::Monday, 5, 0, "economy"),
                        slot(1, DayOfWeek::Monday, 7, 30, "cozy"),
                    ],
                ),
                (PlanningId::new(1), vec![]),
            ]),
            accounts: vec![
                Account {
                    id: AccountId::new("admin"),
                    kind: AccountType::Admin,
                },
                Account {
                    id: AccountId::new("nico"),
                    kind: AccountType::User,
                },
            ],
            hardware: HardwareList {
                current: Some(HardwareId::new("M1E1")),
                supported: vec![
                    HardwareType {
                        id: HardwareId::new("ESP32"),
                        description: "modules ou DevKit seul".to_string(),
                    },
                    HardwareType {
                        id: HardwareId::new("M1E1"),
                        description: "DevKit NodeMCU 30 pin + OFP M1 + OFP E1".to_string(),
                    },
                ],
            },
            parameters: HashMap::from([
                (HardwareId::new("ESP32"), vec![]),
                (
                    HardwareId::new("M1E1"),
                    vec![HardwareParameter {
                        id: "ext_count".to_string(),
                        description: "Nombre de cartes d'extension E1".to_string(),
                        kind: ParameterKind::Number,
                        value: ParameterValue::Integer(3),
                    }],
                ),
            ]),
            failing: HashSet::new(),
            calls: Vec::new(),
            last_slot_patch: None,
            last_hardware: None,
            zones_gate: None,
        };
        Self {
            state: Mutex::new(state),
        }
    }
}

impl StubController {
    pub fn state(&self) -> MutexGuard<'_, StubState> {
        self.state.lock().unwrap()
    }

    pub fn fail(&self, operation: &'static str) {
        self.state().failing.insert(operation);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state().calls.clone()
    }

    fn call(
        &self,
        operation: &'static str,
        method: HttpMethod,
    ) -> Result<MutexGuard<'_, StubState>, OfpError> {
        let mut state = self.state();
        state.calls.push(operation);
        if state.failing.contains(operation) {
            return Err(HttpError {
                method,
                url: format!("/ofp-api/v1/{operation}"),
                status: 500,
            }
            .into());
        }
        Ok(state)
    }
}

fn not_found(entity: &'static str, id: impl ToString) -> OfpError {
    NotFoundError {
        entity,
        id: id.to_string(),
    }
    .into()
}

impl ControllerApi for StubController {
    fn get_status(&self) -> impl Future<Output = Result<Status, OfpError>> + Send {
        let result = self
            .call("get_status", HttpMethod::Get)
            .map(|s| s.status.clone());
        async { result }
    }

    fn get_orders(&self) -> impl Future<Output = Result<Vec<Order>, OfpError>> + Send {
        let result = self
            .call("get_orders", HttpMethod::Get)
            .map(|s| s.orders.clone());
        async { result }
    }

    fn get_override(&self) -> impl Future<Output = Result<Override, OfpError>> + Send {
        let result = self
            .call("get_override", HttpMethod::Get)
            .map(|s| s.override_value.clone());
        async { result }
    }

    fn put_override(&self, value: Override) -> impl Future<Output = Result<(), OfpError>> + Send {
        let result = self
            .call("put_override", HttpMethod::Put)
            .map(|mut s| s.override_value = value);
        async { result }
    }

    fn get_zones(&self) -> impl Future<Output = Result<Vec<Zone>, OfpError>> + Send {
        let gate = self.state().zones_gate.clone();
        let result = self
            .call("get_zones", HttpMethod::Get)
            .map(|s| s.zones.clone());
        async move {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            result
        }
    }

    fn patch_zone(
        &self,
        id: ZoneId,
        patch: ZonePatch,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        let result = self
            .call("patch_zone", HttpMethod::Patch)
            .and_then(|mut s| {
                let zone = s
                    .zones
                    .iter_mut()
                    .find(|z| z.id == id)
                    .ok_or_else(|| not_found("Zone", &id))?;
                if let Some(description) = patch.description {
                    zone.description = description;
                }
                if let Some(mode) = patch.mode {
                    if let ZoneMode::Fixed(order) = &mode {
                        zone.current = order.clone();
                    }
                    zone.mode = mode;
                }
                Ok(())
            });
        async { result }
    }

    fn get_plannings(&self) -> impl Future<Output = Result<Vec<Planning>, OfpError>> + Send {
        let result = self
            .call("get_plannings", HttpMethod::Get)
            .map(|s| s.plannings.clone());
        async { result }
    }

    fn create_planning(
        &self,
        name: PlanningName,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        let result = self
            .call("create_planning", HttpMethod::Post)
            .map(|mut s| {
                let id = s.plannings.iter().map(|p| p.id.value() + 1).max().unwrap_or(0);
                s.plannings.push(Planning {
                    id: PlanningId::new(id),
                    name: name.name,
                });
            });
        async { result }
    }

    fn rename_planning(
        &self,
        id: PlanningId,
        name: PlanningName,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        let result = self
            .call("rename_planning", HttpMethod::Patch)
            .and_then(|mut s| {
                let planning = s
                    .plannings
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| not_found("Planning", id))?;
                planning.name = name.name;
                Ok(())
            });
        async { result }
    }

    fn delete_planning(&self, id: PlanningId) -> impl Future<Output = Result<(), OfpError>> + Send {
        let result = self
            .call("delete_planning", HttpMethod::Delete)
            .map(|mut s| s.plannings.retain(|p| p.id != id));
        async { result }
    }

    fn get_planning_slots(
        &self,
        id: PlanningId,
    ) -> impl Future<Output = Result<Vec<Slot>, OfpError>> + Send {
        let result = self
            .call("get_planning_slots", HttpMethod::Get)
            .and_then(|s| {
                s.slots
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| not_found("Planning", id))
            });
        async { result }
    }

    fn create_slot(
        &self,
        planning: PlanningId,
        slot: NewSlot,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        let result = self
            .call("create_slot", HttpMethod::Post)
            .map(|mut s| {
                let slots = s.slots.entry(planning).or_default();
                let id = slots.iter().map(|x| x.id.value() + 1).max().unwrap_or(0);
                slots.push(slot.into_slot(SlotId::new(id)));
            });
        async { result }
    }

    fn patch_slot(
        &self,
        _planning: PlanningId,
        _slot: SlotId,
        patch: SlotPatch,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        let result = self
            .call("patch_slot", HttpMethod::Patch)
            .map(|mut s| s.last_slot_patch = Some(patch));
        async { result }
    }

    fn delete_slot(
        &self,
        planning: PlanningId,
        slot: SlotId,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        let result = self
            .call("delete_slot", HttpMethod::Delete)
            .map(|mut s| {
                if let Some(slots) = s.slots.get_mut(&planning) {
                    slots.retain(|x| x.id != slot);
                }
            });
        async { result }
    }

    fn get_accounts(&self) -> impl Future<Output = Result<Vec<Account>, OfpError>> + Send {
        let result = self
            .call("get_accounts", HttpMethod::Get)
            .map(|s| s.accounts.clone());
        async { result }
    }

    fn create_account(
        &self,
        account: NewAccount,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        let result = self
            .call("create_account", HttpMethod::Post)
            .map(|mut s| {
                s.accounts.push(Account {
                    id: account.id,
                    kind: AccountType::User,
                });
            });
        async { result }
    }

    fn delete_account(&self, id: AccountId) -> impl Future<Output = Result<(), OfpError>> + Send {
        let result = self
            .call("delete_account", HttpMethod::Delete)
            .map(|mut s| s.accounts.retain(|a| a.id != id));
        async { result }
    }

    fn reset_password(
        &self,
        _id: AccountId,
        _reset: PasswordReset,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        let result = self.call("reset_password", HttpMethod::Patch).map(|_| ());
        async { result }
    }

    fn upload_firmware(
        &self,
        _image: Vec<u8>,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        let result = self.call("upload_firmware", HttpMethod::Post).map(|_| ());
        async { result }
    }

    fn upload_certificate(
        &self,
        _bundle: Vec<u8>,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        let result = self
            .call("upload_certificate", HttpMethod::Post)
            .map(|_| ());
        async { result }
    }

    fn reboot(&self) -> impl Future<Output = Result<String, OfpError>> + Send {
        let result = self
            .call("reboot", HttpMethod::Get)
            .map(|_| "<p>rebooting</p>".to_string());
        async { result }
    }

    fn get_hardware(&self) -> impl Future<Output = Result<HardwareList, OfpError>> + Send {
        let result = self
            .call("get_hardware", HttpMethod::Get)
            .map(|s| s.hardware.clone());
        async { result }
    }

    fn get_hardware_parameters(
        &self,
        id: HardwareId,
    ) -> impl Future<Output = Result<Vec<HardwareParameter>, OfpError>> + Send {
        let result = self
            .call("get_hardware_parameters", HttpMethod::Get)
            .and_then(|s| {
                s.parameters
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| not_found("Hardware", &id))
            });
        async { result }
    }

    fn apply_hardware(
        &self,
        settings: HardwareSettings,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        let result = self
            .call("apply_hardware", HttpMethod::Post)
            .map(|mut s| s.last_hardware = Some(settings));
        async { result }
    }
}
