//! Stateful in-memory controller.
//!
//! Enforces the same invariants as the firmware so the dashboard can be
//! exercised offline against realistic answers.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use ofp_app::ports::ControllerApi;
use ofp_domain::account::{Account, AccountType, NewAccount, PasswordReset};
use ofp_domain::certificate::CertificateBundle;
use ofp_domain::error::{HttpError, HttpMethod, NotFoundError, OfpError, ValidationError};
use ofp_domain::firmware::{AppDescriptor, FirmwareImage};
use ofp_domain::hardware::{HardwareList, HardwareParameter, HardwareSettings, ParameterValue};
use ofp_domain::id::{AccountId, HardwareId, OrderId, PlanningId, SlotId, ZoneId};
use ofp_domain::limits::{MAX_ACCOUNTS, MAX_PLANNINGS, MAX_SLOTS_PER_PLANNING};
use ofp_domain::order::{DEFAULT_ORDER, Order, canonical_orders};
use ofp_domain::override_order::Override;
use ofp_domain::planning::{NewSlot, Planning, PlanningName, Slot, SlotPatch, active_order};
use ofp_domain::status::{ConnectedUser, RunningFirmware, Status, Uptime, WifiStats};
use ofp_domain::time::{self, WeekTime};
use ofp_domain::zone::{Zone, ZoneMode, ZonePatch};

use crate::{API_PREFIX, fixtures};

/// Time during which the API answers 503 after a reboot request.
pub const DEFAULT_REBOOT_GRACE: Duration = Duration::from_secs(10);

/// Page served while the controller restarts. The browser comes back to the
/// page it was sent from once the grace period is over.
fn wait_page(grace: Duration) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta http-equiv=\"refresh\" content=\"{};url=/\">\n<title>OFP</title>\n</head>\n\
         <body>\n<p>Redémarrage en cours, veuillez patienter...</p>\n</body>\n</html>\n",
        grace.as_secs()
    )
}

struct MockState {
    booted_at: Instant,
    rebooting_until: Option<Instant>,
    wifi: WifiStats,
    firmware: RunningFirmware,
    /// Flashed image, running after the next reboot.
    staged_firmware: Option<AppDescriptor>,
    certificates: Option<CertificateBundle>,
    orders: Vec<Order>,
    override_value: Override,
    zones: Vec<Zone>,
    plannings: Vec<Planning>,
    slots: HashMap<PlanningId, Vec<Slot>>,
    accounts: Vec<(Account, String)>,
    hardware: HardwareList,
    parameters: HashMap<HardwareId, Vec<HardwareParameter>>,
}

impl MockState {
    fn seeded() -> Self {
        Self {
            booted_at: Instant::now(),
            rebooting_until: None,
            wifi: fixtures::wifi(),
            firmware: fixtures::running_firmware(),
            staged_firmware: None,
            certificates: None,
            orders: canonical_orders(),
            override_value: fixtures::override_value(),
            zones: fixtures::zones(),
            plannings: fixtures::plannings(),
            slots: fixtures::slots(),
            accounts: fixtures::accounts(),
            hardware: fixtures::hardware(),
            parameters: fixtures::hardware_parameters(),
        }
    }

    /// Finish a pending reboot once its grace period is over.
    fn boot_if_due(&mut self, now: Instant) {
        let Some(until) = self.rebooting_until else {
            return;
        };
        if now < until {
            return;
        }
        self.rebooting_until = None;
        self.booted_at = until;
        self.wifi = fixtures::wifi();
        if let Some(app) = self.staged_firmware.take() {
            self.firmware.running_app_name = app.project_name;
            self.firmware.running_app_version = app.version;
            self.firmware.running_app_compiled_date = app.date;
            self.firmware.running_app_compiled_time = app.time;
            self.firmware.running_app_idf_version = app.idf_version;
            self.firmware.running_partition = if self.firmware.running_partition == "ota_0" {
                "ota_1".to_string()
            } else {
                "ota_0".to_string()
            };
        }
        tracing::info!("mock controller rebooted");
    }

    fn ensure_order(&self, id: &OrderId) -> Result<(), ValidationError> {
        if self.orders.iter().any(|order| order.id == *id) {
            Ok(())
        } else {
            Err(ValidationError::UnknownOrder(id.to_string()))
        }
    }

    fn ensure_mode(&self, mode: &ZoneMode) -> Result<(), ValidationError> {
        match mode {
            ZoneMode::Fixed(order) => self.ensure_order(order),
            ZoneMode::Planning(id) if self.plannings.iter().any(|p| p.id == *id) => Ok(()),
            ZoneMode::Planning(id) => Err(ValidationError::UnknownPlanning(id.value())),
        }
    }

    /// Order in effect for a zone: override, else fixed order, else the
    /// planning's active slot, else the default order.
    fn current_order(&self, zone: &Zone, at: WeekTime) -> OrderId {
        if let Some(order) = self.override_value.order() {
            return order.clone();
        }
        match &zone.mode {
            ZoneMode::Fixed(order) => order.clone(),
            ZoneMode::Planning(id) => self
                .slots
                .get(id)
                .and_then(|slots| active_order(slots, at))
                .cloned()
                .unwrap_or_else(|| OrderId::new(DEFAULT_ORDER)),
        }
    }

    fn slots_mut(&mut self, planning: PlanningId) -> Result<&mut Vec<Slot>, NotFoundError> {
        self.slots.get_mut(&planning).ok_or_else(|| NotFoundError {
            entity: "Planning",
            id: planning.to_string(),
        })
    }
}

/// In-memory controller seeded from [`fixtures`].
pub struct InMemoryController {
    state: Mutex<MockState>,
    reboot_grace: Duration,
    clock: fn() -> WeekTime,
}

impl Default for InMemoryController {
    fn default() -> Self {
        Self::new(DEFAULT_REBOOT_GRACE)
    }
}

impl InMemoryController {
    #[must_use]
    pub fn new(reboot_grace: Duration) -> Self {
        Self {
            state: Mutex::new(MockState::seeded()),
            reboot_grace,
            clock: time::now,
        }
    }

    /// Replace the wall clock used to evaluate plannings.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> WeekTime) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn reboot_grace(&self) -> Duration {
        self.reboot_grace
    }

    /// Lock the state, answering 503 while a reboot is in progress.
    fn online(
        &self,
        method: HttpMethod,
        endpoint: &str,
    ) -> Result<MutexGuard<'_, MockState>, OfpError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.boot_if_due(Instant::now());
        if state.rebooting_until.is_some() {
            return Err(HttpError {
                method,
                url: format!("{API_PREFIX}{endpoint}"),
                status: 503,
            }
            .into());
        }
        Ok(state)
    }

    fn status(&self) -> Result<Status, OfpError> {
        let state = self.online(HttpMethod::Get, "/status")?;
        let system = state.booted_at.elapsed().as_secs();
        Ok(Status {
            user: Some(ConnectedUser {
                id: "admin".to_string(),
                source_ip: "127.0.0.1".to_string(),
            }),
            uptime: Uptime {
                system,
                wifi: WifiStats {
                    current_uptime: system,
                    cumulated_uptime: state.wifi.cumulated_uptime + system,
                    ..state.wifi.clone()
                },
            },
            firmware: Some(state.firmware.clone()),
        })
    }

    fn put_override_sync(&self, value: Override) -> Result<(), OfpError> {
        let mut state = self.online(HttpMethod::Put, "/override")?;
        if let Some(order) = value.order() {
            state.ensure_order(order)?;
        }
        tracing::info!(%value, "override changed");
        state.override_value = value;
        Ok(())
    }

    fn zones(&self) -> Result<Vec<Zone>, OfpError> {
        let state = self.online(HttpMethod::Get, "/zones")?;
        let at = (self.clock)();
        Ok(state
            .zones
            .iter()
            .map(|zone| Zone {
                current: state.current_order(zone, at),
                ..zone.clone()
            })
            .collect())
    }

    fn patch_zone_sync(&self, id: &ZoneId, patch: ZonePatch) -> Result<(), OfpError> {
        let mut state = self.online(HttpMethod::Patch, &format!("/zones/{id}"))?;
        if let Some(mode) = &patch.mode {
            state.ensure_mode(mode)?;
        }
        let description = match patch.description {
            Some(description) if description.trim().is_empty() => {
                return Err(ValidationError::EmptyName.into());
            }
            Some(description) => Some(description.trim().to_string()),
            None => None,
        };
        let zone = state
            .zones
            .iter_mut()
            .find(|zone| zone.id == *id)
            .ok_or_else(|| NotFoundError {
                entity: "Zone",
                id: id.to_string(),
            })?;
        if let Some(description) = description {
            zone.description = description;
        }
        if let Some(mode) = patch.mode {
            zone.mode = mode;
        }
        Ok(())
    }

    fn create_planning_sync(&self, name: PlanningName) -> Result<Planning, OfpError> {
        let mut state = self.online(HttpMethod::Post, "/plannings")?;
        let name = PlanningName::new(&name.name)?;
        if state.plannings.len() >= MAX_PLANNINGS {
            return Err(ValidationError::LimitReached {
                what: "plannings",
                max: MAX_PLANNINGS,
            }
            .into());
        }
        let id = state
            .plannings
            .iter()
            .map(|p| p.id.value() + 1)
            .max()
            .unwrap_or(0);
        let planning = Planning {
            id: PlanningId::new(id),
            name: name.name,
        };
        state.plannings.push(planning.clone());
        state.slots.insert(planning.id, Vec::new());
        tracing::info!(planning = %planning.id, "planning created");
        Ok(planning)
    }

    fn rename_planning_sync(&self, id: PlanningId, name: PlanningName) -> Result<(), OfpError> {
        let mut state = self.online(HttpMethod::Patch, &format!("/plannings/{id}"))?;
        let name = PlanningName::new(&name.name)?;
        let planning = state
            .plannings
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| NotFoundError {
                entity: "Planning",
                id: id.to_string(),
            })?;
        planning.name = name.name;
        Ok(())
    }

    fn delete_planning_sync(&self, id: PlanningId) -> Result<(), OfpError> {
        let mut state = self.online(HttpMethod::Delete, &format!("/plannings/{id}"))?;
        let before = state.plannings.len();
        state.plannings.retain(|p| p.id != id);
        if state.plannings.len() == before {
            return Err(NotFoundError {
                entity: "Planning",
                id: id.to_string(),
            }
            .into());
        }
        state.slots.remove(&id);
        for zone in &mut state.zones {
            if zone.mode.planning() == Some(id) {
                tracing::info!(zone = %zone.id, planning = %id, "zone moved to default order");
                zone.mode = ZoneMode::Fixed(OrderId::new(DEFAULT_ORDER));
            }
        }
        Ok(())
    }

    fn planning_slots(&self, id: PlanningId) -> Result<Vec<Slot>, OfpError> {
        let mut state = self.online(HttpMethod::Get, &format!("/plannings/{id}"))?;
        Ok(state.slots_mut(id)?.clone())
    }

    fn create_slot_sync(&self, planning: PlanningId, slot: NewSlot) -> Result<Slot, OfpError> {
        let mut state = self.online(HttpMethod::Post, &format!("/plannings/{planning}/slots"))?;
        slot.validate()?;
        state.ensure_order(&slot.order)?;
        let slots = state.slots_mut(planning)?;
        if slots.len() >= MAX_SLOTS_PER_PLANNING {
            return Err(ValidationError::LimitReached {
                what: "slots",
                max: MAX_SLOTS_PER_PLANNING,
            }
            .into());
        }
        let id = slots.iter().map(|s| s.id.value() + 1).max().unwrap_or(0);
        let slot = slot.into_slot(SlotId::new(id));
        slots.push(slot.clone());
        Ok(slot)
    }

    fn patch_slot_sync(
        &self,
        planning: PlanningId,
        slot: SlotId,
        patch: &SlotPatch,
    ) -> Result<(), OfpError> {
        let endpoint = format!("/plannings/{planning}/slots/{slot}");
        let mut state = self.online(HttpMethod::Patch, &endpoint)?;
        if let Some(order) = &patch.order {
            state.ensure_order(order)?;
        }
        let target = state
            .slots_mut(planning)?
            .iter_mut()
            .find(|s| s.id == slot)
            .ok_or_else(|| NotFoundError {
                entity: "Slot",
                id: slot.to_string(),
            })?;
        patch.apply(target)?;
        Ok(())
    }

    fn delete_slot_sync(&self, planning: PlanningId, slot: SlotId) -> Result<(), OfpError> {
        let endpoint = format!("/plannings/{planning}/slots/{slot}");
        let mut state = self.online(HttpMethod::Delete, &endpoint)?;
        let slots = state.slots_mut(planning)?;
        let before = slots.len();
        slots.retain(|s| s.id != slot);
        if slots.len() == before {
            return Err(NotFoundError {
                entity: "Slot",
                id: slot.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn accounts(&self) -> Result<Vec<Account>, OfpError> {
        let state = self.online(HttpMethod::Get, "/accounts")?;
        Ok(state.accounts.iter().map(|(a, _)| a.clone()).collect())
    }

    fn create_account_sync(&self, account: NewAccount) -> Result<(), OfpError> {
        let mut state = self.online(HttpMethod::Post, "/accounts")?;
        account.validate()?;
        if state.accounts.iter().any(|(a, _)| a.id == account.id) {
            return Err(ValidationError::AccountExists(account.id.to_string()).into());
        }
        if state.accounts.len() >= MAX_ACCOUNTS {
            return Err(ValidationError::LimitReached {
                what: "accounts",
                max: MAX_ACCOUNTS,
            }
            .into());
        }
        tracing::info!(account = %account.id, "account created");
        state.accounts.push((
            Account {
                id: account.id,
                kind: AccountType::User,
            },
            account.password,
        ));
        Ok(())
    }

    fn account_mut<'a>(
        state: &'a mut MockState,
        id: &AccountId,
    ) -> Result<&'a mut (Account, String), NotFoundError> {
        state
            .accounts
            .iter_mut()
            .find(|(a, _)| a.id == *id)
            .ok_or_else(|| NotFoundError {
                entity: "Account",
                id: id.to_string(),
            })
    }

    fn delete_account_sync(&self, id: &AccountId) -> Result<(), OfpError> {
        let mut state = self.online(HttpMethod::Delete, &format!("/accounts/{id}"))?;
        let (account, _) = Self::account_mut(&mut state, id)?;
        if !account.is_deletable() {
            return Err(ValidationError::UndeletableAdmin.into());
        }
        state.accounts.retain(|(a, _)| a.id != *id);
        Ok(())
    }

    fn reset_password_sync(&self, id: &AccountId, reset: PasswordReset) -> Result<(), OfpError> {
        let mut state = self.online(HttpMethod::Patch, &format!("/accounts/{id}"))?;
        let reset = PasswordReset::new(&reset.password)?;
        let (_, password) = Self::account_mut(&mut state, id)?;
        *password = reset.password;
        Ok(())
    }

    /// Stored password of an account.
    #[must_use]
    pub fn password(&self, id: &AccountId) -> Option<String> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state
            .accounts
            .iter()
            .find(|(a, _)| a.id == *id)
            .map(|(_, password)| password.clone())
    }

    fn upload_firmware_sync(&self, image: &[u8]) -> Result<(), OfpError> {
        let mut state = self.online(HttpMethod::Post, "/upgrade")?;
        let image = FirmwareImage::inspect(image)?;
        tracing::info!(
            size = image.size,
            version = image.descriptor.as_ref().map(|d| d.version.as_str()),
            "firmware staged"
        );
        state.staged_firmware = image.descriptor;
        Ok(())
    }

    fn upload_certificate_sync(&self, bundle: &[u8]) -> Result<(), OfpError> {
        let mut state = self.online(HttpMethod::Post, "/certificate")?;
        let text = std::str::from_utf8(bundle)
            .map_err(|_| ValidationError::InvalidCertificate("bundle is not UTF-8 text"))?;
        let bundle = CertificateBundle::parse(text)?;
        tracing::info!(certificates = bundle.certificates, "certificate bundle stored");
        state.certificates = Some(bundle);
        Ok(())
    }

    /// Number of certificates in the stored TLS bundle, if any.
    #[must_use]
    pub fn certificate_count(&self) -> Option<usize> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.certificates.as_ref().map(|bundle| bundle.certificates)
    }

    fn reboot_sync(&self) -> Result<String, OfpError> {
        let mut state = self.online(HttpMethod::Get, "/reboot")?;
        state.rebooting_until = Some(Instant::now() + self.reboot_grace);
        tracing::info!(grace = ?self.reboot_grace, "reboot requested");
        Ok(wait_page(self.reboot_grace))
    }

    fn hardware(&self) -> Result<HardwareList, OfpError> {
        let state = self.online(HttpMethod::Get, "/hardware")?;
        Ok(state.hardware.clone())
    }

    fn hardware_parameters(&self, id: &HardwareId) -> Result<Vec<HardwareParameter>, OfpError> {
        let state = self.online(HttpMethod::Get, &format!("/hardware/{id}/parameters"))?;
        state.parameters.get(id).cloned().ok_or_else(|| {
            NotFoundError {
                entity: "Hardware",
                id: id.to_string(),
            }
            .into()
        })
    }

    fn apply_hardware_sync(&self, settings: HardwareSettings) -> Result<(), OfpError> {
        let mut state = self.online(HttpMethod::Post, "/hardware")?;
        let parameters = state
            .parameters
            .get_mut(&settings.hardware)
            .ok_or_else(|| NotFoundError {
                entity: "Hardware",
                id: settings.hardware.to_string(),
            })?;
        for (id, value) in &settings.values {
            let param = parameters
                .iter()
                .find(|p| p.id == *id)
                .ok_or_else(|| ValidationError::InvalidParameterValue {
                    id: id.clone(),
                    value: value.to_string(),
                })?;
            // values must match the declared kind
            ParameterValue::parse(id, param.kind, &value.to_string())?;
        }
        for (id, value) in settings.values {
            if let Some(param) = parameters.iter_mut().find(|p| p.id == id) {
                param.value = value;
            }
        }
        tracing::info!(hardware = %settings.hardware, "hardware selected");
        state.hardware.current = Some(settings.hardware);
        Ok(())
    }
}

impl ControllerApi for InMemoryController {
    async fn get_status(&self) -> Result<Status, OfpError> {
        self.status()
    }

    async fn get_orders(&self) -> Result<Vec<Order>, OfpError> {
        Ok(self.online(HttpMethod::Get, "/orders")?.orders.clone())
    }

    async fn get_override(&self) -> Result<Override, OfpError> {
        Ok(self
            .online(HttpMethod::Get, "/override")?
            .override_value
            .clone())
    }

    async fn put_override(&self, value: Override) -> Result<(), OfpError> {
        self.put_override_sync(value)
    }

    async fn get_zones(&self) -> Result<Vec<Zone>, OfpError> {
        self.zones()
    }

    async fn patch_zone(&self, id: ZoneId, patch: ZonePatch) -> Result<(), OfpError> {
        self.patch_zone_sync(&id, patch)
    }

    async fn get_plannings(&self) -> Result<Vec<Planning>, OfpError> {
        Ok(self.online(HttpMethod::Get, "/plannings")?.plannings.clone())
    }

    async fn create_planning(&self, name: PlanningName) -> Result<(), OfpError> {
        self.create_planning_sync(name).map(drop)
    }

    async fn rename_planning(&self, id: PlanningId, name: PlanningName) -> Result<(), OfpError> {
        self.rename_planning_sync(id, name)
    }

    async fn delete_planning(&self, id: PlanningId) -> Result<(), OfpError> {
        self.delete_planning_sync(id)
    }

    async fn get_planning_slots(&self, id: PlanningId) -> Result<Vec<Slot>, OfpError> {
        self.planning_slots(id)
    }

    async fn create_slot(&self, planning: PlanningId, slot: NewSlot) -> Result<(), OfpError> {
        self.create_slot_sync(planning, slot).map(drop)
    }

    async fn patch_slot(
        &self,
        planning: PlanningId,
        slot: SlotId,
        patch: SlotPatch,
    ) -> Result<(), OfpError> {
        self.patch_slot_sync(planning, slot, &patch)
    }

    async fn delete_slot(&self, planning: PlanningId, slot: SlotId) -> Result<(), OfpError> {
        self.delete_slot_sync(planning, slot)
    }

    async fn get_accounts(&self) -> Result<Vec<Account>, OfpError> {
        self.accounts()
    }

    async fn create_account(&self, account: NewAccount) -> Result<(), OfpError> {
        self.create_account_sync(account)
    }

    async fn delete_account(&self, id: AccountId) -> Result<(), OfpError> {
        self.delete_account_sync(&id)
    }

    async fn reset_password(&self, id: AccountId, reset: PasswordReset) -> Result<(), OfpError> {
        self.reset_password_sync(&id, reset)
    }

    async fn upload_firmware(&self, image: Vec<u8>) -> Result<(), OfpError> {
        self.upload_firmware_sync(&image)
    }

    async fn upload_certificate(&self, bundle: Vec<u8>) -> Result<(), OfpError> {
        self.upload_certificate_sync(&bundle)
    }

    async fn reboot(&self) -> Result<String, OfpError> {
        self.reboot_sync()
    }

    async fn get_hardware(&self) -> Result<HardwareList, OfpError> {
        self.hardware()
    }

    async fn get_hardware_parameters(
        &self,
        id: HardwareId,
    ) -> Result<Vec<HardwareParameter>, OfpError> {
        self.hardware_parameters(&id)
    }

    async fn apply_hardware(&self, settings: HardwareSettings) -> Result<(), OfpError> {
        self.apply_hardware_sync(settings)
    }
}

impl InMemoryController {
    /// Create a planning and return it with its id.
    ///
    /// # Errors
    ///
    /// Validation errors for an empty name or when the planning limit is reached.
    pub fn add_planning(&self, name: PlanningName) -> Result<Planning, OfpError> {
        self.create_planning_sync(name)
    }

    /// Create a slot and return it with its id.
    ///
    /// # Errors
    ///
    /// Not found for an unknown planning, validation errors otherwise.
    pub fn add_slot(&self, planning: PlanningId, slot: NewSlot) -> Result<Slot, OfpError> {
        self.create_slot_sync(planning, slot)
    }
}
