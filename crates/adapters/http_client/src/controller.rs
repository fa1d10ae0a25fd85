//! [`ControllerApi`] over the REST endpoints.

use serde::Deserialize;

use ofp_app::ports::ControllerApi;
use ofp_domain::account::{Account, NewAccount, PasswordReset};
use ofp_domain::error::OfpError;
use ofp_domain::hardware::{HardwareList, HardwareParameter, HardwareSettings};
use ofp_domain::id::{AccountId, HardwareId, PlanningId, SlotId, ZoneId};
use ofp_domain::order::Order;
use ofp_domain::override_order::{Override, OverrideBody};
use ofp_domain::planning::{NewSlot, Planning, PlanningName, Slot, SlotPatch};
use ofp_domain::status::Status;
use ofp_domain::zone::{Zone, ZonePatch};

use crate::client::{HttpClient, OCTET_STREAM, PEM_FILE};

#[derive(Deserialize)]
struct Orders {
    orders: Vec<Order>,
}

#[derive(Deserialize)]
struct Zones {
    zones: Vec<Zone>,
}

#[derive(Deserialize)]
struct Plannings {
    plannings: Vec<Planning>,
}

#[derive(Deserialize)]
struct Slots {
    slots: Vec<Slot>,
}

#[derive(Deserialize)]
struct Accounts {
    accounts: Vec<Account>,
}

#[derive(Deserialize)]
struct Parameters {
    parameters: Vec<HardwareParameter>,
}

impl ControllerApi for HttpClient {
    async fn get_status(&self) -> Result<Status, OfpError> {
        self.get_json("/status").await
    }

    async fn get_orders(&self) -> Result<Vec<Order>, OfpError> {
        self.get_json::<Orders>("/orders").await.map(|o| o.orders)
    }

    async fn get_override(&self) -> Result<Override, OfpError> {
        self.get_json::<OverrideBody>("/override")
            .await
            .map(|body| body.value)
    }

    async fn put_override(&self, value: Override) -> Result<(), OfpError> {
        self.put_json("/override", &OverrideBody { value }).await
    }

    async fn get_zones(&self) -> Result<Vec<Zone>, OfpError> {
        self.get_json::<Zones>("/zones").await.map(|z| z.zones)
    }

    async fn patch_zone(&self, id: ZoneId, patch: ZonePatch) -> Result<(), OfpError> {
        self.patch_json(&format!("/zones/{id}"), &patch).await
    }

    async fn get_plannings(&self) -> Result<Vec<Planning>, OfpError> {
        self.get_json::<Plannings>("/plannings")
            .await
            .map(|p| p.plannings)
    }

    async fn create_planning(&self, name: PlanningName) -> Result<(), OfpError> {
        self.post_json("/plannings", &name).await
    }

    async fn rename_planning(&self, id: PlanningId, name: PlanningName) -> Result<(), OfpError> {
        self.patch_json(&format!("/plannings/{id}"), &name).await
    }

    async fn delete_planning(&self, id: PlanningId) -> Result<(), OfpError> {
        self.delete(&format!("/plannings/{id}")).await
    }

    async fn get_planning_slots(&self, id: PlanningId) -> Result<Vec<Slot>, OfpError> {
        self.get_json::<Slots>(&format!("/plannings/{id}"))
            .await
            .map(|s| s.slots)
    }

    async fn create_slot(&self, planning: PlanningId, slot: NewSlot) -> Result<(), OfpError> {
        self.post_json(&format!("/plannings/{planning}/slots"), &slot)
            .await
    }

    async fn patch_slot(
        &self,
        planning: PlanningId,
        slot: SlotId,
        patch: SlotPatch,
    ) -> Result<(), OfpError> {
        self.patch_json(&format!("/plannings/{planning}/slots/{slot}"), &patch)
            .await
    }

    async fn delete_slot(&self, planning: PlanningId, slot: SlotId) -> Result<(), OfpError> {
        self.delete(&format!("/plannings/{planning}/slots/{slot}"))
            .await
    }

    async fn get_accounts(&self) -> Result<Vec<Account>, OfpError> {
        self.get_json::<Accounts>("/accounts")
            .await
            .map(|a| a.accounts)
    }

    async fn create_account(&self, account: NewAccount) -> Result<(), OfpError> {
        self.post_json("/accounts", &account).await
    }

    async fn delete_account(&self, id: AccountId) -> Result<(), OfpError> {
        self.delete(&format!("/accounts/{id}")).await
    }

    async fn reset_password(&self, id: AccountId, reset: PasswordReset) -> Result<(), OfpError> {
        self.patch_json(&format!("/accounts/{id}"), &reset).await
    }

    async fn upload_firmware(&self, image: Vec<u8>) -> Result<(), OfpError> {
        self.post_bytes("/upgrade", OCTET_STREAM, image).await
    }

    async fn upload_certificate(&self, bundle: Vec<u8>) -> Result<(), OfpError> {
        self.post_bytes("/certificate", PEM_FILE, bundle).await
    }

    async fn reboot(&self) -> Result<String, OfpError> {
        self.get_text("/reboot").await
    }

    async fn get_hardware(&self) -> Result<HardwareList, OfpError> {
        self.get_json("/hardware").await
    }

    async fn get_hardware_parameters(
        &self,
        id: HardwareId,
    ) -> Result<Vec<HardwareParameter>, OfpError> {
        self.get_json::<Parameters>(&format!("/hardware/{id}/parameters"))
            .await
            .map(|p| p.parameters)
    }

    async fn apply_hardware(&self, settings: HardwareSettings) -> Result<(), OfpError> {
        self.post_form("/hardware", &settings.form_fields()).await
    }
}
