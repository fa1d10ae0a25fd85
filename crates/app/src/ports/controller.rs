//! Controller API port: every REST operation the dashboard needs.

use std::future::Future;
use std::sync::Arc;

use ofp_domain::account::{Account, NewAccount, PasswordReset};
use ofp_domain::error::OfpError;
use ofp_domain::hardware::{HardwareList, HardwareParameter, HardwareSettings};
use ofp_domain::id::{AccountId, HardwareId, PlanningId, SlotId, ZoneId};
use ofp_domain::order::Order;
use ofp_domain::override_order::Override;
use ofp_domain::planning::{NewSlot, Planning, PlanningName, Slot, SlotPatch};
use ofp_domain::status::Status;
use ofp_domain::zone::{Zone, ZonePatch};

/// The heating controller, as seen through its REST API.
///
/// The controller is authoritative: implementations hold no cache and each
/// call reflects the controller's state at the time it is answered.
pub trait ControllerApi: Send + Sync {
    fn get_status(&self) -> impl Future<Output = Result<Status, OfpError>> + Send;

    fn get_orders(&self) -> impl Future<Output = Result<Vec<Order>, OfpError>> + Send;

    fn get_override(&self) -> impl Future<Output = Result<Override, OfpError>> + Send;

    fn put_override(&self, value: Override) -> impl Future<Output = Result<(), OfpError>> + Send;

    fn get_zones(&self) -> impl Future<Output = Result<Vec<Zone>, OfpError>> + Send;

    fn patch_zone(
        &self,
        id: ZoneId,
        patch: ZonePatch,
    ) -> impl Future<Output = Result<(), OfpError>> + Send;

    fn get_plannings(&self) -> impl Future<Output = Result<Vec<Planning>, OfpError>> + Send;

    fn create_planning(
        &self,
        name: PlanningName,
    ) -> impl Future<Output = Result<(), OfpError>> + Send;

    fn rename_planning(
        &self,
        id: PlanningId,
        name: PlanningName,
    ) -> impl Future<Output = Result<(), OfpError>> + Send;

    /// Delete a planning. Zones referencing it are reassigned by the controller.
    fn delete_planning(&self, id: PlanningId) -> impl Future<Output = Result<(), OfpError>> + Send;

    /// Slots of a planning, in controller order (unsorted).
    fn get_planning_slots(
        &self,
        id: PlanningId,
    ) -> impl Future<Output = Result<Vec<Slot>, OfpError>> + Send;

    fn create_slot(
        &self,
        planning: PlanningId,
        slot: NewSlot,
    ) -> impl Future<Output = Result<(), OfpError>> + Send;

    fn patch_slot(
        &self,
        planning: PlanningId,
        slot: SlotId,
        patch: SlotPatch,
    ) -> impl Future<Output = Result<(), OfpError>> + Send;

    fn delete_slot(
        &self,
        planning: PlanningId,
        slot: SlotId,
    ) -> impl Future<Output = Result<(), OfpError>> + Send;

    fn get_accounts(&self) -> impl Future<Output = Result<Vec<Account>, OfpError>> + Send;

    fn create_account(
        &self,
        account: NewAccount,
    ) -> impl Future<Output = Result<(), OfpError>> + Send;

    fn delete_account(&self, id: AccountId) -> impl Future<Output = Result<(), OfpError>> + Send;

    fn reset_password(
        &self,
        id: AccountId,
        reset: PasswordReset,
    ) -> impl Future<Output = Result<(), OfpError>> + Send;

    /// Upload a raw firmware image. The controller must be rebooted afterwards.
    fn upload_firmware(&self, image: Vec<u8>)
    -> impl Future<Output = Result<(), OfpError>> + Send;

    /// Upload a PEM bundle. The controller must be rebooted afterwards.
    fn upload_certificate(
        &self,
        bundle: Vec<u8>,
    ) -> impl Future<Output = Result<(), OfpError>> + Send;

    /// Ask for a reboot and return the wait page served by the controller.
    fn reboot(&self) -> impl Future<Output = Result<String, OfpError>> + Send;

    fn get_hardware(&self) -> impl Future<Output = Result<HardwareList, OfpError>> + Send;

    fn get_hardware_parameters(
        &self,
        id: HardwareId,
    ) -> impl Future<Output = Result<Vec<HardwareParameter>, OfpError>> + Send;

    /// Store the hardware selection. Takes effect after a reboot.
    fn apply_hardware(
        &self,
        settings: HardwareSettings,
    ) -> impl Future<Output = Result<(), OfpError>> + Send;
}

impl<T: ControllerApi> ControllerApi for Arc<T> {
    fn get_status(&self) -> impl Future<Output = Result<Status, OfpError>> + Send {
        (**self).get_status()
    }

    fn get_orders(&self) -> impl Future<Output = Result<Vec<Order>, OfpError>> + Send {
        (**self).get_orders()
    }

    fn get_override(&self) -> impl Future<Output = Result<Override, OfpError>> + Send {
        (**self).get_override()
    }

    fn put_override(&self, value: Override) -> impl Future<Output = Result<(), OfpError>> + Send {
        (**self).put_override(value)
    }

    fn get_zones(&self) -> impl Future<Output = Result<Vec<Zone>, OfpError>> + Send {
        (**self).get_zones()
    }

    fn patch_zone(
        &self,
        id: ZoneId,
        patch: ZonePatch,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        (**self).patch_zone(id, patch)
    }

    fn get_plannings(&self) -> impl Future<Output = Result<Vec<Planning>, OfpError>> + Send {
        (**self).get_plannings()
    }

    fn create_planning(
        &self,
        name: PlanningName,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        (**self).create_planning(name)
    }

    fn rename_planning(
        &self,
        id: PlanningId,
        name: PlanningName,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        (**self).rename_planning(id, name)
    }

    fn delete_planning(&self, id: PlanningId) -> impl Future<Output = Result<(), OfpError>> + Send {
        (**self).delete_planning(id)
    }

    fn get_planning_slots(
        &self,
        id: PlanningId,
    ) -> impl Future<Output = Result<Vec<Slot>, OfpError>> + Send {
        (**self).get_planning_slots(id)
    }

    fn create_slot(
        &self,
        planning: PlanningId,
        slot: NewSlot,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        (**self).create_slot(planning, slot)
    }

    fn patch_slot(
        &self,
        planning: PlanningId,
        slot: SlotId,
        patch: SlotPatch,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        (**self).patch_slot(planning, slot, patch)
    }

    fn delete_slot(
        &self,
        planning: PlanningId,
        slot: SlotId,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        (**self).delete_slot(planning, slot)
    }

    fn get_accounts(&self) -> impl Future<Output = Result<Vec<Account>, OfpError>> + Send {
        (**self).get_accounts()
    }

    fn create_account(
        &self,
        account: NewAccount,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        (**self).create_account(account)
    }

    fn delete_account(&self, id: AccountId) -> impl Future<Output = Result<(), OfpError>> + Send {
        (**self).delete_account(id)
    }

    fn reset_password(
        &self,
        id: AccountId,
        reset: PasswordReset,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        (**self).reset_password(id, reset)
    }

    fn upload_firmware(
        &self,
        image: Vec<u8>,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        (**self).upload_firmware(image)
    }

    fn upload_certificate(
        &self,
        bundle: Vec<u8>,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        (**self).upload_certificate(bundle)
    }

    fn reboot(&self) -> impl Future<Output = Result<String, OfpError>> + Send {
        (**self).reboot()
    }

    fn get_hardware(&self) -> impl Future<Output = Result<HardwareList, OfpError>> + Send {
        (**self).get_hardware()
    }

    fn get_hardware_parameters(
        &self,
        id: HardwareId,
    ) -> impl Future<Output = Result<Vec<HardwareParameter>, OfpError>> + Send {
        (**self).get_hardware_parameters(id)
    }

    fn apply_hardware(
        &self,
        settings: HardwareSettings,
    ) -> impl Future<Output = Result<(), OfpError>> + Send {
        (**self).apply_hardware(settings)
    }
}
