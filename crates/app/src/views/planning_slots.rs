//! Slot editor of the selected planning.

use ofp_domain::error::OfpError;
use ofp_domain::id::{OrderId, PlanningId, SlotId};
use ofp_domain::order::Order;
use ofp_domain::planning::{DayOfWeek, NewSlot, Slot, SlotPatch, sort_slots};

use super::Outcome;
use crate::ports::ControllerApi;
use crate::render::{Choice, day_choices, hour_choices, minute_choices, order_choices};

/// Raw slot fields as submitted by a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotInput {
    pub dow: String,
    pub hour: String,
    pub minute: String,
    pub order: String,
}

impl SlotInput {
    /// `None` when any field is missing or out of range.
    #[must_use]
    pub fn parse(&self) -> Option<NewSlot> {
        let dow = DayOfWeek::try_from(self.dow.trim().parse::<u8>().ok()?).ok()?;
        let hour = self.hour.trim().parse().ok()?;
        let minute = self.minute.trim().parse().ok()?;
        let order = self.order.trim();
        if order.is_empty() {
            return None;
        }
        NewSlot::new(dow, hour, minute, OrderId::new(order)).ok()
    }
}

impl From<&Slot> for SlotInput {
    fn from(slot: &Slot) -> Self {
        Self {
            dow: slot.dow.index().to_string(),
            hour: slot.hour.to_string(),
            minute: slot.minute.to_string(),
            order: slot.order.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRow {
    pub id: SlotId,
    pub dow: Vec<Choice>,
    pub hour: Vec<Choice>,
    pub minute: Vec<Choice>,
    pub order: Vec<Choice>,
    /// Stored values, sent back with an edit to find out what changed.
    pub original: SlotInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningSlotsView {
    pub planning: PlanningId,
    pub slots: Vec<SlotRow>,
    pub add_dow: Vec<Choice>,
    pub add_hour: Vec<Choice>,
    pub add_minute: Vec<Choice>,
    pub add_order: Vec<Choice>,
}

impl PlanningSlotsView {
    #[must_use]
    pub fn render(planning: PlanningId, mut slots: Vec<Slot>, orders: &[Order]) -> Self {
        sort_slots(&mut slots);
        let slots = slots
            .iter()
            .map(|slot| SlotRow {
                id: slot.id,
                dow: day_choices(Some(slot.dow)),
                hour: hour_choices(Some(slot.hour)),
                minute: minute_choices(Some(slot.minute)),
                order: order_choices(orders, Some(&slot.order)),
                original: SlotInput::from(slot),
            })
            .collect();
        Self {
            planning,
            slots,
            add_dow: day_choices(None),
            add_hour: hour_choices(None),
            add_minute: minute_choices(None),
            add_order: order_choices(orders, None),
        }
    }
}

#[derive(Clone)]
pub struct PlanningSlotsController<A> {
    api: A,
}

impl<A: ControllerApi> PlanningSlotsController<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Propagates the first failing fetch.
    pub async fn load(&self, planning: PlanningId) -> Result<PlanningSlotsView, OfpError> {
        let slots = self.api.get_planning_slots(planning).await?;
        let orders = self.api.get_orders().await?;
        Ok(PlanningSlotsView::render(planning, slots, &orders))
    }

    /// # Errors
    ///
    /// Propagates the controller error.
    #[tracing::instrument(skip(self))]
    pub async fn add(&self, planning: PlanningId, input: &SlotInput) -> Result<Outcome, OfpError> {
        let Some(slot) = input.parse() else {
            return Ok(Outcome::Skipped);
        };
        self.api.create_slot(planning, slot).await?;
        Ok(Outcome::Applied)
    }

    /// Send only the fields that differ between `original` and `edited`.
    ///
    /// # Errors
    ///
    /// Propagates the controller error.
    #[tracing::instrument(skip(self))]
    pub async fn edit(
        &self,
        planning: PlanningId,
        slot: SlotId,
        original: &SlotInput,
        edited: &SlotInput,
    ) -> Result<Outcome, OfpError> {
        let (Some(original), Some(edited)) = (original.parse(), edited.parse()) else {
            return Ok(Outcome::Skipped);
        };
        let patch = SlotPatch::diff(&original, &edited);
        if patch.is_empty() {
            return Ok(Outcome::Skipped);
        }
        self.api.patch_slot(planning, slot, patch).await?;
        Ok(Outcome::Applied)
    }

    /// # Errors
    ///
    /// Propagates the controller error.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, planning: PlanningId, slot: SlotId) -> Result<Outcome, OfpError> {
        self.api.delete_slot(planning, slot).await?;
        Ok(Outcome::Applied)
    }
}
