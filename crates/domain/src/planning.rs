//! Plannings: named weekly schedules made of time-triggered slots.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{OrderId, PlanningId, SlotId};
use crate::time::WeekTime;

/// A named schedule that zones can delegate to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planning {
    pub id: PlanningId,
    pub name: String,
}

/// Body used both to create and to rename a planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningName {
    pub name: String,
}

impl PlanningName {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] when the trimmed name is empty.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self {
            name: name.to_string(),
        })
    }
}

/// Day of week, numbered like the controller does: 0 is Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum DayOfWeek {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl DayOfWeek {
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Day for an index counted from Sunday, wrapping past Saturday.
    #[must_use]
    pub fn from_sunday_index(index: u8) -> Self {
        Self::ALL[usize::from(index % 7)]
    }

    #[must_use]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// French label shown in the dashboard.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sunday => "Dimanche",
            Self::Monday => "Lundi",
            Self::Tuesday => "Mardi",
            Self::Wednesday => "Mercredi",
            Self::Thursday => "Jeudi",
            Self::Friday => "Vendredi",
            Self::Saturday => "Samedi",
        }
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(ValidationError::InvalidDayOfWeek(value))
    }
}

impl From<DayOfWeek> for u8 {
    fn from(value: DayOfWeek) -> Self {
        value.index()
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One trigger of a planning: from `dow hour:minute` on, apply `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub dow: DayOfWeek,
    pub hour: u8,
    pub minute: u8,
    pub order: OrderId,
}

impl Slot {
    fn week_minute(&self) -> u32 {
        week_minute(self.dow, self.hour, self.minute)
    }
}

fn week_minute(dow: DayOfWeek, hour: u8, minute: u8) -> u32 {
    u32::from(dow.index()) * 24 * 60 + u32::from(hour) * 60 + u32::from(minute)
}

fn check_time(hour: u8, minute: u8) -> Result<(), ValidationError> {
    if hour > 23 {
        return Err(ValidationError::InvalidHour(hour));
    }
    if minute > 59 {
        return Err(ValidationError::InvalidMinute(minute));
    }
    Ok(())
}

/// A slot to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSlot {
    pub dow: DayOfWeek,
    pub hour: u8,
    pub minute: u8,
    pub order: OrderId,
}

impl NewSlot {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the hour or minute is out of range.
    pub fn new(
        dow: DayOfWeek,
        hour: u8,
        minute: u8,
        order: OrderId,
    ) -> Result<Self, ValidationError> {
        let slot = Self {
            dow,
            hour,
            minute,
            order,
        };
        slot.validate()?;
        Ok(slot)
    }

    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the hour or minute is out of range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_time(self.hour, self.minute)
    }

    #[must_use]
    pub fn into_slot(self, id: SlotId) -> Slot {
        Slot {
            id,
            dow: self.dow,
            hour: self.hour,
            minute: self.minute,
            order: self.order,
        }
    }
}

/// Field-by-field edit of a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dow: Option<DayOfWeek>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderId>,
}

impl SlotPatch {
    /// Patch holding only the fields of `edited` that differ from `original`.
    #[must_use]
    pub fn diff(original: &NewSlot, edited: &NewSlot) -> Self {
        Self {
            dow: (original.dow != edited.dow).then_some(edited.dow),
            hour: (original.hour != edited.hour).then_some(edited.hour),
            minute: (original.minute != edited.minute).then_some(edited.minute),
            order: (original.order != edited.order).then(|| edited.order.clone()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dow.is_none() && self.hour.is_none() && self.minute.is_none() && self.order.is_none()
    }

    /// Apply the patch to `slot` once the result is known to be valid.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the patched time is out of range;
    /// `slot` is left untouched in that case.
    pub fn apply(&self, slot: &mut Slot) -> Result<(), ValidationError> {
        let hour = self.hour.unwrap_or(slot.hour);
        let minute = self.minute.unwrap_or(slot.minute);
        check_time(hour, minute)?;
        if let Some(dow) = self.dow {
            slot.dow = dow;
        }
        slot.hour = hour;
        slot.minute = minute;
        if let Some(order) = &self.order {
            slot.order = order.clone();
        }
        Ok(())
    }
}

/// Order slots by day of week, hour and minute; ties keep slot id order.
pub fn sort_slots(slots: &mut [Slot]) {
    slots.sort_by_key(|slot| (slot.week_minute(), slot.id));
}

/// Order in effect at `at` according to `slots`.
///
/// The latest slot at or before `at` wins. Before the first slot of the
/// week, the last slot of the previous week still applies. An empty planning
/// yields `None`.
#[must_use]
pub fn active_order(slots: &[Slot], at: WeekTime) -> Option<&OrderId> {
    let now = week_minute(at.dow, at.hour, at.minute);
    let key = |slot: &&Slot| (slot.week_minute(), slot.id);
    slots
        .iter()
        .filter(|slot| slot.week_minute() <= now)
        .max_by_key(key)
        .or_else(|| slots.iter().max_by_key(key))
        .map(|slot| &slot.order)
}
