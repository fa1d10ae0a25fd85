//! Seed data of the mock controller.
//!
//! Same content as the development fixtures of the firmware web UI: eight
//! zones on two extension boards, three plannings and three accounts.

use std::collections::HashMap;

use ofp_domain::account::{Account, AccountType};
use ofp_domain::hardware::{
    HardwareList, HardwareParameter, HardwareType, ParameterKind, ParameterValue,
};
use ofp_domain::id::{AccountId, HardwareId, OrderId, PlanningId, SlotId, ZoneId};
use ofp_domain::override_order::Override;
use ofp_domain::planning::{DayOfWeek, Planning, Slot};
use ofp_domain::status::{RunningFirmware, WifiStats};
use ofp_domain::zone::{Zone, ZoneMode};

fn zone(id: &str, description: &str, mode: ZoneMode) -> Zone {
    let current = match &mode {
        ZoneMode::Fixed(order) => order.clone(),
        ZoneMode::Planning(_) => OrderId::new("economy"),
    };
    Zone {
        id: ZoneId::new(id),
        description: description.to_string(),
        mode,
        current,
    }
}

fn fixed(order: &str) -> ZoneMode {
    ZoneMode::Fixed(OrderId::new(order))
}

fn planning(id: u32) -> ZoneMode {
    ZoneMode::Planning(PlanningId::new(id))
}

pub fn zones() -> Vec<Zone> {
    vec![
        zone("e1z1", "salon", planning(0)),
        zone("e1z2", "chambre parents", fixed("nofreeze")),
        zone("e1z3", "e1z3", fixed("economy")),
        zone("e1z4", "bureau cecile", fixed("cozyminus2")),
        zone("e2z1", "e2z1", fixed("cozyminus1")),
        zone("e2z2", "e2z2", fixed("cozy")),
        zone("e2z3", "salle de bain", planning(1)),
        zone("e2z4", "inutilisé", fixed("offload")),
    ]
}

pub fn override_value() -> Override {
    Override::Order(OrderId::new("cozyminus1"))
}

pub fn plannings() -> Vec<Planning> {
    [(0, "Pièces de vie"), (1, "Bureaux"), (2, "Chambres")]
        .into_iter()
        .map(|(id, name)| Planning {
            id: PlanningId::new(id),
            name: name.to_string(),
        })
        .collect()
}

/// Expand a daily program onto every day of the week.
fn weekly(daily: &[(u8, &str)]) -> Vec<Slot> {
    DayOfWeek::ALL
        .iter()
        .flat_map(|dow| daily.iter().map(move |(hour, order)| (*dow, *hour, *order)))
        .zip(0..)
        .map(|((dow, hour, order), id)| Slot {
            id: SlotId::new(id),
            dow,
            hour,
            minute: 0,
            order: OrderId::new(order),
        })
        .collect()
}

pub fn slots() -> HashMap<PlanningId, Vec<Slot>> {
    HashMap::from([
        (
            PlanningId::new(0),
            weekly(&[
                (0, "nofreeze"),
                (5, "economy"),
                (7, "cozy"),
                (9, "economy"),
                (17, "cozy"),
                (21, "nofreeze"),
            ]),
        ),
        (PlanningId::new(1), weekly(&[(0, "economy"), (17, "cozy")])),
        (
            PlanningId::new(2),
            weekly(&[(0, "cozy"), (9, "economy"), (10, "nofreeze")]),
        ),
    ])
}

/// Accounts with their passwords.
pub fn accounts() -> Vec<(Account, String)> {
    [
        ("admin", AccountType::Admin, "admin"),
        ("nico", AccountType::User, "user"),
        ("cecile", AccountType::User, "user"),
    ]
    .into_iter()
    .map(|(id, kind, password)| {
        (
            Account {
                id: AccountId::new(id),
                kind,
            },
            password.to_string(),
        )
    })
    .collect()
}

pub fn hardware() -> HardwareList {
    HardwareList {
        current: Some(HardwareId::new("M1E1")),
        supported: [
            ("ESP32", "modules ou DevKit seul"),
            ("M1E1", "DevKit NodeMCU 30 pin + OFP M1 + OFP E1"),
            ("OFP-10Z", "Carte 10 zones avec afficheur et bouton"),
        ]
        .into_iter()
        .map(|(id, description)| HardwareType {
            id: HardwareId::new(id),
            description: description.to_string(),
        })
        .collect(),
    }
}

fn parameter(id: &str, description: &str, value: ParameterValue) -> HardwareParameter {
    let kind = match value {
        ParameterValue::Integer(_) => ParameterKind::Number,
        ParameterValue::Text(_) => ParameterKind::String,
    };
    HardwareParameter {
        id: id.to_string(),
        description: description.to_string(),
        kind,
        value,
    }
}

pub fn hardware_parameters() -> HashMap<HardwareId, Vec<HardwareParameter>> {
    HashMap::from([
        (HardwareId::new("ESP32"), Vec::new()),
        (
            HardwareId::new("M1E1"),
            vec![parameter(
                "ext_count",
                "Nombre de cartes d'extension E1",
                ParameterValue::Integer(3),
            )],
        ),
        (
            HardwareId::new("OFP-10Z"),
            vec![
                parameter("dummy1", "dummy number", ParameterValue::Integer(69)),
                parameter(
                    "dummy2",
                    "dummy string",
                    ParameterValue::Text("blah".to_string()),
                ),
            ],
        ),
    ])
}

/// Wifi counters of a fresh boot. Uptimes are added on read and never
/// exceed the system uptime.
pub fn wifi() -> WifiStats {
    WifiStats {
        current_uptime: 0,
        cumulated_uptime: 0,
        successes: 3,
        attempts: 4,
        disconnects: 2,
    }
}

pub fn running_firmware() -> RunningFirmware {
    RunningFirmware {
        running_partition: "ota_0".to_string(),
        running_partition_size: 1_572_864,
        running_app_name: "ofp".to_string(),
        running_app_version: "0.1.0".to_string(),
        running_app_compiled_date: "Jan  1 2024".to_string(),
        running_app_compiled_time: "12:00:00".to_string(),
        running_app_idf_version: "v5.1".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use ofp_domain::limits::MAX_SLOTS_PER_PLANNING;

    use super::*;

    #[test]
    fn should_reference_existing_plannings_only() {
        let plannings = plannings();
        for zone in zones() {
            if let Some(id) = zone.mode.planning() {
                assert!(plannings.iter().any(|p| p.id == id), "zone {}", zone.id);
            }
        }
    }

    #[test]
    fn should_fit_slot_limits_with_unique_ids() {
        for (planning, slots) in slots() {
            assert!(slots.len() <= MAX_SLOTS_PER_PLANNING, "planning {planning}");
            let mut ids: Vec<_> = slots.iter().map(|s| s.id).collect();
            ids.dedup();
            assert_eq!(ids.len(), slots.len());
        }
    }

    #[test]
    fn should_list_parameters_for_every_supported_hardware() {
        let parameters = hardware_parameters();
        for hw in hardware().supported {
            assert!(parameters.contains_key(&hw.id), "hardware {}", hw.id);
        }
    }
}
