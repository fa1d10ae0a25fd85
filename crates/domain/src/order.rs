//! Heating orders: the instruction levels a zone can be driven with.

use serde::{Deserialize, Serialize};

use crate::id::OrderId;

/// Order applied when neither a fixed order nor a planning slot applies.
pub const DEFAULT_ORDER: &str = "cozy";

/// A heating instruction level with its display class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    /// Colour class used by the dashboard (`danger`, `warning`, ...).
    pub class: String,
}

impl Order {
    #[must_use]
    pub fn new(id: &str, name: &str, class: &str) -> Self {
        Self {
            id: OrderId::new(id),
            name: name.to_string(),
            class: class.to_string(),
        }
    }
}

/// The orders known by the firmware, in the order it lists them.
#[must_use]
pub fn canonical_orders() -> Vec<Order> {
    vec![
        Order::new("offload", "Arrêt / Délestage", "secondary"),
        Order::new("nofreeze", "Hors-gel", "info"),
        Order::new("economy", "Economie", "success"),
        Order::new("cozyminus1", "Confort-1°", "warning"),
        Order::new("cozyminus2", "Confort-2°", "warning"),
        Order::new("cozy", "Confort", "danger"),
    ]
}

/// Numeric value the firmware stores for an order, `None` when unknown.
#[must_use]
pub fn firmware_index(id: &OrderId) -> Option<u8> {
    match id.as_str() {
        "offload" => Some(0),
        "nofreeze" => Some(1),
        "economy" => Some(2),
        "cozy" => Some(3),
        "cozyminus2" => Some(4),
        "cozyminus1" => Some(5),
        _ => None,
    }
}

/// Find an order by id.
#[must_use]
pub fn find<'a>(orders: &'a [Order], id: &OrderId) -> Option<&'a Order> {
    orders.iter().find(|order| &order.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_know_every_canonical_order_by_firmware_index() {
        let orders = canonical_orders();
        assert_eq!(orders.len(), 6);
        let mut indexes: Vec<u8> = orders
            .iter()
            .map(|order| firmware_index(&order.id).unwrap())
            .collect();
        indexes.sort_unstable();
        assert_eq!(indexes, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn should_return_none_for_unknown_order() {
        assert_eq!(firmware_index(&OrderId::new("turbo")), None);
        assert!(find(&canonical_orders(), &OrderId::new("turbo")).is_none());
    }

    #[test]
    fn should_include_default_order() {
        let orders = canonical_orders();
        let cozy = find(&orders, &OrderId::new(DEFAULT_ORDER)).unwrap();
        assert_eq!(cozy.name, "Confort");
        assert_eq!(cozy.class, "danger");
    }

    #[test]
    fn should_deserialize_wire_order() {
        let order: Order =
            serde_json::from_str(r#"{"id":"nofreeze","name":"Hors-gel","class":"info"}"#).unwrap();
        assert_eq!(order, Order::new("nofreeze", "Hors-gel", "info"));
    }
}
