//! Render helper: option lists with the server-side selection restored.
//!
//! Templates only iterate over [`Choice`]s. Which entry is selected is
//! decided here, once, so a template can never mark two options.

use ofp_domain::id::OrderId;
use ofp_domain::order::Order;
use ofp_domain::planning::DayOfWeek;

/// One `<option>` of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Build an option list from `records`.
///
/// At most one entry is selected: the first whose value equals `selected`.
pub fn choices<T>(
    records: impl IntoIterator<Item = T>,
    value: impl Fn(&T) -> String,
    label: impl Fn(&T) -> String,
    selected: Option<&str>,
) -> Vec<Choice> {
    let mut pending = selected;
    records
        .into_iter()
        .map(|record| {
            let value = value(&record);
            let is_selected = pending.is_some_and(|wanted| wanted == value);
            if is_selected {
                pending = None;
            }
            Choice {
                label: label(&record),
                value,
                selected: is_selected,
            }
        })
        .collect()
}

/// Days of week, Sunday first.
#[must_use]
pub fn day_choices(selected: Option<DayOfWeek>) -> Vec<Choice> {
    let selected = selected.map(|dow| dow.index().to_string());
    choices(
        DayOfWeek::ALL,
        |dow| dow.index().to_string(),
        |dow| dow.label().to_string(),
        selected.as_deref(),
    )
}

/// `00h` to `23h`.
#[must_use]
pub fn hour_choices(selected: Option<u8>) -> Vec<Choice> {
    padded_choices(24, 'h', selected)
}

/// `00m` to `59m`.
#[must_use]
pub fn minute_choices(selected: Option<u8>) -> Vec<Choice> {
    padded_choices(60, 'm', selected)
}

fn padded_choices(count: u8, suffix: char, selected: Option<u8>) -> Vec<Choice> {
    let selected = selected.map(|value| value.to_string());
    choices(
        0..count,
        u8::to_string,
        |value| format!("{value:02}{suffix}"),
        selected.as_deref(),
    )
}

/// Orders by name, valued by id.
#[must_use]
pub fn order_choices(orders: &[Order], selected: Option<&OrderId>) -> Vec<Choice> {
    choices(
        orders,
        |order| order.id.to_string(),
        |order| order.name.clone(),
        selected.map(OrderId::as_str),
    )
}
