//! Zone override section: one radio button per order plus "no override".

use ofp_domain::error::OfpError;
use ofp_domain::order::Order;
use ofp_domain::override_order::{NO_OVERRIDE, Override};

use super::Outcome;
use crate::ports::ControllerApi;

/// Label of the "no override" entry.
pub const NO_OVERRIDE_LABEL: &str = "Aucun forçage";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideOption {
    pub value: String,
    pub name: String,
    pub class: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneOverrideView {
    pub options: Vec<OverrideOption>,
}

impl ZoneOverrideView {
    #[must_use]
    pub fn render(current: &Override, orders: &[Order]) -> Self {
        let mut options = Vec::with_capacity(orders.len() + 1);
        options.push(OverrideOption {
            value: NO_OVERRIDE.to_string(),
            name: NO_OVERRIDE_LABEL.to_string(),
            class: "primary".to_string(),
            checked: false,
        });
        options.extend(orders.iter().map(|order| OverrideOption {
            value: order.id.to_string(),
            name: order.name.clone(),
            class: order.class.clone(),
            checked: false,
        }));

        match options.iter_mut().find(|opt| opt.value == current.as_str()) {
            Some(option) => option.checked = true,
            None => tracing::warn!(%current, "override names an unknown order"),
        }

        Self { options }
    }
}

#[derive(Clone)]
pub struct ZoneOverrideController<A> {
    api: A,
}

impl<A: ControllerApi> ZoneOverrideController<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Propagates the first failing fetch.
    pub async fn load(&self) -> Result<ZoneOverrideView, OfpError> {
        let current = self.api.get_override().await?;
        let orders = self.api.get_orders().await?;
        Ok(ZoneOverrideView::render(&current, &orders))
    }

    /// Apply the override picked by the user (`none` clears it).
    ///
    /// # Errors
    ///
    /// Propagates the controller error.
    #[tracing::instrument(skip(self))]
    pub async fn change(&self, raw: &str) -> Result<Outcome, OfpError> {
        if raw.trim().is_empty() {
            return Ok(Outcome::Skipped);
        }
        self.api.put_override(Override::parse(raw)).await?;
        Ok(Outcome::Applied)
    }
}
