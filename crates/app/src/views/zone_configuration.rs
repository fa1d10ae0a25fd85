//! Zone configuration section: current order and mode selector per zone.

use ofp_domain::error::OfpError;
use ofp_domain::id::ZoneId;
use ofp_domain::order::{self, Order};
use ofp_domain::planning::Planning;
use ofp_domain::zone::{Zone, ZoneMode, ZonePatch};

use super::Outcome;
use crate::ports::ControllerApi;
use crate::render::{Choice, choices};

/// Shown when a zone reports an order missing from the order list.
const UNKNOWN_ORDER_NAME: &str = "?";
const UNKNOWN_ORDER_CLASS: &str = "light";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRow {
    pub id: String,
    pub description: String,
    pub current_name: String,
    pub current_class: String,
    pub modes: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneConfigurationView {
    pub zones: Vec<ZoneRow>,
}

impl ZoneConfigurationView {
    #[must_use]
    pub fn render(orders: &[Order], zones: &[Zone], plannings: &[Planning]) -> Self {
        let modes: Vec<(String, String)> = orders
            .iter()
            .map(|order| {
                (
                    ZoneMode::Fixed(order.id.clone()).to_string(),
                    format!("Fixe: {}", order.name),
                )
            })
            .chain(plannings.iter().map(|planning| {
                (
                    ZoneMode::Planning(planning.id).to_string(),
                    format!("Programmation: {}", planning.name),
                )
            }))
            .collect();

        let zones = zones
            .iter()
            .map(|zone| {
                let (current_name, current_class) = match order::find(orders, &zone.current) {
                    Some(current) => (current.name.clone(), current.class.clone()),
                    None => (
                        UNKNOWN_ORDER_NAME.to_string(),
                        UNKNOWN_ORDER_CLASS.to_string(),
                    ),
                };
                let mode = zone.mode.to_string();
                ZoneRow {
                    id: zone.id.to_string(),
                    description: zone.description.clone(),
                    current_name,
                    current_class,
                    modes: choices(
                        &modes,
                        |(value, _)| value.clone(),
                        |(_, label)| label.clone(),
                        Some(mode.as_str()),
                    ),
                }
            })
            .collect();

        Self { zones }
    }
}

#[derive(Clone)]
pub struct ZoneConfigurationController<A> {
    api: A,
}

impl<A: ControllerApi> ZoneConfigurationController<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Join orders, zones and plannings into the section.
    ///
    /// # Errors
    ///
    /// Propagates the first failing fetch.
    pub async fn load(&self) -> Result<ZoneConfigurationView, OfpError> {
        let orders = self.api.get_orders().await?;
        let zones = self.api.get_zones().await?;
        let plannings = self.api.get_plannings().await?;
        Ok(ZoneConfigurationView::render(&orders, &zones, &plannings))
    }

    /// # Errors
    ///
    /// Propagates the controller error.
    #[tracing::instrument(skip(self))]
    pub async fn rename(&self, zone: &str, description: &str) -> Result<Outcome, OfpError> {
        let Ok(patch) = ZonePatch::description(description) else {
            return Ok(Outcome::Skipped);
        };
        self.api.patch_zone(ZoneId::new(zone), patch).await?;
        Ok(Outcome::Applied)
    }

    /// # Errors
    ///
    /// Propagates the controller error.
    #[tracing::instrument(skip(self))]
    pub async fn change_mode(&self, zone: &str, mode: &str) -> Result<Outcome, OfpError> {
        let Ok(mode) = mode.parse::<ZoneMode>() else {
            return Ok(Outcome::Skipped);
        };
        self.api
            .patch_zone(ZoneId::new(zone), ZonePatch::mode(mode))
            .await?;
        Ok(Outcome::Applied)
    }
}
