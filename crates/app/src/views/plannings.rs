//! Planning list section: selector plus create, rename and delete.

use ofp_domain::error::OfpError;
use ofp_domain::id::PlanningId;
use ofp_domain::planning::{Planning, PlanningName};

use super::Outcome;
use crate::ports::ControllerApi;
use crate::render::{Choice, choices};

/// Shown instead of the slot editor when there is no planning to edit.
pub const EMPTY_PLANNING_MESSAGE: &str =
    "En l'absence de créneaux, l'ordre par défaut (confort) est utilisé.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningListView {
    pub plannings: Vec<Choice>,
    /// `None` when the list is empty.
    pub selected: Option<PlanningId>,
}

impl PlanningListView {
    /// Sort by name then id and select `requested`, or the first planning
    /// when `requested` is absent or unknown.
    #[must_use]
    pub fn render(mut plannings: Vec<Planning>, requested: Option<PlanningId>) -> Self {
        plannings.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        let selected = requested
            .filter(|id| plannings.iter().any(|p| p.id == *id))
            .or_else(|| plannings.first().map(|p| p.id));
        let selected_value = selected.map(|id| id.to_string());
        Self {
            plannings: choices(
                &plannings,
                |p| p.id.to_string(),
                |p| p.name.clone(),
                selected_value.as_deref(),
            ),
            selected,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plannings.is_empty()
    }
}

#[derive(Clone)]
pub struct PlanningListController<A> {
    api: A,
}

impl<A: ControllerApi> PlanningListController<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Propagates the controller error.
    pub async fn load(&self, requested: Option<PlanningId>) -> Result<PlanningListView, OfpError> {
        let plannings = self.api.get_plannings().await?;
        Ok(PlanningListView::render(plannings, requested))
    }

    /// # Errors
    ///
    /// Propagates the controller error.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, name: &str) -> Result<Outcome, OfpError> {
        let Ok(name) = PlanningName::new(name) else {
            return Ok(Outcome::Skipped);
        };
        self.api.create_planning(name).await?;
        Ok(Outcome::Applied)
    }

    /// # Errors
    ///
    /// Propagates the controller error.
    #[tracing::instrument(skip(self))]
    pub async fn rename(&self, id: PlanningId, name: &str) -> Result<Outcome, OfpError> {
        let Ok(name) = PlanningName::new(name) else {
            return Ok(Outcome::Skipped);
        };
        self.api.rename_planning(id, name).await?;
        Ok(Outcome::Applied)
    }

    /// # Errors
    ///
    /// Propagates the controller error.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: PlanningId) -> Result<Outcome, OfpError> {
        self.api.delete_planning(id).await?;
        Ok(Outcome::Applied)
    }
}
