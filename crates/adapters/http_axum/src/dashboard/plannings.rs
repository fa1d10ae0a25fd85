//! Planning list and slot editor forms.

use axum::extract::{Form, Path, State};
use axum::response::Redirect;
use serde::Deserialize;

use ofp_app::ports::ControllerApi;
use ofp_app::views::planning_slots::SlotInput;
use ofp_domain::id::{PlanningId, SlotId};

use super::{after, home};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NameForm {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SlotForm {
    pub dow: String,
    pub hour: String,
    pub minute: String,
    pub order: String,
}

impl From<SlotForm> for SlotInput {
    fn from(form: SlotForm) -> Self {
        Self {
            dow: form.dow,
            hour: form.hour,
            minute: form.minute,
            order: form.order,
        }
    }
}

/// Slot row form: edited selectors plus the stored values as hidden fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SlotEditForm {
    pub dow: String,
    pub hour: String,
    pub minute: String,
    pub order: String,
    pub original_dow: String,
    pub original_hour: String,
    pub original_minute: String,
    pub original_order: String,
}

impl SlotEditForm {
    fn split(self) -> (SlotInput, SlotInput) {
        let original = SlotInput {
            dow: self.original_dow,
            hour: self.original_hour,
            minute: self.original_minute,
            order: self.original_order,
        };
        let edited = SlotInput {
            dow: self.dow,
            hour: self.hour,
            minute: self.minute,
            order: self.order,
        };
        (original, edited)
    }
}

/// `POST /plannings`
pub async fn create<A>(State(state): State<AppState<A>>, Form(form): Form<NameForm>) -> Redirect
where
    A: ControllerApi + 'static,
{
    let outcome = state.dashboard.create_planning(&form.name).await;
    after(outcome, "/")
}

/// `POST /plannings/{id}/rename`
pub async fn rename<A>(
    State(state): State<AppState<A>>,
    Path(id): Path<PlanningId>,
    Form(form): Form<NameForm>,
) -> Redirect
where
    A: ControllerApi + 'static,
{
    let outcome = state.dashboard.rename_planning(id, &form.name).await;
    after(outcome, &home(Some(id)))
}

/// `POST /plannings/{id}/delete`
pub async fn delete<A>(State(state): State<AppState<A>>, Path(id): Path<PlanningId>) -> Redirect
where
    A: ControllerApi + 'static,
{
    let outcome = state.dashboard.delete_planning(id).await;
    after(outcome, "/")
}

/// `POST /plannings/{id}/slots`
pub async fn add_slot<A>(
    State(state): State<AppState<A>>,
    Path(id): Path<PlanningId>,
    Form(form): Form<SlotForm>,
) -> Redirect
where
    A: ControllerApi + 'static,
{
    let outcome = state.dashboard.add_slot(id, &form.into()).await;
    after(outcome, &home(Some(id)))
}

/// `POST /plannings/{id}/slots/{slot}`
pub async fn edit_slot<A>(
    State(state): State<AppState<A>>,
    Path((id, slot)): Path<(PlanningId, SlotId)>,
    Form(form): Form<SlotEditForm>,
) -> Redirect
where
    A: ControllerApi + 'static,
{
    let (original, edited) = form.split();
    let outcome = state
        .dashboard
        .edit_slot(id, slot, &original, &edited)
        .await;
    after(outcome, &home(Some(id)))
}

/// `POST /plannings/{id}/slots/{slot}/delete`
pub async fn delete_slot<A>(
    State(state): State<AppState<A>>,
    Path((id, slot)): Path<(PlanningId, SlotId)>,
) -> Redirect
where
    A: ControllerApi + 'static,
{
    let outcome = state.dashboard.delete_slot(id, slot).await;
    after(outcome, &home(Some(id)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use ofp_app::ports::ControllerApi;
    use ofp_domain::id::{OrderId, PlanningId, SlotId};

    use crate::dashboard::testing::{app, form, location};

    #[tokio::test]
    async fn should_create_planning() {
        let (app, controller) = app();

        let response = app
            .oneshot(form("/plannings", "name=Cuisine"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let plannings = controller.get_plannings().await.unwrap();
        assert!(plannings.iter().any(|p| p.name == "Cuisine"));
    }

    #[tokio::test]
    async fn should_skip_blank_planning_name() {
        let (app, controller) = app();

        app.oneshot(form("/plannings/1/rename", "name=+++"))
            .await
            .unwrap();

        let plannings = controller.get_plannings().await.unwrap();
        assert!(plannings.iter().any(|p| p.name == "Bureaux"));
    }

    #[tokio::test]
    async fn should_add_slot_and_return_to_planning() {
        let (app, controller) = app();
        let before = controller
            .get_planning_slots(PlanningId::new(1))
            .await
            .unwrap()
            .len();

        let response = app
            .oneshot(form(
                "/plannings/1/slots",
                "dow=1&hour=12&minute=30&order=cozy",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/?planning=1");
        let slots = controller
            .get_planning_slots(PlanningId::new(1))
            .await
            .unwrap();
        assert_eq!(slots.len(), before + 1);
    }

    #[tokio::test]
    async fn should_send_only_changed_slot_fields() {
        let (app, controller) = app();
        let slot = controller
            .get_planning_slots(PlanningId::new(1))
            .await
            .unwrap()
            .into_iter()
            .find(|s| s.id == SlotId::new(0))
            .unwrap();
        let original = format!(
            "original_dow={}&original_hour={}&original_minute={}&original_order={}",
            slot.dow.index(),
            slot.hour,
            slot.minute,
            slot.order
        );
        let body = format!(
            "dow={}&hour={}&minute={}&order=nofreeze&{original}",
            slot.dow.index(),
            slot.hour,
            slot.minute
        );

        app.oneshot(form("/plannings/1/slots/0", &body))
            .await
            .unwrap();

        let edited = controller
            .get_planning_slots(PlanningId::new(1))
            .await
            .unwrap()
            .into_iter()
            .find(|s| s.id == SlotId::new(0))
            .unwrap();
        assert_eq!(edited.order, OrderId::new("nofreeze"));
        assert_eq!(edited.hour, slot.hour);
    }

    #[tokio::test]
    async fn should_delete_slot() {
        let (app, controller) = app();

        app.oneshot(form("/plannings/1/slots/0/delete", ""))
            .await
            .unwrap();

        let slots = controller
            .get_planning_slots(PlanningId::new(1))
            .await
            .unwrap();
        assert!(slots.iter().all(|s| s.id != SlotId::new(0)));
    }
}
