//! Zone override and zone configuration forms.

use axum::extract::{Form, Path, State};
use axum::response::Redirect;
use serde::Deserialize;

use ofp_app::ports::ControllerApi;

use super::after;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OverrideForm {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct DescriptionForm {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ModeForm {
    #[serde(default)]
    pub mode: String,
}

/// `POST /override`
pub async fn change_override<A>(
    State(state): State<AppState<A>>,
    Form(form): Form<OverrideForm>,
) -> Redirect
where
    A: ControllerApi + 'static,
{
    let outcome = state.dashboard.change_override(&form.value).await;
    after(outcome, "/")
}

/// `POST /zones/{id}/description`
pub async fn rename<A>(
    State(state): State<AppState<A>>,
    Path(id): Path<String>,
    Form(form): Form<DescriptionForm>,
) -> Redirect
where
    A: ControllerApi + 'static,
{
    let outcome = state.dashboard.rename_zone(&id, &form.description).await;
    after(outcome, "/")
}

/// `POST /zones/{id}/mode`
pub async fn change_mode<A>(
    State(state): State<AppState<A>>,
    Path(id): Path<String>,
    Form(form): Form<ModeForm>,
) -> Redirect
where
    A: ControllerApi + 'static,
{
    let outcome = state.dashboard.change_zone_mode(&id, &form.mode).await;
    after(outcome, "/")
}
