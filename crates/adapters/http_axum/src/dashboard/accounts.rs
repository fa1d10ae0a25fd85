//! Account forms.

use axum::extract::{Form, Path, State};
use axum::response::Redirect;
use serde::Deserialize;

use ofp_app::ports::ControllerApi;

use super::after;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AccountForm {
    pub id: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PasswordForm {
    pub password: String,
}

/// `POST /accounts`
pub async fn create<A>(State(state): State<AppState<A>>, Form(form): Form<AccountForm>) -> Redirect
where
    A: ControllerApi + 'static,
{
    let outcome = state
        .dashboard
        .create_account(&form.id, &form.password)
        .await;
    after(outcome, "/")
}

/// `POST /accounts/{id}/password`
pub async fn reset_password<A>(
    State(state): State<AppState<A>>,
    Path(id): Path<String>,
    Form(form): Form<PasswordForm>,
) -> Redirect
where
    A: ControllerApi + 'static,
{
    let outcome = state.dashboard.reset_password(&id, &form.password).await;
    after(outcome, "/")
}

/// `POST /accounts/{id}/delete`
pub async fn delete<A>(State(state): State<AppState<A>>, Path(id): Path<String>) -> Redirect
where
    A: ControllerApi + 'static,
{
    let outcome = state.dashboard.delete_account(&id).await;
    after(outcome, "/")
}
