//! Server-side rendered HTML dashboard (no JavaScript).
//!
//! Every interaction is a `<form>` posting to a path that names the record it
//! acts on. Handlers answer `303 See Other` back to the page (PRG), which
//! re-fetches the affected sections. Actions that need a reboot send the
//! browser to `/reboot` instead.

#[allow(clippy::missing_errors_doc)]
pub mod accounts;
pub mod home;
#[allow(clippy::missing_errors_doc)]
pub mod maintenance;
pub mod plannings;
pub mod zones;

use axum::Router;
use axum::response::Redirect;
use axum::routing::{get, post};

use ofp_app::ports::ControllerApi;
use ofp_app::views::Outcome;
use ofp_domain::id::PlanningId;

use crate::state::AppState;

/// Where actions that only take effect after a reboot lead.
pub const REBOOT_PATH: &str = "/reboot";

/// Checkbox that must be ticked for uploads and hardware changes.
pub const CONFIRM_FIELD: &str = "confirm";

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<A>() -> Router<AppState<A>>
where
    A: ControllerApi + 'static,
{
    Router::new()
        .route("/", get(home::index::<A>))
        .route("/zones", get(home::zones::<A>))
        .route("/override", post(zones::change_override::<A>))
        .route("/zones/{id}/description", post(zones::rename::<A>))
        .route("/zones/{id}/mode", post(zones::change_mode::<A>))
        .route("/plannings", post(plannings::create::<A>))
        .route("/plannings/{id}/rename", post(plannings::rename::<A>))
        .route("/plannings/{id}/delete", post(plannings::delete::<A>))
        .route("/plannings/{id}/slots", post(plannings::add_slot::<A>))
        .route(
            "/plannings/{id}/slots/{slot}",
            post(plannings::edit_slot::<A>),
        )
        .route(
            "/plannings/{id}/slots/{slot}/delete",
            post(plannings::delete_slot::<A>),
        )
        .route("/accounts", post(accounts::create::<A>))
        .route("/accounts/{id}/password", post(accounts::reset_password::<A>))
        .route("/accounts/{id}/delete", post(accounts::delete::<A>))
        .route("/firmware", post(maintenance::upload_firmware::<A>))
        .route("/certificate", post(maintenance::upload_certificate::<A>))
        .route("/hardware", post(maintenance::apply_hardware::<A>))
        .route(REBOOT_PATH, get(maintenance::reboot::<A>))
}

/// Main page, with `planning` selected when given.
fn home(planning: Option<PlanningId>) -> String {
    match planning {
        Some(id) => format!("/?planning={id}"),
        None => "/".to_string(),
    }
}

/// PRG answer to an action.
fn after(outcome: Outcome, back: &str) -> Redirect {
    match outcome {
        Outcome::Reboot => Redirect::to(REBOOT_PATH),
        Outcome::Applied | Outcome::Skipped | Outcome::Failed => Redirect::to(back),
    }
}
