//! Firmware, certificate and hardware changes, and the reboot proxy.

use axum::extract::{Form, Multipart, State};
use axum::response::{Html, IntoResponse, Redirect, Response};

use ofp_app::ports::ControllerApi;
use ofp_app::views::firmware::Upload;
use ofp_domain::hardware::HARDWARE_FIELD;

use super::{CONFIRM_FIELD, after};
use crate::error::DashboardError;
use crate::state::AppState;

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Prefix of the hardware parameter fields: `param.<id>`.
pub const PARAM_PREFIX: &str = "param.";

async fn read_upload(mut multipart: Multipart) -> Result<Upload, DashboardError> {
    let mut upload = Upload::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => upload.file = Some(field.bytes().await?.to_vec()),
            Some(CONFIRM_FIELD) => upload.confirmed = true,
            _ => {}
        }
    }
    Ok(upload)
}

/// `POST /firmware`
pub async fn upload_firmware<A>(
    State(state): State<AppState<A>>,
    multipart: Multipart,
) -> Result<Redirect, DashboardError>
where
    A: ControllerApi + 'static,
{
    let upload = read_upload(multipart).await?;
    let outcome = state.dashboard.upload_firmware(upload).await;
    Ok(after(outcome, "/"))
}

/// `POST /certificate`
pub async fn upload_certificate<A>(
    State(state): State<AppState<A>>,
    multipart: Multipart,
) -> Result<Redirect, DashboardError>
where
    A: ControllerApi + 'static,
{
    let upload = read_upload(multipart).await?;
    let outcome = state.dashboard.upload_certificate(upload).await;
    Ok(after(outcome, "/"))
}

/// Hardware form split into the selection, the confirmation and the
/// parameter values keyed by parameter id.
fn split_hardware_form(fields: Vec<(String, String)>) -> (String, bool, Vec<(String, String)>) {
    let mut hardware = String::new();
    let mut confirmed = false;
    let mut parameters = Vec::new();
    for (name, value) in fields {
        if name == HARDWARE_FIELD {
            hardware = value;
        } else if name == CONFIRM_FIELD {
            confirmed = true;
        } else if let Some(id) = name.strip_prefix(PARAM_PREFIX) {
            parameters.push((id.to_string(), value));
        }
    }
    (hardware, confirmed, parameters)
}

/// Whether `value` can go in a query string as is.
fn query_safe(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// `POST /hardware`
pub async fn apply_hardware<A>(
    State(state): State<AppState<A>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Redirect
where
    A: ControllerApi + 'static,
{
    let (hardware, confirmed, parameters) = split_hardware_form(fields);
    let outcome = state
        .dashboard
        .apply_hardware(&hardware, &parameters, confirmed)
        .await;
    let hardware = hardware.trim();
    let back = if query_safe(hardware) {
        format!("/?hardware={hardware}")
    } else {
        "/".to_string()
    };
    after(outcome, &back)
}

/// `GET /reboot` asks the controller to reboot and shows its wait page.
pub async fn reboot<A>(State(state): State<AppState<A>>) -> Response
where
    A: ControllerApi + 'static,
{
    match state.dashboard.reboot().await {
        Some(page) => Html(page).into_response(),
        None => Redirect::to("/").into_response(),
    }
}
