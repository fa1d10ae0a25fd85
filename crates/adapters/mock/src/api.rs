//! REST handlers, same paths and JSON shapes as the firmware.

#![allow(clippy::missing_errors_doc)]

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use ofp_app::ports::ControllerApi;
use ofp_domain::account::{NewAccount, PasswordReset};
use ofp_domain::error::{NotFoundError, OfpError, ValidationError};
use ofp_domain::hardware::{HARDWARE_FIELD, HardwareList, HardwareSettings};
use ofp_domain::id::{AccountId, HardwareId, PlanningId, SlotId, ZoneId};
use ofp_domain::override_order::OverrideBody;
use ofp_domain::planning::{NewSlot, Planning, PlanningName, Slot, SlotPatch};
use ofp_domain::status::Status;
use ofp_domain::zone::{Zone, ZonePatch};

use crate::error::ApiError;
use crate::store::InMemoryController;

pub type Shared = Arc<InMemoryController>;

/// Build the sub-router mounted under the API prefix.
pub fn routes() -> Router<Shared> {
    Router::new()
        .route("/status", get(status))
        .route("/orders", get(orders))
        .route("/override", get(get_override).put(put_override))
        .route("/zones", get(zones))
        .route("/zones/{id}", get(zone).patch(patch_zone))
        .route("/plannings", get(plannings).post(create_planning))
        .route(
            "/plannings/{id}",
            get(planning)
                .patch(rename_planning)
                .delete(delete_planning),
        )
        .route("/plannings/{id}/slots", get(slots).post(create_slot))
        .route(
            "/plannings/{id}/slots/{slot}",
            patch(patch_slot).put(patch_slot).delete(delete_slot),
        )
        .route("/accounts", get(accounts).post(create_account))
        .route(
            "/accounts/{id}",
            patch(reset_password).delete(delete_account),
        )
        .route("/upgrade", post(upload_firmware))
        .route("/certificate", post(upload_certificate))
        .route("/reboot", get(reboot))
        .route("/hardware", get(hardware).post(apply_hardware))
        .route("/hardware/{id}/parameters", get(hardware_parameters))
}

pub async fn status(State(controller): State<Shared>) -> Result<Json<Status>, ApiError> {
    Ok(Json(controller.get_status().await?))
}

pub async fn orders(State(controller): State<Shared>) -> Result<Json<Value>, ApiError> {
    let orders = controller.get_orders().await?;
    Ok(Json(json!({ "orders": orders })))
}

pub async fn get_override(
    State(controller): State<Shared>,
) -> Result<Json<OverrideBody>, ApiError> {
    let value = controller.get_override().await?;
    Ok(Json(OverrideBody { value }))
}

pub async fn put_override(
    State(controller): State<Shared>,
    Json(body): Json<OverrideBody>,
) -> Result<StatusCode, ApiError> {
    controller.put_override(body.value).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn zones(State(controller): State<Shared>) -> Result<Json<Value>, ApiError> {
    let zones = controller.get_zones().await?;
    Ok(Json(json!({ "zones": zones })))
}

pub async fn zone(
    State(controller): State<Shared>,
    Path(id): Path<ZoneId>,
) -> Result<Json<Zone>, ApiError> {
    let zone = controller
        .get_zones()
        .await?
        .into_iter()
        .find(|zone| zone.id == id)
        .ok_or_else(|| {
            OfpError::from(NotFoundError {
                entity: "Zone",
                id: id.to_string(),
            })
        })?;
    Ok(Json(zone))
}

pub async fn patch_zone(
    State(controller): State<Shared>,
    Path(id): Path<ZoneId>,
    Json(patch): Json<ZonePatch>,
) -> Result<StatusCode, ApiError> {
    controller.patch_zone(id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn plannings(State(controller): State<Shared>) -> Result<Json<Value>, ApiError> {
    let plannings = controller.get_plannings().await?;
    Ok(Json(json!({ "plannings": plannings })))
}

pub async fn create_planning(
    State(controller): State<Shared>,
    Json(name): Json<PlanningName>,
) -> Result<(StatusCode, Json<Planning>), ApiError> {
    let planning = controller.add_planning(name)?;
    Ok((StatusCode::CREATED, Json(planning)))
}

/// `GET /plannings/{id}`: the planning with its slots.
pub async fn planning(
    State(controller): State<Shared>,
    Path(id): Path<PlanningId>,
) -> Result<Json<Value>, ApiError> {
    let slots = controller.get_planning_slots(id).await?;
    let name = controller
        .get_plannings()
        .await?
        .into_iter()
        .find(|p| p.id == id)
        .map(|p| p.name)
        .unwrap_or_default();
    Ok(Json(json!({ "id": id, "name": name, "slots": slots })))
}

pub async fn rename_planning(
    State(controller): State<Shared>,
    Path(id): Path<PlanningId>,
    Json(name): Json<PlanningName>,
) -> Result<StatusCode, ApiError> {
    controller.rename_planning(id, name).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_planning(
    State(controller): State<Shared>,
    Path(id): Path<PlanningId>,
) -> Result<StatusCode, ApiError> {
    controller.delete_planning(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn slots(
    State(controller): State<Shared>,
    Path(id): Path<PlanningId>,
) -> Result<Json<Value>, ApiError> {
    let slots = controller.get_planning_slots(id).await?;
    Ok(Json(json!({ "slots": slots })))
}

pub async fn create_slot(
    State(controller): State<Shared>,
    Path(id): Path<PlanningId>,
    Json(slot): Json<NewSlot>,
) -> Result<(StatusCode, Json<Slot>), ApiError> {
    let slot = controller.add_slot(id, slot)?;
    Ok((StatusCode::CREATED, Json(slot)))
}

pub async fn patch_slot(
    State(controller): State<Shared>,
    Path((id, slot)): Path<(PlanningId, SlotId)>,
    Json(patch): Json<SlotPatch>,
) -> Result<StatusCode, ApiError> {
    controller.patch_slot(id, slot, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_slot(
    State(controller): State<Shared>,
    Path((id, slot)): Path<(PlanningId, SlotId)>,
) -> Result<StatusCode, ApiError> {
    controller.delete_slot(id, slot).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn accounts(State(controller): State<Shared>) -> Result<Json<Value>, ApiError> {
    let accounts = controller.get_accounts().await?;
    Ok(Json(json!({ "accounts": accounts })))
}

pub async fn create_account(
    State(controller): State<Shared>,
    Json(account): Json<NewAccount>,
) -> Result<StatusCode, ApiError> {
    controller.create_account(account).await?;
    Ok(StatusCode::CREATED)
}

pub async fn delete_account(
    State(controller): State<Shared>,
    Path(id): Path<AccountId>,
) -> Result<StatusCode, ApiError> {
    controller.delete_account(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reset_password(
    State(controller): State<Shared>,
    Path(id): Path<AccountId>,
    Json(reset): Json<PasswordReset>,
) -> Result<StatusCode, ApiError> {
    controller.reset_password(id, reset).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn upload_firmware(
    State(controller): State<Shared>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    controller.upload_firmware(body.to_vec()).await?;
    Ok(StatusCode::OK)
}

pub async fn upload_certificate(
    State(controller): State<Shared>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    controller.upload_certificate(body.to_vec()).await?;
    Ok(StatusCode::OK)
}

pub async fn reboot(State(controller): State<Shared>) -> Result<Html<String>, ApiError> {
    Ok(Html(controller.reboot().await?))
}

pub async fn hardware(State(controller): State<Shared>) -> Result<Json<HardwareList>, ApiError> {
    Ok(Json(controller.get_hardware().await?))
}

/// `POST /hardware`: url-encoded `hardware` field plus one field per parameter.
pub async fn apply_hardware(
    State(controller): State<Shared>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<StatusCode, ApiError> {
    let hardware = fields
        .iter()
        .find(|(name, _)| name == HARDWARE_FIELD)
        .map(|(_, value)| HardwareId::new(value.trim()))
        .ok_or_else(|| {
            OfpError::from(ValidationError::InvalidParameterValue {
                id: HARDWARE_FIELD.to_string(),
                value: String::new(),
            })
        })?;
    let parameters = controller.get_hardware_parameters(hardware.clone()).await?;
    let settings =
        HardwareSettings::from_form(hardware, &fields, &parameters).map_err(OfpError::from)?;
    controller.apply_hardware(settings).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn hardware_parameters(
    State(controller): State<Shared>,
    Path(id): Path<HardwareId>,
) -> Result<Json<Value>, ApiError> {
    let parameters = controller.get_hardware_parameters(id).await?;
    Ok(Json(json!({ "parameters": parameters })))
}
