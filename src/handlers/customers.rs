use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::database::{Customer, CustomerPayload};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::router::AppState;

fn customer_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| ApiError::validation_error(format!("invalid customer id: {}", e.body_text())))
}

// The body is parsed as JSON whatever the Content-Type says.
fn payload(body: Result<Bytes, BytesRejection>) -> Result<CustomerPayload, ApiError> {
    let bytes = body.map_err(|e| ApiError::validation_error(e.body_text()))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::validation_error(format!("invalid customer body: {}", e)))
}

/// POST /customers - Create a customer
pub async fn create(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Customer> {
    let payload = payload(body)?;
    let customer = state.store.insert(payload).await?;
    info!(id = customer.id, "created customer");
    Ok(ApiResponse::created(customer))
}

/// GET /customers/:id - Show a single customer
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Customer> {
    let id = customer_id(path)?;
    let customer = state.store.get_by_id(id).await?;
    Ok(ApiResponse::success(customer))
}

/// GET /customers - List every customer
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Customer>> {
    let customers = state.store.get_all().await?;
    debug!(count = customers.len(), "listed customers");
    Ok(ApiResponse::success(customers))
}

/// PUT /customers/:id - Write the supplied fields over the stored customer
///
/// The existing row is looked up before the body is inspected, so a missing id
/// answers 404 even when the body is malformed. Fields absent from the body, or
/// sent as `null`, keep their stored values.
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Customer> {
    let id = customer_id(path)?;
    let existing = state.store.get_by_id(id).await?;

    let payload = payload(body)?.merged_over(&existing);
    let customer = state.store.update(id, payload).await?;
    info!(id, "updated customer");
    Ok(ApiResponse::success(customer))
}

/// DELETE /customers/:id - Remove a customer; succeeds whether or not it existed
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Value> {
    let id = customer_id(path)?;
    state.store.delete(id).await?;
    info!(id, "deleted customer");
    Ok(ApiResponse::success(json!({ "message": "customer deleted" })))
}
