//! The lead status endpoint: `PATCH /api/leads/{id}` with a JSON body such as
//! `{"status":"contacted"}`.
use crate::{
    error::UpdateLeadError,
    status::{LeadId, LeadStatus},
    store::LeadStore,
};
use lead_status_http::{http::Method, Body, IntoResponse, Request, RequestExt, Response, StatusCode};
use serde_json::{json, Value};

/// Apply the status update described by `request` to the lead it names.
///
/// Every outcome, success or failure, is turned into a JSON response here;
/// nothing is retried and nothing propagates to the caller as an error.
pub async fn update_lead_status<S>(store: &S, request: Request) -> Response<Body>
where
    S: LeadStore + ?Sized,
{
    match try_update_lead_status(store, &request).await {
        Ok(()) => (StatusCode::OK, json!({ "ok": true })).into_response(),
        Err(e) => {
            log_rejection(&e);
            e.into_response()
        }
    }
}

async fn try_update_lead_status<S>(store: &S, request: &Request) -> Result<(), UpdateLeadError>
where
    S: LeadStore + ?Sized,
{
    if request.method() != Method::PATCH {
        return Err(UpdateLeadError::MethodNotAllowed(request.method().clone()));
    }
    let status = parse_status_update(body_bytes(request.body()))?;
    let id = lead_id(request);
    store.update_status(&id, status).await?;
    tracing::info!(lead.id = %id, lead.status = %status, "Updated lead status");
    Ok(())
}

/// Extract the requested status from a raw request body.
///
/// The body must be a JSON object whose `status` field is one of the known
/// status names. A missing field, `null`, a non-string value and an unknown
/// name are all rejected the same way.
pub fn parse_status_update(body: &[u8]) -> Result<LeadStatus, UpdateLeadError> {
    let payload: Value = serde_json::from_slice(body).map_err(UpdateLeadError::InvalidJson)?;
    payload
        .get("status")
        .and_then(Value::as_str)
        .and_then(|status| status.parse().ok())
        .ok_or(UpdateLeadError::InvalidStatus)
}

/// The `id` path parameter, or the last path segment when the event carries
/// no path parameters (ALB targets).
fn lead_id(request: &Request) -> LeadId {
    request
        .path_parameter("id")
        .or_else(|| request.uri().path().rsplit('/').find(|segment| !segment.is_empty()))
        .map(LeadId::from)
        .unwrap_or_default()
}

fn body_bytes(body: &Body) -> &[u8] {
    match body {
        Body::Empty => &[],
        Body::Text(text) => text.as_bytes(),
        Body::Binary(bytes) => bytes.as_slice(),
    }
}

fn log_rejection(e: &UpdateLeadError) {
    match e {
        UpdateLeadError::Storage(source) => tracing::error!(
            error.message = %e,
            error.details = ?source,
            "Failed to update lead status"
        ),
        UpdateLeadError::NotFound(id) => tracing::info!(lead.id = %id, "No lead to update"),
        _ => tracing::info!(error.message = %e, "Rejected lead status update"),
    }
}
