use crate::{status::LeadId, store::UpdateStatusError};
use lead_status_http::{
    http::{header::ALLOW, HeaderValue, Method},
    Body, IntoResponse, Response, StatusCode,
};
use serde_json::json;

/// Everything that can stop a status update from going through.
///
/// Each variant maps to a distinct HTTP status and a fixed message that is
/// safe to show to callers. The underlying cause, when there is one, is only
/// available as the error's source, for logging.
#[derive(Debug, thiserror::Error)]
pub enum UpdateLeadError {
    #[error("`{0}` is not supported on a lead")]
    MethodNotAllowed(Method),
    #[error("the request body is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),
    #[error("the request body does not carry a valid lead status")]
    InvalidStatus,
    #[error("there is no lead with id `{0}`")]
    NotFound(LeadId),
    #[error("failed to update the lead in storage")]
    Storage(#[source] sqlx::Error),
}

impl UpdateLeadError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UpdateLeadError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            UpdateLeadError::InvalidJson(_) | UpdateLeadError::InvalidStatus => StatusCode::BAD_REQUEST,
            UpdateLeadError::NotFound(_) => StatusCode::NOT_FOUND,
            UpdateLeadError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message returned to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            UpdateLeadError::MethodNotAllowed(_) => "Method not allowed.",
            UpdateLeadError::InvalidJson(_) => "Invalid JSON payload.",
            UpdateLeadError::InvalidStatus => "Invalid status. Must be: new, contacted, or closed.",
            UpdateLeadError::NotFound(_) => "Lead not found.",
            UpdateLeadError::Storage(_) => "Unable to update lead.",
        }
    }
}

impl From<UpdateStatusError> for UpdateLeadError {
    fn from(e: UpdateStatusError) -> Self {
        match e {
            UpdateStatusError::UnknownId { id } => UpdateLeadError::NotFound(id),
            UpdateStatusError::Other(e) => UpdateLeadError::Storage(e),
        }
    }
}

impl IntoResponse for UpdateLeadError {
    fn into_response(self) -> Response<Body> {
        let mut response = (self.status_code(), json!({ "message": self.public_message() })).into_response();
        if let UpdateLeadError::MethodNotAllowed(_) = self {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static("PATCH"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::UpdateLeadError;
    use crate::{status::LeadId, store::UpdateStatusError};
    use lead_status_http::StatusCode;
    use std::error::Error as _;

    #[test]
    fn every_kind_of_failure_has_its_own_status() {
        let errors = vec![
            UpdateLeadError::MethodNotAllowed(lead_status_http::http::Method::GET),
            UpdateLeadError::InvalidStatus,
            UpdateLeadError::NotFound(LeadId::from("1")),
            UpdateLeadError::Storage(sqlx::Error::PoolTimedOut),
        ];
        let statuses: Vec<StatusCode> = errors.iter().map(UpdateLeadError::status_code).collect();
        assert_eq!(
            statuses,
            vec![
                StatusCode::METHOD_NOT_ALLOWED,
                StatusCode::BAD_REQUEST,
                StatusCode::NOT_FOUND,
                StatusCode::INTERNAL_SERVER_ERROR,
            ]
        );
    }

    #[test]
    fn storage_errors_keep_their_cause_out_of_the_message() {
        let err = UpdateLeadError::from(UpdateStatusError::Other(sqlx::Error::PoolTimedOut));
        assert_eq!(err.public_message(), "Unable to update lead.");
        assert!(err.source().is_some());
    }

    #[test]
    fn unknown_ids_become_not_found() {
        let err = UpdateLeadError::from(UpdateStatusError::UnknownId { id: LeadId::from("999") });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "there is no lead with id `999`");
    }
}
