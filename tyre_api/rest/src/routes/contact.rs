use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde_json::Value;
use tracing::debug;
use tyre_core_contact_contracts::{ContactFeatureService, ContactSubmitError};

use super::{error, internal_server_error};
use crate::models::contact::{ApiContactRequest, ApiContactResponse};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(submit))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(body)) => ApiContactRequest::from_json(&body),
        // a body that is not declared as json carries no fields
        Err(JsonRejection::MissingJsonContentType(_)) => ApiContactRequest::default(),
        Err(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            debug!("rejected contact request: {err}");
            return error(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large.");
        }
        Err(err) => return internal_server_error(err),
    };

    match service.submit(request.into()).await {
        Ok(result) => Json(ApiContactResponse::from(result)).into_response(),
        Err(ContactSubmitError::InvalidName) => {
            error(StatusCode::BAD_REQUEST, "Name is required.")
        }
        Err(ContactSubmitError::InvalidMobile) => {
            error(StatusCode::BAD_REQUEST, "Mobile number is required.")
        }
        Err(ContactSubmitError::InvalidEmail) => {
            error(StatusCode::BAD_REQUEST, "Valid email is required.")
        }
        Err(ContactSubmitError::InvalidMessage) => {
            error(StatusCode::BAD_REQUEST, "Message is required.")
        }
        Err(ContactSubmitError::Other(err)) => internal_server_error(err),
    }
}
