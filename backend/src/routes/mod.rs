// Routes module - organizes all HTTP route handlers

pub mod roster;
pub mod votes;

use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;

use crate::models::ErrorResponse;

/// Build a JSON error response with the given status and message
pub fn error_body(status_code: Status, message: &str) -> status::Custom<Json<ErrorResponse>> {
    status::Custom(
        status_code,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

#[catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: "Bad request".to_string(),
    })
}

#[catch(401)]
pub fn unauthorized() -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: "Unauthorized".to_string(),
    })
}

#[catch(404)]
pub fn not_found() -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: "Not found".to_string(),
    })
}

#[catch(422)]
pub fn unprocessable_entity() -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: "Malformed JSON body".to_string(),
    })
}

#[catch(500)]
pub fn internal_server_error() -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: "Internal server error".to_string(),
    })
}
