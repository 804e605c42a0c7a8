//! Typed-error → HTTP response mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use gatherly_auth::AuthError;
use gatherly_events::EngineError;
use gatherly_registry::RegistryError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn auth_error_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::Unauthenticated => {
            json_error(StatusCode::UNAUTHORIZED, "unauthenticated", err.to_string())
        }
        AuthError::InvalidToken => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_token", err.to_string())
        }
        AuthError::Forbidden => json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string()),
        AuthError::Issuance => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "token_issuance",
            err.to_string(),
        ),
    }
}

pub fn registry_error_response(err: RegistryError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        RegistryError::Domain(_) => json_error(StatusCode::BAD_REQUEST, "validation_error", message),
        RegistryError::DuplicateEmail => {
            json_error(StatusCode::BAD_REQUEST, "duplicate_email", message)
        }
        RegistryError::InvalidRoleSkills => {
            json_error(StatusCode::BAD_REQUEST, "invalid_role_skills", message)
        }
        RegistryError::InvalidCredentials => {
            json_error(StatusCode::BAD_REQUEST, "invalid_credentials", message)
        }
        RegistryError::Forbidden => json_error(StatusCode::FORBIDDEN, "forbidden", message),
        RegistryError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", message),
        RegistryError::Credential(_) | RegistryError::Store(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", message)
        }
    }
}

pub fn engine_error_response(err: EngineError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        EngineError::Domain(_) => json_error(StatusCode::BAD_REQUEST, "validation_error", message),
        EngineError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", message),
        EngineError::Forbidden => json_error(StatusCode::FORBIDDEN, "forbidden", message),
        EngineError::AlreadyRegistered => {
            json_error(StatusCode::BAD_REQUEST, "already_registered", message)
        }
        EngineError::UnknownAttendee => {
            json_error(StatusCode::BAD_REQUEST, "unknown_attendee", message)
        }
        EngineError::Registry(inner) => registry_error_response(inner),
        EngineError::Store(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", message)
        }
    }
}
