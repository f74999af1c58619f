use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::data_structs::responses::status_response::StatusResponse;
use crate::database::DatabaseError;
use crate::jwt_auth::AuthError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Every way an enrollment request can fail. The `Display` text is the message sent
/// back to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authorization header is required")]
    MissingAuthorization,

    #[error("Invalid token")]
    InvalidToken,

    /// Admin token on a student route. Each route words the rejection its own way.
    #[error("{0}")]
    StudentsOnly(&'static str),

    #[error("Request body must be valid JSON")]
    MalformedBody,

    #[error("courseNo must contain 6 characters")]
    InvalidCourseNo,

    #[error("courseNo does not exist")]
    CourseNotFound,

    #[error("You are already enrolled in this course")]
    AlreadyEnrolled,

    #[error("You cannot drop from this course. You have not enrolled it yet!")]
    NotEnrolled,

    #[error("Internal server error")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingAuthorization | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::StudentsOnly(_) => StatusCode::FORBIDDEN,
            ApiError::MalformedBody
            | ApiError::InvalidCourseNo
            | ApiError::CourseNotFound
            | ApiError::AlreadyEnrolled => StatusCode::BAD_REQUEST,
            ApiError::NotEnrolled => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(reason) = self {
            log::error!("Internal error: {}", reason);
        }
        HttpResponse::build(self.status_code()).json(StatusResponse::failure(self.to_string()))
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingBearer => ApiError::MissingAuthorization,
            AuthError::InvalidKey => ApiError::Internal(e.to_string()),
            AuthError::Unverified(_)
            | AuthError::UnsupportedAlgorithm(_)
            | AuthError::OutsideValidityWindow => {
                log::debug!("Rejected bearer token: {}", e);
                ApiError::InvalidToken
            }
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::CourseNotFound(_) => ApiError::CourseNotFound,
            DatabaseError::AlreadyEnrolled { .. } => ApiError::AlreadyEnrolled,
            DatabaseError::NotEnrolled { .. } => ApiError::NotEnrolled,
            DatabaseError::DuplicateCourse(_) | DatabaseError::LockPoisoned => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}
