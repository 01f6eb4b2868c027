//! HTTP error bodies
//!
//! Learner routes answer failures with a lesson; admin routes answer
//! `{"error": "Unauthorized"}`. Anything else falls back to the generic
//! `AppError` body.

use crate::lessons::Lesson;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use apitutor_core::AppError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Failure explained by a lesson, sent with the error's status
    #[error("{error}")]
    Lesson { error: AppError, lesson: Box<Lesson> },

    /// Failure on an admin route
    #[error("{0}")]
    Admin(AppError),

    #[error(transparent)]
    App(#[from] AppError),
}

impl ApiError {
    pub fn lesson(error: AppError, lesson: Lesson) -> Self {
        ApiError::Lesson {
            error,
            lesson: Box::new(lesson),
        }
    }

    pub fn app_error(&self) -> &AppError {
        match self {
            ApiError::Lesson { error, .. } | ApiError::Admin(error) | ApiError::App(error) => error,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.app_error().status_code()
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Lesson { error, lesson } => {
                HttpResponse::build(error.status_code()).json(lesson.as_ref())
            }
            ApiError::Admin(AppError::Unauthorized(_)) => {
                HttpResponse::Unauthorized().json(json!({ "error": "Unauthorized" }))
            }
            ApiError::Admin(error) | ApiError::App(error) => error.error_response(),
        }
    }
}
