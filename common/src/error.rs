use actix_web::HttpResponse;
use thiserror::Error;

use crate::supabase::RestError;

pub type Res<T> = std::result::Result<T, AppError>;

/// Postgres SQLSTATE for `undefined_table`.
const PG_UNDEFINED_TABLE: &str = "42P01";
/// Postgres SQLSTATE for `undefined_function`.
const PG_UNDEFINED_FUNCTION: &str = "42883";

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Supabase error: {0}")]
    Rest(#[from] RestError),

    // === APPLICATION ERRORS ===
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// True when the database reported that the relation does not exist.
    pub fn is_undefined_table(&self) -> bool {
        match self {
            AppError::Database(error) => sqlstate(error).is_some_and(|c| c == PG_UNDEFINED_TABLE),
            AppError::Rest(error) => error.is_undefined_table(),
            AppError::Internal(_) => false,
        }
    }

    /// True when the called database function is not installed.
    pub fn is_undefined_function(&self) -> bool {
        match self {
            AppError::Database(error) => {
                sqlstate(error).is_some_and(|c| c == PG_UNDEFINED_FUNCTION)
            }
            AppError::Rest(error) => error.is_undefined_function(),
            AppError::Internal(_) => false,
        }
    }

    pub fn to_http_response(&self) -> HttpResponse {
        let is_dev = cfg!(debug_assertions);

        let to_internal_json = |err_msg: &str| {
            if is_dev {
                serde_json::json!({ "error": err_msg })
            } else {
                serde_json::json!({ "error": "Internal server error" })
            }
        };

        match self {
            // === CONVERSION ERRORS ===
            AppError::Database(error) => {
                log::error!("Database error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
            AppError::Rest(error) => {
                log::error!("Supabase error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }

            // === APPLICATION ERRORS ===
            AppError::Internal(error) => {
                log::error!("Internal error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(error))
            }
        }
    }
}

fn sqlstate(error: &sqlx::Error) -> Option<String> {
    error
        .as_database_error()
        .and_then(|db_error| db_error.code())
        .map(|code| code.into_owned())
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}
