//! Order Error Types
//!
//! Order-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::ProductId;
use rust_decimal::Decimal;
use thiserror::Error;

pub type OrderResult<T> = Result<T, OrderError>;

#[derive(Debug, Error)]
pub enum OrderError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// A line item references a product that is not in the catalog
    #[error("Product not found: {0}")]
    UnknownProduct(ProductId),

    /// Client total disagrees with the computed one
    #[error("Total amount {provided} does not match order items ({expected})")]
    TotalMismatch { expected: Decimal, provided: Decimal },

    #[error("Order not found")]
    OrderNotFound,

    #[error("Product not found")]
    ProductNotFound,

    /// Delete refused because placed orders still reference the product
    #[error("Product is referenced by existing orders")]
    ProductInUse,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OrderError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::Validation(_)
            | OrderError::UnknownProduct(_)
            | OrderError::TotalMismatch { .. } => ErrorKind::BadRequest,
            OrderError::OrderNotFound | OrderError::ProductNotFound => ErrorKind::NotFound,
            OrderError::ProductInUse => ErrorKind::Conflict,
            OrderError::Database(_) | OrderError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Storage and internal details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            OrderError::Database(_) | OrderError::Internal(_) => AppError::internal("Server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            OrderError::Database(e) => {
                tracing::error!(error = %e, "Order database error");
            }
            OrderError::Internal(msg) => {
                tracing::error!(message = %msg, "Order internal error");
            }
            OrderError::TotalMismatch { expected, provided } => {
                tracing::warn!(%expected, %provided, "Order rejected: total mismatch");
            }
            _ => {
                tracing::debug!(error = %self, "Order error");
            }
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for OrderError {
    fn from(err: AppError) -> Self {
        if err.kind() == ErrorKind::BadRequest {
            OrderError::Validation(err.message().to_string())
        } else {
            OrderError::Internal(err.to_string())
        }
    }
}
