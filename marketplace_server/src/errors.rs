use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use log::{debug, error};
use marketplace_engine::MarketplaceError;
use thiserror::Error;

/// Everything that can go wrong while serving a request.
///
/// Responses never carry the error text. Clients only see the status code; the details go to the log.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Could not read request path: {0}")]
    InvalidRequestPath(String),
    #[error("Invalid request parameters: {0}")]
    InvalidQuery(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Caller could not be identified. {0}")]
    Unauthorized(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("Operation not permitted. {0}")]
    Forbidden(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("💻️ {status}: {self}");
        } else {
            debug!("💻️ {status}: {self}");
        }
        HttpResponse::build(status).finish()
    }
}

impl From<MarketplaceError> for ServerError {
    fn from(e: MarketplaceError) -> Self {
        match e {
            MarketplaceError::DatabaseError(_) | MarketplaceError::PaymentAborted(_) => {
                Self::BackendError(e.to_string())
            },
            MarketplaceError::ProfileNotFound(_) | MarketplaceError::JobNotFound(_) => {
                Self::NoRecordFound(e.to_string())
            },
            MarketplaceError::NotAClient(_)
            | MarketplaceError::InsufficientFunds { .. }
            | MarketplaceError::JobAlreadyPaid(_)
            | MarketplaceError::NoOutstandingJobs(_)
            | MarketplaceError::DepositLimitExceeded { .. } => Self::Forbidden(e.to_string()),
            MarketplaceError::InvalidAmount(_) | MarketplaceError::InvalidQuery(_) => Self::InvalidQuery(e.to_string()),
        }
    }
}
