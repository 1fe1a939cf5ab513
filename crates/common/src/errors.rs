use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::error_code::{lookup, ErrorCode};
use crate::validation::Violation;

/// Business error as it appears on the wire: a catalog code and its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("[{code}] {msg}")]
pub struct BizError {
    pub code: i32,
    pub msg: String,
}

impl BizError {
    pub fn new(code: ErrorCode) -> Self {
        Self { code: code.code(), msg: code.message().to_string() }
    }

    /// Raw integer codes resolve their message through the catalog.
    pub fn from_code(code: i32) -> Self {
        Self { code, msg: lookup(code).to_string() }
    }
}

impl From<ErrorCode> for BizError {
    fn from(code: ErrorCode) -> Self {
        Self::new(code)
    }
}

/// Every failure a request handler can produce.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("bind error: {0}")]
    Bind(String),
    #[error("validation failed with {} violation(s)", .0.len())]
    Validation(Vec<Violation>),
    #[error(transparent)]
    Business(#[from] BizError),
    #[error(transparent)]
    Unclassified(#[from] anyhow::Error),
}

impl AppError {
    /// Client-facing error. A `BizError` anywhere in an unclassified error's
    /// context chain is reported as-is; other causes are logged and replaced
    /// by `ServerError`.
    pub fn biz_error(&self) -> BizError {
        match self {
            AppError::Bind(_) | AppError::Validation(_) => BizError::new(ErrorCode::BadRequest),
            AppError::Business(e) => e.clone(),
            AppError::Unclassified(e) => match e.downcast_ref::<BizError>() {
                Some(biz) => biz.clone(),
                None => {
                    error!(error = %e, cause = ?e, "unclassified error mapped to server error");
                    BizError::new(ErrorCode::ServerError)
                }
            },
        }
    }
}
