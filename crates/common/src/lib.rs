//! Cross-cutting pieces shared by every endpoint: the error code catalog,
//! the request error taxonomy, table-driven validation and the response
//! envelope.

pub mod error_code;
pub mod errors;
pub mod result;
pub mod types;
pub mod utils;
pub mod validation;

pub use error_code::{lookup, ErrorCode};
pub use errors::{AppError, BizError};
pub use result::ApiResult;
pub use validation::{validate, FieldRules, Rule, Validate, Violation};

