//! Business error code catalog.
//!
//! Codes and messages are part of the client contract; never renumber an
//! existing entry. A new failure path needs its own entry here, otherwise
//! clients receive the generic unknown-error message.

use axum::http::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success,
    UnknownError,
    ServerError,
    SendImgVerificationCodeFail,
    SendEmailVerificationCodeFail,
    BadRequest,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 6] = [
        ErrorCode::Success,
        ErrorCode::UnknownError,
        ErrorCode::ServerError,
        ErrorCode::SendImgVerificationCodeFail,
        ErrorCode::SendEmailVerificationCodeFail,
        ErrorCode::BadRequest,
    ];

    pub const fn code(self) -> i32 {
        match self {
            ErrorCode::Success => 200,
            ErrorCode::UnknownError => 0,
            ErrorCode::ServerError => 10000,
            ErrorCode::SendImgVerificationCodeFail => 10001,
            ErrorCode::SendEmailVerificationCodeFail => 10002,
            ErrorCode::BadRequest => 20000,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            ErrorCode::Success => "请求成功",
            ErrorCode::UnknownError => "未知业务异常",
            ErrorCode::ServerError => "服务端异常",
            ErrorCode::SendImgVerificationCodeFail => "发送图形验证码失败",
            ErrorCode::SendEmailVerificationCodeFail => "发送邮箱验证码失败",
            ErrorCode::BadRequest => "错误请求",
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// HTTP status used when an envelope carrying this code is served.
    pub const fn status(self) -> StatusCode {
        match self {
            ErrorCode::Success => StatusCode::OK,
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::UnknownError
            | ErrorCode::ServerError
            | ErrorCode::SendImgVerificationCodeFail
            | ErrorCode::SendEmailVerificationCodeFail => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Message for `code`; anything outside the catalog maps to the unknown-error message.
pub fn lookup(code: i32) -> &'static str {
    ErrorCode::from_code(code)
        .unwrap_or(ErrorCode::UnknownError)
        .message()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_codes_are_fixed() {
        assert_eq!(ErrorCode::Success.code(), 200);
        assert_eq!(ErrorCode::UnknownError.code(), 0);
        assert_eq!(ErrorCode::ServerError.code(), 10000);
        assert_eq!(ErrorCode::SendImgVerificationCodeFail.code(), 10001);
        assert_eq!(ErrorCode::SendEmailVerificationCodeFail.code(), 10002);
        assert_eq!(ErrorCode::BadRequest.code(), 20000);
    }

    #[test]
    fn lookup_returns_declared_message_for_every_entry() {
        for code in ErrorCode::ALL {
            assert_eq!(lookup(code.code()), code.message());
            assert_eq!(ErrorCode::from_code(code.code()), Some(code));
        }
        assert_eq!(lookup(20000), "错误请求");
        assert_eq!(lookup(10002), "发送邮箱验证码失败");
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<i32> = ErrorCode::ALL.iter().map(|c| c.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn unknown_codes_fall_back() {
        for code in [-1, 1, 404, 10003, 20001, i32::MAX] {
            assert_eq!(lookup(code), "未知业务异常");
        }
        assert_eq!(lookup(ErrorCode::UnknownError.code()), "未知业务异常");
    }

    #[test]
    fn status_mapping() {
        assert_eq!(ErrorCode::BadRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::ServerError.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorCode::Success.status(), StatusCode::OK);
    }
}
