//! 路径参数提取器
//!
//! 非法 ID 在进入 handler 之前即返回 400，响应体与其他错误保持一致。

use std::future::{Ready, ready};

use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload};

use crate::models::{ApiResponse, ErrorCode};

/// 路径中的 `{id}`，必须是正整数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeIDI64(pub i64);

impl SafeIDI64 {
    pub fn parse(raw: &str) -> Option<i64> {
        raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
    }
}

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("id").unwrap_or_default();
        let result = match Self::parse(raw) {
            Some(id) => Ok(SafeIDI64(id)),
            None => {
                let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    format!("Invalid id in path: '{raw}'"),
                ));
                Err(InternalError::from_response("invalid path id", response).into())
            }
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_positive_ids_only() {
        assert_eq!(SafeIDI64::parse("42"), Some(42));
        assert_eq!(SafeIDI64::parse(" 7 "), Some(7));
        assert_eq!(SafeIDI64::parse("0"), None);
        assert_eq!(SafeIDI64::parse("-3"), None);
        assert_eq!(SafeIDI64::parse("abc"), None);
        assert_eq!(SafeIDI64::parse(""), None);
    }
}
