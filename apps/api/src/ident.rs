//! Caller identity, carried by the `X-User-Id` request header.
//!
//! There is no session or token layer; upstream infrastructure is trusted to
//! set the header. Handlers that need to know who is calling take a
//! `UserId` extractor argument.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// The authenticated user id for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

#[axum::async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok());
        parse_user_id(raw).map(UserId)
    }
}

fn parse_user_id(raw: Option<&str>) -> Result<i64, AppError> {
    let raw = raw
        .ok_or_else(|| AppError::Validation(format!("{USER_ID_HEADER} header is required")))?;
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::Validation(format!("{USER_ID_HEADER} must be a numeric user id")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_numeric_id() {
        assert_eq!(parse_user_id(Some("42")).unwrap(), 42);
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(parse_user_id(Some(" 7 ")).unwrap(), 7);
    }

    #[test]
    fn test_missing_header_rejected() {
        assert!(matches!(
            parse_user_id(None),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_non_numeric_rejected() {
        assert!(matches!(
            parse_user_id(Some("alice")),
            Err(AppError::Validation(_))
        ));
    }
}
