use crate::helpers::JsonResponse;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Rejections produced by the gate chain.
///
/// The `Display` text is what the caller sees in `message`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Unauthenticated: Missing or malformed credential")]
    MissingCredential,
    #[error("Unauthenticated: Signature verification failed")]
    InvalidSignature,
    #[error("Unauthenticated: Expired token")]
    ExpiredToken,
    #[error("Unauthenticated: Invalid token claims")]
    InvalidClaims,
    #[error("Forbidden: Permission denied")]
    PermissionDenied,
}

impl AuthError {
    /// Machine-readable outcome placed in the `status` field.
    pub fn status(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "forbidden",
            _ => "unauthorized",
        }
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let builder = JsonResponse::<()>::build().set_msg(self.to_string());
        match self {
            Self::PermissionDenied => builder.forbidden(),
            _ => builder.unauthorized(),
        }
    }
}
