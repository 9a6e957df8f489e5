use actix_web::{dev::ServiceRequest, http::header::HeaderName};
use std::str::FromStr;

pub fn get_header<T>(req: &ServiceRequest, header_name: &'static str) -> Result<Option<T>, String>
where
    T: FromStr,
{
    let header_value = match req.headers().get(HeaderName::from_static(header_name)) {
        Some(value) => value,
        None => return Ok(None),
    };

    header_value
        .to_str()
        .map_err(|_| format!("header {header_name} can't be converted to string"))?
        .parse::<T>()
        .map_err(|_| format!("header {header_name} has wrong type"))
        .map(Some)
}

/// Splits `<scheme> <token>` and returns the token of a `Bearer` credential.
pub fn extract_bearer_token(authorization: &str) -> Result<&str, String> {
    let mut parts = authorization.split_whitespace();
    let (scheme, token) = match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) => (scheme, token),
        _ => return Err("Invalid Authorization header format".to_string()),
    };
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err("Expected Bearer scheme in Authorization header".to_string());
    }
    Ok(token)
}
