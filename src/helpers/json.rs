use actix_web::{http::StatusCode, web, HttpResponse};
use serde::Serialize;

/// Envelope shared by every JSON answer of the service.
///
/// `status` is the machine-readable outcome (`ok`, `unauthorized`,
/// `forbidden`), `message` the human-readable reason.
#[derive(Debug, Serialize)]
pub struct JsonResponse<T> {
    pub status: String,
    pub message: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
}

pub struct JsonResponseBuilder<T> {
    message: String,
    item: Option<T>,
}

impl<T> Default for JsonResponseBuilder<T> {
    fn default() -> Self {
        Self {
            message: String::new(),
            item: None,
        }
    }
}

impl<T> JsonResponse<T>
where
    T: Serialize,
{
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: Serialize,
{
    pub fn set_msg<I: Into<String>>(mut self, msg: I) -> Self {
        self.message = msg.into();
        self
    }

    pub fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    fn into_response(self, status: &str, code: StatusCode, default_msg: &str) -> JsonResponse<T> {
        let message = if self.message.trim().is_empty() {
            default_msg.to_string()
        } else {
            self.message
        };

        JsonResponse {
            status: status.to_string(),
            message,
            code: code.as_u16(),
            item: self.item,
        }
    }

    pub fn ok<I: Into<String>>(self, msg: I) -> web::Json<JsonResponse<T>> {
        web::Json(self.set_msg(msg).into_response("ok", StatusCode::OK, "OK"))
    }

    pub fn unauthorized(self) -> HttpResponse {
        let body = self.into_response("unauthorized", StatusCode::UNAUTHORIZED, "Unauthorized");
        HttpResponse::Unauthorized().json(body)
    }

    pub fn forbidden(self) -> HttpResponse {
        let body = self.into_response("forbidden", StatusCode::FORBIDDEN, "Forbidden");
        HttpResponse::Forbidden().json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn unauthorized_envelope_carries_status_and_message() {
        let response = JsonResponse::<()>::build()
            .set_msg("Unauthenticated: Expired token")
            .unauthorized();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = to_bytes(response.into_body()).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(json["status"], "unauthorized");
        assert_eq!(json["code"], 401);
        assert_eq!(json["message"], "Unauthenticated: Expired token");
        assert!(json.get("item").is_none());
    }

    #[test]
    fn empty_message_falls_back_to_default() {
        let web::Json(body) = JsonResponse::<u8>::build().set_item(7).ok("");
        assert_eq!(body.status, "ok");
        assert_eq!(body.message, "OK");
        assert_eq!(body.item, Some(7));
    }
}
