use crate::helpers::JsonResponse;
use crate::models::{IdentityContext, IdentityView};
use actix_web::{get, Responder, Result};

#[tracing::instrument(name = "Get current identity.", skip_all, fields(subject = %identity.subject()))]
#[get("/me")]
pub async fn me_handler(identity: IdentityContext) -> Result<impl Responder> {
    Ok(JsonResponse::build()
        .set_item(IdentityView::from(&identity))
        .ok("OK"))
}
