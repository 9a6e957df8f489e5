use crate::helpers::JsonResponse;
use crate::models::{IdentityContext, IdentityView};
use actix_web::{get, Responder, Result};

/// Probe for the privileged scope; reaching it means both gates passed.
#[tracing::instrument(name = "Admin status.", skip_all, fields(subject = %identity.subject()))]
#[get("/status")]
pub async fn status_handler(identity: IdentityContext) -> Result<impl Responder> {
    Ok(JsonResponse::build()
        .set_item(IdentityView::from(&identity))
        .ok("ok"))
}
