use crate::configuration::Settings;
use crate::middleware::{AdminGate, TokenGate};
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn run(listener: TcpListener, settings: Settings) -> Result<Server, std::io::Error> {
    // Both gates are built once and cloned into every worker
    let token_gate = TokenGate::new(&settings.auth);
    let admin_gate = AdminGate::new(settings.auth.privileged_identity.clone());

    tracing::info!(
        algorithm = ?settings.auth.algorithm,
        privileged_identity = %settings.auth.privileged_identity,
        "Authentication gates configured"
    );

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(
                web::scope("/cms")
                    .wrap(token_gate.clone())
                    .service(routes::cms::me_handler)
                    .service(
                        web::scope("/admin")
                            .wrap(admin_gate.clone())
                            .service(routes::cms::admin::status_handler),
                    ),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
