pub mod configuration;
mod helpers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod session;
pub mod startup;
pub mod telemetry;
