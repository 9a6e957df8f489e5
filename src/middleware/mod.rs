pub mod authentication;
pub mod authorization;
mod errors;

pub use authentication::TokenGate;
pub use authorization::AdminGate;
pub use errors::AuthError;
