pub mod cms;
pub mod health_checks;

pub use health_checks::*;
