pub mod admin;
mod me;

pub use me::*;
