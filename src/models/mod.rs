mod identity;

pub use identity::*;
