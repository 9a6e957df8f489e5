//! Client-side session lifecycle for the CMS dashboard.
//!
//! Nothing in here is authoritative. The watchdog enforces the inactivity
//! boundary and the navigation renderer only peeks at claims to decide what
//! to show; every access decision is made by the server gates.

mod claims;
mod events;
mod host;
mod navigation;
mod settings;
mod store;
mod watchdog;

pub use claims::*;
pub use events::*;
pub use host::*;
pub use navigation::*;
pub use settings::*;
pub use store::*;
pub use watchdog::*;
