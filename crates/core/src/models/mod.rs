//! Data models for RendyWS

mod account;
mod booking;
mod room;
mod session;
mod stats;

pub use account::*;
pub use booking::*;
pub use room::*;
pub use session::*;
pub use stats::*;
