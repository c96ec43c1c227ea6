//! Data models for presence requests and responses

mod expiry;
mod location;
mod presence;
mod status;

pub use expiry::*;
pub use location::*;
pub use presence::*;
pub use status::*;
