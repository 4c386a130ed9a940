//! src/routes/mod.rs

pub mod badge;
pub mod health;
pub mod home;
pub mod invite;
pub mod vars;

pub use badge::*;
pub use health::*;
pub use home::*;
pub use invite::*;
pub use vars::*;
