pub mod auth;
mod macros;
pub mod session;
pub mod user;
