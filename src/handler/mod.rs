//! Request handler module
//!
//! - `router`: method check, mount-path matching, redirect dispatch
//! - `help`: usage page served at the service root

mod help;
pub mod router;

pub use router::handle_request;
