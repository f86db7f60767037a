//! Request handlers for the redirect HTTP surface.

pub mod health;
pub mod redirect;

pub use health::health_handler;
pub use redirect::{create_redirect_handler, redirect_handler};
