//! HTTP handlers for the launch API.

pub mod keys;
pub mod login;

pub use keys::public_key;
pub use login::{login_get, login_post};
