//! Services for the launch flow.

pub mod redirect;

pub use redirect::{LoginRedirect, LoginRedirectService};
