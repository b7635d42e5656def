//! Request and response types for the launch API.

pub mod login;

pub use login::{FieldMap, LoginParams, ParamSource};
