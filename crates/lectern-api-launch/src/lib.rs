//! LTI 1.3 Advantage tool-side launch API for lectern.
//!
//! This crate provides the trust-establishment surface between the tool
//! and the launching platform:
//! - OIDC third-party-initiated login normalization (form or query
//!   binding, resolved from the content type)
//! - Authentication request construction back to the platform
//! - Public key export endpoint (PEM `SubjectPublicKeyInfo`)

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use config::LaunchConfig;
pub use error::{ErrorResponse, LaunchError, LaunchResult};
pub use extractors::LoginInitiation;
pub use models::{FieldMap, LoginParams, ParamSource};
pub use router::{launch_router, LaunchState};
pub use services::{LoginRedirect, LoginRedirectService};
