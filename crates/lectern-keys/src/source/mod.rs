//! Key material source implementations.

pub mod env;
pub mod http;
pub mod memory;

pub use env::EnvKeySource;
pub use http::HttpKeySource;
pub use memory::MemoryKeySource;
