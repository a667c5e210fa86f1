//! Common utilities and types shared across zkstat

pub mod config;
pub mod error;
pub mod response;
pub mod tracing_middleware;

pub use config::{Config, ServerConfig, ZookeeperConfig};
pub use error::{Error, Result, CODE_SUCCESS};
pub use response::ApiResponse;
pub use tracing_middleware::{request_tracing_middleware, REQUEST_ID_HEADER};
