mod config;
mod middleware;

pub use config::{ProxyKeyConfig, DEFAULT_KEY_HEADER};
pub use middleware::ProxyKeyMiddleware;
