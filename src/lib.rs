//! paramware-server
//!
//! 演示如何把类型化查询参数中间件装配进 axum 路由，
//! 并负责配置加载与日志初始化。

pub mod config;
pub mod logging;
pub mod routes;

pub use config::{ConfigError, ServerConfig};
pub use routes::{router, ItemsQuery, SortOrder};
