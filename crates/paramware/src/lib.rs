//! paramware - 类型化查询参数中间件
//!
//! 从请求 URL 的查询串中提取类型化参数，缺失时写入默认值，
//! 解析失败时以 400 中止请求。解析结果写入请求级的 [`RequestContext`]，
//! 供后续处理器读取。
//!
//! ## 模块结构
//!
//! - `query` - 查询串解码（key -> 多值）
//! - `context` - 请求上下文（类型擦除的键值存储 + 错误列表）
//! - `handler` - 通用参数提取器与常用特化（int64 / string / bool）
//! - `parsers` - 内置解析函数
//! - `layer` - tower `Layer` / `Service` 集成
//! - `options` - 提取器配置

mod context;
mod error;
mod handler;
mod layer;
mod options;
pub mod parsers;
mod query;

// 重新导出
pub use context::RequestContext;
pub use error::{ErrorBody, ParamError};
pub use handler::{bool_param, int64_param, make_param_handler, string_param, ParamHandler};
pub use layer::{ParamLayer, ParamService};
pub use options::{DuplicatePolicy, ParamOptions};
pub use query::QueryParams;
