//! 通用参数提取器
//!
//! 由 `(参数名, 默认值, 类型标签, 解析函数)` 构造，构造后不可变，
//! 可在任意数量的并发请求间共享。每次调用只依赖查询串与构造参数，
//! 不保留跨请求状态。

use std::fmt;
use std::sync::Arc;

use crate::context::RequestContext;
use crate::error::ParamError;
use crate::layer::ParamLayer;
use crate::options::{DuplicatePolicy, ParamOptions};
use crate::parsers;
use crate::query::QueryParams;

type ParseFn<T> = dyn Fn(&str) -> Result<T, String> + Send + Sync;

struct ParamSpec<T> {
    name: String,
    default: T,
    type_name: &'static str,
    parse: Box<ParseFn<T>>,
}

/// 参数提取器
pub struct ParamHandler<T> {
    spec: Arc<ParamSpec<T>>,
    options: ParamOptions,
}

impl<T> Clone for ParamHandler<T> {
    fn clone(&self) -> Self {
        Self {
            spec: Arc::clone(&self.spec),
            options: self.options,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ParamHandler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamHandler")
            .field("name", &self.spec.name)
            .field("type_name", &self.spec.type_name)
            .field("default", &self.spec.default)
            .field("options", &self.options)
            .finish()
    }
}

impl<T> ParamHandler<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// 构造提取器，参数名为空时返回 `ParamError::EmptyName`
    pub fn try_new<F, E>(
        name: impl Into<String>,
        default: T,
        type_name: &'static str,
        parse: F,
    ) -> Result<Self, ParamError>
    where
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(ParamError::EmptyName);
        }

        Ok(Self {
            spec: Arc::new(ParamSpec {
                name,
                default,
                type_name,
                parse: Box::new(move |raw| parse(raw).map_err(|e| e.to_string())),
            }),
            options: ParamOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ParamOptions) -> Self {
        self.options = options;
        self
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn type_name(&self) -> &'static str {
        self.spec.type_name
    }

    pub fn default_value(&self) -> &T {
        &self.spec.default
    }

    pub fn options(&self) -> ParamOptions {
        self.options
    }

    /// 从查询串提取值，不修改任何上下文
    ///
    /// - 缺失：返回默认值，不调用解析函数
    /// - 存在：解析第一个值（`DuplicatePolicy::Reject` 时多值直接拒绝）
    pub fn extract(&self, query: &QueryParams) -> Result<T, ParamError> {
        let spec = &self.spec;
        let values = query.get_all(&spec.name);

        let Some(raw) = values.first() else {
            tracing::trace!(param = %spec.name, "查询参数缺失，使用默认值");
            return Ok(spec.default.clone());
        };

        if values.len() > 1 && self.options.duplicates == DuplicatePolicy::Reject {
            tracing::debug!(param = %spec.name, count = values.len(), "拒绝重复的查询参数");
            return Err(ParamError::Duplicate {
                name: spec.name.clone(),
            });
        }

        (spec.parse)(raw.as_str()).map_err(|reason| {
            tracing::debug!(
                param = %spec.name,
                value = %raw,
                %reason,
                "查询参数解析失败"
            );
            ParamError::Malformed {
                type_name: spec.type_name,
                name: spec.name.clone(),
            }
        })
    }

    /// 处理一个请求：成功或缺失时写入上下文，解析失败时以 400 中止
    ///
    /// 上下文已被中止时不做任何事。
    pub fn handle(&self, query: &QueryParams, ctx: &mut RequestContext) {
        if ctx.is_aborted() {
            return;
        }

        match self.extract(query) {
            Ok(value) => ctx.set(self.spec.name.clone(), value),
            Err(error) => ctx.abort_with_error(error.status(), error),
        }
    }

    /// 转换为 tower `Layer`
    pub fn layer(&self) -> ParamLayer<T> {
        ParamLayer::new(self.clone())
    }
}

/// 构造通用参数提取器
///
/// # Panics
///
/// 参数名为空时 panic（属于编程错误，在装配路由时即暴露）。
#[track_caller]
pub fn make_param_handler<T, F, E>(
    name: impl Into<String>,
    default: T,
    type_name: &'static str,
    parse: F,
) -> ParamHandler<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    E: fmt::Display,
{
    match ParamHandler::try_new(name, default, type_name, parse) {
        Ok(handler) => handler,
        Err(e) => panic!("invalid param handler: {e}"),
    }
}

/// 64 位有符号整数参数
#[track_caller]
pub fn int64_param(name: impl Into<String>, default: i64) -> ParamHandler<i64> {
    make_param_handler(name, default, parsers::INT64, parsers::parse_int64)
}

/// 字符串参数，永不失败
#[track_caller]
pub fn string_param(name: impl Into<String>, default: impl Into<String>) -> ParamHandler<String> {
    make_param_handler(name, default.into(), parsers::STRING, parsers::parse_string)
}

/// 布尔参数
#[track_caller]
pub fn bool_param(name: impl Into<String>, default: bool) -> ParamHandler<bool> {
    make_param_handler(name, default, parsers::BOOL, parsers::parse_bool)
}
