//! 请求上下文
//!
//! 请求级的键值存储，随请求扩展（extensions）在中间件链中传递。
//! 同时记录中止状态与错误列表。

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::any::Any;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::error::{ErrorBody, ParamError};

/// 请求上下文
#[derive(Clone, Default)]
pub struct RequestContext {
    values: HashMap<String, Arc<dyn Any + Send + Sync>>,
    errors: Vec<ParamError>,
    status: Option<StatusCode>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入值，同名覆盖
    pub fn set<T>(&mut self, name: impl Into<String>, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.values.insert(name.into(), Arc::new(value));
    }

    /// 读取值，名称不存在或类型不匹配时返回 `None`
    pub fn get<T: 'static>(&self, name: &str) -> Option<&T> {
        self.values
            .get(name)
            .and_then(|value| (**value).downcast_ref::<T>())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get::<i64>(name).copied()
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get::<String>(name).map(String::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get::<bool>(name).copied()
    }

    /// 中止后续处理链并记录错误
    pub fn abort_with_error(&mut self, status: StatusCode, error: ParamError) {
        self.status = Some(status);
        self.errors.push(error);
    }

    pub fn is_aborted(&self) -> bool {
        self.status.is_some()
    }

    /// 中止状态码，未中止时为 `None`
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn errors(&self) -> &[ParamError] {
        &self.errors
    }

    /// 已中止时生成错误响应
    pub fn abort_response(&self) -> Option<Response> {
        let status = self.status?;
        let body = ErrorBody {
            errors: self.errors.iter().map(ToString::to_string).collect(),
        };
        Some((status, Json(body)).into_response())
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("RequestContext")
            .field("keys", &keys)
            .field("errors", &self.errors)
            .field("status", &self.status)
            .finish()
    }
}

/// 下游处理器通过提取器读取上下文；未经过任何参数中间件时为空上下文
#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut ctx = RequestContext::new();
        ctx.set("intParam", 11i64);
        ctx.set("stringParam", "abc".to_string());
        ctx.set("boolParam", true);

        assert_eq!(ctx.get_i64("intParam"), Some(11));
        assert_eq!(ctx.get_str("stringParam"), Some("abc"));
        assert_eq!(ctx.get_bool("boolParam"), Some(true));
        assert!(ctx.contains("intParam"));
        assert!(!ctx.is_aborted());
    }

    #[test]
    fn test_type_mismatch_returns_none() {
        let mut ctx = RequestContext::new();
        ctx.set("intParam", 11i64);
        assert_eq!(ctx.get::<i32>("intParam"), None);
        assert_eq!(ctx.get_str("intParam"), None);
        assert_eq!(ctx.get_i64("missing"), None);
    }

    #[test]
    fn test_last_write_wins() {
        let mut ctx = RequestContext::new();
        ctx.set("name", 1i64);
        ctx.set("name", "two".to_string());
        assert_eq!(ctx.get_i64("name"), None);
        assert_eq!(ctx.get_str("name"), Some("two"));
    }

    #[test]
    fn test_abort_with_error() {
        let mut ctx = RequestContext::new();
        assert!(ctx.abort_response().is_none());

        ctx.abort_with_error(
            StatusCode::BAD_REQUEST,
            ParamError::Malformed {
                type_name: "int64",
                name: "intParam".to_string(),
            },
        );
        assert!(ctx.is_aborted());
        assert_eq!(ctx.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(ctx.errors().len(), 1);
        assert_eq!(ctx.errors()[0].to_string(), "expected int64 intParam param");
    }

    #[tokio::test]
    async fn test_abort_response_body() {
        let mut ctx = RequestContext::new();
        ctx.abort_with_error(
            StatusCode::BAD_REQUEST,
            ParamError::Duplicate {
                name: "page".to_string(),
            },
        );

        let response = ctx.abort_response().unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.errors, vec!["expected single page param".to_string()]);
    }

    #[test]
    fn test_debug_lists_sorted_keys() {
        let mut ctx = RequestContext::new();
        ctx.set("b", 1i64);
        ctx.set("a", 2i64);
        let debug = format!("{ctx:?}");
        assert!(debug.contains(r#"keys: ["a", "b"]"#), "{debug}");
    }
}
