//! 参数错误类型

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 参数提取错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// 参数存在但无法解析为目标类型
    #[error("expected {type_name} {name} param")]
    Malformed {
        type_name: &'static str,
        name: String,
    },

    /// 参数重复出现（仅 `DuplicatePolicy::Reject` 时产生）
    #[error("expected single {name} param")]
    Duplicate { name: String },

    /// 构造提取器时参数名为空
    #[error("param name must not be empty")]
    EmptyName,
}

impl ParamError {
    /// 对应的 HTTP 状态码
    pub fn status(&self) -> StatusCode {
        match self {
            ParamError::Malformed { .. } | ParamError::Duplicate { .. } => StatusCode::BAD_REQUEST,
            ParamError::EmptyName => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 中止请求时返回的 JSON 响应体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub errors: Vec<String>,
}

impl IntoResponse for ParamError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            errors: vec![self.to_string()],
        };
        (self.status(), Json(body)).into_response()
    }
}
