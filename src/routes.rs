//! 演示路由
//!
//! `GET /items` 通过四个参数中间件读取 `limit` / `q` / `verbose` / `order`，
//! 原样以 JSON 返回；`GET /health` 用于存活检查。

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use paramware::{
    bool_param, int64_param, make_param_handler, string_param, ParamOptions, RequestContext,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// 排序方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort order: {0}")]
pub struct ParseSortOrderError(String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ParseSortOrderError(other.to_string())),
        }
    }
}

/// `/items` 的参数回显
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsQuery {
    pub limit: i64,
    pub q: String,
    pub verbose: bool,
    pub order: SortOrder,
}

impl ItemsQuery {
    fn from_context(ctx: &RequestContext) -> Option<Self> {
        Some(Self {
            limit: ctx.get_i64("limit")?,
            q: ctx.get_str("q")?.to_string(),
            verbose: ctx.get_bool("verbose")?,
            order: *ctx.get::<SortOrder>("order")?,
        })
    }
}

async fn list_items(ctx: RequestContext) -> Result<Json<ItemsQuery>, StatusCode> {
    match ItemsQuery::from_context(&ctx) {
        Some(query) => Ok(Json(query)),
        None => {
            tracing::error!("请求上下文缺少参数: {:?}", ctx);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

/// 构建路由
pub fn router(options: ParamOptions) -> Router {
    let items = Router::new()
        .route("/items", get(list_items))
        .route_layer(int64_param("limit", 10).with_options(options).layer())
        .route_layer(string_param("q", "").with_options(options).layer())
        .route_layer(bool_param("verbose", false).with_options(options).layer())
        .route_layer(
            make_param_handler("order", SortOrder::Asc, "order", SortOrder::from_str)
                .with_options(options)
                .layer(),
        );

    Router::new().route("/health", get(health)).merge(items)
}
