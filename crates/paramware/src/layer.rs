//! tower 集成
//!
//! `ParamService` 从请求扩展中取出（或新建）[`RequestContext`]，
//! 运行参数提取器后再放回；中止时直接返回 400，不调用内层服务。
//! 多个 layer 叠加时共享同一个上下文。

use axum::extract::Request;
use axum::response::Response;
use futures::future::BoxFuture;
use std::fmt;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use crate::context::RequestContext;
use crate::handler::ParamHandler;
use crate::query::QueryParams;

/// 参数提取 layer
pub struct ParamLayer<T> {
    handler: ParamHandler<T>,
}

impl<T> ParamLayer<T> {
    pub fn new(handler: ParamHandler<T>) -> Self {
        Self { handler }
    }
}

impl<T> Clone for ParamLayer<T> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ParamLayer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamLayer")
            .field("handler", &self.handler)
            .finish()
    }
}

impl<S, T> Layer<S> for ParamLayer<T> {
    type Service = ParamService<S, T>;

    fn layer(&self, inner: S) -> Self::Service {
        ParamService {
            inner,
            handler: self.handler.clone(),
        }
    }
}

/// 参数提取服务
pub struct ParamService<S, T> {
    inner: S,
    handler: ParamHandler<T>,
}

impl<S: Clone, T> Clone for ParamService<S, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<S, T> Service<Request> for ParamService<S, T>
where
    S: Service<Request, Response = Response>,
    S::Error: Send + 'static,
    S::Future: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request) -> Self::Future {
        let query = QueryParams::from_uri(request.uri());
        let mut ctx = request
            .extensions_mut()
            .remove::<RequestContext>()
            .unwrap_or_default();

        self.handler.handle(&query, &mut ctx);

        if let Some(response) = ctx.abort_response() {
            return Box::pin(async move { Ok(response) });
        }

        request.extensions_mut().insert(ctx);
        Box::pin(self.inner.call(request))
    }
}
