#![allow(unreachable_pub, clippy::redundant_pub_crate)]
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use api_types::ErrorResponse;
use axum::{
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use runtime::rate_limiter::RateLimiter;

/// Tower layer rejecting requests over the configured budget with a 429
/// problem document and a `Retry-After` header.
#[derive(Clone, Debug)]
pub(super) struct RateLimitLayer {
    limiter: RateLimiter,
    period: Duration,
}

impl RateLimitLayer {
    pub fn new(max: u64, period: Duration) -> Self {
        Self { limiter: RateLimiter::new(max, period), period }
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimit<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimit { inner, limiter: self.limiter.clone(), period: self.period }
    }
}

#[derive(Clone, Debug)]
pub(super) struct RateLimit<S> {
    inner: S,
    limiter: RateLimiter,
    period: Duration,
}

impl<S, ReqBody> Service<Request<ReqBody>> for RateLimit<S>
where
    S: Service<Request<ReqBody>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        if self.limiter.try_acquire() {
            return Box::pin(self.inner.call(req));
        }
        let retry_secs = self.period.as_secs();
        let problem = ErrorResponse::new(
            "rate-limit",
            "Too Many Requests",
            StatusCode::TOO_MANY_REQUESTS,
            format!("Rate limit exceeded. Retry after {retry_secs} seconds"),
        );
        let mut resp = problem.into_response();
        resp.headers_mut().insert(
            axum::http::header::RETRY_AFTER,
            axum::http::HeaderValue::from_str(&retry_secs.to_string())
                .expect("digits are a valid header value"),
        );
        Box::pin(std::future::ready(Ok(resp)))
    }
}

#[cfg(test)]
mod tests {
    use super::RateLimitLayer;
    use axum::{
        body::{self, Body},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use serde_json::Value;
    use std::{convert::Infallible, time::Duration};
    use tower::{Layer, Service, ServiceExt, service_fn};

    #[tokio::test]
    async fn requests_within_budget_pass_through() {
        let inner = service_fn(|_req: Request<Body>| async move {
            Ok::<_, Infallible>(Response::new(Body::empty()))
        });
        let mut svc = RateLimitLayer::new(2, Duration::from_secs(60)).layer(inner);

        for _ in 0..2 {
            let resp =
                svc.ready().await.unwrap().call(Request::new(Body::empty())).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn overflow_returns_rate_limit_problem() {
        let inner = service_fn(|_req: Request<Body>| async move {
            Ok::<_, Infallible>(Response::new(Body::empty()))
        });
        let mut svc = RateLimitLayer::new(1, Duration::from_secs(45)).layer(inner);

        let _ = svc.ready().await.unwrap().call(Request::new(Body::empty())).await.unwrap();
        let resp = svc.ready().await.unwrap().call(Request::new(Body::empty())).await.unwrap();

        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(resp.headers().get(header::RETRY_AFTER).unwrap().to_str().unwrap(), "45");
        let bytes = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let problem: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(problem["type"], "rate-limit");
        assert_eq!(problem["title"], "Too Many Requests");
        assert!(problem["detail"].as_str().unwrap().contains("45 seconds"));
    }
}
