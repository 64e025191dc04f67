//! Fixed-window request limiting per client IP, counted in Redis.
//!
//! Redis outages fail open: the request proceeds and a warning is logged.

use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::config::RateLimitConfig;
use crate::errors::AppError;

#[derive(Clone)]
pub struct RateLimiter {
    client: redis::Client,
    max_requests: u64,
    window_secs: u64,
    trust_proxy: bool,
}

impl RateLimiter {
    pub fn new(client: redis::Client, config: &RateLimitConfig) -> Self {
        Self {
            client,
            max_requests: config.max_requests,
            window_secs: config.window_secs.max(1),
            trust_proxy: config.trust_proxy,
        }
    }

    /// Counts one request for `client_key` and reports whether it is allowed.
    pub async fn check(&self, client_key: &str) -> Result<bool, redis::RedisError> {
        let key = window_key(client_key, unix_now(), self.window_secs);
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let (count,): (u64,) = redis::pipe()
            .atomic()
            .cmd("INCR")
            .arg(&key)
            .cmd("EXPIRE")
            .arg(&key)
            .arg(self.window_secs)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(count <= self.max_requests)
    }
}

/// Middleware applied to every route when a limiter is configured.
pub async fn limit(State(limiter): State<RateLimiter>, request: Request, next: Next) -> Response {
    let client = client_key(&request, limiter.trust_proxy);
    match limiter.check(&client).await {
        Ok(true) => next.run(request).await,
        Ok(false) => AppError::RateLimited.into_response(),
        Err(e) => {
            warn!(error = %e, "Rate limiter unavailable, allowing request");
            next.run(request).await
        }
    }
}

/// The peer address. With `trust_proxy`, the first `X-Forwarded-For` hop
/// takes precedence.
fn client_key(request: &Request, trust_proxy: bool) -> String {
    let forwarded = trust_proxy
        .then(|| request.headers().get("x-forwarded-for"))
        .flatten()
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    forwarded
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn window_key(client: &str, now_secs: u64, window_secs: u64) -> String {
    format!("ratelimit:{client}:{}", now_secs / window_secs)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_window_key_buckets_by_window() {
        assert_eq!(window_key("1.2.3.4", 899, 900), "ratelimit:1.2.3.4:0");
        assert_eq!(window_key("1.2.3.4", 900, 900), "ratelimit:1.2.3.4:1");
        assert_eq!(
            window_key("1.2.3.4", 1000, 900),
            window_key("1.2.3.4", 1799, 900)
        );
    }

    fn forwarded_request(forwarded_for: &str) -> Request {
        let mut request = Request::builder()
            .header("x-forwarded-for", forwarded_for)
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 7], 4000))));
        request
    }

    #[test]
    fn test_client_key_ignores_forwarded_for_by_default() {
        let first = forwarded_request("203.0.113.9");
        let rotated = forwarded_request("198.51.100.1");
        assert_eq!(client_key(&first, false), "192.0.2.7");
        assert_eq!(client_key(&rotated, false), "192.0.2.7");
    }

    #[test]
    fn test_client_key_trusted_proxy_uses_first_hop() {
        let request = forwarded_request("203.0.113.9, 10.0.0.1");
        assert_eq!(client_key(&request, true), "203.0.113.9");
    }

    #[test]
    fn test_client_key_trusted_proxy_without_header_uses_peer() {
        let mut request = Request::builder().body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 7], 4000))));
        assert_eq!(client_key(&request, true), "192.0.2.7");
    }

    #[test]
    fn test_client_key_without_any_source() {
        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_key(&request, false), "unknown");
    }

    #[tokio::test]
    async fn test_unreachable_redis_is_an_error() {
        let client = redis::Client::open("redis://127.0.0.1:1/").unwrap();
        let limiter = RateLimiter::new(
            client,
            &RateLimitConfig {
                max_requests: 1,
                window_secs: 60,
                trust_proxy: false,
            },
        );
        assert!(limiter.check("x").await.is_err());
    }
}
