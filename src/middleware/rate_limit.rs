use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

const WINDOW: Duration = Duration::from_secs(1);
/// Upper bound on tracked clients. New clients past it share one window.
pub const MAX_TRACKED_CLIENTS: usize = 10_000;
const OVERFLOW_KEY: &str = "overflow";
const UNKNOWN_KEY: &str = "unknown";

#[derive(Debug)]
struct WindowState {
    start: Instant,
    count: u32,
}

#[derive(Debug)]
struct Windows {
    clients: HashMap<String, WindowState>,
    last_sweep: Instant,
}

/// Fixed one-second window per client IP.
///
/// The peer address is the key. `X-Forwarded-For` is only honoured when the
/// service runs behind a trusted proxy.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    rps: u32,
    trust_forwarded_for: bool,
    windows: Arc<Mutex<Windows>>,
}

impl RateLimiter {
    pub fn new(rps: u32, trust_forwarded_for: bool) -> Self {
        Self {
            rps: rps.max(1),
            trust_forwarded_for,
            windows: Arc::new(Mutex::new(Windows {
                clients: HashMap::new(),
                last_sweep: Instant::now(),
            })),
        }
    }

    fn allow_at(&self, client: &str, now: Instant) -> bool {
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");

        let mut key = client;
        if !windows.clients.contains_key(key) && windows.clients.len() >= MAX_TRACKED_CLIENTS {
            // Windows that have already ended hold no state worth keeping.
            // At most one sweep per window.
            if now.duration_since(windows.last_sweep) >= WINDOW {
                windows
                    .clients
                    .retain(|_, w| now.duration_since(w.start) < WINDOW);
                windows.last_sweep = now;
            }
            if windows.clients.len() >= MAX_TRACKED_CLIENTS {
                key = OVERFLOW_KEY;
            }
        }

        let window = windows
            .clients
            .entry(key.to_string())
            .or_insert(WindowState { start: now, count: 0 });
        if now.duration_since(window.start) >= WINDOW {
            window.start = now;
            window.count = 0;
        }
        if window.count < self.rps {
            window.count += 1;
            true
        } else {
            false
        }
    }

    pub fn allow(&self, client: &str) -> bool {
        self.allow_at(client, Instant::now())
    }

    fn tracked(&self) -> usize {
        self.windows
            .lock()
            .expect("rate limiter mutex poisoned")
            .clients
            .len()
    }

    fn client_key(&self, headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
        if self.trust_forwarded_for {
            let forwarded = headers
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty());
            if let Some(ip) = forwarded {
                return ip.to_string();
            }
        }
        peer.map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| UNKNOWN_KEY.to_string())
    }
}

pub async fn rps_middleware(
    State(state): State<RateLimiter>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = state.client_key(req.headers(), peer);
    if !state.allow(&client) {
        tracing::warn!(%client, "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [(header::RETRY_AFTER, "1")],
            Json(json!({ "error": "rate_limit_exceeded" })),
        )
            .into_response();
    }
    next.run(req).await
}

pub fn new_rps_state(rps: u32, trust_forwarded_for: bool) -> RateLimiter {
    RateLimiter::new(rps, trust_forwarded_for)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(ip: &str) -> Option<SocketAddr> {
        Some(format!("{}:4000", ip).parse().unwrap())
    }

    #[test]
    fn limits_each_client_separately() {
        let limiter = RateLimiter::new(2, false);
        let now = Instant::now();
        assert!(limiter.allow_at("a", now));
        assert!(limiter.allow_at("a", now));
        assert!(!limiter.allow_at("a", now));
        assert!(limiter.allow_at("b", now));
    }

    #[test]
    fn window_resets_after_a_second() {
        let limiter = RateLimiter::new(1, false);
        let now = Instant::now();
        assert!(limiter.allow_at("a", now));
        assert!(!limiter.allow_at("a", now + Duration::from_millis(500)));
        assert!(limiter.allow_at("a", now + Duration::from_millis(1001)));
    }

    #[test]
    fn rotating_keys_cannot_grow_the_map_or_escape_the_limit() {
        let limiter = RateLimiter::new(1, false);
        let now = Instant::now();
        let allowed = (0..MAX_TRACKED_CLIENTS + 10_000)
            .filter(|i| limiter.allow_at(&format!("10.0.{}", i), now))
            .count();

        assert_eq!(limiter.tracked(), MAX_TRACKED_CLIENTS + 1);
        // every tracked client once, plus one request through the shared overflow window
        assert_eq!(allowed, MAX_TRACKED_CLIENTS + 1);
    }

    #[test]
    fn ended_windows_are_swept_when_full() {
        let limiter = RateLimiter::new(1, false);
        let now = Instant::now();
        for i in 0..MAX_TRACKED_CLIENTS {
            assert!(limiter.allow_at(&format!("old-{}", i), now));
        }

        let later = now + Duration::from_secs(2);
        assert!(limiter.allow_at("fresh", later));
        assert_eq!(limiter.tracked(), 1);
    }

    #[test]
    fn peer_address_is_the_key_unless_proxy_is_trusted() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "10.0.0.1, 172.16.0.1".parse().unwrap());

        let direct = RateLimiter::new(1, false);
        assert_eq!(direct.client_key(&headers, peer("192.168.1.5")), "192.168.1.5");
        assert_eq!(direct.client_key(&headers, None), "unknown");

        let proxied = RateLimiter::new(1, true);
        assert_eq!(proxied.client_key(&headers, peer("192.168.1.5")), "10.0.0.1");
        assert_eq!(
            proxied.client_key(&HeaderMap::new(), peer("192.168.1.5")),
            "192.168.1.5"
        );
    }
}
