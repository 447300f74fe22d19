// tests/common/mod.rs
//! Scripted stand-ins for the network and the timer.

#![allow(dead_code)]

use bookstack_mcp::api::transport::{HttpRequest, HttpResponse, HttpTransport, Method};
use bookstack_mcp::error_recovery::Sleeper;
use bookstack_mcp::{ApiToken, AppError, BaseUrl, BookStack, BookStackHttpClient, ClientSettings};
use bookstack_mcp::{Clock, FixedClock};
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

pub const BASE: &str = "https://docs.example.com";

/// Answers requests from per-route queues. The last response of a route
/// repeats once its queue is down to one entry; unknown routes get a 404.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues `response` for `method` on `path` (relative to `/api/`).
    pub fn on(&self, method: Method, path: &str, response: HttpResponse) -> &Self {
        self.routes
            .lock()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
        self
    }

    pub fn on_json(&self, method: Method, path: &str, body: serde_json::Value) -> &Self {
        self.on(
            method,
            path,
            HttpResponse::new(200, body.to_string()).with_header("content-type", "application/json"),
        )
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    /// How many requests hit `path` (relative to `/api/`).
    pub fn calls_to(&self, path: &str) -> usize {
        let url = format!("{}/api/{}", BASE, path);
        self.requests.lock().iter().filter(|r| r.url == url).count()
    }
}

#[async_trait::async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AppError> {
        let prefix = format!("{}/api/", BASE);
        let path = request.url.trim_start_matches(&prefix).to_string();
        let key = (request.method, path);
        self.requests.lock().push(request);

        let mut routes = self.routes.lock();
        let response = match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        Ok(response.unwrap_or_else(|| {
            HttpResponse::new(404, r#"{"error": {"code": 404, "message": "Not found"}}"#)
                .with_header("content-type", "application/json")
        }))
    }
}

/// Yields to the scheduler before each scripted answer, so concurrent
/// requests genuinely overlap.
pub struct YieldingTransport(pub Arc<ScriptedTransport>);

#[async_trait::async_trait]
impl HttpTransport for YieldingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AppError> {
        tokio::task::yield_now().await;
        self.0.send(request).await
    }
}

/// Never answers.
pub struct HangingTransport;

#[async_trait::async_trait]
impl HttpTransport for HangingTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, AppError> {
        futures::future::pending().await
    }
}

/// Records requested delays instead of sleeping.
#[derive(Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().clone()
    }
}

#[async_trait::async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().push(duration);
    }
}

pub fn base_url() -> BaseUrl {
    BaseUrl::parse(BASE).unwrap()
}

pub fn token() -> ApiToken {
    ApiToken::new("abc", "xyz").unwrap()
}

pub fn client_with(
    transport: Arc<dyn HttpTransport>,
    settings: ClientSettings,
    sleeper: Arc<RecordingSleeper>,
) -> BookStackHttpClient {
    BookStackHttpClient::new(transport, base_url(), token(), settings).with_sleeper(sleeper)
}

pub fn client(transport: Arc<ScriptedTransport>) -> BookStackHttpClient {
    client_with(transport, ClientSettings::default(), RecordingSleeper::new())
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// A service over the scripted transport with a fixed clock.
pub fn bookstack(transport: Arc<ScriptedTransport>, write_enabled: bool) -> BookStack {
    bookstack_over(transport, write_enabled)
}

/// A service over any transport with a fixed clock.
pub fn bookstack_over(transport: Arc<dyn HttpTransport>, write_enabled: bool) -> BookStack {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(now()));
    let http = client_with(transport, ClientSettings::default(), RecordingSleeper::new());
    BookStack::new(http, write_enabled).with_clock(clock)
}
