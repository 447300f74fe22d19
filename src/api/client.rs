// src/api/client.rs
//! Request executor for the BookStack REST API.
//!
//! Builds authenticated requests, enforces per-call timeouts, retries
//! rate-limited calls and turns every non-2xx response into
//! [`AppError::Api`]. Successful bodies are classified into
//! [`ApiPayload`] without knowing which entity they describe.

use super::transport::{
    HttpRequest, HttpResponse, HttpTransport, Method, MultipartForm, RequestBody,
};
use crate::config::ServerConfig;
use crate::error::AppError;
use crate::error_recovery::{retry_rate_limited, RateLimitPolicy, Sleeper, TokioSleeper};
use crate::types::{ApiToken, BaseUrl};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// A single API call, relative to `{base}/api/`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub timeout: Option<Duration>,
}

impl ApiCall {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A successful response body, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    /// 204, or a 2xx with nothing in the body.
    Empty,
    /// Any non-JSON content type.
    Text(String),
    Json(serde_json::Value),
}

impl ApiPayload {
    /// Deserializes a JSON payload into a typed record.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, AppError> {
        match self {
            ApiPayload::Json(value) => Ok(serde_json::from_value(value)?),
            ApiPayload::Text(text) => Err(AppError::MalformedResponse(format!(
                "expected JSON, got text: {}",
                preview(&text)
            ))),
            ApiPayload::Empty => Err(AppError::MalformedResponse(
                "expected JSON, got an empty body".to_string(),
            )),
        }
    }

    /// The body as text; JSON is re-serialized, empty stays empty.
    pub fn into_text(self) -> String {
        match self {
            ApiPayload::Empty => String::new(),
            ApiPayload::Text(text) => text,
            ApiPayload::Json(value) => value.to_string(),
        }
    }
}

/// Timeouts and retry limits for the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSettings {
    pub request_timeout: Duration,
    pub upload_timeout: Duration,
    pub rate_limit: RateLimitPolicy,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            request_timeout: crate::constants::DEFAULT_REQUEST_TIMEOUT,
            upload_timeout: crate::constants::DEFAULT_UPLOAD_TIMEOUT,
            rate_limit: RateLimitPolicy::default(),
        }
    }
}

/// Authenticated executor for BookStack API calls.
#[derive(Clone)]
pub struct BookStackHttpClient {
    transport: Arc<dyn HttpTransport>,
    sleeper: Arc<dyn Sleeper>,
    base: BaseUrl,
    token: ApiToken,
    settings: ClientSettings,
}

impl BookStackHttpClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base: BaseUrl,
        token: ApiToken,
        settings: ClientSettings,
    ) -> Self {
        Self {
            transport,
            sleeper: Arc::new(TokioSleeper),
            base,
            token,
            settings,
        }
    }

    /// Builds a client on the reqwest transport from resolved configuration.
    pub fn from_config(config: &ServerConfig) -> Result<Self, AppError> {
        let transport = super::transport::ReqwestTransport::new()?;
        Ok(Self::new(
            Arc::new(transport),
            config.base_url.clone(),
            config.token.clone(),
            config.client_settings(),
        ))
    }

    /// Replaces the sleeper used between rate-limit retries.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base.api_root(), path.trim_start_matches('/'))
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: RequestBody,
    ) -> HttpRequest {
        let mut headers = vec![
            ("Authorization".to_string(), self.token.authorization_value()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if matches!(body, RequestBody::Json(_)) {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            url: self.url_for(path),
            query,
            headers,
            body,
        }
    }

    /// Performs one API call with timeout, rate-limit retry and error
    /// normalization.
    pub async fn execute(&self, call: ApiCall) -> Result<ApiPayload, AppError> {
        let timeout = call.timeout.unwrap_or(self.settings.request_timeout);
        let body = match call.body {
            Some(value) => RequestBody::Json(value),
            None => RequestBody::Empty,
        };
        let request = self.build_request(call.method, &call.path, call.query, body);
        log::debug!("{} {}", request.method, request.url);

        let response = retry_rate_limited(self.settings.rate_limit, self.sleeper.as_ref(), || {
            self.send_with_timeout(request.clone(), timeout)
        })
        .await?;

        log::debug!("{} {} -> {}", request.method, request.url, response.status);
        parse_response(response)
    }

    /// Sends a multipart form. Uses the upload timeout and is not retried.
    pub async fn upload(
        &self,
        path: &str,
        form: MultipartForm,
        timeout: Option<Duration>,
    ) -> Result<ApiPayload, AppError> {
        let timeout = timeout.unwrap_or(self.settings.upload_timeout);
        let request = self.build_request(
            Method::Post,
            path,
            Vec::new(),
            RequestBody::Multipart(form),
        );
        log::info!("Uploading to {}", request.url);

        let response = self.send_with_timeout(request, timeout).await?;
        parse_response(response)
    }

    async fn send_with_timeout(
        &self,
        request: HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, AppError> {
        match tokio::time::timeout(timeout, self.transport.send(request)).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!("Request aborted after {:?}", timeout);
                Err(AppError::Timeout(timeout))
            }
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, AppError> {
        self.execute(ApiCall::get(path).query(query))
            .await?
            .into_typed()
    }

    pub async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let body = serde_json::to_value(body)?;
        self.execute(ApiCall::new(method, path).json(body))
            .await?
            .into_typed()
    }

    pub async fn get_text(&self, path: &str) -> Result<String, AppError> {
        Ok(self.execute(ApiCall::get(path)).await?.into_text())
    }

    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.execute(ApiCall::delete(path)).await?;
        Ok(())
    }
}

/// Classifies a final response: error for non-2xx, payload otherwise.
pub fn parse_response(response: HttpResponse) -> Result<ApiPayload, AppError> {
    if !response.is_success() {
        log::debug!(
            "API rejected request with {}: {}",
            response.status,
            preview(&response.body)
        );
        return Err(AppError::from_response(response.status, response.body));
    }

    if response.status == 204 || response.body.is_empty() {
        return Ok(ApiPayload::Empty);
    }

    let content_type = response
        .header("content-type")
        .map(|ct| ct.to_ascii_lowercase());
    match content_type.as_deref() {
        Some(ct) if !ct.contains("json") => {
            return Ok(ApiPayload::Text(response.body));
        }
        _ if response.body.trim().is_empty() => return Ok(ApiPayload::Empty),
        // Untyped bodies are JSON when they parse as JSON.
        None => {
            return Ok(serde_json::from_str(&response.body)
                .map(ApiPayload::Json)
                .unwrap_or(ApiPayload::Text(response.body)));
        }
        Some(_) => {}
    }

    serde_json::from_str(&response.body)
        .map(ApiPayload::Json)
        .map_err(|e| {
            AppError::MalformedResponse(format!("{} (body: {})", e, preview(&response.body)))
        })
}

fn preview(body: &str) -> String {
    let limit = crate::constants::ERROR_BODY_PREVIEW_LENGTH;
    if body.chars().count() > limit {
        let cut: String = body.chars().take(limit).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_content_is_empty() {
        assert_eq!(
            parse_response(HttpResponse::new(204, "")).unwrap(),
            ApiPayload::Empty
        );
        assert_eq!(
            parse_response(HttpResponse::new(200, "  ")).unwrap(),
            ApiPayload::Empty
        );
    }

    #[test]
    fn whitespace_text_bodies_are_kept() {
        let response = HttpResponse::new(200, " \n").with_header("content-type", "text/plain");
        assert_eq!(
            parse_response(response).unwrap(),
            ApiPayload::Text(" \n".to_string())
        );
    }

    #[test]
    fn non_json_content_type_is_text() {
        let response =
            HttpResponse::new(200, "# Title").with_header("Content-Type", "text/plain; charset=UTF-8");
        assert_eq!(
            parse_response(response).unwrap(),
            ApiPayload::Text("# Title".to_string())
        );
    }

    #[test]
    fn untyped_body_is_json_only_if_it_parses() {
        assert_eq!(
            parse_response(HttpResponse::new(200, "[1, 2]")).unwrap(),
            ApiPayload::Json(serde_json::json!([1, 2]))
        );
        assert_eq!(
            parse_response(HttpResponse::new(200, "plain words")).unwrap(),
            ApiPayload::Text("plain words".to_string())
        );
    }

    #[test]
    fn json_is_parsed() {
        let response = HttpResponse::new(200, r#"{"id": 1}"#)
            .with_header("content-type", "application/json");
        assert_eq!(
            parse_response(response).unwrap(),
            ApiPayload::Json(serde_json::json!({"id": 1}))
        );
    }

    #[test]
    fn broken_json_is_a_transport_failure() {
        let response =
            HttpResponse::new(200, "{oops").with_header("content-type", "application/json");
        let err = parse_response(response).unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn non_success_is_normalized() {
        let response = HttpResponse::new(404, r#"{"message": "Not found"}"#);
        match parse_response(response).unwrap_err() {
            AppError::Api { status, message, .. } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
