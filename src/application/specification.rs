use crate::application::response::{ApiResponse, SentRequest, lookup};
use crate::domain::error::{ApiTestError, Result};
use crate::infrastructure::config::{Config, LogDetail};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";
const API_KEY_HEADER: &str = "x-api-key";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct RequestSpec {
    http: Client,
    base_url: String,
    log_detail: LogDetail,
}

impl RequestSpec {
    pub fn new(config: Config) -> Result<Self> {
        let config = config.validated()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|e| ApiTestError::Config(format!("invalid API key header: {}", e)))?;
            headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(config.timeout))
            .user_agent(format!("reqres-api-tests/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(base_url = %config.base_url, log_detail = ?config.log_detail, "Request specification built");

        Ok(Self {
            http,
            base_url: config.base_url,
            log_detail: config.log_detail,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn log_detail(&self) -> LogDetail {
        self.log_detail
    }

    pub fn with_log_detail(mut self, log_detail: LogDetail) -> Self {
        self.log_detail = log_detail;
        self
    }

    pub fn url_for(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else if path.starts_with('/') || path.starts_with('?') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send::<()>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.send::<()>(Method::DELETE, path, None).await
    }

    #[instrument(skip(self, body), fields(base_url = %self.base_url))]
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse> {
        let url = self.url_for(path);
        let request_id = Uuid::new_v4().to_string();

        // Kept only when something may log it later.
        let payload = match body {
            Some(body) if self.log_detail != LogDetail::Never => Some(serde_json::to_string(body)?),
            _ => None,
        };

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(REQUEST_ID_HEADER, &request_id);
        if let Some(body) = body {
            request = request.json(body);
        }

        if self.log_detail == LogDetail::All {
            info!(
                method = %method,
                url = %url,
                request_id = %request_id,
                body = payload.as_deref().unwrap_or_default(),
                "Sending request"
            );
        }

        let start = Instant::now();
        let response = request.send().await.map_err(|e| {
            if self.log_detail != LogDetail::Never {
                warn!(
                    method = %method,
                    url = %url,
                    request_id = %request_id,
                    request_body = payload.as_deref().unwrap_or_default(),
                    timeout = e.is_timeout(),
                    error = %e,
                    "Request failed"
                );
            }
            ApiTestError::Transport(e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        let elapsed = start.elapsed();

        if self.log_detail != LogDetail::Never {
            info!(
                method = %method,
                url = %url,
                status = status.as_u16(),
                duration_ms = elapsed.as_millis() as u64,
                request_id = %request_id,
                "Request processed"
            );
        }
        if self.log_detail == LogDetail::All {
            info!(request_id = %request_id, headers = ?headers, body = %body, "Response received");
        }

        let sent = SentRequest {
            method: method.to_string(),
            url,
            body: payload,
            request_id,
            log_detail: self.log_detail,
        };
        Ok(ApiResponse::new(status, headers, body, elapsed, sent))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSpec {
    expected_status: u16,
    fields: Vec<(String, Value)>,
    log_body_on_mismatch: bool,
}

pub fn response_specification(expected_status_code: u16) -> ResponseSpec {
    ResponseSpec {
        expected_status: expected_status_code,
        fields: Vec::new(),
        log_body_on_mismatch: true,
    }
}

impl ResponseSpec {
    pub fn expected_status(&self) -> u16 {
        self.expected_status
    }

    pub fn with_body_field(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((path.into(), value.into()));
        self
    }

    pub fn without_body_logging(mut self) -> Self {
        self.log_body_on_mismatch = false;
        self
    }

    pub fn validate(&self, response: &ApiResponse) -> Result<()> {
        let result = self.check(response);
        if let Err(e) = &result {
            self.log_failure(response, e);
        }
        result
    }

    fn check(&self, response: &ApiResponse) -> Result<()> {
        let actual = response.status_code();
        if actual != self.expected_status {
            return Err(ApiTestError::StatusMismatch {
                expected: self.expected_status,
                actual,
                body: response.body().to_string(),
            });
        }

        if self.fields.is_empty() {
            return Ok(());
        }

        let body = response.json_value()?;
        for (path, expected) in &self.fields {
            match lookup(&body, path) {
                None => return Err(ApiTestError::MissingField(path.clone())),
                Some(actual) if actual != expected => {
                    return Err(ApiTestError::FieldMismatch {
                        path: path.clone(),
                        expected: expected.clone(),
                        actual: actual.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    // The whole exchange, unless the call was made with `LogDetail::Never`.
    fn log_failure(&self, response: &ApiResponse, error: &ApiTestError) {
        let request = response.request();
        if !self.log_body_on_mismatch || request.log_detail == LogDetail::Never {
            return;
        }
        warn!(
            error = %error,
            method = %request.method,
            url = %request.url,
            request_id = %request.request_id,
            request_body = request.body.as_deref().unwrap_or_default(),
            expected = self.expected_status,
            status = response.status_code(),
            response_body = %response.body(),
            "Response check failed"
        );
    }
}
