use crate::application::specification::ResponseSpec;
use crate::domain::error::{ApiTestError, Result};
use crate::infrastructure::config::LogDetail;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentRequest {
    pub method: String,
    pub url: String,
    pub body: Option<String>,
    pub request_id: String,
    pub log_detail: LogDetail,
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
    elapsed: Duration,
    request: SentRequest,
}

impl ApiResponse {
    pub(crate) fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: String,
        elapsed: Duration,
        request: SentRequest,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            elapsed,
            request,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn request(&self) -> &SentRequest {
        &self.request
    }

    pub fn request_id(&self) -> &str {
        &self.request.request_id
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    pub fn json_value(&self) -> Result<Value> {
        self.json()
    }

    pub fn json_path(&self, path: &str) -> Result<Value> {
        let value = self.json_value()?;
        lookup(&value, path)
            .cloned()
            .ok_or_else(|| ApiTestError::MissingField(path.to_string()))
    }

    pub fn then(self, spec: &ResponseSpec) -> Result<Self> {
        spec.validate(&self)?;
        Ok(self)
    }
}

/// Resolves a dotted path with optional `[index]` suffixes against a JSON
/// value. An empty path yields the value itself.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;

    for segment in path.split('.').filter(|s| !s.is_empty()) {
        let (key, mut rest) = match segment.find('[') {
            Some(i) => (&segment[..i], &segment[i..]),
            None => (segment, ""),
        };

        if !key.is_empty() {
            current = current.get(key)?;
        }

        while let Some(stripped) = rest.strip_prefix('[') {
            let end = stripped.find(']')?;
            let index: usize = stripped[..end].trim().parse().ok()?;
            current = current.get(index)?;
            rest = &stripped[end + 1..];
        }

        if !rest.is_empty() {
            return None;
        }
    }

    Some(current)
}
