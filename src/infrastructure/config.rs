use crate::domain::error::{ApiTestError, Result};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://reqres.in";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogDetail {
    Never,
    #[default]
    OnFailure,
    All,
}

impl FromStr for LogDetail {
    type Err = ApiTestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" | "off" => Ok(LogDetail::Never),
            "on_failure" | "failure" => Ok(LogDetail::OnFailure),
            "all" | "always" => Ok(LogDetail::All),
            other => Err(ApiTestError::Config(format!(
                "unknown log detail `{}`, expected never, on_failure or all",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub log_detail: LogDetail,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_detail: LogDetail::default(),
        }
    }

    pub fn with_log_detail(mut self, log_detail: LogDetail) -> Self {
        self.log_detail = log_detail;
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self> {
        if dotenv::dotenv().is_err() {
            debug!("No .env file found, using process environment");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("REQRES_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Config::new(base_url);

        if let Some(key) = lookup("REQRES_API_KEY").filter(|k| !k.is_empty()) {
            config.api_key = Some(key);
        }

        if let Some(raw) = lookup("REQRES_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ApiTestError::Config(format!("REQRES_TIMEOUT_SECS must be a number, got `{}`", raw))
            })?;
            if secs == 0 {
                warn!("REQRES_TIMEOUT_SECS is 0, falling back to default");
            } else {
                config.timeout = Duration::from_secs(secs);
            }
        }

        if let Some(raw) = lookup("REQRES_LOG") {
            config.log_detail = raw.parse()?;
        }

        config.validated()
    }

    pub fn validated(mut self) -> Result<Self> {
        let url = self.base_url.trim().trim_end_matches('/').to_string();
        if url.is_empty() {
            return Err(ApiTestError::InvalidUrl("URL cannot be empty".into()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ApiTestError::InvalidUrl(format!(
                "`{}` must start with http:// or https://",
                url
            )));
        }
        self.base_url = url;
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_BASE_URL)
    }
}
