pub mod application {
    pub mod response;
    pub mod specification;
}

pub mod domain {
    pub mod error;
    pub mod models;
    pub mod user;
}

pub mod infrastructure {
    pub mod config;
    pub mod logging;
}

pub use application::response::{ApiResponse, SentRequest};
pub use application::specification::{RequestSpec, ResponseSpec, response_specification};
pub use domain::error::{ApiTestError, Result};
pub use infrastructure::config::{Config, LogDetail};
