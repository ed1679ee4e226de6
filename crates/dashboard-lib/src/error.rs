//! Error taxonomy for dashboard operations
//!
//! Two failure classes reach callers: the request never produced a
//! well-formed response (network), or the service answered and rejected the
//! operation (application). Neither is fatal to an active polling loop.

use thiserror::Error;

/// Failures surfaced by the dashboard core
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Transport-level failure: connect, timeout, or malformed response body
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    /// The service responded but reported an error
    #[error("service error: {0}")]
    Application(String),

    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl DashboardError {
    pub fn is_network(&self) -> bool {
        matches!(self, DashboardError::Network(_))
    }

    pub fn is_application(&self) -> bool {
        matches!(self, DashboardError::Application(_))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
