//! Simulated user API
//!
//! Stands in for a network client: waits for the configured latency, then
//! returns a user or an error.

use std::time::Duration;

use async_actions::ActionError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("user {0} not found")]
    NotFound(u64),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

impl From<FetchError> for ActionError {
    fn from(error: FetchError) -> Self {
        ActionError::new(error)
    }
}

/// Request options for the simulated endpoint.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub latency: Duration,
    pub fail: bool,
}

pub async fn fetch_user(id: u64, options: FetchOptions) -> Result<User, FetchError> {
    tokio::time::sleep(options.latency).await;

    if options.fail {
        return Err(if id == 0 {
            FetchError::NotFound(id)
        } else {
            FetchError::Timeout(options.latency)
        });
    }

    Ok(User {
        id,
        name: format!("user-{}", id),
    })
}
