//! Data Transfer Objects for the HTTP API.
//!
//! Query strings and the small response envelopes that are not part of the
//! user model itself.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::PageRequest;

/// Query parameters for `GET /api/User`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// 1-based page number (default 1)
    pub page: Option<i64>,
    /// Rows per page (default 10, at most 100)
    #[serde(alias = "page_size")]
    pub page_size: Option<i64>,
}

impl ListUsersQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

/// Query parameters for `GET /api/User/search`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Exact email to look up
    pub email: Option<String>,
}

/// Response for `GET /api/User/count`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCountResponse {
    pub total_users: i64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}
