//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::dto::{HealthResponse, ListUsersQuery, SearchQuery, UserCountResponse};
use super::error::{ApiError, AppError};
use super::extract::AppJson;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{User, UserId, UserInput, UserPage};

/// Base path of the user resource.
pub const USERS_PATH: &str = "/api/User";

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and database is accessible.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// User CRUD
// =============================================================================

/// GET /api/User
///
/// One page of users ordered by id.
#[utoipa::path(
    get,
    path = "/api/User",
    tag = "User",
    params(ListUsersQuery),
    responses((status = 200, description = "Page of users", body = UserPage))
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> HandlerResult<UserPage> {
    let page = db_services::list_users(state.repository.as_ref(), query.page_request()).await?;
    Ok(Json(page))
}

/// GET /api/User/{id}
#[utoipa::path(
    get,
    path = "/api/User/{id}",
    tag = "User",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "No such user", body = ApiError)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> HandlerResult<User> {
    let user = db_services::get_user(state.repository.as_ref(), UserId::new(id)).await?;
    Ok(Json(user))
}

/// POST /api/User
///
/// Any `id` or `createdAt` in the body is ignored. Responds 201 with a
/// `Location` header pointing at the new row.
#[utoipa::path(
    post,
    path = "/api/User",
    tag = "User",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Unreadable body", body = ApiError)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(input): AppJson<UserInput>,
) -> Result<impl IntoResponse, AppError> {
    let user = db_services::create_user(state.repository.as_ref(), input).await?;
    let location = format!("{}/{}", USERS_PATH, user.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)))
}

/// PUT /api/User/{id}
///
/// Full overwrite; omitted fields become null.
#[utoipa::path(
    put,
    path = "/api/User/{id}",
    tag = "User",
    params(("id" = i32, Path, description = "User id")),
    request_body = UserInput,
    responses(
        (status = 204, description = "User updated"),
        (status = 400, description = "Unreadable body", body = ApiError),
        (status = 404, description = "No such user", body = ApiError)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(input): AppJson<UserInput>,
) -> Result<StatusCode, AppError> {
    db_services::update_user(state.repository.as_ref(), UserId::new(id), input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/User/{id}
///
/// Returns the row as it was before removal.
#[utoipa::path(
    delete,
    path = "/api/User/{id}",
    tag = "User",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted user", body = User),
        (status = 404, description = "No such user", body = ApiError)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> HandlerResult<User> {
    let user = db_services::delete_user(state.repository.as_ref(), UserId::new(id)).await?;
    Ok(Json(user))
}

// =============================================================================
// Lookups
// =============================================================================

/// GET /api/User/search?email=...
#[utoipa::path(
    get,
    path = "/api/User/search",
    tag = "User",
    params(SearchQuery),
    responses(
        (status = 200, description = "First user with this email", body = User),
        (status = 400, description = "Missing email parameter", body = ApiError),
        (status = 404, description = "No user with this email", body = ApiError)
    )
)]
pub async fn search_by_email(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> HandlerResult<User> {
    let email = match query.email.as_deref() {
        Some(email) if !email.is_empty() => email,
        _ => return Err(AppError::bad_request("Email parameter is required")),
    };

    let user = db_services::find_user_by_email(state.repository.as_ref(), email).await?;
    Ok(Json(user))
}

/// GET /api/User/by-state/{state}
///
/// An unknown state is not an error; the list is just empty.
#[utoipa::path(
    get,
    path = "/api/User/by-state/{state}",
    tag = "User",
    params(("state" = String, Path, description = "Exact state value")),
    responses((status = 200, description = "Users in the state", body = Vec<User>))
)]
pub async fn list_by_state(
    State(state): State<AppState>,
    Path(user_state): Path<String>,
) -> HandlerResult<Vec<User>> {
    let users = db_services::list_users_by_state(state.repository.as_ref(), &user_state).await?;
    Ok(Json(users))
}

/// GET /api/User/count
#[utoipa::path(
    get,
    path = "/api/User/count",
    tag = "User",
    responses((status = 200, description = "Total number of users", body = UserCountResponse))
)]
pub async fn count_users(State(state): State<AppState>) -> HandlerResult<UserCountResponse> {
    let total_users = db_services::count_users(state.repository.as_ref()).await?;
    Ok(Json(UserCountResponse { total_users }))
}
