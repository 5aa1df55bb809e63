//! OpenAPI document served behind the Swagger UI.

use utoipa::OpenApi;

use super::dto::{HealthResponse, UserCountResponse};
use super::error::ApiError;
use super::handlers;
use crate::models::{PaginationMeta, User, UserId, UserInput, UserPage};

/// Where the UI is mounted.
pub const SWAGGER_UI_PATH: &str = "/swagger";
/// Where the generated document is served.
pub const OPENAPI_JSON_PATH: &str = "/swagger/v1/swagger.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Users API", description = "CRUD over the users table"),
    paths(
        handlers::health_check,
        handlers::list_users,
        handlers::get_user,
        handlers::create_user,
        handlers::update_user,
        handlers::delete_user,
        handlers::search_by_email,
        handlers::list_by_state,
        handlers::count_users,
    ),
    components(schemas(
        User,
        UserId,
        UserInput,
        UserPage,
        PaginationMeta,
        UserCountResponse,
        HealthResponse,
        ApiError,
    )),
    tags(
        (name = "User", description = "User records"),
        (name = "Health", description = "Liveness and database status")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_user_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/health",
            "/api/User",
            "/api/User/{id}",
            "/api/User/search",
            "/api/User/by-state/{state}",
            "/api/User/count",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
