//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::auth_handler::{LoginRequest, RegisterRequest};
use crate::handlers::user_handler::UpdateUserRequest;
use domain::{FieldError, UserResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::user_exists,
        crate::handlers::user_handler::update_user,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            UserResponse,
            UpdateUserRequest,
            FieldError,
        )
    ),
    tags(
        (name = "Authentication", description = "Login and registration endpoints"),
        (name = "Users", description = "User record endpoints"),
    )
)]
pub struct ApiDoc;
