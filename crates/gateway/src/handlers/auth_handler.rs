//! Authentication handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{LoginUser, RegisterUser, UserResponse};

use crate::extractors::BoundJson;
use crate::state::AppState;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// First name
    #[validate(length(min = 1, max = 64, message = "First name must be 1 to 64 characters"))]
    #[schema(example = "Ada")]
    pub first_name: String,
    /// Last name
    #[validate(length(min = 1, max = 64, message = "Last name must be 1 to 64 characters"))]
    #[schema(example = "Lovelace")]
    pub last_name: String,
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// User password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Password confirmation, must equal `password`
    #[schema(example = "SecurePass123!")]
    pub confirm_password: String,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        RegisterUser {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            confirm_password: req.confirm_password,
        }
    }
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ada@example.com")]
    pub log_email: String,
    /// User password
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123!")]
    pub log_password: String,
}

impl From<LoginRequest> for LoginUser {
    fn from(req: LoginRequest) -> Self {
        LoginUser::new(req.log_email, req.log_password)
    }
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Malformed request body"),
        (status = 422, description = "Rejected fields (PW-MISMATCH, EMAIL-PRESENT or binding errors)")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    BoundJson(payload, binding): BoundJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .user_service
        .register(payload.into(), binding)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Check credentials
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = UserResponse),
        (status = 400, description = "Malformed request body"),
        (status = 422, description = "Rejected fields (EMAIL-NOT-PRESENT, INVALID-LOGIN-PW or binding errors)")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    BoundJson(payload, binding): BoundJson<LoginRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.login(payload.into(), binding).await?;

    Ok(Json(UserResponse::from(user)))
}
