//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult, OptionExt};
use domain::{User, UserResponse};

use crate::extractors::BoundJson;
use crate::state::AppState;

/// User update request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// New first name
    #[validate(length(min = 1, max = 64, message = "First name must be 1 to 64 characters"))]
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    /// New last name
    #[validate(length(min = 1, max = 64, message = "Last name must be 1 to 64 characters"))]
    #[schema(example = "Byron")]
    pub last_name: Option<String>,
    /// New email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    /// Copy the provided fields onto the entity.
    fn apply(self, user: &mut User) {
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route(
            "/:id",
            get(get_user).put(update_user).head(user_exists),
        )
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.find_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .get_user_by_id(id)
        .await?
        .ok_or_not_found()?;

    Ok(Json(UserResponse::from(user)))
}

/// Check that a user ID exists
#[utoipa::path(
    head,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User exists"),
        (status = 404, description = "User not found")
    )
)]
pub async fn user_exists(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if state.user_service.is_not_valid_id(id).await? {
        return Err(AppError::NotFound);
    }

    Ok(StatusCode::OK)
}

/// Update user profile fields
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use"),
        (status = 422, description = "Rejected fields")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    BoundJson(payload, binding): BoundJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    if binding.has_errors() {
        return Err(AppError::Rejected(binding));
    }

    let mut user = state
        .user_service
        .get_user_by_id(id)
        .await?
        .ok_or_not_found()?;
    payload.apply(&mut user);

    let user = state
        .user_service
        .update_user(user)
        .await?
        .ok_or_not_found()?;

    Ok(Json(UserResponse::from(user)))
}
