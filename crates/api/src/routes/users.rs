//! User management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{AppState, routes::error_response};
use spesa_db::entities::users;
use spesa_db::repositories::user::{UserFilter, UserInput, UserRepository};
use spesa_shared::AppError;

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct UserPayload {
    name: String,
    #[serde(rename = "unitID")]
    unit_id: String,
    #[serde(rename = "roleID")]
    role_id: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct UserResponse {
    id: i32,
    name: String,
    #[serde(rename = "unitID")]
    unit_id: String,
    #[serde(rename = "roleID")]
    role_id: String,
    // Deployed clients read the password straight out of user records, so
    // the field stays on the wire.
    password: String,
}

impl From<users::Model> for UserResponse {
    fn from(m: users::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            unit_id: m.unit_id,
            role_id: m.role_id,
            password: m.password,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListUsersQuery {
    unit_id: Option<String>,
    role_id: Option<String>,
    name: Option<String>,
}

impl From<UserPayload> for UserInput {
    fn from(p: UserPayload) -> Self {
        Self {
            name: p.name,
            unit_id: p.unit_id,
            role_id: p.role_id,
            password: p.password,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/users` - List users with optional filters.
async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> impl IntoResponse {
    let repo = UserRepository::new((*state.db).clone());

    let filter = UserFilter {
        unit_id: query.unit_id,
        role_id: query.role_id,
        name: query.name,
    };

    match repo.list(filter).await {
        Ok(users) => {
            let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list users");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// POST `/users` - Create a new user.
async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> impl IntoResponse {
    let repo = UserRepository::new((*state.db).clone());

    match repo.create(payload.into()).await {
        Ok(user) => {
            info!(user_id = user.id, "User created");
            (StatusCode::CREATED, Json(UserResponse::from(user))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create user");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/users/{id}` - Get a user by id.
async fn get_user(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    let repo = UserRepository::new((*state.db).clone());

    match repo.find_by_id(id).await {
        Ok(Some(user)) => (StatusCode::OK, Json(UserResponse::from(user))).into_response(),
        Ok(None) => error_response(&AppError::NotFound(format!("User {id}"))),
        Err(e) => {
            error!(error = %e, user_id = id, "Failed to get user");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// PUT `/users/{id}` - Overwrite a user.
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UserPayload>,
) -> impl IntoResponse {
    let repo = UserRepository::new((*state.db).clone());

    match repo.update(id, payload.into()).await {
        Ok(Some(user)) => {
            info!(user_id = id, "User updated");
            (StatusCode::OK, Json(UserResponse::from(user))).into_response()
        }
        Ok(None) => error_response(&AppError::NotFound(format!("User {id}"))),
        Err(e) => {
            error!(error = %e, user_id = id, "Failed to update user");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// DELETE `/users/{id}` - Delete a user.
async fn delete_user(State(state): State<AppState>, Path(id): Path<i32>) -> impl IntoResponse {
    let repo = UserRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(true) => {
            info!(user_id = id, "User deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => error_response(&AppError::NotFound(format!("User {id}"))),
        Err(e) => {
            error!(error = %e, user_id = id, "Failed to delete user");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}
