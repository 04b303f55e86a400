//! Unit management routes.
//!
//! Units are addressed by name, and a PUT may rename the addressed unit.

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
use spesa_db::entities::unit;
use spesa_db::repositories::unit::{UnitFilter, UnitInput, UnitRepository};
use spesa_shared::AppError;

/// Creates the unit routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/units", get(list_units).post(create_unit))
        .route(
            "/units/{name}",
            get(get_unit).put(update_unit).delete(delete_unit),
        )
}

#[derive(Debug, Deserialize)]
struct UnitPayload {
    name: String,
    #[serde(rename = "managerID")]
    manager_id: Option<i32>,
}

#[derive(Debug, Serialize)]
struct UnitResponse {
    name: String,
    #[serde(rename = "managerID")]
    manager_id: Option<i32>,
}

impl From<unit::Model> for UnitResponse {
    fn from(m: unit::Model) -> Self {
        Self {
            name: m.name,
            manager_id: m.manager_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListUnitsQuery {
    name: Option<String>,
    manager_id: Option<i32>,
}

/// GET `/units` - List units with optional filters.
async fn list_units(
    State(state): State<AppState>,
    Query(query): Query<ListUnitsQuery>,
) -> impl IntoResponse {
    let repo = UnitRepository::new((*state.db).clone());

    let filter = UnitFilter {
        name: query.name,
        manager_id: query.manager_id,
    };

    match repo.list(filter).await {
        Ok(units) => {
            let response: Vec<UnitResponse> = units.into_iter().map(UnitResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list units");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// POST `/units` - Create a new unit.
async fn create_unit(
    State(state): State<AppState>,
    Json(payload): Json<UnitPayload>,
) -> impl IntoResponse {
    let repo = UnitRepository::new((*state.db).clone());

    let input = UnitInput {
        name: payload.name,
        manager_id: payload.manager_id,
    };

    match repo.create(input).await {
        Ok(created) => {
            info!(unit = %created.name, "Unit created");
            (StatusCode::CREATED, Json(UnitResponse::from(created))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create unit");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// GET `/units/{name}` - Get a unit by name.
async fn get_unit(State(state): State<AppState>, Path(name): Path<String>) -> impl IntoResponse {
    let repo = UnitRepository::new((*state.db).clone());

    match repo.find_by_name(&name).await {
        Ok(Some(found)) => (StatusCode::OK, Json(UnitResponse::from(found))).into_response(),
        Ok(None) => error_response(&AppError::NotFound(format!("Unit {name}"))),
        Err(e) => {
            error!(error = %e, unit = %name, "Failed to get unit");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// PUT `/units/{name}` - Overwrite a unit, possibly renaming it.
async fn update_unit(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(payload): Json<UnitPayload>,
) -> impl IntoResponse {
    if payload.name.is_empty() {
        return error_response(&AppError::Validation("Missing or invalid name".into()));
    }

    let repo = UnitRepository::new((*state.db).clone());

    let input = UnitInput {
        name: payload.name,
        manager_id: payload.manager_id,
    };

    match repo.update(&name, input).await {
        Ok(Some(updated)) => {
            info!(unit = %name, "Unit updated");
            (StatusCode::OK, Json(UnitResponse::from(updated))).into_response()
        }
        Ok(None) => error_response(&AppError::NotFound(format!("Unit {name}"))),
        Err(e) => {
            error!(error = %e, unit = %name, "Failed to update unit");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// DELETE `/units/{name}` - Delete a unit.
async fn delete_unit(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let repo = UnitRepository::new((*state.db).clone());

    match repo.delete(&name).await {
        Ok(true) => {
            info!(unit = %name, "Unit deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => error_response(&AppError::NotFound(format!("Unit {name}"))),
        Err(e) => {
            error!(error = %e, unit = %name, "Failed to delete unit");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}
