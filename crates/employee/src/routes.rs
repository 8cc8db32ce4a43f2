use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use common::types::Health;
use models::{Employee, EntityId, NewEmployee};
use service::EntityStore;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EntityStore<Employee>>,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn create_employee(
    State(state): State<AppState>,
    Json(input): Json<NewEmployee>,
) -> Json<Employee> {
    // departmentId is taken as given; referential integrity is not this
    // service's job (the department may not exist, or not yet).
    info!(name = %input.name, department_id = input.department_id, "employee add");
    Json(state.store.add(Employee::from(input)).await)
}

async fn list_employees(State(state): State<AppState>) -> Json<Vec<Employee>> {
    info!("employee find");
    Json(state.store.list().await)
}

async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<Employee>, ApiError> {
    info!(id, "employee find");
    Ok(Json(state.store.find_by_id(id).await?))
}

async fn list_by_department(
    State(state): State<AppState>,
    Path(department_id): Path<EntityId>,
) -> Json<Vec<Employee>> {
    info!(department_id, "employee find by department");
    Json(state.store.find_by_key(department_id, |e| e.department_id).await)
}

/// Build the full application router: health plus the employee API.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new().route("/health", get(health));

    let api = Router::new()
        .route("/api/employee/create", post(create_employee))
        .route("/api/employee/all", get(list_employees))
        .route("/api/employee/search/:id", get(get_employee))
        .route("/api/employee/department/:department_id", get(list_by_department))
        .with_state(state);

    public
        .merge(api)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
