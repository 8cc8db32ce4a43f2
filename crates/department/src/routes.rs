use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use common::types::Health;
use models::{Department, EntityId, NewDepartment};
use service::EntityStore;

use crate::aggregator::DepartmentAggregator;
use crate::errors::ApiError;
use crate::observability;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EntityStore<Department>>,
    pub aggregator: DepartmentAggregator,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (StatusCode, String) {
    observability::encode_metrics()
}

async fn create_department(
    State(state): State<AppState>,
    Json(input): Json<NewDepartment>,
) -> Json<Department> {
    info!(name = %input.name, "department add");
    Json(state.store.add(Department::from(input)).await)
}

async fn list_departments(State(state): State<AppState>) -> Json<Vec<Department>> {
    info!("department find");
    Json(state.store.list().await)
}

async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<Department>, ApiError> {
    info!(id, "department find");
    Ok(Json(state.store.find_by_id(id).await?))
}

async fn list_with_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<Department>>, ApiError> {
    info!("department find with employees");
    observability::AGGREGATIONS_TOTAL.inc();
    Ok(Json(state.aggregator.list_with_employees().await?))
}

/// Build the full application router: operational endpoints plus the
/// department API.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    let api = Router::new()
        .route("/api/department/create", post(create_department))
        .route("/api/department/all", get(list_departments))
        .route("/api/department/search/:id", get(get_department))
        .route("/api/department/with-employees", get(list_with_employees))
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
