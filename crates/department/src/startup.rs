use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use client::{HttpEmployeeClient, StaticResolver, EMPLOYEE_SERVICE};
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use models::Department;
use service::EntityStore;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::aggregator::DepartmentAggregator;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: Option<&configs::AppConfig>) -> anyhow::Result<SocketAddr> {
    let (host, port) = match cfg {
        Some(c) => (c.server.host.clone(), c.server.port),
        None => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8081);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_default();

    let cfg = match configs::AppConfig::load_and_validate("department") {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!(error = %e, "no usable department config, using defaults");
            None
        }
    };

    // Remote lookup path: logical name -> resolver -> HTTP client
    let remote = cfg.as_ref().map(|c| c.remote.clone()).unwrap_or_default();
    let resolver =
        Arc::new(StaticResolver::new(EMPLOYEE_SERVICE, remote.employee_backends.clone()));
    let employees = Arc::new(HttpEmployeeClient::new(
        resolver,
        remote.connect_timeout(),
        remote.request_timeout(),
    )?);

    // Owned, explicitly constructed state: one store per process
    let store = EntityStore::<Department>::new();
    let aggregator = DepartmentAggregator::new(Arc::clone(&store), employees);
    let state = AppState { store, aggregator };

    let app: Router = routes::build_router(state, build_cors());

    let addr = load_bind_addr(cfg.as_ref())?;
    info!(%addr, backends = ?remote.employee_backends, "starting department service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
