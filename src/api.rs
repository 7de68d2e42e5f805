use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::FleetConfig;
use crate::error::{panic_response, ApiError};
use crate::generator;
use crate::metrics::summarize;
use crate::models::{
    EndpointMap, HealthResponse, NetworkInfoResponse, NodeDetailResponse, NodePage, ServiceInfo,
    SummaryResponse,
};
use crate::pagination::{paginate, ListQuery, PageRequest};

pub const SERVICE_NAME: &str = "pnode-dashboard";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEMO_NOTE: &str = "Demo data - Ready for real network API integration";

#[derive(Clone)]
pub struct AppState {
    pub fleet: Arc<FleetConfig>,
}

impl AppState {
    pub fn new(fleet: FleetConfig) -> Self {
        AppState {
            fleet: Arc::new(fleet),
        }
    }

    fn network(&self, requested: Option<String>) -> String {
        requested.unwrap_or_else(|| self.fleet.network().to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct NetworkQuery {
    pub network: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/pnodes", get(list_pnodes))
        .route("/pnodes/", get(list_pnodes))
        .route("/pnodes/health", get(health))
        .route("/pnodes/stats/summary", get(summary))
        .route("/pnodes/network/info", get(network_info))
        .route("/pnodes/:pubkey", get(pnode_detail))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME,
        status: "running",
        mode: "demo",
        note: DEMO_NOTE,
        endpoints: EndpointMap {
            health: "/health",
            pnodes: "/pnodes",
            pnode_detail: "/pnodes/{pubkey}",
            pnodes_summary: "/pnodes/stats/summary",
            network_info: "/pnodes/network/info",
        },
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: SERVICE_VERSION,
        mode: "demo",
        timestamp: Utc::now(),
    })
}

pub async fn list_pnodes(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<NodePage>, ApiError> {
    let request = PageRequest::from_query(&query)?;
    let network = state.network(query.network);

    let roster = generator::roster(&network, state.fleet.roster_size());
    let page = paginate(roster, &request);
    tracing::info!(
        network = %network,
        total = page.total,
        skip = request.skip,
        limit = request.limit,
        "listed pnodes"
    );

    Ok(Json(NodePage {
        network,
        total: page.total,
        skip: request.skip,
        limit: request.limit,
        count: page.items.len(),
        active_only: request.active_only,
        is_real_data: false,
        note: DEMO_NOTE,
        pnodes: page.items,
    }))
}

pub async fn pnode_detail(
    State(state): State<AppState>,
    Path(pubkey): Path<String>,
    Query(query): Query<NetworkQuery>,
) -> Json<NodeDetailResponse> {
    let detail = generator::generate_detail(&pubkey);
    tracing::info!(pubkey = %pubkey, status = ?detail.status, "served pnode detail");

    Json(NodeDetailResponse {
        network: state.network(query.network),
        detail,
        last_updated: Utc::now(),
        is_real_data: false,
        notes: DEMO_NOTE,
    })
}

pub async fn summary(
    State(state): State<AppState>,
    Query(query): Query<NetworkQuery>,
) -> Json<SummaryResponse> {
    let network = state.network(query.network);
    let roster = generator::roster(&network, state.fleet.roster_size());
    let snapshot = generator::network_snapshot(&network);
    let stats = summarize(&roster);
    tracing::info!(
        network = %network,
        active = stats.active_pnodes,
        total = stats.total_pnodes,
        "computed fleet summary"
    );

    Json(SummaryResponse {
        network,
        stats,
        current_epoch: snapshot.epoch,
        current_slot: snapshot.slot,
        block_height: snapshot.block_height,
        network_version: snapshot.network_version,
        is_real_data: false,
        demo_note: DEMO_NOTE,
    })
}

pub async fn network_info(
    State(state): State<AppState>,
    Query(query): Query<NetworkQuery>,
) -> Json<NetworkInfoResponse> {
    let network = state.network(query.network);
    let snapshot = generator::network_snapshot(&network);

    Json(NetworkInfoResponse {
        network,
        snapshot,
        is_real_data: false,
        timestamp: Utc::now(),
        note: DEMO_NOTE,
    })
}
