use crate::{
    api::{models::*, openapi::ApiDoc},
    core::{
        models::{audit::AppLog, settlement::SettlementPlan},
        services::SettlementService,
    },
    infrastructure::logging::in_memory::InMemoryLogging,
};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{get, post},
};
use http::{Method, header};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub type AppService = SettlementService<InMemoryLogging>;

// Define API routes
pub fn api_routes(service: Arc<AppService>) -> Router {
    Router::new()
        .route("/smart-settlement", post(optimize_settlement))
        .route("/logs", get(get_app_logs))
        .with_state(service)
}

/// Full application router with CORS, tracing, timeout and compression layers.
pub fn app_router(service: Arc<AppService>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(|| async { "OK" }))
        .nest("/api", api_routes(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
}

#[utoipa::path(
    post,
    path = "/api/smart-settlement",
    request_body = OptimizeSettlementRequest,
    responses(
        (status = 200, description = "Settlement plan computed", body = SettlementPlan),
        (status = 400, description = "Missing or malformed body", body = ErrorResponse),
        (status = 405, description = "Method not allowed"),
        (status = 422, description = "Balances do not net to zero (strict mode)", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn optimize_settlement(
    State(service): State<Arc<AppService>>,
    body: Bytes,
) -> Result<Json<SettlementPlan>, ApiError> {
    let (balances, members) = OptimizeSettlementRequest::from_body(&body)?.into_parts();
    let plan = service.optimize_settlement(&balances, &members).await?;
    Ok(Json(plan))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Recent optimization runs", body = [AppLog]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn get_app_logs(State(service): State<Arc<AppService>>) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}
