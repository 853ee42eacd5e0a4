use crate::cli::ServeArgs;
use crate::infra::{load_countries, AppState, ScoringState};
use crate::routes::with_compliance_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use charity_compliance::config::AppConfig;
use charity_compliance::error::AppError;
use charity_compliance::scoring::ComplianceEngine;
use charity_compliance::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let countries = load_countries(config.countries_csv.as_deref())?;
    let scoring = ScoringState {
        engine: Arc::new(ComplianceEngine::new(config.scoring.clone())),
        countries: Arc::new(countries),
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_compliance_routes(scoring)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "charity compliance scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
