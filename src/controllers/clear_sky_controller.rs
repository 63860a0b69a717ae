use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::config::SiteConfig;
use crate::error::ClearSkyError;
use crate::models::api::{
    BatchItem, BatchResponse, ClearSkyRequest, ClearSkyResponse, ErrorBody, HealthStatus,
    SiteClearSkyRequest,
};
use crate::models::clear_sky::{Atmosphere, ClearSkyInputs};
use crate::services::bird;
use crate::shared_state::AppState;

fn invalid_parameter(e: &ClearSkyError) -> ErrorBody {
    ErrorBody { error: e.to_string(), parameter: Some(e.parameter()) }
}

/// Runs the model and shapes the HTTP reply.
fn respond(state: &AppState, inputs: ClearSkyInputs) -> Response {
    match bird::compute(&inputs) {
        Ok(outputs) => {
            state.record_success();
            let response = ClearSkyResponse {
                timestamp: chrono::Utc::now(),
                inputs,
                outputs,
                sun_up: bird::sun_is_up(&inputs),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            state.record_rejection();
            warn!("[CLEAR-SKY] rejected: {}", e);
            (StatusCode::UNPROCESSABLE_ENTITY, Json(invalid_parameter(&e))).into_response()
        }
    }
}

/// POST /api/clear-sky
/// Compute clear-sky irradiance
///
/// Evaluates the Bird clear-sky model for the supplied geometry. Atmospheric
/// fields that are omitted are filled from the configured default atmosphere.
#[utoipa::path(
    post,
    path = "/api/clear-sky",
    request_body = ClearSkyRequest,
    responses(
        (status = 200, description = "Irradiance components", body = ClearSkyResponse),
        (status = 422, description = "An atmospheric input is out of range", body = ErrorBody)
    )
)]
pub async fn compute_clear_sky(
    State(state): State<AppState>,
    Json(req): Json<ClearSkyRequest>,
) -> impl IntoResponse {
    let inputs = req.resolve(&state.config.atmosphere);
    respond(&state, inputs)
}

/// POST /api/clear-sky/batch
/// Compute a series of clear-sky evaluations
///
/// Each item is evaluated independently; an invalid item is reported in its
/// slot and does not fail the rest of the batch.
#[utoipa::path(
    post,
    path = "/api/clear-sky/batch",
    request_body = Vec<ClearSkyRequest>,
    responses(
        (status = 200, description = "Per-item results", body = BatchResponse)
    )
)]
pub async fn compute_clear_sky_batch(
    State(state): State<AppState>,
    Json(reqs): Json<Vec<ClearSkyRequest>>,
) -> impl IntoResponse {
    let defaults = state.config.atmosphere;
    let series: Vec<ClearSkyInputs> = reqs.iter().map(|r| r.resolve(&defaults)).collect();

    let items: Vec<BatchItem> = bird::compute_series(&series)
        .into_iter()
        .enumerate()
        .map(|(index, result)| match result {
            Ok(outputs) => {
                state.record_success();
                BatchItem { index, outputs: Some(outputs), error: None }
            }
            Err(e) => {
                state.record_rejection();
                BatchItem { index, outputs: None, error: Some(invalid_parameter(&e)) }
            }
        })
        .collect();

    let failed = items.iter().filter(|i| i.error.is_some()).count();
    info!("[BATCH] {} items, {} rejected", items.len(), failed);

    Json(BatchResponse {
        timestamp: chrono::Utc::now(),
        succeeded: items.len() - failed,
        failed,
        items,
    })
    .into_response()
}

/// GET /api/sites
/// List configured sites
#[utoipa::path(
    get,
    path = "/api/sites",
    responses(
        (status = 200, description = "Configured site presets", body = Vec<SiteConfig>)
    )
)]
pub async fn list_sites(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.config.sites.clone()).into_response()
}

/// POST /api/sites/{id}/clear-sky
/// Compute clear-sky irradiance for a site
///
/// Uses the site's configured atmosphere with the supplied geometry.
#[utoipa::path(
    post,
    path = "/api/sites/{id}/clear-sky",
    params(
        ("id" = String, Path, description = "Site ID")
    ),
    request_body = SiteClearSkyRequest,
    responses(
        (status = 200, description = "Irradiance components", body = ClearSkyResponse),
        (status = 404, description = "Site not found", body = ErrorBody),
        (status = 422, description = "dni_mod is out of range", body = ErrorBody)
    )
)]
pub async fn compute_site_clear_sky(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<SiteClearSkyRequest>,
) -> impl IntoResponse {
    let Some(site) = state.config.site(&id) else {
        let body = ErrorBody { error: format!("site '{}' not found", id), parameter: None };
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    };
    let inputs = ClearSkyInputs::from_atmosphere(req.zenith, req.r, &site.atmosphere, req.dni_mod);
    respond(&state, inputs)
}

/// GET /api/atmosphere/defaults
/// Default atmosphere applied to ad-hoc requests
#[utoipa::path(
    get,
    path = "/api/atmosphere/defaults",
    responses(
        (status = 200, description = "Default atmosphere", body = Atmosphere)
    )
)]
pub async fn get_default_atmosphere(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.config.atmosphere).into_response()
}

/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service health", body = HealthStatus)
    )
)]
pub async fn get_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthStatus {
        status: "OK".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        computations: state.computations(),
        rejected: state.rejected(),
        sites_total: state.config.sites.len(),
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::to_bytes;
    use serde_json::Value;

    fn state() -> AppState {
        let config = Config::from_json(
            r#"{
                "server": { "port": 0 },
                "sites": [
                    { "id": "golden", "name": "Golden, CO",
                      "atmosphere": { "pressure": 820, "ozone": 0.3, "water": 1.5,
                                      "taua": 0.08, "ba": 0.85, "albedo": 0.2 } }
                ]
            }"#,
        )
        .unwrap();
        AppState::new(config)
    }

    fn request(zenith: f64) -> ClearSkyRequest {
        ClearSkyRequest {
            zenith,
            r: 1.0,
            pressure: None,
            ozone: None,
            water: None,
            taua: None,
            ba: None,
            albedo: None,
            dni_mod: None,
        }
    }

    async fn body_json(resp: Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_compute_returns_outputs() {
        let state = state();
        let resp = compute_clear_sky(State(state.clone()), Json(request(30.0))).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["sun_up"], true);
        assert!(body["outputs"]["direct_normal"].as_f64().unwrap() > 0.0);
        assert_eq!(body["inputs"]["pressure"], 1013.0);
        assert_eq!(state.computations(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_is_unprocessable() {
        let state = state();
        let req = ClearSkyRequest { water: Some(-2.0), ..request(30.0) };
        let resp = compute_clear_sky(State(state.clone()), Json(req)).await.into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert_eq!(body["parameter"], "water");
        assert_eq!(state.rejected(), 1);
        assert_eq!(state.computations(), 0);
    }

    #[tokio::test]
    async fn test_night_is_not_an_error() {
        let resp = compute_clear_sky(State(state()), Json(request(100.0))).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["sun_up"], false);
        assert_eq!(body["outputs"]["global_horiz"], 0.0);
    }

    #[tokio::test]
    async fn test_batch_reports_failures_in_place() {
        let state = state();
        let reqs = vec![request(20.0), ClearSkyRequest { taua: Some(500.0), ..request(20.0) }];
        let resp = compute_clear_sky_batch(State(state.clone()), Json(reqs)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["succeeded"], 1);
        assert_eq!(body["failed"], 1);
        assert_eq!(body["items"][1]["error"]["parameter"], "taua");
        assert!(body["items"][0]["outputs"].is_object());
    }

    #[tokio::test]
    async fn test_site_uses_configured_atmosphere() {
        let req = SiteClearSkyRequest { zenith: 50.11162202402973, r: 0.9965422973539708, dni_mod: Some(0.0) };
        let resp = compute_site_clear_sky(Path("golden".to_string()), State(state()), Json(req))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let dni = body["outputs"]["direct_normal"].as_f64().unwrap();
        assert!((dni - 874.5066).abs() < 0.1, "DNI {dni}");
        assert_eq!(body["outputs"]["modified"]["direct_normal"], 0.0);
    }

    #[tokio::test]
    async fn test_unknown_site_is_not_found() {
        let req = SiteClearSkyRequest { zenith: 10.0, r: 1.0, dni_mod: None };
        let resp = compute_site_clear_sky(Path("nowhere".to_string()), State(state()), Json(req))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_counts_requests() {
        let state = state();
        let _ = compute_clear_sky(State(state.clone()), Json(request(10.0))).await;
        let body = body_json(get_health(State(state)).await.into_response()).await;
        assert_eq!(body["status"], "OK");
        assert_eq!(body["computations"], 1);
        assert_eq!(body["sites_total"], 1);
    }
}
