//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::sim::report::ComparisonReport;
use crate::sim::strategy::Strategy;
use crate::sim::types::HOURS_PER_DAY;

use super::AppState;
use super::types::{
    ErrorResponse, KpiRecord, LoadRecord, ResultRecord, ResultsQuery, ScenarioSummary,
    StateResponse,
};

/// Returns the scenario summary and both strategies' KPI blocks.
///
/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let comparison = ComparisonReport::new(&state.uncontrolled, &state.smart);

    Json(StateResponse {
        scenario: ScenarioSummary::from(&state.scenario),
        uncontrolled: KpiRecord::from(&state.uncontrolled.kpi),
        smart: KpiRecord::from(&state.smart.kpi),
        peak_reduction_pct: comparison.peak_reduction_pct(),
    })
}

/// Returns both strategies' hourly load curves, one record per hour.
///
/// `GET /load` → 200 + `Vec<LoadRecord>` JSON (24 rows)
pub async fn get_load(State(state): State<Arc<AppState>>) -> Json<Vec<LoadRecord>> {
    let records: Vec<LoadRecord> = (0..HOURS_PER_DAY)
        .map(|hour| LoadRecord {
            hour,
            uncontrolled_kw: state.uncontrolled.load.kw_at(hour),
            smart_kw: state.smart.load.kw_at(hour),
        })
        .collect();

    Json(records)
}

/// Returns per-EV results for one strategy, optionally filtered by EV id.
///
/// `GET /results` → 200 + `Vec<ResultRecord>` JSON (uncontrolled)
/// `GET /results?strategy=smart` → smart run
/// `GET /results?from=N&to=M` → id range (inclusive)
/// `GET /results?strategy=bogus` or `from > to` → 400 + `ErrorResponse`
pub async fn get_results(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResultsQuery>,
) -> impl IntoResponse {
    let strategy_name = query.strategy.as_deref().unwrap_or("uncontrolled");
    let run = match Strategy::parse(strategy_name) {
        Some(Strategy::Uncontrolled) => &state.uncontrolled,
        Some(Strategy::RuleBasedSmart) => &state.smart,
        None => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!(
                        "unknown strategy \"{strategy_name}\", expected \"uncontrolled\" or \"smart\""
                    ),
                }),
            ));
        }
    };

    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(u32::MAX);
    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let records: Vec<ResultRecord> = run
        .results
        .iter()
        .filter(|r| r.ev_id >= from && r.ev_id <= to)
        .map(ResultRecord::from)
        .collect();

    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::config::ScenarioConfig;
    use crate::fleet::EvProfile;
    use crate::sim::engine::run_fleet;
    use crate::sim::types::StrategyConfig;

    fn make_test_state() -> Arc<AppState> {
        let scenario = ScenarioConfig::baseline();
        let fleet: Vec<EvProfile> = (1..=4)
            .map(|ev_id| EvProfile {
                ev_id,
                arrival_hour: 14,
                departure_hour: 21,
                battery_kwh: 56.0,
                initial_soc: 0.25,
                target_soc: 0.50,
            })
            .collect();
        let cfg = StrategyConfig::with_peak_hours(
            scenario.simulation.charging_power_kw,
            scenario.smart.peak_hours.clone(),
        );
        let uncontrolled = run_fleet(&fleet, &cfg, Strategy::Uncontrolled).unwrap();
        let smart = run_fleet(&fleet, &cfg, Strategy::RuleBasedSmart).unwrap();
        Arc::new(AppState {
            scenario,
            uncontrolled,
            smart,
        })
    }

    #[tokio::test]
    async fn state_returns_200() {
        let state = make_test_state();
        let app = router(state);

        let req = Request::builder()
            .uri("/state")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json.get("scenario").is_some());
        assert!(json.get("uncontrolled").is_some());
        assert!(json.get("smart").is_some());
        assert!(json.get("peak_reduction_pct").is_some());
    }

    #[tokio::test]
    async fn load_returns_every_hour() {
        let state = make_test_state();
        let app = router(state);

        let req = Request::builder().uri("/load").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), 24);
        assert_eq!(json[0]["hour"], 0);
        assert_eq!(json[23]["hour"], 23);
    }

    #[tokio::test]
    async fn results_defaults_to_uncontrolled() {
        let state = make_test_state();
        let app = router(state);

        let req = Request::builder()
            .uri("/results")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), 4);
        assert!(json[0].get("energy_delivered_kwh").is_some());
    }

    #[tokio::test]
    async fn results_range_query_filters_by_ev_id() {
        let state = make_test_state();
        let app = router(state);

        let req = Request::builder()
            .uri("/results?strategy=smart&from=2&to=3")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), 2);
        assert_eq!(json[0]["ev_id"], 2);
        assert_eq!(json[1]["ev_id"], 3);
    }

    #[tokio::test]
    async fn results_unknown_strategy_returns_400() {
        let state = make_test_state();
        let app = router(state);

        let req = Request::builder()
            .uri("/results?strategy=bogus")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn results_invalid_range_returns_400() {
        let state = make_test_state();
        let app = router(state);

        let req = Request::builder()
            .uri("/results?from=3&to=1")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
