use axum::{extract::State, Json};
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClicksResponse {
    pub total_clicks: u64,
}

/// `GET /clicks`
pub async fn get_clicks(State(state): State<AppState>) -> Json<ClicksResponse> {
    state.metrics().requests.inc(&[("route", "/clicks")]);
    Json(ClicksResponse {
        total_clicks: state.counter().total(),
    })
}

/// `POST /click`. Any request body is ignored.
pub async fn post_click(State(state): State<AppState>) -> Json<ClicksResponse> {
    state.metrics().requests.inc(&[("route", "/click")]);
    let total_clicks = state.record_click().await;
    Json(ClicksResponse { total_clicks })
}
