use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use nearby_geo::{GeoPoint, NamedDistance};
use serde::{Deserialize, Serialize};

use crate::nearby_web::handlers::WebError;
use crate::nearby_web::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyQuery {
    latitude: f64,
    longitude: f64,
    max_distance: Option<f64>,
    max_results: Option<i64>,
}

#[derive(Serialize)]
struct NearbyView {
    items: Vec<NamedDistance>,
}

pub async fn handle_nearby_get(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Response, WebError> {
    let location = GeoPoint::new(query.latitude, query.longitude);
    let max_distance = query.max_distance.unwrap_or(state.defaults.max_distance);
    let max_results = query.max_results.unwrap_or(state.defaults.max_results);

    let items = state.provider
        .nearby_locations(location, max_distance, max_results)
        .await?;

    Ok(Json(NearbyView { items }).into_response())
}

pub async fn handle_health_get() -> impl IntoResponse {
    "ok"
}
