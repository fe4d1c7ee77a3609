use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nearby_geo::GeoError;
use tracing::warn;

pub mod api;

pub struct WebError(anyhow::Error);

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<GeoError>() {
            Some(GeoError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
            Some(GeoError::ResourceAccess { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            warn!("Request failed: {:?}", self.0);
        }

        (status, self.0.to_string()).into_response()
    }
}

impl<T: Into<anyhow::Error>> From<T> for WebError {
    fn from(err: T) -> Self {
        WebError(err.into())
    }
}
