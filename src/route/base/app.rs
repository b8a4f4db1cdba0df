use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::ApiState;

pub fn app() -> Router<ApiState> {
    Router::<ApiState>::new().route("/", get(info))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InfoResponse {
    pub version: &'static str,
}

impl IntoResponse for InfoResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub async fn info() -> InfoResponse {
    InfoResponse {
        version: env!("CARGO_PKG_VERSION"),
    }
}
