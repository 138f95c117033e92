use axum::{
	Json, Router,
	extract::{RawQuery, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;

use crate::state::AppState;
use catalog_domain::RawParams;
use catalog_service::{Error, SearchResponse};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/catalog/search", get(search))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

/// Query parameters are decoded by the normalizer itself, so malformed values degrade to
/// defaults instead of rejecting the request.
async fn search(
	State(state): State<AppState>,
	RawQuery(query): RawQuery,
) -> Result<Json<SearchResponse>, ApiError> {
	let raw = RawParams::from_query_string(query.as_deref().unwrap_or_default());
	let response = state.service.search_params(&raw).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: &'static str,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: &'static str, message: impl Into<String>) -> Self {
		Self { status, error_code, message: message.into() }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } =>
				Self::new(StatusCode::BAD_REQUEST, "invalid_request", message),
			Error::Provider { .. } | Error::Storage { .. } | Error::Qdrant { .. } => {
				tracing::error!(error = %err, "Catalog search failed.");

				Self::new(
					StatusCode::BAD_GATEWAY,
					"upstream_unavailable",
					"A search backend is unavailable.",
				)
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code.to_string(), message: self.message };

		(self.status, Json(body)).into_response()
	}
}
