use axum::{
	Json, Router,
	extract::{Path, State, rejection::JsonRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;
use gate_service::{DepartureRecord, Error as ServiceError, SyncRequest};

pub const DEPARTURES_PATH: &str = "/api/departures";

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route(DEPARTURES_PATH, get(list_departures).post(sync_departure))
		.route("/api/departures/{id}/clear", post(clear_departure))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn list_departures(
	State(state): State<AppState>,
) -> Result<Json<Vec<DepartureRecord>>, ApiError> {
	let response = state.service.list().await?;

	Ok(Json(response))
}

async fn sync_departure(
	State(state): State<AppState>,
	payload: Result<Json<SyncRequest>, JsonRejection>,
) -> Result<Json<DepartureRecord>, ApiError> {
	let Json(payload) = payload.map_err(|rejection| {
		json_error(rejection.status(), "INVALID_REQUEST", rejection.body_text(), None)
	})?;
	let response = state.service.sync(payload).await?;

	Ok(Json(response))
}

async fn clear_departure(
	State(state): State<AppState>,
	Path(id): Path<i64>,
) -> Result<Json<DepartureRecord>, ApiError> {
	let response = state.service.clear(id).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { field, message } => json_error(
				StatusCode::UNPROCESSABLE_ENTITY,
				"INVALID_REQUEST",
				message,
				Some(vec![field]),
			),
			ServiceError::NotFound { message } =>
				json_error(StatusCode::NOT_FOUND, "NOT_FOUND", message, None),
			ServiceError::Conflict { message } =>
				json_error(StatusCode::CONFLICT, "CONFLICT", message, None),
			ServiceError::Storage { message } => {
				tracing::error!(error = %message, "Storage failure.");

				json_error(
					StatusCode::INTERNAL_SERVER_ERROR,
					"INTERNAL_ERROR",
					"Internal error.",
					None,
				)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}
