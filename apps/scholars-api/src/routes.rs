use axum::{
	Json, Router,
	extract::{Query, State, rejection::JsonRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;
use scholars_service::{
	ChatRequest, ChatResponse, CompletionCheck, Error as ServiceError, IngestRequest,
	IngestResponse, KnowledgeSearchRequest, KnowledgeSearchResponse, Resource, Scholarship,
	StoreStatus, VerifyReport,
};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/chat", post(chat))
		.route("/api/knowledge/add", post(knowledge_add))
		.route("/api/knowledge/search", get(knowledge_search))
		.route("/api/knowledge/status", get(knowledge_status))
		.route("/api/knowledge/verify", post(knowledge_verify))
		.route("/api/scholarships", get(scholarships))
		.route("/api/resources", get(resources))
		.route("/api/completion/check", get(completion_check))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn chat(
	State(state): State<AppState>,
	payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
	let Json(payload) = payload?;
	let response = state.service.chat(payload).await?;

	Ok(Json(response))
}

async fn knowledge_add(
	State(state): State<AppState>,
	payload: Result<Json<IngestRequest>, JsonRejection>,
) -> Result<Json<IngestResponse>, ApiError> {
	let Json(payload) = payload?;
	let response = state.service.ingest(payload).await?;

	Ok(Json(response))
}

async fn knowledge_search(
	State(state): State<AppState>,
	Query(query): Query<KnowledgeSearchRequest>,
) -> Json<KnowledgeSearchResponse> {
	Json(state.service.knowledge_search(query).await)
}

async fn knowledge_status(State(state): State<AppState>) -> Json<StoreStatus> {
	Json(state.service.store_status().await)
}

async fn knowledge_verify(State(state): State<AppState>) -> Json<VerifyReport> {
	Json(state.service.verify_store().await)
}

async fn scholarships(State(state): State<AppState>) -> Json<Vec<Scholarship>> {
	Json(state.service.list_scholarships().await)
}

async fn resources(State(state): State<AppState>) -> Json<Vec<Resource>> {
	Json(state.service.list_resources().await)
}

async fn completion_check(State(state): State<AppState>) -> Json<CompletionCheck> {
	Json(state.service.check_completion().await)
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
			ServiceError::InvalidRequest { message } =>
				ApiError::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message, None),
			ServiceError::NotConfigured { message } =>
				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "NOT_CONFIGURED", message, None),
			ServiceError::NotFound { message } =>
				ApiError::new(StatusCode::NOT_FOUND, "NOT_FOUND", message, None),
			ServiceError::UpstreamUnavailable { message } => ApiError::new(
				StatusCode::SERVICE_UNAVAILABLE,
				"UPSTREAM_UNAVAILABLE",
				message,
				None,
			),
			ServiceError::Storage { message } => {
				tracing::error!(error = %message, "Request failed on a storage error.");

				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", message, None)
			},
		}
	}
}

// Any body the JSON extractor refuses is invalid input, including unknown chat roles.
impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		ApiError::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", rejection.body_text(), None)
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}
