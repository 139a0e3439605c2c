//! Operator diagnostics: store status, a store write/delete self-test and a completion check.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{KnowledgeChunk, NewKnowledgeChunk, ScholarsService};
use scholars_providers::{ChatMessage, Role};

const STATUS_SAMPLE_SIZE: u32 = 5;
const PROBE_CONTENT: &str = "Test content for table verification";
const CHECK_PROMPT: &str = "Say 'Hello, this is a test!'";
const CHECK_MAX_TOKENS: u32 = 50;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreStatus {
	pub success: bool,
	pub total_records: u64,
	pub sample: Vec<KnowledgeChunk>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyReport {
	pub success: bool,
	pub message: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}
impl VerifyReport {
	fn failed(message: &str, error: String) -> Self {
		Self { success: false, message: message.to_string(), error: Some(error) }
	}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompletionCheck {
	pub success: bool,
	pub message: String,
	pub has_key: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub test_response: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl ScholarsService {
	pub async fn store_status(&self) -> StoreStatus {
		let mut status =
			StoreStatus { success: false, total_records: 0, sample: Vec::new(), error: None };
		let store = match self.knowledge_store() {
			Ok(store) => store,
			Err(err) => {
				status.error = Some(err.to_string());

				return status;
			},
		};
		let outcome = async {
			let total = store.count().await?;
			let sample = store.recent(STATUS_SAMPLE_SIZE).await?;

			Ok::<_, crate::Error>((total, sample))
		}
		.await;

		match outcome {
			Ok((total, sample)) => {
				status.success = true;
				status.total_records = total;
				status.sample = sample;
			},
			Err(err) => {
				tracing::warn!(error = %err, "Knowledge store status check failed.");

				status.error = Some(err.to_string());
			},
		}

		status
	}

	/// Writes a probe chunk and deletes it again. Both steps must succeed.
	pub async fn verify_store(&self) -> VerifyReport {
		let store = match self.knowledge_store() {
			Ok(store) => store,
			Err(err) =>
				return VerifyReport::failed("Knowledge store is unavailable.", err.to_string()),
		};
		let mut metadata = Map::new();

		metadata.insert("test".to_string(), Value::Bool(true));

		if let Ok(created_at) = OffsetDateTime::now_utc().format(&Rfc3339) {
			metadata.insert("created_at".to_string(), Value::String(created_at));
		}

		let probe = NewKnowledgeChunk { content: PROBE_CONTENT.to_string(), metadata };
		let stored = match store.insert(&probe).await {
			Ok(stored) => stored,
			Err(err) => {
				tracing::warn!(error = %err, "Store verification insert failed.");

				return VerifyReport::failed(
					"Insert into the knowledge store failed.",
					err.to_string(),
				);
			},
		};

		if let Err(err) = store.delete(stored.id).await {
			tracing::warn!(id = %stored.id, error = %err, "Store verification cleanup failed.");

			return VerifyReport::failed(
				&format!("Probe row {} was inserted but could not be deleted.", stored.id),
				err.to_string(),
			);
		}

		VerifyReport {
			success: true,
			message: "Knowledge store accepted a write and a delete.".to_string(),
			error: None,
		}
	}

	/// Sends one small completion request to confirm the provider answers.
	pub async fn check_completion(&self) -> CompletionCheck {
		let Some(cfg) = self.cfg.providers.completion.as_ref() else {
			return CompletionCheck {
				success: false,
				message: "No completion provider is configured.".to_string(),
				has_key: false,
				test_response: None,
				error: None,
			};
		};
		let messages = [ChatMessage::new(Role::User, CHECK_PROMPT)];

		match self.backends.completion.complete(cfg, &messages, CHECK_MAX_TOKENS).await {
			Ok(text) => CompletionCheck {
				success: true,
				message: format!("Completion provider {} answered.", cfg.provider_id),
				has_key: true,
				test_response: Some(text),
				error: None,
			},
			Err(err) => {
				tracing::warn!(provider_id = %cfg.provider_id, error = %err, "Completion check failed.");

				CompletionCheck {
					success: false,
					message: format!("Completion provider {} did not answer.", cfg.provider_id),
					has_key: true,
					test_response: None,
					error: Some(err.to_string()),
				}
			},
		}
	}
}
