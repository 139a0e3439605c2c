use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{Error, KnowledgeChunk, NewKnowledgeChunk, Result, ScholarsService};
use scholars_chunking::ChunkingConfig;

#[derive(Clone, Debug, Deserialize)]
pub struct IngestRequest {
	#[serde(default)]
	pub content: String,
	#[serde(default)]
	pub metadata: Option<Map<String, Value>>,
	/// Overrides `chunking.max_chars` for this submission.
	#[serde(default)]
	pub max_chunk_size: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChunkError {
	pub chunk_index: u32,
	pub error: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IngestResponse {
	/// True when at least one chunk was stored.
	pub success: bool,
	pub chunks_processed: usize,
	pub chunks_stored: usize,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub errors: Vec<ChunkError>,
	pub stored_data: Vec<KnowledgeChunk>,
}

impl ScholarsService {
	/// Chunks `req.content`, tags each chunk and stores the chunks one at a time.
	///
	/// A failed insert is recorded in `errors` and the remaining chunks are still attempted.
	pub async fn ingest(&self, req: IngestRequest) -> Result<IngestResponse> {
		if req.content.trim().is_empty() {
			return Err(Error::InvalidRequest { message: "Content is required.".to_string() });
		}

		let max_chars = match req.max_chunk_size {
			Some(0) =>
				return Err(Error::InvalidRequest {
					message: "max_chunk_size must be greater than zero.".to_string(),
				}),
			Some(size) => size,
			None => self.cfg.chunking.max_chars,
		};
		let store = self.knowledge_store()?;
		let chunks = scholars_chunking::split_text(&req.content, &ChunkingConfig { max_chars });
		let caller_metadata = req.metadata.unwrap_or_default();
		let ingested_at = OffsetDateTime::now_utc().format(&Rfc3339).ok();
		let mut stored_data = Vec::with_capacity(chunks.len());
		let mut errors = Vec::new();

		tracing::info!(chunks = chunks.len(), max_chars, "Ingesting knowledge submission.");

		for chunk in &chunks {
			let mut metadata = caller_metadata.clone();

			metadata.extend(scholars_chunking::extract_metadata(&chunk.text));
			metadata.insert("chunk_size".to_string(), Value::from(chunk.char_len()));
			metadata.insert("chunk_index".to_string(), Value::from(chunk.chunk_index));

			if let Some(ingested_at) = ingested_at.as_ref() {
				metadata.insert("ingested_at".to_string(), Value::String(ingested_at.clone()));
			}

			let new_chunk = NewKnowledgeChunk { content: chunk.text.clone(), metadata };

			match store.insert(&new_chunk).await {
				Ok(stored) => {
					tracing::debug!(chunk_index = chunk.chunk_index, id = %stored.id, "Stored chunk.");

					stored_data.push(stored);
				},
				Err(err) => {
					tracing::warn!(chunk_index = chunk.chunk_index, error = %err, "Failed to store chunk.");

					errors.push(ChunkError { chunk_index: chunk.chunk_index, error: err.to_string() });
				},
			}
		}

		Ok(IngestResponse {
			success: !stored_data.is_empty(),
			chunks_processed: chunks.len(),
			chunks_stored: stored_data.len(),
			errors,
			stored_data,
		})
	}
}
