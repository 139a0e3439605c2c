pub mod admin;
pub mod chat;
pub mod facts;
pub mod gateway;
pub mod ingest;
pub mod intent;
pub mod keywords;
pub mod prompt;
pub mod search;

mod error;

use std::{future::Future, pin::Pin, sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use uuid::Uuid;

pub use admin::{CompletionCheck, StoreStatus, VerifyReport};
pub use chat::{AnswerSource, ChatRequest, ChatResponse};
pub use error::{Error, Result};
pub use facts::{Facts, Resource, SampleCatalog, Scholarship};
pub use ingest::{ChunkError, IngestRequest, IngestResponse};
pub use intent::Intent;
pub use search::{KnowledgeSearchRequest, KnowledgeSearchResponse};
use scholars_config::{CompletionProviderConfig, Config};
pub use scholars_providers::{ChatMessage, Role};
use scholars_storage::db::Db;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A stored unit of retrievable text. Immutable once written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeChunk {
	pub id: Uuid,
	pub content: String,
	pub metadata: Map<String, Value>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewKnowledgeChunk {
	pub content: String,
	pub metadata: Map<String, Value>,
}

/// A chunk paired with the number of query keywords it contains. Lives for one query only.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredChunk {
	#[serde(flatten)]
	pub chunk: KnowledgeChunk,
	pub score: u32,
}

/// Persistence for knowledge chunks.
pub trait KnowledgeStore
where
	Self: Send + Sync,
{
	fn insert<'a>(&'a self, chunk: &'a NewKnowledgeChunk) -> BoxFuture<'a, Result<KnowledgeChunk>>;

	/// Returns at most `limit` chunks, newest first.
	fn recent<'a>(&'a self, limit: u32) -> BoxFuture<'a, Result<Vec<KnowledgeChunk>>>;

	fn delete<'a>(&'a self, id: Uuid) -> BoxFuture<'a, Result<()>>;

	fn count<'a>(&'a self) -> BoxFuture<'a, Result<u64>>;

	fn close<'a>(&'a self) -> BoxFuture<'a, ()> {
		Box::pin(async {})
	}
}

/// Read-only scholarship and resource listings.
pub trait FactsSource
where
	Self: Send + Sync,
{
	fn scholarships<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Scholarship>>>;

	fn resources<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Resource>>>;
}

pub trait CompletionProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a CompletionProviderConfig,
		messages: &'a [ChatMessage],
		max_tokens: u32,
	) -> BoxFuture<'a, scholars_providers::Result<String>>;
}

#[derive(Clone)]
pub struct Backends {
	/// `None` when no store is configured. Retrieval then finds nothing and ingestion is refused.
	pub knowledge: Option<Arc<dyn KnowledgeStore>>,
	pub facts: Arc<dyn FactsSource>,
	pub completion: Arc<dyn CompletionProvider>,
}
impl Backends {
	pub fn new(
		knowledge: Option<Arc<dyn KnowledgeStore>>,
		facts: Arc<dyn FactsSource>,
		completion: Arc<dyn CompletionProvider>,
	) -> Self {
		Self { knowledge, facts, completion }
	}

	/// Postgres-backed gateways when a pool is given, the sample catalog otherwise.
	pub fn from_db(db: Option<Db>) -> Self {
		let completion = Arc::new(HttpCompletion);

		match db {
			Some(db) => {
				let db = Arc::new(db);

				Self { knowledge: Some(db.clone()), facts: db, completion }
			},
			None => Self { knowledge: None, facts: Arc::new(SampleCatalog), completion },
		}
	}
}

pub struct ScholarsService {
	pub cfg: Config,
	pub backends: Backends,
}
impl ScholarsService {
	pub fn new(cfg: Config, db: Option<Db>) -> Self {
		Self { cfg, backends: Backends::from_db(db) }
	}

	pub fn with_backends(cfg: Config, backends: Backends) -> Self {
		Self { cfg, backends }
	}

	pub async fn close(&self) {
		if let Some(store) = self.backends.knowledge.as_ref() {
			store.close().await;
		}
	}

	pub(crate) fn knowledge_store(&self) -> Result<&Arc<dyn KnowledgeStore>> {
		self.backends.knowledge.as_ref().ok_or_else(|| Error::NotConfigured {
			message: "Knowledge store is not configured.".to_string(),
		})
	}
}

struct HttpCompletion;

impl CompletionProvider for HttpCompletion {
	fn complete<'a>(
		&'a self,
		cfg: &'a CompletionProviderConfig,
		messages: &'a [ChatMessage],
		max_tokens: u32,
	) -> BoxFuture<'a, scholars_providers::Result<String>> {
		Box::pin(scholars_providers::completion::complete(cfg, messages, max_tokens))
	}
}
