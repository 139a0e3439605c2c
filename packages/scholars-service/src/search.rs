use serde::{Deserialize, Serialize};

use crate::{
	ScholarsService, ScoredChunk,
	keywords::{self, extract_keywords},
};

#[derive(Clone, Debug, Deserialize)]
pub struct KnowledgeSearchRequest {
	#[serde(default = "default_probe_query")]
	pub q: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct KnowledgeSearchResponse {
	pub success: bool,
	pub query: String,
	pub keywords: Vec<String>,
	pub total_records: usize,
	pub matching_records: usize,
	pub matches: Vec<ScoredChunk>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl ScholarsService {
	/// Returns the `match_count` best-scoring chunks joined by blank lines, or an empty
	/// string when nothing matches or the store cannot be reached.
	///
	/// Only the newest `retrieval.candidate_limit` chunks are considered.
	pub async fn search_knowledge(&self, query: &str, match_count: usize) -> String {
		let keywords = extract_keywords(query);

		self.retrieve(&keywords, match_count).await
	}

	pub(crate) async fn retrieve(&self, keywords: &[String], match_count: usize) -> String {
		if keywords.is_empty() {
			return String::new();
		}

		let Some(store) = self.backends.knowledge.as_ref() else {
			tracing::debug!("No knowledge store configured; skipping retrieval.");

			return String::new();
		};

		match store.recent(self.cfg.retrieval.candidate_limit).await {
			Ok(candidates) => {
				let ranked = keywords::rank(candidates, keywords, match_count);

				tracing::debug!(matches = ranked.len(), "Knowledge retrieval finished.");

				keywords::join_contents(&ranked)
			},
			Err(err) => {
				tracing::warn!(error = %err, "Knowledge retrieval failed; continuing without context.");

				String::new()
			},
		}
	}

	/// Shows how a query is tokenized and which stored chunks it would match.
	pub async fn knowledge_search(&self, req: KnowledgeSearchRequest) -> KnowledgeSearchResponse {
		let query = if req.q.trim().is_empty() { default_probe_query() } else { req.q };
		let keywords = extract_keywords(&query);
		let mut response = KnowledgeSearchResponse {
			success: false,
			query,
			keywords,
			total_records: 0,
			matching_records: 0,
			matches: Vec::new(),
			error: None,
		};
		let store = match self.knowledge_store() {
			Ok(store) => store,
			Err(err) => {
				response.error = Some(err.to_string());

				return response;
			},
		};

		match store.recent(self.cfg.retrieval.candidate_limit).await {
			Ok(candidates) => {
				let total = candidates.len();
				let matches = keywords::rank(candidates, &response.keywords, total);

				response.success = true;
				response.total_records = total;
				response.matching_records = matches.len();
				response.matches = matches;
			},
			Err(err) => {
				tracing::warn!(error = %err, "Knowledge search probe failed.");

				response.error = Some(err.to_string());
			},
		}

		response
	}
}

fn default_probe_query() -> String {
	"meeting".to_string()
}
