use serde::{Deserialize, Serialize};

use crate::{
	Error, Result, ScholarsService,
	facts::{self, Facts},
	intent, keywords,
	prompt::{self, PromptContext},
};
use scholars_providers::{ChatMessage, Role};

#[derive(Clone, Debug, Deserialize)]
pub struct ChatRequest {
	#[serde(default)]
	pub messages: Vec<ChatMessage>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatResponse {
	pub content: String,
	pub source: AnswerSource,
}

/// Which tier produced the answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
	Completion,
	Local,
	Static,
}

impl ScholarsService {
	/// Answers the latest user message.
	///
	/// Only input validation and a deployment with neither a store nor a completion provider
	/// are errors. Everything else degrades: a failed completion call falls back to an answer
	/// synthesized from the facts, and a failed facts fetch falls back to a static apology.
	pub async fn chat(&self, req: ChatRequest) -> Result<ChatResponse> {
		let Some(last) = req.messages.last() else {
			return Err(Error::InvalidRequest { message: "Messages are required.".to_string() });
		};

		if last.content.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: "The latest message must not be empty.".to_string(),
			});
		}

		let completion = self.cfg.providers.completion.as_ref();

		if self.backends.knowledge.is_none() && completion.is_none() {
			return Err(Error::NotConfigured {
				message: "Neither a knowledge store nor a completion provider is configured."
					.to_string(),
			});
		}

		let query = req
			.messages
			.iter()
			.rev()
			.find(|message| message.role == Role::User)
			.unwrap_or(last)
			.content
			.as_str();
		let query_keywords = keywords::extract_keywords(query);
		let facts = match self.load_facts().await {
			Ok(facts) => facts,
			Err(err) => {
				tracing::error!(error = %err, "Failed to load facts; answering with the static message.");

				return Ok(ChatResponse {
					content: self.static_answer(),
					source: AnswerSource::Static,
				});
			},
		};
		let knowledge =
			self.retrieve(&query_keywords, self.cfg.retrieval.match_count as usize).await;
		let Some(provider_cfg) = completion else {
			tracing::debug!("No completion provider configured; answering locally.");

			return Ok(self.local_answer(&query_keywords, &facts, &knowledge));
		};
		let system = prompt::build_system_instruction(&PromptContext {
			scholarships: facts::format_scholarships(&facts.scholarships),
			resources: facts::format_resources(&facts.resources),
			knowledge: knowledge.clone(),
			club: &self.cfg.club,
		});
		let messages = prompt::assemble_messages(system, &req.messages);

		match self
			.backends
			.completion
			.complete(provider_cfg, &messages, provider_cfg.max_tokens)
			.await
		{
			Ok(content) => Ok(ChatResponse { content, source: AnswerSource::Completion }),
			Err(err) => {
				tracing::warn!(
					provider_id = %provider_cfg.provider_id,
					timeout = err.is_timeout(),
					error = %err,
					"Completion failed; answering locally."
				);

				Ok(self.local_answer(&query_keywords, &facts, &knowledge))
			},
		}
	}

	fn local_answer(
		&self,
		query_keywords: &[String],
		facts: &Facts,
		knowledge: &str,
	) -> ChatResponse {
		let intent = intent::detect_intent(query_keywords);
		let content = intent::synthesize(intent, facts, knowledge, &self.cfg.club);

		ChatResponse { content, source: AnswerSource::Local }
	}

	fn static_answer(&self) -> String {
		format!(
			"Sorry, I can't look up scholarship information right now. Please try again later. {}",
			self.cfg.club.contact
		)
	}
}
