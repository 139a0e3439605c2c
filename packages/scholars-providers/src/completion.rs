use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};
use scholars_config::CompletionProviderConfig;

const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	System,
	User,
	Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
	pub role: Role,
	pub content: String,
}
impl ChatMessage {
	pub fn new(role: Role, content: impl Into<String>) -> Self {
		Self { role, content: content.into() }
	}
}

/// Sends one chat-completion request and returns the first choice's text.
///
/// The whole exchange is bounded by `cfg.timeout_ms`. There is no retry.
pub async fn complete(
	cfg: &CompletionProviderConfig,
	messages: &[ChatMessage],
	max_tokens: u32,
) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base.trim_end_matches('/'), cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"messages": messages,
		"temperature": cfg.temperature,
		"max_tokens": max_tokens,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let status = res.status();

	if !status.is_success() {
		let body = res.text().await.unwrap_or_default();

		return Err(Error::Status {
			status: status.as_u16(),
			body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
		});
	}

	let bytes = res.bytes().await?;
	let json: Value = serde_json::from_slice(&bytes).map_err(|err| Error::InvalidResponse {
		message: format!("Completion response is not valid JSON: {err}."),
	})?;

	parse_completion_response(json)
}

fn parse_completion_response(json: Value) -> Result<String> {
	let content = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Completion response is missing choices[0].message.content.".to_string(),
		})?;

	if content.trim().is_empty() {
		return Err(Error::InvalidResponse {
			message: "Completion response content is empty.".to_string(),
		});
	}

	Ok(content.to_string())
}
