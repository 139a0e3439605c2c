use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	#[serde(default)]
	pub storage: Storage,
	#[serde(default)]
	pub providers: Providers,
	#[serde(default)]
	pub chunking: Chunking,
	#[serde(default)]
	pub retrieval: Retrieval,
	#[serde(default)]
	pub club: Club,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Storage {
	/// Optional. Without it the knowledge store is unavailable and facts come from the
	/// built-in sample catalog.
	pub postgres: Option<Postgres>,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	#[serde(default = "default_pool_max_conns")]
	pub pool_max_conns: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct Providers {
	/// Optional. Without it every chat answer is synthesized locally from the known facts.
	pub completion: Option<CompletionProviderConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	#[serde(default = "default_temperature")]
	pub temperature: f32,
	#[serde(default = "default_max_tokens")]
	pub max_tokens: u32,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Chunking {
	pub max_chars: u32,
}
impl Default for Chunking {
	fn default() -> Self {
		Self { max_chars: 1_000 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Retrieval {
	/// Upper bound on rows fetched per query. Recall is capped by this window.
	pub candidate_limit: u32,
	pub match_count: u32,
}
impl Default for Retrieval {
	fn default() -> Self {
		Self { candidate_limit: 50, match_count: 5 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Club {
	pub name: String,
	pub meeting_schedule: String,
	pub contact: String,
}
impl Default for Club {
	fn default() -> Self {
		Self {
			name: "McRoberts Scholars".to_string(),
			meeting_schedule:
				"Scholarship information sessions are held every Wednesday from 3:00 PM to 4:30 PM in the Student Center, Room 204."
					.to_string(),
			contact:
				"Bring your questions to any Wednesday session or send them through the Contact page."
					.to_string(),
		}
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_pool_max_conns() -> u32 {
	4
}

fn default_temperature() -> f32 {
	0.7
}

fn default_max_tokens() -> u32 {
	1_000
}

fn default_timeout_ms() -> u64 {
	30_000
}
