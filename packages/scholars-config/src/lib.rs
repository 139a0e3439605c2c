mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Chunking, Club, CompletionProviderConfig, Config, Postgres, Providers, Retrieval, Service,
	Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse(&raw).map_err(|err| match err {
		ParseFailure::Toml(source) => Error::ParseConfig { path: path.to_path_buf(), source },
		ParseFailure::Invalid(err) => err,
	})
}

/// Parses, normalizes and validates a configuration document that is already in memory.
pub fn from_toml_str(raw: &str) -> Result<Config> {
	parse(raw).map_err(|err| match err {
		ParseFailure::Toml(source) =>
			Error::ParseConfig { path: Path::new("<inline>").to_path_buf(), source },
		ParseFailure::Invalid(err) => err,
	})
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.chunking.max_chars == 0 {
		return Err(Error::Validation {
			message: "chunking.max_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.retrieval.candidate_limit == 0 {
		return Err(Error::Validation {
			message: "retrieval.candidate_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.retrieval.match_count == 0 {
		return Err(Error::Validation {
			message: "retrieval.match_count must be greater than zero.".to_string(),
		});
	}

	if let Some(postgres) = cfg.storage.postgres.as_ref()
		&& postgres.pool_max_conns == 0
	{
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	if let Some(completion) = cfg.providers.completion.as_ref() {
		for (label, value) in [
			("providers.completion.api_base", &completion.api_base),
			("providers.completion.path", &completion.path),
			("providers.completion.model", &completion.model),
		] {
			if value.trim().is_empty() {
				return Err(Error::Validation { message: format!("{label} must be non-empty.") });
			}
		}

		if completion.timeout_ms == 0 {
			return Err(Error::Validation {
				message: "providers.completion.timeout_ms must be greater than zero.".to_string(),
			});
		}
		if completion.max_tokens == 0 {
			return Err(Error::Validation {
				message: "providers.completion.max_tokens must be greater than zero.".to_string(),
			});
		}
		if !completion.temperature.is_finite() {
			return Err(Error::Validation {
				message: "providers.completion.temperature must be a finite number.".to_string(),
			});
		}
		if !(0.0..=2.0).contains(&completion.temperature) {
			return Err(Error::Validation {
				message: "providers.completion.temperature must be in the range 0.0-2.0."
					.to_string(),
			});
		}
	}

	Ok(())
}

enum ParseFailure {
	Toml(toml::de::Error),
	Invalid(Error),
}

fn parse(raw: &str) -> std::result::Result<Config, ParseFailure> {
	let mut cfg: Config = toml::from_str(raw).map_err(ParseFailure::Toml)?;

	normalize(&mut cfg);

	validate(&cfg).map_err(ParseFailure::Invalid)?;

	Ok(cfg)
}

// A section whose secret is blank counts as not configured.
fn normalize(cfg: &mut Config) {
	if cfg.storage.postgres.as_ref().map(|pg| pg.dsn.trim().is_empty()).unwrap_or(false) {
		cfg.storage.postgres = None;
	}
	if cfg
		.providers
		.completion
		.as_ref()
		.map(|completion| completion.api_key.trim().is_empty())
		.unwrap_or(false)
	{
		cfg.providers.completion = None;
	}
}
