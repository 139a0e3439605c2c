pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not configured: {message}")]
	NotConfigured { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Upstream unavailable: {message}")]
	UpstreamUnavailable { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}

impl From<scholars_storage::Error> for Error {
	fn from(err: scholars_storage::Error) -> Self {
		match err {
			scholars_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			scholars_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			scholars_storage::Error::NotFound(message) => Self::NotFound { message },
		}
	}
}

// Malformed provider payloads are folded into the same bucket as unreachable providers.
impl From<scholars_providers::Error> for Error {
	fn from(err: scholars_providers::Error) -> Self {
		Self::UpstreamUnavailable { message: err.to_string() }
	}
}
