pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("{message}")]
	InvalidConfig { message: String },
	#[error("Completion provider returned {status}: {body}")]
	Status { status: u16, body: String },
	#[error("{message}")]
	InvalidResponse { message: String },
}
impl Error {
	/// True when the request never produced a response in time.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Reqwest(err) if err.is_timeout())
	}
}
