pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid {env}: {message}")]
	InvalidDsn { env: &'static str, message: String },
	#[error("No maintenance database is reachable: {message}")]
	MaintenanceUnreachable { message: String },

	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error(transparent)]
	Storage(#[from] scholars_storage::Error),
}
