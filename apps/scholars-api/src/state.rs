use std::sync::Arc;

use scholars_service::ScholarsService;
use scholars_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ScholarsService>,
}
impl AppState {
	/// Opens the store pool when one is configured and bootstraps its schema.
	pub async fn new(config: scholars_config::Config) -> color_eyre::Result<Self> {
		let db = match config.storage.postgres.as_ref() {
			Some(postgres) => {
				let db = Db::connect(postgres).await?;

				db.ensure_schema().await?;

				Some(db)
			},
			None => {
				tracing::warn!(
					"No Postgres store configured. Serving the sample catalog without a knowledge base."
				);

				None
			},
		};

		if config.providers.completion.is_none() {
			tracing::warn!(
				"No completion provider configured. Chat answers are synthesized locally."
			);
		}

		Ok(Self::from_service(ScholarsService::new(config, db)))
	}

	pub fn from_service(service: ScholarsService) -> Self {
		Self { service: Arc::new(service) }
	}
}
