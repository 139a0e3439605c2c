//! Scratch Postgres databases carrying the club schema, for the `#[ignore]`d store tests.
//!
//! A [`ScratchDatabase`] is created beside the database named by `SCHOLARS_PG_DSN`.
//! [`ScratchDatabase::open`] hands back a bootstrapped [`Db`], so tests start from empty
//! `knowledge_base`, `scholarships` and `resources` tables.

mod error;

pub use error::{Error, Result};

use std::{env, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection, Executor,
	postgres::{PgConnectOptions, PgConnection},
};
use uuid::Uuid;

use scholars_config::Postgres;
use scholars_storage::db::Db;

pub const DSN_ENV: &str = "SCHOLARS_PG_DSN";

// `template1` exists on every cluster; `postgres` is tried first because it is the usual one.
const MAINTENANCE_DATABASES: [&str; 2] = ["postgres", "template1"];

pub struct ScratchDatabase {
	name: String,
	dsn: String,
	maintenance: PgConnectOptions,
	dropped: bool,
}
impl ScratchDatabase {
	/// Creates a scratch database when `SCHOLARS_PG_DSN` is set. Returns `Ok(None)` and prints
	/// a skip note for `test` otherwise.
	pub async fn from_env(test: &str) -> Result<Option<Self>> {
		let Some(base_dsn) = env_dsn() else {
			eprintln!("Skipping {test}; set {DSN_ENV} to run it.");

			return Ok(None);
		};

		Self::create(&base_dsn).await.map(Some)
	}

	pub async fn create(base_dsn: &str) -> Result<Self> {
		let base = PgConnectOptions::from_str(base_dsn)
			.map_err(|err| Error::InvalidDsn { env: DSN_ENV, message: err.to_string() })?;
		let (maintenance, mut conn) = connect_maintenance(&base).await?;
		let name = format!("scholars_scratch_{}", Uuid::new_v4().simple());

		conn.execute(format!(r#"CREATE DATABASE "{name}""#).as_str()).await?;
		conn.close().await?;

		let dsn = base.database(&name).to_url_lossy().to_string();

		Ok(Self { name, dsn, maintenance, dropped: false })
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	/// Store settings pointing at this database with a single pooled connection.
	pub fn postgres(&self) -> Postgres {
		Postgres { dsn: self.dsn.clone(), pool_max_conns: 1 }
	}

	/// The `[storage.postgres]` section for a TOML config document.
	pub fn storage_toml(&self) -> String {
		format!("[storage.postgres]\ndsn = \"{}\"\npool_max_conns = 1\n", self.dsn)
	}

	/// Connects and bootstraps the schema.
	pub async fn open(&self) -> Result<Db> {
		let db = Db::connect(&self.postgres()).await?;

		db.ensure_schema().await?;

		Ok(db)
	}

	/// Drops the database. Pools opened on it must be closed first.
	pub async fn drop_now(mut self) -> Result<()> {
		self.dropped = true;

		drop_database(&self.maintenance, &self.name).await
	}
}
impl Drop for ScratchDatabase {
	fn drop(&mut self) {
		if self.dropped {
			return;
		}

		let maintenance = self.maintenance.clone();
		let name = std::mem::take(&mut self.name);
		// Tests drop this inside a Tokio runtime, which cannot be blocked on from here.
		let worker = thread::spawn(move || {
			let outcome = tokio::runtime::Builder::new_current_thread()
				.enable_all()
				.build()
				.map_err(|err| err.to_string())
				.and_then(|runtime| {
					runtime
						.block_on(drop_database(&maintenance, &name))
						.map_err(|err| err.to_string())
				});

			if let Err(err) = outcome {
				eprintln!("Leaked scratch database {name}: {err}.");
			}
		});
		let _ = worker.join();
	}
}

pub fn env_dsn() -> Option<String> {
	env::var(DSN_ENV).ok().filter(|value| !value.trim().is_empty())
}

async fn connect_maintenance(base: &PgConnectOptions) -> Result<(PgConnectOptions, PgConnection)> {
	let mut failures = Vec::new();

	for database in MAINTENANCE_DATABASES {
		let options = base.clone().database(database);

		match PgConnection::connect_with(&options).await {
			Ok(conn) => return Ok((options, conn)),
			Err(err) => failures.push(format!("{database}: {err}")),
		}
	}

	Err(Error::MaintenanceUnreachable { message: failures.join("; ") })
}

async fn drop_database(maintenance: &PgConnectOptions, name: &str) -> Result<()> {
	let mut conn = PgConnection::connect_with(maintenance).await?;

	conn.execute(format!(r#"DROP DATABASE IF EXISTS "{name}" WITH (FORCE)"#).as_str()).await?;
	conn.close().await?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn storage_section_parses_as_config() {
		let scratch = ScratchDatabase {
			name: "scholars_scratch_x".to_string(),
			dsn: "postgres://u:p@localhost:5432/scholars_scratch_x".to_string(),
			maintenance: PgConnectOptions::new(),
			dropped: true,
		};
		let raw = format!("[service]\nhttp_bind = \"127.0.0.1:0\"\n{}", scratch.storage_toml());
		let cfg = scholars_config::from_toml_str(&raw).expect("Scratch config must parse.");
		let postgres = cfg.storage.postgres.expect("Postgres section must be present.");

		assert_eq!(postgres.dsn, scratch.dsn());
		assert_eq!(postgres.pool_max_conns, 1);
	}
}
