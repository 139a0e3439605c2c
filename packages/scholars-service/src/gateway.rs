//! Postgres implementations of the store gateways.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
	BoxFuture, FactsSource, KnowledgeChunk, KnowledgeStore, NewKnowledgeChunk, Resource, Result,
	Scholarship,
};
use scholars_storage::{db::Db, facts, knowledge, models::KnowledgeRow};

impl From<KnowledgeRow> for KnowledgeChunk {
	fn from(row: KnowledgeRow) -> Self {
		let metadata = match row.metadata {
			Value::Object(map) => map,
			Value::Null => Map::new(),
			other => {
				let mut map = Map::new();

				map.insert("value".to_string(), other);

				map
			},
		};

		Self { id: row.id, content: row.content, metadata, created_at: row.created_at }
	}
}

impl KnowledgeStore for Db {
	fn insert<'a>(&'a self, chunk: &'a NewKnowledgeChunk) -> BoxFuture<'a, Result<KnowledgeChunk>> {
		Box::pin(async move {
			let metadata = Value::Object(chunk.metadata.clone());
			let row =
				knowledge::insert_knowledge_chunk(&self.pool, &chunk.content, &metadata).await?;

			Ok(row.into())
		})
	}

	fn recent<'a>(&'a self, limit: u32) -> BoxFuture<'a, Result<Vec<KnowledgeChunk>>> {
		Box::pin(async move {
			let rows = knowledge::list_recent_knowledge(&self.pool, i64::from(limit)).await?;

			Ok(rows.into_iter().map(KnowledgeChunk::from).collect())
		})
	}

	fn delete<'a>(&'a self, id: Uuid) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			knowledge::delete_knowledge_chunk(&self.pool, id).await?;

			Ok(())
		})
	}

	fn count<'a>(&'a self) -> BoxFuture<'a, Result<u64>> {
		Box::pin(async move {
			let count = knowledge::count_knowledge(&self.pool).await?;

			Ok(row_count(count))
		})
	}

	fn close<'a>(&'a self) -> BoxFuture<'a, ()> {
		Box::pin(Db::close(self))
	}
}

impl FactsSource for Db {
	fn scholarships<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Scholarship>>> {
		Box::pin(async move {
			let rows = facts::list_scholarships(&self.pool).await?;

			Ok(rows.into_iter().map(Scholarship::from).collect())
		})
	}

	fn resources<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Resource>>> {
		Box::pin(async move {
			let rows = facts::list_resources(&self.pool).await?;

			Ok(rows.into_iter().map(Resource::from).collect())
		})
	}
}

// Postgres reports `count(*)` as a signed bigint.
fn row_count(count: i64) -> u64 {
	u64::try_from(count).unwrap_or(0)
}
