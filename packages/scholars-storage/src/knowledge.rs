use serde_json::Value;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{Error, Result, models::KnowledgeRow};

pub async fn insert_knowledge_chunk<'e, E>(
	executor: E,
	content: &str,
	metadata: &Value,
) -> Result<KnowledgeRow>
where
	E: PgExecutor<'e>,
{
	if content.trim().is_empty() {
		return Err(Error::InvalidArgument("knowledge content must be non-empty".to_string()));
	}

	let row = sqlx::query_as::<_, KnowledgeRow>(
		"\
INSERT INTO knowledge_base (id, content, metadata)
VALUES ($1, $2, $3)
RETURNING id, content, metadata, created_at",
	)
	.bind(Uuid::new_v4())
	.bind(content)
	.bind(metadata)
	.fetch_one(executor)
	.await?;

	Ok(row)
}

/// Newest rows first, at most `limit` of them.
pub async fn list_recent_knowledge<'e, E>(executor: E, limit: i64) -> Result<Vec<KnowledgeRow>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, KnowledgeRow>(
		"\
SELECT id, content, metadata, created_at
FROM knowledge_base
ORDER BY created_at DESC, id
LIMIT $1",
	)
	.bind(limit)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn delete_knowledge_chunk<'e, E>(executor: E, id: Uuid) -> Result<()>
where
	E: PgExecutor<'e>,
{
	let result =
		sqlx::query("DELETE FROM knowledge_base WHERE id = $1").bind(id).execute(executor).await?;

	if result.rows_affected() == 0 {
		return Err(Error::NotFound(format!("knowledge chunk {id}")));
	}

	Ok(())
}

pub async fn count_knowledge<'e, E>(executor: E) -> Result<i64>
where
	E: PgExecutor<'e>,
{
	let count: i64 =
		sqlx::query_scalar("SELECT count(*) FROM knowledge_base").fetch_one(executor).await?;

	Ok(count)
}
