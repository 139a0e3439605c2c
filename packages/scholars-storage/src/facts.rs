use sqlx::PgExecutor;

use crate::{
	Result,
	models::{ResourceRow, ScholarshipRow},
};

pub async fn list_scholarships<'e, E>(executor: E) -> Result<Vec<ScholarshipRow>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, ScholarshipRow>(
		"\
SELECT id, name, deadline, amount, description, eligibility, requirements, link, category
FROM scholarships
ORDER BY created_at, name",
	)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

pub async fn list_resources<'e, E>(executor: E) -> Result<Vec<ResourceRow>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, ResourceRow>(
		"\
SELECT id, title, type, link, description
FROM resources
ORDER BY created_at, title",
	)
	.fetch_all(executor)
	.await?;

	Ok(rows)
}
