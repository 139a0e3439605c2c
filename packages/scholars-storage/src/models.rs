use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct KnowledgeRow {
	pub id: Uuid,
	pub content: String,
	pub metadata: Value,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScholarshipRow {
	pub id: Uuid,
	pub name: String,
	pub deadline: String,
	pub amount: String,
	pub description: String,
	pub eligibility: Option<String>,
	pub requirements: Option<String>,
	pub link: String,
	pub category: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResourceRow {
	pub id: Uuid,
	pub title: String,
	#[sqlx(rename = "type")]
	pub kind: String,
	pub link: String,
	pub description: Option<String>,
}
