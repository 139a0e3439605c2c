//! Scholarship and resource records, resolved once from whatever shape the store returned.

use serde::{Deserialize, Serialize};

use crate::{BoxFuture, FactsSource, Result, ScholarsService};
use scholars_storage::models::{ResourceRow, ScholarshipRow};

const NOT_SPECIFIED: &str = "Not specified";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scholarship {
	pub id: String,
	pub name: String,
	pub deadline: String,
	pub amount: String,
	pub description: String,
	/// Whichever of the store's `eligibility` or `requirements` columns is filled in.
	pub eligibility: Option<String>,
	pub link: String,
	pub category: Option<String>,
}
impl Scholarship {
	pub fn mentions(&self, needle: &str) -> bool {
		let needle = needle.to_lowercase();
		let in_category = self
			.category
			.as_deref()
			.map(|category| category.to_lowercase().contains(&needle))
			.unwrap_or(false);

		in_category
			|| self.name.to_lowercase().contains(&needle)
			|| self.description.to_lowercase().contains(&needle)
	}
}

impl From<ScholarshipRow> for Scholarship {
	fn from(row: ScholarshipRow) -> Self {
		Self {
			id: row.id.to_string(),
			name: row.name,
			deadline: row.deadline,
			amount: row.amount,
			description: row.description,
			eligibility: non_blank(row.eligibility).or_else(|| non_blank(row.requirements)),
			link: row.link,
			category: non_blank(row.category),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
	pub id: String,
	pub title: String,
	#[serde(rename = "type")]
	pub kind: String,
	pub link: String,
	pub description: Option<String>,
}

impl From<ResourceRow> for Resource {
	fn from(row: ResourceRow) -> Self {
		Self {
			id: row.id.to_string(),
			title: row.title,
			kind: row.kind,
			link: row.link,
			description: non_blank(row.description),
		}
	}
}

/// Both listings, fetched together for one chat request.
#[derive(Clone, Debug, Default)]
pub struct Facts {
	pub scholarships: Vec<Scholarship>,
	pub resources: Vec<Resource>,
}

/// Built-in listings served when no store is configured.
pub struct SampleCatalog;

impl SampleCatalog {
	pub fn scholarships() -> Vec<Scholarship> {
		vec![
			sample_scholarship(
				"1",
				"Toshiba ExploraVision National Science Competition",
				"January 31, 2026",
				"$10,000",
				"Science competition for K-12 students",
				"Team of 2-4 students, teacher advisor required",
				"https://www.exploravision.org/",
				"science",
			),
			sample_scholarship(
				"2",
				"Optimist International Oratorical Contest",
				"Varies by local club",
				"Up to $2,500",
				"Speech contest for students under 19",
				"Speech on the designated topic, under 19 years old",
				"https://www.optimist.org/member/scholarships3.cfm",
				"speech",
			),
			sample_scholarship(
				"3",
				"Fraser Institute Student Essay Contest",
				"June 1, 2025",
				"$1,500",
				"Essay contest on economic principles",
				"High school and undergraduate students",
				"https://www.fraserinstitute.org/education-programs/students/essay-contest",
				"essay",
			),
			sample_scholarship(
				"4",
				"SolidEssay Writing Contest",
				"June 9, 2025",
				"$1,000",
				"Essay writing contest for students",
				"Currently enrolled students",
				"https://www.solidessay.com/essay-contest",
				"essay",
			),
		]
	}

	pub fn resources() -> Vec<Resource> {
		vec![
			sample_resource(
				"1",
				"Choosing the Right School: A Step-by-Step Guide",
				"slides",
				"https://example.com/guide",
				"A comprehensive guide to help you choose the right college.",
			),
			sample_resource(
				"2",
				"Founders Worksheet",
				"worksheet",
				"https://example.com/worksheet",
				"A worksheet to help you organize your college application process.",
			),
			sample_resource(
				"3",
				"Scholarship Application Tips",
				"video",
				"https://example.com/video",
				"Video tutorial on how to write effective scholarship applications.",
			),
			sample_resource(
				"4",
				"Financial Aid Resources",
				"document",
				"https://example.com/financial-aid",
				"Document with information about financial aid options.",
			),
		]
	}
}

impl FactsSource for SampleCatalog {
	fn scholarships<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Scholarship>>> {
		Box::pin(async { Ok(SampleCatalog::scholarships()) })
	}

	fn resources<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Resource>>> {
		Box::pin(async { Ok(SampleCatalog::resources()) })
	}
}

impl ScholarsService {
	/// Listing for the public scholarships page. Store errors degrade to an empty list.
	pub async fn list_scholarships(&self) -> Vec<Scholarship> {
		self.backends.facts.scholarships().await.unwrap_or_else(|err| {
			tracing::error!(error = %err, "Failed to fetch scholarships.");

			Vec::new()
		})
	}

	/// Listing for the public resources page. Store errors degrade to an empty list.
	pub async fn list_resources(&self) -> Vec<Resource> {
		self.backends.facts.resources().await.unwrap_or_else(|err| {
			tracing::error!(error = %err, "Failed to fetch resources.");

			Vec::new()
		})
	}

	pub(crate) async fn load_facts(&self) -> Result<Facts> {
		let scholarships = self.backends.facts.scholarships().await?;
		let resources = self.backends.facts.resources().await?;

		Ok(Facts { scholarships, resources })
	}
}

pub fn format_scholarships(scholarships: &[Scholarship]) -> String {
	if scholarships.is_empty() {
		return "No scholarships available at this time.".to_string();
	}

	scholarships
		.iter()
		.map(|s| {
			format!(
				"{}\nDeadline: {}\nAmount: {}\nDescription: {}\nEligibility: {}\nMore Information: {}",
				s.name,
				or_unspecified(&s.deadline),
				or_unspecified(&s.amount),
				or_unspecified(&s.description),
				s.eligibility.as_deref().unwrap_or(NOT_SPECIFIED),
				or_unspecified(&s.link),
			)
		})
		.collect::<Vec<_>>()
		.join("\n\n")
}

pub fn format_resources(resources: &[Resource]) -> String {
	if resources.is_empty() {
		return "No resources available at this time.".to_string();
	}

	resources
		.iter()
		.map(|r| match r.description.as_deref() {
			Some(description) => format!("{} ({}): {}\n{description}", r.title, r.kind, r.link),
			None => format!("{} ({}): {}", r.title, r.kind, r.link),
		})
		.collect::<Vec<_>>()
		.join("\n\n")
}

fn or_unspecified(value: &str) -> &str {
	if value.trim().is_empty() { NOT_SPECIFIED } else { value }
}

fn non_blank(value: Option<String>) -> Option<String> {
	value.filter(|value| !value.trim().is_empty())
}

#[allow(clippy::too_many_arguments)]
fn sample_scholarship(
	id: &str,
	name: &str,
	deadline: &str,
	amount: &str,
	description: &str,
	requirements: &str,
	link: &str,
	category: &str,
) -> Scholarship {
	Scholarship {
		id: id.to_string(),
		name: name.to_string(),
		deadline: deadline.to_string(),
		amount: amount.to_string(),
		description: description.to_string(),
		eligibility: Some(requirements.to_string()),
		link: link.to_string(),
		category: Some(category.to_string()),
	}
}

fn sample_resource(id: &str, title: &str, kind: &str, link: &str, description: &str) -> Resource {
	Resource {
		id: id.to_string(),
		title: title.to_string(),
		kind: kind.to_string(),
		link: link.to_string(),
		description: Some(description.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use uuid::Uuid;

	use super::*;

	fn row(eligibility: Option<&str>, requirements: Option<&str>) -> ScholarshipRow {
		ScholarshipRow {
			id: Uuid::nil(),
			name: "Essay Prize".to_string(),
			deadline: "June 1".to_string(),
			amount: "$500".to_string(),
			description: String::new(),
			eligibility: eligibility.map(str::to_string),
			requirements: requirements.map(str::to_string),
			link: "https://example.com".to_string(),
			category: Some(" ".to_string()),
		}
	}

	#[test]
	fn eligibility_falls_back_to_requirements() {
		assert_eq!(
			Scholarship::from(row(None, Some("Seniors"))).eligibility.as_deref(),
			Some("Seniors")
		);
		assert_eq!(
			Scholarship::from(row(Some(""), Some("Seniors"))).eligibility.as_deref(),
			Some("Seniors")
		);
		assert_eq!(
			Scholarship::from(row(Some("Juniors"), Some("Seniors"))).eligibility.as_deref(),
			Some("Juniors")
		);
		assert_eq!(Scholarship::from(row(None, None)).category, None);
	}

	#[test]
	fn scholarship_block_uses_fixed_labels() {
		let text = format_scholarships(&[Scholarship::from(row(None, None))]);

		assert_eq!(
			text,
			"Essay Prize\nDeadline: June 1\nAmount: $500\nDescription: Not specified\n\
			 Eligibility: Not specified\nMore Information: https://example.com"
		);
	}

	#[test]
	fn empty_listings_have_placeholder_text() {
		assert_eq!(format_scholarships(&[]), "No scholarships available at this time.");
		assert_eq!(format_resources(&[]), "No resources available at this time.");
	}

	#[test]
	fn resources_are_flattened_one_per_block() {
		let text = format_resources(&SampleCatalog::resources()[..2]);

		assert!(text.starts_with(
			"Choosing the Right School: A Step-by-Step Guide (slides): https://example.com/guide\n"
		));
		assert!(text.contains("\n\nFounders Worksheet (worksheet): https://example.com/worksheet"));
	}

	#[test]
	fn sample_catalog_tags_essay_contests() {
		let essays = SampleCatalog::scholarships()
			.into_iter()
			.filter(|s| s.mentions("essay"))
			.map(|s| s.id)
			.collect::<Vec<_>>();

		assert_eq!(essays, vec!["3".to_string(), "4".to_string()]);
	}
}
