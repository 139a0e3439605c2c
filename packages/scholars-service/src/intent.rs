//! Intent detection for locally synthesized answers.
//!
//! One table maps each intent to the keyword triggers that select it and the heading its
//! answer opens with. Detection reuses the retrieval keywords, so there is a single
//! tokenization path for both.

use serde::Serialize;

use crate::facts::{Facts, Resource, Scholarship};
use scholars_config::Club;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
	Meeting,
	Essay,
	Scholarship,
	Resource,
	General,
}

pub struct IntentTemplate {
	pub intent: Intent,
	/// Substrings matched against each keyword.
	pub triggers: &'static [&'static str],
	pub heading: &'static str,
}

/// Checked in order; the first intent with a matching trigger wins.
///
/// Row order is the priority. A meeting trigger such as `session` outranks essay and
/// scholarship terms in the same question, so "essay scholarship session" answers as a meeting.
pub const INTENT_TABLE: [IntentTemplate; 4] = [
	IntentTemplate {
		intent: Intent::Meeting,
		triggers: &["meet", "session", "schedule"],
		heading: "Club meetings",
	},
	IntentTemplate {
		intent: Intent::Essay,
		triggers: &["essay", "writ"],
		heading: "Essay opportunities",
	},
	IntentTemplate {
		intent: Intent::Scholarship,
		triggers: &["scholarship", "award", "grant", "contest", "competition", "deadline", "money"],
		heading: "Scholarships you can apply for",
	},
	IntentTemplate {
		intent: Intent::Resource,
		triggers: &["resource", "guide", "worksheet", "video", "financial"],
		heading: "Resources that can help",
	},
];

pub const GENERAL_HEADING: &str = "What I can share right now";

pub fn detect_intent(keywords: &[String]) -> Intent {
	INTENT_TABLE
		.iter()
		.find(|template| {
			keywords
				.iter()
				.any(|keyword| template.triggers.iter().any(|trigger| keyword.contains(trigger)))
		})
		.map(|template| template.intent)
		.unwrap_or(Intent::General)
}

pub fn heading(intent: Intent) -> &'static str {
	INTENT_TABLE
		.iter()
		.find(|template| template.intent == intent)
		.map(|template| template.heading)
		.unwrap_or(GENERAL_HEADING)
}

const LOCAL_NOTICE: &str =
	"The assistant service is unavailable right now, so here is what the club has on record.";

/// Builds the answer served when the completion provider cannot be used.
///
/// The heading and body come from the intent row, followed by any retrieved knowledge and the
/// club contact line.
pub fn synthesize(intent: Intent, facts: &Facts, knowledge: &str, club: &Club) -> String {
	let body = match intent {
		Intent::Meeting => club.meeting_schedule.clone(),
		Intent::Essay => {
			let essays =
				facts.scholarships.iter().filter(|s| s.mentions("essay")).collect::<Vec<_>>();

			if essays.is_empty() {
				"No essay contests are listed right now.".to_string()
			} else {
				numbered_scholarships(&essays)
			}
		},
		Intent::Scholarship =>
			if facts.scholarships.is_empty() {
				"No scholarships available at this time.".to_string()
			} else {
				numbered_scholarships(&facts.scholarships.iter().collect::<Vec<_>>())
			},
		Intent::Resource =>
			if facts.resources.is_empty() {
				"No resources available at this time.".to_string()
			} else {
				bulleted_resources(&facts.resources)
			},
		Intent::General => format!(
			"{} currently lists {} scholarships and {} resources. Ask about a specific scholarship or about club meetings.\n\n{}",
			club.name,
			facts.scholarships.len(),
			facts.resources.len(),
			club.meeting_schedule
		),
	};
	let mut out = format!("{LOCAL_NOTICE}\n\n## {}\n\n{body}", heading(intent));

	if !knowledge.trim().is_empty() {
		out.push_str(&format!("\n\n### From the club knowledge base\n\n{knowledge}"));
	}

	out.push_str(&format!("\n\n{}", club.contact));

	out
}

fn numbered_scholarships(scholarships: &[&Scholarship]) -> String {
	scholarships
		.iter()
		.enumerate()
		.map(|(idx, s)| {
			format!(
				"{}. **{}** - **Deadline:** {} - **Amount:** {} - **More Information:** [{}]({})",
				idx + 1,
				s.name,
				s.deadline,
				s.amount,
				s.name,
				s.link
			)
		})
		.collect::<Vec<_>>()
		.join("\n")
}

fn bulleted_resources(resources: &[Resource]) -> String {
	resources
		.iter()
		.map(|r| format!("- **{}** ({}): [{}]({})", r.title, r.kind, r.title, r.link))
		.collect::<Vec<_>>()
		.join("\n")
}
