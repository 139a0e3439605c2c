use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Lower-case trigger substring and the topic tag it implies.
pub const TOPIC_TRIGGERS: [(&str, &str); 5] = [
	("stem", "STEM"),
	("essay", "Essay"),
	("leadership", "Leadership"),
	("community", "Community Service"),
	("art", "Arts"),
];

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\b([0-9]{1,2}/[0-9]{1,2}/[0-9]{4}|[0-9]{4}-[0-9]{2}-[0-9]{2})\b")
		.expect("date pattern must compile")
});
static AWARD_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\b[A-Z][A-Za-z\s]+(?:Scholarship|Grant|Award|Competition)\b")
		.expect("award name pattern must compile")
});
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\$[0-9,]+(?:\.[0-9]{2})?").expect("amount pattern must compile")
});

/// Derives best-effort tags from one chunk of text.
///
/// Keys are only present when something was found: `date` (first match), `scholarships`,
/// `amounts` and `topics` (all matches, in order of appearance).
pub fn extract_metadata(text: &str) -> Map<String, Value> {
	let mut metadata = Map::new();

	if let Some(found) = DATE_RE.find(text) {
		metadata.insert("date".to_string(), Value::String(found.as_str().to_string()));
	}

	insert_all(&mut metadata, "scholarships", AWARD_NAME_RE.find_iter(text).map(|m| m.as_str()));
	insert_all(&mut metadata, "amounts", AMOUNT_RE.find_iter(text).map(|m| m.as_str()));

	let lowered = text.to_lowercase();
	let topics = TOPIC_TRIGGERS
		.iter()
		.filter(|(trigger, _)| lowered.contains(trigger))
		.map(|(_, topic)| *topic);

	insert_all(&mut metadata, "topics", topics);

	metadata
}

fn insert_all<'a>(
	metadata: &mut Map<String, Value>,
	key: &str,
	values: impl Iterator<Item = &'a str>,
) {
	let values = values.map(|value| Value::String(value.to_string())).collect::<Vec<_>>();

	if !values.is_empty() {
		metadata.insert(key.to_string(), Value::Array(values));
	}
}
