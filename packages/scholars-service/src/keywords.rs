//! Keyword extraction and containment scoring.
//!
//! This is a relevance heuristic, not a ranking: no term weighting, no stemming, no
//! semantics. A chunk's score is how many query keywords occur in it as substrings.

use crate::{KnowledgeChunk, ScoredChunk};

const STRIPPED_PUNCTUATION: [char; 8] = ['.', ',', '?', '!', ';', ':', '(', ')'];
const MIN_KEYWORD_CHARS: usize = 4;

/// Lower-cases `query`, keeps whitespace-separated tokens longer than three characters and
/// strips punctuation from them.
///
/// Repeated words are kept, so they count once per occurrence when scoring. Tokens that are
/// nothing but punctuation are dropped.
pub fn extract_keywords(query: &str) -> Vec<String> {
	query
		.to_lowercase()
		.split_whitespace()
		.filter(|token| token.chars().count() >= MIN_KEYWORD_CHARS)
		.map(|token| {
			token.chars().filter(|ch| !STRIPPED_PUNCTUATION.contains(ch)).collect::<String>()
		})
		.filter(|keyword| !keyword.is_empty())
		.collect()
}

pub fn score(keywords: &[String], content: &str) -> u32 {
	let lowered = content.to_lowercase();

	keywords.iter().filter(|keyword| lowered.contains(keyword.as_str())).count() as u32
}

/// Scores every candidate, drops the zero scores and returns the best `limit`, highest first.
///
/// Ties keep the order the candidates arrived in.
pub fn rank(
	candidates: Vec<KnowledgeChunk>,
	keywords: &[String],
	limit: usize,
) -> Vec<ScoredChunk> {
	let mut scored = candidates
		.into_iter()
		.map(|chunk| {
			let score = score(keywords, &chunk.content);

			ScoredChunk { chunk, score }
		})
		.filter(|scored| scored.score > 0)
		.collect::<Vec<_>>();

	scored.sort_by(|a, b| b.score.cmp(&a.score));
	scored.truncate(limit);

	scored
}

/// Joins the chunk contents with a blank line between them.
pub fn join_contents(scored: &[ScoredChunk]) -> String {
	scored.iter().map(|scored| scored.chunk.content.as_str()).collect::<Vec<_>>().join("\n\n")
}

#[cfg(test)]
mod tests {
	use serde_json::Map;
	use time::OffsetDateTime;
	use uuid::Uuid;

	use super::*;

	fn chunk(content: &str) -> KnowledgeChunk {
		KnowledgeChunk {
			id: Uuid::new_v4(),
			content: content.to_string(),
			metadata: Map::new(),
			created_at: OffsetDateTime::UNIX_EPOCH,
		}
	}

	#[test]
	fn keeps_long_tokens_and_strips_punctuation() {
		assert_eq!(
			extract_keywords("When is the next MEETING? (Wednesday, right!)"),
			vec!["when", "next", "meeting", "wednesday", "right"]
		);
	}

	#[test]
	fn length_is_checked_before_stripping() {
		// "why?" has four characters, so it survives as "why".
		assert_eq!(extract_keywords("why? and (...)"), vec!["why"]);
	}

	#[test]
	fn short_queries_have_no_keywords() {
		assert!(extract_keywords("is it a go").is_empty());
		assert!(extract_keywords("").is_empty());
	}

	#[test]
	fn repeated_words_count_with_multiplicity() {
		let keywords = extract_keywords("essay essay tips");

		assert_eq!(score(&keywords, "Essay tips for everyone"), 3);
	}

	#[test]
	fn ranks_by_score_and_keeps_arrival_order_on_ties() {
		let candidates = vec![
			chunk("stem scholarship info"),
			chunk("essay writing tips"),
			chunk("unrelated text"),
			chunk("more essay guidance"),
		];
		let keywords = extract_keywords("Tell me about essay writing");
		let ranked = rank(candidates, &keywords, 5);
		let contents = ranked.iter().map(|s| s.chunk.content.as_str()).collect::<Vec<_>>();

		assert_eq!(contents, vec!["essay writing tips", "more essay guidance"]);
		assert_eq!(ranked[0].score, 2);
		assert_eq!(ranked[1].score, 1);
	}

	#[test]
	fn limit_truncates_after_sorting() {
		let candidates = vec![chunk("alpha"), chunk("alpha beta"), chunk("alpha beta gamma")];
		let keywords = extract_keywords("alpha beta gamma");
		let ranked = rank(candidates, &keywords, 2);

		assert_eq!(join_contents(&ranked), "alpha beta gamma\n\nalpha beta");
	}
}
