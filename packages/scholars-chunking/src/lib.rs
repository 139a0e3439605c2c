mod metadata;

pub use metadata::{TOPIC_TRIGGERS, extract_metadata};

#[derive(Clone, Debug)]
pub struct ChunkingConfig {
	pub max_chars: u32,
}
impl Default for ChunkingConfig {
	fn default() -> Self {
		Self { max_chars: 1_000 }
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
	pub chunk_index: u32,
	pub text: String,
}
impl Chunk {
	/// Length in characters, which is what `max_chars` bounds.
	pub fn char_len(&self) -> usize {
		self.text.chars().count()
	}
}

/// Splits `text` after every `.`, `!` or `?` that is followed by whitespace.
///
/// Sentences are trimmed and empty ones are skipped, so the result never contains blank
/// entries.
pub fn split_sentences(text: &str) -> Vec<&str> {
	let mut sentences = Vec::new();
	let mut start = 0_usize;
	let mut chars = text.char_indices().peekable();

	while let Some((idx, ch)) = chars.next() {
		if !matches!(ch, '.' | '!' | '?') {
			continue;
		}

		let end = idx + ch.len_utf8();
		let mut resume = end;

		while let Some(&(next_idx, next)) = chars.peek() {
			if !next.is_whitespace() {
				break;
			}

			resume = next_idx + next.len_utf8();

			chars.next();
		}

		if resume > end {
			push_sentence(&mut sentences, &text[start..end]);

			start = resume;
		}
	}

	if start < text.len() {
		push_sentence(&mut sentences, &text[start..]);
	}

	sentences
}

/// Packs whole sentences into chunks of at most `cfg.max_chars` characters.
///
/// Sentences inside a chunk are joined by a single space. A sentence that is longer than the
/// limit on its own is never cut; it becomes a chunk by itself.
pub fn split_text(text: &str, cfg: &ChunkingConfig) -> Vec<Chunk> {
	let max_chars = cfg.max_chars as usize;
	let mut chunks = Vec::new();
	let mut current = String::new();
	let mut current_len = 0_usize;

	for sentence in split_sentences(text) {
		let sentence_len = sentence.chars().count();
		let candidate_len =
			if current.is_empty() { sentence_len } else { current_len + 1 + sentence_len };

		if candidate_len > max_chars && !current.is_empty() {
			flush(&mut chunks, &mut current, max_chars);

			current_len = 0;
		}
		if !current.is_empty() {
			current.push(' ');

			current_len += 1;
		}

		current.push_str(sentence);

		current_len += sentence_len;
	}

	if !current.is_empty() {
		flush(&mut chunks, &mut current, max_chars);
	}

	chunks
}

fn push_sentence<'a>(sentences: &mut Vec<&'a str>, raw: &'a str) {
	let trimmed = raw.trim();

	if !trimmed.is_empty() {
		sentences.push(trimmed);
	}
}

fn flush(chunks: &mut Vec<Chunk>, current: &mut String, max_chars: usize) {
	let text = std::mem::take(current);
	let chunk = Chunk { chunk_index: chunks.len() as u32, text };

	if chunk.char_len() > max_chars {
		tracing::debug!(
			chunk_index = chunk.chunk_index,
			chars = chunk.char_len(),
			max_chars,
			"Single sentence exceeds the chunk limit; keeping it whole."
		);
	}

	chunks.push(chunk);
}

#[cfg(test)]
mod tests {
	use super::*;

	fn cfg(max_chars: u32) -> ChunkingConfig {
		ChunkingConfig { max_chars }
	}

	#[test]
	fn splits_on_terminal_punctuation_followed_by_whitespace() {
		let sentences = split_sentences("First one. Second one!  Third?\nFourth");

		assert_eq!(sentences, vec!["First one.", "Second one!", "Third?", "Fourth"]);
	}

	#[test]
	fn keeps_decimals_and_abbreviations_without_space_together() {
		let sentences = split_sentences("The award is $1,500.00 this year.Really. Yes.");

		assert_eq!(sentences, vec!["The award is $1,500.00 this year.Really.", "Yes."]);
	}

	#[test]
	fn empty_and_blank_input_yield_no_chunks() {
		assert!(split_text("", &cfg(1_000)).is_empty());
		assert!(split_text("   \n\t ", &cfg(1_000)).is_empty());
	}

	#[test]
	fn small_input_fits_in_one_chunk() {
		let chunks = split_text("A. B. C.", &cfg(1_000));

		assert_eq!(chunks.len(), 1);
		assert_eq!(chunks[0].text, "A. B. C.");
		assert_eq!(chunks[0].chunk_index, 0);
	}

	#[test]
	fn chunks_respect_limit_and_preserve_sentence_order() {
		let text = "Alpha beta gamma. Delta epsilon zeta! Eta theta iota? Kappa lambda mu.";
		let chunks = split_text(text, &cfg(36));

		assert!(chunks.len() > 1);

		for chunk in &chunks {
			assert!(chunk.char_len() <= 36, "chunk too long: {:?}", chunk.text);
			assert!(!chunk.text.trim().is_empty());
		}

		let rejoined = chunks.iter().map(|chunk| chunk.text.as_str()).collect::<Vec<_>>().join(" ");

		assert_eq!(rejoined, split_sentences(text).join(" "));
		assert_eq!(
			chunks.iter().map(|chunk| chunk.chunk_index).collect::<Vec<_>>(),
			(0..chunks.len() as u32).collect::<Vec<_>>()
		);
	}

	#[test]
	fn oversized_sentence_becomes_its_own_chunk() {
		let long = "This single sentence is far longer than the configured limit.";
		let text = format!("Short. {long} Tail.");
		let chunks = split_text(&text, &cfg(10));

		assert_eq!(
			chunks.iter().map(|chunk| chunk.text.as_str()).collect::<Vec<_>>(),
			vec!["Short.", long, "Tail."]
		);
	}

	#[test]
	fn separator_counts_toward_the_limit() {
		// "abcd. efgh." is 11 characters including the joining space.
		let chunks = split_text("abcd. efgh.", &cfg(10));

		assert_eq!(chunks.len(), 2);

		let chunks = split_text("abcd. efgh.", &cfg(11));

		assert_eq!(chunks.len(), 1);
	}
}
