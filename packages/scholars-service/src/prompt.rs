use scholars_config::Club;
use scholars_providers::{ChatMessage, Role};

/// Everything the system instruction is built from. Lives for one request.
pub struct PromptContext<'a> {
	pub scholarships: String,
	pub resources: String,
	/// Joined retrieval result. Empty when nothing matched.
	pub knowledge: String,
	pub club: &'a Club,
}

pub fn build_system_instruction(ctx: &PromptContext<'_>) -> String {
	let mut out = String::new();

	out.push_str(&format!(
		"You are an AI assistant for {}, designed to help students with scholarship information.\n",
		ctx.club.name
	));
	out.push_str(
		"Always be helpful, accurate, and concise. Format your responses with markdown headings and lists when appropriate.\n\n",
	);
	out.push_str(&format!(
		"Here is information about available scholarships:\n{}\n\n",
		ctx.scholarships
	));
	out.push_str(&format!("Here are available resources:\n{}\n\n", ctx.resources));

	if !ctx.knowledge.trim().is_empty() {
		out.push_str(&format!(
			"Here is additional relevant information from our knowledge base:\n{}\n\n",
			ctx.knowledge
		));
	}

	out.push_str(&format!(
		"When asked about meetings, tell users: {}\n\n",
		ctx.club.meeting_schedule
	));
	out.push_str(
		"When recommending scholarships, always explain why they might be a good fit for the student.\n\n",
	);
	out.push_str("Always answer all parts of multi-part questions.\n\n");
	out.push_str(FORMATTING_RULES);

	out
}

const FORMATTING_RULES: &str = "\
IMPORTANT FORMATTING INSTRUCTIONS:
1. When you want to emphasize text, use **bold** format.
2. When listing scholarships, format them as numbered list items with the following structure:
   1. **Scholarship Name** - **Deadline:** Date - **Amount:** Amount - **Why it might be a good fit:** Explanation - **More Information:** [Link Text](URL)
3. Make sure all links are properly formatted as markdown links: [Link Text](URL)";

/// The system instruction first, then the caller's history in its original order.
pub fn assemble_messages(system: String, history: &[ChatMessage]) -> Vec<ChatMessage> {
	let mut messages = Vec::with_capacity(history.len() + 1);

	messages.push(ChatMessage::new(Role::System, system));
	messages.extend(history.iter().cloned());

	messages
}
