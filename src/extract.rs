//! Prompt construction and post-processing of the raw completion text.
//!
//! The model is asked for a bare `blockdiag { ... }` block, but nothing forces it to comply.
//! Replies are cleaned by dropping every fenced markdown block and then scanning for the first
//! `blockdiag` block. Nested braces are not understood: the match ends at the first `}`.

use lazy_static::lazy_static;
use regex::Regex;

/// Diagram returned when the completion holds no recognizable `blockdiag` block.
pub const FALLBACK_DIAGRAM: &str = "blockdiag { A -> B; B -> C }";

lazy_static! {
	/// Triple backtick fenced spans, shortest match so adjacent fences are removed separately.
	static ref FENCE_RE: Regex = Regex::new(r"(?s)```.*?```").expect("fence pattern is valid");
	static ref BLOCKDIAG_RE: Regex =
		Regex::new(r"blockdiag\s*\{[^}]+\}").expect("blockdiag pattern is valid");
}

/// Builds the instruction sent to the model for `topic`.
pub fn build_prompt(topic: &str) -> String {
	format!(
		"Write only a valid blockdiag diagram in the format:\n\
		 blockdiag {{ ... }}\n\
		 Do not add explanations or markdown fences. \
		 Just output the diagram only. \
		 Topic: {}",
		topic
	)
}

/// Removes all fenced code blocks from `raw` and trims what is left.
pub fn strip_fences(raw: &str) -> String {
	FENCE_RE.replace_all(raw, "").trim().to_string()
}

/// Returns the first `blockdiag { ... }` span of `cleaned`, or [`FALLBACK_DIAGRAM`].
pub fn extract_diagram(cleaned: &str) -> &str {
	BLOCKDIAG_RE.find(cleaned).map(|m| m.as_str()).unwrap_or(FALLBACK_DIAGRAM)
}
