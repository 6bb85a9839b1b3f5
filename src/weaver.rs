use tracing::{debug, error, info, instrument};

use crate::{
	extract::{build_prompt, extract_diagram, strip_fences},
	types::{ContextMessage, LlmError, WeaveError},
	Llm,
};

/// Turns topics into `blockdiag` source by prompting an [`Llm`].
///
/// Holds no per request state; one instance is shared by every request handler.
#[derive(Debug)]
pub struct DiagramWeaver<L: Llm> {
	llm: L,
	model: String,
}

impl<L: Llm> DiagramWeaver<L> {
	/// Creates a new `DiagramWeaver` prompting `model` through `llm`.
	pub fn new(llm: L, model: impl Into<String>) -> Self {
		Self { llm, model: model.into() }
	}

	pub fn llm(&self) -> &L {
		&self.llm
	}

	pub fn model(&self) -> &str {
		&self.model
	}

	/// Generate a `blockdiag` diagram for `topic`.
	///
	/// The topic is trimmed and must not be empty, otherwise [`WeaveError::MissingTopic`] is
	/// returned without contacting the provider.
	///
	/// The first completion of the provider is cleaned of fenced markdown blocks and the first
	/// `blockdiag { ... }` span left over is returned verbatim. When no such span exists the
	/// [`FALLBACK_DIAGRAM`](crate::extract::FALLBACK_DIAGRAM) is returned instead.
	///
	/// Provider failures are returned as [`WeaveError::Upstream`] and never retried.
	#[instrument(skip(self), fields(llm = self.llm.name(), model = %self.model))]
	pub async fn weave(&self, topic: &str) -> Result<String, WeaveError> {
		let topic = topic.trim();
		if topic.is_empty() {
			return Err(WeaveError::MissingTopic)
		}

		info!(topic, "received topic");

		let msgs = vec![ContextMessage::user(build_prompt(topic))];

		let completions = self.llm.prompt(&self.model, msgs).await.map_err(|e| {
			error!("Failed to prompt completion provider: {}", e);
			e
		})?;

		let raw = completions
			.into_iter()
			.next()
			.ok_or(LlmError::NoCompletions)?
			.content
			.map(|content| content.trim().to_string())
			.filter(|content| !content.is_empty())
			.ok_or(LlmError::EmptyContent)?;

		debug!(raw_output = %raw, "received completion");

		let cleaned = strip_fences(&raw);

		debug!(cleaned = %cleaned, "stripped markdown fences");

		let diagram = extract_diagram(&cleaned).to_string();

		debug!(diagram = %diagram, "extracted blockdiag code");

		Ok(diagram)
	}
}
