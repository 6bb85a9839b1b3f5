use std::time::Duration;

use async_openai::{
	config::OpenAIConfig,
	types::{
		ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
		CreateChatCompletionRequestArgs, Role,
	},
	Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use tracing::{error, trace};

use crate::types::{Completion, ContextMessage, LlmError};

/// Base URL of Groq's OpenAI compatible API.
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Model prompted when none is configured.
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// A hosted text completion provider.
///
/// Implementations send `msgs` to `model` in a single, non-streaming request and hand back every
/// candidate completion in the order the provider returned them. No retries are expected: a
/// failed call is reported as is.
#[async_trait]
pub trait Llm: Send + Sync + 'static {
	/// Short name used in logs.
	fn name(&self) -> &'static str;

	/// Prompt `model` with `msgs`.
	async fn prompt(
		&self,
		model: &str,
		msgs: Vec<ContextMessage>,
	) -> Result<Vec<Completion>, LlmError>;
}

/// [`Llm`] backed by Groq's chat completions endpoint.
pub struct GroqLlm {
	client: Client<OpenAIConfig>,
}

impl GroqLlm {
	pub fn new(api_key: &str, api_base: &str) -> Self {
		let config = OpenAIConfig::new().with_api_key(api_key).with_api_base(api_base);

		// async-openai retries rate limited requests on its own; an empty time budget turns
		// that off so the first failure is surfaced.
		let no_retry =
			ExponentialBackoffBuilder::new().with_max_elapsed_time(Some(Duration::ZERO)).build();

		Self { client: Client::with_config(config).with_backoff(no_retry) }
	}

	fn build_messages(
		msgs: Vec<ContextMessage>,
	) -> Result<Vec<ChatCompletionRequestMessage>, LlmError> {
		msgs.into_iter()
			.map(|msg| -> Result<ChatCompletionRequestMessage, LlmError> {
				match msg.role {
					Role::User => Ok(ChatCompletionRequestUserMessageArgs::default()
						.content(msg.content)
						.build()?
						.into()),
					role => Err(LlmError::UnsupportedRole(format!("{:?}", role))),
				}
			})
			.collect()
	}
}

#[async_trait]
impl Llm for GroqLlm {
	fn name(&self) -> &'static str {
		"groq"
	}

	async fn prompt(
		&self,
		model: &str,
		msgs: Vec<ContextMessage>,
	) -> Result<Vec<Completion>, LlmError> {
		let request = CreateChatCompletionRequestArgs::default()
			.model(model)
			.messages(Self::build_messages(msgs)?)
			.build()?;

		trace!(model, "sending chat completion request");

		let res = self.client.chat().create(request).await.map_err(|e| {
			error!("Failed to prompt {}: {}", self.name(), e);
			LlmError::from(e)
		})?;

		Ok(res.choices.into_iter().map(|choice| Completion::from(choice.message.content)).collect())
	}
}
