use std::fmt::Display;

use async_openai::{error::OpenAIError, types::Role};
use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::{Deserialize, Serialize};

/// Error message returned to clients when the topic is absent or blank.
pub const MISSING_TOPIC: &str = "Missing topic";

/// A single role tagged message sent to an [`Llm`](crate::Llm).
#[derive(Debug, Clone)]
pub struct ContextMessage {
	pub role: Role,
	pub content: String,
}

impl ContextMessage {
	/// Builds a user role message.
	pub fn user(content: impl Into<String>) -> Self {
		Self { role: Role::User, content: content.into() }
	}
}

/// One candidate completion returned by an [`Llm`](crate::Llm).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
	pub content: Option<String>,
}

impl From<Option<String>> for Completion {
	fn from(content: Option<String>) -> Self {
		Self { content }
	}
}

/// Body of a `POST /generate` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
	#[serde(default)]
	pub topic: Option<String>,
}

/// Successful body of a `POST /generate` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramResponse {
	pub diagram: String,
}

/// Error body of a `POST /generate` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
	/// The request to the completion API failed or could not be built.
	Request(#[from] OpenAIError),
	/// Provider specific failure carrying its own description.
	///
	/// Not produced by [`GroqLlm`](crate::GroqLlm); meant for custom [`Llm`](crate::Llm)
	/// implementations whose errors are not [`OpenAIError`]s.
	Provider(String),
	/// The provider answered without any completion.
	NoCompletions,
	/// The first completion had no text.
	EmptyContent,
	/// A message role the provider integration does not send.
	UnsupportedRole(String),
}

impl Display for LlmError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Request(e) => write!(f, "{}", e),
			Self::Provider(msg) => write!(f, "{}", msg),
			Self::NoCompletions => write!(f, "Completion provider returned no completions"),
			Self::EmptyContent => write!(f, "Completion provider returned an empty completion"),
			Self::UnsupportedRole(role) => write!(f, "Unsupported message role: {}", role),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum WeaveError {
	/// The topic was absent or blank after trimming.
	MissingTopic,
	/// Anything that went wrong while talking to the completion provider.
	Upstream(#[from] LlmError),
}

impl WeaveError {
	pub fn status(&self) -> StatusCode {
		match self {
			Self::MissingTopic => StatusCode::BAD_REQUEST,
			Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl Display for WeaveError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::MissingTopic => write!(f, "{}", MISSING_TOPIC),
			Self::Upstream(e) => write!(f, "{}", e),
		}
	}
}

impl IntoResponse for WeaveError {
	fn into_response(self) -> Response {
		(self.status(), Json(ErrorResponse { error: self.to_string() })).into_response()
	}
}
