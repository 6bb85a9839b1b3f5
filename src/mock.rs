use std::sync::{
	atomic::{AtomicUsize, Ordering},
	Mutex,
};

use async_trait::async_trait;

use crate::*;

/// What a [`MockLlm`] answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
	Completions(Vec<Completion>),
	Failure(String),
}

/// Deterministic [`Llm`] recording every prompt it receives.
#[derive(Debug)]
pub struct MockLlm {
	reply: MockReply,
	calls: AtomicUsize,
	last_request: Mutex<Option<(String, Vec<ContextMessage>)>>,
}

impl MockLlm {
	pub fn new(reply: MockReply) -> Self {
		Self { reply, calls: AtomicUsize::new(0), last_request: Mutex::new(None) }
	}

	/// Answers with a single completion holding `content`.
	pub fn replying(content: &str) -> Self {
		Self::new(MockReply::Completions(vec![Completion::from(Some(content.to_string()))]))
	}

	/// Fails every prompt with `msg`.
	pub fn failing(msg: &str) -> Self {
		Self::new(MockReply::Failure(msg.to_string()))
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn last_request(&self) -> Option<(String, Vec<ContextMessage>)> {
		self.last_request.lock().unwrap().clone()
	}
}

#[async_trait]
impl Llm for MockLlm {
	fn name(&self) -> &'static str {
		"mock"
	}

	async fn prompt(
		&self,
		model: &str,
		msgs: Vec<ContextMessage>,
	) -> Result<Vec<Completion>, LlmError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		*self.last_request.lock().unwrap() = Some((model.to_string(), msgs));

		match &self.reply {
			MockReply::Completions(completions) => Ok(completions.clone()),
			MockReply::Failure(msg) => Err(LlmError::Provider(msg.clone())),
		}
	}
}

pub const MOCK_MODEL: &str = "mock-model";

pub fn mock_weaver(llm: MockLlm) -> DiagramWeaver<MockLlm> {
	DiagramWeaver::new(llm, MOCK_MODEL)
}
