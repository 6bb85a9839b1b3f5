//! Turns a topic into a [blockdiag](http://blockdiag.com) diagram description by asking a hosted
//! LLM for one.
//!
//! The heart of the crate is [`DiagramWeaver`], which builds a fixed instruction around the
//! topic, prompts an [`Llm`] once and post-processes the reply:
//!
//! 1. every fenced markdown block (` ``` ... ``` `) is removed,
//! 2. the first `blockdiag { ... }` span left is returned verbatim,
//! 3. when there is none, `blockdiag { A -> B; B -> C }` is returned instead.
//!
//! [`GroqLlm`] implements [`Llm`] on top of Groq's OpenAI compatible chat completions API. Any
//! other provider can be plugged in by implementing the [`Llm`] trait and handing it to
//! [`DiagramWeaver::new`].
//!
//! [`ApiService`] exposes the weaver over HTTP as `POST /generate`.
//!
//! The `diagram-weaver` binary requires the following environment variable (an `.env` file is
//! picked up as well):
//!
//! - `GROQ_API_KEY`
//!
//! # Example
//!
//! ```no_run
//! use diagram_weaver::{ApiService, DiagramWeaver, GroqLlm, DEFAULT_MODEL, GROQ_API_BASE};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//! 	let llm = GroqLlm::new(&std::env::var("GROQ_API_KEY").unwrap(), GROQ_API_BASE);
//! 	let weaver = DiagramWeaver::new(llm, DEFAULT_MODEL);
//!
//! 	ApiService::new(weaver).serve(([0, 0, 0, 0], 5000).into()).await
//! }
//! ```

pub mod extract;
pub mod llm;
pub mod service;
pub mod types;
pub mod weaver;

pub use llm::{GroqLlm, Llm, DEFAULT_MODEL, GROQ_API_BASE};
pub use service::server::ApiService;
pub use types::{Completion, ContextMessage, LlmError, WeaveError};
pub use weaver::DiagramWeaver;

#[cfg(test)]
mod mock;
