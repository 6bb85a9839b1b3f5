use std::{net::SocketAddr, sync::Arc};

use axum::{
	extract::{rejection::JsonRejection, State},
	response::{IntoResponse, Response},
	routing::post,
	Json, Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, instrument, warn};

use crate::{
	types::{DiagramResponse, ErrorResponse, GenerateRequest},
	DiagramWeaver, Llm,
};

/// HTTP front of a [`DiagramWeaver`].
///
/// Exposes `POST /generate` with an open CORS policy.
pub struct ApiService<L: Llm> {
	weaver: Arc<DiagramWeaver<L>>,
}

impl<L: Llm> ApiService<L> {
	pub fn new(weaver: DiagramWeaver<L>) -> Self {
		Self { weaver: Arc::new(weaver) }
	}

	/// Builds the axum [`Router`] serving the API.
	pub fn router(&self) -> Router {
		Router::new()
			.route("/generate", post(generate::<L>))
			.layer(CorsLayer::permissive())
			.with_state(self.weaver.clone())
	}

	/// Binds `addr` and serves requests until the process is stopped.
	pub async fn serve(self, addr: SocketAddr) -> std::io::Result<()> {
		let listener = TcpListener::bind(addr).await?;

		info!(
			task = "bind",
			result = "success",
			%addr,
			model = self.weaver.model(),
			"diagram service is listening"
		);

		axum::serve(listener, self.router()).await
	}
}

/// `POST /generate` handler.
///
/// Every failure is answered with an `{"error": ...}` body; nothing escapes the request.
#[instrument(skip_all)]
pub async fn generate<L: Llm>(
	State(weaver): State<Arc<DiagramWeaver<L>>>,
	payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
	let request = match payload {
		Ok(Json(request)) => request,
		Err(rejection) => {
			warn!("Rejected request body: {}", rejection);
			return (rejection.status(), Json(ErrorResponse { error: rejection.body_text() }))
				.into_response()
		},
	};

	match weaver.weave(request.topic.as_deref().unwrap_or_default()).await {
		Ok(diagram) => Json(DiagramResponse { diagram }).into_response(),
		Err(e) => e.into_response(),
	}
}
