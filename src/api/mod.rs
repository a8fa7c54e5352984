//! DocHive endpoint bindings.
//!
//! [`DocHiveClient`] pairs each streaming endpoint of the backend with a
//! typed request body and routes the exchange through
//! [`StreamClient`](crate::client::StreamClient). Every method drives the
//! caller's handler to one terminal outcome.

mod requests;

pub use requests::{
    ClarifyRequest, DocumentUpload, ManualDocument, QaRequest, TemplateCreate, TemplateLevel,
};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::client::{RequestPayload, StreamClient, StreamHandler, StreamOutcome};
use crate::error::StreamError;
use crate::traits::TokenProvider;

/// Default backend address for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const API_PREFIX: &str = "/api/v1";

/// High-level client for the DocHive backend streaming API.
pub struct DocHiveClient {
    base_url: String,
    stream: StreamClient,
}

impl DocHiveClient {
    /// Client against [`DEFAULT_BASE_URL`].
    pub fn new(tokens: Arc<dyn TokenProvider>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, tokens)
    }

    /// Client against a custom backend address.
    pub fn with_base_url(base_url: impl Into<String>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            stream: StreamClient::new(tokens),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    async fn stream_json<H: StreamHandler, T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
        cancel: &CancellationToken,
        handler: &mut H,
    ) -> StreamOutcome {
        let payload = match RequestPayload::json(body) {
            Ok(payload) => payload,
            Err(err) => {
                // Nothing was sent; this is still a single on_error outcome.
                handler.on_error(StreamError::Encode(err));
                return StreamOutcome::Errored;
            }
        };
        self.stream
            .start(&self.url(path), payload, cancel, handler)
            .await
    }

    /// Streamed question answering: `POST /qa/ask/stream`.
    ///
    /// Emits `thinking`, `references`, and `answer` events, ending with
    /// `complete` (or `error`) carrying `done: true`.
    pub async fn ask_stream<H: StreamHandler>(
        &self,
        request: &QaRequest,
        cancel: &CancellationToken,
        handler: &mut H,
    ) -> StreamOutcome {
        self.stream_json("/qa/ask/stream", request, cancel, handler)
            .await
    }

    /// Streamed agent retrieval: `POST /qa/ask/agent/stream`.
    ///
    /// Adds `stage_complete` events per pipeline stage and may end early
    /// with an `ambiguity` event whose `session_id` feeds
    /// [`agent_clarify`](DocHiveClient::agent_clarify).
    pub async fn agent_ask_stream<H: StreamHandler>(
        &self,
        request: &QaRequest,
        cancel: &CancellationToken,
        handler: &mut H,
    ) -> StreamOutcome {
        self.stream_json("/qa/ask/agent/stream", request, cancel, handler)
            .await
    }

    /// Answer an agent clarification question: `POST /qa/ask/agent/clarify`.
    ///
    /// Resumes the agent session; the response streams like
    /// [`agent_ask_stream`](DocHiveClient::agent_ask_stream).
    pub async fn agent_clarify<H: StreamHandler>(
        &self,
        request: &ClarifyRequest,
        cancel: &CancellationToken,
        handler: &mut H,
    ) -> StreamOutcome {
        self.stream_json("/qa/ask/agent/clarify", request, cancel, handler)
            .await
    }

    /// Upload a document file: `POST /documents/upload` (multipart).
    ///
    /// The backend streams extraction and classification progress events
    /// while it processes the file.
    pub async fn upload_document<H: StreamHandler>(
        &self,
        upload: DocumentUpload,
        cancel: &CancellationToken,
        handler: &mut H,
    ) -> StreamOutcome {
        self.stream
            .start(
                &self.url("/documents/upload"),
                RequestPayload::multipart(upload.into_form()),
                cancel,
                handler,
            )
            .await
    }

    /// Create a document from typed-in content:
    /// `POST /documents/create-manually`.
    pub async fn create_document<H: StreamHandler>(
        &self,
        document: &ManualDocument,
        cancel: &CancellationToken,
        handler: &mut H,
    ) -> StreamOutcome {
        self.stream_json("/documents/create-manually", document, cancel, handler)
            .await
    }

    /// Create a classification template with streamed progress:
    /// `POST /templates/`.
    pub async fn create_template<H: StreamHandler>(
        &self,
        template: &TemplateCreate,
        cancel: &CancellationToken,
        handler: &mut H,
    ) -> StreamOutcome {
        self.stream_json("/templates/", template, cancel, handler)
            .await
    }
}
