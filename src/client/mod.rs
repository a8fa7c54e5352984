//! The streamed-exchange core.
//!
//! [`StreamClient::start`] performs one POST against a DocHive streaming
//! endpoint and drives the decode loop: raw bytes are decoded to UTF-8 text,
//! assembled into records, parsed into events, and handed to the caller's
//! handler strictly in arrival order. The exchange ends in exactly one of
//! three terminal states: completed, errored, or cancelled.

pub mod handler;
pub mod payload;

pub use handler::{FnHandler, StreamHandler};
pub use payload::RequestPayload;

use std::sync::Arc;

use futures_util::StreamExt;
use reqwest::header::AUTHORIZATION;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::StreamError;
use crate::sse::{parse_record, RecordBuffer, Utf8Decoder};
use crate::traits::TokenProvider;

/// Terminal state of one streamed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOutcome {
    /// The stream finished; `on_complete` fired exactly once.
    Completed,
    /// The stream failed; `on_error` received the failure.
    Errored,
    /// The caller cancelled; no completion or error callback fired.
    Cancelled,
}

/// Client for streamed POST exchanges.
///
/// Holds the HTTP connection pool and the injected bearer-token source;
/// each [`start`](StreamClient::start) call owns its own decode state, so
/// the client itself can be shared and reused.
pub struct StreamClient {
    http: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
}

enum StreamEnd {
    Completed,
    Cancelled,
}

impl StreamClient {
    pub fn new(tokens: Arc<dyn TokenProvider>) -> Self {
        Self::with_http_client(reqwest::Client::new(), tokens)
    }

    /// Build on a preconfigured `reqwest::Client` (custom timeouts, proxy,
    /// connection pool).
    pub fn with_http_client(http: reqwest::Client, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { http, tokens }
    }

    /// Perform one streamed exchange.
    ///
    /// Sends `payload` to `target` with a bearer token from the provider,
    /// then dispatches every decoded record to `handler` until a
    /// `done: true` record, end-of-stream, a fatal failure, or `cancel`
    /// fires. The response body is released on every exit path when the
    /// byte stream drops.
    pub async fn start<H: StreamHandler>(
        &self,
        target: &str,
        payload: RequestPayload,
        cancel: &CancellationToken,
        handler: &mut H,
    ) -> StreamOutcome {
        match self.run(target, payload, cancel, handler).await {
            Ok(StreamEnd::Completed) => {
                handler.on_complete();
                StreamOutcome::Completed
            }
            Ok(StreamEnd::Cancelled) => {
                debug!(url = target, "stream cancelled by caller");
                StreamOutcome::Cancelled
            }
            Err(error) => {
                handler.on_error(error);
                StreamOutcome::Errored
            }
        }
    }

    async fn run<H: StreamHandler>(
        &self,
        target: &str,
        payload: RequestPayload,
        cancel: &CancellationToken,
        handler: &mut H,
    ) -> Result<StreamEnd, StreamError> {
        let token = self.tokens.bearer_token().await.unwrap_or_default();
        let request = self
            .http
            .post(target)
            .header(AUTHORIZATION, format!("Bearer {token}"));
        let request = match payload {
            RequestPayload::Json(body) => request.json(&body),
            // No explicit content-type: reqwest derives the multipart
            // boundary when the form is attached.
            RequestPayload::Multipart(form) => request.multipart(form),
        };

        debug!(url = target, "opening stream");
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(StreamEnd::Cancelled),
            sent = request.send() => sent?,
        };

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable response body".to_string());
            return Err(StreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let mut body = response.bytes_stream();
        let mut decoder = Utf8Decoder::new();
        let mut records = RecordBuffer::new();
        let mut dispatched = 0usize;

        loop {
            let chunk = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(StreamEnd::Cancelled),
                chunk = body.next() => chunk,
            };
            match chunk {
                Some(Ok(bytes)) => {
                    records.push(&decoder.decode(&bytes));
                    while let Some(record) = records.next_record() {
                        if dispatch(&record, handler, &mut dispatched) {
                            // Completion marker seen: stop reading even if
                            // more bytes are already buffered.
                            info!(events = dispatched, "stream completed via done marker");
                            return Ok(StreamEnd::Completed);
                        }
                    }
                }
                Some(Err(err)) => return Err(StreamError::Http(err)),
                None => {
                    records.push(&decoder.finish());
                    if let Some(rest) = records.take_remainder() {
                        if dispatch(&rest, handler, &mut dispatched) {
                            info!(events = dispatched, "stream completed via done marker");
                            return Ok(StreamEnd::Completed);
                        }
                    }
                    info!(events = dispatched, "stream ended");
                    return Ok(StreamEnd::Completed);
                }
            }
        }
    }
}

/// Dispatch every event of one record in order. Returns `true` when a
/// `done: true` event was delivered; nothing after it is dispatched.
fn dispatch<H: StreamHandler>(record: &str, handler: &mut H, dispatched: &mut usize) -> bool {
    for event in parse_record(record) {
        let done = event.is_done();
        handler.on_event(event);
        *dispatched += 1;
        if done {
            return true;
        }
    }
    false
}
