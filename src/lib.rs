//! Streaming API client for the DocHive document-classification backend.
//!
//! The backend answers questions, classifies uploads, and creates templates
//! over streamed HTTP responses in SSE form: `data:`-prefixed JSON records
//! separated by blank lines, with a `done: true` marker on the terminal
//! record. This crate performs those exchanges and hands each decoded event
//! to a caller-supplied [`StreamHandler`], guaranteeing in-order delivery,
//! exactly-once completion, at-most-once error, and silent cancellation.
//!
//! ```no_run
//! use std::sync::Arc;
//! use dochive_client::{DocHiveClient, FnHandler, QaRequest};
//! use dochive_client::auth::CredentialStore;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() {
//! let client = DocHiveClient::with_base_url(
//!     "http://localhost:8000",
//!     Arc::new(CredentialStore::new()),
//! );
//! let cancel = CancellationToken::new();
//! let mut handler = FnHandler::new(
//!     |event| {
//!         if let Some(fragment) = event.answer() {
//!             print!("{fragment}");
//!         }
//!     },
//!     |error| eprintln!("stream failed: {error}"),
//!     || println!(),
//! );
//! client
//!     .ask_stream(&QaRequest::new("归档号的编制规则是什么?"), &cancel, &mut handler)
//!     .await;
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod sse;
pub mod traits;

pub use api::{
    ClarifyRequest, DocHiveClient, DocumentUpload, ManualDocument, QaRequest, TemplateCreate,
    TemplateLevel,
};
pub use client::{FnHandler, RequestPayload, StreamClient, StreamHandler, StreamOutcome};
pub use error::StreamError;
pub use sse::{EventKind, StreamEvent};
pub use traits::{StaticToken, TokenProvider};
