//! Shared fixtures for the integration suites.

use std::sync::Once;

use dochive_client::{StreamError, StreamEvent, StreamHandler};

static TRACING: Once = Once::new();

/// Route client logs to the test output when RUST_LOG is set.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Records every callback for later assertions.
#[derive(Default)]
pub struct Recorder {
    pub events: Vec<StreamEvent>,
    pub errors: Vec<StreamError>,
    pub completions: u32,
}

impl StreamHandler for Recorder {
    fn on_event(&mut self, event: StreamEvent) {
        self.events.push(event);
    }

    fn on_error(&mut self, error: StreamError) {
        self.errors.push(error);
    }

    fn on_complete(&mut self) {
        self.completions += 1;
    }
}

/// Build an SSE body out of raw JSON payloads, one record each.
pub fn sse_body(payloads: &[&str]) -> String {
    payloads
        .iter()
        .map(|payload| format!("data: {payload}\n\n"))
        .collect()
}
