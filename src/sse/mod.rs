//! SSE record assembly for the DocHive streaming endpoints.
//!
//! The backend emits newline-delimited records separated by a blank line.
//! Only `data:` lines matter to this client; the JSON they carry is the
//! event envelope. `event:` lines and `:` comments are transport dressing
//! and are ignored.

pub mod decoder;
pub mod events;

pub use decoder::Utf8Decoder;
pub use events::{
    AmbiguityData, DocumentReference, EventKind, StageCompleteData, StreamEvent, ThinkingData,
};

use tracing::warn;

/// Accumulates decoded text and yields one record per blank-line boundary.
///
/// The trailing incomplete fragment stays buffered until the delimiter for
/// it arrives or the stream ends, at which point
/// [`take_remainder`](RecordBuffer::take_remainder) flushes it.
#[derive(Debug, Default)]
pub struct RecordBuffer {
    text: String,
}

impl RecordBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append decoded text to the buffer.
    pub fn push(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Pop the next complete record, if the buffer holds one.
    ///
    /// Records end at `\n\n` or `\r\n\r\n`, whichever comes first.
    pub fn next_record(&mut self) -> Option<String> {
        let lf = self.text.find("\n\n").map(|at| (at, 2));
        let crlf = self.text.find("\r\n\r\n").map(|at| (at, 4));
        let (at, sep) = match (lf, crlf) {
            (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
            (found, None) | (None, found) => found,
        }?;
        let record = self.text[..at].to_string();
        self.text.drain(..at + sep);
        Some(record)
    }

    /// Take whatever is left once the stream has ended.
    ///
    /// A server that closes the connection right after its last record may
    /// omit the final blank line; the leftover text is still a record.
    pub fn take_remainder(&mut self) -> Option<String> {
        if self.text.trim().is_empty() {
            self.text.clear();
            return None;
        }
        Some(std::mem::take(&mut self.text))
    }
}

/// Parse the `data:` lines of one record into events, in line order.
///
/// A line whose payload is not valid JSON is logged and skipped; one bad
/// line never fails the record, let alone the stream.
pub fn parse_record(record: &str) -> Vec<StreamEvent> {
    let mut parsed = Vec::new();
    for line in record.lines() {
        let Some(rest) = line.strip_prefix("data:") else {
            continue;
        };
        let raw = rest.trim();
        if raw.is_empty() {
            continue;
        }
        match serde_json::from_str::<StreamEvent>(raw) {
            Ok(event) => parsed.push(event),
            Err(err) => warn!(%err, line = raw, "skipping malformed data line"),
        }
    }
    parsed
}
