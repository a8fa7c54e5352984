//! Typed view of the DocHive streaming events.
//!
//! Every record the backend sends is a JSON object of the shape
//! `{"event": <name>, "data": <payload>, "done": <bool>}`. All three fields
//! are optional on the wire, so [`StreamEvent`] keeps them optional and the
//! typed payload accessors decode `data` on demand.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One decoded stream record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamEvent {
    /// Event discriminator, e.g. `"thinking"` or `"answer"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// Arbitrary payload; shape depends on the event name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Completion marker; `true` only on the terminal record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl StreamEvent {
    /// Whether this record carries the completion marker.
    pub fn is_done(&self) -> bool {
        self.done == Some(true)
    }

    /// The event discriminator, classified.
    pub fn kind(&self) -> EventKind {
        match self.event.as_deref() {
            Some(name) => EventKind::from_name(name),
            None => EventKind::Unknown,
        }
    }

    fn payload<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        let data = self.data.clone()?;
        serde_json::from_value(data).ok()
    }

    /// Payload of a `thinking` event.
    pub fn thinking(&self) -> Option<ThinkingData> {
        (self.kind() == EventKind::Thinking)
            .then(|| self.payload())
            .flatten()
    }

    /// Document references carried by a `references` event.
    pub fn references(&self) -> Option<Vec<DocumentReference>> {
        if self.kind() != EventKind::References {
            return None;
        }
        self.payload::<ReferencesData>().map(|d| d.references)
    }

    /// Answer fragment carried by an `answer` event.
    pub fn answer(&self) -> Option<String> {
        if self.kind() != EventKind::Answer {
            return None;
        }
        self.payload::<AnswerData>().map(|d| d.content)
    }

    /// Payload of an `ambiguity` event (agent asks the user to clarify).
    pub fn ambiguity(&self) -> Option<AmbiguityData> {
        (self.kind() == EventKind::Ambiguity)
            .then(|| self.payload())
            .flatten()
    }

    /// Payload of a `stage_complete` event.
    pub fn stage_complete(&self) -> Option<StageCompleteData> {
        (self.kind() == EventKind::StageComplete)
            .then(|| self.payload())
            .flatten()
    }

    /// Message of an `error` event.
    pub fn error_message(&self) -> Option<String> {
        if self.kind() != EventKind::Error {
            return None;
        }
        self.payload::<ErrorData>().map(|d| d.message)
    }
}

/// Known event discriminators emitted by the DocHive backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Progress update while the backend retrieves or analyzes.
    Thinking,
    /// Retrieved document references.
    References,
    /// Streamed answer fragment.
    Answer,
    /// An agent pipeline stage finished.
    StageComplete,
    /// The agent needs clarification from the user.
    Ambiguity,
    /// The exchange finished successfully.
    Complete,
    /// The backend reported a failure.
    Error,
    /// Anything this client does not know about.
    Unknown,
}

impl EventKind {
    fn from_name(name: &str) -> Self {
        match name {
            "thinking" => EventKind::Thinking,
            "references" => EventKind::References,
            "answer" => EventKind::Answer,
            "stage_complete" => EventKind::StageComplete,
            "ambiguity" => EventKind::Ambiguity,
            "complete" => EventKind::Complete,
            "error" => EventKind::Error,
            _ => EventKind::Unknown,
        }
    }
}

/// `thinking` payload: which stage is running and a human-readable note.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThinkingData {
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ReferencesData {
    #[serde(default)]
    references: Vec<DocumentReference>,
}

/// One retrieved document reference.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentReference {
    pub document_id: i64,
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct AnswerData {
    content: String,
}

/// `ambiguity` payload: the clarification question plus the session to
/// answer against via the clarify endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AmbiguityData {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// `stage_complete` payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StageCompleteData {
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorData {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(raw: &str) -> StreamEvent {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn all_fields_optional() {
        let ev = parse("{}");
        assert_eq!(ev.event, None);
        assert_eq!(ev.data, None);
        assert_eq!(ev.done, None);
        assert!(!ev.is_done());
        assert_eq!(ev.kind(), EventKind::Unknown);
    }

    #[test]
    fn thinking_event_decodes() {
        let ev = parse(
            r#"{"event":"thinking","data":{"stage":"retrieving","message":"正在检索相关文档..."},"done":false}"#,
        );
        assert_eq!(ev.kind(), EventKind::Thinking);
        assert!(!ev.is_done());
        let thinking = ev.thinking().unwrap();
        assert_eq!(thinking.stage.as_deref(), Some("retrieving"));
        assert_eq!(thinking.message.as_deref(), Some("正在检索相关文档..."));
    }

    #[test]
    fn references_event_decodes() {
        let ev = parse(
            r#"{"event":"references","data":{"references":[{"document_id":7,"title":"合同","snippet":"…","score":0.91}]},"done":false}"#,
        );
        let refs = ev.references().unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].document_id, 7);
        assert_eq!(refs[0].title, "合同");
        assert!((refs[0].score - 0.91).abs() < f64::EPSILON);
    }

    #[test]
    fn answer_event_decodes() {
        let ev = parse(r#"{"event":"answer","data":{"content":"第一段"},"done":false}"#);
        assert_eq!(ev.answer().as_deref(), Some("第一段"));
        // Accessors for other kinds return None.
        assert!(ev.thinking().is_none());
        assert!(ev.error_message().is_none());
    }

    #[test]
    fn complete_event_is_done() {
        let ev = parse(r#"{"event":"complete","data":{"message":"回答完成"},"done":true}"#);
        assert_eq!(ev.kind(), EventKind::Complete);
        assert!(ev.is_done());
    }

    #[test]
    fn ambiguity_carries_session() {
        let ev = parse(
            r#"{"event":"ambiguity","data":{"message":"请补充时间范围","session_id":"sess-42"},"done":false}"#,
        );
        let amb = ev.ambiguity().unwrap();
        assert_eq!(amb.session_id.as_deref(), Some("sess-42"));
        assert_eq!(amb.message.as_deref(), Some("请补充时间范围"));
    }

    #[test]
    fn error_event_message() {
        let ev = parse(r#"{"event":"error","data":{"message":"问答失败"},"done":true}"#);
        assert_eq!(ev.kind(), EventKind::Error);
        assert_eq!(ev.error_message().as_deref(), Some("问答失败"));
        assert!(ev.is_done());
    }

    #[test]
    fn unknown_event_name_is_tolerated() {
        let ev = parse(r#"{"event":"heartbeat","data":null}"#);
        assert_eq!(ev.kind(), EventKind::Unknown);
        assert!(!ev.is_done());
    }

    #[test]
    fn payload_with_wrong_shape_yields_none() {
        let ev = StreamEvent {
            event: Some("answer".to_string()),
            data: Some(json!({"unexpected": true})),
            done: Some(false),
        };
        assert!(ev.answer().is_none());
    }

    #[test]
    fn references_default_to_empty_list() {
        let ev = parse(r#"{"event":"references","data":{}}"#);
        assert_eq!(ev.references().unwrap(), Vec::new());
    }

    #[test]
    fn stage_complete_decodes() {
        let ev = parse(
            r#"{"event":"stage_complete","data":{"stage":"extraction","message":"条件解析完成"},"done":false}"#,
        );
        let stage = ev.stage_complete().unwrap();
        assert_eq!(stage.stage.as_deref(), Some("extraction"));
    }
}
