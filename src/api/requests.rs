//! Request bodies for the DocHive streaming endpoints.

use serde::Serialize;
use serde_json::Value;

/// Question for the QA endpoints (`/qa/ask/stream`, `/qa/ask/agent/stream`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaRequest {
    /// The user's question.
    pub question: String,
    /// Restrict retrieval to one classification template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
    /// How many documents to retrieve (backend default: 5, range 1–20).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

impl QaRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            template_id: None,
            top_k: None,
        }
    }

    pub fn with_template(mut self, template_id: i64) -> Self {
        self.template_id = Some(template_id);
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }
}

/// Answer to an agent's clarification question (`/qa/ask/agent/clarify`).
///
/// `session_id` comes from the `ambiguity` event of the preceding agent
/// stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClarifyRequest {
    pub session_id: String,
    pub answer: String,
}

impl ClarifyRequest {
    pub fn new(session_id: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            answer: answer.into(),
        }
    }
}

/// File upload for `/documents/upload` (multipart).
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    /// File name reported to the backend.
    pub file_name: String,
    /// Raw file bytes.
    pub content: Vec<u8>,
    /// Document title.
    pub title: String,
    /// Classification template to file the document under.
    pub template_id: Option<i64>,
    /// Extra metadata, serialized as a JSON form field.
    pub metadata: Option<Value>,
}

impl DocumentUpload {
    pub fn new(
        file_name: impl Into<String>,
        content: Vec<u8>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content,
            title: title.into(),
            template_id: None,
            metadata: None,
        }
    }

    pub fn with_template(mut self, template_id: i64) -> Self {
        self.template_id = Some(template_id);
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Build the multipart form. Field names match the backend's
    /// `UploadFile`/`Form` parameters.
    pub fn into_form(self) -> reqwest::multipart::Form {
        let file = reqwest::multipart::Part::bytes(self.content).file_name(self.file_name);
        let mut form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("title", self.title);
        if let Some(template_id) = self.template_id {
            form = form.text("template_id", template_id.to_string());
        }
        if let Some(metadata) = self.metadata {
            form = form.text("metadata", metadata.to_string());
        }
        form
    }
}

/// Body for `/documents/create-manually`: a document typed in by hand
/// rather than uploaded as a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManualDocument {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl ManualDocument {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            template_id: None,
            metadata: None,
        }
    }

    pub fn with_template(mut self, template_id: i64) -> Self {
        self.template_id = Some(template_id);
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// One level of a classification template hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateLevel {
    /// 1-based position in the hierarchy.
    pub level: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Prompt used by the backend to extract this level's value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_example: Option<String>,
}

impl TemplateLevel {
    pub fn new(level: u32, name: impl Into<String>) -> Self {
        Self {
            level,
            name: name.into(),
            code: None,
            description: None,
            extraction_prompt: None,
            placeholder_example: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_extraction_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.extraction_prompt = Some(prompt.into());
        self
    }
}

/// Body for streamed template creation (`POST /templates/`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub levels: Vec<TemplateLevel>,
    pub version: String,
}

impl TemplateCreate {
    pub fn new(name: impl Into<String>, levels: Vec<TemplateLevel>) -> Self {
        Self {
            name: name.into(),
            description: None,
            levels,
            version: "1.0".to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
