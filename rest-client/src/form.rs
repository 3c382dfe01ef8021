// rest-client/src/form.rs
use serde_json::{json, Value};

/// One entry of a multipart form
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: Option<String>,
        bytes: Vec<u8>,
    },
}

/// Binary form container, sent as `multipart/form-data`
///
/// Parts keep insertion order; repeated names are allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    parts: Vec<FormPart>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append_text(name, value);
        self
    }

    /// Append a file field without a declared MIME type
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            mime: None,
            bytes,
        });
        self
    }

    /// Append a file field with an explicit MIME type
    pub fn file_with_mime(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: file_name.into(),
            mime: Some(mime.into()),
            bytes,
        });
        self
    }

    pub fn append_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Last text value appended under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.parts.iter().rev().find_map(|part| match part {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn into_parts(self) -> Vec<FormPart> {
        self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Loggable view: text values verbatim, files as name and size only
    pub fn summary(&self) -> Value {
        let parts: Vec<Value> = self
            .parts
            .iter()
            .map(|part| match part {
                FormPart::Text { name, value } => json!({ "name": name, "value": value }),
                FormPart::File {
                    name,
                    file_name,
                    bytes,
                    ..
                } => json!({ "name": name, "file": file_name, "size": bytes.len() }),
            })
            .collect();
        Value::Array(parts)
    }
}
