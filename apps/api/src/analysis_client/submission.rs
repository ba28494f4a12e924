use bytes::Bytes;

/// An uploaded resume file, held in memory for forwarding.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// A resume plus the text fields forwarded alongside it.
#[derive(Debug, Clone)]
pub struct Submission {
    pub resume: ResumeUpload,
    pub fields: Vec<(&'static str, String)>,
}

impl Submission {
    pub fn new(resume: ResumeUpload) -> Self {
        Self {
            resume,
            fields: Vec::new(),
        }
    }

    /// Sets a text field, replacing any earlier value under the same name.
    pub fn with_field(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.retain(|(existing, _)| *existing != name);
        self.fields.push((name, value.into()));
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, value)| value.as_str())
    }
}
