//! Labeled-block report rendering
//!
//! Every connector renders the same shape:
//!
//! ```text
//! [Source Title]
//! Label: value
//! Label: value
//! ```

/// Builder for a labeled report
#[derive(Debug, Clone)]
pub struct Report {
    title: String,
    fields: Vec<(String, String)>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    /// Append a `label: value` line
    pub fn field(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((label.into(), value.into()));
        self
    }

    pub fn render(&self) -> String {
        let mut out = format!("[{}]", self.title);
        for (label, value) in &self.fields {
            out.push('\n');
            out.push_str(label);
            out.push_str(": ");
            out.push_str(value);
        }
        out
    }
}
