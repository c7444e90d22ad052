//! Data handed to the view composer for a single request.

use super::snippet::Snippet;
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

/// Template payload. Built fresh for every request and never shared.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateData {
    pub current_year: i32,
    pub flash: Option<String>,
    pub snippet: Option<Snippet>,
    pub snippets: Vec<Snippet>,
}

impl TemplateData {
    /// Empty payload for a request handled at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            current_year: now.year(),
            flash: None,
            snippet: None,
            snippets: Vec::new(),
        }
    }

    /// Attach the snippet for the show page.
    pub fn with_snippet(mut self, snippet: Snippet) -> Self {
        self.snippet = Some(snippet);
        self
    }

    /// Attach the listing for the home page.
    pub fn with_snippets(mut self, snippets: Vec<Snippet>) -> Self {
        self.snippets = snippets;
        self
    }

    pub fn flash(mut self, message: impl Into<String>) -> Self {
        self.flash = Some(message.into());
        self
    }
}
