use serde::Serialize;

/// Longest query text Juremy accepts, in characters.
pub const MAX_TEXT_LENGTH: usize = 5000;

/// A single search to show in the Juremy app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    src_lang: String,
    dst_lang: String,
    q: String,
}

impl SearchRequest {
    /// Builds a search from three-letter language codes, truncating `text`
    /// to [`MAX_TEXT_LENGTH`].
    pub fn new(src_lang: impl Into<String>, dst_lang: impl Into<String>, text: &str) -> Self {
        Self {
            src_lang: src_lang.into(),
            dst_lang: dst_lang.into(),
            q: limit_text(text).to_string(),
        }
    }

    pub fn src_lang(&self) -> &str {
        &self.src_lang
    }

    pub fn dst_lang(&self) -> &str {
        &self.dst_lang
    }

    pub fn query(&self) -> &str {
        &self.q
    }
}

/// Body of a push request. Exactly one of the fields is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<SearchRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    connected: Option<bool>,
}

impl PushEnvelope {
    pub const fn search(search: SearchRequest) -> Self {
        Self {
            search: Some(search),
            connected: None,
        }
    }

    /// Liveness ping sent after setting up a route.
    pub const fn ping() -> Self {
        Self {
            search: None,
            connected: Some(true),
        }
    }

    pub const fn as_search(&self) -> Option<&SearchRequest> {
        self.search.as_ref()
    }
}

/// Truncates `text` to at most [`MAX_TEXT_LENGTH`] characters, never
/// splitting a character.
pub fn limit_text(text: &str) -> &str {
    match text.char_indices().nth(MAX_TEXT_LENGTH) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
