use serde::{Deserialize, Serialize};

/// A reference to a displayable image (a URL).
pub type ImageRef = String;

// ---------------------------------------------------------------------------
// Text model (generateContent)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Content,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: Content {
                role: None,
                parts: vec![Part {
                    text: Some(prompt.into()),
                }],
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

// ---------------------------------------------------------------------------
// Photo index (search/photos)
// ---------------------------------------------------------------------------

/// Parameters of a single photo search.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoQuery {
    pub query: String,
    pub per_page: u32,
    pub orientation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoSearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub results: Vec<PhotoRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoRecord {
    #[serde(default)]
    pub id: String,
    pub urls: PhotoUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoUrls {
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub full: Option<String>,
    #[serde(default)]
    pub regular: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
}

impl PhotoUrls {
    /// The browsable reference: `regular`, else the nearest size available.
    pub fn best(&self) -> Option<&str> {
        self.regular
            .as_deref()
            .or(self.full.as_deref())
            .or(self.small.as_deref())
            .or(self.raw.as_deref())
    }
}

impl PhotoSearchResponse {
    pub fn image_refs(&self) -> Vec<ImageRef> {
        self.results
            .iter()
            .filter_map(|r| r.urls.best())
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .collect()
    }
}
