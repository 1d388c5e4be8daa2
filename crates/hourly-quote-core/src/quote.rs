use serde::{Deserialize, Serialize};

/// A quote as returned by the quotes API.
///
/// The API names the text field `quote`; everything else in the crate calls it `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "quote")]
    pub text: String,
    pub author: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }
}

impl Default for Quote {
    /// Shown until the first successful fetch.
    fn default() -> Self {
        Self::new("Widget Rocks!", "iOS Ninja")
    }
}
