use serde::{Deserialize, Serialize};
use std::fmt;

/// Topic used to filter quotes from the remote source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Art,
    Beauty,
    Education,
    Family,
}

impl Category {
    /// The id sent to the quotes API.
    pub fn id(&self) -> &'static str {
        match self {
            Category::Art => "art",
            Category::Beauty => "beauty",
            Category::Education => "education",
            Category::Family => "family",
        }
    }

    pub fn avatar(&self) -> &'static str {
        match self {
            Category::Art => "🎨",
            Category::Beauty => "👩",
            Category::Education => "🧑‍🎓",
            Category::Family => "👫",
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.avatar(), self.id())
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "art" => Some(Category::Art),
            "beauty" => Some(Category::Beauty),
            "education" => Some(Category::Education),
            "family" => Some(Category::Family),
            _ => None,
        }
    }

    pub fn all() -> Vec<Category> {
        vec![
            Category::Art,
            Category::Beauty,
            Category::Education,
            Category::Family,
        ]
    }

    /// Position in [`Category::all`], used by pickers.
    pub fn index(&self) -> usize {
        Self::all().iter().position(|c| c == self).unwrap_or(0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
