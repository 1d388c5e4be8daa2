//! Widget state shared between the scheduler and the render layer
//!
//! Holds the last quote that was fetched successfully and the category the
//! user picked. It is owned by [`crate::RefreshScheduler`] and handed out
//! by reference; nothing here is global.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::FetchError;
use crate::quote::Quote;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteState {
    current_quote: Quote,
    selected_category: Option<Category>,
}

impl QuoteState {
    pub fn new() -> Self {
        Self {
            current_quote: Quote::default(),
            selected_category: Some(Category::default()),
        }
    }

    pub fn quote(&self) -> &Quote {
        &self.current_quote
    }

    /// The selected category, or the default when unset.
    pub fn category(&self) -> Category {
        self.selected_category.unwrap_or_default()
    }

    pub fn selected_category(&self) -> Option<Category> {
        self.selected_category
    }

    pub fn resolved_category(&self) -> Result<Category, FetchError> {
        self.selected_category.ok_or(FetchError::ConfigurationMissing)
    }

    pub fn set_quote(&mut self, quote: Quote) {
        self.current_quote = quote;
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.selected_category = category;
    }
}

impl Default for QuoteState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = QuoteState::new();
        assert_eq!(state.quote(), &Quote::new("Widget Rocks!", "iOS Ninja"));
        assert_eq!(state.category(), Category::Art);
        assert_eq!(state.selected_category(), Some(Category::Art));
    }

    #[test]
    fn test_set_quote_replaces() {
        let mut state = QuoteState::new();
        state.set_quote(Quote::new("Hello", "World"));
        state.set_quote(Quote::new("Hello", "World"));
        assert_eq!(state.quote(), &Quote::new("Hello", "World"));
    }

    #[test]
    fn test_unset_category_falls_back() {
        let mut state = QuoteState::new();
        state.set_category(None);
        assert_eq!(state.category(), Category::Art);
        assert!(matches!(
            state.resolved_category(),
            Err(FetchError::ConfigurationMissing)
        ));

        state.set_category(Some(Category::Education));
        assert_eq!(state.resolved_category().unwrap(), Category::Education);
    }
}
