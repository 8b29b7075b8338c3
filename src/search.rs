//! Recipe Search State
//!
//! Debounce bookkeeping for the search box and the rules that turn the
//! search term and category filter into a backend request.

use crate::models::Recipe;

/// Delay between the last keystroke and the request
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Generation counter for debounced work.
///
/// Every change calls [`Debouncer::bump`] and schedules a timer carrying the
/// returned ticket. When the timer fires, [`Debouncer::is_current`] tells
/// whether a newer change superseded it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Debouncer {
    generation: u64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change and return its ticket
    pub fn bump(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.generation
    }
}

/// Which endpoint a search state resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeQuery {
    /// `GET /api/recipes/` with an optional category filter
    List { category_id: Option<i64> },
    /// `GET /api/recipes/search`; the category is applied to the results
    Search {
        term: String,
        category_id: Option<i64>,
    },
}

impl RecipeQuery {
    /// Apply the local part of the query to the backend's results
    pub fn filter_results(&self, recipes: Vec<Recipe>) -> Vec<Recipe> {
        match self {
            RecipeQuery::Search {
                category_id: Some(category_id),
                ..
            } => recipes
                .into_iter()
                .filter(|r| r.category_id == Some(*category_id))
                .collect(),
            _ => recipes,
        }
    }
}

/// Search box and category filter of the recipe list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub term: String,
    pub category_id: Option<i64>,
}

impl SearchState {
    pub fn query(&self) -> RecipeQuery {
        let term = self.term.trim();
        if term.is_empty() {
            RecipeQuery::List {
                category_id: self.category_id,
            }
        } else {
            RecipeQuery::Search {
                term: term.to_string(),
                category_id: self.category_id,
            }
        }
    }

    pub fn is_filtered(&self) -> bool {
        !self.term.trim().is_empty() || self.category_id.is_some()
    }

    /// Reset both the search term and the category filter
    pub fn clear(&mut self) {
        self.term.clear();
        self.category_id = None;
    }

    /// Result count line shown above the list
    pub fn summary(&self, count: usize) -> String {
        let noun = if count == 1 { "recipe" } else { "recipes" };
        match self.query() {
            RecipeQuery::Search { term, .. } => {
                format!("Found {} {} matching \"{}\"", count, noun, term)
            }
            RecipeQuery::List { .. } => format!("{} {}", count, noun),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: i64, category_id: Option<i64>) -> Recipe {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Recipe {}", id),
            "instructions": "",
            "category_id": category_id,
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_only_last_change_is_current() {
        let mut debouncer = Debouncer::new();
        let first = debouncer.bump();
        let second = debouncer.bump();
        let third = debouncer.bump();

        assert!(!debouncer.is_current(first));
        assert!(!debouncer.is_current(second));
        assert!(debouncer.is_current(third));
    }

    #[test]
    fn test_blank_term_lists_with_category() {
        let state = SearchState {
            term: "   ".to_string(),
            category_id: Some(2),
        };
        assert_eq!(state.query(), RecipeQuery::List { category_id: Some(2) });
    }

    #[test]
    fn test_term_is_trimmed() {
        let state = SearchState {
            term: "  pasta  ".to_string(),
            category_id: None,
        };
        assert_eq!(
            state.query(),
            RecipeQuery::Search {
                term: "pasta".to_string(),
                category_id: None
            }
        );
    }

    #[test]
    fn test_category_filter_applies_to_search_results() {
        let query = RecipeQuery::Search {
            term: "pasta".to_string(),
            category_id: Some(1),
        };
        let results = query.filter_results(vec![recipe(1, Some(1)), recipe(2, Some(2)), recipe(3, None)]);
        assert_eq!(results.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);

        let list = RecipeQuery::List { category_id: Some(1) };
        assert_eq!(list.filter_results(vec![recipe(2, Some(2))]).len(), 1);
    }

    #[test]
    fn test_clear_resets_both_filters() {
        let mut state = SearchState {
            term: "soup".to_string(),
            category_id: Some(4),
        };
        assert!(state.is_filtered());
        state.clear();
        assert!(!state.is_filtered());
        assert_eq!(state.query(), RecipeQuery::List { category_id: None });
    }

    #[test]
    fn test_summary() {
        let state = SearchState {
            term: "pasta".to_string(),
            category_id: None,
        };
        assert_eq!(state.summary(2), "Found 2 recipes matching \"pasta\"");
        assert_eq!(SearchState::default().summary(1), "1 recipe");
    }
}
