//! Searching and filtering the recipe collection.

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::basic_models::Recipe;

/// Title search plus a set of selected tags. A recipe matches when its title
/// contains the search text (ignoring case) and it carries every selected tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    search: String,
    tags: BTreeSet<String>,
}

impl RecipeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.set_search(search);
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.trim().to_lowercase();
    }

    /// Select the tag if it was not selected, deselect it otherwise.
    /// Returns whether it is now selected.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.tags.remove(tag) {
            false
        } else {
            self.tags.insert(tag.to_owned());
            true
        }
    }

    pub fn selected_tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        recipe.title.to_lowercase().contains(&self.search)
            && self.tags.is_subset(&recipe.content.tags)
    }

    /// Matching recipes, in their original order.
    pub fn apply<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        recipes.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Every tag used in the collection, sorted and without duplicates.
pub fn all_tags(recipes: &[Recipe]) -> Vec<&str> {
    recipes
        .iter()
        .flat_map(|r| r.content.tags.iter())
        .map(String::as_str)
        .sorted()
        .dedup()
        .collect()
}
