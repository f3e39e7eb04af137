//! The private working copy of a recipe while it is being edited.

use std::collections::BTreeSet;
use std::fmt;

use strum::{Display, EnumString};

use crate::basic_models::{Ingredient, Nutrient, NutrientMap, Recipe, RecipeId};

/// Longest accepted step text, in characters.
pub const MAX_STEP_CHARS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum IngredientField {
    Name,
    Amount,
    Unit,
}

/// Parsed form of a numeric text input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Input<T> {
    /// The field was cleared; the user is still typing.
    Empty,
    Value(T),
}

/// Parse an integer input. `None` means the input is rejected.
fn parse_integer(value: &str, min: u32) -> Option<Input<u32>> {
    let value = value.trim();
    if value.is_empty() {
        return Some(Input::Empty);
    }
    value
        .parse::<u32>()
        .ok()
        .filter(|n| *n >= min)
        .map(Input::Value)
}

fn parse_amount(value: &str) -> Option<Input<f64>> {
    let value = value.trim();
    if value.is_empty() {
        return Some(Input::Empty);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(Input::Value)
}

impl<T> Input<T> {
    fn into_option(self) -> Option<T> {
        match self {
            Input::Empty => None,
            Input::Value(v) => Some(v),
        }
    }
}

/// Editable content. Numeric fields are `None` while the input is cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftContent {
    pub servings: Option<u32>,
    pub cooking_time: Option<u32>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    pub nutrients: NutrientMap<Option<f64>>,
    pub tags: BTreeSet<String>,
}

/// An independently owned copy of a recipe's editable fields.
///
/// Every accepted mutation bumps [`Draft::revision`]; rejected input leaves the
/// draft and its revision untouched.
#[derive(Clone, PartialEq)]
pub struct Draft {
    id: RecipeId,
    title: String,
    url: Option<String>,
    image: String,
    content: DraftContent,
    revision: u64,
}

impl fmt::Debug for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draft")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("url", &self.url)
            .field("image", &self.image.len())
            .field("content", &self.content)
            .field("revision", &self.revision)
            .finish()
    }
}

impl Draft {
    /// Deep copy of `recipe`, with the serving count replaced by `servings`.
    pub(crate) fn snapshot(recipe: &Recipe, servings: u32) -> Self {
        let content = &recipe.content;
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            url: recipe.url.clone(),
            image: recipe.image.clone(),
            content: DraftContent {
                servings: Some(servings),
                cooking_time: Some(content.cooking_time),
                ingredients: content.ingredients.clone(),
                steps: content.steps.clone(),
                nutrients: content.nutrients.map(|_, total| Some(*total)),
                tags: content.tags.clone(),
            },
            revision: 0,
        }
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn content(&self) -> &DraftContent {
        &self.content
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) -> bool {
        self.revision += 1;
        true
    }

    fn reject(&self, what: &str, value: &str) -> bool {
        tracing::debug!(recipe_id = %self.id, field = what, value, "Rejected draft input");
        false
    }

    pub(crate) fn set_title(&mut self, text: &str) -> bool {
        self.title = text.to_owned();
        self.touch()
    }

    /// Only the session may change servings, so the display count stays in step.
    pub(crate) fn set_servings(&mut self, value: &str) -> Option<Input<u32>> {
        match parse_integer(value, 1) {
            Some(input) => {
                self.content.servings = input.into_option();
                self.touch();
                Some(input)
            }
            None => {
                self.reject("servings", value);
                None
            }
        }
    }

    pub(crate) fn set_cooking_time(&mut self, value: &str) -> bool {
        match parse_integer(value, 0) {
            Some(input) => {
                self.content.cooking_time = input.into_option();
                self.touch()
            }
            None => self.reject("cooking_time", value),
        }
    }

    pub(crate) fn set_nutrient(&mut self, key: Nutrient, value: &str) -> bool {
        match parse_integer(value, 0) {
            Some(input) => {
                *self.content.nutrients.get_mut(key) = input.into_option().map(f64::from);
                self.touch()
            }
            None => self.reject(key.into(), value),
        }
    }

    pub(crate) fn set_ingredient_field(
        &mut self,
        index: usize,
        field: IngredientField,
        value: &str,
    ) -> bool {
        if index >= self.content.ingredients.len() {
            return self.reject("ingredient index", value);
        }
        match field {
            IngredientField::Name => self.content.ingredients[index].name = value.to_owned(),
            IngredientField::Unit => self.content.ingredients[index].unit = value.to_owned(),
            IngredientField::Amount => match parse_amount(value) {
                Some(input) => self.content.ingredients[index].amount = input.into_option(),
                None => return self.reject("ingredient amount", value),
            },
        }
        self.touch()
    }

    pub(crate) fn add_ingredient(&mut self) -> bool {
        self.content.ingredients.push(Ingredient::blank());
        self.touch()
    }

    pub(crate) fn remove_ingredient(&mut self, index: usize) -> bool {
        if index >= self.content.ingredients.len() {
            return self.reject("ingredient index", &index.to_string());
        }
        self.content.ingredients.remove(index);
        self.touch()
    }

    pub(crate) fn set_step(&mut self, index: usize, text: &str) -> bool {
        if index >= self.content.steps.len() {
            return self.reject("step index", &index.to_string());
        }
        if text.chars().count() > MAX_STEP_CHARS {
            return self.reject("step", "<too long>");
        }
        self.content.steps[index] = text.to_owned();
        self.touch()
    }

    pub(crate) fn add_step(&mut self) -> bool {
        self.content.steps.push(String::new());
        self.touch()
    }

    pub(crate) fn remove_step(&mut self, index: usize) -> bool {
        if index >= self.content.steps.len() {
            return self.reject("step index", &index.to_string());
        }
        self.content.steps.remove(index);
        self.touch()
    }
}
