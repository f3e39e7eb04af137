//! Display values derived from a recipe. Nothing here mutates stored data.

use std::fmt;

use crate::basic_models::{Ingredient, NutrientMap, Recipe};
use crate::scaling::scale;

/// One ingredient as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientLine {
    pub name: String,
    pub amount: Option<f64>,
    pub unit: String,
}

impl IngredientLine {
    fn raw(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name.clone(),
            amount: ingredient.amount,
            unit: ingredient.unit.clone(),
        }
    }

    /// Amount and unit, the unit alone when there is no amount, or "-" when there is neither.
    pub fn quantity(&self) -> String {
        match (self.amount.filter(|a| *a > 0.0), self.unit.trim()) {
            (Some(amount), "") => amount.to_string(),
            (Some(amount), unit) => format!("{amount} {unit}"),
            (None, "") => "-".to_string(),
            (None, unit) => unit.to_string(),
        }
    }
}

impl fmt::Display for IngredientLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity(), self.name)
    }
}

/// Ingredients of the committed recipe, scaled to `servings`.
pub fn scaled_ingredients(recipe: &Recipe, servings: u32) -> Vec<IngredientLine> {
    recipe
        .content
        .ingredients
        .iter()
        .map(|ingredient| IngredientLine {
            amount: scale(ingredient.amount, recipe.content.servings, servings),
            ..IngredientLine::raw(ingredient)
        })
        .collect()
}

/// Ingredients exactly as stored, used while editing.
pub fn raw_ingredients(ingredients: &[Ingredient]) -> Vec<IngredientLine> {
    ingredients.iter().map(IngredientLine::raw).collect()
}

/// What the nutrient panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum NutrientView {
    /// Viewing: totals divided by the stored serving count
    PerServing(NutrientMap<u64>),
    /// Editing: the whole-recipe totals being edited
    Totals(NutrientMap<Option<f64>>),
}

/// Minutes under an hour as-is, otherwise hours to the nearest half hour.
pub fn format_cooking_time(minutes: u32) -> String {
    if minutes >= 60 {
        let hours = (f64::from(minutes) / 30.0).round() / 2.0;
        format!("{hours} h")
    } else {
        format!("{minutes} min")
    }
}
