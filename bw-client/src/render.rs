//! Plain-text rendering of recipes for the terminal.

use std::fmt;

use bw::catalog;
use bw::presentation::{format_cooking_time, NutrientView};
use bw::{Nutrient, Recipe, RecipeSession, RecipeStore};
use itertools::Itertools;
use strum::IntoEnumIterator;

/// One line per recipe, as in the collection view.
pub struct Summary<'a>(pub &'a Recipe);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recipe = self.0;
        let minutes = format_cooking_time(recipe.content.cooking_time);
        write!(f, "{:>5}  {}  ({minutes})", recipe.id.0, recipe.title)?;
        if !recipe.content.tags.is_empty() {
            write!(f, "  [{}]", recipe.content.tags.iter().join(", "))?;
        }
        Ok(())
    }
}

/// A footer listing the tags available for filtering.
pub fn tag_footer(recipes: &[Recipe]) -> String {
    format!("Tags: {}", catalog::all_tags(recipes).join(", "))
}

/// The detail view: scaled ingredients and per-serving nutrients while viewing,
/// raw draft values while editing.
pub struct Detail<'a, S>(pub &'a RecipeSession<S>);

impl<S: RecipeStore> fmt::Display for Detail<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;
        let recipe = session.recipe();
        let (title, minutes, steps) = match session.draft() {
            Some(draft) => (
                draft.title(),
                draft.content().cooking_time,
                &draft.content().steps,
            ),
            None => (
                recipe.title.as_str(),
                Some(recipe.content.cooking_time),
                &recipe.content.steps,
            ),
        };
        let minutes = minutes.map_or_else(|| "?".to_string(), format_cooking_time);

        writeln!(f, "{title}")?;
        writeln!(f, "{}", "=".repeat(title.chars().count()))?;
        writeln!(f, "{} servings, {minutes}", session.display_servings())?;

        writeln!(f, "\nIngredients")?;
        for line in session.ingredient_lines() {
            writeln!(f, "  {:>12}  {}", line.quantity(), line.name)?;
        }

        match session.nutrient_values() {
            NutrientView::PerServing(values) => {
                writeln!(f, "\nNutrients per serving")?;
                for key in Nutrient::iter() {
                    nutrient_row(f, key, values.get(key))?;
                }
            }
            NutrientView::Totals(values) => {
                writeln!(f, "\nNutrients (whole recipe)")?;
                for key in Nutrient::iter() {
                    match values.get(key) {
                        Some(total) => nutrient_row(f, key, total)?,
                        None => nutrient_row(f, key, "?")?,
                    }
                }
            }
        }

        writeln!(f, "\nPreparation")?;
        for (index, step) in steps.iter().enumerate() {
            writeln!(f, "  {}. {}", index + 1, step)?;
        }

        if let Some(url) = &recipe.url {
            writeln!(f, "\nOriginal: {url}")?;
        }
        Ok(())
    }
}

fn nutrient_row(
    f: &mut fmt::Formatter<'_>,
    key: Nutrient,
    value: impl fmt::Display,
) -> fmt::Result {
    let name: &str = key.into();
    writeln!(f, "  {name:<8} {value} {}", key.unit())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use async_trait::async_trait;
    use bw::{
        Ingredient, NutrientMap, RecipeContent, RecipeId, RecipeUpdate, StoreError, StoreResult,
    };

    use super::*;

    struct Offline;

    #[async_trait]
    impl RecipeStore for Offline {
        async fn list_recipes(&self) -> StoreResult<Vec<Recipe>> {
            Err(StoreError::NotFound)
        }
        async fn get_recipe(&self, _: RecipeId) -> StoreResult<Recipe> {
            Err(StoreError::NotFound)
        }
        async fn update_recipe(&self, _: RecipeId, _: &RecipeUpdate) -> StoreResult<Recipe> {
            Err(StoreError::NotFound)
        }
        async fn delete_recipe(&self, _: RecipeId) -> StoreResult<()> {
            Err(StoreError::NotFound)
        }
        async fn import_recipe(&self, _: &str) -> StoreResult<Recipe> {
            Err(StoreError::NotFound)
        }
    }

    fn recipe() -> Recipe {
        Recipe {
            id: RecipeId(12),
            title: "Chili".into(),
            url: Some("https://example.com/chili".into()),
            image: String::new(),
            content: RecipeContent {
                servings: 4,
                cooking_time: 90,
                ingredients: vec![Ingredient {
                    name: "Beans".into(),
                    amount: Some(400.0),
                    unit: "g".into(),
                }],
                steps: vec!["Simmer".into()],
                nutrients: NutrientMap {
                    kcal: 2000.0,
                    protein: 100.0,
                    carbs: 250.0,
                    fat: 60.0,
                },
                tags: BTreeSet::from(["spicy".to_string()]),
            },
        }
    }

    #[test]
    fn summary() {
        let line = Summary(&recipe()).to_string();
        assert_eq!(line, "   12  Chili  (1.5 h)  [spicy]");
        assert_eq!(tag_footer(&[recipe()]), "Tags: spicy");

        let mut untagged = recipe();
        untagged.content.tags.clear();
        untagged.content.cooking_time = 20;
        assert_eq!(Summary(&untagged).to_string(), "   12  Chili  (20 min)");
    }

    #[test]
    fn detail_scales_ingredients_not_nutrients() {
        let mut session = RecipeSession::new(Offline, recipe());
        session.set_display_servings(2).unwrap();
        let text = Detail(&session).to_string();
        assert!(text.starts_with("Chili\n=====\n2 servings, 1.5 h\n"));
        assert!(text.contains("200 g  Beans"));
        assert!(text.contains(&format!("  {:<8} 500 kcal", "kcal")));
        assert!(text.contains("1. Simmer"));
        assert!(text.ends_with("\nOriginal: https://example.com/chili\n"));
    }

    #[test]
    fn detail_while_editing_shows_totals() {
        let mut session = RecipeSession::new(Offline, recipe());
        session.begin_edit().unwrap();
        session.set_nutrient(Nutrient::Fat, "").unwrap();
        session.set_cooking_time("").unwrap();
        let text = Detail(&session).to_string();
        assert!(text.contains("4 servings, ?"));
        assert!(text.contains("Nutrients (whole recipe)"));
        assert!(text.contains(&format!("  {:<8} 2000 kcal", "kcal")));
        assert!(text.contains(&format!("  {:<8} ? g", "fat")));
        assert!(text.contains("400 g  Beans"));
    }
}
