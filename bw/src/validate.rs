use crate::basic_models::{Nutrient, NutrientMap, RecipeContent, RecipeUpdate};
use crate::draft::Draft;

/// The first rule a draft breaks. Display gives the message shown to the user.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    #[error("The recipe needs a title.")]
    MissingTitle,
    #[error("The recipe must contain ingredients.")]
    NoIngredients,
    #[error("The recipe must contain preparation steps.")]
    NoSteps,
    #[error("Every ingredient needs a name (ingredient {position} has none).")]
    UnnamedIngredient { position: usize },
    #[error("Invalid cooking time.")]
    InvalidCookingTime,
    #[error("Please enter a value for {0}.")]
    MissingNutrient(Nutrient),
    #[error("{0} must not be negative.")]
    NegativeNutrient(Nutrient),
    #[error("Invalid number of servings.")]
    InvalidServings,
}

/// Check a draft before it is saved.
///
/// Rules are checked in a fixed order and the first one broken is returned:
/// title, ingredients present, steps present, ingredient names, cooking time,
/// nutrients (kcal, protein, carbs, fat), servings. A valid draft yields the
/// payload for the update request.
pub fn validate(draft: &Draft) -> Result<RecipeUpdate, Violation> {
    let content = draft.content();

    if draft.title().trim().is_empty() {
        return Err(Violation::MissingTitle);
    }
    if content.ingredients.is_empty() {
        return Err(Violation::NoIngredients);
    }
    if content.steps.is_empty() {
        return Err(Violation::NoSteps);
    }
    if let Some(index) = content
        .ingredients
        .iter()
        .position(|ingredient| ingredient.name.trim().is_empty())
    {
        return Err(Violation::UnnamedIngredient {
            position: index + 1,
        });
    }
    let cooking_time = content
        .cooking_time
        .filter(|minutes| *minutes > 0)
        .ok_or(Violation::InvalidCookingTime)?;

    let mut nutrients = NutrientMap::<f64>::default();
    for (key, value) in content.nutrients.iter() {
        match value {
            Some(v) if !v.is_finite() => return Err(Violation::MissingNutrient(key)),
            Some(v) if *v < 0.0 => return Err(Violation::NegativeNutrient(key)),
            Some(v) => *nutrients.get_mut(key) = *v,
            None => return Err(Violation::MissingNutrient(key)),
        }
    }

    let servings = content
        .servings
        .filter(|servings| *servings > 0)
        .ok_or(Violation::InvalidServings)?;

    Ok(RecipeUpdate {
        title: draft.title().to_owned(),
        content: RecipeContent {
            servings,
            cooking_time,
            ingredients: content.ingredients.clone(),
            steps: content.steps.clone(),
            nutrients,
            tags: content.tags.clone(),
        },
        url: draft.url().map(str::to_owned),
        image: draft.image().to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_models::tests::sample_recipe;
    use crate::draft::IngredientField;

    fn draft() -> Draft {
        Draft::snapshot(&sample_recipe(), 2)
    }

    fn clear_steps(draft: &mut Draft) {
        while draft.remove_step(0) {}
    }

    fn clear_ingredients(draft: &mut Draft) {
        while draft.remove_ingredient(0) {}
    }

    #[test]
    fn valid_draft_becomes_payload() {
        let recipe = sample_recipe();
        let update = validate(&Draft::snapshot(&recipe, 2)).unwrap();
        assert_eq!(update.title, recipe.title);
        assert_eq!(update.content, recipe.content);
        assert_eq!(update.url, recipe.url);
        assert_eq!(update.image, recipe.image);
    }

    #[test]
    fn blank_title() {
        let mut draft = draft();
        draft.set_title("   ");
        assert_eq!(validate(&draft), Err(Violation::MissingTitle));
    }

    #[test]
    fn title_wins_over_missing_ingredients() {
        let mut draft = draft();
        draft.set_title("");
        clear_ingredients(&mut draft);
        assert_eq!(validate(&draft), Err(Violation::MissingTitle));
    }

    #[test]
    fn missing_ingredients_before_missing_steps() {
        let mut draft = draft();
        clear_ingredients(&mut draft);
        clear_steps(&mut draft);
        assert_eq!(validate(&draft), Err(Violation::NoIngredients));
    }

    #[test]
    fn missing_steps() {
        let mut draft = draft();
        clear_steps(&mut draft);
        assert_eq!(validate(&draft), Err(Violation::NoSteps));
    }

    #[test]
    fn unnamed_ingredient_is_located() {
        let mut draft = draft();
        draft.add_ingredient();
        draft.set_cooking_time("0");
        assert_eq!(
            validate(&draft),
            Err(Violation::UnnamedIngredient { position: 4 })
        );
        draft.set_ingredient_field(3, IngredientField::Name, " ");
        assert_eq!(
            validate(&draft),
            Err(Violation::UnnamedIngredient { position: 4 })
        );
    }

    #[test]
    fn cooking_time_must_be_positive() {
        let mut draft = draft();
        draft.set_cooking_time("0");
        assert_eq!(validate(&draft), Err(Violation::InvalidCookingTime));
        draft.set_cooking_time("");
        assert_eq!(validate(&draft), Err(Violation::InvalidCookingTime));
    }

    #[test]
    fn first_missing_nutrient_is_named() {
        let mut draft = draft();
        draft.set_nutrient(Nutrient::Fat, "");
        draft.set_nutrient(Nutrient::Protein, "");
        let violation = validate(&draft).unwrap_err();
        assert_eq!(violation, Violation::MissingNutrient(Nutrient::Protein));
        assert_eq!(violation.to_string(), "Please enter a value for protein.");
    }

    #[test]
    fn servings_checked_last() {
        let mut draft = draft();
        draft.set_servings("");
        assert_eq!(validate(&draft), Err(Violation::InvalidServings));
        draft.set_nutrient(Nutrient::Carbs, "");
        assert_eq!(
            validate(&draft),
            Err(Violation::MissingNutrient(Nutrient::Carbs))
        );
    }

    #[test]
    fn negative_server_totals_are_reported() {
        let mut recipe = sample_recipe();
        recipe.content.nutrients.carbs = -3.0;
        let violation = validate(&Draft::snapshot(&recipe, 2)).unwrap_err();
        assert_eq!(violation, Violation::NegativeNutrient(Nutrient::Carbs));
        assert_eq!(violation.to_string(), "carbs must not be negative.");
    }
}
