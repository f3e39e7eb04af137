//! Draft edits given on the command line.
//!
//! Positions are 1-based, matching the numbers shown in the detail view.

use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use bw::{IngredientField, Nutrient, RecipeSession, RecipeStore, SessionError};
use clap::Args;
use itertools::Itertools;

fn position(text: &str) -> anyhow::Result<usize> {
    let position: usize = text
        .trim()
        .parse()
        .with_context(|| format!("Invalid position {text:?}"))?;
    position
        .checked_sub(1)
        .ok_or_else(|| anyhow!("Positions start at 1"))
}

/// `N.FIELD=VALUE`, e.g. `2.amount=300`
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientEdit {
    pub index: usize,
    pub field: IngredientField,
    pub value: String,
}

impl FromStr for IngredientEdit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (target, value) = s.split_once('=').context("Expected N.FIELD=VALUE")?;
        let (index, field) = target.split_once('.').context("Expected N.FIELD=VALUE")?;
        Ok(Self {
            index: position(index)?,
            field: field
                .trim()
                .parse()
                .map_err(|_| anyhow!("Unknown ingredient field {field:?}"))?,
            value: value.to_owned(),
        })
    }
}

/// `AMOUNT,UNIT,NAME`, e.g. `200,g,Flour`. Amount and unit may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIngredient {
    pub amount: String,
    pub unit: String,
    pub name: String,
}

impl FromStr for NewIngredient {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ',');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(amount), Some(unit), Some(name)) => Ok(Self {
                amount: amount.trim().to_owned(),
                unit: unit.trim().to_owned(),
                name: name.trim().to_owned(),
            }),
            _ => bail!("Expected AMOUNT,UNIT,NAME"),
        }
    }
}

/// `N=TEXT`
#[derive(Debug, Clone, PartialEq)]
pub struct StepEdit {
    pub index: usize,
    pub text: String,
}

impl FromStr for StepEdit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (index, text) = s.split_once('=').context("Expected N=TEXT")?;
        Ok(Self {
            index: position(index)?,
            text: text.to_owned(),
        })
    }
}

/// `KEY=VALUE`, e.g. `kcal=800`
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientEdit {
    pub key: Nutrient,
    pub value: String,
}

impl FromStr for NutrientEdit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s.split_once('=').context("Expected KEY=VALUE")?;
        Ok(Self {
            key: key
                .trim()
                .parse()
                .map_err(|_| {
                    anyhow!("Unknown nutrient {key:?}, expected kcal, protein, carbs or fat")
                })?,
            value: value.to_owned(),
        })
    }
}

/// Changes to apply to a draft, in a fixed order: fields, edits in place,
/// removals, then additions.
#[derive(Args, Debug, Clone, Default)]
pub struct EditPlan {
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// Serving count the amounts and totals refer to
    #[arg(long)]
    pub servings: Option<String>,
    /// Cooking time in minutes
    #[arg(long)]
    pub cooking_time: Option<String>,
    /// Whole-recipe nutrient total, as KEY=VALUE
    #[arg(long = "nutrient", value_name = "KEY=VALUE")]
    pub nutrients: Vec<NutrientEdit>,
    /// Change an ingredient, as N.FIELD=VALUE with FIELD one of name, amount, unit
    #[arg(long = "set-ingredient", value_name = "N.FIELD=VALUE")]
    pub set_ingredients: Vec<IngredientEdit>,
    /// Replace the text of step N
    #[arg(long = "set-step", value_name = "N=TEXT")]
    pub set_steps: Vec<StepEdit>,
    /// Remove ingredient N
    #[arg(long = "remove-ingredient", value_name = "N", value_parser = position)]
    pub remove_ingredients: Vec<usize>,
    /// Remove step N
    #[arg(long = "remove-step", value_name = "N", value_parser = position)]
    pub remove_steps: Vec<usize>,
    /// Append an ingredient, as AMOUNT,UNIT,NAME
    #[arg(long = "add-ingredient", value_name = "AMOUNT,UNIT,NAME")]
    pub add_ingredients: Vec<NewIngredient>,
    /// Append a step
    #[arg(long = "add-step", value_name = "TEXT")]
    pub add_steps: Vec<String>,
}

impl EditPlan {
    /// Apply the plan to a session in edit mode. Returns a description of every
    /// input the draft rejected; rejected inputs leave the draft unchanged.
    pub fn apply<S: RecipeStore>(
        &self,
        session: &mut RecipeSession<S>,
    ) -> Result<Vec<String>, SessionError> {
        if !session.is_editing() {
            return Err(SessionError::NotEditing);
        }
        let mut rejected = vec![];
        let mut check = |applied: bool, what: String| {
            if !applied {
                rejected.push(what);
            }
        };

        if let Some(servings) = &self.servings {
            let applied = session.set_servings(servings)?;
            check(applied, format!("servings {servings:?}"));
        }
        if let Some(title) = &self.title {
            check(session.set_title(title)?, format!("title {title:?}"));
        }
        if let Some(minutes) = &self.cooking_time {
            let applied = session.set_cooking_time(minutes)?;
            check(applied, format!("cooking time {minutes:?}"));
        }
        for edit in &self.nutrients {
            let applied = session.set_nutrient(edit.key, &edit.value)?;
            check(applied, format!("{} {:?}", edit.key, edit.value));
        }
        for IngredientEdit { index, field, value } in &self.set_ingredients {
            let applied = session.set_ingredient_field(*index, *field, value)?;
            let what = format!("ingredient {} {field}", index + 1);
            check(applied, what);
        }
        for edit in &self.set_steps {
            let applied = session.set_step(edit.index, &edit.text)?;
            check(applied, format!("step {}", edit.index + 1));
        }

        // Highest first, so earlier positions stay valid
        for index in descending(&self.remove_ingredients) {
            let applied = session.remove_ingredient(index)?;
            check(applied, format!("remove ingredient {}", index + 1));
        }
        for index in descending(&self.remove_steps) {
            let applied = session.remove_step(index)?;
            check(applied, format!("remove step {}", index + 1));
        }

        for new in &self.add_ingredients {
            let index = session.draft().map_or(0, |d| d.content().ingredients.len());
            session.add_ingredient()?;
            for (field, value) in [
                (IngredientField::Name, &new.name),
                (IngredientField::Unit, &new.unit),
                (IngredientField::Amount, &new.amount),
            ] {
                let applied = session.set_ingredient_field(index, field, value)?;
                check(applied, format!("new ingredient {field} {value:?}"));
            }
        }
        for text in &self.add_steps {
            let index = session.draft().map_or(0, |d| d.content().steps.len());
            session.add_step()?;
            let applied = session.set_step(index, text)?;
            check(applied, format!("new step {}", index + 1));
        }

        Ok(rejected)
    }
}

fn descending(positions: &[usize]) -> Vec<usize> {
    positions
        .iter()
        .copied()
        .sorted_unstable()
        .rev()
        .dedup()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use async_trait::async_trait;
    use bw::{
        Ingredient, NutrientMap, Recipe, RecipeContent, RecipeId, RecipeUpdate, StoreError,
        StoreResult,
    };
    use test_case::test_case;

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

    fn ingredient(name: &str, amount: f64, unit: &str) -> Ingredient {
        Ingredient {
            name: name.into(),
            amount: Some(amount),
            unit: unit.into(),
        }
    }

    fn editing() -> RecipeSession<Offline> {
        let recipe = Recipe {
            id: RecipeId(1),
            title: "Bread".into(),
            url: None,
            image: String::new(),
            content: RecipeContent {
                servings: 1,
                cooking_time: 60,
                ingredients: vec![
                    ingredient("Flour", 500.0, "g"),
                    ingredient("Water", 350.0, "ml"),
                    ingredient("Yeast", 7.0, "g"),
                ],
                steps: vec!["Knead".into(), "Rest".into(), "Bake".into()],
                nutrients: NutrientMap::default(),
                tags: BTreeSet::new(),
            },
        };
        let mut session = RecipeSession::new(Offline, recipe);
        session.begin_edit().unwrap();
        session
    }

    #[test_case("2.amount=300", 1, IngredientField::Amount, "300")]
    #[test_case("1.Name=Rye flour", 0, IngredientField::Name, "Rye flour")]
    #[test_case("3.unit=", 2, IngredientField::Unit, "")]
    fn parses_ingredient_edits(arg: &str, index: usize, field: IngredientField, value: &str) {
        let edit: IngredientEdit = arg.parse().unwrap();
        assert_eq!(
            edit,
            IngredientEdit {
                index,
                field,
                value: value.into()
            }
        );
    }

    #[test_case("0.name=x"; "zero position")]
    #[test_case("1.weight=3"; "unknown field")]
    #[test_case("1.name"; "no value")]
    #[test_case("name=x"; "no position")]
    fn rejects_bad_ingredient_edits(arg: &str) {
        assert!(arg.parse::<IngredientEdit>().is_err());
    }

    #[test]
    fn parses_other_arguments() {
        assert_eq!(
            ",pinch,Salt".parse::<NewIngredient>().unwrap(),
            NewIngredient {
                amount: String::new(),
                unit: "pinch".into(),
                name: "Salt".into()
            }
        );
        assert_eq!(
            "1,,Egg, beaten".parse::<NewIngredient>().unwrap().name,
            "Egg, beaten"
        );
        assert!("Salt".parse::<NewIngredient>().is_err());
        assert_eq!(
            "2=Stir = well".parse::<StepEdit>().unwrap(),
            StepEdit {
                index: 1,
                text: "Stir = well".into()
            }
        );
        assert_eq!("FAT=12".parse::<NutrientEdit>().unwrap().key, Nutrient::Fat);
        assert!("sugar=3".parse::<NutrientEdit>().is_err());
    }

    #[test]
    fn applies_in_order() {
        let mut session = editing();
        let plan = EditPlan {
            title: Some("Rye bread".into()),
            servings: Some("2".into()),
            nutrients: vec!["kcal=1800".parse().unwrap()],
            set_ingredients: vec!["1.name=Rye flour".parse().unwrap()],
            remove_ingredients: vec![1, 2],
            remove_steps: vec![1],
            add_ingredients: vec!["10,g,Salt".parse().unwrap()],
            add_steps: vec!["Cool down".into()],
            ..Default::default()
        };
        let rejected = plan.apply(&mut session).unwrap();
        assert!(rejected.is_empty(), "{rejected:?}");

        assert_eq!(session.display_servings(), 2);
        let draft = session.draft().unwrap();
        assert_eq!(draft.title(), "Rye bread");
        assert_eq!(draft.content().nutrients.kcal, Some(1800.0));
        assert_eq!(
            draft.content().ingredients,
            [
                ingredient("Rye flour", 500.0, "g"),
                ingredient("Salt", 10.0, "g"),
            ]
        );
        assert_eq!(draft.content().steps, ["Knead", "Bake", "Cool down"]);
    }

    #[test]
    fn reports_rejected_input() {
        let mut session = editing();
        let plan = EditPlan {
            servings: Some("0".into()),
            cooking_time: Some("an hour".into()),
            set_steps: vec!["9=Nope".parse().unwrap()],
            ..Default::default()
        };
        let rejected = plan.apply(&mut session).unwrap();
        assert_eq!(
            rejected,
            ["servings \"0\"", "cooking time \"an hour\"", "step 9"]
        );
        assert_eq!(session.draft().unwrap().revision(), 0);
    }

    #[test]
    fn needs_edit_mode() {
        let mut session = editing();
        session.cancel_edit().unwrap();
        assert!(matches!(
            EditPlan::default().apply(&mut session),
            Err(SessionError::NotEditing)
        ));
    }
}
