//! The recipe detail session: a committed recipe, a display serving count, and
//! an optional draft while the user is editing.
//!
//! | from | action       | to   | store call |
//! |------|--------------|------|------------|
//! | View | begin_edit   | Edit | none       |
//! | Edit | cancel_edit  | View | none       |
//! | Edit | save (valid) | View | update     |
//! | Edit | save (error) | Edit | maybe      |
//! | View | delete       | gone | delete     |

use crate::basic_models::{Nutrient, Recipe, RecipeId};
use crate::draft::{Draft, IngredientField, Input};
use crate::nutrients;
use crate::presentation::{self, IngredientLine, NutrientView};
use crate::store::{RecipeStore, StoreError};
use crate::validate::{validate, Violation};

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("Only possible while editing")]
    NotEditing,
    #[error("Finish or cancel editing first")]
    NotViewing,
    #[error("{0}")]
    Invalid(#[from] Violation),
    #[error("Loading failed: {0}")]
    Load(#[source] StoreError),
    #[error("Saving failed: {0}")]
    Save(#[source] StoreError),
    #[error("Deleting failed: {0}")]
    Delete(#[source] StoreError),
}

impl SessionError {
    /// Text for the user. Validation problems are explained, adapter failures are not.
    pub fn notice(&self) -> String {
        match self {
            SessionError::Load(_) => "Recipe not found.".to_string(),
            SessionError::Save(_) => "Error while saving.".to_string(),
            SessionError::Delete(_) => "Error while deleting.".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    View,
    Edit(Draft),
}

/// Result of [`RecipeSession::delete`]. The session survives unless the recipe is gone.
pub enum DeleteOutcome<S> {
    Deleted,
    Declined(RecipeSession<S>),
    Failed(RecipeSession<S>, SessionError),
}

pub struct RecipeSession<S> {
    store: S,
    recipe: Recipe,
    display_servings: u32,
    mode: Mode,
}

impl<S: RecipeStore> RecipeSession<S> {
    /// Fetch a recipe and start viewing it. Failure ends the session before it starts.
    pub async fn load(store: S, id: RecipeId) -> Result<Self, SessionError> {
        match store.get_recipe(id).await {
            Ok(recipe) => {
                tracing::info!(recipe_id = %id, "Loaded recipe");
                Ok(Self::new(store, recipe))
            }
            Err(e) => {
                tracing::warn!(recipe_id = %id, "Failed to load recipe: {e}");
                Err(SessionError::Load(e))
            }
        }
    }

    pub fn new(store: S, recipe: Recipe) -> Self {
        Self {
            display_servings: recipe.content.servings.max(1),
            store,
            recipe,
            mode: Mode::View,
        }
    }

    /// The last copy confirmed by the server.
    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn display_servings(&self) -> u32 {
        self.display_servings
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Edit(_))
    }

    /// The draft while editing. It can only be changed through the session's
    /// mutators, so it cannot be swapped for a copy of another recipe:
    ///
    /// ```compile_fail
    /// # fn swap<S: bw::RecipeStore>(session: &mut bw::RecipeSession<S>, other: &bw::Recipe) {
    /// *session.draft_mut().unwrap() = bw::Draft::snapshot(other, 9);
    /// # }
    /// ```
    pub fn draft(&self) -> Option<&Draft> {
        match &self.mode {
            Mode::Edit(draft) => Some(draft),
            Mode::View => None,
        }
    }

    fn edit(&mut self, change: impl FnOnce(&mut Draft) -> bool) -> Result<bool, SessionError> {
        match &mut self.mode {
            Mode::Edit(draft) => Ok(change(draft)),
            Mode::View => Err(SessionError::NotEditing),
        }
    }

    /// Change how many portions are shown. Returns false for 0.
    pub fn set_display_servings(&mut self, servings: u32) -> Result<bool, SessionError> {
        if self.is_editing() {
            return Err(SessionError::NotViewing);
        }
        if servings == 0 {
            return Ok(false);
        }
        self.display_servings = servings;
        Ok(true)
    }

    pub fn begin_edit(&mut self) -> Result<(), SessionError> {
        if self.is_editing() {
            return Err(SessionError::NotViewing);
        }
        self.mode = Mode::Edit(Draft::snapshot(&self.recipe, self.display_servings));
        tracing::debug!(recipe_id = %self.recipe.id, servings = self.display_servings, "Editing");
        Ok(())
    }

    /// Throw the draft away.
    pub fn cancel_edit(&mut self) -> Result<(), SessionError> {
        if !self.is_editing() {
            return Err(SessionError::NotEditing);
        }
        self.mode = Mode::View;
        tracing::debug!(recipe_id = %self.recipe.id, "Edit cancelled");
        Ok(())
    }

    // Draft mutators. Each returns Ok(false) when the input was ignored.

    pub fn set_title(&mut self, text: &str) -> Result<bool, SessionError> {
        self.edit(|draft| draft.set_title(text))
    }

    /// Set the draft's serving count; a valid count also becomes the display count.
    pub fn set_servings(&mut self, value: &str) -> Result<bool, SessionError> {
        let Mode::Edit(draft) = &mut self.mode else {
            return Err(SessionError::NotEditing);
        };
        Ok(match draft.set_servings(value) {
            Some(Input::Value(servings)) => {
                self.display_servings = servings;
                true
            }
            Some(Input::Empty) => true,
            None => false,
        })
    }

    pub fn set_cooking_time(&mut self, value: &str) -> Result<bool, SessionError> {
        self.edit(|draft| draft.set_cooking_time(value))
    }

    /// Set a whole-recipe nutrient total.
    pub fn set_nutrient(&mut self, key: Nutrient, value: &str) -> Result<bool, SessionError> {
        self.edit(|draft| draft.set_nutrient(key, value))
    }

    pub fn set_ingredient_field(
        &mut self,
        index: usize,
        field: IngredientField,
        value: &str,
    ) -> Result<bool, SessionError> {
        self.edit(|d| d.set_ingredient_field(index, field, value))
    }

    pub fn add_ingredient(&mut self) -> Result<bool, SessionError> {
        self.edit(Draft::add_ingredient)
    }

    pub fn remove_ingredient(&mut self, index: usize) -> Result<bool, SessionError> {
        self.edit(|draft| draft.remove_ingredient(index))
    }

    pub fn set_step(&mut self, index: usize, text: &str) -> Result<bool, SessionError> {
        self.edit(|draft| draft.set_step(index, text))
    }

    pub fn add_step(&mut self) -> Result<bool, SessionError> {
        self.edit(Draft::add_step)
    }

    pub fn remove_step(&mut self, index: usize) -> Result<bool, SessionError> {
        self.edit(|draft| draft.remove_step(index))
    }

    /// Validate the draft and send it. On success the server's copy replaces the
    /// committed recipe and the session returns to viewing. On any error the
    /// draft is kept as it was.
    pub async fn save(&mut self) -> Result<(), SessionError> {
        let Mode::Edit(draft) = &self.mode else {
            return Err(SessionError::NotEditing);
        };
        let update = validate(draft).map_err(|violation| {
            tracing::debug!(recipe_id = %self.recipe.id, "Draft rejected: {violation}");
            SessionError::Invalid(violation)
        })?;

        match self.store.update_recipe(self.recipe.id, &update).await {
            Ok(saved) => {
                tracing::info!(recipe_id = %saved.id, "Saved recipe");
                self.display_servings = saved.content.servings.max(1);
                self.recipe = saved;
                self.mode = Mode::View;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(recipe_id = %self.recipe.id, "Failed to save recipe: {e}");
                Err(SessionError::Save(e))
            }
        }
    }

    /// Delete the recipe after `confirm` agrees. Only possible while viewing.
    pub async fn delete(self, confirm: impl FnOnce(&Recipe) -> bool) -> DeleteOutcome<S> {
        if self.is_editing() {
            return DeleteOutcome::Failed(self, SessionError::NotViewing);
        }
        if !confirm(&self.recipe) {
            return DeleteOutcome::Declined(self);
        }
        match self.store.delete_recipe(self.recipe.id).await {
            Ok(()) => {
                tracing::info!(recipe_id = %self.recipe.id, "Deleted recipe");
                DeleteOutcome::Deleted
            }
            Err(e) => {
                tracing::warn!(recipe_id = %self.recipe.id, "Failed to delete recipe: {e}");
                DeleteOutcome::Failed(self, SessionError::Delete(e))
            }
        }
    }

    /// Scaled lines while viewing, raw draft lines while editing.
    pub fn ingredient_lines(&self) -> Vec<IngredientLine> {
        match &self.mode {
            Mode::View => presentation::scaled_ingredients(&self.recipe, self.display_servings),
            Mode::Edit(draft) => presentation::raw_ingredients(&draft.content().ingredients),
        }
    }

    /// Per-serving values of the stored totals while viewing. These follow the
    /// stored serving count, not the display count.
    pub fn nutrient_values(&self) -> NutrientView {
        match &self.mode {
            Mode::View => NutrientView::PerServing(nutrients::project(
                &self.recipe.content.nutrients,
                self.recipe.content.servings,
            )),
            Mode::Edit(draft) => NutrientView::Totals(draft.content().nutrients),
        }
    }
}
