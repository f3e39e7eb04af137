pub mod basic_models;
pub mod catalog;
pub mod draft;
pub mod nutrients;
pub mod presentation;
pub mod scaling;
pub mod session;
pub mod store;
pub mod validate;

pub use basic_models::{
    Ingredient, Nutrient, NutrientMap, Recipe, RecipeContent, RecipeId, RecipeUpdate,
};
pub use draft::{Draft, IngredientField};
pub use session::{DeleteOutcome, Mode, RecipeSession, SessionError};
pub use store::{RecipeStore, StoreError, StoreResult};
pub use validate::{validate, Violation};
